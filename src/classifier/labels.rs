//! 언어 레이블 집합

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// 순서가 고정된 언어 레이블 집합
///
/// 인덱스와 레이블이 1:1로 대응하며 중복이 없습니다.
/// 확률 벡터의 차원과 동점 처리 순서를 결정합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct LabelSet {
    labels: Vec<String>,
}

impl TryFrom<Vec<String>> for LabelSet {
    type Error = String;

    /// 저장된 순서를 그대로 유지하되 중복과 빈 레이블은 거부
    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        let mut seen = BTreeSet::new();
        for label in &labels {
            if label.is_empty() {
                return Err("빈 레이블이 있습니다".into());
            }
            if !seen.insert(label.as_str()) {
                return Err(format!("중복된 레이블: {}", label));
            }
        }
        Ok(Self { labels })
    }
}

impl From<LabelSet> for Vec<String> {
    fn from(set: LabelSet) -> Self {
        set.labels
    }
}

impl LabelSet {
    /// 학습 레이블에서 생성 (정렬 + 중복 제거)
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = labels
            .into_iter()
            .map(|l| l.as_ref().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        Self {
            labels: unique.into_iter().collect(),
        }
    }

    /// 레이블 수
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 인덱스의 레이블
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.labels.get(idx).map(String::as_str)
    }

    /// 레이블의 인덱스
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_labels_sorts_and_dedups() {
        let set = LabelSet::from_labels(["Spanish", "English", "Spanish", "", "Korean"]);
        assert_eq!(set.as_slice(), &["English", "Korean", "Spanish"]);
        assert_eq!(set.index_of("Korean"), Some(1));
        assert_eq!(set.get(2), Some("Spanish"));
        assert_eq!(set.get(3), None);
        assert_eq!(set.index_of("French"), None);
    }

    #[test]
    fn test_bijection() {
        let set = LabelSet::from_labels(["c", "a", "b"]);
        for (i, label) in set.iter().enumerate() {
            assert_eq!(set.index_of(label), Some(i));
        }
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let ok: LabelSet = serde_json::from_str(r#"["b", "a"]"#).unwrap();
        // 저장된 순서 유지
        assert_eq!(ok.get(0), Some("b"));

        assert!(serde_json::from_str::<LabelSet>(r#"["a", "a"]"#).is_err());
        assert!(serde_json::from_str::<LabelSet>(r#"["a", ""]"#).is_err());
    }
}
