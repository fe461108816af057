//! 분류 결과

use serde::{Deserialize, Serialize};

/// 분류 결과
///
/// `language`가 `None`이고 `confidence`가 0.0이면 빈 입력에 대한 결과입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// 예측 언어 (빈 입력이면 None)
    pub language: Option<String>,
    /// 예측 언어의 확률 (0.0 ~ 1.0)
    pub confidence: f64,
    /// 레이블 순서의 전체 확률 분포 (합 = 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Vec<(String, f64)>>,
}

impl ClassificationResult {
    /// 빈 입력 결과
    pub fn empty() -> Self {
        Self {
            language: None,
            confidence: 0.0,
            distribution: None,
        }
    }

    /// 빈 입력 결과인지 확인
    pub fn is_empty(&self) -> bool {
        self.language.is_none()
    }

    /// 확률 분포 제거
    pub fn without_distribution(mut self) -> Self {
        self.distribution = None;
        self
    }

    /// 특정 언어의 확률
    pub fn probability(&self, label: &str) -> Option<f64> {
        self.distribution
            .as_ref()?
            .iter()
            .find(|(l, _)| l == label)
            .map(|&(_, p)| p)
    }

    /// 확률 내림차순 상위 `n`개
    pub fn top(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .distribution
            .iter()
            .flatten()
            .map(|(l, p)| (l.as_str(), *p))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}
