//! 언어 레이블이 붙은 단어 목록 파싱
//!
//! 다음과 같은 용어집 형식을 읽어 레이블별 단어 목록을 만듭니다:
//!
//! ```text
//! Chinese (中文): 书 (book), 学习 (study)
//! French: livre (book), école (school)
//! ```
//!
//! 헤더의 괄호는 문자 체계 표기, 단어 뒤 괄호는 뜻풀이로 보고 제거합니다.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classifier::ClassificationResult;

lazy_static! {
    /// `레이블 (표기): 단어들`
    static ref HEADER_RE: Regex = Regex::new(r"^([^:]+?)(?:\s*\([^)]+\))?:\s*(.+)$").unwrap();
    /// 레이블 뒤 문자 체계 표기
    static ref SCRIPT_NOTE_RE: Regex = Regex::new(r"\s*\([^)]+\)").unwrap();
    /// 단어 뒤 뜻풀이
    static ref GLOSS_RE: Regex = Regex::new(r"\([^)]*\)").unwrap();
}

/// 레이블별 단어 목록 (처음 등장한 순서 유지)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabeledSections {
    sections: Vec<(String, Vec<String>)>,
}

impl LabeledSections {
    pub fn new() -> Self {
        Self::default()
    }

    /// 레이블의 단어 목록 교체 (이미 있으면 위치는 유지)
    pub fn set(&mut self, label: &str, words: Vec<String>) {
        match self.sections.iter_mut().find(|(l, _)| l == label) {
            Some((_, existing)) => *existing = words,
            None => self.sections.push((label.to_string(), words)),
        }
    }

    /// 레이블의 단어 목록에 추가 (없으면 새로 만듦)
    pub fn extend(&mut self, label: &str, words: Vec<String>) {
        match self.sections.iter_mut().find(|(l, _)| l == label) {
            Some((_, existing)) => existing.extend(words),
            None => self.sections.push((label.to_string(), words)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.sections
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, words)| words.as_slice())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sections
            .iter()
            .map(|(l, words)| (l.as_str(), words.as_slice()))
    }

    /// 레이블 수
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// 전체 단어 수
    pub fn word_count(&self) -> usize {
        self.sections.iter().map(|(_, words)| words.len()).sum()
    }
}

/// `word1, word2 (뜻), word3` 형식의 문자열을 단어 목록으로 분리
///
/// 괄호 안 뜻풀이를 지우고 쉼표로 나눈 뒤 빈 항목은 버립니다.
///
/// # Examples
/// ```
/// use langid::detection::parse_word_list;
///
/// assert_eq!(parse_word_list("书 (book), 学习 (study),, "), vec!["书", "学习"]);
/// ```
pub fn parse_word_list(text: &str) -> Vec<String> {
    GLOSS_RE
        .replace_all(text, "")
        .split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// 용어집 형식 텍스트를 레이블별 단어 목록으로 파싱
///
/// 헤더가 없는 줄은 콜론을 포함하고 이미 열린 구역이 있을 때만
/// 그 구역의 이어지는 줄로 취급합니다. 그 밖의 줄은 건너뜁니다.
pub fn parse_labeled_sections(text: &str) -> LabeledSections {
    let mut sections = LabeledSections::new();
    let mut current: Option<String> = None;

    for (line_no, raw) in text.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = HEADER_RE.captures(line) {
            let label = SCRIPT_NOTE_RE.replace_all(caps[1].trim(), "").trim().to_string();
            if label.is_empty() {
                log::debug!("{}번째 줄: 빈 레이블, 건너뜀", line_no + 1);
                continue;
            }
            sections.set(&label, parse_word_list(caps[2].trim()));
            current = Some(label);
        } else if let (Some(label), Some((_, rest))) = (current.as_deref(), line.split_once(':')) {
            // 이어지는 줄
            sections.extend(label, parse_word_list(rest.trim()));
        } else {
            log::debug!("{}번째 줄: 레이블 형식이 아님, 건너뜀", line_no + 1);
        }
    }

    sections
}

/// 레이블 구역 안 단어 하나의 감지 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledDetection {
    pub word: String,
    /// 용어집에 적힌 레이블
    pub label_language: String,
    pub detected_language: Option<String>,
    pub confidence: f64,
}

impl LabeledDetection {
    pub fn new(word: &str, label_language: &str, result: &ClassificationResult) -> Self {
        Self {
            word: word.to_string(),
            label_language: label_language.to_string(),
            detected_language: result.language.clone(),
            confidence: result.confidence,
        }
    }

    /// 감지 레이블과 용어집 레이블이 서로 포함 관계인지 (대소문자 무시)
    pub fn label_matches(&self) -> bool {
        let Some(detected) = self.detected_language.as_deref() else {
            return false;
        };
        let detected = detected.to_lowercase();
        let label = self.label_language.to_lowercase();
        label.contains(&detected) || detected.contains(&label)
    }
}

/// 고신뢰 기준
pub const HIGH_CONFIDENCE: f64 = 0.9;

/// 용어집 레이블 대비 감지 결과 요약
///
/// 정답 채점이 아니라 근사적인 자기 보고입니다. 레이블 이름이 서로 포함되거나
/// 신뢰도가 0.9를 넘으면 레이블과 상관없이 맞은 것으로 셉니다.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelEvaluation {
    pub total_words: usize,
    /// 근사 일치 수
    pub matched_count: usize,
    /// 신뢰도 > 0.9 인 감지 수
    pub high_confidence_count: usize,
    /// 감지된 언어별 단어 수
    pub detected_language_counts: BTreeMap<String, usize>,
}

/// 감지 결과를 용어집 레이블과 비교
pub fn evaluate_against_labels(detections: &[LabeledDetection]) -> LabelEvaluation {
    let mut eval = LabelEvaluation {
        total_words: detections.len(),
        ..LabelEvaluation::default()
    };

    for d in detections {
        let high = d.confidence > HIGH_CONFIDENCE;
        if high {
            eval.high_confidence_count += 1;
        }
        if d.label_matches() || high {
            eval.matched_count += 1;
        }
        if let Some(lang) = &d.detected_language {
            *eval.detected_language_counts.entry(lang.clone()).or_insert(0) += 1;
        }
    }

    eval
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_single_header_line() {
        let sections = parse_labeled_sections("French: livre (book), école (school)");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections.get("French"), Some(words(&["livre", "école"]).as_slice()));
    }

    #[test]
    fn test_script_annotation_stripped() {
        let text = "Chinese (中文): 书 (book), 学习 (study), 朋友 (friend)\n\n\
                    Greek (Ελληνικά): βιβλίο (book), σχολείο (school)";
        let sections = parse_labeled_sections(text);
        assert_eq!(sections.labels().collect::<Vec<_>>(), vec!["Chinese", "Greek"]);
        assert_eq!(
            sections.get("Chinese"),
            Some(words(&["书", "学习", "朋友"]).as_slice())
        );
        assert_eq!(sections.word_count(), 5);
    }

    #[test]
    fn test_continuation_line_needs_colon_and_open_section() {
        let text = "stray words, no header\n\
                    Spanish: libro, escuela\n\
                    : amigo (friend)\n\
                    more words without colon";
        let sections = parse_labeled_sections(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections.get("Spanish"),
            Some(words(&["libro", "escuela", "amigo"]).as_slice())
        );
    }

    #[test]
    fn test_colon_line_before_any_header_is_ignored() {
        let sections = parse_labeled_sections(": orphan, words");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_repeated_label_replaces_words_in_place() {
        let text = "A: one\nB: two\nA: three";
        let sections = parse_labeled_sections(text);
        assert_eq!(sections.labels().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(sections.get("A"), Some(words(&["three"]).as_slice()));
    }

    #[test]
    fn test_header_without_words_continues_previous_rules() {
        // 콜론 뒤가 비면 헤더가 아니다. 열린 구역이 있으면 이어지는 줄로 처리된다.
        let text = "Korean: 책\nJapanese:";
        let sections = parse_labeled_sections(text);
        assert_eq!(sections.labels().collect::<Vec<_>>(), vec!["Korean"]);
        assert_eq!(sections.get("Korean"), Some(words(&["책"]).as_slice()));
    }

    #[test]
    fn test_parse_word_list() {
        assert_eq!(parse_word_list("a (x), b,  , c (y (z)"), vec!["a", "b", "c"]);
        assert!(parse_word_list("(only gloss)").is_empty());
        assert!(parse_word_list("").is_empty());
    }

    fn detection(word: &str, label: &str, detected: Option<&str>, confidence: f64) -> LabeledDetection {
        LabeledDetection {
            word: word.into(),
            label_language: label.into(),
            detected_language: detected.map(str::to_string),
            confidence,
        }
    }

    #[test]
    fn test_label_matching_is_fuzzy() {
        assert!(detection("w", "Chinese", Some("chinese"), 0.1).label_matches());
        assert!(detection("w", "Malay", Some("Malayalam"), 0.1).label_matches());
        assert!(!detection("w", "Malay", Some("Indonesian"), 0.1).label_matches());
        assert!(!detection("w", "Malay", None, 0.0).label_matches());
    }

    #[test]
    fn test_evaluate_against_labels() {
        let detections = vec![
            detection("buku", "Malay", Some("Indonesian"), 0.95),
            detection("kawan", "Malay", Some("Malay"), 0.4),
            detection("bok", "Swedish", Some("Norwegian"), 0.5),
            detection("vän", "Swedish", Some("Swedish"), 0.91),
        ];
        let eval = evaluate_against_labels(&detections);
        assert_eq!(eval.total_words, 4);
        assert_eq!(eval.matched_count, 3);
        assert_eq!(eval.high_confidence_count, 2);
        assert_eq!(eval.detected_language_counts.get("Indonesian"), Some(&1));
        assert_eq!(eval.detected_language_counts.len(), 4);
    }

    #[test]
    fn test_evaluate_empty() {
        assert_eq!(evaluate_against_labels(&[]), LabelEvaluation::default());
    }
}
