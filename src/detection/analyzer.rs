//! 텍스트/페이지/단어 단위 언어 감지
//!
//! 모든 분석은 `TrainedModel::classify` 한 번 호출로 귀결됩니다.
//! 감지기는 읽기 전용이므로 `&LanguageDetector`를 여러 스레드에 나눠 써도 됩니다.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::sections::{parse_word_list, LabeledDetection, LabeledSections};
use crate::classifier::{ClassificationResult, LabelSet};
use crate::error::Result;
use crate::model::{load_model, TrainedModel};
use crate::text::{compute_stats, TextStats};

/// 텍스트 전체 분석 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub result: ClassificationResult,
    pub stats: TextStats,
}

/// 한 줄 분석 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineBreakdown {
    /// 1부터 시작 (빈 줄 포함)
    pub line_number: usize,
    /// 다듬지 않은 원래 줄
    pub text: String,
    pub result: ClassificationResult,
    pub letter_count: usize,
    pub word_count: usize,
    /// 공백 제외 문자 수
    pub character_count: usize,
}

/// 페이지(여러 줄) 분석 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAnalysis {
    pub overall: TextAnalysis,
    pub line_breakdown: Vec<LineBreakdown>,
    /// 줄 단위로 감지된 언어 (처음 나온 순서)
    pub languages_present: Vec<String>,
    /// 언어별 줄 수 (처음 나온 순서)
    pub language_distribution: Vec<(String, usize)>,
}

/// 단어 하나의 감지 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordDetection {
    pub word: String,
    #[serde(flatten)]
    pub result: ClassificationResult,
}

/// 레이블 구역 하나의 감지 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResult {
    pub label: String,
    pub words: Vec<WordDetection>,
}

/// 용어집 전체 감지 결과
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub sections: Vec<SectionResult>,
    /// 모든 구역의 단어를 펼친 목록
    pub detections: Vec<LabeledDetection>,
}

/// 언어 감지기
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    model: TrainedModel,
}

impl LanguageDetector {
    /// 모델 파일에서 감지기 생성
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_model(load_model(path)?))
    }

    /// 메모리의 모델로 감지기 생성
    pub fn from_model(model: TrainedModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    /// 지원 언어
    pub fn labels(&self) -> &LabelSet {
        self.model.labels()
    }

    /// 텍스트 전체를 한 단위로 분류하고 통계를 함께 계산
    pub fn analyze_text(&self, text: &str, include_probabilities: bool) -> TextAnalysis {
        let result = self.model.classify(text);
        TextAnalysis {
            result: if include_probabilities {
                result
            } else {
                result.without_distribution()
            },
            stats: compute_stats(text),
        }
    }

    /// 줄 단위 분석
    ///
    /// 공백뿐인 줄은 건너뛰지만 줄 번호는 그대로 셉니다.
    /// 줄별 결과에는 확률 분포를 넣지 않습니다.
    pub fn analyze_page(&self, text: &str, include_probabilities: bool) -> PageAnalysis {
        let overall = self.analyze_text(text, include_probabilities);

        let mut line_breakdown = Vec::new();
        let mut language_distribution: Vec<(String, usize)> = Vec::new();

        for (i, line) in text.split('\n').enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let result = self.model.classify(line).without_distribution();
            let stats = compute_stats(line);

            if let Some(lang) = &result.language {
                match language_distribution.iter_mut().find(|(l, _)| l == lang) {
                    Some((_, count)) => *count += 1,
                    None => language_distribution.push((lang.clone(), 1)),
                }
            }

            line_breakdown.push(LineBreakdown {
                line_number: i + 1,
                text: line.to_string(),
                result,
                letter_count: stats.letters,
                word_count: stats.words,
                character_count: stats.characters_no_spaces,
            });
        }

        let languages_present = language_distribution
            .iter()
            .map(|(lang, _)| lang.clone())
            .collect();

        PageAnalysis {
            overall,
            line_breakdown,
            languages_present,
            language_distribution,
        }
    }

    /// 단어 하나 분류 (확률 분포 포함, 통계 없음)
    pub fn analyze_word(&self, word: &str) -> ClassificationResult {
        self.model.classify(word.trim())
    }

    /// 쉼표로 구분된 단어 목록 분류 (괄호 뜻풀이 제거)
    pub fn detect_multiple_words(&self, text: &str) -> Vec<WordDetection> {
        self.detect_words(parse_word_list(text))
    }

    /// 단어 목록 분류. 빈 항목은 버립니다.
    pub fn detect_words<I, S>(&self, words: I) -> Vec<WordDetection>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words
            .into_iter()
            .filter_map(|w| {
                let word = w.as_ref().trim();
                if word.is_empty() {
                    return None;
                }
                Some(WordDetection {
                    word: word.to_string(),
                    result: self.analyze_word(word),
                })
            })
            .collect()
    }

    /// 레이블 구역의 모든 단어 분류
    pub fn analyze_sections(&self, sections: &LabeledSections) -> SectionAnalysis {
        let mut analysis = SectionAnalysis::default();

        for (label, words) in sections.iter() {
            let detected = self.detect_words(words);
            analysis.detections.extend(
                detected
                    .iter()
                    .map(|d| LabeledDetection::new(&d.word, label, &d.result)),
            );
            analysis.sections.push(SectionResult {
                label: label.to_string(),
                words: detected,
            });
        }

        log::debug!(
            "구역 {}개, 단어 {}개 분석",
            analysis.sections.len(),
            analysis.detections.len()
        );
        analysis
    }
}
