//! 언어 감지 모듈
//!
//! 학습된 모델 위에서 텍스트, 페이지(줄 단위), 단어, 레이블 구역 단위 분석을 제공합니다.

mod analyzer;
mod input;
mod sections;

pub use analyzer::{
    LanguageDetector, LineBreakdown, PageAnalysis, SectionAnalysis, SectionResult, TextAnalysis,
    WordDetection,
};
pub use input::InputKind;
pub use sections::{
    evaluate_against_labels, parse_labeled_sections, parse_word_list, LabelEvaluation,
    LabeledDetection, LabeledSections, HIGH_CONFIDENCE,
};
