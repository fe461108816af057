//! 텍스트 통계 모듈
//!
//! 분류기와 무관하게 글자/단어/문자/공백/줄 수를 계산합니다.
//! 모든 함수는 순수 함수이며 실패하지 않습니다.

mod letters;
mod stats;

pub use letters::{is_letter, LETTER_RANGES};
pub use stats::{compute_stats, count_characters, count_letters, count_words, TextStats};
