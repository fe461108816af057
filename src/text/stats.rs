//! 글자/단어/문자/공백/줄 수 계산

use serde::{Deserialize, Serialize};

use super::letters::is_letter;

/// 텍스트 통계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextStats {
    /// 전체 문자 수 (코드포인트 단위)
    pub total_characters: usize,
    /// ASCII 공백을 뺀 문자 수 (탭 등 다른 공백은 포함)
    pub characters_no_spaces: usize,
    /// 글자 범위 표에 속하는 문자 수
    pub letters: usize,
    /// 공백으로 구분된 단어 수
    pub words: usize,
    /// ASCII 공백 수
    pub spaces: usize,
    /// `\n`으로 나눈 줄 수 (마지막 빈 줄 포함)
    pub lines: usize,
}

/// ASCII 공백을 제외한 문자 수
pub fn count_characters(text: &str) -> usize {
    text.chars().filter(|&c| c != ' ').count()
}

/// 단어 구분 문자: 유니코드 공백 + 정보 구분 문자(U+001C ~ U+001F)
fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// 단어 수
pub fn count_words(text: &str) -> usize {
    text.split(is_word_separator).filter(|w| !w.is_empty()).count()
}

/// 글자 수
pub fn count_letters(text: &str) -> usize {
    text.chars().filter(|&c| is_letter(c)).count()
}

/// 텍스트 통계 계산
///
/// # Examples
/// ```
/// use langid::text::compute_stats;
///
/// let stats = compute_stats("Hello, this is a test! 123");
/// assert_eq!(stats.words, 6);
/// assert_eq!(stats.letters, 16);
/// ```
pub fn compute_stats(text: &str) -> TextStats {
    let total_characters = text.chars().count();
    let spaces = text.chars().filter(|&c| c == ' ').count();

    TextStats {
        total_characters,
        characters_no_spaces: total_characters - spaces,
        letters: count_letters(text),
        words: count_words(text),
        spaces,
        lines: text.split('\n').count(),
    }
}
