//! 입력 형식 판별 (대화형 모드용)

/// 입력 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// `Label: word, word` 형식의 여러 줄
    Formatted,
    /// 쉼표로 구분된 단어 목록
    WordList,
    /// 단어 하나 또는 일반 텍스트
    SingleWord,
}

impl InputKind {
    /// 콜론과 줄바꿈이 모두 있으면 `Formatted`,
    /// 쉼표가 있고 콜론이 없으면 `WordList`, 나머지는 `SingleWord`
    pub fn detect(input: &str) -> Self {
        let has_colon = input.contains(':');
        if has_colon && input.contains('\n') {
            InputKind::Formatted
        } else if input.contains(',') && !has_colon {
            InputKind::WordList
        } else {
            InputKind::SingleWord
        }
    }
}
