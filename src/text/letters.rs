//! 고정 유니코드 범위 기반 글자 판별
//!
//! 일반 유니코드 "Letter" 속성이 아니라 손으로 나열한 범위 표를 사용합니다.
//! 기존 모델/통계와의 호환을 위해 범위를 그대로 유지해야 합니다.

/// 글자로 취급하는 코드포인트 범위 (양 끝 포함)
pub const LETTER_RANGES: [(u32, u32); 11] = [
    (0x0061, 0x007A), // a-z
    (0x0041, 0x005A), // A-Z
    (0x00C0, 0x024F), // 라틴 확장
    (0x0370, 0x1EFF), // 그리스 ~ 라틴 확장 추가
    (0x0400, 0x04FF), // 키릴 (위 범위에 포함)
    (0x0600, 0x06FF), // 아랍 (위 범위에 포함)
    (0x0700, 0x074F), // 시리아 (위 범위에 포함)
    (0x0750, 0x077F), // 아랍 보충 (위 범위에 포함)
    (0x0800, 0x4DBF), // 사마리아 ~ CJK 확장 A
    (0x4E00, 0x9FFF), // CJK 통합 한자
    (0xAC00, 0xD7AF), // 한글 음절
];

/// 문자가 글자 범위 표에 속하는지 확인
pub fn is_letter(ch: char) -> bool {
    let cp = ch as u32;
    LETTER_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_letters() {
        assert!(is_letter('a'));
        assert!(is_letter('Z'));
        assert!(!is_letter('1'));
        assert!(!is_letter('!'));
        assert!(!is_letter(' '));
        assert!(!is_letter('_'));
    }

    #[test]
    fn test_extended_scripts() {
        assert!(is_letter('é'));
        assert!(is_letter('ß'));
        assert!(is_letter('λ'));
        assert!(is_letter('ж'));
        assert!(is_letter('ب'));
        assert!(is_letter('क'));
        assert!(is_letter('ક'));
        assert!(is_letter('书'));
        assert!(is_letter('한'));
    }

    #[test]
    fn test_outside_table() {
        // 곱셈 기호도 U+00C0-U+024F 안이라 글자로 센다
        assert!(is_letter('×'));
        assert!(!is_letter('\u{FF21}')); // 전각 A
        assert!(!is_letter('\u{1F600}')); // 이모지
        assert!(!is_letter('\u{2000}'));
    }
}
