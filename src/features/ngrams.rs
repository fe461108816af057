//! 단어 경계를 고려한 문자 n-gram 추출
//!
//! 공백으로 나눈 각 토큰을 `' ' + 토큰 + ' '`로 감싼 뒤 n-gram을 뽑습니다.
//! 따라서 n-gram은 공백을 넘어가지 않고, 짧은 토큰도 최소 하나의 n-gram을 만듭니다.

/// 토큰 하나의 n-gram을 `out`에 추가
fn push_token_ngrams(token: &str, min_n: usize, max_n: usize, out: &mut Vec<String>) {
    let mut padded: Vec<char> = Vec::with_capacity(token.len() + 2);
    padded.push(' ');
    padded.extend(token.chars());
    padded.push(' ');

    for n in min_n..=max_n {
        if padded.len() <= n {
            // n보다 짧은 토큰은 전체를 한 번만 센다
            out.push(padded.iter().collect());
            break;
        }
        for window in padded.windows(n) {
            out.push(window.iter().collect());
        }
    }
}

/// 텍스트에서 단어 경계 문자 n-gram 추출
///
/// # Examples
/// ```
/// use langid::features::char_wb_ngrams;
///
/// let grams = char_wb_ngrams("ab", 1, 2, true);
/// assert_eq!(grams, vec![" ", "a", "b", " ", " a", "ab", "b "]);
/// ```
pub fn char_wb_ngrams(text: &str, min_n: usize, max_n: usize, lowercase: bool) -> Vec<String> {
    let min_n = min_n.max(1);
    if max_n < min_n {
        return Vec::new();
    }

    let normalized;
    let text = if lowercase {
        normalized = text.to_lowercase();
        normalized.as_str()
    } else {
        text
    };

    let mut out = Vec::new();
    for token in text.split_whitespace() {
        push_token_ngrams(token, min_n, max_n, &mut out);
    }
    out
}
