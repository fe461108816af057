//! 특징 추출 설정
//!
//! 어휘 선택과 TF-IDF 가중치에 사용되는 설정값 정의

use serde::{Deserialize, Serialize};

/// TF-IDF 벡터라이저 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// 문자 n-gram 길이 범위 (양 끝 포함)
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// 유지할 최대 어휘 수
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// 최소 문서 빈도 (문서 수)
    /// 이보다 적은 문서에 나타나는 n-gram은 버림
    #[serde(default = "default_min_df")]
    pub min_df: usize,

    /// 최대 문서 빈도 (전체 문서 대비 비율)
    /// 이보다 많은 문서에 나타나는 n-gram은 변별력이 없으므로 버림
    #[serde(default = "default_max_df")]
    pub max_df: f64,

    /// 소문자 변환 여부
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,

    /// 로그 스케일 TF 사용 여부 (1 + ln(tf))
    #[serde(default)]
    pub sublinear_tf: bool,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 3)
}

fn default_max_features() -> usize {
    5000
}

fn default_min_df() -> usize {
    2
}

fn default_max_df() -> f64 {
    0.95
}

fn default_lowercase() -> bool {
    true
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            ngram_range: default_ngram_range(),
            max_features: default_max_features(),
            min_df: default_min_df(),
            max_df: default_max_df(),
            lowercase: default_lowercase(),
            sublinear_tf: false,
        }
    }
}

impl VectorizerConfig {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// n-gram 범위 설정 (최소 1)
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        let min_n = min_n.max(1);
        self.ngram_range = (min_n, max_n.max(min_n));
        self
    }

    /// 최대 어휘 수 설정
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// 최소 문서 빈도 설정
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    /// 최대 문서 빈도 비율 설정 (0.0 ~ 1.0)
    pub fn with_max_df(mut self, max_df: f64) -> Self {
        self.max_df = max_df.clamp(0.0, 1.0);
        self
    }

    /// 소문자 변환 설정
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// 로그 스케일 TF 설정
    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }
}
