//! 문자 n-gram 특징 추출
//!
//! 원문 텍스트를 고정 어휘 기반의 희소 TF-IDF 벡터로 변환합니다.
//!
//! # 사용 예시
//!
//! ```
//! use langid::features::{TfidfVectorizer, VectorizerConfig};
//!
//! let corpus = ["hello world", "hello there", "bonjour monde", "bonjour toi"];
//! let mut vectorizer = TfidfVectorizer::new(VectorizerConfig::new());
//! vectorizer.fit(&corpus).unwrap();
//!
//! let vector = vectorizer.transform("hello");
//! assert!(!vector.is_zero());
//! assert!(vectorizer.transform("").is_zero());
//! ```

mod config;
mod ngrams;
mod vectorizer;

pub use config::VectorizerConfig;
pub use ngrams::char_wb_ngrams;
pub use vectorizer::{FeatureVector, TfidfVectorizer};
