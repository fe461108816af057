//! TF-IDF 벡터라이저
//!
//! 학습 코퍼스에서 어휘와 IDF를 학습하고, 텍스트를 희소 특징 벡터로 변환합니다.
//!
//! ```text
//! tfidf(t, d) = tf(t, d) × idf(t)
//! idf(t)      = ln((1 + N) / (1 + df(t))) + 1
//! ```
//! 변환 결과는 L2 정규화됩니다.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::config::VectorizerConfig;
use super::ngrams::char_wb_ngrams;
use crate::error::{LangIdError, Result};

/// 희소 특징 벡터
///
/// (특징 인덱스, 가중치) 쌍을 인덱스 오름차순으로 저장합니다. 모든 가중치는 0 이상입니다.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    entries: Vec<(usize, f64)>,
    dim: usize,
}

impl FeatureVector {
    /// 영벡터 생성
    pub fn zeros(dim: usize) -> Self {
        Self {
            entries: Vec::new(),
            dim,
        }
    }

    /// (인덱스, 가중치) 쌍에서 생성
    ///
    /// 인덱스 순으로 정렬하고, 같은 인덱스는 합치며, 0 이하/범위 밖 값은 버립니다.
    pub fn from_pairs(dim: usize, pairs: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut merged: BTreeMap<usize, f64> = BTreeMap::new();
        for (idx, weight) in pairs {
            if idx < dim {
                *merged.entry(idx).or_insert(0.0) += weight;
            }
        }
        let entries = merged
            .into_iter()
            .filter(|&(_, w)| w > 0.0 && w.is_finite())
            .collect();
        Self { entries, dim }
    }

    /// 0이 아닌 항목
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// 벡터 차원 (어휘 크기)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// 0이 아닌 항목 수
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// 영벡터 여부
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// 인덱스의 가중치 (없으면 0)
    pub fn get(&self, idx: usize) -> f64 {
        self.entries
            .binary_search_by_key(&idx, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// L2 노름
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }
}

/// 직렬화용 벡터라이저 상태
///
/// 역인덱스(`HashMap`)는 저장하지 않고 로드할 때 다시 만든다.
#[derive(Serialize, Deserialize)]
struct VectorizerState {
    config: VectorizerConfig,
    terms: Vec<String>,
    idf: Vec<f64>,
}

/// 문자 n-gram TF-IDF 벡터라이저
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "VectorizerState", into = "VectorizerState")]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    /// 특징 인덱스 -> n-gram (사전순)
    terms: Vec<String>,
    /// 특징 인덱스 -> IDF
    idf: Vec<f64>,
    /// n-gram -> 특징 인덱스
    index: HashMap<String, usize>,
}

impl TryFrom<VectorizerState> for TfidfVectorizer {
    type Error = String;

    fn try_from(state: VectorizerState) -> std::result::Result<Self, Self::Error> {
        if state.terms.len() != state.idf.len() {
            return Err(format!(
                "terms/idf 길이 불일치: {} != {}",
                state.terms.len(),
                state.idf.len()
            ));
        }
        if let Some(bad) = state.idf.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(format!("유효하지 않은 IDF 값: {}", bad));
        }

        let mut index = HashMap::with_capacity(state.terms.len());
        for (i, term) in state.terms.iter().enumerate() {
            if index.insert(term.clone(), i).is_some() {
                return Err(format!("중복된 n-gram: {:?}", term));
            }
        }

        Ok(Self {
            config: state.config,
            terms: state.terms,
            idf: state.idf,
            index,
        })
    }
}

impl From<TfidfVectorizer> for VectorizerState {
    fn from(v: TfidfVectorizer) -> Self {
        Self {
            config: v.config,
            terms: v.terms,
            idf: v.idf,
        }
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(VectorizerConfig::default())
    }
}

impl TfidfVectorizer {
    /// 학습 전 벡터라이저 생성
    pub fn new(config: VectorizerConfig) -> Self {
        Self {
            config,
            terms: Vec::new(),
            idf: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// 설정
    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// 학습 여부
    pub fn is_fitted(&self) -> bool {
        !self.terms.is_empty()
    }

    /// 어휘 크기
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// 특징 인덱스 순서의 어휘
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// n-gram의 특징 인덱스
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// n-gram의 IDF
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|i| self.idf[i])
    }

    fn ngrams(&self, text: &str) -> Vec<String> {
        let (min_n, max_n) = self.config.ngram_range;
        char_wb_ngrams(text, min_n, max_n, self.config.lowercase)
    }

    /// 코퍼스에서 어휘와 IDF 학습
    ///
    /// 문서 빈도 필터(min_df, max_df)를 먼저 적용한 뒤
    /// 전체 빈도가 높은 순으로 `max_features`개를 남깁니다.
    pub fn fit<S: AsRef<str>>(&mut self, corpus: &[S]) -> Result<()> {
        if corpus.is_empty() {
            return Err(LangIdError::Training("빈 코퍼스로 학습할 수 없습니다".into()));
        }

        let n_docs = corpus.len();
        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in corpus {
            let mut seen: HashSet<String> = HashSet::new();
            for gram in self.ngrams(doc.as_ref()) {
                *term_freq.entry(gram.clone()).or_insert(0) += 1;
                seen.insert(gram);
            }
            for gram in seen {
                *doc_freq.entry(gram).or_insert(0) += 1;
            }
        }

        let max_doc_count = self.config.max_df * n_docs as f64;
        let mut candidates: Vec<(String, usize)> = term_freq
            .into_iter()
            .filter(|(term, _)| {
                let df = doc_freq.get(term).copied().unwrap_or(0);
                df >= self.config.min_df && (df as f64) <= max_doc_count
            })
            .collect();

        if candidates.is_empty() {
            return Err(LangIdError::Training(format!(
                "문서 빈도 필터 후 남은 n-gram이 없습니다 (문서 {}개, min_df={}, max_df={})",
                n_docs, self.config.min_df, self.config.max_df
            )));
        }

        // 빈도 내림차순, 같으면 사전순
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        candidates.truncate(self.config.max_features.max(1));

        let mut terms: Vec<String> = candidates.into_iter().map(|(t, _)| t).collect();
        terms.sort();

        let idf = terms
            .iter()
            .map(|t| {
                let df = doc_freq.get(t).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        self.index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        self.terms = terms;
        self.idf = idf;

        log::debug!(
            "어휘 학습 완료: 문서 {}개, n-gram {}개",
            n_docs,
            self.terms.len()
        );
        Ok(())
    }

    /// 텍스트를 TF-IDF 특징 벡터로 변환
    ///
    /// 어휘에 없는 n-gram은 무시합니다. 빈 텍스트나 학습 전에는 영벡터를 반환합니다.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let dim = self.terms.len();
        if dim == 0 {
            return FeatureVector::zeros(0);
        }

        // 합산 순서를 고정해야 같은 입력에 대해 비트 단위로 같은 결과가 나온다
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in self.ngrams(text) {
            if let Some(&idx) = self.index.get(&gram) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut weighted: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if self.config.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (idx, tf * self.idf[idx])
            })
            .collect();

        let norm = weighted.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut weighted {
                *w /= norm;
            }
        }

        FeatureVector::from_pairs(dim, weighted)
    }

    /// 학습 후 코퍼스 전체 변환
    pub fn fit_transform<S: AsRef<str>>(&mut self, corpus: &[S]) -> Result<Vec<FeatureVector>> {
        self.fit(corpus)?;
        Ok(corpus.iter().map(|d| self.transform(d.as_ref())).collect())
    }
}
