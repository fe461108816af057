//! 학습 데이터셋 (CSV)
//!
//! `text`, `language` 열이 있는 CSV를 읽습니다. 다른 열은 무시합니다.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{LangIdError, Result};

/// 학습 샘플 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub text: String,
    pub language: String,
}

impl Sample {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
        }
    }
}

/// 레이블이 붙은 텍스트 모음
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    pub samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.samples.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.samples.iter().map(|s| s.language.as_str()).collect()
    }

    /// 언어별 샘플 수
    pub fn language_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for sample in &self.samples {
            *counts.entry(sample.language.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// 언어별 층화 분할 `(train, test)`
    ///
    /// 언어마다 시드로 섞은 뒤 `round(test_size * n)`개를 평가용으로 떼어냅니다.
    /// 각 언어는 최소 1개를 학습용으로 남깁니다.
    pub fn stratified_split(&self, test_size: f64, seed: u64) -> Result<(Dataset, Dataset)> {
        if !(0.0..1.0).contains(&test_size) {
            return Err(LangIdError::Dataset(format!(
                "test_size는 0.0 이상 1.0 미만이어야 합니다: {}",
                test_size
            )));
        }

        let mut by_language: BTreeMap<&str, Vec<&Sample>> = BTreeMap::new();
        for sample in &self.samples {
            by_language.entry(sample.language.as_str()).or_default().push(sample);
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut train = Vec::new();
        let mut test = Vec::new();

        for (language, mut group) in by_language {
            group.shuffle(&mut rng);
            let n = group.len();
            let n_test = ((test_size * n as f64).round() as usize).min(n.saturating_sub(1));
            if n_test == 0 && test_size > 0.0 {
                log::warn!("'{}' 샘플이 {}개뿐이라 평가 세트에서 제외됩니다", language, n);
            }
            let (test_part, train_part) = group.split_at(n_test);
            test.extend(test_part.iter().map(|s| (*s).clone()));
            train.extend(train_part.iter().map(|s| (*s).clone()));
        }

        Ok((Dataset::new(train), Dataset::new(test)))
    }
}

#[derive(Debug, Deserialize)]
struct Record {
    text: String,
    language: String,
}

/// CSV 파일에서 데이터셋 로드
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let dataset = read_dataset(file)?;
    log::info!(
        "데이터셋 로드: {} (샘플 {}개, 언어 {}개)",
        path.display(),
        dataset.len(),
        dataset.language_counts().len()
    );
    Ok(dataset)
}

/// CSV 리더에서 데이터셋 읽기. 텍스트가 빈 행은 건너뜁니다.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in ["text", "language"] {
        if !headers.iter().any(|h| h == column) {
            return Err(LangIdError::Dataset(format!("'{}' 열이 없습니다", column)));
        }
    }

    let mut samples = Vec::new();
    let mut skipped = 0usize;
    for record in csv_reader.deserialize::<Record>() {
        let record = record?;
        let text = record.text.trim();
        let language = record.language.trim();
        if text.is_empty() || language.is_empty() {
            skipped += 1;
            continue;
        }
        samples.push(Sample::new(text, language));
    }

    if skipped > 0 {
        log::warn!("빈 텍스트/레이블 행 {}개 건너뜀", skipped);
    }
    Ok(Dataset::new(samples))
}
