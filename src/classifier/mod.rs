//! 다중 클래스 확률 분류기
//!
//! 특징 벡터를 언어 레이블과 전체 언어에 대한 확률 분포로 매핑합니다.
//!
//! # 개요
//!
//! 1. **학습**: `LanguageClassifier::fit` (일괄 학습, 증분 학습 없음)
//! 2. **점수**: 레이블별 선형 점수 `W·x + b`
//! 3. **정규화**: 소프트맥스로 확률 분포 생성, argmax가 예측 언어
//!
//! 동점은 레이블 집합의 앞쪽 레이블이 이깁니다.

mod labels;
mod linear;
mod result;
mod train;

use serde::{Deserialize, Serialize};

use crate::error::{LangIdError, Result};
use crate::features::FeatureVector;

// 공개 인터페이스
pub use labels::LabelSet;
pub use linear::{softmax, LinearModel};
pub use result::ClassificationResult;
pub use train::{train_logistic, train_naive_bayes, TrainOptions};

/// 분류기 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// 다항 로지스틱 회귀
    #[default]
    Logistic,
    /// 다항 나이브 베이즈
    NaiveBayes,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Logistic => "logistic",
            ModelKind::NaiveBayes => "naive_bayes",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logistic" => Ok(ModelKind::Logistic),
            "naive_bayes" | "naive-bayes" | "nb" => Ok(ModelKind::NaiveBayes),
            other => Err(format!("알 수 없는 모델 종류: {}", other)),
        }
    }
}

/// 언어 분류기
///
/// 학습 전에는 예측할 수 없습니다 (`LangIdError::UntrainedModel`).
#[derive(Debug, Clone)]
pub struct LanguageClassifier {
    kind: ModelKind,
    options: TrainOptions,
    model: Option<LinearModel>,
}

impl Default for LanguageClassifier {
    fn default() -> Self {
        Self::new(ModelKind::default())
    }
}

impl LanguageClassifier {
    /// 학습 전 분류기 생성
    pub fn new(kind: ModelKind) -> Self {
        Self::with_options(kind, TrainOptions::default())
    }

    /// 학습 옵션을 지정하여 생성
    pub fn with_options(kind: ModelKind, options: TrainOptions) -> Self {
        Self {
            kind,
            options,
            model: None,
        }
    }

    /// 학습된 파라미터로 생성 (차원/값 검증 포함)
    pub fn from_model(kind: ModelKind, model: LinearModel) -> Result<Self> {
        model.validate().map_err(LangIdError::Training)?;
        Ok(Self {
            kind,
            options: TrainOptions::default(),
            model: Some(model),
        })
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// 학습 여부
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// 학습된 파라미터
    pub fn model(&self) -> Option<&LinearModel> {
        self.model.as_ref()
    }

    /// 학습된 파라미터 반환 (소유권 이동)
    pub fn into_model(self) -> Option<LinearModel> {
        self.model
    }

    /// 레이블 집합 (학습 전이면 None)
    pub fn labels(&self) -> Option<&LabelSet> {
        self.model.as_ref().map(|m| &m.labels)
    }

    /// 일괄 학습. 이전 파라미터는 버려진다.
    pub fn fit<S: AsRef<str>>(&mut self, features: &[FeatureVector], labels: &[S]) -> Result<()> {
        let model = match self.kind {
            ModelKind::Logistic => train_logistic(features, labels, &self.options)?,
            ModelKind::NaiveBayes => train_naive_bayes(features, labels, &self.options)?,
        };
        log::info!(
            "{} 분류기 학습 완료: 샘플 {}개, 언어 {}개, 특징 {}개",
            self.kind,
            features.len(),
            model.labels.len(),
            model.n_features
        );
        self.model = Some(model);
        Ok(())
    }

    /// 특징 벡터 분류
    pub fn predict(&self, features: &FeatureVector) -> Result<ClassificationResult> {
        let model = self.model.as_ref().ok_or(LangIdError::UntrainedModel)?;
        Ok(model.predict(features))
    }
}
