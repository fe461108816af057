//! 모델 학습과 평가
//!
//! CSV 데이터셋을 층화 분할해 학습하고, 떼어낸 평가 세트로 지표를 계산합니다.

mod dataset;
mod metrics;

use serde::{Deserialize, Serialize};

use crate::config::LangIdConfig;
use crate::error::{LangIdError, Result};
use crate::model::TrainedModel;

pub use dataset::{load_dataset, read_dataset, Dataset, Sample};
pub use metrics::{accuracy, per_class_report, ClassReport, ConfusionMatrix};

/// 평가 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub train_size: usize,
    pub test_size: usize,
    /// 평가 세트가 비어 있으면 0
    pub accuracy: f64,
    pub per_class: Vec<ClassReport>,
    pub confusion: ConfusionMatrix,
}

/// 학습된 모델로 데이터셋 평가
pub fn evaluate(model: &TrainedModel, dataset: &Dataset) -> ConfusionMatrix {
    let predicted: Vec<String> = dataset
        .samples
        .iter()
        .map(|s| model.classify(&s.text).language.unwrap_or_default())
        .collect();
    ConfusionMatrix::from_predictions(model.labels(), &dataset.labels(), &predicted)
}

/// 층화 분할 → 학습 → 평가
pub fn train_and_evaluate(
    dataset: &Dataset,
    config: &LangIdConfig,
) -> Result<(TrainedModel, EvaluationReport)> {
    if dataset.is_empty() {
        return Err(LangIdError::Dataset("샘플이 없습니다".into()));
    }

    let (train, test) = dataset.stratified_split(config.test_size, config.training.seed)?;
    log::info!(
        "학습 {}개 / 평가 {}개 샘플, 언어 {}개",
        train.len(),
        test.len(),
        dataset.language_counts().len()
    );

    let model = TrainedModel::fit(
        &train.texts(),
        &train.labels(),
        config.model_kind,
        config.vectorizer.clone(),
        config.training.clone(),
    )?;

    let confusion = evaluate(&model, &test);
    let report = EvaluationReport {
        train_size: train.len(),
        test_size: test.len(),
        accuracy: accuracy(&confusion),
        per_class: per_class_report(&confusion, model.labels()),
        confusion,
    };

    if test.is_empty() {
        log::warn!("평가 세트가 비어 있어 정확도를 계산하지 않았습니다");
    } else {
        log::info!("평가 정확도: {:.4}", report.accuracy);
    }
    Ok((model, report))
}
