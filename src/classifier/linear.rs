//! 선형 점수 + 소프트맥스 분류 모델
//!
//! 로지스틱 회귀와 나이브 베이즈 모두 `W·x + b` 형태의 점수로 표현되므로
//! 같은 예측 경로를 공유합니다.

use serde::{Deserialize, Serialize};

use super::labels::LabelSet;
use super::result::ClassificationResult;
use crate::features::FeatureVector;

/// 수치적으로 안정된 소프트맥스
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    if logits.is_empty() {
        return Vec::new();
    }
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&z| (z - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// 가장 큰 값의 인덱스 (동점이면 앞쪽)
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &v) in values.iter().enumerate() {
        match best {
            Some((_, best_val)) if v <= best_val => {}
            _ => best = Some((idx, v)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// 학습된 선형 분류기 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub labels: LabelSet,
    pub n_features: usize,
    /// 레이블별 가중치 (행 우선, `labels.len() × n_features`)
    pub weights: Vec<f64>,
    pub bias: Vec<f64>,
}

impl LinearModel {
    /// 모든 파라미터가 0인 모델
    pub fn zeros(labels: LabelSet, n_features: usize) -> Self {
        let k = labels.len();
        Self {
            labels,
            n_features,
            weights: vec![0.0; k * n_features],
            bias: vec![0.0; k],
        }
    }

    /// 차원과 값 검증
    pub fn validate(&self) -> Result<(), String> {
        let k = self.labels.len();
        if k == 0 {
            return Err("레이블이 없습니다".into());
        }
        if self.weights.len() != k * self.n_features {
            return Err(format!(
                "weights 길이 불일치: {} (expected {} × {})",
                self.weights.len(),
                k,
                self.n_features
            ));
        }
        if self.bias.len() != k {
            return Err(format!("bias 길이 불일치: {} (expected {})", self.bias.len(), k));
        }
        if self.weights.iter().chain(&self.bias).any(|v| !v.is_finite()) {
            return Err("유한하지 않은 파라미터가 있습니다".into());
        }
        Ok(())
    }

    /// 레이블별 선형 점수
    ///
    /// 가중치 행이 모자란 레이블은 bias만 반영됩니다. `validate`를 통과한 모델에서는 생기지 않습니다.
    pub fn scores(&self, features: &FeatureVector) -> Vec<f64> {
        let mut scores = self.bias.clone();
        for (c, score) in scores.iter_mut().enumerate() {
            let Some(row) = self
                .weights
                .get(c * self.n_features..(c + 1) * self.n_features)
            else {
                continue;
            };
            for &(idx, x) in features.entries() {
                if let Some(w) = row.get(idx) {
                    *score += w * x;
                }
            }
        }
        scores
    }

    /// 레이블 순서의 확률 분포
    pub fn predict_proba(&self, features: &FeatureVector) -> Vec<f64> {
        softmax(&self.scores(features))
    }

    /// 분류 결과 (확률 분포 포함)
    pub fn predict(&self, features: &FeatureVector) -> ClassificationResult {
        let proba = self.predict_proba(features);
        let Some(best) = argmax(&proba) else {
            return ClassificationResult::empty();
        };

        ClassificationResult {
            language: self.labels.get(best).map(str::to_string),
            confidence: proba[best],
            distribution: Some(
                self.labels
                    .iter()
                    .map(str::to_string)
                    .zip(proba.iter().copied())
                    .collect(),
            ),
        }
    }
}
