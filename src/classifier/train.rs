//! 분류기 학습
//!
//! 일괄(batch) 학습만 지원합니다. 같은 입력과 시드에서는 항상 같은 파라미터가 나옵니다.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::labels::LabelSet;
use super::linear::{softmax, LinearModel};
use crate::error::{LangIdError, Result};
use crate::features::FeatureVector;

/// 분류기 학습 옵션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainOptions {
    /// 로지스틱 회귀 에폭 수
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    /// 학습률
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// L2 정규화 계수
    #[serde(default = "default_l2")]
    pub l2: f64,
    /// 미니배치 크기
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// 셔플 시드
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// 나이브 베이즈 가산 스무딩 상수
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_epochs() -> usize {
    300
}

fn default_learning_rate() -> f64 {
    1.0
}

fn default_l2() -> f64 {
    1e-4
}

fn default_batch_size() -> usize {
    64
}

fn default_seed() -> u64 {
    42
}

fn default_alpha() -> f64 {
    0.1
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            learning_rate: default_learning_rate(),
            l2: default_l2(),
            batch_size: default_batch_size(),
            seed: default_seed(),
            alpha: default_alpha(),
        }
    }
}

/// 학습 입력 검증 후 레이블 인덱스 반환
fn encode_targets<S: AsRef<str>>(
    features: &[FeatureVector],
    labels: &[S],
) -> Result<(LabelSet, Vec<usize>, usize)> {
    if features.is_empty() {
        return Err(LangIdError::Training("빈 학습 데이터".into()));
    }
    if features.len() != labels.len() {
        return Err(LangIdError::Training(format!(
            "특징/레이블 개수 불일치: {} != {}",
            features.len(),
            labels.len()
        )));
    }

    let dim = features[0].dim();
    if dim == 0 {
        return Err(LangIdError::Training("특징 차원이 0입니다".into()));
    }
    if let Some(bad) = features.iter().find(|f| f.dim() != dim) {
        return Err(LangIdError::Training(format!(
            "특징 차원 불일치: {} (expected {})",
            bad.dim(),
            dim
        )));
    }

    let label_set = LabelSet::from_labels(labels.iter());
    if label_set.len() < 2 {
        return Err(LangIdError::Training(format!(
            "최소 2개 언어가 필요합니다 (현재 {}개)",
            label_set.len()
        )));
    }

    let mut targets = Vec::with_capacity(labels.len());
    for label in labels {
        let label: &str = label.as_ref();
        let idx = label_set
            .index_of(label)
            .ok_or_else(|| LangIdError::Training(format!("빈 레이블: {:?}", label)))?;
        targets.push(idx);
    }

    Ok((label_set, targets, dim))
}

/// 다항 로지스틱 회귀 학습 (미니배치 경사하강 + L2)
pub fn train_logistic<S: AsRef<str>>(
    features: &[FeatureVector],
    labels: &[S],
    options: &TrainOptions,
) -> Result<LinearModel> {
    let (label_set, targets, dim) = encode_targets(features, labels)?;
    let classes = label_set.len();
    let mut model = LinearModel::zeros(label_set, dim);

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut order: Vec<usize> = (0..features.len()).collect();
    let batch_size = options.batch_size.max(1);
    let lr = options.learning_rate;
    let l2 = options.l2.max(0.0);

    for epoch in 0..options.epochs {
        order.shuffle(&mut rng);
        let mut epoch_loss = 0.0;

        for chunk in order.chunks(batch_size) {
            let mut grad_w = vec![0.0; model.weights.len()];
            let mut grad_b = vec![0.0; classes];

            for &i in chunk {
                let x = &features[i];
                let y = targets[i];
                let probs = softmax(&model.scores(x));
                epoch_loss -= probs[y].max(f64::MIN_POSITIVE).ln();

                for (c, &p) in probs.iter().enumerate() {
                    let diff = p - if c == y { 1.0 } else { 0.0 };
                    let base = c * dim;
                    for &(idx, v) in x.entries() {
                        grad_w[base + idx] += diff * v;
                    }
                    grad_b[c] += diff;
                }
            }

            let inv = 1.0 / chunk.len() as f64;
            for (w, g) in model.weights.iter_mut().zip(&grad_w) {
                *w -= lr * (g * inv + l2 * *w);
            }
            for (b, g) in model.bias.iter_mut().zip(&grad_b) {
                *b -= lr * g * inv;
            }
        }

        if epoch % 50 == 0 || epoch + 1 == options.epochs {
            log::debug!(
                "epoch {}/{}: 평균 손실 {:.6}",
                epoch + 1,
                options.epochs,
                epoch_loss / features.len() as f64
            );
        }
    }

    model.validate().map_err(LangIdError::Training)?;
    Ok(model)
}

/// 다항 나이브 베이즈 학습
///
/// `weights = ln θ(c, f)`, `bias = ln P(c)`로 선형 모델에 담습니다.
pub fn train_naive_bayes<S: AsRef<str>>(
    features: &[FeatureVector],
    labels: &[S],
    options: &TrainOptions,
) -> Result<LinearModel> {
    let (label_set, targets, dim) = encode_targets(features, labels)?;
    let classes = label_set.len();
    let alpha = if options.alpha > 0.0 { options.alpha } else { 1e-10 };

    let mut feature_count = vec![0.0; classes * dim];
    let mut class_count = vec![0.0; classes];
    for (x, &y) in features.iter().zip(&targets) {
        class_count[y] += 1.0;
        for &(idx, v) in x.entries() {
            feature_count[y * dim + idx] += v;
        }
    }

    let mut model = LinearModel::zeros(label_set, dim);
    let n = features.len() as f64;
    for c in 0..classes {
        let row = &feature_count[c * dim..(c + 1) * dim];
        let denom = row.iter().sum::<f64>() + alpha * dim as f64;
        for (w, &count) in model.weights[c * dim..(c + 1) * dim].iter_mut().zip(row) {
            *w = ((count + alpha) / denom).ln();
        }
        model.bias[c] = (class_count[c] / n).ln();
    }

    model.validate().map_err(LangIdError::Training)?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 특징 0,1은 "x" 언어, 2,3은 "y" 언어
    fn toy_data() -> (Vec<FeatureVector>, Vec<&'static str>) {
        let features = vec![
            FeatureVector::from_pairs(4, vec![(0, 0.8), (1, 0.6)]),
            FeatureVector::from_pairs(4, vec![(0, 1.0)]),
            FeatureVector::from_pairs(4, vec![(1, 1.0)]),
            FeatureVector::from_pairs(4, vec![(2, 0.6), (3, 0.8)]),
            FeatureVector::from_pairs(4, vec![(3, 1.0)]),
            FeatureVector::from_pairs(4, vec![(2, 1.0)]),
        ];
        (features, vec!["x", "x", "x", "y", "y", "y"])
    }

    #[test]
    fn test_logistic_separates_toy_data() {
        let (features, labels) = toy_data();
        let model = train_logistic(&features, &labels, &TrainOptions::default()).unwrap();

        for (x, label) in features.iter().zip(&labels) {
            let result = model.predict(x);
            assert_eq!(result.language.as_deref(), Some(*label));
            assert!(result.confidence > 0.8);
        }
    }

    #[test]
    fn test_logistic_is_deterministic() {
        let (features, labels) = toy_data();
        let options = TrainOptions {
            batch_size: 2,
            epochs: 20,
            ..TrainOptions::default()
        };
        let a = train_logistic(&features, &labels, &options).unwrap();
        let b = train_logistic(&features, &labels, &options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_naive_bayes_separates_toy_data() {
        let (features, labels) = toy_data();
        let model = train_naive_bayes(&features, &labels, &TrainOptions::default()).unwrap();

        let probe = FeatureVector::from_pairs(4, vec![(0, 0.7), (1, 0.7)]);
        assert_eq!(model.predict(&probe).language.as_deref(), Some("x"));
        let probe = FeatureVector::from_pairs(4, vec![(3, 1.0)]);
        assert_eq!(model.predict(&probe).language.as_deref(), Some("y"));
        // 사전 확률이 같으므로 bias도 같다
        assert!((model.bias[0] - model.bias[1]).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        let (features, labels) = toy_data();
        let options = TrainOptions::default();

        let empty: Vec<&str> = Vec::new();
        assert!(train_logistic(&[], &empty, &options).is_err());
        assert!(train_logistic(&features, &labels[..3], &options).is_err());

        let single = vec!["x"; features.len()];
        assert!(train_naive_bayes(&features, &single, &options).is_err());

        let mut mixed = features.clone();
        mixed[0] = FeatureVector::zeros(7);
        assert!(train_logistic(&mixed, &labels, &options).is_err());
    }

    #[test]
    fn test_options_backward_compat() {
        let options: TrainOptions = serde_json::from_str(r#"{"epochs": 10}"#).unwrap();
        assert_eq!(options.epochs, 10);
        assert_eq!(options.seed, 42);
        assert!((options.alpha - 0.1).abs() < f64::EPSILON);
    }
}
