//! 분류 평가 지표

use serde::{Deserialize, Serialize};

use crate::classifier::LabelSet;

/// `K`개 언어의 혼동 행렬
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub n_classes: usize,
    /// 행 우선 `KxK` (`truth * K + predicted`)
    pub counts: Vec<u32>,
}

impl ConfusionMatrix {
    pub fn new(n_classes: usize) -> Self {
        Self {
            n_classes,
            counts: vec![0; n_classes * n_classes],
        }
    }

    /// 레이블 이름 쌍으로 행렬 생성. 레이블 집합에 없는 이름은 무시합니다.
    pub fn from_predictions<T, P>(labels: &LabelSet, truth: &[T], predicted: &[P]) -> Self
    where
        T: AsRef<str>,
        P: AsRef<str>,
    {
        let mut cm = Self::new(labels.len());
        for (t, p) in truth.iter().zip(predicted) {
            if let (Some(t), Some(p)) = (labels.index_of(t.as_ref()), labels.index_of(p.as_ref())) {
                cm.add(t, p);
            }
        }
        cm
    }

    pub fn add(&mut self, truth: usize, predicted: usize) {
        if truth >= self.n_classes || predicted >= self.n_classes {
            return;
        }
        let idx = truth * self.n_classes + predicted;
        self.counts[idx] = self.counts[idx].saturating_add(1);
    }

    pub fn get(&self, truth: usize, predicted: usize) -> u32 {
        self.counts[truth * self.n_classes + predicted]
    }

    /// 전체 샘플 수
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&v| v as u64).sum()
    }
}

/// 언어 하나의 평가 지표
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReport {
    pub language: String,
    /// `TP / (TP + FP)`
    pub precision: f64,
    /// `TP / (TP + FN)`
    pub recall: f64,
    pub f1: f64,
    /// 실제 샘플 수
    pub support: u32,
}

/// 정확도 (샘플이 없으면 0)
pub fn accuracy(cm: &ConfusionMatrix) -> f64 {
    let total = cm.total();
    if total == 0 {
        return 0.0;
    }
    let correct: u64 = (0..cm.n_classes).map(|i| cm.get(i, i) as u64).sum();
    correct as f64 / total as f64
}

/// 언어별 precision/recall/f1/support
pub fn per_class_report(cm: &ConfusionMatrix, labels: &LabelSet) -> Vec<ClassReport> {
    let k = cm.n_classes;
    let mut report = Vec::with_capacity(k);

    for (class_idx, language) in labels.iter().enumerate().take(k) {
        let tp = cm.get(class_idx, class_idx) as f64;
        let mut fp = 0.0;
        let mut fn_ = 0.0;
        let mut support = 0u32;
        for j in 0..k {
            let v = cm.get(class_idx, j);
            support = support.saturating_add(v);
            if j != class_idx {
                fn_ += v as f64;
                fp += cm.get(j, class_idx) as f64;
            }
        }

        let precision = if tp + fp == 0.0 { 0.0 } else { tp / (tp + fp) };
        let recall = if tp + fn_ == 0.0 { 0.0 } else { tp / (tp + fn_) };
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        report.push(ClassReport {
            language: language.to_string(),
            precision,
            recall,
            f1,
            support,
        });
    }

    report
}
