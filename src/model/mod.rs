//! 학습된 모델 (벡터라이저 + 분류기 + 레이블)
//!
//! 시작할 때 한 번 로드되고 프로세스가 끝날 때까지 바뀌지 않습니다.
//! 내부 가변성이 없으므로 여러 스레드에서 잠금 없이 공유할 수 있습니다.

mod store;

use serde::{Deserialize, Serialize};

use crate::classifier::{
    ClassificationResult, LabelSet, LanguageClassifier, LinearModel, ModelKind, TrainOptions,
};
use crate::error::{LangIdError, Result};
use crate::features::{FeatureVector, TfidfVectorizer, VectorizerConfig};

pub use store::{from_json, load_model, save_model, to_json};

/// 현재 모델 파일 형식 버전
pub const FORMAT_VERSION: u32 = 1;

/// 직렬화 형식
#[derive(Serialize, Deserialize)]
struct ModelState {
    format_version: u32,
    kind: ModelKind,
    vectorizer: TfidfVectorizer,
    classifier: LinearModel,
}

/// 학습된 언어 감지 모델
///
/// 역직렬화도 `validate`를 거치므로 검증되지 않은 모델은 만들어지지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ModelState", into = "ModelState")]
pub struct TrainedModel {
    format_version: u32,
    kind: ModelKind,
    vectorizer: TfidfVectorizer,
    classifier: LinearModel,
}

impl TryFrom<ModelState> for TrainedModel {
    type Error = String;

    fn try_from(state: ModelState) -> std::result::Result<Self, Self::Error> {
        let model = Self {
            format_version: state.format_version,
            kind: state.kind,
            vectorizer: state.vectorizer,
            classifier: state.classifier,
        };
        model.validate()?;
        Ok(model)
    }
}

impl From<TrainedModel> for ModelState {
    fn from(model: TrainedModel) -> Self {
        Self {
            format_version: model.format_version,
            kind: model.kind,
            vectorizer: model.vectorizer,
            classifier: model.classifier,
        }
    }
}

impl TrainedModel {
    /// 학습된 구성요소로 모델 생성 (차원 검증 포함)
    pub fn from_parts(
        kind: ModelKind,
        vectorizer: TfidfVectorizer,
        classifier: LinearModel,
    ) -> Result<Self> {
        let model = Self {
            format_version: FORMAT_VERSION,
            kind,
            vectorizer,
            classifier,
        };
        model.validate().map_err(LangIdError::Training)?;
        Ok(model)
    }

    /// 코퍼스와 레이블로 벡터라이저와 분류기를 학습
    pub fn fit<S: AsRef<str>, L: AsRef<str>>(
        corpus: &[S],
        labels: &[L],
        kind: ModelKind,
        vectorizer_config: VectorizerConfig,
        options: TrainOptions,
    ) -> Result<Self> {
        if corpus.len() != labels.len() {
            return Err(LangIdError::Training(format!(
                "텍스트/레이블 개수 불일치: {} != {}",
                corpus.len(),
                labels.len()
            )));
        }

        let mut vectorizer = TfidfVectorizer::new(vectorizer_config);
        let features = vectorizer.fit_transform(corpus)?;

        let mut classifier = LanguageClassifier::with_options(kind, options);
        classifier.fit(&features, labels)?;
        let linear = classifier.into_model().ok_or(LangIdError::UntrainedModel)?;

        Self::from_parts(kind, vectorizer, linear)
    }

    /// 구조 검증
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.format_version != FORMAT_VERSION {
            return Err(format!(
                "지원하지 않는 모델 형식 버전: {} (expected {})",
                self.format_version, FORMAT_VERSION
            ));
        }
        if self.vectorizer.vocabulary_size() == 0 {
            return Err("어휘가 비어 있습니다".into());
        }
        self.classifier.validate()?;
        if self.classifier.n_features != self.vectorizer.vocabulary_size() {
            return Err(format!(
                "분류기 특징 수({})와 어휘 크기({})가 다릅니다",
                self.classifier.n_features,
                self.vectorizer.vocabulary_size()
            ));
        }
        Ok(())
    }

    pub fn format_version(&self) -> u32 {
        self.format_version
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &LinearModel {
        &self.classifier
    }

    /// 지원 언어
    pub fn labels(&self) -> &LabelSet {
        &self.classifier.labels
    }

    /// 특징 벡터 변환
    pub fn transform(&self, text: &str) -> FeatureVector {
        self.vectorizer.transform(text)
    }

    /// 텍스트 분류
    ///
    /// 빈 문자열이나 공백만 있는 텍스트는 분류기를 거치지 않고
    /// `ClassificationResult::empty()`를 반환합니다.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        if text.trim().is_empty() {
            return ClassificationResult::empty();
        }
        self.classifier.predict(&self.transform(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> (Vec<&'static str>, Vec<&'static str>) {
        (
            vec![
                "the cat sat on the mat",
                "the dog sat on the log",
                "здравствуй мир как дела",
                "мир труд май дела",
            ],
            vec!["English", "English", "Russian", "Russian"],
        )
    }

    #[test]
    fn test_fit_and_classify() {
        let (texts, labels) = corpus();
        let model = TrainedModel::fit(
            &texts,
            &labels,
            ModelKind::Logistic,
            VectorizerConfig::new().with_min_df(1),
            TrainOptions::default(),
        )
        .unwrap();

        assert_eq!(model.labels().as_slice(), &["English", "Russian"]);
        let result = model.classify("мир");
        assert_eq!(result.language.as_deref(), Some("Russian"));
        let result = model.classify("the mat");
        assert_eq!(result.language.as_deref(), Some("English"));
    }

    #[test]
    fn test_classify_empty_is_sentinel() {
        let (texts, labels) = corpus();
        let model = TrainedModel::fit(
            &texts,
            &labels,
            ModelKind::NaiveBayes,
            VectorizerConfig::new().with_min_df(1),
            TrainOptions::default(),
        )
        .unwrap();

        for text in ["", "   ", "\n\t"] {
            let result = model.classify(text);
            assert!(result.is_empty());
            assert_eq!(result.confidence, 0.0);
            assert!(result.distribution.is_none());
        }
    }

    #[test]
    fn test_fit_rejects_length_mismatch() {
        let (texts, _) = corpus();
        let err = TrainedModel::fit(
            &texts,
            &["English"],
            ModelKind::Logistic,
            VectorizerConfig::new(),
            TrainOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LangIdError::Training(_)));
    }

    #[test]
    fn test_from_parts_rejects_mismatched_vocabulary() {
        let (texts, _) = corpus();
        let mut vectorizer = TfidfVectorizer::new(VectorizerConfig::new().with_min_df(1));
        vectorizer.fit(&texts).unwrap();
        let linear = LinearModel::zeros(
            LabelSet::from_labels(["a", "b"]),
            vectorizer.vocabulary_size() + 1,
        );
        assert!(TrainedModel::from_parts(ModelKind::Logistic, vectorizer, linear).is_err());
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let (texts, labels) = corpus();
        let model = TrainedModel::fit(
            &texts,
            &labels,
            ModelKind::Logistic,
            VectorizerConfig::new().with_min_df(1),
            TrainOptions {
                epochs: 5,
                ..TrainOptions::default()
            },
        )
        .unwrap();
        assert_eq!(model.format_version(), FORMAT_VERSION);
        assert_eq!(model.kind(), ModelKind::Logistic);

        let value = serde_json::to_value(&model).unwrap();
        assert!(serde_json::from_value::<TrainedModel>(value.clone()).is_ok());

        let mut bad_version = value.clone();
        bad_version["format_version"] = 2.into();
        assert!(serde_json::from_value::<TrainedModel>(bad_version).is_err());

        let mut bad_bias = value;
        bad_bias["classifier"]["bias"] = serde_json::json!([0.0]);
        assert!(serde_json::from_value::<TrainedModel>(bad_bias).is_err());
    }
}
