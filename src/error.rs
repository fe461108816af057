//! 에러 타입 정의

use std::path::PathBuf;

use thiserror::Error;

/// 언어 감지 라이브러리 에러
///
/// 빈 입력은 에러가 아니라 `ClassificationResult::empty()`로 처리됩니다.
#[derive(Debug, Error)]
pub enum LangIdError {
    /// 모델 파일 없음 (치명적, 재시도 없음)
    #[error("모델 파일을 찾을 수 없습니다: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// 모델 파일은 있으나 손상되었거나 형식이 맞지 않음
    #[error("모델 로드 실패 ({}): {reason}", .path.display())]
    ModelLoad { path: PathBuf, reason: String },

    /// 학습 전에 예측을 호출함
    #[error("학습되지 않은 모델입니다. fit()을 먼저 호출하세요")]
    UntrainedModel,

    /// 학습 입력 오류
    #[error("학습 오류: {0}")]
    Training(String),

    /// 데이터셋 형식 오류
    #[error("데이터셋 오류: {0}")]
    Dataset(String),

    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 오류: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV 오류: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, LangIdError>;
