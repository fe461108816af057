//! 모델 파일 저장/로드
//!
//! 모델은 JSON 파일 하나에 저장됩니다.
//!
//! # 파일 형식
//! ```json
//! {
//!   "format_version": 1,
//!   "kind": "logistic",
//!   "vectorizer": { "config": { ... }, "terms": [" a", "ab"], "idf": [1.2, 1.9] },
//!   "classifier": { "labels": ["English", "French"], "n_features": 2,
//!                   "weights": [0.1, -0.3, -0.1, 0.3], "bias": [0.0, 0.0] }
//! }
//! ```

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::TrainedModel;
use crate::error::{LangIdError, Result};

/// JSON 문자열로 직렬화
pub fn to_json(model: &TrainedModel) -> Result<String> {
    Ok(serde_json::to_string(model)?)
}

/// JSON 문자열에서 모델 로드
///
/// 파싱/검증 실패는 모두 `ModelLoad`
pub fn from_json(json_str: &str) -> Result<TrainedModel> {
    serde_json::from_str(json_str).map_err(|e| LangIdError::ModelLoad {
        path: PathBuf::from("<json>"),
        reason: e.to_string(),
    })
}

/// 모델 저장
///
/// 같은 디렉토리의 임시 파일에 쓴 뒤 이름을 바꾸므로
/// 중간에 실패해도 기존 파일이 깨지지 않습니다.
pub fn save_model(model: &TrainedModel, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        serde_json::to_writer(&mut writer, model)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;

    log::info!(
        "모델 저장 완료: {} (언어 {}개, 어휘 {}개)",
        path.display(),
        model.labels().len(),
        model.vectorizer().vocabulary_size()
    );
    Ok(())
}

/// 모델 로드
///
/// - 파일이 없으면 `ModelNotFound`
/// - 읽기/파싱/검증 실패는 `ModelLoad`
pub fn load_model(path: impl AsRef<Path>) -> Result<TrainedModel> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LangIdError::ModelNotFound(path.to_path_buf()));
    }

    let load_error = |reason: String| LangIdError::ModelLoad {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| load_error(e.to_string()))?;
    let reader = BufReader::new(file);
    // 역직렬화 과정에서 구조 검증까지 수행된다
    let model: TrainedModel =
        serde_json::from_reader(reader).map_err(|e| load_error(e.to_string()))?;

    log::info!(
        "모델 로드 완료: {} ({}, 지원 언어: {})",
        path.display(),
        model.kind(),
        model.labels().as_slice().join(", ")
    );
    Ok(model)
}
