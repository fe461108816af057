//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::classifier::{ModelKind, TrainOptions};
use crate::error::Result;
use crate::features::VectorizerConfig;

/// 설정 파일 경로를 덮어쓰는 환경 변수
pub const CONFIG_ENV: &str = "LANGID_CONFIG";

/// langid 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LangIdConfig {
    /// 모델 파일 경로
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// 학습할 분류기 종류
    #[serde(default)]
    pub model_kind: ModelKind,
    /// 평가용으로 떼어낼 비율 (0.0 ~ 1.0)
    #[serde(default = "default_test_size")]
    pub test_size: f64,
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
    #[serde(default)]
    pub training: TrainOptions,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models").join("language_detector.json")
}

fn default_test_size() -> f64 {
    0.2
}

impl Default for LangIdConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            model_kind: ModelKind::default(),
            test_size: default_test_size(),
            vectorizer: VectorizerConfig::default(),
            training: TrainOptions::default(),
        }
    }
}

/// 설정 파일 경로: $LANGID_CONFIG, 없으면 ~/.config/langid/config.json
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute() && p.is_dir())
        .unwrap_or_else(|| PathBuf::from("/var/tmp"));
    home.join(".config").join("langid").join("config.json")
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config() -> LangIdConfig {
    load_config_from(&config_path())
}

/// 지정 경로에서 설정 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config_from(path: &Path) -> LangIdConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파일 파싱 실패 ({}), 기본값 사용: {}", path.display(), e);
            LangIdConfig::default()
        }),
        Err(_) => LangIdConfig::default(),
    }
}

/// 설정 파일 저장
pub fn save_config(config: &LangIdConfig) -> Result<()> {
    save_config_to(config, &config_path())
}

/// 지정 경로에 설정 저장
pub fn save_config_to(config: &LangIdConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
