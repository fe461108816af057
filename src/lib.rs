pub mod classifier;
pub mod config;
pub mod detection;
pub mod error;
pub mod features;
pub mod model;
pub mod text;
pub mod training;

pub use classifier::{ClassificationResult, ModelKind};
pub use detection::{evaluate_against_labels, parse_labeled_sections, LanguageDetector};
pub use error::{LangIdError, Result};
pub use model::{load_model, save_model, TrainedModel};
pub use text::{compute_stats, TextStats};
