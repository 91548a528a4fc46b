pub mod config;
pub mod core;
pub mod domain;
pub mod nlp;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{storage::LocalStorage, toml_config::TomlConfig};

pub use core::{etl::AnnotationEngine, pipeline::AnnotationPipeline};
pub use domain::model::{InputEncoding, LemmaPos, RunSummary, Stage};
pub use nlp::NlpToolkit;
pub use utils::error::{AnnotateError, Result};
