pub mod etl;
pub mod loader;
pub mod pipeline;
pub mod writer;

pub use crate::domain::model::{AnnotationSet, RunSummary, WordRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
