pub mod engine;
pub mod pipeline;
pub mod rewrite;

pub use crate::domain::model::{RunStats, SourceLine, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
