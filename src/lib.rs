pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig};

pub use crate::core::{engine::FixEngine, pipeline::RectFixPipeline};
pub use crate::utils::error::{FixError, Result};
