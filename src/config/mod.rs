pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::MalformedPolicy;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_scale, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "rectfix")]
#[command(about = "Scales rect x/y coordinates in an SVG file and rewrites fill colors")]
pub struct CliConfig {
    /// SVG file to process
    pub input: String,

    /// Destination file, or '-' for standard output
    #[arg(long, default_value = "-")]
    pub output: String,

    /// Multiplier applied to the x and y attribute values
    #[arg(long, default_value_t = 500.0)]
    pub scale: f64,

    /// Substring that classifies a line as rectangle-like
    #[arg(long, default_value = "rect")]
    pub marker: String,

    /// What to do with a rect line missing an expected attribute
    #[arg(long, value_enum, default_value_t = MalformedPolicy::Abort)]
    pub on_malformed: MalformedPolicy,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[arg(long, help = "Log CPU/memory stats per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn marker(&self) -> &str {
        &self.marker
    }

    fn on_malformed(&self) -> MalformedPolicy {
        self.on_malformed
    }

    fn report_path(&self) -> Option<&str> {
        self.report.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output", &self.output)?;
        validate_scale("scale", self.scale)?;
        validate_non_empty_string("marker", &self.marker)?;
        if let Some(report) = &self.report {
            validate_path("report", report)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            input: "test1.svg".to_string(),
            output: "-".to_string(),
            scale: 500.0,
            marker: "rect".to_string(),
            on_malformed: MalformedPolicy::Abort,
            report: None,
            verbose: false,
            log_json: false,
            monitor: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut config = base_config();
        config.scale = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_marker_rejected() {
        let mut config = base_config();
        config.marker = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
