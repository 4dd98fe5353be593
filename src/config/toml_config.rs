use crate::core::ConfigProvider;
use crate::domain::model::MalformedPolicy;
use crate::utils::error::{FixError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub source: SourceConfig,
    pub transform: TransformConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
    pub environment: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TransformConfig {
    pub scale: Option<f64>,
    pub marker: Option<String>,
    pub on_malformed: Option<MalformedPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub report_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub system_stats: Option<bool>,
}

impl TomlConfig {
    /// Load a job configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FixError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse a job configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FixError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitute `${VAR_NAME}` references from the environment. Unset
    /// variables are left verbatim so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_file_extension("source.path", &self.source.path, &["svg", "xml", "txt"])?;

        validation::validate_path("load.output_path", &self.load.output_path)?;

        if let Some(scale) = self.transform.scale {
            validation::validate_scale("transform.scale", scale)?;
        }

        if let Some(marker) = &self.transform.marker {
            validation::validate_non_empty_string("transform.marker", marker)?;
        }

        if let Some(report_path) = &self.load.report_path {
            validation::validate_path("load.report_path", report_path)?;
        }

        Ok(())
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale.unwrap_or(500.0)
    }

    pub fn marker(&self) -> &str {
        self.transform.marker.as_deref().unwrap_or("rect")
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn scale(&self) -> f64 {
        self.scale()
    }

    fn marker(&self) -> &str {
        self.marker()
    }

    fn on_malformed(&self) -> MalformedPolicy {
        self.transform.on_malformed.unwrap_or_default()
    }

    fn report_path(&self) -> Option<&str> {
        self.load.report_path.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[job]
name = "fix-test1"
description = "Scale rect coordinates in test1.svg"
version = "1.0.0"

[source]
path = "test1.svg"

[transform]
scale = 600.0
on_malformed = "skip"

[load]
output_path = "fixed.svg"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.job.name, "fix-test1");
        assert_eq!(config.source.path, "test1.svg");
        assert_eq!(config.scale(), 600.0);
        assert_eq!(config.marker(), "rect");
        assert_eq!(
            ConfigProvider::on_malformed(&config),
            MalformedPolicy::Skip
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_transform_section_is_sparse() {
        let toml_content = r#"
[job]
name = "defaults"
description = "defaults"
version = "1.0"

[source]
path = "drawing.svg"

[transform]

[load]
output_path = "-"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.scale(), 500.0);
        assert_eq!(config.marker(), "rect");
        assert_eq!(
            ConfigProvider::on_malformed(&config),
            MalformedPolicy::Abort
        );
        assert!(config.report_path().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RECTFIX_TEST_INPUT", "env-input.svg");

        let toml_content = r#"
[job]
name = "env"
description = "env"
version = "1.0"

[source]
path = "${RECTFIX_TEST_INPUT}"

[transform]

[load]
output_path = "-"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.path, "env-input.svg");

        std::env::remove_var("RECTFIX_TEST_INPUT");
    }

    #[test]
    fn test_config_validation_rejects_bad_scale() {
        let toml_content = r#"
[job]
name = "bad"
description = "bad"
version = "1.0"

[source]
path = "test1.svg"

[transform]
scale = -3.0

[load]
output_path = "-"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_bad_extension() {
        let toml_content = r#"
[job]
name = "bad-ext"
description = "bad-ext"
version = "1.0"

[source]
path = "input.csv"

[transform]

[load]
output_path = "-"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[job]
name = "file-test"
description = "File test"
version = "1.0"

[source]
path = "test1.svg"

[transform]

[load]
output_path = "fixed.svg"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.job.name, "file-test");
    }
}
