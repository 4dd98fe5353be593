use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Line {line}: missing attribute '{attribute}'")]
    MissingAttribute { line: usize, attribute: String },

    #[error("Line {line}: attribute '{attribute}' is not a number: '{value}'")]
    InvalidNumber {
        line: usize,
        attribute: String,
        value: String,
    },

    #[error("Line {line}: expected text '{marker}' not found")]
    MissingMarker { line: usize, marker: String },

    #[error("Input is not valid UTF-8: {message}")]
    DecodeError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Config,
    Transform,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FixError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FixError::IoError(_) | FixError::DecodeError { .. } => ErrorCategory::Io,
            FixError::ConfigError { .. }
            | FixError::InvalidConfigValueError { .. }
            | FixError::MissingConfigError { .. }
            | FixError::ConfigValidationError { .. } => ErrorCategory::Config,
            FixError::MissingAttribute { .. }
            | FixError::InvalidNumber { .. }
            | FixError::MissingMarker { .. } => ErrorCategory::Transform,
            FixError::SerializationError(_) => ErrorCategory::Serialization,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::Transform => ErrorSeverity::High,
            ErrorCategory::Serialization => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FixError::IoError(_) => {
                "Check that the input file exists and the output location is writable".to_string()
            }
            FixError::DecodeError { .. } => {
                "The input file must be UTF-8 encoded text".to_string()
            }
            FixError::ConfigError { .. }
            | FixError::InvalidConfigValueError { .. }
            | FixError::MissingConfigError { .. }
            | FixError::ConfigValidationError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            FixError::MissingAttribute { attribute, .. } => format!(
                "Add the {}=\"...\" attribute to the line, or rerun with --on-malformed skip",
                attribute
            ),
            FixError::InvalidNumber { attribute, .. } => format!(
                "The {} attribute must hold a decimal number, or rerun with --on-malformed skip",
                attribute
            ),
            FixError::MissingMarker { marker, .. } => format!(
                "The line needs a literal '{}', or rerun with --on-malformed skip",
                marker
            ),
            FixError::SerializationError(_) => {
                "Report serialization failed; rerun without --report to skip it".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::Transform => format!("Malformed rect line: {}", self),
            ErrorCategory::Serialization => format!("Report output failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, FixError>;
