use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input is not valid UTF-8: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::ConfigValidationError { .. }
            | DashboardError::InvalidConfigValueError { .. }
            | DashboardError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DashboardError::CsvError(_) | DashboardError::EncodingError(_) => ErrorCategory::Input,
            DashboardError::HttpError(_) => ErrorCategory::Network,
            DashboardError::ZipError(_)
            | DashboardError::SerializationError(_)
            | DashboardError::Unsupported { .. } => ErrorCategory::Output,
            DashboardError::IoError(_) => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DashboardError::HttpError(_) => {
                "Check that the data URL is reachable and serves the CSV file"
            }
            DashboardError::CsvError(_) | DashboardError::EncodingError(_) => {
                "Make sure the data source is a UTF-8 CSV file with a header row"
            }
            DashboardError::IoError(_) => "Check that the path exists and is readable/writable",
            DashboardError::ZipError(_) => "Retry without --compress or free up disk space",
            DashboardError::SerializationError(_) => {
                "Report this as a bug; the report could not be serialized"
            }
            DashboardError::Unsupported { .. } => "Write output to a local directory instead",
            _ => "Review the configuration values and try again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => format!("Could not read stranding data: {}", self),
            ErrorCategory::Network => format!("Could not fetch stranding data: {}", self),
            ErrorCategory::Output => format!("Could not write dashboard report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = DashboardError::MissingConfigError {
            field: "source.location".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_encoding_error_is_input() {
        let err: DashboardError = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert_eq!(err.category(), ErrorCategory::Input);
    }
}
