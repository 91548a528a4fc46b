use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Empty row at line {line}: no word in column 0")]
    EmptyRow { line: u64 },

    #[error("Failed to decode input as {encoding}: {message}")]
    DecodeError { encoding: String, message: String },

    #[error("Tagging failed for '{text}': {message}")]
    TaggingError { text: String, message: String },

    #[error("Lemmatization failed for '{text}': {message}")]
    LemmatizationError { text: String, message: String },

    #[error("Sentiment scoring failed for '{text}': {message}")]
    ScoringError { text: String, message: String },

    #[error("Could not extract output fields: {message}")]
    ExtractionError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Annotation,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnnotateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnnotateError::ConfigError { .. }
            | AnnotateError::MissingConfigError { .. }
            | AnnotateError::InvalidConfigValueError { .. }
            | AnnotateError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AnnotateError::CsvError(_)
            | AnnotateError::EmptyRow { .. }
            | AnnotateError::DecodeError { .. } => ErrorCategory::Input,
            AnnotateError::TaggingError { .. }
            | AnnotateError::LemmatizationError { .. }
            | AnnotateError::ScoringError { .. } => ErrorCategory::Annotation,
            AnnotateError::ExtractionError { .. } | AnnotateError::SerializationError(_) => {
                ErrorCategory::Output
            }
            AnnotateError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單筆可略過的錯誤
            AnnotateError::ScoringError { .. } | AnnotateError::ExtractionError { .. } => {
                ErrorSeverity::Low
            }
            AnnotateError::ConfigError { .. }
            | AnnotateError::MissingConfigError { .. }
            | AnnotateError::InvalidConfigValueError { .. }
            | AnnotateError::ConfigValidationError { .. } => ErrorSeverity::Medium,
            AnnotateError::CsvError(_)
            | AnnotateError::EmptyRow { .. }
            | AnnotateError::DecodeError { .. }
            | AnnotateError::TaggingError { .. }
            | AnnotateError::LemmatizationError { .. }
            | AnnotateError::SerializationError(_) => ErrorSeverity::High,
            AnnotateError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Whether a pipeline stage may drop the offending item and keep going.
    pub fn is_recoverable(&self) -> bool {
        self.severity() == ErrorSeverity::Low
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AnnotateError::EmptyRow { .. } => {
                "Remove blank lines from the input file; every row needs a word in the first column"
            }
            AnnotateError::DecodeError { .. } => {
                "Check the input encoding; use --encoding latin1 for legacy files"
            }
            AnnotateError::CsvError(_) => "Make sure the input file is valid CSV",
            AnnotateError::IoError(_) => {
                "Check that the input file exists and the output directory is writable"
            }
            AnnotateError::ConfigError { .. }
            | AnnotateError::MissingConfigError { .. }
            | AnnotateError::InvalidConfigValueError { .. }
            | AnnotateError::ConfigValidationError { .. } => {
                "Review the configuration values and try again"
            }
            AnnotateError::TaggingError { .. } | AnnotateError::LemmatizationError { .. } => {
                "Inspect the reported word; the annotation backend could not process it"
            }
            AnnotateError::ScoringError { .. } | AnnotateError::ExtractionError { .. } => {
                "The item was skipped; see the run report for details"
            }
            AnnotateError::SerializationError(_) => "Disable the run report or free disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AnnotateError::EmptyRow { line } => {
                format!("Input line {} is empty, aborting before any output was written", line)
            }
            AnnotateError::IoError(e) => format!("File operation failed: {}", e),
            AnnotateError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    /// Process exit code used by the binaries; never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnnotateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_errors_are_recoverable() {
        let err = AnnotateError::ScoringError {
            text: "x".to_string(),
            message: "boom".to_string(),
        };
        assert!(err.is_recoverable());
        assert_eq!(err.category(), ErrorCategory::Annotation);
    }

    #[test]
    fn test_fatal_errors_map_to_nonzero_exit() {
        let err = AnnotateError::EmptyRow { line: 3 };
        assert!(!err.is_recoverable());
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("line 3"));

        let io = AnnotateError::from(std::io::Error::other("disk"));
        assert_eq!(io.exit_code(), 3);

        // 低嚴重度的錯誤若中止執行，仍必須以非零結束
        let scoring = AnnotateError::ScoringError {
            text: "happy".to_string(),
            message: "lexicon missing".to_string(),
        };
        assert!(scoring.is_recoverable());
        assert_eq!(scoring.exit_code(), 1);
    }
}
