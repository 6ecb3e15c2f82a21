use crate::domain::model::FieldError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Validation failed: {}", summarize_field_errors(.errors))]
    ValidationError { errors: Vec<FieldError> },

    #[error("Dispatch failed: {message}")]
    DispatchError { message: String },

    #[error("No {kind} found with slug '{slug}'")]
    NotFoundError { kind: &'static str, slug: String },

    #[error("Content error: {message}")]
    ContentError { message: String },

    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Dispatch,
    NotFound,
    Configuration,
    System,
}

impl ErrorCategory {
    /// 依錯誤類別決定 CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::Configuration | ErrorCategory::System => 1,
            ErrorCategory::Validation => 2,
            ErrorCategory::Dispatch => 3,
            ErrorCategory::NotFound => 4,
        }
    }
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::ValidationError { .. } => ErrorCategory::Validation,
            SiteError::DispatchError { .. } | SiteError::ApiError(_) => ErrorCategory::Dispatch,
            SiteError::NotFoundError { .. } => ErrorCategory::NotFound,
            SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::TomlError(_)
            | SiteError::ContentError { .. } => ErrorCategory::Configuration,
            SiteError::CsvError(_) | SiteError::IoError(_) | SiteError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// 給終端使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation => "Please check your form data and try again.".to_string(),
            ErrorCategory::Dispatch => "Something went wrong. Please try again later.".to_string(),
            ErrorCategory::NotFound => self.to_string(),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("Unexpected system error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Fix the highlighted fields and submit again",
            ErrorCategory::Dispatch => "The inquiry was valid; retry later or check the notifier settings",
            ErrorCategory::NotFound => "List the available entries to find a valid slug",
            ErrorCategory::Configuration => "Check the configuration file and content files",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    /// Field errors carried by a validation failure, empty for every other kind.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            SiteError::ValidationError { errors } => errors,
            _ => &[],
        }
    }
}

fn summarize_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, SiteError>;
