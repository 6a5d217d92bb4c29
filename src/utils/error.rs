use thiserror::Error;

/// 單一欄位的驗證錯誤
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field}: missing required field")]
    Missing { field: String },

    #[error("{field}: expected {expected}")]
    WrongType { field: String, expected: String },

    #[error("{field}: '{value}' does not match {pattern}")]
    PatternMismatch {
        field: String,
        value: String,
        pattern: String,
    },

    #[error("{field}: '{value}' is not a valid YYYY-MM-DD date")]
    InvalidDate { field: String, value: String },

    #[error("{field}: '{value}' is not a valid HH:MM time")]
    InvalidTime { field: String, value: String },

    #[error("{field}: must contain at least one item")]
    EmptyItems { field: String },
}

impl FieldError {
    pub fn field(&self) -> &str {
        match self {
            FieldError::Missing { field }
            | FieldError::WrongType { field, .. }
            | FieldError::PatternMismatch { field, .. }
            | FieldError::InvalidDate { field, .. }
            | FieldError::InvalidTime { field, .. }
            | FieldError::EmptyItems { field } => field,
        }
    }
}

/// 收據驗證失敗，列出所有違規欄位
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("receipt failed validation: {}", join_field_errors(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(FieldError::field).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }
}

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("Malformed receipt payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("No receipt stored under id '{id}'")]
    NotFound { id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidInput,
    NotFound,
    Configuration,
    System,
}

impl ReceiptError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReceiptError::Malformed(_) | ReceiptError::Invalid(_) => ErrorCategory::InvalidInput,
            ReceiptError::NotFound { .. } => ErrorCategory::NotFound,
            ReceiptError::ConfigError { .. } | ReceiptError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ReceiptError::IoError(_) => ErrorCategory::System,
        }
    }

    /// 給呼叫端看的訊息，不洩漏欄位細節
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::InvalidInput => "The receipt is invalid.".to_string(),
            ErrorCategory::NotFound => "No receipt found for that ID.".to_string(),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => "Internal Server Error.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
