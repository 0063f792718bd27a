use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("URL error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("Unexpected shape: {field} is not {expected}")]
    UnexpectedShapeError { field: String, expected: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing column '{column}' in record")]
    MissingColumnError { column: String },

    #[error("Column '{column}' is not a number: {value:?}")]
    InvalidNumberError { column: String, value: String },

    #[error("Column '{column}' should be {expected}, got {value}")]
    TypeMismatchError {
        column: String,
        expected: String,
        value: String,
    },

    #[error("Shape '{shape_id}' has a non-numeric shape_pt_sequence: {value:?}")]
    InvalidSequenceError { shape_id: String, value: String },

    #[error("Invalid {tag} payload: {value}")]
    InvalidWireValueError { tag: String, value: String },

    #[error("Archive has no '{name}' entry")]
    MissingArchiveEntryError { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    InputFormat,
    ResponseShape,
    Configuration,
    System,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::TransportError(_) | EtlError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            EtlError::UnexpectedShapeError { .. } | EtlError::InvalidWireValueError { .. } => {
                ErrorCategory::ResponseShape
            }
            EtlError::CsvError(_)
            | EtlError::ZipError(_)
            | EtlError::MissingColumnError { .. }
            | EtlError::InvalidNumberError { .. }
            | EtlError::TypeMismatchError { .. }
            | EtlError::InvalidSequenceError { .. }
            | EtlError::MissingArchiveEntryError { .. } => ErrorCategory::InputFormat,
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// 行程結束碼：回應結構錯誤為 2，其餘皆為 1
    pub fn exit_code(&self) -> i32 {
        match self {
            EtlError::UnexpectedShapeError { .. } => 2,
            _ => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::HttpStatusError { status, body } => {
                format!("HTTP {}: {}", status, truncate_chars(body, 300))
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network access and that the document URL exists",
            ErrorCategory::ResponseShape => "Inspect the remote document; its layout has changed",
            ErrorCategory::InputFormat => "Check the input file columns and numeric values",
            ErrorCategory::Configuration => "Fix the configuration value and rerun",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
