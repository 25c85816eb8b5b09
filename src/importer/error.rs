// ==========================================
// Labstock - import error types
// ==========================================
// thiserror derive. Row-scoped variants carry no row number; the
// coordinator prefixes "Row <n>:" when it appends the message.
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// Import pipeline error type
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== File errors (request-fatal) =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    #[error("spreadsheet parse failed: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== Layout errors (request-fatal) =====
    #[error("no header row found within the first {scanned} rows")]
    HeaderNotFound { scanned: usize },

    #[error("no catalog rows survived validation")]
    NoValidRows { reasons: Vec<String> },

    // ===== Row-scoped errors =====
    #[error("missing item name")]
    MissingName,

    #[error("item name too short: {name:?}")]
    NameTooShort { name: String },

    #[error("section heading, not a catalog row: {name:?}")]
    SectionHeading { name: String },

    #[error("unknown supplier: {name:?}")]
    UnknownSupplier { name: String },

    // ===== Configuration =====
    #[error("config read failed (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    // ===== Persistence =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    // ===== Generic =====
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<rusqlite::Error> for ImportError {
    fn from(err: rusqlite::Error) -> Self {
        ImportError::DatabaseQueryError(err.to_string())
    }
}

/// Result type alias
pub type ImportResult<T> = Result<T, ImportError>;
