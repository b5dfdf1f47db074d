use thiserror::Error;

#[derive(Error, Debug)]
pub enum CovviewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unknown coverage format")]
    UnknownFormat,

    #[error("No coverage found for file: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, CovviewError>;
