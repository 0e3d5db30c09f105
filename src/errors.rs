// errors.rs
use thiserror::Error;

/// Errors from storage, export and configuration. Fetch errors have their
/// own `ScraperError`; the pipeline itself never fails.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    UnsupportedMarket(String),
    #[error("Prompt error: {0}")]
    Prompt(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Spreadsheet error: {0}")]
    XlsxError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
