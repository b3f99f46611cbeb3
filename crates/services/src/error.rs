//! Shared error types for the services crate.

use thiserror::Error;

use interview_core::engine::EngineError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while reading a resume.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IntakeError {
    #[error("unsupported resume format: .{extension} (plain text only)")]
    UnsupportedFormat { extension: String },
    #[error("resume is not valid UTF-8 text")]
    NotText,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// Errors emitted while loading a question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank is empty")]
    Empty,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted by `AssessmentService` and the session driver.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkflowError {
    #[error("an email address is required to take the assessment")]
    MissingEmail,
    #[error("session driver stopped before the assessment finished")]
    DriverStopped,
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResultService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Bank(#[from] BankError),
}
