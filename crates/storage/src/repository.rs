use async_trait::async_trait;
use chrono::{DateTime, Utc};
use interview_core::model::{Candidate, DetailedResult, ResultId, SessionReport};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A finished assessment, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResult {
    pub candidate: Candidate,
    pub score: u32,
    pub total: u32,
    pub attempted: u32,
    pub correct: u32,
    pub detailed: Vec<DetailedResult>,
    pub taken_at: DateTime<Utc>,
}

impl NewResult {
    #[must_use]
    pub fn from_report(report: SessionReport, taken_at: DateTime<Utc>) -> Self {
        Self {
            attempted: report.attempted(),
            correct: report.correct_count(),
            score: report.score,
            total: report.total,
            candidate: report.candidate,
            detailed: report.detailed,
            taken_at,
        }
    }
}

/// Persisted shape of an assessment result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: ResultId,
    pub candidate: Candidate,
    pub score: u32,
    pub total: u32,
    pub attempted: u32,
    pub correct: u32,
    pub detailed: Vec<DetailedResult>,
    pub taken_at: DateTime<Utc>,
}

impl ResultRecord {
    #[must_use]
    pub fn new(id: ResultId, result: NewResult) -> Self {
        Self {
            id,
            candidate: result.candidate,
            score: result.score,
            total: result.total,
            attempted: result.attempted,
            correct: result.correct,
            detailed: result.detailed,
            taken_at: result.taken_at,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.candidate.name.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn email(&self) -> &str {
        self.candidate.email.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        self.candidate.phone.as_deref().unwrap_or_default()
    }

    /// Case- and whitespace-insensitive email match.
    #[must_use]
    pub fn matches_email(&self, email: &str) -> bool {
        let wanted = email.trim().to_lowercase();
        !wanted.is_empty() && self.email().trim().to_lowercase() == wanted
    }
}

/// Repository contract for assessment results.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Store a finished assessment and return its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn append_result(&self, result: &NewResult) -> Result<ResultId, StorageError>;

    /// Fetch a result by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_result(&self, id: ResultId) -> Result<ResultRecord, StorageError>;

    /// All results in the order they were stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if results cannot be read.
    async fn list_results(&self) -> Result<Vec<ResultRecord>, StorageError>;

    /// Earliest result recorded for `email`, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if results cannot be read.
    async fn find_by_email(&self, email: &str) -> Result<Option<ResultRecord>, StorageError>;

    /// Remove every stored result and return how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if results cannot be removed.
    async fn clear_results(&self) -> Result<u64, StorageError>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: u64,
    results: Vec<ResultRecord>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl ResultRepository for InMemoryRepository {
    async fn append_result(&self, result: &NewResult) -> Result<ResultId, StorageError> {
        let mut guard = self.lock()?;
        guard.next_id += 1;
        let id = ResultId::new(guard.next_id);
        guard.results.push(ResultRecord::new(id, result.clone()));
        Ok(id)
    }

    async fn get_result(&self, id: ResultId) -> Result<ResultRecord, StorageError> {
        let guard = self.lock()?;
        guard
            .results
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_results(&self) -> Result<Vec<ResultRecord>, StorageError> {
        Ok(self.lock()?.results.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<ResultRecord>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.results.iter().find(|r| r.matches_email(email)).cloned())
    }

    async fn clear_results(&self) -> Result<u64, StorageError> {
        let mut guard = self.lock()?;
        let removed = u64::try_from(guard.results.len()).unwrap_or(u64::MAX);
        guard.results.clear();
        Ok(removed)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub results: Arc<dyn ResultRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let results: Arc<dyn ResultRepository> = Arc::new(InMemoryRepository::new());
        Self { results }
    }
}
