//! Browsing and housekeeping for stored assessment results.

use std::sync::Arc;
use std::str::FromStr;

use tracing::info;

use interview_core::model::ResultId;
use storage::repository::{ResultRecord, ResultRepository};

use crate::error::ResultServiceError;

/// Ordering applied after filtering. All sorts are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultSort {
    /// Storage order.
    #[default]
    None,
    ScoreHigh,
    ScoreLow,
    Name,
    Email,
}

impl FromStr for ResultSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "high" => Ok(Self::ScoreHigh),
            "low" => Ok(Self::ScoreLow),
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            other => Err(format!("unknown sort: {other} (expected high, low, name or email)")),
        }
    }
}

/// Filters and ordering for a result listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultQuery {
    /// Case-insensitive substring of name or email.
    pub search: Option<String>,
    pub sort: ResultSort,
    /// Keep only results for this email ("only mine").
    pub only_email: Option<String>,
}

impl ResultQuery {
    /// Apply the query to `records`, keeping their relative order where the
    /// sort does not decide.
    #[must_use]
    pub fn apply(&self, records: Vec<ResultRecord>) -> Vec<ResultRecord> {
        let mine = self
            .only_email
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());
        let term = self
            .search
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_lowercase);

        let mut list: Vec<ResultRecord> = records
            .into_iter()
            .filter(|r| mine.as_deref().is_none_or(|email| r.matches_email(email)))
            .filter(|r| {
                term.as_deref().is_none_or(|term| {
                    r.name().to_lowercase().contains(term) || r.email().to_lowercase().contains(term)
                })
            })
            .collect();

        match self.sort {
            ResultSort::None => {}
            ResultSort::ScoreHigh => list.sort_by(|a, b| b.score.cmp(&a.score)),
            ResultSort::ScoreLow => list.sort_by_key(|r| r.score),
            ResultSort::Name => list.sort_by(|a, b| a.name().cmp(b.name())),
            ResultSort::Email => list.sort_by(|a, b| a.email().cmp(b.email())),
        }
        list
    }
}

/// Read-side service over the result store.
#[derive(Clone)]
pub struct ResultService {
    results: Arc<dyn ResultRepository>,
}

impl ResultService {
    #[must_use]
    pub fn new(results: Arc<dyn ResultRepository>) -> Self {
        Self { results }
    }

    /// # Errors
    ///
    /// Returns `ResultServiceError::Storage` if results cannot be read.
    pub async fn browse(&self, query: &ResultQuery) -> Result<Vec<ResultRecord>, ResultServiceError> {
        let all = self.results.list_results().await?;
        Ok(query.apply(all))
    }

    /// # Errors
    ///
    /// Returns `ResultServiceError::Storage`, including `NotFound` for an
    /// unknown id.
    pub async fn get(&self, id: ResultId) -> Result<ResultRecord, ResultServiceError> {
        Ok(self.results.get_result(id).await?)
    }

    /// Delete every stored result.
    ///
    /// # Errors
    ///
    /// Returns `ResultServiceError::Storage` if results cannot be removed.
    pub async fn clear(&self) -> Result<u64, ResultServiceError> {
        let removed = self.results.clear_results().await?;
        info!(removed, "results cleared");
        Ok(removed)
    }
}
