use std::path::Path;
use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::assessment::{AssessmentService, DriverTiming};
use crate::bank::{QuestionBank, QuestionSampler};
use crate::error::AppServicesError;
use crate::results::ResultService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    assessment: Arc<AssessmentService>,
    results: Arc<ResultService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        bank: QuestionBank,
        sampler: Arc<dyn QuestionSampler>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, bank, sampler))
    }

    /// Build services over an existing storage aggregate.
    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        bank: QuestionBank,
        sampler: Arc<dyn QuestionSampler>,
    ) -> Self {
        let assessment = Arc::new(AssessmentService::new(
            clock,
            Arc::new(bank),
            sampler,
            Arc::clone(&storage.results),
        ));
        let results = Arc::new(ResultService::new(Arc::clone(&storage.results)));
        Self {
            assessment,
            results,
        }
    }

    /// The question file at `path`, or the built-in bank when `None`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Bank` if the file cannot be read or parsed.
    pub async fn load_bank(path: Option<&Path>) -> Result<QuestionBank, AppServicesError> {
        match path {
            Some(path) => Ok(QuestionBank::load(path).await?),
            None => Ok(QuestionBank::standard()),
        }
    }

    /// Replace the driver timing, e.g. to shorten delays in tests.
    #[must_use]
    pub fn with_timing(mut self, timing: DriverTiming) -> Self {
        let assessment = (*self.assessment).clone().with_timing(timing);
        self.assessment = Arc::new(assessment);
        self
    }

    #[must_use]
    pub fn assessment(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessment)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultService> {
        Arc::clone(&self.results)
    }
}
