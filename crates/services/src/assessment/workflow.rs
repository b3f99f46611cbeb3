use std::sync::Arc;

use tracing::{info, warn};

use interview_core::model::{Candidate, SessionReport};
use storage::repository::{NewResult, ResultRecord, ResultRepository};

use super::driver::{DriverTiming, SessionDriver, SessionHandle};
use crate::Clock;
use crate::bank::{QuestionBank, QuestionSampler};
use crate::error::WorkflowError;

/// Outcome of the pre-assessment check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceCheck {
    Eligible,
    /// This email already has a stored result; carries the earliest one.
    AlreadyAttended(Box<ResultRecord>),
}

/// Orchestrates eligibility, session start and result persistence.
#[derive(Clone)]
pub struct AssessmentService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    sampler: Arc<dyn QuestionSampler>,
    results: Arc<dyn ResultRepository>,
    timing: DriverTiming,
}

impl AssessmentService {
    #[must_use]
    pub fn new(
        clock: Clock,
        bank: Arc<QuestionBank>,
        sampler: Arc<dyn QuestionSampler>,
        results: Arc<dyn ResultRepository>,
    ) -> Self {
        Self {
            clock,
            bank,
            sampler,
            results,
            timing: DriverTiming::default(),
        }
    }

    #[must_use]
    pub fn with_timing(mut self, timing: DriverTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Check whether `candidate` may take the assessment.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::MissingEmail` when the candidate has no email,
    /// or `WorkflowError::Storage` if results cannot be read.
    pub async fn begin(&self, candidate: &Candidate) -> Result<AttendanceCheck, WorkflowError> {
        let Some(email) = candidate.email_key() else {
            warn!("assessment requested without an email");
            return Err(WorkflowError::MissingEmail);
        };

        match self.results.find_by_email(&email).await? {
            Some(previous) => {
                info!(result = %previous.id, "candidate already attended");
                Ok(AttendanceCheck::AlreadyAttended(Box::new(previous)))
            }
            None => Ok(AttendanceCheck::Eligible),
        }
    }

    /// Sample questions and start a driven session for `candidate`.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Engine` if the sampler picked no questions.
    pub fn start(&self, candidate: Candidate) -> Result<SessionHandle, WorkflowError> {
        let questions = self.sampler.sample(&self.bank);
        SessionDriver::spawn(candidate, questions, self.clock, self.timing)
    }

    /// Persist a finished session and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Storage` if the result cannot be stored or read
    /// back.
    pub async fn complete(&self, report: SessionReport) -> Result<ResultRecord, WorkflowError> {
        let new = NewResult::from_report(report, self.clock.now());
        let id = self.results.append_result(&new).await?;
        info!(result = %id, score = new.score, total = new.total, "result stored");
        Ok(ResultRecord::new(id, new))
    }
}
