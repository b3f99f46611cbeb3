//! Async pacing around the contact-field dialogue.

use std::time::Duration;

use tracing::{debug, info, warn};

use interview_core::dialogue::{
    DialogueError, DialogueStep, ElicitationDialogue, Rejected, THINKING_DELAY,
};
use interview_core::model::{Candidate, CandidateField};

/// Runs an `ElicitationDialogue`, sleeping through the thinking pause after
/// each accepted answer.
#[derive(Debug)]
pub struct DialogueDriver {
    dialogue: ElicitationDialogue,
    thinking_delay: Duration,
}

impl DialogueDriver {
    #[must_use]
    pub fn new(candidate: Candidate) -> Self {
        let dialogue = ElicitationDialogue::start(candidate);
        debug!(missing = ?dialogue.missing_fields(), "dialogue started");
        Self {
            dialogue,
            thinking_delay: THINKING_DELAY,
        }
    }

    #[must_use]
    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }

    #[must_use]
    pub fn dialogue(&self) -> &ElicitationDialogue {
        &self.dialogue
    }

    /// The field to ask for next, or `None` once everything is collected.
    #[must_use]
    pub fn prompt(&self) -> Option<CandidateField> {
        match self.dialogue.step() {
            DialogueStep::AwaitingInput(field) => Some(field),
            DialogueStep::Thinking | DialogueStep::Done => None,
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.dialogue.is_done()
    }

    /// Offer `value` for the current field, then wait out the thinking pause.
    ///
    /// # Errors
    ///
    /// Passes through the dialogue's `Rejected`; nothing changes and no pause
    /// happens in that case.
    pub async fn answer(&mut self, value: &str) -> Result<DialogueStep, Rejected> {
        let field = match self.dialogue.confirm(value) {
            Ok(field) => field,
            Err(rejected @ Rejected::EmptyFieldInput { .. }) => {
                debug!(?rejected, "blank answer");
                return Err(rejected);
            }
            Err(rejected) => {
                warn!(?rejected, "answer offered while not awaiting input");
                return Err(rejected);
            }
        };
        debug!(%field, "field confirmed");

        tokio::time::sleep(self.thinking_delay).await;
        Ok(self.dialogue.thinking_elapsed())
    }

    /// # Errors
    ///
    /// `DialogueError::Incomplete` while fields are still missing.
    pub fn finish(self) -> Result<Candidate, DialogueError> {
        let candidate = self.dialogue.finish()?;
        info!("candidate details complete");
        Ok(candidate)
    }

    pub fn cancel(self) {
        debug!(outstanding = self.dialogue.outstanding(), "dialogue cancelled");
        self.dialogue.cancel();
    }
}
