//! Conversational collection of missing candidate contact fields.
//!
//! The dialogue asks for one missing field at a time, in the fixed order
//! name → email → phone, and pauses briefly ("thinking") after each accepted
//! answer. It is a pure state machine; the pause itself is scheduled by the
//! owner.

use std::time::Duration;
use thiserror::Error;

use crate::model::{Candidate, CandidateField};

/// Pacing pause between an accepted answer and the next prompt.
pub const THINKING_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DialogueError {
    /// `finish` was called before every field was collected. The dialogue is
    /// handed back unchanged.
    #[error("candidate details are incomplete: {} field(s) still missing", .0.outstanding())]
    Incomplete(Box<ElicitationDialogue>),
}

/// Why a confirmation was not accepted. State is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    /// Blank or whitespace-only input.
    EmptyFieldInput { field: CandidateField },
    /// Not waiting for input right now (thinking or done).
    NotAwaitingInput,
}

/// What the dialogue is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueStep {
    AwaitingInput(CandidateField),
    Thinking,
    Done,
}

/// Either a field still to ask for, or the end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSlot {
    Field(CandidateField),
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElicitationDialogue {
    missing: Vec<CandidateField>,
    current_index: usize,
    thinking: bool,
    draft: Candidate,
}

impl ElicitationDialogue {
    /// Begin collecting whatever `candidate` lacks. A complete candidate yields
    /// a dialogue that is already `Done`.
    #[must_use]
    pub fn start(candidate: Candidate) -> Self {
        Self {
            missing: candidate.missing_fields(),
            current_index: 0,
            thinking: false,
            draft: candidate,
        }
    }

    #[must_use]
    pub fn missing_fields(&self) -> &[CandidateField] {
        &self.missing
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_field(&self) -> FieldSlot {
        self.missing
            .get(self.current_index)
            .map_or(FieldSlot::Done, |field| FieldSlot::Field(*field))
    }

    #[must_use]
    pub fn step(&self) -> DialogueStep {
        match self.current_field() {
            FieldSlot::Done => DialogueStep::Done,
            FieldSlot::Field(_) if self.thinking => DialogueStep::Thinking,
            FieldSlot::Field(field) => DialogueStep::AwaitingInput(field),
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.step() == DialogueStep::Done
    }

    #[must_use]
    pub fn draft(&self) -> &Candidate {
        &self.draft
    }

    /// Fields not yet collected, counting the one being asked for.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.missing.len().saturating_sub(self.current_index)
    }

    /// Offer a value for the field being asked for.
    ///
    /// The value is trimmed and stored as-is; no other normalization happens.
    ///
    /// # Errors
    ///
    /// `Rejected::EmptyFieldInput` for blank input and
    /// `Rejected::NotAwaitingInput` while thinking or done.
    pub fn confirm(&mut self, value: &str) -> Result<CandidateField, Rejected> {
        let DialogueStep::AwaitingInput(field) = self.step() else {
            return Err(Rejected::NotAwaitingInput);
        };
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Rejected::EmptyFieldInput { field });
        }

        self.draft.set_field(field, trimmed);
        self.thinking = true;
        Ok(field)
    }

    /// The thinking pause is over: move to the next field or finish.
    ///
    /// Does nothing unless the dialogue is thinking.
    pub fn thinking_elapsed(&mut self) -> DialogueStep {
        if self.step() == DialogueStep::Thinking {
            self.thinking = false;
            self.current_index += 1;
        }
        self.step()
    }

    /// Hand over the completed candidate.
    ///
    /// # Errors
    ///
    /// `DialogueError::Incomplete` (carrying the dialogue) if fields remain.
    pub fn finish(self) -> Result<Candidate, DialogueError> {
        if self.is_done() {
            Ok(self.draft)
        } else {
            Err(DialogueError::Incomplete(Box::new(self)))
        }
    }

    /// Abandon the dialogue; collected values are discarded.
    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirm_and_settle(dialogue: &mut ElicitationDialogue, value: &str) -> DialogueStep {
        dialogue.confirm(value).unwrap();
        assert_eq!(dialogue.step(), DialogueStep::Thinking);
        dialogue.thinking_elapsed()
    }

    #[test]
    fn complete_candidate_is_done_immediately() {
        let dialogue = ElicitationDialogue::start(Candidate::new("Ann", "a@b.com", "9876543210"));
        assert!(dialogue.is_done());
        assert_eq!(dialogue.current_field(), FieldSlot::Done);
        assert_eq!(dialogue.current_index(), dialogue.missing_fields().len());
    }

    #[test]
    fn asks_missing_fields_in_priority_order() {
        let mut dialogue = ElicitationDialogue::start(Candidate {
            name: Some("Ann".into()),
            email: None,
            phone: None,
        });
        assert_eq!(
            dialogue.missing_fields(),
            &[CandidateField::Email, CandidateField::Phone]
        );
        assert_eq!(dialogue.step(), DialogueStep::AwaitingInput(CandidateField::Email));

        assert_eq!(
            dialogue.confirm(""),
            Err(Rejected::EmptyFieldInput { field: CandidateField::Email })
        );
        assert_eq!(dialogue.step(), DialogueStep::AwaitingInput(CandidateField::Email));

        let next = confirm_and_settle(&mut dialogue, "ann@example.com");
        assert_eq!(next, DialogueStep::AwaitingInput(CandidateField::Phone));
    }

    #[test]
    fn blank_name_and_phone_are_asked_in_order() {
        let mut dialogue = ElicitationDialogue::start(Candidate {
            name: Some(String::new()),
            email: Some("a@b.com".into()),
            phone: Some(String::new()),
        });
        assert_eq!(
            dialogue.missing_fields(),
            &[CandidateField::Name, CandidateField::Phone]
        );

        let next = confirm_and_settle(&mut dialogue, "Ann");
        assert_eq!(next, DialogueStep::AwaitingInput(CandidateField::Phone));

        assert!(dialogue.confirm("").is_err());
        assert_eq!(dialogue.step(), DialogueStep::AwaitingInput(CandidateField::Phone));
        assert_eq!(dialogue.draft().name.as_deref(), Some("Ann"));
    }

    #[test]
    fn values_are_trimmed_but_otherwise_untouched() {
        let mut dialogue = ElicitationDialogue::start(Candidate::default());
        confirm_and_settle(&mut dialogue, "  aNN smith ");
        confirm_and_settle(&mut dialogue, " Ann@Example.com");
        let last = confirm_and_settle(&mut dialogue, "98765 43210 ");
        assert_eq!(last, DialogueStep::Done);

        let candidate = dialogue.finish().unwrap();
        assert_eq!(candidate.name.as_deref(), Some("aNN smith"));
        assert_eq!(candidate.email.as_deref(), Some("Ann@Example.com"));
        assert_eq!(candidate.phone.as_deref(), Some("98765 43210"));
    }

    #[test]
    fn confirm_while_thinking_is_rejected() {
        let mut dialogue = ElicitationDialogue::start(Candidate::default());
        dialogue.confirm("Ann").unwrap();
        assert_eq!(dialogue.confirm("Bob"), Err(Rejected::NotAwaitingInput));
        assert_eq!(dialogue.draft().name.as_deref(), Some("Ann"));
    }

    #[test]
    fn thinking_elapsed_outside_thinking_does_nothing() {
        let mut dialogue = ElicitationDialogue::start(Candidate::default());
        assert_eq!(
            dialogue.thinking_elapsed(),
            DialogueStep::AwaitingInput(CandidateField::Name)
        );
        assert_eq!(dialogue.current_index(), 0);
    }

    #[test]
    fn finish_before_done_hands_dialogue_back() {
        let dialogue = ElicitationDialogue::start(Candidate::default());
        let Err(DialogueError::Incomplete(returned)) = dialogue.finish() else {
            panic!("dialogue should be incomplete");
        };
        assert_eq!(returned.outstanding(), 3);
        assert_eq!(returned.step(), DialogueStep::AwaitingInput(CandidateField::Name));
    }
}
