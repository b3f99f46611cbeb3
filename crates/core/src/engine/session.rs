use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::engine::recorder::AnswerRecorder;
use crate::engine::scoring::finalize;
use crate::model::{AnswerRecord, Candidate, Question, SessionId, SessionReport};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Preconditions the engine refuses to start without.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("cannot start an assessment without questions")]
    EmptyQuestionSet,
}

/// Why an event left the session untouched.
///
/// These are not failures: late ticks, double clicks and out-of-range picks are
/// expected from a live front end and are dropped without changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Selection index outside the current question's options.
    InvalidSelection { index: usize, options: usize },
    /// Selection or submission while no question is active.
    NotActive,
    /// Timer event addressed to a question that is no longer current.
    StaleQuestion { question: usize },
    /// `advance` called while nothing is waiting to advance.
    NotAdvancing,
}

impl fmt::Display for Ignored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ignored::InvalidSelection { index, options } => {
                write!(f, "option {index} does not exist ({options} options)")
            }
            Ignored::NotActive => f.write_str("no question is accepting input"),
            Ignored::StaleQuestion { question } => {
                write!(f, "event for question {question} arrived after it closed")
            }
            Ignored::NotAdvancing => f.write_str("session is not ready to advance"),
        }
    }
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Pause after a manual submit before the next question appears.
pub const MANUAL_SETTLE: Duration = Duration::from_millis(350);

/// Pause after a timeout; longer so the forced submission is visible.
pub const TIMEOUT_SETTLE: Duration = Duration::from_millis(650);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    Manual,
    Timeout,
}

impl SubmitTrigger {
    #[must_use]
    pub fn settle_delay(self) -> Duration {
        match self {
            SubmitTrigger::Manual => MANUAL_SETTLE,
            SubmitTrigger::Timeout => TIMEOUT_SETTLE,
        }
    }
}

/// Where the session is. Each variant carries only what is valid in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Question `index` is shown, its countdown runs and the pick may change.
    Active {
        index: usize,
        time_left: u32,
        selected: Option<usize>,
        activated_at: DateTime<Utc>,
    },
    /// Answer recorded, countdown stopped, waiting out the settle delay.
    Submitted { index: usize, trigger: SubmitTrigger },
    /// Settle delay over; `advance` picks the next state.
    Advancing { from: usize },
    /// Report emitted. Terminal.
    Finished,
}

/// A question that was just closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub question: usize,
    pub selected: Option<usize>,
    pub trigger: SubmitTrigger,
}

impl Submission {
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.trigger.settle_delay()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Counting { question: usize, time_left: u32 },
    TimedOut(Submission),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next { question: usize, budget_secs: u32 },
    Finished(SessionReport),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One candidate's run through a fixed, ordered list of questions.
///
/// Purely event driven: the owner feeds ticks, picks, submits and settle
/// expiries, always with the current instant, and schedules whatever timers the
/// returned outcomes ask for. Nothing here sleeps or reads the clock.
#[derive(Debug)]
pub struct AssessmentSession {
    id: SessionId,
    candidate: Candidate,
    questions: Vec<Question>,
    recorder: AnswerRecorder,
    state: SessionState,
}

impl AssessmentSession {
    /// Open question 0 with its full budget.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::EmptyQuestionSet` if `questions` is empty.
    pub fn start(
        candidate: Candidate,
        questions: Vec<Question>,
        now: DateTime<Utc>,
    ) -> Result<Self, EngineError> {
        let Some(first) = questions.first() else {
            return Err(EngineError::EmptyQuestionSet);
        };
        let state = SessionState::Active {
            index: 0,
            time_left: first.budget_secs(),
            selected: None,
            activated_at: now,
        };

        Ok(Self {
            id: SessionId::generate(),
            candidate,
            questions,
            recorder: AnswerRecorder::new(),
            state,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn records(&self) -> &[AnswerRecord] {
        self.recorder.records()
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        match self.state {
            SessionState::Finished => self.total(),
            _ => self.recorder.len(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total().saturating_sub(self.answered())
    }

    /// Index of the question on screen, if any.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::Active { index, .. } | SessionState::Submitted { index, .. } => {
                Some(index)
            }
            SessionState::Advancing { from } => Some(from),
            SessionState::Finished => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|i| self.questions.get(i))
    }

    /// Seconds left on the running countdown; `None` when nothing is counting.
    #[must_use]
    pub fn time_left(&self) -> Option<u32> {
        match self.state {
            SessionState::Active { time_left, .. } => Some(time_left),
            _ => None,
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        match self.state {
            SessionState::Active { selected, .. } => selected,
            SessionState::Submitted { .. } => self.records().last().and_then(|r| r.selected_index),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished)
    }

    /// Pick option `option` for the active question. Last pick wins.
    ///
    /// # Errors
    ///
    /// `Ignored::NotActive` outside `Active`; `Ignored::InvalidSelection` for an
    /// index past the option list. State is unchanged in both cases.
    pub fn select(&mut self, option: usize) -> Result<(), Ignored> {
        let SessionState::Active { index, selected, .. } = &mut self.state else {
            return Err(Ignored::NotActive);
        };
        let options = self.questions[*index].options().len();
        if option >= options {
            return Err(Ignored::InvalidSelection {
                index: option,
                options,
            });
        }
        *selected = Some(option);
        Ok(())
    }

    /// Manual submission of the active question.
    ///
    /// # Errors
    ///
    /// `Ignored::NotActive` if the question was already submitted (by the
    /// candidate or by the timer) or the session is over.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<Submission, Ignored> {
        self.close_active(SubmitTrigger::Manual, now)
    }

    /// One second of countdown for `question`.
    ///
    /// # Errors
    ///
    /// `Ignored::StaleQuestion` when `question` is not the active one, which
    /// covers late ticks from a countdown that was already replaced.
    pub fn tick(&mut self, question: usize, now: DateTime<Utc>) -> Result<TickOutcome, Ignored> {
        let SessionState::Active { index, time_left, .. } = &mut self.state else {
            return Err(Ignored::StaleQuestion { question });
        };
        if *index != question {
            return Err(Ignored::StaleQuestion { question });
        }

        *time_left = time_left.saturating_sub(1);
        if *time_left > 0 {
            return Ok(TickOutcome::Counting {
                question,
                time_left: *time_left,
            });
        }

        self.close_active(SubmitTrigger::Timeout, now)
            .map(TickOutcome::TimedOut)
    }

    /// The settle delay for `question` ran out.
    ///
    /// # Errors
    ///
    /// `Ignored::StaleQuestion` unless `question` is currently `Submitted`.
    pub fn settle_elapsed(&mut self, question: usize) -> Result<(), Ignored> {
        match self.state {
            SessionState::Submitted { index, .. } if index == question => {
                self.state = SessionState::Advancing { from: index };
                Ok(())
            }
            _ => Err(Ignored::StaleQuestion { question }),
        }
    }

    /// Open the next question or, after the last one, emit the report.
    ///
    /// The report is produced exactly once; afterwards the session stays
    /// `Finished` and further calls are ignored.
    ///
    /// # Errors
    ///
    /// `Ignored::NotAdvancing` unless the session is `Advancing`.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance, Ignored> {
        let SessionState::Advancing { from } = self.state else {
            return Err(Ignored::NotAdvancing);
        };

        let next = from + 1;
        if let Some(question) = self.questions.get(next) {
            let budget_secs = question.budget_secs();
            self.state = SessionState::Active {
                index: next,
                time_left: budget_secs,
                selected: None,
                activated_at: now,
            };
            return Ok(Advance::Next {
                question: next,
                budget_secs,
            });
        }

        self.state = SessionState::Finished;
        let report = finalize(
            std::mem::take(&mut self.candidate),
            self.recorder.take(),
            self.questions.len(),
        );
        Ok(Advance::Finished(report))
    }

    fn close_active(
        &mut self,
        trigger: SubmitTrigger,
        now: DateTime<Utc>,
    ) -> Result<Submission, Ignored> {
        let SessionState::Active {
            index,
            selected,
            activated_at,
            ..
        } = self.state
        else {
            return Err(Ignored::NotActive);
        };

        self.recorder
            .record(&self.questions[index], selected, activated_at, now);
        self.state = SessionState::Submitted { index, trigger };

        Ok(Submission {
            question: index,
            selected,
            trigger,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
