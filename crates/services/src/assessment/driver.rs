use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use interview_core::engine::{
    Advance, AssessmentSession, Ignored, MANUAL_SETTLE, Submission, SubmitTrigger, TIMEOUT_SETTLE,
    TickOutcome,
};
use interview_core::model::{Candidate, Question, SessionReport};

use super::countdown::Countdown;
use super::progress::SessionProgress;
use crate::Clock;
use crate::error::WorkflowError;

const EVENT_BUFFER: usize = 32;

/// Everything that can happen to a running session. Consumed one at a time by
/// the driver task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Select { option: usize },
    Submit,
    Tick { question: usize },
    SettleElapsed { question: usize },
}

/// What the front end needs to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    QuestionStarted {
        index: usize,
        question: Question,
        time_left: u32,
        progress: SessionProgress,
    },
    Countdown {
        question: usize,
        time_left: u32,
    },
    Selected {
        question: usize,
        option: usize,
    },
    Submitted {
        submission: Submission,
        progress: SessionProgress,
    },
    Finished(SessionReport),
}

/// Timer periods used by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverTiming {
    pub tick: Duration,
    pub manual_settle: Duration,
    pub timeout_settle: Duration,
}

impl Default for DriverTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            manual_settle: MANUAL_SETTLE,
            timeout_settle: TIMEOUT_SETTLE,
        }
    }
}

impl DriverTiming {
    #[must_use]
    pub fn settle_delay(&self, trigger: SubmitTrigger) -> Duration {
        match trigger {
            SubmitTrigger::Manual => self.manual_settle,
            SubmitTrigger::Timeout => self.timeout_settle,
        }
    }
}

/// Owns an `AssessmentSession` inside one task and applies events to it in
/// arrival order.
///
/// Wall-clock time is derived from the tokio clock relative to the instant the
/// driver started, so paused-time tests see exact elapsed seconds.
pub struct SessionDriver {
    session: AssessmentSession,
    timing: DriverTiming,
    started: (DateTime<Utc>, Instant),
    events_tx: mpsc::Sender<SessionEvent>,
    events: mpsc::Receiver<SessionEvent>,
    updates: mpsc::UnboundedSender<SessionUpdate>,
    countdown: Option<Countdown>,
    settle: Option<JoinHandle<()>>,
}

impl SessionDriver {
    /// Start a session over `questions` and run it on a new task.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Engine` if `questions` is empty.
    pub fn spawn(
        candidate: Candidate,
        questions: Vec<Question>,
        clock: Clock,
        timing: DriverTiming,
    ) -> Result<SessionHandle, WorkflowError> {
        let started = (clock.now(), Instant::now());
        let session = AssessmentSession::start(candidate, questions, started.0)?;
        info!(session = %session.id(), total = session.total(), "assessment session started");

        let (events_tx, events) = mpsc::channel(EVENT_BUFFER);
        let (updates, updates_rx) = mpsc::unbounded_channel();
        let driver = Self {
            session,
            timing,
            started,
            events_tx: events_tx.clone(),
            events,
            updates,
            countdown: None,
            settle: None,
        };
        let task = tokio::spawn(driver.run());

        Ok(SessionHandle {
            events: events_tx,
            updates: updates_rx,
            task,
        })
    }

    async fn run(mut self) -> Option<SessionReport> {
        self.open_question(0);
        while let Some(event) = self.events.recv().await {
            if let Some(report) = self.handle(event) {
                return Some(report);
            }
        }
        None
    }

    fn now(&self) -> DateTime<Utc> {
        let (at, instant) = self.started;
        at + chrono::Duration::from_std(instant.elapsed()).unwrap_or_else(|_| chrono::Duration::zero())
    }

    fn publish(&self, update: SessionUpdate) {
        // the front end may have gone away; the session still runs to the end
        let _ = self.updates.send(update);
    }

    fn handle(&mut self, event: SessionEvent) -> Option<SessionReport> {
        let now = self.now();
        match event {
            SessionEvent::Select { option } => match self.session.select(option) {
                Ok(()) => {
                    if let Some(question) = self.session.current_index() {
                        self.publish(SessionUpdate::Selected { question, option });
                    }
                }
                Err(ignored) => self.ignored(event, ignored),
            },
            SessionEvent::Submit => match self.session.submit(now) {
                Ok(submission) => self.on_submitted(submission),
                Err(ignored) => self.ignored(event, ignored),
            },
            SessionEvent::Tick { question } => match self.session.tick(question, now) {
                Ok(TickOutcome::Counting { question, time_left }) => {
                    self.publish(SessionUpdate::Countdown {
                        question,
                        time_left,
                    });
                }
                Ok(TickOutcome::TimedOut(submission)) => {
                    self.publish(SessionUpdate::Countdown {
                        question,
                        time_left: 0,
                    });
                    self.on_submitted(submission);
                }
                Err(ignored) => self.ignored(event, ignored),
            },
            SessionEvent::SettleElapsed { question } => {
                if let Err(ignored) = self.session.settle_elapsed(question) {
                    self.ignored(event, ignored);
                    return None;
                }
                self.settle = None;
                return self.advance(now);
            }
        }
        None
    }

    fn advance(&mut self, now: DateTime<Utc>) -> Option<SessionReport> {
        match self.session.advance(now) {
            Ok(Advance::Next { question, .. }) => {
                self.open_question(question);
                None
            }
            Ok(Advance::Finished(report)) => {
                info!(
                    session = %self.session.id(),
                    score = report.score,
                    total = report.total,
                    "assessment session finished"
                );
                self.publish(SessionUpdate::Finished(report.clone()));
                Some(report)
            }
            Err(ignored) => {
                debug!(session = %self.session.id(), %ignored, "advance ignored");
                None
            }
        }
    }

    fn open_question(&mut self, index: usize) {
        let (Some(question), Some(time_left)) =
            (self.session.current_question(), self.session.time_left())
        else {
            return;
        };
        let update = SessionUpdate::QuestionStarted {
            index,
            question: question.clone(),
            time_left,
            progress: SessionProgress::of(&self.session),
        };
        debug!(session = %self.session.id(), index, time_left, "question opened");

        self.countdown = Some(Countdown::start(
            index,
            self.timing.tick,
            self.events_tx.clone(),
        ));
        self.publish(update);
    }

    fn on_submitted(&mut self, submission: Submission) {
        if let Some(countdown) = self.countdown.take() {
            countdown.stop();
        }
        info!(
            session = %self.session.id(),
            question = submission.question,
            selected = ?submission.selected,
            trigger = ?submission.trigger,
            "question submitted"
        );

        let delay = self.timing.settle_delay(submission.trigger);
        let events = self.events_tx.clone();
        let question = submission.question;
        self.settle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::SettleElapsed { question }).await;
        }));

        self.publish(SessionUpdate::Submitted {
            submission,
            progress: SessionProgress::of(&self.session),
        });
    }

    fn ignored(&self, event: SessionEvent, ignored: Ignored) {
        debug!(session = %self.session.id(), ?event, %ignored, "event ignored");
    }
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        if let Some(settle) = self.settle.take() {
            settle.abort();
        }
    }
}

/// Caller's side of a running session.
#[derive(Debug)]
pub struct SessionHandle {
    events: mpsc::Sender<SessionEvent>,
    updates: mpsc::UnboundedReceiver<SessionUpdate>,
    task: JoinHandle<Option<SessionReport>>,
}

impl SessionHandle {
    /// # Errors
    ///
    /// Returns `WorkflowError::DriverStopped` once the session is over.
    pub async fn send(&self, event: SessionEvent) -> Result<(), WorkflowError> {
        self.events
            .send(event)
            .await
            .map_err(|_| WorkflowError::DriverStopped)
    }

    /// # Errors
    ///
    /// Returns `WorkflowError::DriverStopped` once the session is over.
    pub async fn select(&self, option: usize) -> Result<(), WorkflowError> {
        self.send(SessionEvent::Select { option }).await
    }

    /// # Errors
    ///
    /// Returns `WorkflowError::DriverStopped` once the session is over.
    pub async fn submit(&self) -> Result<(), WorkflowError> {
        self.send(SessionEvent::Submit).await
    }

    /// A sender for feeding events from another task.
    #[must_use]
    pub fn events(&self) -> mpsc::Sender<SessionEvent> {
        self.events.clone()
    }

    /// Next redraw notification; `None` after the driver has stopped and every
    /// update was consumed.
    pub async fn next_update(&mut self) -> Option<SessionUpdate> {
        self.updates.recv().await
    }

    /// Wait for the session to finish and return its report.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::DriverStopped` if the driver task ended without
    /// producing a report.
    pub async fn finished(self) -> Result<SessionReport, WorkflowError> {
        match self.task.await {
            Ok(Some(report)) => Ok(report),
            Ok(None) | Err(_) => Err(WorkflowError::DriverStopped),
        }
    }

    /// Stop the session without a report.
    pub fn abandon(self) {
        self.task.abort();
    }
}
