use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::driver::SessionEvent;

/// Once-per-period tick source for a single question.
///
/// Ticks are tagged with the question index so the session can drop any that
/// arrive after the question closed. Dropping the countdown stops it.
#[derive(Debug)]
pub struct Countdown {
    question: usize,
    task: JoinHandle<()>,
}

impl Countdown {
    /// Start ticking for `question`. The first tick arrives one `period` from
    /// now.
    #[must_use]
    pub fn start(question: usize, period: Duration, events: mpsc::Sender<SessionEvent>) -> Self {
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if events.send(SessionEvent::Tick { question }).await.is_err() {
                    break;
                }
            }
        });
        Self { question, task }
    }

    #[must_use]
    pub fn question(&self) -> usize {
        self.question
    }

    /// Abort the tick task. Dropping the countdown does the same.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_with_question_tag() {
        let (tx, mut rx) = mpsc::channel(8);
        let countdown = Countdown::start(3, Duration::from_secs(1), tx);

        let started = Instant::now();
        let first = rx.recv().await.unwrap();
        assert_eq!(first, SessionEvent::Tick { question: 3 });
        assert_eq!(started.elapsed(), Duration::from_secs(1));

        rx.recv().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(2));
        assert_eq!(countdown.question(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stopping_ends_the_stream() {
        let (tx, mut rx) = mpsc::channel(8);
        let countdown = Countdown::start(0, Duration::from_secs(1), tx);
        rx.recv().await.unwrap();

        countdown.stop();
        // the aborted task drops its sender, closing the channel
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_aborts_before_the_first_tick() {
        let (tx, mut rx) = mpsc::channel(8);
        let countdown = Countdown::start(1, Duration::from_secs(1), tx);
        let task = countdown.task.abort_handle();

        countdown.stop();
        assert_eq!(rx.recv().await, None);
        assert!(task.is_finished());
    }
}
