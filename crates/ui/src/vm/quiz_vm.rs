use interview_core::model::Question;
use services::{SessionProgress, SessionUpdate};

use crate::vm::time_fmt::{countdown_percent, format_countdown};

/// `A.`, `B.`, ... falling back to `27.` past the alphabet.
#[must_use]
pub fn option_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => format!("{}.", char::from(b'A' + i)),
        _ => format!("{}.", index + 1),
    }
}

/// Parse a typed choice: a letter (`b`) or a 1-based number (`2`).
#[must_use]
pub fn parse_option(input: &str, options: usize) -> Option<usize> {
    let input = input.trim();
    let index = if let Ok(number) = input.parse::<usize>() {
        number.checked_sub(1)?
    } else {
        let mut chars = input.chars();
        let letter = chars.next()?.to_ascii_lowercase();
        if chars.next().is_some() || !letter.is_ascii_lowercase() {
            return None;
        }
        usize::from(letter as u8 - b'a')
    };
    (index < options).then_some(index)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionLineVm {
    pub label: String,
    pub text: String,
    pub selected: bool,
    /// Set only once the question is submitted.
    pub correct: Option<bool>,
}

/// Screen state for the question being answered, folded from driver updates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizVm {
    index: usize,
    question: Option<Question>,
    time_left: u32,
    selected: Option<usize>,
    submitted: bool,
    finished: bool,
    progress: Option<SessionProgress>,
}

impl QuizVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, update: &SessionUpdate) {
        match update {
            SessionUpdate::QuestionStarted {
                index,
                question,
                time_left,
                progress,
            } => {
                self.index = *index;
                self.question = Some(question.clone());
                self.time_left = *time_left;
                self.selected = None;
                self.submitted = false;
                self.progress = Some(*progress);
            }
            SessionUpdate::Countdown {
                question,
                time_left,
            } if *question == self.index => self.time_left = *time_left,
            SessionUpdate::Selected { question, option } if *question == self.index => {
                self.selected = Some(*option);
            }
            SessionUpdate::Submitted {
                submission,
                progress,
            } if submission.question == self.index => {
                self.selected = submission.selected;
                self.submitted = true;
                self.progress = Some(*progress);
            }
            SessionUpdate::Finished(_) => self.finished = true,
            _ => {}
        }
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn heading(&self) -> String {
        let total = self.progress.map_or(0, |p| p.total);
        format!("Question {} / {}", self.index + 1, total)
    }

    #[must_use]
    pub fn level_line(&self) -> String {
        let level = self.question.as_ref().map_or("", |q| q.level().as_str());
        format!("Level: {level}")
    }

    #[must_use]
    pub fn timer_label(&self) -> String {
        format_countdown(i64::from(self.time_left))
    }

    #[must_use]
    pub fn timer_percent(&self) -> u32 {
        let budget = self.question.as_ref().map_or(0, Question::budget_secs);
        countdown_percent(self.time_left, budget)
    }

    #[must_use]
    pub fn option_lines(&self) -> Vec<OptionLineVm> {
        let Some(question) = &self.question else {
            return Vec::new();
        };
        question
            .options()
            .iter()
            .enumerate()
            .map(|(i, text)| OptionLineVm {
                label: option_label(i),
                text: text.clone(),
                selected: self.selected == Some(i),
                correct: if self.submitted {
                    question.correct_index().map(|c| c == i)
                } else {
                    None
                },
            })
            .collect()
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.submitted {
            return "Submitted";
        }
        let is_last = self.progress.is_some_and(|p| self.index + 1 == p.total);
        if is_last { "Submit & Finish" } else { "Submit" }
    }

    #[must_use]
    pub fn progress_line(&self) -> String {
        let (answered, remaining) = self.progress.map_or((0, 0), |p| (p.answered, p.remaining));
        format!("{answered} answered • {remaining} remaining")
    }
}
