//! Question bank and the strategies that pick a session's questions from it.

use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;

use interview_core::model::{Level, Question, QuestionDraft};

use crate::error::BankError;

/// `(id, level, text, options, correct, explanation)`
type Entry = (u64, Level, &'static str, [&'static str; 4], i64, &'static str);

const STANDARD: [Entry; 18] = [
    (1, Level::Easy, "Binary of decimal 15?", ["1110", "1111", "1001", "1101"], 1, "15 in binary is 1111."),
    (2, Level::Easy, "Universal logic gate?", ["AND", "OR", "NAND", "XOR"], 2, "NAND is universal."),
    (3, Level::Easy, "Which is not a programming language?", ["C", "Python", "HTML", "Java"], 2, "HTML is markup."),
    (4, Level::Easy, "Stack uses which principle?", ["FIFO", "LIFO", "LILO", "FILO"], 1, "Stack is LIFO."),
    (5, Level::Easy, "Decimal of binary 1010?", ["8", "9", "10", "12"], 2, "1010 binary = 10 decimal."),
    (6, Level::Easy, "Which is volatile memory?", ["ROM", "Cache", "Hard Disk", "SSD"], 1, "Cache is volatile."),
    (7, Level::Medium, "Time complexity of binary search?", ["O(n)", "O(log n)", "O(n log n)", "O(1)"], 1, "Binary search is O(log n)."),
    (8, Level::Medium, "Which scheduling may cause starvation?", ["FCFS", "SJF", "Round Robin", "Priority"], 3, "Priority may starve."),
    (9, Level::Medium, "Square root of 256?", ["14", "15", "16", "18"], 2, "16x16=256."),
    (10, Level::Medium, "Which is not a linear data structure?", ["Array", "Linked List", "Stack", "Graph"], 3, "Graph is non-linear."),
    (11, Level::Medium, "Best case time complexity of Insertion Sort?", ["O(n)", "O(n log n)", "O(n^2)", "O(log n)"], 0, "Best = O(n)."),
    (12, Level::Medium, "OSI model has how many layers?", ["5", "6", "7", "8"], 2, "OSI has 7 layers."),
    (13, Level::Hard, "Worst case of QuickSort?", ["O(n)", "O(log n)", "O(n log n)", "O(n^2)"], 3, "Worst = O(n^2)."),
    (14, Level::Hard, "Belady's anomaly occurs in?", ["LRU", "FIFO", "Optimal", "Clock"], 1, "Belady anomaly in FIFO."),
    (15, Level::Hard, "Page replacement algorithm with min faults?", ["LRU", "FIFO", "Optimal", "Clock"], 2, "Optimal has min faults."),
    (16, Level::Hard, "Best case time of Merge Sort?", ["O(n)", "O(n log n)", "O(n^2)", "O(log n)"], 1, "Always O(n log n)."),
    (17, Level::Hard, "Which algorithm is used for shortest path?", ["Dijkstra", "Kruskal", "Prim", "DFS"], 0, "Dijkstra is shortest path."),
    (18, Level::Hard, "Which is NP-complete?", ["Sorting", "TSP", "Searching", "Binary Search"], 1, "TSP is NP-complete."),
];

/// A pool of questions to sample sessions from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The built-in bank: six computer-science questions per level.
    #[must_use]
    pub fn standard() -> Self {
        let questions = STANDARD
            .iter()
            .map(|(id, level, text, options, correct, explanation)| {
                QuestionDraft {
                    id: *id,
                    level: level.as_str().to_owned(),
                    text: (*text).to_owned(),
                    options: Some(options.iter().map(|o| (*o).to_owned()).collect()),
                    correct_index: Some(*correct),
                    explanation: Some((*explanation).to_owned()),
                }
                .into_question()
            })
            .collect();
        Self { questions }
    }

    /// Parse a JSON array of loosely-typed questions.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Json` for malformed JSON and `BankError::Empty` when
    /// the array has no entries.
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let drafts: Vec<QuestionDraft> = serde_json::from_str(json)?;
        if drafts.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self::new(
            drafts.into_iter().map(QuestionDraft::into_question).collect(),
        ))
    }

    /// Read a JSON question file.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Io` if the file cannot be read, otherwise see
    /// [`QuestionBank::from_json`].
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn by_level(&self, level: Level) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.level() == level)
    }
}

/// Chooses the ordered question list for one session.
pub trait QuestionSampler: Send + Sync {
    fn sample(&self, bank: &QuestionBank) -> Vec<Question>;
}

/// Up to N random questions per level, easy first, then medium, then hard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomPerLevel {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl Default for RandomPerLevel {
    fn default() -> Self {
        Self::uniform(2)
    }
}

impl RandomPerLevel {
    #[must_use]
    pub fn uniform(per_level: usize) -> Self {
        Self {
            easy: per_level,
            medium: per_level,
            hard: per_level,
        }
    }

    #[must_use]
    pub fn count_for(&self, level: Level) -> usize {
        match level {
            Level::Easy => self.easy,
            Level::Medium => self.medium,
            Level::Hard => self.hard,
        }
    }

    /// Sample with a caller-provided RNG.
    pub fn sample_with<R: Rng + ?Sized>(&self, bank: &QuestionBank, rng: &mut R) -> Vec<Question> {
        let mut picked = Vec::new();
        for level in Level::ALL {
            let mut pool: Vec<&Question> = bank.by_level(level).collect();
            pool.shuffle(rng);
            picked.extend(pool.into_iter().take(self.count_for(level)).cloned());
        }
        picked
    }
}

impl QuestionSampler for RandomPerLevel {
    fn sample(&self, bank: &QuestionBank) -> Vec<Question> {
        self.sample_with(bank, &mut rand::rng())
    }
}

/// The whole bank in stored order.
#[derive(Debug, Clone, Copy, Default)]
pub struct InOrder;

impl QuestionSampler for InOrder {
    fn sample(&self, bank: &QuestionBank) -> Vec<Question> {
        bank.questions().to_vec()
    }
}
