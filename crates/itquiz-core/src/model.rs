//! Core data model types for itquiz.
//!
//! Authored questions are what bank files contain; resolved questions are
//! what a single run plays; score records are what a finished run hands to
//! the leaderboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::nickname::Nickname;
use crate::DEFAULT_POINTS_PER_CORRECT;

/// A question as authored: the correct answer is identified by its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoredQuestion {
    /// The question shown to the player.
    pub prompt: String,
    /// Option texts in authored order.
    pub options: Vec<String>,
    /// Text of the correct option (matched case- and whitespace-insensitively).
    pub correct: String,
}

impl AuthoredQuestion {
    pub fn new(prompt: &str, options: &[&str], correct: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct: correct.to_string(),
        }
    }
}

/// A question ready to play: options in run order, correct answer by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedQuestion {
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
}

impl ResolvedQuestion {
    /// Build a resolved question directly.
    ///
    /// Returns `None` if `correct_index` does not point at an option.
    pub fn new(prompt: &str, options: Vec<String>, correct_index: usize) -> Option<Self> {
        (correct_index < options.len()).then(|| Self {
            prompt: prompt.to_string(),
            options,
            correct_index,
        })
    }

    /// `correct_index` must come from a lookup into `options`.
    pub(crate) fn located(prompt: &str, options: Vec<String>, correct_index: usize) -> Self {
        debug_assert!(correct_index < options.len());
        Self {
            prompt: prompt.to_string(),
            options,
            correct_index,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Text of the correct option.
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}

/// A named collection of authored questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name, used as the menu title.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Points awarded per correct answer.
    #[serde(default = "default_points")]
    pub points_per_correct: u32,
    #[serde(default)]
    pub questions: Vec<AuthoredQuestion>,
}

fn default_points() -> u32 {
    DEFAULT_POINTS_PER_CORRECT
}

/// Final tally of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub score: u32,
}

/// What the presentation layer needs to render feedback for one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    /// Whether the submitted choice was the correct one.
    pub correct: bool,
    /// Index of the correct option in the answered question.
    pub correct_index: usize,
    /// Whether this answer completed the run.
    pub finished: bool,
}

/// Outbound summary of one completed run.
///
/// The store assigns the timestamp; the session does not keep this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub nickname: Nickname,
    pub score: u32,
    pub correct: u32,
    pub incorrect: u32,
}

impl ScoreRecord {
    pub fn new(nickname: Nickname, result: &SessionResult) -> Self {
        Self {
            nickname,
            score: result.score,
            correct: result.correct_count,
            incorrect: result.incorrect_count,
        }
    }
}

/// A score record as held by a leaderboard store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredScore {
    pub id: Uuid,
    pub nickname: String,
    pub score: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub timestamp: DateTime<Utc>,
}

impl StoredScore {
    /// Stamp an outbound record with a fresh id and the given time.
    pub fn from_record(record: &ScoreRecord, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            nickname: record.nickname.to_string(),
            score: record.score,
            correct: record.correct,
            incorrect: record.incorrect,
            timestamp,
        }
    }
}

/// Sort stored scores for display: highest score first, earlier entry wins ties.
pub fn rank_scores(scores: &mut [StoredScore]) {
    scores.sort_by(|a, b| b.score.cmp(&a.score).then(a.timestamp.cmp(&b.timestamp)));
}
