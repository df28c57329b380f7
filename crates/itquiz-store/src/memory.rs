//! In-memory leaderboard for tests and offline play.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use itquiz_core::model::{rank_scores, ScoreRecord, StoredScore};
use itquiz_core::traits::ScoreStore;

use crate::error::StoreError;

/// A leaderboard that lives for the process.
///
/// Can be told to fail every submission, which is how the "store is down"
/// path of the game is exercised without a network.
pub struct MemoryScoreStore {
    scores: Mutex<Vec<StoredScore>>,
    failure: Option<String>,
    submit_count: AtomicU32,
}

impl Default for MemoryScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self {
            scores: Mutex::new(Vec::new()),
            failure: None,
            submit_count: AtomicU32::new(0),
        }
    }

    /// A store whose submissions always fail with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Number of submissions attempted, successful or not.
    pub fn submit_count(&self) -> u32 {
        self.submit_count.load(Ordering::Relaxed)
    }

    /// Every stored record in insertion order.
    pub fn all(&self) -> Vec<StoredScore> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StoredScore>> {
        self.scores.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn submit_score(&self, record: &ScoreRecord) -> anyhow::Result<StoredScore> {
        self.submit_count.fetch_add(1, Ordering::Relaxed);

        if let Some(message) = &self.failure {
            return Err(StoreError::Unavailable(message.clone()).into());
        }

        let stored = StoredScore::from_record(record, Utc::now());
        self.lock().push(stored.clone());
        Ok(stored)
    }

    async fn fetch_top_scores(&self, limit: usize) -> anyhow::Result<Vec<StoredScore>> {
        let mut scores = self.all();
        rank_scores(&mut scores);
        scores.truncate(limit);
        Ok(scores)
    }
}
