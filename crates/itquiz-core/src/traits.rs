//! Leaderboard store trait.
//!
//! Implemented by the backends in `itquiz-store`. The quiz core only ever
//! hands a finished run's record to a store; it never waits on the outcome
//! to show the result.

use async_trait::async_trait;

use crate::model::{ScoreRecord, StoredScore};

/// A place where completed runs are recorded and ranked.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Human-readable backend name (e.g. "http").
    fn name(&self) -> &str;

    /// Persist one record. The store assigns the id and timestamp.
    async fn submit_score(&self, record: &ScoreRecord) -> anyhow::Result<StoredScore>;

    /// Best `limit` scores, highest first.
    async fn fetch_top_scores(&self, limit: usize) -> anyhow::Result<Vec<StoredScore>>;
}

/// What happened to a submitted score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved(StoredScore),
    /// The store failed; the message is suitable for a player-facing notice.
    Failed(String),
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistOutcome::Saved(_))
    }
}

/// Submit a record once. Failures are logged and returned, never retried.
pub async fn persist_result(store: &dyn ScoreStore, record: &ScoreRecord) -> PersistOutcome {
    match store.submit_score(record).await {
        Ok(stored) => {
            tracing::info!(
                store = store.name(),
                nickname = %stored.nickname,
                score = stored.score,
                "score saved"
            );
            PersistOutcome::Saved(stored)
        }
        Err(e) => {
            tracing::warn!(store = store.name(), error = %format!("{e:#}"), "failed to save score");
            PersistOutcome::Failed(format!("{e:#}"))
        }
    }
}
