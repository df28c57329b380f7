//! Local JSON file leaderboard.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use itquiz_core::model::{rank_scores, ScoreRecord, StoredScore};
use itquiz_core::traits::ScoreStore;

use crate::error::StoreError;

/// Leaderboard kept as a JSON array of stored scores on disk.
///
/// A missing file is an empty leaderboard; it is created on first submit.
/// Writes go to a sibling `.tmp` file that is renamed over the original, so
/// readers never see a half-written array.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    async fn read_all(&self) -> Result<Vec<StoredScore>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", self.path.display())))
    }

    async fn write_all(&self, scores: &[StoredScore]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(scores)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, json)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }
}

#[async_trait]
impl ScoreStore for JsonFileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn submit_score(&self, record: &ScoreRecord) -> anyhow::Result<StoredScore> {
        let _guard = self.lock.lock().await;

        let mut scores = self.read_all().await?;
        let stored = StoredScore::from_record(record, Utc::now());
        scores.push(stored.clone());
        self.write_all(&scores).await?;

        tracing::debug!(path = %self.path.display(), total = scores.len(), "score appended");
        Ok(stored)
    }

    async fn fetch_top_scores(&self, limit: usize) -> anyhow::Result<Vec<StoredScore>> {
        let mut scores = {
            let _guard = self.lock.lock().await;
            self.read_all().await?
        };
        rank_scores(&mut scores);
        scores.truncate(limit);
        Ok(scores)
    }
}
