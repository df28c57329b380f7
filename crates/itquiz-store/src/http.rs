//! Remote HTTP leaderboard.
//!
//! Speaks a small JSON API:
//! - `POST {base}/scores` with `{nickname, score, correct, incorrect}`,
//!   answered by the stored record (server-assigned `id` and `timestamp`).
//! - `GET {base}/scores?limit=N`, answered by stored records, best first.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use itquiz_core::model::{rank_scores, ScoreRecord, StoredScore};
use itquiz_core::traits::ScoreStore;

use crate::error::StoreError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Leaderboard behind an HTTP API.
pub struct HttpScoreStore {
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpScoreStore {
    pub fn new(base_url: &str, api_key: Option<String>) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(!base_url.trim().is_empty(), "leaderboard base_url is empty");

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            timeout_secs,
            client,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            StoreError::Network(format!("leaderboard not reachable at {}", self.base_url))
        } else {
            StoreError::Network(e.to_string())
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Unauthorized(body));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status,
                message: body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ScoreStore for HttpScoreStore {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, record), fields(score = record.score))]
    async fn submit_score(&self, record: &ScoreRecord) -> anyhow::Result<StoredScore> {
        let request = self
            .client
            .post(format!("{}/scores", self.base_url))
            .json(record);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = Self::check_status(response).await?;

        let stored: StoredScore = response
            .json()
            .await
            .map_err(|e| StoreError::Corrupt(format!("failed to parse stored score: {e}")))?;

        tracing::debug!(id = %stored.id, "score accepted by leaderboard");
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn fetch_top_scores(&self, limit: usize) -> anyhow::Result<Vec<StoredScore>> {
        let request = self
            .client
            .get(format!("{}/scores?limit={limit}", self.base_url));

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = Self::check_status(response).await?;

        let mut scores: Vec<StoredScore> = response
            .json()
            .await
            .map_err(|e| StoreError::Corrupt(format!("failed to parse leaderboard: {e}")))?;

        rank_scores(&mut scores);
        scores.truncate(limit);
        Ok(scores)
    }
}
