//! Configuration and store factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use itquiz_core::traits::ScoreStore;

use crate::file::JsonFileStore;
use crate::http::HttpScoreStore;
use crate::memory::MemoryScoreStore;

/// Which leaderboard backend to use.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    Http {
        base_url: String,
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
    File {
        #[serde(default = "default_scores_path")]
        path: PathBuf,
    },
    Memory,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreConfig::Http {
                base_url,
                api_key,
                timeout_secs,
            } => f
                .debug_struct("Http")
                .field("base_url", base_url)
                .field("api_key", &api_key.as_ref().map(|_| "***"))
                .field("timeout_secs", timeout_secs)
                .finish(),
            StoreConfig::File { path } => f.debug_struct("File").field("path", path).finish(),
            StoreConfig::Memory => f.write_str("Memory"),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File {
            path: default_scores_path(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_scores_path() -> PathBuf {
    PathBuf::from("./itquiz-scores.json")
}

/// Top-level itquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItquizConfig {
    /// Where finished runs are recorded.
    #[serde(default)]
    pub leaderboard: StoreConfig,
    /// How many entries the leaderboard shows.
    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: usize,
    /// Pause after answer feedback before the next question, in milliseconds.
    #[serde(default = "default_feedback_delay")]
    pub feedback_delay_ms: u64,
    /// Question bank to play when none is given on the command line.
    #[serde(default)]
    pub bank: Option<PathBuf>,
}

fn default_leaderboard_limit() -> usize {
    10
}
fn default_feedback_delay() -> u64 {
    900
}

impl Default for ItquizConfig {
    fn default() -> Self {
        Self {
            leaderboard: StoreConfig::default(),
            leaderboard_limit: default_leaderboard_limit(),
            feedback_delay_ms: default_feedback_delay(),
            bank: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_store_config(config: &StoreConfig) -> StoreConfig {
    match config {
        StoreConfig::Http {
            base_url,
            api_key,
            timeout_secs,
        } => StoreConfig::Http {
            base_url: resolve_env_vars(base_url),
            api_key: api_key.as_ref().map(|k| resolve_env_vars(k)),
            timeout_secs: *timeout_secs,
        },
        StoreConfig::File { path } => StoreConfig::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
        StoreConfig::Memory => StoreConfig::Memory,
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `itquiz.toml` in the current directory
/// 2. `~/.config/itquiz/config.toml`
///
/// Environment variable overrides: `ITQUIZ_LEADERBOARD_URL`, `ITQUIZ_API_KEY`.
pub fn load_config() -> Result<ItquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ItquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("itquiz.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => parse_config_file(&path)?,
        None => ItquizConfig::default(),
    };

    apply_env_overrides(
        &mut config,
        std::env::var("ITQUIZ_LEADERBOARD_URL").ok(),
        std::env::var("ITQUIZ_API_KEY").ok(),
    );
    config.leaderboard = resolve_store_config(&config.leaderboard);

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<ItquizConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = toml::from_str::<ItquizConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    tracing::debug!(path = %path.display(), leaderboard = ?config.leaderboard, "loaded config");
    Ok(config)
}

/// A leaderboard URL switches the store to HTTP; an API key applies to it.
fn apply_env_overrides(config: &mut ItquizConfig, url: Option<String>, key: Option<String>) {
    if let Some(url) = url {
        let (api_key, timeout_secs) = match &config.leaderboard {
            StoreConfig::Http {
                api_key,
                timeout_secs,
                ..
            } => (api_key.clone(), *timeout_secs),
            _ => (None, default_timeout()),
        };
        config.leaderboard = StoreConfig::Http {
            base_url: url,
            api_key,
            timeout_secs,
        };
    }

    if let Some(key) = key {
        if let StoreConfig::Http { api_key, .. } = &mut config.leaderboard {
            *api_key = Some(key);
        }
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("itquiz"))
}

/// Create a store instance from its configuration.
pub fn create_store(config: &StoreConfig) -> Result<Box<dyn ScoreStore>> {
    match config {
        StoreConfig::Http {
            base_url,
            api_key,
            timeout_secs,
        } => Ok(Box::new(HttpScoreStore::with_timeout(
            base_url,
            api_key.clone(),
            *timeout_secs,
        )?)),
        StoreConfig::File { path } => Ok(Box::new(JsonFileStore::new(path))),
        StoreConfig::Memory => Ok(Box::new(MemoryScoreStore::new())),
    }
}
