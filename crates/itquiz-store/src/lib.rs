//! itquiz-store: Leaderboard store backends.
//!
//! Implements the `ScoreStore` trait for a remote HTTP leaderboard, a local
//! JSON file, and an in-memory store, plus the configuration that picks one.

pub mod config;
pub mod error;
pub mod file;
pub mod http;
pub mod memory;

pub use config::{create_store, load_config, ItquizConfig, StoreConfig};
pub use error::StoreError;
