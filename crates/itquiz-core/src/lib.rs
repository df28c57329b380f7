//! itquiz-core: Question bank normalizer and quiz session state machine.
//!
//! This crate defines the quiz data model, the shuffling and
//! correctness-resolution logic, the per-run session state machine, and the
//! leaderboard trait that store backends implement.

pub mod error;
pub mod game;
pub mod model;
pub mod nickname;
pub mod normalize;
pub mod parser;
pub mod session;
pub mod traits;

pub use error::QuizError;
pub use game::Game;
pub use nickname::Nickname;
pub use session::{QuizSession, SessionState};

/// Points awarded per correct answer unless a bank overrides it.
pub const DEFAULT_POINTS_PER_CORRECT: u32 = 50;
