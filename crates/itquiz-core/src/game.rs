//! Game controller: one bank, one player, one session.

use rand::Rng;

use crate::error::QuizError;
use crate::model::{QuestionBank, ScoreRecord};
use crate::nickname::Nickname;
use crate::normalize::{resolve, resolve_in_order};
use crate::session::QuizSession;

/// Owns everything a player's sequence of runs needs.
///
/// Each `start_run` reshuffles the bank, so consecutive runs get
/// independent option orders.
#[derive(Debug, Clone)]
pub struct Game {
    bank: QuestionBank,
    nickname: Option<Nickname>,
    session: QuizSession,
}

impl Game {
    pub fn new(bank: QuestionBank) -> Self {
        let session = QuizSession::new(bank.points_per_correct);
        Self {
            bank,
            nickname: None,
            session,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn nickname(&self) -> Option<&Nickname> {
        self.nickname.as_ref()
    }

    pub fn set_nickname(&mut self, nickname: Nickname) {
        self.nickname = Some(nickname);
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    /// Resolve the bank with a fresh shuffle and start a run.
    pub fn start_run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), QuizError> {
        let questions = resolve(&self.bank.questions, rng)?;
        self.session.start(questions)
    }

    /// Start a run with options in authored order.
    pub fn start_run_in_order(&mut self) -> Result<(), QuizError> {
        let questions = resolve_in_order(&self.bank.questions)?;
        self.session.start(questions)
    }

    /// Build the outbound record for the completed run.
    pub fn score_record(&self) -> Result<ScoreRecord, QuizError> {
        let result = self.session.result()?;
        let nickname = self.nickname.clone().ok_or(QuizError::MissingNickname)?;
        Ok(ScoreRecord::new(nickname, &result))
    }
}
