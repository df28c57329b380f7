//! Quiz session state machine.
//!
//! One `QuizSession` holds the mutable state of a run: the resolved question
//! list, the question pointer, and the correct/incorrect tallies. Answering
//! is a single atomic transition that scores the current question and
//! advances the pointer, so a repeated call can never count the same
//! question twice; it applies to the next question instead.

use std::fmt;

use crate::error::QuizError;
use crate::model::{AnswerFeedback, ResolvedQuestion, SessionResult};
use crate::DEFAULT_POINTS_PER_CORRECT;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    InProgress,
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::InProgress => write!(f, "in progress"),
            SessionState::Completed => write!(f, "completed"),
        }
    }
}

/// The state of a single quiz run.
///
/// Invariants: `current_index <= questions.len()` and
/// `correct_count + incorrect_count == current_index`.
#[derive(Debug, Clone)]
pub struct QuizSession {
    state: SessionState,
    questions: Vec<ResolvedQuestion>,
    current_index: usize,
    correct_count: u32,
    incorrect_count: u32,
    points_per_correct: u32,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(DEFAULT_POINTS_PER_CORRECT)
    }
}

impl QuizSession {
    pub fn new(points_per_correct: u32) -> Self {
        Self {
            state: SessionState::Idle,
            questions: Vec::new(),
            current_index: 0,
            correct_count: 0,
            incorrect_count: 0,
            points_per_correct,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn points_per_correct(&self) -> u32 {
        self.points_per_correct
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    /// Number of questions in the current (or last) run.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 1-based number of the current question and the total, for
    /// "Question X of N" headers. `None` unless a run is in progress.
    pub fn progress(&self) -> Option<(usize, usize)> {
        (self.state == SessionState::InProgress)
            .then(|| (self.current_index + 1, self.questions.len()))
    }

    /// Begin a new run over an already-resolved question list.
    ///
    /// An empty list completes immediately with a zero result.
    pub fn start(&mut self, questions: Vec<ResolvedQuestion>) -> Result<(), QuizError> {
        if self.state == SessionState::InProgress {
            return Err(self.invalid("start a run"));
        }

        self.questions = questions;
        self.current_index = 0;
        self.correct_count = 0;
        self.incorrect_count = 0;
        self.state = if self.questions.is_empty() {
            SessionState::Completed
        } else {
            SessionState::InProgress
        };

        tracing::debug!(questions = self.questions.len(), state = %self.state, "run started");
        Ok(())
    }

    /// The question the player should answer next.
    pub fn current_question(&self) -> Result<&ResolvedQuestion, QuizError> {
        match self.state {
            SessionState::Idle => Err(self.invalid("show a question")),
            SessionState::InProgress | SessionState::Completed => self
                .questions
                .get(self.current_index)
                .ok_or(QuizError::OutOfRange {
                    index: self.current_index,
                    len: self.questions.len(),
                }),
        }
    }

    /// Score `choice` against the current question and advance.
    ///
    /// Nothing changes when an error is returned.
    pub fn submit_answer(&mut self, choice: usize) -> Result<AnswerFeedback, QuizError> {
        if self.state != SessionState::InProgress {
            return Err(self.invalid("submit an answer"));
        }

        let question = self.current_question()?;
        if choice >= question.options().len() {
            return Err(QuizError::InvalidInput {
                choice,
                options: question.options().len(),
            });
        }

        let correct = question.is_correct(choice);
        let correct_index = question.correct_index();

        if correct {
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }
        self.current_index += 1;

        let finished = self.current_index == self.questions.len();
        if finished {
            self.state = SessionState::Completed;
            tracing::info!(
                correct = self.correct_count,
                incorrect = self.incorrect_count,
                score = self.score(),
                "run completed"
            );
        }

        Ok(AnswerFeedback {
            correct,
            correct_index,
            finished,
        })
    }

    /// Final tally of a completed run.
    pub fn result(&self) -> Result<SessionResult, QuizError> {
        if self.state != SessionState::Completed {
            return Err(self.invalid("read the result"));
        }
        Ok(SessionResult {
            correct_count: self.correct_count,
            incorrect_count: self.incorrect_count,
            score: self.score(),
        })
    }

    /// Drop an unfinished run and return to `Idle`.
    pub fn abandon(&mut self) -> Result<(), QuizError> {
        if self.state != SessionState::InProgress {
            return Err(self.invalid("abandon a run"));
        }
        tracing::debug!(answered = self.current_index, "run abandoned");
        *self = Self::new(self.points_per_correct);
        Ok(())
    }

    fn score(&self) -> u32 {
        self.correct_count.saturating_mul(self.points_per_correct)
    }

    fn invalid(&self, operation: &'static str) -> QuizError {
        QuizError::InvalidState {
            operation,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(prompt: &str, options: &[&str], correct_index: usize) -> ResolvedQuestion {
        ResolvedQuestion::new(
            prompt,
            options.iter().map(|o| o.to_string()).collect(),
            correct_index,
        )
        .unwrap()
    }

    fn two_questions() -> Vec<ResolvedQuestion> {
        vec![
            question("Q1", &["A", "B"], 1),
            question("Q2", &["X", "Y"], 0),
        ]
    }

    fn assert_invariants(session: &QuizSession) {
        assert!(session.current_index() <= session.len());
        assert_eq!(
            (session.correct_count() + session.incorrect_count()) as usize,
            session.current_index()
        );
    }

    #[test]
    fn two_question_run_end_to_end() {
        let mut session = QuizSession::new(50);
        session.start(two_questions()).unwrap();
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.progress(), Some((1, 2)));

        let first = session.submit_answer(1).unwrap();
        assert!(first.correct);
        assert!(!first.finished);
        assert_eq!(session.current_question().unwrap().prompt(), "Q2");

        let second = session.submit_answer(1).unwrap();
        assert!(!second.correct);
        assert_eq!(second.correct_index, 0);
        assert!(second.finished);

        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(
            session.result().unwrap(),
            SessionResult {
                correct_count: 1,
                incorrect_count: 1,
                score: 50,
            }
        );
    }

    #[test]
    fn empty_run_completes_immediately() {
        let mut session = QuizSession::default();
        session.start(vec![]).unwrap();
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(
            session.result().unwrap(),
            SessionResult {
                correct_count: 0,
                incorrect_count: 0,
                score: 0,
            }
        );
        assert_eq!(
            session.current_question().unwrap_err(),
            QuizError::OutOfRange { index: 0, len: 0 }
        );
    }

    #[test]
    fn submit_before_start_is_rejected() {
        let mut session = QuizSession::default();
        let err = session.submit_answer(0).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidState {
                state: SessionState::Idle,
                ..
            }
        ));
        assert!(matches!(
            session.current_question().unwrap_err(),
            QuizError::InvalidState { .. }
        ));
        assert!(session.result().is_err());
    }

    #[test]
    fn out_of_bounds_choice_does_not_mutate() {
        let mut session = QuizSession::default();
        session.start(two_questions()).unwrap();

        let err = session.submit_answer(2).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidInput {
                choice: 2,
                options: 2
            }
        );
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.correct_count() + session.incorrect_count(), 0);
    }

    #[test]
    fn repeated_submit_applies_to_next_question() {
        let mut session = QuizSession::default();
        session.start(two_questions()).unwrap();

        session.submit_answer(1).unwrap();
        session.submit_answer(1).unwrap();
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.incorrect_count(), 1);

        // A third click after completion is rejected and changes nothing.
        let err = session.submit_answer(1).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidState {
                state: SessionState::Completed,
                ..
            }
        ));
        assert_eq!(session.current_index(), 2);
        assert_invariants(&session);
    }

    #[test]
    fn current_question_after_completion_is_out_of_range() {
        let mut session = QuizSession::default();
        session.start(two_questions()).unwrap();
        session.submit_answer(0).unwrap();
        session.submit_answer(0).unwrap();
        assert_eq!(
            session.current_question().unwrap_err(),
            QuizError::OutOfRange { index: 2, len: 2 }
        );
        assert_eq!(session.progress(), None);
    }

    #[test]
    fn invariants_hold_for_any_answer_sequence() {
        let questions: Vec<_> = (0..6)
            .map(|i| question(&format!("Q{i}"), &["a", "b", "c", "d", "e"], i % 5))
            .collect();

        for pattern in 0..64u32 {
            let mut session = QuizSession::new(10);
            session.start(questions.clone()).unwrap();
            let mut expected_correct = 0;

            for (i, q) in questions.iter().enumerate() {
                let choice = if pattern & (1 << i) != 0 {
                    q.correct_index()
                } else {
                    (q.correct_index() + 1) % 5
                };
                if choice == q.correct_index() {
                    expected_correct += 1;
                }
                session.submit_answer(choice).unwrap();
                assert_invariants(&session);
            }

            let result = session.result().unwrap();
            assert_eq!(result.correct_count, expected_correct);
            assert_eq!(result.score, expected_correct * 10);
        }
    }

    #[test]
    fn start_is_rejected_mid_run_but_allowed_after_completion() {
        let mut session = QuizSession::default();
        session.start(two_questions()).unwrap();
        session.submit_answer(1).unwrap();

        let err = session.start(two_questions()).unwrap_err();
        assert!(matches!(err, QuizError::InvalidState { .. }));
        assert_eq!(session.current_index(), 1);

        session.submit_answer(0).unwrap();
        assert_eq!(session.result().unwrap().correct_count, 2);

        session.start(two_questions()).unwrap();
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.correct_count(), 0);
    }

    #[test]
    fn abandon_returns_to_idle() {
        let mut session = QuizSession::new(20);
        assert!(session.abandon().is_err());

        session.start(two_questions()).unwrap();
        session.submit_answer(1).unwrap();
        session.abandon().unwrap();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.points_per_correct(), 20);
        assert!(session.is_empty());
        session.start(two_questions()).unwrap();
    }

    #[test]
    fn oversized_points_saturate_instead_of_overflowing() {
        let mut session = QuizSession::new(3_000_000_000);
        session.start(two_questions()).unwrap();
        session.submit_answer(1).unwrap();
        let feedback = session.submit_answer(0).unwrap();
        assert!(feedback.finished);

        let result = session.result().unwrap();
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.score, u32::MAX);
    }
}
