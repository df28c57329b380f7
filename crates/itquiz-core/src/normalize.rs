//! Question bank normalizer.
//!
//! Turns authored questions into resolved ones: each question's options are
//! shuffled independently and the correct index is found again by matching
//! normalized text, so a run never depends on authored option order.

use rand::Rng;

use crate::error::QuizError;
use crate::model::{AuthoredQuestion, ResolvedQuestion};

/// Normalize text for answer matching: trim, collapse whitespace, case-fold.
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Unbiased in-place Fisher–Yates shuffle.
///
/// Walks from the last index down to 1, swapping each position with a
/// uniformly chosen index in `0..=i`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Find the single option whose normalized text equals the normalized
/// correct text.
fn locate_correct(prompt: &str, options: &[String], correct: &str) -> Result<usize, QuizError> {
    let target = normalize_text(correct);
    let mut matches = options
        .iter()
        .enumerate()
        .filter(|(_, option)| normalize_text(option) == target)
        .map(|(i, _)| i);

    match (matches.next(), matches.next()) {
        (Some(index), None) => Ok(index),
        (None, _) => Err(QuizError::configuration(
            prompt,
            format!("no option matches correct answer {correct:?}"),
        )),
        (Some(_), Some(_)) => Err(QuizError::configuration(
            prompt,
            format!("correct answer {correct:?} matches more than one option"),
        )),
    }
}

fn check_shape(question: &AuthoredQuestion) -> Result<(), QuizError> {
    if question.options.len() < 2 {
        return Err(QuizError::configuration(
            &question.prompt,
            format!(
                "needs at least 2 options, found {}",
                question.options.len()
            ),
        ));
    }
    Ok(())
}

/// Resolve one question with a fresh shuffle of its options.
pub fn resolve_question<R: Rng + ?Sized>(
    question: &AuthoredQuestion,
    rng: &mut R,
) -> Result<ResolvedQuestion, QuizError> {
    check_shape(question)?;

    let mut options = question.options.clone();
    shuffle(&mut options, rng);
    let correct_index = locate_correct(&question.prompt, &options, &question.correct)?;

    Ok(ResolvedQuestion::located(
        &question.prompt,
        options,
        correct_index,
    ))
}

/// Resolve a whole bank, shuffling every question independently.
pub fn resolve<R: Rng + ?Sized>(
    authored: &[AuthoredQuestion],
    rng: &mut R,
) -> Result<Vec<ResolvedQuestion>, QuizError> {
    let resolved = authored
        .iter()
        .map(|q| resolve_question(q, rng))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(questions = resolved.len(), "resolved question bank");
    Ok(resolved)
}

/// Resolve a whole bank keeping the authored option order.
pub fn resolve_in_order(authored: &[AuthoredQuestion]) -> Result<Vec<ResolvedQuestion>, QuizError> {
    authored
        .iter()
        .map(|q| {
            check_shape(q)?;
            let correct_index = locate_correct(&q.prompt, &q.options, &q.correct)?;
            Ok(ResolvedQuestion::located(
                &q.prompt,
                q.options.clone(),
                correct_index,
            ))
        })
        .collect()
}
