//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{AuthoredQuestion, QuestionBank};
use crate::normalize::{normalize_text, resolve_in_order};
use crate::DEFAULT_POINTS_PER_CORRECT;

/// Number of options every bundled question carries.
pub const EXPECTED_OPTIONS: usize = 5;

const DEFAULT_BANK: &str = include_str!("../data/it_best_practices.toml");

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_points")]
    points_per_correct: u32,
}

fn default_points() -> u32 {
    DEFAULT_POINTS_PER_CORRECT
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    options: Vec<String>,
    correct: String,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    anyhow::ensure!(
        parsed.bank.points_per_correct > 0,
        "points_per_correct must be positive in {}",
        source_path.display()
    );
    anyhow::ensure!(
        u32::try_from(parsed.questions.len())
            .ok()
            .and_then(|n| n.checked_mul(parsed.bank.points_per_correct))
            .is_some(),
        "points_per_correct = {} overflows the maximum score for {} questions in {}",
        parsed.bank.points_per_correct,
        parsed.questions.len(),
        source_path.display()
    );

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| AuthoredQuestion {
            prompt: q.prompt,
            options: q.options,
            correct: q.correct,
        })
        .collect();

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        points_per_correct: parsed.bank.points_per_correct,
        questions,
    })
}

/// Recursively load all `.toml` question banks from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    banks.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(banks)
}

/// The ten-question IT best-practices bank that ships with itquiz.
pub fn default_bank() -> Result<QuestionBank> {
    parse_bank_str(DEFAULT_BANK, Path::new("<bundled it_best_practices.toml>"))
}

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The bank plays, but something looks off.
    Warning,
    /// The bank cannot be played.
    Error,
}

/// A finding from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    pub severity: Severity,
    pub message: String,
}

impl ValidationWarning {
    fn warning(question: usize, message: String) -> Self {
        Self {
            question: Some(question),
            severity: Severity::Warning,
            message,
        }
    }
}

/// Validate a question bank for common authoring mistakes.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            severity: Severity::Warning,
            message: "bank has no questions".into(),
        });
    }

    // Check for duplicate prompts
    let mut seen_prompts = HashSet::new();
    for (i, q) in bank.questions.iter().enumerate() {
        if !seen_prompts.insert(normalize_text(&q.prompt)) {
            warnings.push(ValidationWarning::warning(
                i + 1,
                format!("duplicate prompt: {}", q.prompt),
            ));
        }
    }

    for (i, q) in bank.questions.iter().enumerate() {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning::warning(i + 1, "prompt is empty".into()));
        }

        if q.options.len() != EXPECTED_OPTIONS {
            warnings.push(ValidationWarning::warning(
                i + 1,
                format!(
                    "expected {EXPECTED_OPTIONS} options, found {}",
                    q.options.len()
                ),
            ));
        }

        let mut seen_options = HashSet::new();
        for option in &q.options {
            if !seen_options.insert(normalize_text(option)) {
                warnings.push(ValidationWarning::warning(
                    i + 1,
                    format!("duplicate option: {option}"),
                ));
            }
        }

        if let Err(e) = resolve_in_order(std::slice::from_ref(q)) {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                severity: Severity::Error,
                message: e.to_string(),
            });
        }
    }

    warnings
}
