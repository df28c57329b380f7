//! The `itquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use itquiz_core::parser::{self, Severity};

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = if bank_path.is_dir() {
        parser::load_bank_directory(&bank_path)?
    } else {
        vec![parser::parse_bank(&bank_path)?]
    };

    let mut total_warnings = 0;
    let mut total_errors = 0;

    for bank in &banks {
        println!("Question bank: {} ({} questions)", bank.name, bank.questions.len());

        let warnings = parser::validate_bank(bank);
        for w in &warnings {
            let prefix = w
                .question
                .map(|n| format!("  [Q{n}]"))
                .unwrap_or_else(|| "  ".to_string());
            let label = match w.severity {
                Severity::Warning => "WARNING",
                Severity::Error => "ERROR",
            };
            println!("{prefix} {label}: {}", w.message);
        }
        total_errors += warnings
            .iter()
            .filter(|w| w.severity == Severity::Error)
            .count();
        total_warnings += warnings.len();
    }

    anyhow::ensure!(
        total_errors == 0,
        "{total_errors} question(s) cannot be played"
    );

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
