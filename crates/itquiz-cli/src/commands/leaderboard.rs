//! The `itquiz leaderboard` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use itquiz_core::model::StoredScore;
use itquiz_store::config::load_config_from;
use itquiz_store::create_store;

pub async fn execute(limit: Option<usize>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let limit = limit.unwrap_or(config.leaderboard_limit);
    anyhow::ensure!(limit >= 1, "limit must be at least 1");

    let store = create_store(&config.leaderboard)?;
    let scores = store.fetch_top_scores(limit).await?;

    if scores.is_empty() {
        println!("No scores yet. Run `itquiz play` to set one.");
    } else {
        println!("{}", render_table(&scores));
    }

    Ok(())
}

/// Leaderboard rows: rank, nickname, score, answers, and local time.
pub fn render_table(scores: &[StoredScore]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Player", "Score", "Correct", "Incorrect", "When"]);

    for (rank, score) in scores.iter().enumerate() {
        let when = score
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M");
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&score.nickname),
            Cell::new(score.score),
            Cell::new(score.correct),
            Cell::new(score.incorrect),
            Cell::new(when.to_string()),
        ]);
    }

    table
}
