//! The `itquiz play` command.
//!
//! A thin terminal adapter over [`Game`]: the menu, quiz, and result screens
//! only render what the session exposes and feed answers back into it.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use itquiz_core::model::QuestionBank;
use itquiz_core::parser;
use itquiz_core::traits::{persist_result, PersistOutcome, ScoreStore};
use itquiz_core::{Game, Nickname, QuizError};
use itquiz_store::config::load_config_from;
use itquiz_store::create_store;

use super::leaderboard::render_table;

pub struct PlayArgs {
    pub bank: Option<PathBuf>,
    pub nickname: Option<String>,
    pub seed: Option<u64>,
    pub no_shuffle: bool,
    pub no_submit: bool,
    pub config: Option<PathBuf>,
}

/// Presentation settings for one play session.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub shuffle: bool,
    pub feedback_delay: Duration,
    pub leaderboard_limit: usize,
}

enum RunEnd {
    Completed,
    Quit,
}

pub async fn execute(args: PlayArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let bank = load_bank(args.bank.as_deref().or(config.bank.as_deref()))?;

    let store = if args.no_submit {
        None
    } else {
        Some(create_store(&config.leaderboard)?)
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let options = PlayOptions {
        shuffle: !args.no_shuffle,
        feedback_delay: Duration::from_millis(config.feedback_delay_ms),
        leaderboard_limit: config.leaderboard_limit,
    };

    let mut game = Game::new(bank);
    if let Some(raw) = args.nickname.as_deref() {
        game.set_nickname(Nickname::sanitize_or_anonymous(Some(raw)));
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run(&mut game, &mut input, &mut out, store.as_deref(), &options, &mut rng).await
}

fn load_bank(path: Option<&Path>) -> Result<QuestionBank> {
    match path {
        Some(path) => parser::parse_bank(path),
        None => parser::default_bank(),
    }
}

/// Menu → quiz → result, repeated while the player wants another run.
pub async fn run<R: BufRead, W: Write>(
    game: &mut Game,
    input: &mut R,
    out: &mut W,
    store: Option<&dyn ScoreStore>,
    options: &PlayOptions,
    rng: &mut StdRng,
) -> Result<()> {
    loop {
        menu_screen(game, out)?;

        if game.nickname().is_none() {
            write!(out, "Enter a nickname for the leaderboard: ")?;
            out.flush()?;
            let raw = read_line(input)?;
            game.set_nickname(Nickname::sanitize_or_anonymous(raw.as_deref()));
        }
        if let Some(nickname) = game.nickname() {
            writeln!(out, "Player: {nickname}")?;
        }

        if options.shuffle {
            game.start_run(rng)?;
        } else {
            game.start_run_in_order()?;
        }

        if let RunEnd::Quit = quiz_screen(game, input, out, options).await? {
            writeln!(out, "\nRun abandoned.")?;
            return Ok(());
        }

        result_screen(game, out)?;

        if let Some(store) = store {
            submit_and_show(game, store, out, options.leaderboard_limit).await?;
        }

        write!(out, "\nPlay again? [y/N] ")?;
        out.flush()?;
        let again = read_line(input)?
            .map(|answer| answer.trim().eq_ignore_ascii_case("y"))
            .unwrap_or(false);
        if !again {
            return Ok(());
        }
    }
}

fn menu_screen<W: Write>(game: &Game, out: &mut W) -> io::Result<()> {
    let bank = game.bank();
    writeln!(out, "\n=== {} ===", bank.name)?;
    if !bank.description.is_empty() {
        writeln!(out, "{}", bank.description)?;
    }
    writeln!(
        out,
        "{} questions, {} points per correct answer.",
        bank.questions.len(),
        bank.points_per_correct
    )
}

async fn quiz_screen<R: BufRead, W: Write>(
    game: &mut Game,
    input: &mut R,
    out: &mut W,
    options: &PlayOptions,
) -> Result<RunEnd> {
    while let Some((number, total)) = game.session().progress() {
        let question = game.session().current_question()?.clone();
        let count = question.options().len();

        writeln!(out, "\nQuestion {number} of {total}")?;
        writeln!(out, "{}", question.prompt())?;
        for (i, option) in question.options().iter().enumerate() {
            writeln!(out, "  {}) {option}", i + 1)?;
        }

        let choice = loop {
            write!(out, "Your answer (1-{count}, q to quit): ")?;
            out.flush()?;

            let Some(line) = read_line(input)? else {
                game.session_mut().abandon()?;
                return Ok(RunEnd::Quit);
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                game.session_mut().abandon()?;
                return Ok(RunEnd::Quit);
            }
            match line.parse::<usize>() {
                Ok(n) if n >= 1 => break n - 1,
                _ => writeln!(out, "Please enter a number between 1 and {count}.")?,
            }
        };

        match game.session_mut().submit_answer(choice) {
            Ok(feedback) => {
                if feedback.correct {
                    writeln!(out, "Correct! 👍")?;
                } else {
                    writeln!(
                        out,
                        "Wrong. Correct answer: {}",
                        question.options()[feedback.correct_index]
                    )?;
                }
                if !feedback.finished && !options.feedback_delay.is_zero() {
                    out.flush()?;
                    tokio::time::sleep(options.feedback_delay).await;
                }
            }
            Err(QuizError::InvalidInput { options: available, .. }) => {
                writeln!(out, "That option does not exist; pick 1 to {available}.")?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(RunEnd::Completed)
}

fn result_screen<W: Write>(game: &Game, out: &mut W) -> Result<()> {
    let result = game.session().result()?;
    let points = game.session().points_per_correct();

    writeln!(out, "\n=== Final result ===")?;
    writeln!(out, "Correct: {}", result.correct_count)?;
    writeln!(out, "Incorrect: {}", result.incorrect_count)?;
    writeln!(
        out,
        "Score: {}  ({} x {points})",
        result.score, result.correct_count
    )?;
    Ok(())
}

/// Hand the finished run to the store. Store problems are notices only.
async fn submit_and_show<W: Write>(
    game: &Game,
    store: &dyn ScoreStore,
    out: &mut W,
    limit: usize,
) -> Result<()> {
    let record = match game.score_record() {
        Ok(record) => record,
        Err(e) => {
            writeln!(out, "Score not submitted: {e}")?;
            return Ok(());
        }
    };

    match persist_result(store, &record).await {
        PersistOutcome::Saved(stored) => {
            writeln!(out, "Score saved for {}.", stored.nickname)?;
            match store.fetch_top_scores(limit).await {
                Ok(scores) => writeln!(out, "\nLeaderboard\n{}", render_table(&scores))?,
                Err(e) => {
                    tracing::warn!("failed to load leaderboard: {e:#}");
                    writeln!(out, "Could not load leaderboard: {e:#}")?;
                }
            }
        }
        PersistOutcome::Failed(message) => {
            writeln!(out, "Could not save score: {message}")?;
        }
    }
    Ok(())
}

/// One line of input without its terminator; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
