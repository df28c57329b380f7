//! itquiz CLI: the IT best-practices quiz in a terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "itquiz", version, about = "IT best-practices quiz with a leaderboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the quiz
    Play {
        /// Question bank .toml file (default: bundled IT best-practices bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Nickname for the leaderboard (prompted if omitted)
        #[arg(long)]
        nickname: Option<String>,

        /// Seed for option shuffling (reproducible runs)
        #[arg(long)]
        seed: Option<u64>,

        /// Keep options in authored order
        #[arg(long)]
        no_shuffle: bool,

        /// Do not submit the score to the leaderboard
        #[arg(long)]
        no_submit: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the top scores
    Leaderboard {
        /// Number of entries (default: leaderboard_limit from config)
        #[arg(long)]
        limit: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("itquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            bank,
            nickname,
            seed,
            no_shuffle,
            no_submit,
            config,
        } => {
            commands::play::execute(commands::play::PlayArgs {
                bank,
                nickname,
                seed,
                no_shuffle,
                no_submit,
                config,
            })
            .await
        }
        Commands::Leaderboard { limit, config } => {
            commands::leaderboard::execute(limit, config).await
        }
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
