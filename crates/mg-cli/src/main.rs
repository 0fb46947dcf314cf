//! CLI frontend for the Microgauntlet session engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mg",
    about = "Microgauntlet: rapid-fire microgame sessions",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log session transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the microgames in a catalog
    List {
        /// Catalog file (JSON)
        #[arg(short, long, default_value = "microgames.json")]
        catalog: PathBuf,
    },

    /// Validate a catalog without playing it
    Check {
        /// Catalog file (JSON)
        #[arg(short, long, default_value = "microgames.json")]
        catalog: PathBuf,
    },

    /// Play a session interactively from the terminal
    Play {
        /// Catalog file (JSON)
        #[arg(short, long, default_value = "microgames.json")]
        catalog: PathBuf,

        /// RNG seed for the play order
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Lives per game
        #[arg(short, long, default_value = "3")]
        lives: u32,

        /// High score file (JSON); scores are not kept without it
        #[arg(long)]
        scores: Option<PathBuf>,

        /// Only play microgames marked as unlocked
        #[arg(long)]
        unlocked_only: bool,
    },

    /// Play a session automatically with random outcomes
    Simulate {
        /// Catalog file (JSON)
        #[arg(short, long, default_value = "microgames.json")]
        catalog: PathBuf,

        /// RNG seed for the play order and the outcomes
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Lives per game
        #[arg(short, long, default_value = "3")]
        lives: u32,

        /// Probability of winning each round (0.0 to 1.0)
        #[arg(short, long, default_value = "0.7")]
        win_rate: f64,

        /// Stop after this many rounds even if lives remain
        #[arg(short, long, default_value = "100")]
        max_rounds: u32,

        /// Milliseconds each screen stays up
        #[arg(long, default_value = "0")]
        delay_ms: u64,

        /// Only play microgames marked as unlocked
        #[arg(long)]
        unlocked_only: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::List { catalog } => commands::list::run(&catalog),
        Commands::Check { catalog } => commands::check::run(&catalog),
        Commands::Play {
            catalog,
            seed,
            lives,
            scores,
            unlocked_only,
        } => {
            commands::play::run(&catalog, seed, lives, scores.as_deref(), unlocked_only).await
        }
        Commands::Simulate {
            catalog,
            seed,
            lives,
            win_rate,
            max_rounds,
            delay_ms,
            unlocked_only,
        } => {
            let options = commands::simulate::Options {
                seed,
                lives,
                win_rate,
                max_rounds,
                delay_ms,
                unlocked_only,
            };
            commands::simulate::run(&catalog, &options).await
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
