//! Unattended session with random round outcomes.

use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mg_core::{RoundOutcome, RoundTimer};
use mg_session::{Session, SessionConfig};

use super::ConsoleLoader;

/// Seconds of timer advanced per simulated frame.
const FRAME: f64 = 0.5;

pub struct Options {
    pub seed: u64,
    pub lives: u32,
    pub win_rate: f64,
    pub max_rounds: u32,
    pub delay_ms: u64,
    pub unlocked_only: bool,
}

struct Round {
    scene: String,
    limit: f64,
    outcome: RoundOutcome,
    lives: u32,
    score: u32,
}

pub async fn run(path: &Path, options: &Options) -> Result<(), String> {
    if !(0.0..=1.0).contains(&options.win_rate) {
        return Err(format!(
            "win rate must be between 0 and 1, got {}",
            options.win_rate
        ));
    }
    let catalog = super::load_catalog(path, options.unlocked_only)?;
    let config = SessionConfig::default()
        .with_seed(options.seed)
        .with_lives(options.lives);
    let loader = ConsoleLoader::new(Duration::from_millis(options.delay_ms), false);
    let mut session = Session::new(catalog, loader, config);
    // Outcomes draw from their own stream so the play order matches `mg play`.
    let mut rng = StdRng::seed_from_u64(options.seed.wrapping_add(1));

    session.start_game().await.map_err(|e| e.to_string())?;

    let mut rounds = Vec::new();
    while session.is_active() && rounds.len() < options.max_rounds as usize {
        let scene = session
            .current()
            .map(|m| m.scene.clone())
            .unwrap_or_default();
        session
            .load_next_microgame()
            .await
            .map_err(|e| e.to_string())?;
        let limit = session.round().map_or(0.0, RoundTimer::limit);

        let outcome = if rng.random_bool(options.win_rate) {
            session.game_won().await
        } else if rng.random_bool(0.5) {
            session.game_lost().await
        } else {
            run_out_clock(&mut session).await
        };
        let Some(outcome) = outcome.map_err(|e| e.to_string())? else {
            break;
        };

        rounds.push(Round {
            scene,
            limit,
            outcome,
            lives: session.lives(),
            score: session.score(),
        });
    }

    println!(
        "  {} {}",
        "Simulation".bold(),
        format!(
            "(seed={}, lives={}, win rate={:.2})",
            options.seed,
            session.config().lives,
            options.win_rate
        )
        .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Microgame", "Limit", "Outcome", "Lives", "Score"]);
    for (i, round) in rounds.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            round.scene.clone(),
            format!("{:.1}s", round.limit),
            round.outcome.to_string(),
            round.lives.to_string(),
            round.score.to_string(),
        ]);
    }
    println!("{table}");
    println!();
    println!("  Final score: {}", session.score());
    println!(
        "  {} rounds played, ended in {}",
        rounds.len(),
        session.phase()
    );

    Ok(())
}

/// Tick the round until its countdown expires.
async fn run_out_clock(
    session: &mut Session<ConsoleLoader>,
) -> mg_session::SessionResult<Option<RoundOutcome>> {
    while session.round().is_some() {
        if let Some(outcome) = session.tick(FRAME).await? {
            return Ok(Some(outcome));
        }
    }
    Ok(None)
}
