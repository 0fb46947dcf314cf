//! Interactive session driven from stdin.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use colored::Colorize;

use mg_core::RoundOutcome;
use mg_session::{
    HighScore, JsonScoreStore, MemoryScoreStore, Phase, ScoreStore, Session, SessionConfig,
    SessionResult,
};

use super::ConsoleLoader;

const HELP: &str = "\
  start          begin a game
  next           command screen done, play the microgame
  win | lose     report the round's outcome
  tick <secs>    advance the round timer
  bonus <secs>   add time to the round
  pause | resume stop or restart the round timer
  status         show lives, score, and timer
  restart        start over with full lives
  quit           return to the title screen
  exit           leave";

pub async fn run(
    path: &Path,
    seed: u64,
    lives: u32,
    scores: Option<&Path>,
    unlocked_only: bool,
) -> Result<(), String> {
    let catalog = super::load_catalog(path, unlocked_only)?;
    let config = SessionConfig::default()
        .with_seed(seed)
        .with_lives(lives)
        .with_max_events(500);
    let session = Session::new(catalog, ConsoleLoader::new(Duration::ZERO, true), config);

    match scores {
        Some(scores) => repl(session, JsonScoreStore::new(scores)).await,
        None => repl(session, MemoryScoreStore::default()).await,
    }
}

async fn repl(
    mut session: Session<ConsoleLoader>,
    mut store: impl ScoreStore,
) -> Result<(), String> {
    println!("  {}", "MICROGAUNTLET".bold());
    println!(
        "  {} microgames | High score: {}",
        session.catalog().len(),
        store.load()
    );
    println!("  Type 'help' for commands, 'exit' to leave.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("{}> ", session.phase().to_string().dimmed());
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let mut words = input.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        let arg = words.next();

        if verb == "exit" || verb == "q" {
            break;
        }

        let was_over = session.phase() == Phase::GameOver;
        if let Err(e) = dispatch(&mut session, &verb, arg).await {
            println!("  {}", e.yellow());
            continue;
        }
        if !was_over && session.phase() == Phase::GameOver {
            let score = session.score();
            match HighScore::record(&mut store, score) {
                Ok(high) if high.is_new => println!("  {}", "New high score!".green().bold()),
                Ok(high) => println!("  High score: {}", high.value),
                Err(e) => println!("  {}", format!("could not save high score: {e}").yellow()),
            }
        }
    }

    Ok(())
}

async fn dispatch(
    session: &mut Session<ConsoleLoader>,
    verb: &str,
    arg: Option<&str>,
) -> Result<(), String> {
    match verb {
        "help" | "?" => println!("{HELP}"),
        "start" => session.start_game().await.map_err(|e| e.to_string())?,
        "next" | "go" => session
            .load_next_microgame()
            .await
            .map_err(|e| e.to_string())?,
        "win" => {
            let outcome = session.game_won().await;
            report(session, outcome)?;
        }
        "lose" => {
            let outcome = session.game_lost().await;
            report(session, outcome)?;
        }
        "tick" => {
            let seconds = parse_seconds(arg)?;
            let outcome = session.tick(seconds).await.map_err(|e| e.to_string())?;
            match (outcome, session.round()) {
                (Some(outcome), _) => report(session, Ok(Some(outcome)))?,
                (None, Some(round)) => println!("  {:.1}s left", round.remaining()),
                (None, None) => println!("  No round in progress."),
            }
        }
        "bonus" => {
            let seconds = parse_seconds(arg)?;
            match session.add_bonus_time(seconds) {
                Some(remaining) => println!("  {remaining:.1}s left"),
                None => println!("  No round in progress."),
            }
        }
        "pause" => session.set_timer_running(false),
        "resume" => session.set_timer_running(true),
        "status" => print_status(session),
        "restart" => session.restart_game().await.map_err(|e| e.to_string())?,
        "quit" => session.quit_game().await.map_err(|e| e.to_string())?,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    }
    Ok(())
}

fn report(
    session: &Session<ConsoleLoader>,
    outcome: SessionResult<Option<RoundOutcome>>,
) -> Result<(), String> {
    match outcome.map_err(|e| e.to_string())? {
        Some(RoundOutcome::Win) => println!("  Won! Score: {}", session.score()),
        Some(outcome) => println!("  Lost ({outcome}). Lives: {}", session.lives()),
        None => println!("  {}", "(ignored: no round in progress)".dimmed()),
    }
    Ok(())
}

fn parse_seconds(arg: Option<&str>) -> Result<f64, String> {
    let raw = arg.ok_or("expected a number of seconds")?;
    raw.parse::<f64>()
        .map_err(|_| format!("'{raw}' is not a number of seconds"))
}

fn print_status(session: &Session<ConsoleLoader>) {
    println!(
        "  Phase: {} | Lives: {} | Score: {}",
        session.phase(),
        session.lives(),
        session.score()
    );
    if let Some(microgame) = session.current() {
        println!("  Microgame: {microgame}");
    }
    if let Some(round) = session.round() {
        let state = if round.is_running() { "running" } else { "paused" };
        println!(
            "  Timer: {:.1}s of {:.1}s ({state})",
            round.remaining(),
            round.limit()
        );
    }
}
