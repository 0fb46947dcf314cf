//! The session orchestrator.
//!
//! `Session` owns lives, score, the shuffle sequencer, and the active round
//! timer. It advances only when the host calls one of its methods: a control
//! entry point (start, restart, quit), an outcome report (won, lost), the
//! command-screen completion signal, or a timer tick. Every transition that
//! changes screens awaits the loader before returning.

use mg_core::descriptor::{MAX_TIME_LIMIT, MIN_TIME_LIMIT};
use mg_core::{Catalog, CatalogError, MicrogameDescriptor, RoundOutcome, RoundTimer, Sequencer};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::log::{SessionEventKind, SessionLog};
use crate::screen::{Screen, ScreenLoader};

/// Where the session is in its state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// On the title screen; no game running.
    #[default]
    Startup,
    /// Showing the next microgame's instruction.
    Command,
    /// A microgame round is being played.
    Microgame,
    /// All lives lost.
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Startup => write!(f, "Startup"),
            Self::Command => write!(f, "Command"),
            Self::Microgame => write!(f, "Microgame"),
            Self::GameOver => write!(f, "GameOver"),
        }
    }
}

/// A microgame session.
pub struct Session<L> {
    sequencer: Sequencer,
    loader: L,
    config: SessionConfig,
    phase: Phase,
    lives: u32,
    score: u32,
    current: Option<usize>,
    active: bool,
    round: Option<RoundTimer>,
    log: SessionLog,
}

impl<L> std::fmt::Debug for Session<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .field("lives", &self.lives)
            .field("score", &self.score)
            .field("active", &self.active)
            .field("current", &self.current().map(|d| d.scene.as_str()))
            .field("events", &self.log.len())
            .finish()
    }
}

impl<L> Session<L> {
    /// Create a session over `catalog` that presents screens through `loader`.
    ///
    /// An empty catalog is reported here but only rejected when a game is
    /// started.
    pub fn new(catalog: Catalog, loader: L, config: SessionConfig) -> Self {
        if catalog.is_empty() {
            error!("microgame catalog is empty; no game can start");
        }
        let sequencer = Sequencer::new(catalog, config.seed);
        let log = SessionLog::new(config.max_events);
        Self {
            sequencer,
            loader,
            phase: Phase::Startup,
            lives: config.lives,
            score: 0,
            current: None,
            active: false,
            round: None,
            log,
            config,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Lives left.
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Rounds won this game.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Return `true` while a game is running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The selected microgame. Only set during the Command and Microgame phases.
    pub fn current(&self) -> Option<&MicrogameDescriptor> {
        match self.phase {
            Phase::Command | Phase::Microgame => self
                .current
                .and_then(|index| self.sequencer.catalog().get(index)),
            Phase::Startup | Phase::GameOver => None,
        }
    }

    /// Timer of the round in progress.
    pub fn round(&self) -> Option<&RoundTimer> {
        self.round.as_ref()
    }

    /// Events recorded so far.
    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    /// The catalog being played.
    pub fn catalog(&self) -> &Catalog {
        self.sequencer.catalog()
    }

    /// The play-order sequencer.
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The screen loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Mutable access to the screen loader.
    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Extend the round in progress. Returns the new remaining time.
    pub fn add_bonus_time(&mut self, seconds: f64) -> Option<f64> {
        self.round
            .as_mut()
            .map(|round| round.add_bonus_time(seconds))
    }

    /// Pause (`false`) or resume (`true`) the round in progress.
    pub fn set_timer_running(&mut self, running: bool) {
        if let Some(round) = self.round.as_mut() {
            round.set_running(running);
        }
    }
}

impl<L: ScreenLoader> Session<L> {
    /// Begin a new game: full lives, zero score, fresh play order.
    ///
    /// Does nothing if a game is already running. Fails with a configuration
    /// error, leaving the phase untouched, if the catalog is empty.
    pub async fn start_game(&mut self) -> SessionResult<()> {
        if self.active {
            debug!(phase = %self.phase, "start ignored, game already running");
            return Ok(());
        }
        if let Err(e) = self.sequencer.reshuffle() {
            error!(error = %e, "cannot start game");
            return Err(e.into());
        }

        self.active = true;
        self.lives = self.config.lives;
        self.score = 0;
        self.round = None;
        info!(lives = self.lives, "game started");
        self.log.record(
            SessionEventKind::Started { lives: self.lives },
            format!("Game started with {} lives", self.lives),
        );
        self.enter_command().await
    }

    /// End the current game, if any, and start a new one.
    pub async fn restart_game(&mut self) -> SessionResult<()> {
        info!(phase = %self.phase, "restarting game");
        self.active = false;
        self.round = None;
        self.start_game().await
    }

    /// Return to the title screen, discarding any round in progress.
    pub async fn quit_game(&mut self) -> SessionResult<()> {
        if self.round.take().is_some() {
            debug!("round in progress discarded");
        }
        self.active = false;
        self.current = None;
        self.phase = Phase::Startup;
        info!(score = self.score, "returned to title");
        self.log
            .record(SessionEventKind::Quit, "Returned to title screen");

        let screen = Screen::Startup {
            scene: self.config.screens.startup.clone(),
        };
        self.present(&screen).await
    }

    /// Signal that the command screen is done: load the selected microgame
    /// and start its countdown from the descriptor's time limit.
    pub async fn load_next_microgame(&mut self) -> SessionResult<()> {
        self.begin_round(None).await
    }

    /// Like [`load_next_microgame`](Self::load_next_microgame), but with a
    /// time limit chosen by the microgame instead of its descriptor.
    ///
    /// The limit must lie within the descriptor bounds (1 to 10 seconds);
    /// otherwise a configuration error is returned and the session stays in
    /// the Command phase.
    pub async fn load_next_microgame_with_limit(&mut self, limit: f64) -> SessionResult<()> {
        self.begin_round(Some(limit)).await
    }

    /// Report that the player won the current round.
    ///
    /// Returns the outcome that was applied, or `None` if the signal was
    /// dropped (no game running, no round in progress, or round already
    /// decided).
    pub async fn game_won(&mut self) -> SessionResult<Option<RoundOutcome>> {
        self.report(RoundOutcome::Win).await
    }

    /// Report that the player lost the current round.
    ///
    /// Returns the outcome that was applied, or `None` if the signal was
    /// dropped.
    pub async fn game_lost(&mut self) -> SessionResult<Option<RoundOutcome>> {
        self.report(RoundOutcome::Lose).await
    }

    /// Advance the round timer by `delta` seconds.
    ///
    /// Returns `Some(RoundOutcome::Timeout)` if the countdown ran out during
    /// this tick and the loss was applied.
    pub async fn tick(&mut self, delta: f64) -> SessionResult<Option<RoundOutcome>> {
        if !self.active {
            return Ok(None);
        }
        let Some(round) = self.round.as_mut() else {
            return Ok(None);
        };
        round.tick(delta);
        self.resolve_round().await
    }

    async fn report(&mut self, outcome: RoundOutcome) -> SessionResult<Option<RoundOutcome>> {
        if !self.active {
            debug!(%outcome, "signal ignored, no game running");
            self.log.record(
                SessionEventKind::SignalIgnored { outcome },
                format!("Ignored {outcome}: no game running"),
            );
            return Ok(None);
        }
        let Some(round) = self.round.as_mut() else {
            debug!(%outcome, phase = %self.phase, "signal ignored, no round in progress");
            self.log.record(
                SessionEventKind::SignalIgnored { outcome },
                format!("Ignored {outcome}: no round in progress"),
            );
            return Ok(None);
        };

        let latched = if outcome.is_win() {
            round.report_win()
        } else {
            round.report_lose()
        };
        if !latched {
            return Ok(None);
        }
        self.resolve_round().await
    }

    /// Apply the round's latched outcome, if one is waiting.
    async fn resolve_round(&mut self) -> SessionResult<Option<RoundOutcome>> {
        let Some(outcome) = self.round.as_mut().and_then(RoundTimer::poll_outcome) else {
            return Ok(None);
        };
        self.round = None;

        let scene = self
            .current()
            .map(|d| d.scene.clone())
            .unwrap_or_default();
        let description = if outcome.is_win() {
            self.score += 1;
            info!(%scene, score = self.score, lives = self.lives, "microgame won");
            format!("Won {scene}! Score: {}", self.score)
        } else {
            self.lives = self.lives.saturating_sub(1);
            info!(%scene, %outcome, lives = self.lives, "microgame lost");
            format!("Lost {scene} ({outcome}). Lives: {}", self.lives)
        };
        self.log.record(
            SessionEventKind::RoundResolved {
                scene,
                outcome,
                lives: self.lives,
                score: self.score,
            },
            description,
        );

        if self.lives == 0 {
            self.game_over().await?;
        } else {
            self.enter_command().await?;
        }
        Ok(Some(outcome))
    }

    /// Select the next microgame and show its command screen.
    async fn enter_command(&mut self) -> SessionResult<()> {
        self.phase = Phase::Command;
        self.current = match self.sequencer.next_index() {
            Ok(index) => Some(index),
            Err(e) => {
                error!(error = %e, "could not select next microgame");
                None
            }
        };

        let Some(microgame) = self.current().cloned() else {
            return self.missing_descriptor().await;
        };
        debug!(scene = %microgame.scene, cycle = self.sequencer.cycles(), "next microgame selected");
        self.log.record(
            SessionEventKind::CommandShown {
                scene: microgame.scene.clone(),
            },
            format!("Command: {}", microgame.command),
        );

        let screen = Screen::Command {
            scene: self.config.screens.command.clone(),
            microgame,
        };
        self.present(&screen).await
    }

    async fn begin_round(&mut self, limit_override: Option<f64>) -> SessionResult<()> {
        if !self.active || self.phase != Phase::Command {
            debug!(phase = %self.phase, active = self.active, "microgame load ignored outside command phase");
            return Ok(());
        }
        let Some(microgame) = self.current().cloned() else {
            return self.missing_descriptor().await;
        };

        let limit = limit_override.unwrap_or(microgame.time_limit);
        let scene = microgame.scene.clone();
        if !limit.is_finite() || !(MIN_TIME_LIMIT..=MAX_TIME_LIMIT).contains(&limit) {
            warn!(%scene, limit, "rejected time limit override");
            return Err(CatalogError::InvalidTimeLimit {
                scene,
                limit,
                min: MIN_TIME_LIMIT,
                max: MAX_TIME_LIMIT,
            }
            .into());
        }

        self.phase = Phase::Microgame;
        info!(%scene, limit, "loading microgame");
        if let Err(e) = self.present(&Screen::Microgame { microgame }).await {
            warn!(%scene, error = %e, "microgame screen failed, back to command phase");
            self.phase = Phase::Command;
            return Err(e);
        }

        self.round = Some(RoundTimer::started(limit));
        self.log.record(
            SessionEventKind::RoundStarted {
                scene: scene.clone(),
                limit,
            },
            format!("Playing {scene} ({limit:.1}s)"),
        );
        Ok(())
    }

    async fn missing_descriptor(&mut self) -> SessionResult<()> {
        error!(phase = %self.phase, "no current microgame set, ending game");
        self.log.record(
            SessionEventKind::MissingDescriptor,
            "No microgame selected; forcing game over",
        );
        self.game_over().await
    }

    async fn game_over(&mut self) -> SessionResult<()> {
        self.active = false;
        self.round = None;
        self.current = None;
        self.phase = Phase::GameOver;
        info!(score = self.score, "game over");
        self.log.record(
            SessionEventKind::GameOver { score: self.score },
            format!("Game over! Final score: {}", self.score),
        );

        let screen = Screen::GameOver {
            scene: self.config.screens.game_over.clone(),
            score: self.score,
        };
        self.present(&screen).await
    }

    /// Load `screen` and wait for it. Screens with no scene name are skipped.
    async fn present(&mut self, screen: &Screen) -> SessionResult<()> {
        let scene = screen.scene();
        if scene.is_empty() {
            debug!("no scene configured, skipping screen load");
            return Ok(());
        }
        debug!(scene, "loading screen");
        self.loader.load_screen(screen).await?;
        debug!(scene, "screen loaded");
        Ok(())
    }
}
