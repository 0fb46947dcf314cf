//! Session orchestrator for Microgauntlet.
//!
//! A [`Session`] sequences microgames from a catalog into one continuous run
//! with lives and score. It drives the Startup → Command → Microgame →
//! GameOver state machine and asks a [`ScreenLoader`] collaborator to present
//! each screen, awaiting every load before moving on.
//!
//! High scores are kept by the presentation layer through a [`ScoreStore`];
//! the session itself never reads or writes them.

pub mod config;
pub mod error;
pub mod log;
pub mod score;
pub mod screen;
pub mod session;

pub use config::{ScreenNames, SessionConfig};
pub use error::{ScreenError, SessionError, SessionResult};
pub use log::{SessionEvent, SessionEventKind, SessionLog};
pub use score::{HighScore, JsonScoreStore, MemoryScoreStore, ScoreStore};
pub use screen::{Screen, ScreenLoader};
pub use session::{Phase, Session};
