//! Core types for Microgauntlet.
//!
//! Provides the immutable microgame catalog, the shuffle sequencer that walks
//! it without repeats, and the per-round countdown timer with its one-shot
//! outcome latch. Nothing here knows about lives, score, or screens; that is
//! the job of the session orchestrator built on top.

/// Immutable list of microgame descriptors and catalog file loading.
pub mod catalog;
/// Microgame descriptor type and its field constraints.
pub mod descriptor;
/// Error types for the core crate.
pub mod error;
/// Round outcomes produced by the timer latch.
pub mod outcome;
/// Randomized, non-repeating traversal of a catalog.
pub mod sequencer;
/// Per-round countdown with bonus time and outcome latching.
pub mod timer;

/// Re-export of [`catalog::Catalog`].
pub use catalog::Catalog;
/// Re-export of [`descriptor::MicrogameDescriptor`].
pub use descriptor::MicrogameDescriptor;
/// Re-exports of [`error::CatalogError`] and [`error::CoreResult`].
pub use error::{CatalogError, CoreResult};
/// Re-export of [`outcome::RoundOutcome`].
pub use outcome::RoundOutcome;
/// Re-export of [`sequencer::Sequencer`].
pub use sequencer::Sequencer;
/// Re-export of [`timer::RoundTimer`].
pub use timer::RoundTimer;
