//! Error types for the microgame catalog.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CatalogError>;

/// Configuration errors raised while loading or using a catalog.
///
/// All of these are fatal for a session: no game can start without a
/// playable catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog holds no microgames.
    #[error("microgame catalog is empty")]
    Empty,

    /// A descriptor has no scene to load.
    #[error("microgame #{index} has an empty scene name")]
    MissingScene {
        /// Position of the descriptor in the catalog.
        index: usize,
    },

    /// A descriptor's time limit is outside the allowed range.
    #[error("microgame '{scene}' has invalid time limit {limit}s (expected {min}-{max}s)")]
    InvalidTimeLimit {
        /// Scene name of the offending descriptor.
        scene: String,
        /// The rejected limit in seconds.
        limit: f64,
        /// Smallest accepted limit.
        min: f64,
        /// Largest accepted limit.
        max: f64,
    },

    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid JSON for a catalog.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
