//! Error types for the session orchestrator.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// A screen loader failed to present a screen.
#[derive(Debug, Error)]
#[error("failed to load screen '{scene}': {reason}")]
pub struct ScreenError {
    /// Scene that was being loaded.
    pub scene: String,
    /// What went wrong.
    pub reason: String,
}

impl ScreenError {
    /// Create a screen error for `scene`.
    pub fn new(scene: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by a session or its collaborators.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The catalog cannot support a session.
    #[error("configuration error: {0}")]
    Catalog(#[from] mg_core::CatalogError),

    /// The screen loader failed during a transition.
    #[error(transparent)]
    Screen(#[from] ScreenError),

    /// A score store could not be read or written.
    #[error("score store error: {0}")]
    Io(#[from] std::io::Error),

    /// A score store file holds invalid JSON.
    #[error("score store format error: {0}")]
    Json(#[from] serde_json::Error),
}
