use serde::{Deserialize, Serialize};

/// Terminal result of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The player completed the microgame.
    Win,
    /// The player failed the microgame.
    Lose,
    /// Time ran out before a win or loss was reported. Scored as a loss.
    Timeout,
}

impl RoundOutcome {
    /// Return `true` for [`RoundOutcome::Win`].
    pub fn is_win(self) -> bool {
        matches!(self, Self::Win)
    }

    /// Return `true` for outcomes that cost a life.
    pub fn counts_as_loss(self) -> bool {
        !self.is_win()
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Lose => write!(f, "lose"),
            Self::Timeout => write!(f, "timeout"),
        }
    }
}
