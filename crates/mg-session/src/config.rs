//! Configuration for a microgame session.

/// Lives a session starts with unless configured otherwise.
pub const DEFAULT_LIVES: u32 = 3;

/// Scene names for the fixed screens of a session.
///
/// An empty name means "no screen": the transition still happens but the
/// loader is not called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenNames {
    /// Title screen shown after quitting.
    pub startup: String,
    /// Screen that flashes the next microgame's instruction.
    pub command: String,
    /// Screen shown when the last life is lost.
    pub game_over: String,
}

impl Default for ScreenNames {
    fn default() -> Self {
        Self {
            startup: "StartupScene".to_string(),
            command: "CommandScene".to_string(),
            game_over: "GameOverScene".to_string(),
        }
    }
}

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible play order.
    pub seed: u64,
    /// Lives at the start of each game (at least 1).
    pub lives: u32,
    /// Scene names for startup, command, and game-over screens.
    pub screens: ScreenNames,
    /// Maximum session log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            lives: DEFAULT_LIVES,
            screens: ScreenNames::default(),
            max_events: 0,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting lives (minimum 1).
    pub fn with_lives(mut self, lives: u32) -> Self {
        self.lives = lives.max(1);
        self
    }

    /// Set the fixed screen names.
    pub fn with_screens(mut self, screens: ScreenNames) -> Self {
        self.screens = screens;
        self
    }

    /// Set the maximum session log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.lives, 3);
        assert_eq!(cfg.screens.command, "CommandScene");
        assert_eq!(cfg.max_events, 0);
    }

    #[test]
    fn builder_chain() {
        let cfg = SessionConfig::default()
            .with_seed(7)
            .with_lives(5)
            .with_max_events(100);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.lives, 5);
        assert_eq!(cfg.max_events, 100);
    }

    #[test]
    fn lives_floor_at_one() {
        assert_eq!(SessionConfig::default().with_lives(0).lives, 1);
    }

    #[test]
    fn custom_screens() {
        let screens = ScreenNames {
            startup: String::new(),
            ..ScreenNames::default()
        };
        let cfg = SessionConfig::default().with_screens(screens);
        assert!(cfg.screens.startup.is_empty());
        assert_eq!(cfg.screens.game_over, "GameOverScene");
    }
}
