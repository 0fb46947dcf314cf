//! Screens and the loader collaborator that presents them.

use async_trait::async_trait;
use mg_core::MicrogameDescriptor;

use crate::error::ScreenError;

/// A screen the session asks the presentation layer to show.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// The title screen.
    Startup {
        /// Scene to load.
        scene: String,
    },
    /// The instruction screen before a round.
    Command {
        /// Scene to load.
        scene: String,
        /// The microgame about to be played.
        microgame: MicrogameDescriptor,
    },
    /// The microgame itself.
    Microgame {
        /// The microgame to load; its scene is the target.
        microgame: MicrogameDescriptor,
    },
    /// The end-of-session screen.
    GameOver {
        /// Scene to load.
        scene: String,
        /// Final score of the session.
        score: u32,
    },
}

impl Screen {
    /// Scene name the loader should open.
    pub fn scene(&self) -> &str {
        match self {
            Self::Startup { scene } | Self::Command { scene, .. } | Self::GameOver { scene, .. } => {
                scene
            }
            Self::Microgame { microgame } => &microgame.scene,
        }
    }
}

/// Presents screens on behalf of the session.
///
/// A load resolves once the screen is fully up. The session awaits every
/// load before running the next phase's setup, so at most one load is in
/// flight at a time.
#[async_trait]
pub trait ScreenLoader: Send {
    /// Load and activate `screen`.
    async fn load_screen(&mut self, screen: &Screen) -> Result<(), ScreenError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn microgame_screen_targets_descriptor_scene() {
        let screen = Screen::Microgame {
            microgame: MicrogameDescriptor::new("Jump", "Jump!", 3.0),
        };
        assert_eq!(screen.scene(), "Jump");
    }

    #[test]
    fn fixed_screens_use_their_scene() {
        let screen = Screen::GameOver {
            scene: "GameOverScene".into(),
            score: 4,
        };
        assert_eq!(screen.scene(), "GameOverScene");
    }
}
