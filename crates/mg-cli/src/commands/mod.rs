pub mod check;
pub mod list;
pub mod play;
pub mod simulate;

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use colored::Colorize;

use mg_core::Catalog;
use mg_session::{Screen, ScreenError, ScreenLoader};

/// Load a catalog file and make sure a session can be started from it.
fn load_catalog(path: &Path, unlocked_only: bool) -> Result<Catalog, String> {
    let catalog =
        Catalog::load(path).map_err(|e| format!("cannot load '{}': {e}", path.display()))?;
    let catalog = if unlocked_only {
        catalog.unlocked()
    } else {
        catalog
    };
    catalog
        .ensure_playable()
        .map_err(|e| format!("'{}': {e}", path.display()))?;
    Ok(catalog)
}

/// Presents screens as lines of terminal output.
pub struct ConsoleLoader {
    delay: Duration,
    echo: bool,
}

impl ConsoleLoader {
    pub fn new(delay: Duration, echo: bool) -> Self {
        Self { delay, echo }
    }

    fn render(screen: &Screen) -> String {
        match screen {
            Screen::Startup { .. } => format!("  {}", "MICROGAUNTLET".bold()),
            Screen::Command { microgame, .. } => {
                format!("  >> {}   3.. 2.. 1..", microgame.command.bold())
            }
            Screen::Microgame { microgame } => format!(
                "  [{}] {}",
                microgame.scene.cyan(),
                format!("{:.1}s on the clock", microgame.time_limit).dimmed()
            ),
            Screen::GameOver { score, .. } => {
                format!("  {} Final score: {score}", "GAME OVER.".red().bold())
            }
        }
    }
}

#[async_trait]
impl ScreenLoader for ConsoleLoader {
    async fn load_screen(&mut self, screen: &Screen) -> Result<(), ScreenError> {
        if self.echo {
            println!("{}", Self::render(screen));
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}
