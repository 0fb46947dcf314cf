use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CoreResult};

/// Shortest allowed round, in seconds.
pub const MIN_TIME_LIMIT: f64 = 1.0;
/// Longest allowed round, in seconds.
pub const MAX_TIME_LIMIT: f64 = 10.0;
/// Round length used when a catalog entry does not specify one.
pub const DEFAULT_TIME_LIMIT: f64 = 5.0;
/// Instruction shown when a catalog entry does not specify one.
pub const DEFAULT_COMMAND: &str = "Do something!";

/// Immutable metadata describing one microgame.
///
/// Descriptors are owned by a [`Catalog`](crate::Catalog) and handed out by
/// shared reference only, so they never change after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicrogameDescriptor {
    /// Scene the screen loader opens for this microgame. Also its identifier.
    pub scene: String,
    /// Instruction text flashed on the command screen.
    #[serde(default = "default_command")]
    pub command: String,
    /// Round length in seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit: f64,
    /// Whether the microgame is available for play.
    #[serde(default = "default_unlocked")]
    pub unlocked: bool,
}

fn default_command() -> String {
    DEFAULT_COMMAND.to_string()
}

fn default_time_limit() -> f64 {
    DEFAULT_TIME_LIMIT
}

fn default_unlocked() -> bool {
    true
}

impl MicrogameDescriptor {
    /// Create an unlocked descriptor with the given scene, instruction, and limit.
    pub fn new(scene: impl Into<String>, command: impl Into<String>, time_limit: f64) -> Self {
        Self {
            scene: scene.into(),
            command: command.into(),
            time_limit,
            unlocked: true,
        }
    }

    /// Set the unlocked flag.
    pub fn with_unlocked(mut self, unlocked: bool) -> Self {
        self.unlocked = unlocked;
        self
    }

    /// Check the descriptor's fields. `index` is only used for error reporting.
    pub fn validate(&self, index: usize) -> CoreResult<()> {
        if self.scene.trim().is_empty() {
            return Err(CatalogError::MissingScene { index });
        }
        if !self.time_limit.is_finite()
            || !(MIN_TIME_LIMIT..=MAX_TIME_LIMIT).contains(&self.time_limit)
        {
            return Err(CatalogError::InvalidTimeLimit {
                scene: self.scene.clone(),
                limit: self.time_limit,
                min: MIN_TIME_LIMIT,
                max: MAX_TIME_LIMIT,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for MicrogameDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} \"{}\" ({:.1}s)", self.scene, self.command, self.time_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let d: MicrogameDescriptor = serde_json::from_str(r#"{"scene": "Jump"}"#).unwrap();
        assert_eq!(d.command, DEFAULT_COMMAND);
        assert!((d.time_limit - DEFAULT_TIME_LIMIT).abs() < f64::EPSILON);
        assert!(d.unlocked);
    }

    #[test]
    fn validate_accepts_bounds() {
        assert!(MicrogameDescriptor::new("A", "Go!", 1.0).validate(0).is_ok());
        assert!(MicrogameDescriptor::new("A", "Go!", 10.0).validate(0).is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_limit() {
        let err = MicrogameDescriptor::new("A", "Go!", 0.5)
            .validate(0)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidTimeLimit { .. }));

        let err = MicrogameDescriptor::new("A", "Go!", 12.0)
            .validate(0)
            .unwrap_err();
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn validate_rejects_nan_limit() {
        let d = MicrogameDescriptor::new("A", "Go!", f64::NAN);
        assert!(d.validate(0).is_err());
    }

    #[test]
    fn validate_rejects_blank_scene() {
        let err = MicrogameDescriptor::new("  ", "Go!", 3.0)
            .validate(4)
            .unwrap_err();
        assert!(matches!(err, CatalogError::MissingScene { index: 4 }));
    }

    #[test]
    fn display_shows_scene_command_and_limit() {
        let d = MicrogameDescriptor::new("Dodge", "Dodge!", 3.0);
        assert_eq!(d.to_string(), "Dodge \"Dodge!\" (3.0s)");
    }
}
