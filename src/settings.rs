//! Run settings
//!
//! Mode selection and restart are the only configuration surface of the
//! simulation. Settings are parsed from JSON the caller supplies; nothing
//! is read from or written to storage.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mode::{GameMode, ModeProfile};

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty mode
    pub mode: GameMode,
    /// RNG seed for pipe layout and random events
    pub seed: u64,
    /// Soften the game after repeated early deaths
    pub adaptive_difficulty: bool,
    /// Simulated seconds the headless runner plays before stopping
    pub demo_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Normal,
            seed: 0x5eed,
            adaptive_difficulty: true,
            demo_seconds: 60.0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        log::info!("Loaded settings (mode {})", settings.mode.as_str());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn profile(&self) -> ModeProfile {
        self.mode.profile()
    }

    /// Switch to the other mode
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"mode":"Chill"}"#).unwrap();
        assert_eq!(settings.mode, GameMode::Chill);
        assert_eq!(settings.seed, Settings::default().seed);
        assert!(settings.adaptive_difficulty);
    }

    #[test]
    fn test_round_trip_preserves_mode() {
        let mut settings = Settings::default();
        settings.toggle_mode();
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.mode, GameMode::Chill);
        assert_eq!(back.profile(), ModeProfile::CHILL);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
