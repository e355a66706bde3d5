//! Game settings and tuning
//!
//! Stored as JSON. Missing fields fall back to defaults, and a missing or
//! broken file yields the default settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{COMBO_THRESHOLD, FPS, STARTING_LIVES};
use crate::sim::TimerConfig;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(&'static str),
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Adaptive timer tuning (endless mode)
    pub timer: TimerConfig,
    /// Frames per second of the game loop, used to convert budgets to frames
    pub frame_rate: u32,
    /// Lives at the start of a run
    pub starting_lives: u32,
    /// Consecutive correct answers that trigger a combo attack
    pub combo_threshold: u32,
    /// Fixed question time in campaign mode (frames)
    pub campaign_question_frames: u32,
    /// Input lockout after an answer (frames)
    pub answer_cooldown_frames: u32,
    /// Optional response-time model for the adaptive timer
    pub model_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            frame_rate: FPS,
            starting_lives: STARTING_LIVES,
            combo_threshold: COMBO_THRESHOLD,
            campaign_question_frames: 600,
            answer_cooldown_frames: 90,
            model_path: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let t = &self.timer;
        if !(t.min_time > 0.0 && t.max_time > 0.0 && t.base_time > 0.0) {
            return Err(SettingsError::Invalid("timer bounds must be positive"));
        }
        if t.min_time > t.max_time {
            return Err(SettingsError::Invalid("timer min_time exceeds max_time"));
        }
        if t.base_time < t.min_time {
            return Err(SettingsError::Invalid("timer base_time below min_time"));
        }
        if !(0.0..=1.0).contains(&t.blend_weight) {
            return Err(SettingsError::Invalid("timer blend_weight must be in [0, 1]"));
        }
        if t.history_len == 0 {
            return Err(SettingsError::Invalid("timer history_len must be > 0"));
        }
        if t.blend_window > t.history_len {
            return Err(SettingsError::Invalid("timer blend_window exceeds history_len"));
        }
        if t.correct_step < 0.0 {
            return Err(SettingsError::Invalid("timer correct_step must be >= 0"));
        }
        if self.frame_rate == 0 {
            return Err(SettingsError::Invalid("frame_rate must be > 0"));
        }
        if self.combo_threshold == 0 {
            return Err(SettingsError::Invalid("combo_threshold must be > 0"));
        }
        Ok(())
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path)
            .map_err(SettingsError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Convert seconds to whole frames (truncating)
    pub fn seconds_to_frames(&self, seconds: f64) -> u32 {
        (seconds.max(0.0) * f64::from(self.frame_rate)) as u32
    }

    pub fn frames_to_seconds(&self, frames: u32) -> f64 {
        f64::from(frames) / f64::from(self.frame_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.timer.base_time, 10.0);
        assert_eq!(settings.timer.min_time, 2.0);
        assert_eq!(settings.timer.max_time, 10.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"frame_rate": 30, "timer": {"offset": 1.5}}"#).unwrap();
        assert_eq!(settings.frame_rate, 30);
        assert_eq!(settings.timer.offset, 1.5);
        assert_eq!(settings.timer.history_len, 10);
        assert_eq!(settings.starting_lives, 5);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let err = Settings::from_json(r#"{"timer": {"min_time": 12.0}}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        let err = Settings::from_json(r#"{"frame_rate": 0}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        assert_eq!(Settings::load("/nonexistent/settings.json"), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("arith_shooter_settings_{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.combo_threshold = 3;
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_frame_conversion() {
        let settings = Settings::default();
        assert_eq!(settings.seconds_to_frames(4.23), 253);
        assert_eq!(settings.seconds_to_frames(10.0), 600);
        assert_eq!(settings.frames_to_seconds(90), 1.5);
    }
}
