//! Wave progression for endless mode
//!
//! Difficulty is a pure function of the wave counter:
//! - enemy count +1 every 2 waves (3, 3, 4, 4, ...) capped at 12
//! - enemy hp +1 every 2 waves, uncapped
//! - enemy speed +1 every 4 waves, capped at 4
//! - operand range widens at waves 3, 6, 9 and 13
//! - visual style cycles 1, 2, 3

use serde::{Deserialize, Serialize};

pub const BASE_ENEMIES: u32 = 3;
pub const MAX_ENEMIES: u32 = 12;
pub const BASE_HP: u32 = 3;
pub const BASE_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 4;
/// Number of visual styles (shared with the campaign's level skins)
pub const VISUAL_STYLES: u32 = 3;
/// Levels in the campaign
pub const CAMPAIGN_LEVELS: u32 = 3;

/// Closed interval of operand values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: i64,
    pub max: i64,
}

impl NumberRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Display tier derived from the wave number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
    Legendary,
}

impl Difficulty {
    pub fn for_wave(wave: u32) -> Self {
        match wave {
            0..=2 => Difficulty::Easy,
            3..=5 => Difficulty::Normal,
            6..=8 => Difficulty::Hard,
            9..=12 => Difficulty::Expert,
            _ => Difficulty::Legendary,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
            Difficulty::Expert => "EXPERT",
            Difficulty::Legendary => "LEGENDARY",
        }
    }

    /// Operand range used for problems at this tier
    pub fn number_range(&self) -> NumberRange {
        match self {
            Difficulty::Easy => NumberRange::new(1, 10),
            Difficulty::Normal => NumberRange::new(1, 25),
            Difficulty::Hard => NumberRange::new(1, 50),
            Difficulty::Expert => NumberRange::new(1, 75),
            Difficulty::Legendary => NumberRange::new(1, 100),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Spawn and problem parameters for one wave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveConfig {
    pub wave_number: u32,
    pub enemy_count: u32,
    pub enemy_hp: u32,
    pub enemy_speed: u32,
    pub numeric_range: NumberRange,
    /// Cosmetic theme in 1..=3
    pub visual_style: u32,
}

impl WaveConfig {
    /// Derive the configuration for `wave`. Wave 0 (before the first advance)
    /// yields the same parameters as wave 1.
    pub fn for_wave(wave: u32) -> Self {
        let step = wave.saturating_sub(1);
        Self {
            wave_number: wave,
            enemy_count: (BASE_ENEMIES + step / 2).min(MAX_ENEMIES),
            enemy_hp: BASE_HP.saturating_add(step / 2),
            enemy_speed: (BASE_SPEED + step / 4).min(MAX_SPEED),
            numeric_range: Difficulty::for_wave(wave).number_range(),
            visual_style: step % VISUAL_STYLES + 1,
        }
    }

    /// Fixed configuration for a campaign level (1..=3)
    pub fn campaign(level: u32) -> Option<Self> {
        let (range, enemy_count, enemy_hp, enemy_speed) = match level {
            1 => (NumberRange::new(1, 10), 3, 3, 1),
            2 => (NumberRange::new(1, 50), 5, 5, 2),
            3 => (NumberRange::new(1, 100), 7, 8, 3),
            _ => return None,
        };
        Some(Self {
            wave_number: level,
            enemy_count,
            enemy_hp,
            enemy_speed,
            numeric_range: range,
            visual_style: level,
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::for_wave(self.wave_number)
    }
}

/// Summary shown between waves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveStats {
    pub wave: u32,
    pub total_kills: u32,
    pub difficulty: Difficulty,
}

/// Wave counter for an endless run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveProgression {
    wave_number: u32,
    total_kills: u32,
}

impl WaveProgression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    /// Advance to the next wave and return its configuration
    pub fn next_wave(&mut self) -> WaveConfig {
        self.wave_number += 1;
        let config = WaveConfig::for_wave(self.wave_number);
        log::info!(
            "Wave {} ({}): enemies={}, hp={}, speed={}, range={}..={}",
            config.wave_number,
            config.difficulty(),
            config.enemy_count,
            config.enemy_hp,
            config.enemy_speed,
            config.numeric_range.min,
            config.numeric_range.max
        );
        config
    }

    /// Configuration of the current wave without advancing
    pub fn current_config(&self) -> WaveConfig {
        WaveConfig::for_wave(self.wave_number)
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::for_wave(self.wave_number)
    }

    pub fn add_kills(&mut self, count: u32) {
        self.total_kills = self.total_kills.saturating_add(count);
    }

    pub fn total_kills(&self) -> u32 {
        self.total_kills
    }

    pub fn stats(&self) -> WaveStats {
        WaveStats {
            wave: self.wave_number,
            total_kills: self.total_kills,
            difficulty: self.difficulty(),
        }
    }

    pub fn reset(&mut self) {
        self.wave_number = 0;
        self.total_kills = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifth_wave_config() {
        let mut waves = WaveProgression::new();
        let mut last = waves.next_wave();
        for _ in 0..4 {
            last = waves.next_wave();
        }
        assert_eq!(
            last,
            WaveConfig {
                wave_number: 5,
                enemy_count: 5,
                enemy_hp: 5,
                enemy_speed: 1,
                numeric_range: NumberRange::new(1, 25),
                visual_style: 2,
            }
        );
    }

    #[test]
    fn test_current_config_matches_last_advance() {
        let mut waves = WaveProgression::new();
        for _ in 0..7 {
            let advanced = waves.next_wave();
            assert_eq!(waves.current_config(), advanced);
            assert_eq!(waves.current_config(), advanced);
        }
        assert_eq!(waves.wave_number(), 7);
    }

    #[test]
    fn test_range_thresholds() {
        let range = |w| WaveConfig::for_wave(w).numeric_range;
        assert_eq!(range(2), NumberRange::new(1, 10));
        assert_eq!(range(3), NumberRange::new(1, 25));
        assert_eq!(range(5), NumberRange::new(1, 25));
        assert_eq!(range(6), NumberRange::new(1, 50));
        assert_eq!(range(9), NumberRange::new(1, 75));
        assert_eq!(range(12), NumberRange::new(1, 75));
        assert_eq!(range(13), NumberRange::new(1, 100));
    }

    #[test]
    fn test_caps() {
        let late = WaveConfig::for_wave(500);
        assert_eq!(late.enemy_count, MAX_ENEMIES);
        assert_eq!(late.enemy_speed, MAX_SPEED);
        assert_eq!(late.enemy_hp, 3 + 499 / 2);
    }

    #[test]
    fn test_speed_steps_every_four_waves() {
        let speeds: Vec<u32> = (1..=9).map(|w| WaveConfig::for_wave(w).enemy_speed).collect();
        assert_eq!(speeds, vec![1, 1, 1, 1, 2, 2, 2, 2, 3]);
    }

    #[test]
    fn test_difficulty_labels() {
        let labels: Vec<&str> = [1, 3, 6, 9, 13]
            .iter()
            .map(|&w| Difficulty::for_wave(w).label())
            .collect();
        assert_eq!(labels, vec!["EASY", "NORMAL", "HARD", "EXPERT", "LEGENDARY"]);
    }

    #[test]
    fn test_reset_and_kills() {
        let mut waves = WaveProgression::new();
        waves.next_wave();
        waves.next_wave();
        waves.add_kills(3);
        waves.add_kills(1);
        let stats = waves.stats();
        assert_eq!(stats.wave, 2);
        assert_eq!(stats.total_kills, 4);
        assert_eq!(stats.difficulty, Difficulty::Easy);

        waves.reset();
        assert_eq!(waves.wave_number(), 0);
        assert_eq!(waves.total_kills(), 0);
        assert_eq!(waves.next_wave().wave_number, 1);
    }

    #[test]
    fn test_campaign_levels() {
        assert_eq!(WaveConfig::campaign(2).map(|c| c.enemy_hp), Some(5));
        assert_eq!(WaveConfig::campaign(3).map(|c| c.numeric_range), Some(NumberRange::new(1, 100)));
        assert!(WaveConfig::campaign(0).is_none());
        assert!(WaveConfig::campaign(4).is_none());
    }
}
