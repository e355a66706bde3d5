//! Adaptive per-question time budget for endless mode
//!
//! The timer keeps a ratcheting baseline (`current_time`) that only shrinks on
//! correct answers, plus a short history of observed response times. When a
//! predictor is attached its estimate replaces the baseline, and recent history
//! is blended in once enough samples exist. Failures never grant extra time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::operator::Operator;
use super::predictor::{Features, LinearModel, ResponsePredictor};
use super::stats::{ResponseHistory, clamp_finite, round_to};

/// Tuning for [`AdaptiveTimer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Starting baseline (seconds)
    pub base_time: f64,
    /// Lower bound for budgets and the ratchet
    pub min_time: f64,
    /// Upper bound for budgets
    pub max_time: f64,
    /// Added to every prediction before blending
    pub offset: f64,
    /// Weight of the prediction in the blend; history gets the remainder
    pub blend_weight: f64,
    /// Number of most recent samples averaged into the blend
    pub blend_window: usize,
    /// Samples kept in history
    pub history_len: usize,
    /// Baseline reduction per correct answer
    pub correct_step: f64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            base_time: 10.0,
            min_time: 2.0,
            max_time: 10.0,
            offset: 3.0,
            blend_weight: 0.7,
            blend_window: 3,
            history_len: 10,
            correct_step: 0.3,
        }
    }
}

/// Adaptive question timer
pub struct AdaptiveTimer {
    config: TimerConfig,
    current_time: f64,
    history: ResponseHistory,
    /// `None` means the model is unavailable for the timer's whole lifetime
    predictor: Option<Box<dyn ResponsePredictor>>,
}

impl std::fmt::Debug for AdaptiveTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptiveTimer")
            .field("config", &self.config)
            .field("current_time", &self.current_time)
            .field("history", &self.history)
            .field("model_available", &self.model_available())
            .finish()
    }
}

impl Default for AdaptiveTimer {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

impl AdaptiveTimer {
    /// Timer without a model: behaves as a pure ratchet
    pub fn new(config: TimerConfig) -> Self {
        let current_time = config.base_time;
        let history = ResponseHistory::new(config.history_len);
        Self {
            config,
            current_time,
            history,
            predictor: None,
        }
    }

    pub fn with_predictor(config: TimerConfig, predictor: Box<dyn ResponsePredictor>) -> Self {
        let mut timer = Self::new(config);
        timer.predictor = Some(predictor);
        timer
    }

    /// Try to load a [`LinearModel`] from `path`; on failure the timer runs without one
    pub fn with_model_file(config: TimerConfig, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match LinearModel::load(path) {
            Ok(model) => {
                log::info!("Response-time model loaded from {}", path.display());
                Self::with_predictor(config, Box::new(model))
            }
            Err(e) => {
                log::warn!("Response-time model unavailable ({}), using ratchet timer", e);
                Self::new(config)
            }
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn history(&self) -> &ResponseHistory {
        &self.history
    }

    pub fn model_available(&self) -> bool {
        self.predictor.is_some()
    }

    /// Predicted seconds for the next question, or the baseline if no model answers
    pub fn predict(&self, operator: Operator, correct_count: u32, lives: u32, level: u32) -> f64 {
        self.predict_with_code(operator.model_code(), correct_count, lives, level)
    }

    /// Same as [`predict`](Self::predict) for a raw operator token
    pub fn predict_for_token(&self, token: &str, correct_count: u32, lives: u32, level: u32) -> f64 {
        self.predict_with_code(Operator::code_for_token(token), correct_count, lives, level)
    }

    fn predict_with_code(&self, code: f64, correct_count: u32, lives: u32, level: u32) -> f64 {
        let Some(predictor) = &self.predictor else {
            return self.current_time;
        };

        let features: Features = [code, f64::from(correct_count), f64::from(lives), f64::from(level)];
        match predictor.predict(&features) {
            Ok(seconds) if seconds.is_finite() => seconds,
            Ok(seconds) => {
                log::warn!("Prediction was not finite ({}), falling back to baseline", seconds);
                self.current_time
            }
            Err(e) => {
                log::warn!("Prediction failed: {}", e);
                self.current_time
            }
        }
    }

    /// Time budget in seconds for the next question, within `[min_time, max_time]`
    /// and rounded to hundredths
    pub fn next_budget(&self, operator: Operator, correct_count: u32, lives: u32, level: u32) -> f64 {
        let predicted = self.predict(operator, correct_count, lives, level);
        self.budget_from_prediction(predicted)
    }

    pub fn next_budget_for_token(&self, token: &str, correct_count: u32, lives: u32, level: u32) -> f64 {
        let predicted = self.predict_for_token(token, correct_count, lives, level);
        self.budget_from_prediction(predicted)
    }

    fn budget_from_prediction(&self, predicted: f64) -> f64 {
        let predicted = predicted + self.config.offset;
        let blended = match self.history.recent_mean(self.config.blend_window) {
            Some(recent) => {
                self.config.blend_weight * predicted + (1.0 - self.config.blend_weight) * recent
            }
            None => predicted,
        };
        let budget = clamp_finite(blended, self.config.min_time, self.config.max_time);
        round_to(budget, 2)
    }

    /// Record how long the player took. Correct answers shrink the baseline;
    /// wrong answers and timeouts leave it unchanged.
    pub fn record_response(&mut self, elapsed_seconds: f64, was_correct: bool) {
        self.history.push(elapsed_seconds);
        if was_correct {
            self.current_time = (self.current_time - self.config.correct_step).max(self.config.min_time);
        }
    }

    pub fn reset(&mut self) {
        self.current_time = self.config.base_time;
        self.history.clear();
    }
}
