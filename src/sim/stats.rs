//! Small numeric helpers shared by the timing and progression code

use std::collections::VecDeque;

/// Bounded history of observed response times (seconds), oldest first.
///
/// Pushing past capacity evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct ResponseHistory {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl ResponseHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a sample, dropping the oldest one when full
    pub fn push(&mut self, seconds: f64) {
        self.samples.push_back(seconds);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Mean of the `n` most recent samples, or `None` if fewer than `n` exist
    pub fn recent_mean(&self, n: usize) -> Option<f64> {
        if n == 0 || self.samples.len() < n {
            return None;
        }
        let sum: f64 = self.samples.iter().rev().take(n).sum();
        Some(sum / n as f64)
    }
}

/// Round to `places` decimal places (half away from zero)
#[inline]
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

/// Clamp that maps NaN to the lower bound instead of propagating it
#[inline]
pub fn clamp_finite(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() { lo } else { value.clamp(lo, hi) }
}
