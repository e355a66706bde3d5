//! Response-time predictor capability
//!
//! The adaptive timer can optionally consult a regression model that estimates
//! how long a player needs for the next question. The model is injected behind
//! [`ResponsePredictor`]; any implementation works (linear model, lookup table,
//! constant). Feature layout: `[operator_code, correct_count, lives, level]`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of features fed to a predictor
pub const FEATURE_COUNT: usize = 4;

/// Predictor feature vector
pub type Features = [f64; FEATURE_COUNT];

#[derive(Debug, Error)]
pub enum PredictorError {
    /// The model failed for this call only
    #[error("predictor invocation failed: {reason}")]
    Invocation { reason: String },
    /// The model produced NaN or infinity
    #[error("predictor returned a non-finite value: {0}")]
    NonFinite(f64),
    #[error("failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that maps a feature vector to predicted seconds
pub trait ResponsePredictor {
    fn predict(&self, features: &Features) -> Result<f64, PredictorError>;
}

/// Adapts a plain function or closure into a predictor
pub struct PredictorFn<F>(F);

impl<F> PredictorFn<F>
where
    F: Fn(&Features) -> Result<f64, PredictorError>,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> ResponsePredictor for PredictorFn<F>
where
    F: Fn(&Features) -> Result<f64, PredictorError>,
{
    fn predict(&self, features: &Features) -> Result<f64, PredictorError> {
        (self.0)(features)
    }
}

/// Linear regression model: `intercept + Σ weights[i] * features[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: Features,
    pub intercept: f64,
}

impl LinearModel {
    pub fn new(weights: Features, intercept: f64) -> Self {
        Self { weights, intercept }
    }

    /// Parse from a JSON document like `{"weights":[..4],"intercept":..}`
    pub fn from_json(json: &str) -> Result<Self, PredictorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PredictorError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl ResponsePredictor for LinearModel {
    fn predict(&self, features: &Features) -> Result<f64, PredictorError> {
        let value = self
            .weights
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (w, x)| acc + w * x);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(PredictorError::NonFinite(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_model_predict() {
        let model = LinearModel::new([0.5, -0.1, 0.2, 1.0], 4.0);
        let out = model.predict(&[2.0, 10.0, 5.0, 1.0]).unwrap();
        // 4 + 1 - 1 + 1 + 1
        assert!((out - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_model_from_json() {
        let model = LinearModel::from_json(r#"{"weights":[1.0,0.0,0.0,0.0],"intercept":2.5}"#)
            .unwrap();
        assert_eq!(model.intercept, 2.5);
        assert_eq!(model.weights[0], 1.0);
    }

    #[test]
    fn test_linear_model_rejects_bad_json() {
        let err = LinearModel::from_json(r#"{"weights":[1.0],"intercept":2.5}"#).unwrap_err();
        assert!(matches!(err, PredictorError::Parse(_)));
    }

    #[test]
    fn test_missing_model_file() {
        let err = LinearModel::load("/nonexistent/model.json").unwrap_err();
        assert!(matches!(err, PredictorError::Io(_)));
    }

    #[test]
    fn test_non_finite_output_is_error() {
        let model = LinearModel::new([f64::INFINITY, 0.0, 0.0, 0.0], 0.0);
        assert!(matches!(
            model.predict(&[1.0, 0.0, 0.0, 0.0]),
            Err(PredictorError::NonFinite(_))
        ));
    }

    #[test]
    fn test_closure_predictor() {
        let p = PredictorFn::new(|f: &Features| Ok(f[1] * 2.0));
        assert_eq!(p.predict(&[0.0, 3.0, 0.0, 0.0]).unwrap(), 6.0);
    }
}
