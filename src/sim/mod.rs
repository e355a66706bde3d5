//! Deterministic gameplay logic
//!
//! Everything here is pure and single-threaded:
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies
//! - One call per game event, no internal clocks

pub mod operator;
pub mod predictor;
pub mod problem;
pub mod session;
pub mod stats;
pub mod timer;
pub mod wave;

pub use operator::Operator;
pub use predictor::{
    FEATURE_COUNT, Features, LinearModel, PredictorError, PredictorFn, ResponsePredictor,
};
pub use problem::MathProblem;
pub use session::{AnswerOutcome, Mode, Phase, Question, Session, WaveAdvance};
pub use stats::ResponseHistory;
pub use timer::{AdaptiveTimer, TimerConfig};
pub use wave::{Difficulty, NumberRange, WaveConfig, WaveProgression, WaveStats};
