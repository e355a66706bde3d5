//! Arith Shooter - difficulty core for an arithmetic space shooter
//!
//! The player sees `a ? b = c` and picks the hidden operator; right answers
//! fire at enemy ships, wrong ones let the enemies shoot back.
//!
//! Core modules:
//! - `sim`: Deterministic gameplay logic (waves, adaptive timer, problems, session)
//! - `settings`: Tuning and preferences persisted as JSON

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{AdaptiveTimer, Session, WaveProgression};

/// Game configuration constants
pub mod consts {
    /// Game loop rate the frame budgets are expressed in
    pub const FPS: u32 = 60;
    /// Lives at the start of a run
    pub const STARTING_LIVES: u32 = 5;
    /// Correct answers in a row that trigger a combo attack
    pub const COMBO_THRESHOLD: u32 = 5;
}
