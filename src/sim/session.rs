//! A single run of the game
//!
//! Owns everything the question/answer loop needs: the mode, wave progression,
//! the adaptive timer (endless only), player counters and a seeded RNG. The
//! outer game loop drives it with one call per event (question start, answer,
//! timeout, hit taken, wave cleared).

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::operator::Operator;
use super::predictor::ResponsePredictor;
use super::problem::MathProblem;
use super::timer::AdaptiveTimer;
use super::wave::{CAMPAIGN_LEVELS, WaveConfig, WaveProgression, WaveStats};
use crate::settings::Settings;

pub const CORRECT_POINTS: u64 = 10;
pub const WRONG_PENALTY: u64 = 5;
pub const COMBO_BONUS: u64 = 50;
/// Streak achievements, paid every second consecutive correct answer
pub const STREAK_BONUSES: [u64; 5] = [25, 50, 100, 150, 250];

/// Achievement bonus for reaching `streak` correct answers in a row
pub fn streak_bonus(streak: u32) -> u64 {
    if streak < 2 || streak % 2 != 0 {
        return 0;
    }
    let index = ((streak / 2 - 1) as usize).min(STREAK_BONUSES.len() - 1);
    STREAK_BONUSES[index]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Three fixed levels with a fixed question timer
    Campaign,
    /// Endless waves with the adaptive timer
    Endless,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    Victory,
    GameOver,
}

/// A question in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub problem: MathProblem,
    pub budget_seconds: f64,
    pub budget_frames: u32,
}

/// Result of an answer or timeout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub timed_out: bool,
    pub elapsed_seconds: f64,
    /// Points gained (negative for a penalty actually applied)
    pub score_delta: i64,
    /// The streak reached the combo threshold and hits every enemy
    pub combo_attack: bool,
    /// Achievement bonus included in `score_delta` (0 if none was reached)
    pub streak_bonus: u64,
    /// Frames during which further input is ignored
    pub cooldown_frames: u32,
}

/// What happens after every enemy of the current wave is gone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WaveAdvance {
    NextWave(WaveConfig),
    NextLevel(WaveConfig),
    Victory,
}

#[derive(Debug)]
pub struct Session {
    settings: Settings,
    mode: Mode,
    phase: Phase,
    /// Campaign level, or the visual style of the current wave in endless mode
    level: u32,
    waves: WaveProgression,
    config: WaveConfig,
    timer: Option<AdaptiveTimer>,
    rng: Pcg32,
    pub lives: u32,
    pub score: u64,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub combo_streak: u32,
    /// Correct answers in a row; unlike the combo streak, timeouts break it
    pub achievement_streak: u32,
    question: Option<Question>,
}

impl Session {
    /// Campaign run starting at level 1
    pub fn campaign(settings: Settings, seed: u64) -> Self {
        let settings = checked(settings);
        let config = first_campaign_level();
        Self::build(settings, Mode::Campaign, config, None, seed)
    }

    /// Endless run; loads the response-time model named in the settings, if any
    pub fn endless(settings: Settings, seed: u64) -> Self {
        let settings = checked(settings);
        let timer = match &settings.model_path {
            Some(path) => AdaptiveTimer::with_model_file(settings.timer.clone(), path),
            None => AdaptiveTimer::new(settings.timer.clone()),
        };
        Self::start_endless(settings, timer, seed)
    }

    /// Endless run with an explicitly provided predictor
    pub fn endless_with_predictor(
        settings: Settings,
        predictor: Box<dyn ResponsePredictor>,
        seed: u64,
    ) -> Self {
        let settings = checked(settings);
        let timer = AdaptiveTimer::with_predictor(settings.timer.clone(), predictor);
        Self::start_endless(settings, timer, seed)
    }

    fn start_endless(settings: Settings, timer: AdaptiveTimer, seed: u64) -> Self {
        let mut waves = WaveProgression::new();
        let config = waves.next_wave();
        let mut session = Self::build(settings, Mode::Endless, config, Some(timer), seed);
        session.waves = waves;
        session
    }

    fn build(
        settings: Settings,
        mode: Mode,
        config: WaveConfig,
        timer: Option<AdaptiveTimer>,
        seed: u64,
    ) -> Self {
        log::info!("Starting {:?} session with seed {}", mode, seed);
        let lives = settings.starting_lives;
        Self {
            settings,
            mode,
            phase: Phase::Playing,
            level: config.visual_style,
            waves: WaveProgression::new(),
            config,
            timer,
            rng: Pcg32::seed_from_u64(seed),
            lives,
            score: 0,
            correct_answers: 0,
            incorrect_answers: 0,
            combo_streak: 0,
            achievement_streak: 0,
            question: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Spawn parameters for the enemies currently on screen
    pub fn wave_config(&self) -> WaveConfig {
        self.config
    }

    pub fn timer(&self) -> Option<&AdaptiveTimer> {
        self.timer.as_ref()
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn stats(&self) -> WaveStats {
        self.waves.stats()
    }

    /// Generate the next problem and its time budget
    pub fn begin_question(&mut self) -> Option<&Question> {
        if self.phase != Phase::Playing {
            return None;
        }

        let problem = MathProblem::generate(self.config.numeric_range, &mut self.rng);
        let (budget_seconds, budget_frames) = match &self.timer {
            Some(timer) => {
                let seconds = timer.next_budget(
                    problem.operator,
                    self.correct_answers,
                    self.lives,
                    self.level,
                );
                (seconds, self.settings.seconds_to_frames(seconds))
            }
            None => {
                let frames = self.settings.campaign_question_frames;
                (self.settings.frames_to_seconds(frames), frames)
            }
        };
        log::debug!(
            "Question {} ({}): {:.2}s / {} frames",
            problem.text(),
            problem.operator,
            budget_seconds,
            budget_frames
        );

        self.question = Some(Question {
            problem,
            budget_seconds,
            budget_frames,
        });
        self.question.as_ref()
    }

    /// The player picked `operator` after `elapsed_frames`
    pub fn submit_answer(&mut self, operator: Operator, elapsed_frames: u32) -> Option<AnswerOutcome> {
        let question = self.active_question()?;
        let correct = question.problem.check_answer(operator);
        let elapsed_seconds = self.settings.frames_to_seconds(elapsed_frames);
        Some(self.resolve(correct, false, elapsed_seconds))
    }

    /// The question ran out of time; counts as a wrong answer that used the full budget
    pub fn time_out(&mut self) -> Option<AnswerOutcome> {
        let question = self.active_question()?;
        let elapsed_seconds = self.settings.frames_to_seconds(question.budget_frames);
        Some(self.resolve(false, true, elapsed_seconds))
    }

    fn active_question(&mut self) -> Option<Question> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.question.take()
    }

    fn resolve(&mut self, correct: bool, timed_out: bool, elapsed_seconds: f64) -> AnswerOutcome {
        let mut combo_attack = false;
        let mut bonus = 0;
        let score_delta = if correct {
            self.correct_answers += 1;
            self.combo_streak += 1;
            let mut gained = CORRECT_POINTS;
            if self.combo_streak >= self.settings.combo_threshold {
                combo_attack = true;
                gained += COMBO_BONUS;
                self.combo_streak = 0;
            }
            self.achievement_streak += 1;
            bonus = streak_bonus(self.achievement_streak);
            gained += bonus;
            self.score += gained;
            gained as i64
        } else {
            self.incorrect_answers += 1;
            self.achievement_streak = 0;
            // Running out of time does not cost the combo, only a wrong pick does
            if !timed_out {
                self.combo_streak = 0;
            }
            let lost = self.score.min(WRONG_PENALTY);
            self.score -= lost;
            -(lost as i64)
        };

        if let Some(timer) = self.timer.as_mut() {
            timer.record_response(elapsed_seconds, correct);
        }

        AnswerOutcome {
            correct,
            timed_out,
            elapsed_seconds,
            score_delta,
            combo_attack,
            streak_bonus: bonus,
            cooldown_frames: self.settings.answer_cooldown_frames,
        }
    }

    /// An enemy shot hit the player
    pub fn take_damage(&mut self) -> Phase {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 && self.phase == Phase::Playing {
            log::info!("Game over at wave {} with score {}", self.waves.wave_number(), self.score);
            self.phase = Phase::GameOver;
            self.question = None;
        }
        self.phase
    }

    /// Every enemy of the current wave has been destroyed
    pub fn wave_cleared(&mut self) -> Option<WaveAdvance> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.waves.add_kills(self.config.enemy_count);
        self.question = None;

        let advance = match self.mode {
            Mode::Endless => {
                let config = self.waves.next_wave();
                self.install(config);
                WaveAdvance::NextWave(config)
            }
            Mode::Campaign if self.level < CAMPAIGN_LEVELS => {
                match WaveConfig::campaign(self.level + 1) {
                    Some(config) => {
                        self.install(config);
                        WaveAdvance::NextLevel(config)
                    }
                    None => self.win(),
                }
            }
            Mode::Campaign => self.win(),
        };
        Some(advance)
    }

    /// Switch to a new wave or level; the combo streak starts over
    fn install(&mut self, config: WaveConfig) {
        self.config = config;
        self.level = config.visual_style;
        self.combo_streak = 0;
    }

    fn win(&mut self) -> WaveAdvance {
        log::info!("Campaign cleared with score {}", self.score);
        self.phase = Phase::Victory;
        WaveAdvance::Victory
    }

    /// Start over in the same mode; timer and waves reset together
    pub fn reset(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.reset();
        }
        self.waves.reset();
        let config = match self.mode {
            Mode::Endless => self.waves.next_wave(),
            Mode::Campaign => first_campaign_level(),
        };
        self.install(config);
        self.phase = Phase::Playing;
        self.lives = self.settings.starting_lives;
        self.score = 0;
        self.correct_answers = 0;
        self.incorrect_answers = 0;
        self.combo_streak = 0;
        self.achievement_streak = 0;
        self.question = None;
    }
}

/// Invalid settings are replaced by the defaults, as when loading a broken file
fn checked(settings: Settings) -> Settings {
    match settings.validate() {
        Ok(()) => settings,
        Err(e) => {
            log::warn!("Ignoring session settings ({}), using defaults", e);
            Settings::default()
        }
    }
}

fn first_campaign_level() -> WaveConfig {
    WaveConfig::campaign(1).unwrap_or_else(|| WaveConfig::for_wave(1))
}
