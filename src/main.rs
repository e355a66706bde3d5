//! Arith Shooter headless runner
//!
//! Plays an endless run with a scripted player and logs every wave and time
//! budget. Usage: `arith-shooter [seed] [settings.json]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use arith_shooter::Settings;
use arith_shooter::sim::{Operator, Phase, Session, WaveAdvance, WaveConfig};

/// Stop the demo after this many waves even if the player survives
const MAX_DEMO_WAVES: u32 = 20;
/// Seed of the scripted player's own RNG is offset from the session seed
const PLAYER_SEED_OFFSET: u64 = 0x9E37_79B9;

/// Enemies on screen, tracked by remaining hp
struct Field {
    enemies: Vec<u32>,
}

impl Field {
    fn spawn(config: &WaveConfig) -> Self {
        Self {
            enemies: vec![config.enemy_hp; config.enemy_count as usize],
        }
    }

    /// One hit on the first living enemy, or on all of them for a combo
    fn hit(&mut self, combo: bool) -> u32 {
        if combo {
            self.enemies.iter_mut().for_each(|hp| *hp = hp.saturating_sub(1));
        } else if let Some(hp) = self.enemies.first_mut() {
            *hp = hp.saturating_sub(1);
        }
        let before = self.enemies.len();
        self.enemies.retain(|&hp| hp > 0);
        (before - self.enemies.len()) as u32
    }

    fn is_clear(&self) -> bool {
        self.enemies.is_empty()
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345u64);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    log::info!("Arith Shooter demo starting (seed {})", seed);

    let mut session = Session::endless(settings, seed);
    let mut player = Pcg32::seed_from_u64(seed.wrapping_add(PLAYER_SEED_OFFSET));
    let mut field = Field::spawn(&session.wave_config());
    let mut kills = 0u32;

    while session.phase() == Phase::Playing {
        let Some(question) = session.begin_question().cloned() else {
            break;
        };

        // Accuracy drops as waves get harder
        let wave = session.wave_config().wave_number;
        let accuracy = (0.95 - f64::from(wave) * 0.02).max(0.6);
        let answers_in_time = player.random_bool(0.9);

        let outcome = if answers_in_time {
            let elapsed = player.random_range(0..=question.budget_frames);
            let choice = if player.random_bool(accuracy) {
                question.problem.operator
            } else {
                Operator::ALL[player.random_range(0..Operator::ALL.len())]
            };
            session.submit_answer(choice, elapsed)
        } else {
            session.time_out()
        };
        let Some(outcome) = outcome else {
            break;
        };

        log::info!(
            "{} -> {} in {:.2}s of {:.2}s (score {}, lives {})",
            question.problem.text(),
            if outcome.timed_out {
                "timeout"
            } else if outcome.correct {
                "correct"
            } else {
                "wrong"
            },
            outcome.elapsed_seconds,
            question.budget_seconds,
            session.score,
            session.lives
        );

        if outcome.streak_bonus > 0 {
            log::info!("Streak of {}: +{}", session.achievement_streak, outcome.streak_bonus);
        }
        if outcome.correct {
            kills += field.hit(outcome.combo_attack);
        } else if player.random_bool(0.5) {
            // The enemy shot connects about half the time
            session.take_damage();
        }

        if field.is_clear() {
            match session.wave_cleared() {
                Some(WaveAdvance::NextWave(config)) | Some(WaveAdvance::NextLevel(config)) => {
                    if config.wave_number > MAX_DEMO_WAVES {
                        break;
                    }
                    field = Field::spawn(&config);
                }
                Some(WaveAdvance::Victory) | None => break,
            }
        }
    }

    let stats = session.stats();
    log::info!(
        "Run finished: wave {} ({}), {} kills ({} shot down), score {}, phase {:?}",
        stats.wave,
        stats.difficulty,
        stats.total_kills,
        kills,
        session.score,
        session.phase()
    );
    if let Some(timer) = session.timer() {
        log::info!("Final adaptive baseline: {:.2}s", timer.current_time());
    }
}
