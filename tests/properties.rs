//! Property tests for wave progression and the adaptive timer

use arith_shooter::sim::{
    AdaptiveTimer, Features, NumberRange, Operator, PredictorFn, TimerConfig, WaveConfig,
    WaveProgression,
};
use proptest::prelude::*;

fn operator() -> impl Strategy<Value = Operator> {
    prop::sample::select(Operator::ALL.to_vec())
}

proptest! {
    #[test]
    fn enemy_count_grows_by_at_most_one(wave in 1u32..10_000) {
        let a = WaveConfig::for_wave(wave).enemy_count;
        let b = WaveConfig::for_wave(wave + 1).enemy_count;
        prop_assert!(a <= b && b <= a + 1);
        prop_assert!(b <= 12);
    }

    #[test]
    fn hp_and_speed_non_decreasing(wave in 1u32..10_000) {
        let a = WaveConfig::for_wave(wave);
        let b = WaveConfig::for_wave(wave + 1);
        prop_assert!(a.enemy_hp <= b.enemy_hp);
        prop_assert!(a.enemy_speed <= b.enemy_speed);
        prop_assert!(b.enemy_speed <= 4);
    }

    #[test]
    fn range_is_step_function(wave in 1u32..10_000) {
        let expected = match wave {
            1..=2 => NumberRange::new(1, 10),
            3..=5 => NumberRange::new(1, 25),
            6..=8 => NumberRange::new(1, 50),
            9..=12 => NumberRange::new(1, 75),
            _ => NumberRange::new(1, 100),
        };
        prop_assert_eq!(WaveConfig::for_wave(wave).numeric_range, expected);
    }

    #[test]
    fn visual_style_cycles(wave in 1u32..10_000) {
        prop_assert_eq!(WaveConfig::for_wave(wave).visual_style, (wave - 1) % 3 + 1);
    }

    #[test]
    fn current_config_is_idempotent(advances in 1usize..50) {
        let mut waves = WaveProgression::new();
        let mut last = None;
        for _ in 0..advances {
            last = Some(waves.next_wave());
        }
        prop_assert_eq!(Some(waves.current_config()), last);
        prop_assert_eq!(waves.current_config(), waves.current_config());
        prop_assert_eq!(waves.wave_number() as usize, advances);
    }

    #[test]
    fn budget_always_clamped(
        prediction in -1000.0f64..1000.0,
        history in prop::collection::vec(0.0f64..60.0, 0..15),
        op in operator(),
        correct in 0u32..200,
        lives in 0u32..6,
        level in 1u32..4,
    ) {
        let model = PredictorFn::new(move |_: &Features| Ok(prediction));
        let mut timer = AdaptiveTimer::with_predictor(TimerConfig::default(), Box::new(model));
        for t in history {
            timer.record_response(t, false);
        }
        let budget = timer.next_budget(op, correct, lives, level);
        prop_assert!((2.0..=10.0).contains(&budget), "budget {}", budget);
        prop_assert!(((budget * 100.0).round() - budget * 100.0).abs() < 1e-6);
    }

    #[test]
    fn baseline_never_rises(outcomes in prop::collection::vec((0.0f64..20.0, any::<bool>()), 0..60)) {
        let mut timer = AdaptiveTimer::default();
        let mut previous = timer.current_time();
        for (elapsed, correct) in outcomes {
            timer.record_response(elapsed, correct);
            let now = timer.current_time();
            prop_assert!(now <= previous);
            prop_assert!(now >= 2.0);
            previous = now;
        }
    }

    #[test]
    fn history_keeps_most_recent_ten(samples in prop::collection::vec(0.0f64..30.0, 0..40)) {
        let mut timer = AdaptiveTimer::default();
        for &t in &samples {
            timer.record_response(t, true);
        }
        let start = samples.len().saturating_sub(10);
        let kept: Vec<f64> = timer.history().iter().collect();
        prop_assert_eq!(kept, samples[start..].to_vec());
    }
}

#[test]
fn fresh_timer_without_model_returns_max() {
    let timer = AdaptiveTimer::default();
    assert_eq!(timer.next_budget_for_token("+", 0, 5, 1), 10.0);
}

#[test]
fn fifth_wave_matches_reference() {
    let mut waves = WaveProgression::new();
    let fifth = (0..5).map(|_| waves.next_wave()).last().unwrap();
    assert_eq!(fifth.wave_number, 5);
    assert_eq!(fifth.enemy_count, 5);
    assert_eq!(fifth.enemy_hp, 5);
    assert_eq!(fifth.enemy_speed, 1);
    assert_eq!(fifth.numeric_range, NumberRange::new(1, 25));
    assert_eq!(fifth.visual_style, 2);
}
