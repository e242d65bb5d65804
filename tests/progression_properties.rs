//! Property tests for the cultivation and tick invariants

use heaven_and_earth::cultivation::{CultivationProgress, QiType, Realm, Stage, MAX_LAYER};
use heaven_and_earth::simulation::{plan_ticks, TickMode, SECONDS_PER_TICK};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn qi_type() -> impl Strategy<Value = QiType> {
    prop_oneof![
        Just(QiType::Mundane),
        Just(QiType::Elemental),
        Just(QiType::Heavenly),
    ]
}

proptest! {
    #[test]
    fn exp_stays_below_threshold(
        seed in any::<u64>(),
        qi in qi_type(),
        batches in prop::collection::vec(0u64..5_000, 1..20),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut progress = CultivationProgress::new(qi);
        for ticks in batches {
            let before = progress.clone();
            progress.add_exp(ticks, &mut rng);

            prop_assert!(progress.exp() >= 0.0);
            if progress.is_capped() {
                prop_assert!(progress.exp() <= progress.required_exp());
            } else {
                prop_assert!(progress.exp() < progress.required_exp());
            }
            prop_assert!(progress.qi_quality() >= before.qi_quality());
            prop_assert!(progress.realm().index() >= before.realm().index());
            prop_assert!((1..=MAX_LAYER).contains(&progress.layer()));
        }
    }

    #[test]
    fn foundation_bar_completes_exactly_once(chunks in prop::collection::vec(1u64..400, 1..40)) {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut progress = CultivationProgress::at(Realm::QiCondensation, Stage::Peak, MAX_LAYER);
        let mut completions = 0;
        let mut total = 0u64;
        for ticks in chunks {
            total += ticks;
            let notes = progress.add_exp(ticks, &mut rng);
            completions += notes.iter().filter(|n| n.starts_with("Foundation bar complete!")).count();
            prop_assert!((0.0..=1.0).contains(&progress.foundation_progress()));
        }
        if total >= 1440 {
            prop_assert_eq!(progress.foundation_progress(), 1.0);
            prop_assert_eq!(completions, 1);
        } else {
            prop_assert!(progress.foundation_progress() < 1.0);
            prop_assert_eq!(completions, 0);
        }
    }

    #[test]
    fn tick_plan_is_bounded(
        last in 0i64..1_000_000,
        elapsed in 0i64..1_000_000,
        buffer in 0.0f64..1.0,
        flow in 0.01f64..20.0,
        live in any::<bool>(),
    ) {
        let mode = if live { TickMode::Live } else { TickMode::CatchUp };
        let now = last + elapsed;
        let plan = plan_ticks(last, now, buffer, flow, mode);

        prop_assert!((0.0..1.0).contains(&plan.tick_buffer));
        prop_assert!(plan.last_tick_timestamp >= last);
        prop_assert!(plan.last_tick_timestamp <= now);
        prop_assert!(now - plan.last_tick_timestamp < SECONDS_PER_TICK);
        prop_assert!((plan.ticks_to_apply as f64 + plan.tick_buffer - plan.total_ticks).abs() < 1e-6);
    }
}
