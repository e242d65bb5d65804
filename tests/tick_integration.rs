//! Integration tests for wall-clock driven ticking
//!
//! Offline catch-up and the live loop are run against a real data
//! directory through `PlayerService`.

use heaven_and_earth::core::types::{PlayerId, Position};
use heaven_and_earth::cultivation::{CultivationProgress, Realm, Stage, MAX_LAYER};
use heaven_and_earth::entity::Player;
use heaven_and_earth::simulation::{advance_player, PlayerService, TickMode, SECONDS_PER_TICK};
use heaven_and_earth::storage::WorldRepository;
use heaven_and_earth::world::{World, WorldMap, Zone};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_split_catch_up_matches_single_catch_up() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let template = Player::register(PlayerId(1), "Lin", 0, &mut rng);

    let mut once = template.clone();
    advance_player(&mut once, 3_000, 0.5, TickMode::CatchUp, &mut ChaCha8Rng::seed_from_u64(2));

    let mut split = template;
    let mut split_rng = ChaCha8Rng::seed_from_u64(2);
    for now in [900, 1_950, 3_000] {
        advance_player(&mut split, now, 0.5, TickMode::CatchUp, &mut split_rng);
    }

    // Fractional ticks carry over, so the total ticks applied agree
    assert!(
        (once.stats.hours_cultivated - split.stats.hours_cultivated).abs() < 1e-9,
        "once {} vs split {}",
        once.stats.hours_cultivated,
        split.stats.hours_cultivated
    );
    assert_eq!(once.last_tick_timestamp, split.last_tick_timestamp);
    assert!((once.cultivation.exp() - split.cultivation.exp()).abs() < 1e-9);
}

#[test]
fn test_partial_tick_time_is_not_lost() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut player = Player::register(PlayerId(1), "Lin", 0, &mut rng);

    // 59 seconds: no whole tick yet, clock must not move
    advance_player(&mut player, SECONDS_PER_TICK - 1, 1.0, TickMode::CatchUp, &mut rng);
    assert_eq!(player.last_tick_timestamp, 0);
    assert_eq!(player.stats.hours_cultivated, 0.0);

    advance_player(&mut player, SECONDS_PER_TICK + 1, 1.0, TickMode::CatchUp, &mut rng);
    assert_eq!(player.last_tick_timestamp, SECONDS_PER_TICK);
    assert!((player.stats.hours_cultivated - 1.0 / 60.0).abs() < 1e-9);
}

#[test]
fn test_offline_then_live_through_service() {
    let dir = tempfile::tempdir().unwrap();

    let mut map = WorldMap::new();
    map.insert_world(World {
        id: "mortal".into(),
        name: "Mortal Realm".into(),
        time_flow: 1.0,
    });
    map.insert_zone(Zone {
        id: "time-pavilion".into(),
        world_id: "mortal".into(),
        name: "Time Pavilion".into(),
        time_flow: 10.0,
    });
    WorldRepository::new(dir.path()).save(&map).unwrap();

    {
        let mut svc = PlayerService::load(dir.path(), Some(11), 0).unwrap();
        svc.register(PlayerId(1), "Lin", 0).unwrap();
        svc.get_mut(PlayerId(1)).unwrap().relocate(
            Some("mortal".into()),
            Some("time-pavilion".into()),
            Position::new(3, 4),
        );
        svc.save().unwrap();
    }

    // Restart an hour later
    let mut svc = PlayerService::load(dir.path(), Some(11), 3_600).unwrap();
    svc.apply_offline_ticks(3_600).unwrap();
    let p = svc.get(PlayerId(1)).unwrap();
    assert_eq!(p.last_tick_timestamp, 3_600);
    assert!((p.stats.hours_cultivated - 10.0).abs() < 1e-9);

    svc.apply_live_tick(3_660).unwrap();
    let p = svc.get(PlayerId(1)).unwrap();
    assert_eq!(p.last_tick_timestamp, 3_660);
    assert!((p.stats.hours_cultivated - 10.0 - 10.0 / 60.0).abs() < 1e-9);

    let reloaded = PlayerService::load(dir.path(), None, 3_660).unwrap();
    assert_eq!(reloaded.get(PlayerId(1)).unwrap(), svc.get(PlayerId(1)).unwrap());
    assert_eq!(reloaded.calendar().start_timestamp(), 0);
}

#[test]
fn test_a_day_of_live_ticks_fills_the_foundation_bar() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut player = Player::register(PlayerId(1), "Lin", 0, &mut rng);
    player.cultivation = CultivationProgress::at(Realm::QiCondensation, Stage::Peak, MAX_LAYER);

    let mut completed_at = None;
    for cycle in 1..=1_440i64 {
        let notes = advance_player(
            &mut player,
            cycle * SECONDS_PER_TICK,
            1.0,
            TickMode::Live,
            &mut rng,
        );
        if notes.iter().any(|n| n.starts_with("Foundation bar complete!")) {
            completed_at = Some(cycle);
        }
    }

    assert_eq!(completed_at, Some(1_440));
    assert_eq!(player.cultivation.foundation_progress(), 1.0);
    assert_eq!(player.cultivation.breakthrough_chance(), 1.0);
}
