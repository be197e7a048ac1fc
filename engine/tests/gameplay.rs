//! End-to-end gameplay scenarios driven through the public engine API.

use std::time::Duration;

use polygon_defence_core::{
    catalog::{self, Difficulty, MapId, TowerKind},
    SaveRecord, SaveStore, SaveStoreError, SoundCue, TargetPriority, WorldPoint,
};
use polygon_defence_engine::Engine;
use polygon_defence_persistence::MemorySaveStore;

const TICK: Duration = Duration::from_millis(50);
const TICK_CAP: usize = 100_000;

fn fresh_engine(map: MapId, difficulty: Difficulty) -> Engine {
    let mut engine = Engine::new(Box::new(MemorySaveStore::new()));
    engine.start_new_game(map, difficulty);
    engine
}

/// Ticks until the running round finishes, panicking if it never does.
fn run_round_to_completion(engine: &mut Engine) {
    for _ in 0..TICK_CAP {
        if !engine.is_round_active() || engine.is_lost() {
            return;
        }
        engine.update(TICK).expect("autosave");
    }
    panic!("round did not complete within the tick budget");
}

/// An open spot on the Desert map, clear of the path and the oasis.
fn desert_open_ground() -> WorldPoint {
    WorldPoint::new(600.0, 300.0)
}

#[test]
fn purchases_deduct_difficulty_adjusted_costs() {
    let mut engine = fresh_engine(MapId::Desert, Difficulty::Medium);
    assert_eq!(engine.money(), 650);
    assert!(engine.place_tower(TowerKind::Cannon, desert_open_ground()));
    assert_eq!(engine.money(), 200);
    // A second cannon is unaffordable and must not change anything.
    assert!(!engine.place_tower(TowerKind::Cannon, WorldPoint::new(600.0, 200.0)));
    assert_eq!(engine.money(), 200);
    assert!(engine.place_tower(TowerKind::Dart, WorldPoint::new(600.0, 200.0)));
    assert_eq!(engine.money(), 0);
}

#[test]
fn an_undefended_round_leaks_its_enemies_and_still_completes() {
    let mut engine = fresh_engine(MapId::Desert, Difficulty::Medium);
    engine.start_next_round();
    assert!(engine.is_round_active());
    assert_eq!(engine.current_round(), 1);

    run_round_to_completion(&mut engine);

    // Round 1 is ten tier-1 triangles; all of them leaked.
    assert_eq!(engine.lives(), 90);
    assert!(!engine.is_lost());
    assert!(!engine.is_round_active());
    // Clear bonus is the flat bonus plus the round number.
    let expected = 650 + catalog::ROUND_CLEAR_BONUS + 1;
    assert_eq!(engine.money(), expected);

    // Idle ticks after completion must not grant the bonus again.
    for _ in 0..20 {
        engine.update(TICK).expect("autosave");
    }
    assert_eq!(engine.money(), expected);
}

#[test]
fn a_dart_tower_defends_the_first_round() {
    let mut engine = fresh_engine(MapId::Desert, Difficulty::Medium);
    // Beside the opening straight of the path, inside dart range.
    assert!(engine.place_tower(TowerKind::Dart, WorldPoint::new(200.0, 160.0)));
    engine.start_next_round();
    run_round_to_completion(&mut engine);

    let towers = engine.tower_snapshots();
    assert_eq!(towers.len(), 1);
    assert!(towers[0].pop_count >= 5, "pop_count {}", towers[0].pop_count);
    assert!(engine.lives() >= 95, "lives {}", engine.lives());
    // Purchase, bounties, and the clear bonus all flow through money.
    let floor = 650 - 200 + catalog::ROUND_CLEAR_BONUS + 1;
    assert!(engine.money() > floor, "money {}", engine.money());
}

#[test]
fn auto_start_chains_rounds_without_a_command() {
    let mut engine = fresh_engine(MapId::Desert, Difficulty::Medium);
    engine.set_auto_start(true);
    engine.start_next_round();

    for _ in 0..TICK_CAP {
        if engine.current_round() >= 2 && engine.is_round_active() {
            return;
        }
        engine.update(TICK).expect("autosave");
    }
    panic!("round 2 never auto-started");
}

#[test]
fn accumulated_leaks_exhaust_lives_and_lose_the_game() {
    let mut engine = fresh_engine(MapId::Desert, Difficulty::Hard);
    engine.set_auto_start(true);
    engine.start_next_round();

    for _ in 0..TICK_CAP {
        if engine.is_lost() {
            break;
        }
        engine.update(TICK).expect("autosave");
    }
    assert!(engine.is_lost());
    assert_eq!(engine.lives(), 0);
    // The defeat removed the autosaved progress.
    assert!(matches!(engine.load_game(), Err(SaveStoreError::Missing)));

    // A lost session ignores further ticks and commands.
    let round = engine.current_round();
    engine.start_next_round();
    engine.update(TICK).expect("autosave");
    assert_eq!(engine.current_round(), round);
}

#[test]
fn save_and_load_round_trip_the_session() {
    let mut engine = fresh_engine(MapId::Desert, Difficulty::Medium);
    let spot = desert_open_ground();
    assert!(engine.place_tower(TowerKind::Dart, spot));
    let id = engine.tower_snapshots()[0].id;
    assert!(engine.upgrade_tower(id, 0));
    assert!(engine.set_targeting_priority(id, TargetPriority::Strongest));
    let saved_money = engine.money();
    engine.save_game().expect("save");

    // Mutate the session, then restore the snapshot.
    assert!(engine.sell_tower(id));
    assert_ne!(engine.money(), saved_money);
    engine.load_game().expect("load");

    assert_eq!(engine.money(), saved_money);
    assert_eq!(engine.lives(), 100);
    assert_eq!(engine.map(), Some(MapId::Desert));
    let towers = engine.tower_snapshots();
    assert_eq!(towers.len(), 1);
    assert_eq!(towers[0].kind, TowerKind::Dart);
    assert_eq!(towers[0].position, spot);
    assert_eq!(towers[0].upgrades, [1, 0, 0]);
    assert_eq!(towers[0].priority, TargetPriority::Strongest);
    // Sharpened Darts raises the damage tier to 2.
    assert_eq!(towers[0].stats.damage_tier, 2);
}

#[test]
fn a_failed_load_leaves_the_running_session_untouched() {
    let mut engine = Engine::new(Box::new(MemorySaveStore::new()));
    engine.start_new_game(MapId::Arctic, Difficulty::Easy);
    assert!(engine.place_tower(TowerKind::Dart, WorldPoint::new(450.0, 300.0)));

    assert!(matches!(engine.load_game(), Err(SaveStoreError::Missing)));
    assert_eq!(engine.map(), Some(MapId::Arctic));
    assert_eq!(engine.tower_snapshots().len(), 1);
}

#[test]
fn clearing_the_final_round_wins_and_clears_the_save() {
    let mut store = MemorySaveStore::new();
    store
        .save(&SaveRecord {
            map: MapId::Desert,
            difficulty: Difficulty::Medium,
            money: 5000,
            lives: 80,
            current_round: catalog::final_round(),
            towers: Vec::new(),
        })
        .expect("seed save");

    let mut engine = Engine::new(Box::new(store));
    engine.load_game().expect("load");
    assert_eq!(engine.current_round(), catalog::final_round());

    engine.start_next_round();
    assert!(engine.is_won());
    assert!(!engine.is_round_active());
    // The counter moves past the table, so a HUD never shows the final
    // round as still current on the victory screen.
    assert_eq!(engine.current_round(), catalog::final_round() + 1);
    assert!(matches!(engine.load_game(), Err(SaveStoreError::Missing)));

    // A won session ignores further ticks.
    engine.update(TICK).expect("autosave");
    assert!(engine.is_won());
}

#[test]
fn crossroad_exclusivity_is_enforced_through_the_command_surface() {
    let mut engine = fresh_engine(MapId::Desert, Difficulty::Easy);
    let spot = desert_open_ground();
    assert!(engine.place_tower(TowerKind::Dart, spot));
    let id = engine.tower_snapshots()[0].id;

    assert!(engine.upgrade_tower(id, 2));
    assert!(engine.upgrade_tower(id, 2));
    // Path 2 claimed the crossroad; siblings may climb to tier 2 but
    // only the claimant continues past it.
    assert!(engine.upgrade_tower(id, 1));
    assert!(engine.available_upgrade(id, 1).is_some());
    assert!(engine.upgrade_tower(id, 1));
    assert!(engine.available_upgrade(id, 1).is_none());
    assert!(!engine.upgrade_tower(id, 1));
    assert!(engine.available_upgrade(id, 2).is_some());
    assert!(engine.available_upgrade(id, 0).is_some());
}

#[test]
fn selling_refunds_seventy_percent_of_total_investment() {
    let mut engine = fresh_engine(MapId::Desert, Difficulty::Medium);
    let spot = desert_open_ground();
    assert!(engine.place_tower(TowerKind::Dart, spot));
    let id = engine.tower_snapshots()[0].id;
    assert!(engine.upgrade_tower(id, 0));
    let before = engine.money();

    assert!(engine.sell_tower(id));
    // 70% of the 200 purchase plus the 120 upgrade, floored.
    assert_eq!(engine.money(), before + 224);
    assert!(engine.tower_snapshots().is_empty());
    assert!(engine.is_valid_placement(TowerKind::Dart, spot));
}

#[test]
fn targeting_priority_cycles_through_all_modes() {
    let mut engine = fresh_engine(MapId::Desert, Difficulty::Medium);
    assert!(engine.place_tower(TowerKind::Dart, desert_open_ground()));
    let id = engine.tower_snapshots()[0].id;

    assert_eq!(engine.cycle_targeting_priority(id), Some(TargetPriority::Last));
    assert_eq!(
        engine.cycle_targeting_priority(id),
        Some(TargetPriority::Strongest)
    );
    assert_eq!(
        engine.cycle_targeting_priority(id),
        Some(TargetPriority::Closest)
    );
    assert_eq!(engine.cycle_targeting_priority(id), Some(TargetPriority::First));
}

#[test]
fn sound_cues_drain_once() {
    let mut engine = fresh_engine(MapId::Desert, Difficulty::Medium);
    assert!(engine.place_tower(TowerKind::Dart, desert_open_ground()));
    let cues = engine.drain_sound_cues();
    assert!(cues.contains(&SoundCue::TowerPlaced));
    assert!(engine.drain_sound_cues().is_empty());
}
