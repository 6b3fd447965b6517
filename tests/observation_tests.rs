//! Observation vector tests.
//!
//! These tests verify that the cave observation keeps a fixed length,
//! scales by its documented constant divisors and names its quantities.

use tabletop_engine::core::{GameConfig, GameState, PlayerId};
use tabletop_engine::games::cave::Cave;
use tabletop_engine::observation::Vectorise;
use tabletop_engine::rules::ForwardModel;

const EPSILON: f64 = 1e-9;

/// Play a cave match with the first legal action, calling `check` for
/// every seat before each step.
fn observe_playout(player_count: usize, mut check: impl FnMut(&Cave, &GameState<Cave>, PlayerId)) {
    let _ = env_logger::builder().is_test(true).try_init();
    let model = ForwardModel::new(Cave::default());
    let mut state = model.new_state(GameConfig::new(player_count).with_seed(77));

    loop {
        for p in state.player_ids() {
            check(model.game(), &state, p);
        }
        if state.is_terminal() {
            return;
        }
        let actions = model.compute_available_actions(&state);
        model.next(&mut state, &actions[0]).unwrap();
    }
}

// =============================================================================
// Vectors
// =============================================================================

/// Test that the vector length never changes during a match.
#[test]
fn test_vector_length_constant() {
    for player_count in [1, 3, 6] {
        let config = GameConfig::new(player_count);
        assert_eq!(Cave::default().observation_space(&config), 9);

        observe_playout(player_count, |cave, state, p| {
            assert_eq!(cave.observation_vector(state, p).len(), 9);
            assert_eq!(cave.normalized_observation_vector(state, p).len(), 9);
        });
    }
}

/// Test that each normalized entry is the raw value over its fixed divisor.
#[test]
fn test_normalized_uses_fixed_divisors() {
    let player_count = 4;
    let divisors = [100.0, 17.0, player_count as f64, 5.0, 3.0, 3.0, 3.0, 3.0, 3.0];

    observe_playout(player_count, |cave, state, p| {
        let raw = cave.observation_vector(state, p);
        let scaled = cave.normalized_observation_vector(state, p);
        for (i, divisor) in divisors.iter().enumerate() {
            assert!((scaled[i] - raw[i] / divisor).abs() < EPSILON, "entry {i}: {raw:?} vs {scaled:?}");
        }
    });
}

/// Test that the vector is taken from the requested seat's perspective.
#[test]
fn test_vector_uses_perspective() {
    let model = ForwardModel::new(Cave::default());
    let mut state = model.new_state(GameConfig::new(2).with_seed(3));
    let chest = state.globals.board().chests[1];
    state.adjust_counter(chest, 42);

    let cave = model.game();
    assert!((cave.observation_vector(&state, PlayerId::new(1))[0] - 42.0).abs() < EPSILON);
    assert!(cave.observation_vector(&state, PlayerId::new(0))[0].abs() < EPSILON);
}

// =============================================================================
// Snapshots
// =============================================================================

/// Test the snapshot's key set and its agreement with the vector.
#[test]
fn test_snapshot_keys() {
    observe_playout(3, |cave, state, p| {
        let snapshot = cave.snapshot(state, p);
        let keys: Vec<&str> = snapshot.keys().collect();
        assert_eq!(
            keys,
            vec![
                "cave",
                "chest_gems",
                "explorers",
                "explosions_on_path",
                "path_gems",
                "poison_gas_on_path",
                "rockfalls_on_path",
                "scorpions_on_path",
                "snakes_on_path",
            ]
        );

        let vector = cave.observation_vector(state, p);
        assert_eq!(snapshot.get("chest_gems"), Some(vector[0]));
        assert_eq!(snapshot.get("explorers"), Some(vector[2]));
        assert_eq!(snapshot.get("cave"), Some(vector[3]));
        assert_eq!(snapshot.get("snakes_on_path"), Some(vector[8]));
    });
}

/// Test that a snapshot serializes as a flat JSON object.
#[test]
fn test_snapshot_serializes() {
    let model = ForwardModel::new(Cave::default());
    let state = model.new_state(GameConfig::new(2).with_seed(5));
    let snapshot = model.game().snapshot(&state, PlayerId::new(0));

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["explorers"], serde_json::json!(2.0));
    assert_eq!(json.as_object().map(|o| o.len()), Some(9));
}
