//! Determinism and reset tests.
//!
//! These tests verify that `next` draws all its randomness from the
//! state-carried RNG, and that a reset state can be set up again.

use tabletop_engine::core::{GameConfig, GameRng, GameState, PlayerId};
use tabletop_engine::games::cave::Cave;
use tabletop_engine::games::monastery::{Area, Monastery, MonasteryAction, MonasteryTurnOrder, Resource, USE_MONKS};
use tabletop_engine::rules::ForwardModel;
use tabletop_engine::turn::{TurnOrder, TurnState};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Monastery state with seat 0 working the meadow with a piety-3 monk.
fn foraging_state(seed: u64) -> (ForwardModel<Monastery>, GameState<Monastery>) {
    init_logging();
    let model = ForwardModel::new(Monastery::default());
    let mut state = model.new_state(GameConfig::new(2).with_seed(seed));
    let p0 = PlayerId::new(0);

    let monk = Monastery::find_monk(&state, p0, Area::Dormitory, 3).unwrap();
    Monastery::move_monk(&mut state, monk, Area::Meadow);
    state.turn.phase = USE_MONKS;
    state.globals.area = Area::Meadow;
    let tokens = state.globals.board().tokens(Area::Meadow);
    state.components.deck_mut(tokens).take_all();
    MonasteryTurnOrder.start_turn(&mut state, p0);
    (model, state)
}

// =============================================================================
// Determinism
// =============================================================================

/// Test that the same random action on equal states gives equal results.
#[test]
fn test_random_action_is_deterministic() {
    let (model, state) = foraging_state(23);
    let p0 = PlayerId::new(0);
    let mut a = state.clone();
    let mut b = state.clone();

    for _ in 0..3 {
        model.next(&mut a, &MonasteryAction::Forage).unwrap();
        model.next(&mut b, &MonasteryAction::Forage).unwrap();
    }

    assert_eq!(a, b);
    assert_eq!(a.rng.state(), b.rng.state());
    assert_ne!(a.rng.state(), state.rng.state());
    for resource in [Resource::Honey, Resource::Grain] {
        assert_eq!(Monastery::resource(&a, p0, resource), Monastery::resource(&b, p0, resource));
    }
}

/// Test that whole matches replay identically from the same seed.
#[test]
fn test_match_replays_from_seed() {
    init_logging();
    let model = ForwardModel::new(Monastery::default());
    let play = |seed: u64| {
        let mut state = model.new_state(GameConfig::new(3).with_seed(seed));
        let mut agent = GameRng::new(1);
        for _ in 0..400 {
            if state.is_terminal() {
                break;
            }
            let actions = model.compute_available_actions(&state);
            let choice = *agent.choose(&actions).unwrap();
            model.next(&mut state, &choice).unwrap();
        }
        state
    };

    let a = play(8);
    let b = play(8);
    assert_eq!(a, b);
    assert_eq!(a.rng.state(), b.rng.state());
    assert_eq!(a.history(), b.history());
}

// =============================================================================
// Reset
// =============================================================================

/// Test that reset empties a played state and reseeds its RNG.
#[test]
fn test_reset_returns_empty_shell() {
    init_logging();
    let model = ForwardModel::new(Cave::default());
    let config = GameConfig::new(3).with_seed(64);
    let mut state = model.new_state(config.clone());
    for _ in 0..10 {
        let actions = model.compute_available_actions(&state);
        model.next(&mut state, &actions[0]).unwrap();
    }
    assert!(!state.history().is_empty());

    state.reset();

    assert!(state.components.is_empty());
    assert!(state.stack().is_empty());
    assert!(state.history().is_empty());
    assert!(state.globals.board.is_none());
    assert!(!state.is_terminal());
    assert_eq!(state.turn, TurnState::new(3));
    assert_eq!(state.config(), &config);
    assert_eq!(state.rng.state(), GameRng::new(64).state());
    assert!(PlayerId::all(3).all(|p| state.submission(p).is_none()));
}

/// Test that setup repopulates a reset state exactly as a fresh one.
#[test]
fn test_setup_after_reset() {
    init_logging();
    let model = ForwardModel::new(Monastery::default());
    let config = GameConfig::new(2).with_seed(90);
    let fresh = model.new_state(config.clone());

    let (_, mut state) = foraging_state(90);
    model.next(&mut state, &MonasteryAction::Forage).unwrap();
    state.reset();
    model.setup(&mut state);

    assert_eq!(state, fresh);
    assert_eq!(state.rng.state(), fresh.rng.state());
    assert!(state.check_invariants().is_ok());
}
