//! State copy and redaction tests.
//!
//! These tests verify that copies are faithful and independent, and that a
//! copy for one player hides exactly what that player cannot see.

use tabletop_engine::components::Component;
use tabletop_engine::core::{GameConfig, GameRng, GameState, Observer, PlayerId};
use tabletop_engine::games::cave::{Cave, CaveAction, CaveCard};
use tabletop_engine::games::monastery::Monastery;
use tabletop_engine::rules::ForwardModel;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn cave_state(partial: bool) -> (ForwardModel<Cave>, GameState<Cave>) {
    init_logging();
    let model = ForwardModel::new(Cave::default());
    let mut config = GameConfig::new(3).with_seed(2024);
    if partial {
        config = config.partially_observable();
    }
    let state = model.new_state(config);
    (model, state)
}

fn deck_order(state: &GameState<Cave>) -> Vec<CaveCard> {
    state
        .components
        .deck(state.globals.board().main_deck)
        .iter()
        .copied()
        .collect()
}

fn sorted(cards: &[CaveCard]) -> Vec<String> {
    let mut names: Vec<String> = cards.iter().map(|c| format!("{c:?}")).collect();
    names.sort();
    names
}

// ============================================================================
// Fidelity
// ============================================================================

/// Test that a full copy equals its source.
#[test]
fn test_full_copy_equals_source() {
    let (_, state) = cave_state(true);
    let copy = state.copy(Observer::Full);

    assert_eq!(copy, state);
    assert_eq!(deck_order(&copy), deck_order(&state));
}

/// Test that copies are independent of their source.
#[test]
fn test_copy_is_independent() {
    let (model, state) = cave_state(false);
    let before = state.clone();

    let mut copy = state.copy(Observer::Full);
    model.next(&mut copy, &CaveAction::Exit).unwrap();
    let board = copy.globals.board().clone();
    copy.components.deck_mut(board.main_deck).draw();

    assert_eq!(state, before);
    assert_ne!(copy, state);
}

/// Test that a player copy of a fully observable game is a plain copy.
#[test]
fn test_player_copy_without_hidden_information() {
    let (_, state) = cave_state(false);
    let copy = state.copy(Observer::Player(PlayerId::new(1)));

    assert_eq!(copy, state);
    assert_eq!(deck_order(&copy), deck_order(&state));
}

// ============================================================================
// Redaction
// ============================================================================

/// Test that a redacted copy differs only in the order of hidden decks.
#[test]
fn test_redacted_copy_differs_only_in_hidden_order() {
    let (_, state) = cave_state(true);
    let viewer = PlayerId::new(0);
    let copy = state.copy(Observer::Player(viewer));

    assert_eq!(copy.components.len(), state.components.len());
    assert_eq!(copy.turn, state.turn);
    assert_eq!(copy.globals, state.globals);

    for original in state.components.iter() {
        let redacted: &Component<CaveCard> = copy.components.get(original.id()).unwrap();
        assert_eq!(redacted.meta, original.meta);
        if original.is_hidden_deck_for(viewer) {
            let a: Vec<CaveCard> = state.components.deck(original.id()).iter().copied().collect();
            let b: Vec<CaveCard> = copy.components.deck(redacted.id()).iter().copied().collect();
            assert_eq!(sorted(&a), sorted(&b));
        } else {
            assert_eq!(redacted, original);
        }
    }

    // Thirty-odd cards: a reshuffle reproducing the true order is not credible.
    assert_ne!(deck_order(&copy), deck_order(&state));
}

/// Test that consecutive redacted copies of an unchanged state are identical.
#[test]
fn test_redaction_is_seed_linked() {
    let (_, state) = cave_state(true);
    let viewer = Observer::Player(PlayerId::new(2));

    let a = state.copy(viewer);
    let b = state.copy(viewer);

    assert_eq!(a, b);
    assert_eq!(deck_order(&a), deck_order(&b));
}

/// Test that the redacted order carries no trace of the true order.
#[test]
fn test_redaction_independent_of_true_order() {
    let (_, state) = cave_state(true);
    let main_deck = state.globals.board().main_deck;
    let mut reordered = state.clone();
    reordered.components.deck_mut(main_deck).shuffle(&mut GameRng::new(99));
    assert_ne!(deck_order(&reordered), deck_order(&state));

    let viewer = Observer::Player(PlayerId::new(1));
    let a = state.copy(viewer);
    let b = reordered.copy(viewer);

    assert_eq!(a, b);
    assert_eq!(deck_order(&a), deck_order(&b));
}

/// Test that only decks the viewer cannot see are reported hidden.
#[test]
fn test_hidden_components_per_observer() {
    let (_, state) = cave_state(true);
    let main_deck = state.globals.board().main_deck;

    assert_eq!(state.hidden_components(Observer::Player(PlayerId::new(0))), vec![main_deck]);
    assert!(state.hidden_components(Observer::Full).is_empty());

    let (_, open) = cave_state(false);
    assert!(open.hidden_components(Observer::Player(PlayerId::new(0))).is_empty());
}

/// Test that the redaction stream is re-derived once the turn counter moves.
#[test]
fn test_redaction_follows_turn_counter() {
    let (model, mut state) = cave_state(true);
    let viewer = Observer::Player(PlayerId::new(2));
    let true_order = deck_order(&state);
    let before = state.copy(viewer);

    // A submission hands the turn on without drawing: same true order,
    // new turn counter.
    model.next(&mut state, &CaveAction::Continue).unwrap();
    assert_eq!(deck_order(&state), true_order);

    let after = state.copy(viewer);
    assert_eq!(sorted(&deck_order(&after)), sorted(&deck_order(&before)));
    assert_ne!(deck_order(&after), deck_order(&before));
}

/// Test that other players' pending submissions are dropped.
#[test]
fn test_redacted_copy_drops_other_submissions() {
    let (model, mut state) = cave_state(true);
    let p0 = PlayerId::new(0);
    let p1 = PlayerId::new(1);
    model.next_for(&mut state, p0, &CaveAction::Exit).unwrap();

    let theirs = state.copy(Observer::Player(p1));
    assert!(theirs.submission(p0).is_none());

    let mine = state.copy(Observer::Player(p0));
    assert_eq!(mine.submission(p0), Some(&CaveAction::Exit));

    let full = state.copy(Observer::Full);
    assert_eq!(full.submission(p0), Some(&CaveAction::Exit));
}

/// Test that a redacted copy can be played on without touching the source.
#[test]
fn test_redacted_copy_is_playable() {
    let (model, state) = cave_state(true);
    let before = state.clone();
    let mut copy = state.copy(Observer::Player(PlayerId::new(1)));

    while !copy.is_terminal() {
        let actions = model.compute_available_actions(&copy);
        model.next(&mut copy, &actions[0]).unwrap();
    }

    assert_eq!(state, before);
    assert!(!state.is_terminal());
}

// ============================================================================
// Ids across copies
// ============================================================================

/// Test that component ids survive copying.
#[test]
fn test_ids_stable_across_copies() {
    init_logging();
    let model = ForwardModel::new(Monastery::default());
    let state = model.new_state(GameConfig::new(4).with_seed(8).partially_observable());
    let copy = state.copy(Observer::Player(PlayerId::new(3)));

    let ids: Vec<_> = state.components.ids().collect();
    let copied: Vec<_> = copy.components.ids().collect();
    assert_eq!(ids, copied);
    assert_eq!(copy.globals.board(), state.globals.board());
    assert!(copy.check_invariants().is_ok());
}
