//! The per-game contract.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

use crate::components::ComponentRoots;
use crate::core::{GameAction, GameState, PlayerId};
use crate::stack::ActionSequence;
use crate::turn::TurnOrder;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Multiple winners (team games, shared victory).
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }

    /// Result from per-seat scores: sole top scorer wins, a tie at the top
    /// is a shared win, everyone tied is a draw.
    #[must_use]
    pub fn from_scores(scores: &[(PlayerId, f64)]) -> Self {
        let best = scores.iter().map(|&(_, s)| s).fold(f64::NEG_INFINITY, f64::max);
        let top: Vec<PlayerId> = scores
            .iter()
            .filter(|&&(_, s)| s == best)
            .map(|&(p, _)| p)
            .collect();

        match top.as_slice() {
            [single] => GameResult::Winner(*single),
            _ if top.len() == scores.len() => GameResult::Draw,
            _ => GameResult::Winners(top),
        }
    }
}

/// A pluggable position evaluator.
///
/// Must be deterministic and side-effect free. Closures with the matching
/// signature implement it.
pub trait Evaluator<G: Game> {
    fn evaluate(&self, state: &GameState<G>, player: PlayerId) -> f64;
}

impl<G, F> Evaluator<G> for F
where
    G: Game,
    F: Fn(&GameState<G>, PlayerId) -> f64,
{
    fn evaluate(&self, state: &GameState<G>, player: PlayerId) -> f64 {
        self(state, player)
    }
}

/// A game's rules, plugged into the engine.
///
/// The engine calls these methods; it never interprets game concepts
/// directly. Implementations are usually small structs holding the game's
/// parameters.
///
/// ## Implementation Notes
///
/// - `setup`: populate a freshly reset state. Register every component and
///   keep its id in the globals.
/// - `top_level_actions`: candidates; the forward model filters them by
///   budget and `check`, so over-offering is safe.
/// - `no_op`: must always pass `check` and cost nothing.
pub trait Game: Sized {
    /// Card element type stored in decks.
    ///
    /// The ordering gives hidden decks a canonical order to reshuffle from
    /// when redacting.
    type Card: Clone + Debug + PartialEq + Eq + Ord + Hash;

    /// Action values.
    type Action: GameAction<Self>;

    /// In-progress sequence values. Use [`crate::stack::NoSequence`] when
    /// the game has no composite actions.
    type Sequence: ActionSequence<Self>;

    /// Per-game state: scalars and the ids of the root components.
    type Globals: Clone + Debug + Default + PartialEq + Eq + Hash + ComponentRoots;

    /// The game's turn-order hooks.
    type Turns: TurnOrder<Self>;

    /// Turn-order hooks for this game.
    fn turn_order(&self) -> &Self::Turns;

    /// Populate a freshly reset state.
    fn setup(&self, state: &mut GameState<Self>);

    /// Candidate actions for `player` when nothing is in progress.
    fn top_level_actions(&self, state: &GameState<Self>, player: PlayerId) -> Vec<Self::Action>;

    /// The action offered when nothing else is legal.
    fn no_op() -> Self::Action;

    /// Score used for ranking and game end.
    fn game_score(state: &GameState<Self>, player: PlayerId) -> f64;

    /// Score used by search agents. Defaults to the game score.
    fn heuristic_score(state: &GameState<Self>, player: PlayerId) -> f64 {
        Self::game_score(state, player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::new(0)));

        let team = GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(2)]);
        assert!(team.is_winner(PlayerId::new(0)));
        assert!(!team.is_winner(PlayerId::new(1)));
        assert!(team.is_winner(PlayerId::new(2)));
    }

    #[test]
    fn test_result_from_scores() {
        let p = PlayerId::new;

        assert_eq!(
            GameResult::from_scores(&[(p(0), 3.0), (p(1), 7.0), (p(2), 1.0)]),
            GameResult::Winner(p(1))
        );
        assert_eq!(
            GameResult::from_scores(&[(p(0), 7.0), (p(1), 7.0), (p(2), 1.0)]),
            GameResult::Winners(vec![p(0), p(1)])
        );
        assert_eq!(
            GameResult::from_scores(&[(p(0), 2.0), (p(1), 2.0)]),
            GameResult::Draw
        );
    }
}
