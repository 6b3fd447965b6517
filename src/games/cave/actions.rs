//! Cave actions.

use serde::{Deserialize, Serialize};

use super::game::Cave;
use crate::core::{Applied, GameAction, GameState, PlayerId};
use crate::error::IllegalAction;
use crate::stack::NoSequence;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaveAction {
    /// Stay in the cave for the next card.
    Continue,
    /// Leave now, banking what you carry plus a share of the path gems.
    Exit,
    /// Nothing to decide.
    Rest,
}

impl GameAction<Cave> for CaveAction {
    fn check(&self, state: &GameState<Cave>, player: PlayerId) -> Result<(), IllegalAction> {
        match self {
            CaveAction::Continue | CaveAction::Exit if !Cave::is_in_cave(state, player) => {
                Err(IllegalAction::precondition(format!("{player} is not in the cave")))
            }
            _ => Ok(()),
        }
    }

    fn apply(&self, state: &mut GameState<Cave>, player: PlayerId) -> Applied<NoSequence> {
        if *self == CaveAction::Exit {
            let flag = state.globals.board().in_cave[player.index()];
            state.components.tracker_mut(flag).set_flag(false);
            state.globals.leaving.push(player);
        }
        Applied::Continue
    }
}
