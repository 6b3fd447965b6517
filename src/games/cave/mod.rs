//! Push-your-luck cave exploration.
//!
//! Exercises the simultaneous-turn path of the engine and redaction of a
//! hidden draw pile:
//! - Every explorer submits Continue or Exit; nothing happens until all have
//! - Submissions are applied in seat order, then the next card is revealed
//! - The main deck is hidden; redacted copies reshuffle it and forget other
//!   players' pending submissions
//! - Observation vector of nine values with fixed divisors
//!
//! Supports 1-8 players.

mod actions;
mod game;
mod observation;
mod params;

pub use actions::CaveAction;
pub use game::{Cave, CaveBoard, CaveCard, CaveGlobals, CaveHeuristic, CaveTurnOrder, Hazard, EXPLORE};
pub use params::{CaveParams, TREASURE_VALUES};
