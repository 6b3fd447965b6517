//! Reference games.
//!
//! - `cave`: simultaneous decisions, hidden draw pile
//! - `monastery`: action-point budgets, composite actions

pub mod cave;
pub mod monastery;
