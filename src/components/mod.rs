//! Component model: the registry and the containers it owns.
//!
//! Every mutable game object is a component registered in the state's
//! [`ComponentArena`]:
//!
//! - [`Deck`]: ordered card pile, top at index 0
//! - [`Counter`]: integer tally with optional bounds
//! - [`Token`]: pawn with a value and a location
//! - [`Tracker`]: flag or small enumerated state
//!
//! Components never point at each other. A game keeps the ids of its root
//! components in its globals and exposes them through [`ComponentRoots`], so
//! the state can check that the roots and the registry agree.

pub mod counter;
pub mod deck;
pub mod registry;
pub mod token;
pub mod tracker;

pub use counter::{BoundPolicy, Counter};
pub use deck::Deck;
pub use registry::{Component, ComponentArena, ComponentData, ComponentKind, ComponentMeta};
pub use token::Token;
pub use tracker::Tracker;

use crate::core::ComponentId;

/// Enumerates the component ids a game's globals hold.
///
/// The ids returned must be exactly the ids in the registry: every
/// registered component appears once, and nothing else does.
pub trait ComponentRoots {
    fn roots(&self) -> Vec<ComponentId>;
}
