//! Component identification and ownership.
//!
//! Every mutable game object (deck, counter, token, tracker) and every
//! pending composite action gets a `ComponentId` from the state's registry.
//!
//! ## Identity across copies
//!
//! A copied state keeps every id. Cross-references are stored as ids, never
//! as pointers, so "the action currently affecting component 42" still means
//! the same thing in a copy.
//!
//! ```
//! use tabletop_engine::core::{ComponentId, Owner, PlayerId};
//!
//! let id = ComponentId(7);
//! assert_eq!(id.raw(), 7);
//!
//! let owner = Owner::Player(PlayerId::new(1));
//! assert!(owner.is_player(PlayerId::new(1)));
//! assert!(!Owner::Shared.is_player(PlayerId::new(1)));
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Unique identifier for a component within one game state.
///
/// Ids are allocated monotonically and never reused within a state, so an
/// id that has been released (a popped in-progress action, a removed deck)
/// never comes back to mean something else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

impl ComponentId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ComponentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Component({})", self.0)
    }
}

/// Who a component belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// Common pool, board or supply.
    #[default]
    Shared,
    /// Belongs to one seat.
    Player(PlayerId),
}

impl Owner {
    /// Check whether this component belongs to `player`.
    #[must_use]
    pub fn is_player(self, player: PlayerId) -> bool {
        self == Owner::Player(player)
    }

    /// The owning player, if any.
    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Owner::Player(p) => Some(p),
            Owner::Shared => None,
        }
    }
}

impl From<PlayerId> for Owner {
    fn from(player: PlayerId) -> Self {
        Owner::Player(player)
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Owner::Shared => write!(f, "shared"),
            Owner::Player(p) => write!(f, "{p}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_id_ordering() {
        assert!(ComponentId(1) < ComponentId(2));
        assert_eq!(ComponentId::from(9), ComponentId(9));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ComponentId(42)), "Component(42)");
        assert_eq!(format!("{}", Owner::Shared), "shared");
        assert_eq!(format!("{}", Owner::Player(PlayerId::new(2))), "Player 2");
    }

    #[test]
    fn test_owner_player() {
        let p = PlayerId::new(3);
        assert_eq!(Owner::from(p).player(), Some(p));
        assert_eq!(Owner::Shared.player(), None);
        assert_eq!(Owner::default(), Owner::Shared);
    }

    #[test]
    fn test_serialization() {
        let id = ComponentId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ComponentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);

        let owner = Owner::Player(PlayerId::new(1));
        let json = serde_json::to_string(&owner).unwrap();
        let back: Owner = serde_json::from_str(&json).unwrap();
        assert_eq!(owner, back);
    }
}
