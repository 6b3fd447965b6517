//! Match configuration types.
//!
//! - `GameConfig`: seats, master seed, observability
//! - `Visibility`: who may see a component's contents
//! - `PhaseId`: opaque phase identifier, meaning assigned by each game
//!
//! Game-specific parameters (board sizes, pool sizes) live in each game's
//! own params struct; the core only needs what it acts on.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Visibility rules for a component's contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Everyone sees everything (board, path, discard).
    #[default]
    Public,
    /// Only the owner sees the contents (hand).
    OwnerOnly,
    /// Nobody sees the order (face-down draw pile, token bag).
    Hidden,
}

impl Visibility {
    /// Can `observer` see the contents of a component with this visibility?
    ///
    /// `owner` is the owning seat, `None` for shared components.
    #[must_use]
    pub fn visible_to(self, owner: Option<PlayerId>, observer: PlayerId) -> bool {
        match self {
            Visibility::Public => true,
            Visibility::OwnerOnly => owner == Some(observer),
            Visibility::Hidden => false,
        }
    }
}

/// Opaque phase identifier. Games define their own phases.
///
/// The engine doesn't interpret phase IDs - they're just compared
/// for equality. Games map their phase enums to and from this type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseId(pub u32);

impl PhaseId {
    /// Create a new phase ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PhaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Phase({})", self.0)
    }
}

/// Core match configuration.
///
/// ```
/// use tabletop_engine::core::GameConfig;
///
/// let config = GameConfig::new(4).with_seed(7).partially_observable();
/// assert_eq!(config.player_count, 4);
/// assert!(config.partial_observable);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (1-255).
    pub player_count: usize,

    /// Master seed for the state-carried RNG.
    #[serde(default)]
    pub seed: u64,

    /// Redact hidden information when copying for a specific observer.
    #[serde(default)]
    pub partial_observable: bool,
}

impl GameConfig {
    /// Create a new configuration.
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            seed: 0,
            partial_observable: false,
        }
    }

    /// Set the master seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Mark the match as partially observable.
    #[must_use]
    pub fn partially_observable(mut self) -> Self {
        self.partial_observable = true;
        self
    }
}
