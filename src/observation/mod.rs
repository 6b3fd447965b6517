//! Observations for learning agents.
//!
//! A game that supports learning agents implements [`Vectorise`]:
//! - a fixed-length numeric vector
//! - the same vector scaled to `[0, 1]` by constant, documented divisors
//! - a [`Snapshot`]: named observable quantities for humans and logs
//!
//! Vector length depends only on the match configuration, never on the
//! position. Divisors are constants of the game, never derived at runtime.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::{GameConfig, GameState, PlayerId};
use crate::rules::Game;

/// Numeric observation of a state from one seat's perspective.
///
/// Implementations must only read what `perspective` is allowed to see.
pub trait Vectorise<G: Game> {
    /// Length of the observation vector for `config`.
    fn observation_space(&self, config: &GameConfig) -> usize;

    /// Raw observation values.
    fn observation_vector(&self, state: &GameState<G>, perspective: PlayerId) -> Vec<f64>;

    /// Observation values scaled to `[0, 1]`.
    fn normalized_observation_vector(&self, state: &GameState<G>, perspective: PlayerId) -> Vec<f64>;

    /// Named observable quantities.
    fn snapshot(&self, state: &GameState<G>, perspective: PlayerId) -> Snapshot;
}

/// Keyed, ordered mapping of observable quantities.
///
/// ```
/// use tabletop_engine::observation::Snapshot;
///
/// let snapshot = Snapshot::new().with("cave", 2.0).with("explorers", 3.0);
/// assert_eq!(snapshot.get("cave"), Some(2.0));
/// assert_eq!(snapshot.keys().collect::<Vec<_>>(), vec!["cave", "explorers"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    values: BTreeMap<String, f64>,
}

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }
}
