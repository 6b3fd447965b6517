//! Seats, per-seat storage and observers.
//!
//! ## PlayerId
//!
//! Type-safe seat index supporting 1-255 players.
//!
//! ## PlayerMap
//!
//! Per-seat values backed by a `Vec` for O(1) access, indexable by `PlayerId`.
//!
//! ## Observer
//!
//! Who a state copy is made for: one seat (redacted under partial
//! observability) or nobody in particular (full information).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier supporting 1-255 players.
///
/// Seats are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use tabletop_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// Seats in clockwise order starting *after* `self`, ending with `self`.
    ///
    /// ```
    /// use tabletop_engine::core::PlayerId;
    ///
    /// let order: Vec<_> = PlayerId::new(1).clockwise(3).collect();
    /// assert_eq!(order, vec![PlayerId::new(2), PlayerId::new(0), PlayerId::new(1)]);
    /// ```
    pub fn clockwise(self, player_count: usize) -> impl Iterator<Item = PlayerId> {
        let start = self.index();
        (1..=player_count).map(move |offset| PlayerId(((start + offset) % player_count) as u8))
    }

    /// The seat `offset` places to the left, wrapping.
    #[must_use]
    pub fn rotate(self, offset: usize, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + offset) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Perspective a state copy is produced for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Observer {
    /// Full information: ground truth, logging, bookkeeping.
    Full,
    /// One seat's view. Redacted when the match is partially observable.
    Player(PlayerId),
}

impl Observer {
    /// The observing seat, if any.
    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Observer::Full => None,
            Observer::Player(p) => Some(p),
        }
    }
}

impl From<PlayerId> for Observer {
    fn from(player: PlayerId) -> Self {
        Observer::Player(player)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use tabletop_engine::core::{PlayerId, PlayerMap};
///
/// let mut budgets: PlayerMap<i32> = PlayerMap::new(4, |_| 3);
/// budgets[PlayerId::new(1)] -= 1;
/// assert_eq!(budgets[PlayerId::new(1)], 2);
/// assert_eq!(budgets.values().sum::<i32>(), 11);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data.iter().enumerate().map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data.iter_mut().enumerate().map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Overwrite every seat with the result of `f`.
    pub fn fill_with(&mut self, f: impl Fn(PlayerId) -> T) {
        for (i, slot) in self.data.iter_mut().enumerate() {
            *slot = f(PlayerId(i as u8));
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clockwise_wraps_and_ends_with_self() {
        let order: Vec<_> = PlayerId::new(3).clockwise(4).collect();
        assert_eq!(
            order,
            vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)]
        );

        let solo: Vec<_> = PlayerId::new(0).clockwise(1).collect();
        assert_eq!(solo, vec![PlayerId::new(0)]);
    }

    #[test]
    fn test_rotate() {
        assert_eq!(PlayerId::new(2).rotate(1, 3), PlayerId::new(0));
        assert_eq!(PlayerId::new(0).rotate(5, 4), PlayerId::new(1));
    }

    #[test]
    fn test_observer() {
        assert_eq!(Observer::Full.player(), None);
        assert_eq!(Observer::from(PlayerId::new(1)).player(), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_player_map_fill_with() {
        let mut map: PlayerMap<bool> = PlayerMap::with_value(3, true);
        map.fill_with(|p| p.index() == 1);

        let flags: Vec<_> = map.values().copied().collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<i32> = PlayerMap::new(3, |p| p.index() as i32 * 10);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[2], (PlayerId::new(2), &20));
        assert_eq!(map.player_count(), 3);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(2, |p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::with_value(0, 0);
    }
}
