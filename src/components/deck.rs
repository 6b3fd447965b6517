//! Ordered card container.
//!
//! Index 0 is the top of the deck. Backed by `im::Vector` so cloning a state
//! shares storage until one side writes.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::GameRng;
use crate::error::ComponentError;

/// An ordered pile of cards of one element type.
///
/// ```
/// use tabletop_engine::components::Deck;
///
/// let mut deck: Deck<u8> = Deck::from_cards([1, 2, 3]);
/// assert_eq!(deck.peek(), Some(&1));
/// deck.add_to_bottom(4);
/// assert_eq!(deck.draw(), Some(1));
/// assert_eq!(deck.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deck<C: Clone> {
    cards: Vector<C>,
    capacity: Option<usize>,
}

impl<C: Clone> Default for Deck<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clone> Deck<C> {
    /// Create an empty, unbounded deck.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: Vector::new(),
            capacity: None,
        }
    }

    /// Create an empty deck holding at most `capacity` cards.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cards: Vector::new(),
            capacity: Some(capacity),
        }
    }

    /// Create a deck from cards listed top first.
    pub fn from_cards(cards: impl IntoIterator<Item = C>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            capacity: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Maximum number of cards, if bounded.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Check whether another card would exceed the capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.cards.len() >= cap)
    }

    /// Card at position `index` (0 = top).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.cards.get(index)
    }

    /// Top card without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&C> {
        self.cards.front()
    }

    /// Bottom card without removing it.
    #[must_use]
    pub fn peek_bottom(&self) -> Option<&C> {
        self.cards.back()
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Option<C> {
        self.cards.pop_front()
    }

    /// Remove and return the card at `index`.
    pub fn remove(&mut self, index: usize) -> Option<C> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    /// Remove every card, returning them top first.
    pub fn take_all(&mut self) -> Vec<C> {
        std::mem::take(&mut self.cards).into_iter().collect()
    }

    /// Put a card on top.
    ///
    /// # Panics
    ///
    /// Panics if the deck is full. Use [`Deck::try_add_to_top`] when the
    /// capacity is not already checked by the caller.
    pub fn add_to_top(&mut self, card: C) {
        if let Err(err) = self.try_add_to_top(card) {
            panic!("add_to_top on a full deck: {err}");
        }
    }

    /// Put a card at the bottom.
    ///
    /// # Panics
    ///
    /// Panics if the deck is full.
    pub fn add_to_bottom(&mut self, card: C) {
        if let Err(err) = self.try_add_to_bottom(card) {
            panic!("add_to_bottom on a full deck: {err}");
        }
    }

    /// Put a card on top, failing if the deck is full.
    pub fn try_add_to_top(&mut self, card: C) -> Result<(), ComponentError> {
        self.ensure_room()?;
        self.cards.push_front(card);
        Ok(())
    }

    /// Put a card at the bottom, failing if the deck is full.
    pub fn try_add_to_bottom(&mut self, card: C) -> Result<(), ComponentError> {
        self.ensure_room()?;
        self.cards.push_back(card);
        Ok(())
    }

    fn ensure_room(&self) -> Result<(), ComponentError> {
        match self.capacity {
            Some(capacity) if self.cards.len() >= capacity => {
                Err(ComponentError::CapacityExceeded { capacity })
            }
            _ => Ok(()),
        }
    }

    /// Shuffle in place using the supplied stream.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<C> = self.cards.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Iterate top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.cards.iter()
    }

    /// Index of the first card matching `predicate`.
    pub fn position(&self, predicate: impl Fn(&C) -> bool) -> Option<usize> {
        self.cards.iter().position(predicate)
    }

    /// Count cards matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&C) -> bool) -> usize {
        self.cards.iter().filter(|c| predicate(c)).count()
    }
}

impl<C: Clone + PartialEq> Deck<C> {
    #[must_use]
    pub fn contains(&self, card: &C) -> bool {
        self.cards.contains(card)
    }
}

impl<C: Clone + Ord> Deck<C> {
    /// Put the cards in ascending order, forgetting the current order.
    pub fn sort(&mut self) {
        self.cards.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_is_index_zero() {
        let mut deck = Deck::new();
        deck.add_to_top('b');
        deck.add_to_top('a');
        deck.add_to_bottom('c');

        assert_eq!(deck.get(0), Some(&'a'));
        assert_eq!(deck.peek_bottom(), Some(&'c'));
        assert_eq!(deck.iter().copied().collect::<String>(), "abc");
    }

    #[test]
    fn test_sort_forgets_order() {
        let mut a = Deck::from_cards([3, 1, 2, 1]);
        let mut b = Deck::from_cards([1, 2, 1, 3]);
        a.sort();
        b.sort();

        assert_eq!(a, b);
        assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![1, 1, 2, 3]);
    }

    #[test]
    fn test_draw_and_remove() {
        let mut deck = Deck::from_cards([10, 20, 30, 40]);

        assert_eq!(deck.remove(2), Some(30));
        assert_eq!(deck.remove(9), None);
        assert_eq!(deck.draw(), Some(10));
        assert_eq!(deck.len(), 2);

        let rest = deck.take_all();
        assert_eq!(rest, vec![20, 40]);
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn test_capacity() {
        let mut deck = Deck::with_capacity(2);
        deck.add_to_top(1);
        deck.add_to_bottom(2);

        assert!(deck.is_full());
        assert_eq!(
            deck.try_add_to_top(3),
            Err(ComponentError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(deck.len(), 2);
    }

    #[test]
    #[should_panic(expected = "full deck")]
    fn test_add_to_full_deck_panics() {
        let mut deck = Deck::with_capacity(0);
        deck.add_to_top(1);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let original = Deck::from_cards(0..20);

        let mut a = original.clone();
        let mut b = original.clone();
        a.shuffle(&mut GameRng::new(5));
        b.shuffle(&mut GameRng::new(5));

        assert_eq!(a, b);
        assert_ne!(a, original);

        let mut sorted: Vec<_> = a.iter().copied().collect();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut deck = Deck::from_cards([1, 2, 3]);
        let copy = deck.clone();

        deck.draw();

        assert_eq!(copy.len(), 3);
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn test_queries() {
        let deck = Deck::from_cards([3, 1, 4, 1, 5]);
        assert!(deck.contains(&4));
        assert_eq!(deck.position(|&c| c == 1), Some(1));
        assert_eq!(deck.count(|&c| c == 1), 2);
    }
}
