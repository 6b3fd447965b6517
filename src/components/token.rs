//! Pawns and workers.

use serde::{Deserialize, Serialize};

/// A pawn with an integer value and a game-defined location.
///
/// The engine never interprets `location`; games map their area enums to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub value: i64,
    pub location: u16,
}

impl Token {
    #[must_use]
    pub fn new(value: i64, location: u16) -> Self {
        Self { value, location }
    }

    pub fn move_to(&mut self, location: u16) {
        self.location = location;
    }

    #[must_use]
    pub fn is_at(&self, location: u16) -> bool {
        self.location == location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move() {
        let mut token = Token::new(2, 0);
        token.move_to(3);
        assert!(token.is_at(3));
        assert_eq!(token.value, 2);
    }
}
