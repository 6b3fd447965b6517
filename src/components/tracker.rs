//! Boolean and small enumerated state.

use serde::{Deserialize, Serialize};

use crate::error::ComponentError;

/// A flag or a choice among `states` values (`0..states`).
///
/// ```
/// use tabletop_engine::components::Tracker;
///
/// let mut weather = Tracker::choice(0, 3);
/// assert!(weather.set(2).is_ok());
/// assert!(weather.set(3).is_err());
/// assert_eq!(weather.value(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tracker {
    value: u8,
    states: u8,
}

impl Tracker {
    /// Two-state tracker.
    #[must_use]
    pub fn flag(set: bool) -> Self {
        Self {
            value: u8::from(set),
            states: 2,
        }
    }

    /// Tracker with `states` values, starting at `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value >= states`.
    #[must_use]
    pub fn choice(value: u8, states: u8) -> Self {
        assert!(value < states, "tracker value {value} is not one of {states} states");
        Self { value, states }
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.value
    }

    #[must_use]
    pub fn states(&self) -> u8 {
        self.states
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.value != 0
    }

    pub fn set(&mut self, value: u8) -> Result<(), ComponentError> {
        if value >= self.states {
            return Err(ComponentError::OutOfBounds {
                value: i64::from(value),
                min: 0,
                max: i64::from(self.states) - 1,
            });
        }
        self.value = value;
        Ok(())
    }

    pub fn set_flag(&mut self, set: bool) {
        self.value = u8::from(set);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag() {
        let mut flag = Tracker::flag(false);
        assert!(!flag.is_set());
        flag.set_flag(true);
        assert!(flag.is_set());
        assert_eq!(flag.states(), 2);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut tracker = Tracker::choice(1, 4);
        assert_eq!(
            tracker.set(4),
            Err(ComponentError::OutOfBounds { value: 4, min: 0, max: 3 })
        );
        assert_eq!(tracker.value(), 1);
    }

    #[test]
    #[should_panic(expected = "not one of")]
    fn test_invalid_initial_choice() {
        let _ = Tracker::choice(5, 5);
    }
}
