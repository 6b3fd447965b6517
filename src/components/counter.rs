//! Integer tallies with optional bounds.

use serde::{Deserialize, Serialize};

use crate::error::ComponentError;

/// What to do with a mutation that would leave the bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundPolicy {
    /// Pin the value to the nearest bound.
    Clamp,
    /// Refuse the mutation and leave the value unchanged.
    #[default]
    Reject,
}

/// A bounded or unbounded integer tally (resources, score, gems).
///
/// ```
/// use tabletop_engine::components::{BoundPolicy, Counter};
///
/// let mut grain = Counter::new(2).with_min(0);
/// assert!(grain.add(-3).is_err());
/// assert_eq!(grain.value(), 2);
///
/// let mut score = Counter::new(0).with_max(10).with_policy(BoundPolicy::Clamp);
/// assert_eq!(score.add(15), Ok(10));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Counter {
    value: i64,
    min: Option<i64>,
    max: Option<i64>,
    policy: BoundPolicy,
}

impl Counter {
    /// Unbounded counter starting at `value`.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self {
            value,
            min: None,
            max: None,
            policy: BoundPolicy::Reject,
        }
    }

    /// Counter bounded to `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is outside the bounds or `min > max`.
    #[must_use]
    pub fn bounded(value: i64, min: i64, max: i64) -> Self {
        Self::new(value).with_min(min).with_max(max)
    }

    #[must_use]
    pub fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self.assert_in_bounds();
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self.assert_in_bounds();
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: BoundPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn assert_in_bounds(&self) {
        let (min, max) = (self.lower(), self.upper());
        assert!(min <= max, "counter bounds [{min}, {max}] are empty");
        assert!(
            (min..=max).contains(&self.value),
            "counter value {} is outside [{min}, {max}]",
            self.value
        );
    }

    fn lower(&self) -> i64 {
        self.min.unwrap_or(i64::MIN)
    }

    fn upper(&self) -> i64 {
        self.max.unwrap_or(i64::MAX)
    }

    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    #[must_use]
    pub fn min(&self) -> Option<i64> {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Option<i64> {
        self.max
    }

    #[must_use]
    pub fn policy(&self) -> BoundPolicy {
        self.policy
    }

    /// Set the value, applying the bound policy. Returns the stored value.
    pub fn set(&mut self, value: i64) -> Result<i64, ComponentError> {
        let (min, max) = (self.lower(), self.upper());
        if (min..=max).contains(&value) {
            self.value = value;
            return Ok(value);
        }

        match self.policy {
            BoundPolicy::Clamp => {
                self.value = value.clamp(min, max);
                Ok(self.value)
            }
            BoundPolicy::Reject => Err(ComponentError::OutOfBounds { value, min, max }),
        }
    }

    /// Add `delta` (may be negative). Returns the stored value.
    pub fn add(&mut self, delta: i64) -> Result<i64, ComponentError> {
        self.set(self.value.saturating_add(delta))
    }

    /// Would adding `delta` succeed without clamping?
    #[must_use]
    pub fn can_add(&self, delta: i64) -> bool {
        (self.lower()..=self.upper()).contains(&self.value.saturating_add(delta))
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new(0)
    }
}
