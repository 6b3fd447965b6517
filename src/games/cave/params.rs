//! Cave parameters and card values.

use serde::{Deserialize, Serialize};

/// Gem values of the treasure cards, one card each.
pub const TREASURE_VALUES: [u8; 15] = [1, 2, 3, 4, 5, 5, 7, 7, 9, 11, 11, 13, 14, 15, 17];

/// Match parameters for the cave game.
///
/// ```
/// use tabletop_engine::games::cave::CaveParams;
///
/// let params: CaveParams = serde_json::from_str(r#"{"caves": 3}"#).unwrap();
/// assert_eq!(params.caves, 3);
/// assert_eq!(params.hazard_copies, CaveParams::default().hazard_copies);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveParams {
    /// Caves explored before the match ends.
    pub caves: u32,
    /// Copies of each hazard in the starting deck.
    pub hazard_copies: u8,
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            caves: 5,
            hazard_copies: 3,
        }
    }
}

impl CaveParams {
    #[must_use]
    pub fn with_caves(mut self, caves: u32) -> Self {
        self.caves = caves;
        self
    }

    #[must_use]
    pub fn with_hazard_copies(mut self, copies: u8) -> Self {
        self.hazard_copies = copies;
        self
    }
}
