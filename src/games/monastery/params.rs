//! Monastery parameters.

use serde::{Deserialize, Serialize};

/// Match parameters for the monastery game.
///
/// All fields have defaults, so a runner can load a partial JSON object:
///
/// ```
/// use tabletop_engine::games::monastery::MonasteryParams;
///
/// let params: MonasteryParams = serde_json::from_str(r#"{"years": 1}"#).unwrap();
/// assert_eq!(params.years, 1);
/// assert_eq!(params.pilgrimages_per_route, 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MonasteryParams {
    /// Years played; each year is Spring, Summer, Autumn, then Winter.
    pub years: u32,

    /// Piety of each player's starting monks.
    pub starting_piety: [i64; 6],
    /// A monk promoted to this piety retires.
    pub max_piety: i64,
    /// Victory points for a retiring monk.
    pub retirement_vp: i64,

    /// Bonus tokens dealt to each working area per season.
    pub tokens_per_area: usize,
    /// Copies of each bonus token kind in the bag.
    pub tokens_per_kind: usize,

    /// Cards in each pilgrimage pool (short and long).
    pub pilgrimages_per_route: usize,
    pub short_min_piety: i64,
    pub long_min_piety: i64,
    pub short_cost: i64,
    pub long_cost: i64,

    /// Shillings to hire a novice.
    pub novice_cost: i64,
    /// Action points to hire a novice.
    pub novice_ap: i32,
    /// Action points gained per prayer token spent.
    pub ap_per_prayer: i32,
    /// Victory points lost per unfed monk in winter.
    pub unfed_penalty: i64,

    pub starting_grain: i64,
    pub starting_honey: i64,
    pub starting_wax: i64,
    pub starting_skeps: i64,
    pub starting_bread: i64,
    pub starting_shillings: i64,
}

impl Default for MonasteryParams {
    fn default() -> Self {
        Self {
            years: 3,
            starting_piety: [1, 1, 2, 2, 3, 4],
            max_piety: 6,
            retirement_vp: 3,
            tokens_per_area: 2,
            tokens_per_kind: 6,
            pilgrimages_per_route: 8,
            short_min_piety: 3,
            long_min_piety: 5,
            short_cost: 3,
            long_cost: 6,
            novice_cost: 3,
            novice_ap: 3,
            ap_per_prayer: 2,
            unfed_penalty: 1,
            starting_grain: 2,
            starting_honey: 1,
            starting_wax: 1,
            starting_skeps: 2,
            starting_bread: 2,
            starting_shillings: 6,
        }
    }
}

impl MonasteryParams {
    #[must_use]
    pub fn with_years(mut self, years: u32) -> Self {
        self.years = years;
        self
    }

    #[must_use]
    pub fn with_pilgrimages_per_route(mut self, count: usize) -> Self {
        self.pilgrimages_per_route = count;
        self
    }
}
