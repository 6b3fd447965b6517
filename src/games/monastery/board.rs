//! Monastery vocabulary and the ids of its components.

use serde::{Deserialize, Serialize};

use super::params::MonasteryParams;
use crate::components::ComponentRoots;
use crate::core::{ComponentId, PhaseId};

/// Monks are placed one at a time, round the table.
pub const PLACE_MONKS: PhaseId = PhaseId::new(0);
/// Areas are worked in order; each player with monks in the area takes a turn.
pub const USE_MONKS: PhaseId = PhaseId::new(1);

/// Where a monk can be. Stored in the monk token's `location`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Area {
    Dormitory,
    Meadow,
    Kitchen,
    Workshop,
    Gatehouse,
    Chapel,
    Pilgrimage,
    Retired,
}

impl Area {
    /// Areas worked during USE_MONKS, in order.
    pub const WORKING: [Area; 5] = [
        Area::Meadow,
        Area::Kitchen,
        Area::Workshop,
        Area::Gatehouse,
        Area::Chapel,
    ];

    #[must_use]
    pub fn location(self) -> u16 {
        self as u16
    }

    #[must_use]
    pub fn from_location(location: u16) -> Option<Area> {
        const ALL: [Area; 8] = [
            Area::Dormitory,
            Area::Meadow,
            Area::Kitchen,
            Area::Workshop,
            Area::Gatehouse,
            Area::Chapel,
            Area::Pilgrimage,
            Area::Retired,
        ];
        ALL.get(usize::from(location)).copied()
    }

    /// Position among the working areas.
    #[must_use]
    pub fn working_index(self) -> Option<usize> {
        Area::WORKING.iter().position(|&a| a == self)
    }

    /// The working area after this one, if any.
    #[must_use]
    pub fn next_working(self) -> Option<Area> {
        self.working_index()
            .and_then(|i| Area::WORKING.get(i + 1))
            .copied()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    #[must_use]
    pub fn next(self) -> Season {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }
}

/// Storeroom contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Grain,
    Honey,
    Wax,
    Skep,
    Bread,
    Beer,
    Candle,
    Shilling,
    Prayer,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::Grain,
        Resource::Honey,
        Resource::Wax,
        Resource::Skep,
        Resource::Bread,
        Resource::Beer,
        Resource::Candle,
        Resource::Shilling,
        Resource::Prayer,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Shillings the market charges, if it sells this.
    #[must_use]
    pub fn buy_price(self) -> Option<i64> {
        match self {
            Resource::Grain | Resource::Skep => Some(2),
            Resource::Wax => Some(3),
            _ => None,
        }
    }

    /// Shillings the market pays, if it buys this.
    #[must_use]
    pub fn sell_price(self) -> Option<i64> {
        match self {
            Resource::Honey | Resource::Bread => Some(2),
            Resource::Beer => Some(3),
            Resource::Candle => Some(4),
            _ => None,
        }
    }

    /// Eaten in winter, in this order of preference.
    pub const FOOD: [Resource; 4] = [Resource::Bread, Resource::Beer, Resource::Honey, Resource::Grain];
}

/// Bonus tokens drawn from the bag onto the working areas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BonusToken {
    /// Gain a prayer token.
    Devotion,
    /// Gain a victory point.
    Prestige,
    /// Gain a shilling.
    Donation,
    /// Promote one of your monks in the area.
    Promotion,
}

impl BonusToken {
    pub const ALL: [BonusToken; 4] = [
        BonusToken::Devotion,
        BonusToken::Prestige,
        BonusToken::Donation,
        BonusToken::Promotion,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Short,
    Long,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Destination {
    Rome,
    Santiago,
    Jerusalem,
    Alexandria,
}

impl Destination {
    #[must_use]
    pub fn route(self) -> Route {
        match self {
            Destination::Rome | Destination::Santiago => Route::Short,
            Destination::Jerusalem | Destination::Alexandria => Route::Long,
        }
    }

    /// Victory points for completing the journey.
    #[must_use]
    pub fn vp(self) -> i64 {
        match self {
            Destination::Rome => 2,
            Destination::Santiago => 3,
            Destination::Jerusalem => 5,
            Destination::Alexandria => 6,
        }
    }
}

/// Deck element type: bonus tokens and pilgrimage destinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MonasteryCard {
    Bonus(BonusToken),
    Pilgrimage(Destination),
}

/// One player's components.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlayerBoard {
    /// Storeroom counters, indexed by [`Resource::index`].
    pub storeroom: Vec<ComponentId>,
    pub vp: ComponentId,
    /// Grain sown in the meadow.
    pub meadow_grain: ComponentId,
    /// Skeps placed in the meadow.
    pub meadow_skeps: ComponentId,
}

impl PlayerBoard {
    #[must_use]
    pub fn resource(&self, resource: Resource) -> ComponentId {
        self.storeroom[resource.index()]
    }
}

/// Component ids of a set-up monastery match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MonasteryBoard {
    pub players: Vec<PlayerBoard>,
    /// Every monk token ever recruited, in id order.
    pub monks: Vec<ComponentId>,
    /// Face-down bag of bonus tokens.
    pub bonus_bag: ComponentId,
    /// Tokens waiting on each working area, indexed like [`Area::WORKING`].
    pub area_tokens: Vec<ComponentId>,
    /// Tokens taken this season.
    pub used_tokens: ComponentId,
    /// Face-down pilgrimage pools.
    pub short_pool: ComponentId,
    pub long_pool: ComponentId,
    /// Pilgrimages started so far.
    pub pilgrimages: ComponentId,
}

impl MonasteryBoard {
    /// Token deck of a working area.
    ///
    /// # Panics
    ///
    /// Panics if `area` is not a working area.
    #[must_use]
    pub fn tokens(&self, area: Area) -> ComponentId {
        match area.working_index() {
            Some(i) => self.area_tokens[i],
            None => panic!("{area:?} holds no bonus tokens"),
        }
    }

    #[must_use]
    pub fn pool(&self, route: Route) -> ComponentId {
        match route {
            Route::Short => self.short_pool,
            Route::Long => self.long_pool,
        }
    }
}

/// Per-match scalars and root ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MonasteryGlobals {
    pub params: MonasteryParams,
    pub season: Season,
    /// Area being worked during USE_MONKS.
    pub area: Area,
    pub board: Option<MonasteryBoard>,
    /// The current player has taken this turn's bonus token.
    pub token_taken: bool,
    /// The current player has prayed this turn.
    pub prayed: bool,
}

impl Default for Area {
    fn default() -> Self {
        Area::Meadow
    }
}

impl MonasteryGlobals {
    /// # Panics
    ///
    /// Panics if the state has not been set up.
    #[must_use]
    pub fn board(&self) -> &MonasteryBoard {
        match &self.board {
            Some(board) => board,
            None => panic!("monastery state used before setup"),
        }
    }

    pub fn board_mut(&mut self) -> &mut MonasteryBoard {
        match &mut self.board {
            Some(board) => board,
            None => panic!("monastery state used before setup"),
        }
    }
}

impl ComponentRoots for MonasteryGlobals {
    fn roots(&self) -> Vec<ComponentId> {
        let Some(board) = &self.board else {
            return Vec::new();
        };

        let mut roots = Vec::new();
        for player in &board.players {
            roots.extend(&player.storeroom);
            roots.extend([player.vp, player.meadow_grain, player.meadow_skeps]);
        }
        roots.extend(&board.monks);
        roots.push(board.bonus_bag);
        roots.extend(&board.area_tokens);
        roots.extend([
            board.used_tokens,
            board.short_pool,
            board.long_pool,
            board.pilgrimages,
        ]);
        roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_locations_round_trip() {
        for area in Area::WORKING.into_iter().chain([Area::Dormitory, Area::Pilgrimage, Area::Retired]) {
            assert_eq!(Area::from_location(area.location()), Some(area));
        }
        assert_eq!(Area::from_location(99), None);
    }

    #[test]
    fn test_working_order() {
        assert_eq!(Area::Meadow.next_working(), Some(Area::Kitchen));
        assert_eq!(Area::Gatehouse.next_working(), Some(Area::Chapel));
        assert_eq!(Area::Chapel.next_working(), None);
        assert_eq!(Area::Dormitory.next_working(), None);
    }

    #[test]
    fn test_seasons_cycle() {
        assert_eq!(Season::Autumn.next(), Season::Winter);
        assert_eq!(Season::Winter.next(), Season::Spring);
    }

    #[test]
    fn test_destinations() {
        assert_eq!(Destination::Santiago.route(), Route::Short);
        assert_eq!(Destination::Alexandria.route(), Route::Long);
        assert!(Destination::Jerusalem.vp() > Destination::Rome.vp());
    }

    #[test]
    fn test_market_prices() {
        assert_eq!(Resource::Grain.buy_price(), Some(2));
        assert_eq!(Resource::Grain.sell_price(), None);
        assert_eq!(Resource::Candle.sell_price(), Some(4));
        assert_eq!(Resource::Prayer.buy_price(), None);
    }
}
