//! Observation vector for learning agents.
//!
//! | index | value                          | divisor      |
//! |-------|--------------------------------|--------------|
//! | 0     | gems in the observer's chest   | 100          |
//! | 1     | gems on the last revealed card | 17           |
//! | 2     | explorers still in the cave    | player count |
//! | 3     | caves completed                | 5            |
//! | 4-8   | explosions, poison gas, rockfalls, scorpions, snakes on the path | 3 each |

use super::game::{Cave, Hazard};
use crate::core::{GameConfig, GameState, PlayerId};
use crate::observation::{Snapshot, Vectorise};

const OBSERVATION_SPACE: usize = 9;
const CHEST_DIVISOR: f64 = 100.0;
const CARD_GEMS_DIVISOR: f64 = 17.0;
const CAVES_DIVISOR: f64 = 5.0;
const HAZARD_DIVISOR: f64 = 3.0;

fn last_card_gems(state: &GameState<Cave>) -> f64 {
    state
        .components
        .deck(state.globals.board().path)
        .peek_bottom()
        .map_or(0.0, |card| f64::from(card.gems()))
}

impl Vectorise<Cave> for Cave {
    fn observation_space(&self, _config: &GameConfig) -> usize {
        OBSERVATION_SPACE
    }

    fn observation_vector(&self, state: &GameState<Cave>, perspective: PlayerId) -> Vec<f64> {
        let mut values = Vec::with_capacity(OBSERVATION_SPACE);
        values.push(Cave::chest(state, perspective) as f64);
        values.push(last_card_gems(state));
        values.push(Cave::explorers(state).len() as f64);
        values.push(f64::from(Cave::caves_completed(state)));
        for kind in Hazard::ALL {
            values.push(Cave::hazards_on_path(state, kind) as f64);
        }
        values
    }

    fn normalized_observation_vector(&self, state: &GameState<Cave>, perspective: PlayerId) -> Vec<f64> {
        let mut divisors = vec![
            CHEST_DIVISOR,
            CARD_GEMS_DIVISOR,
            state.player_count() as f64,
            CAVES_DIVISOR,
        ];
        divisors.extend([HAZARD_DIVISOR; 5]);

        self.observation_vector(state, perspective)
            .into_iter()
            .zip(divisors)
            .map(|(value, divisor)| value / divisor)
            .collect()
    }

    fn snapshot(&self, state: &GameState<Cave>, perspective: PlayerId) -> Snapshot {
        let hazard = |kind| Cave::hazards_on_path(state, kind) as f64;

        Snapshot::new()
            .with("cave", f64::from(Cave::caves_completed(state)))
            .with("explorers", Cave::explorers(state).len() as f64)
            .with("path_gems", Cave::path_gems(state) as f64)
            .with("chest_gems", Cave::chest(state, perspective) as f64)
            .with("explosions_on_path", hazard(Hazard::Explosion))
            .with("poison_gas_on_path", hazard(Hazard::PoisonGas))
            .with("rockfalls_on_path", hazard(Hazard::Rockfall))
            .with("scorpions_on_path", hazard(Hazard::Scorpions))
            .with("snakes_on_path", hazard(Hazard::Snakes))
    }
}
