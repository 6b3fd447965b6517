//! Composite monastery actions: the bonus token and the market visit.

use serde::{Deserialize, Serialize};

use super::actions::MonasteryAction;
use super::board::{BonusToken, Resource};
use super::game::Monastery;
use crate::core::{GameState, PlayerId};
use crate::stack::ActionSequence;

/// Stage of a bonus-token sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStage {
    /// Choose which monk a promotion token promotes.
    Promote,
    /// Optionally spend prayer tokens for action points.
    Pray,
    Done,
}

impl TokenStage {
    /// First stage after taking `token`, or `None` when there is nothing
    /// to decide.
    #[must_use]
    pub fn first(state: &GameState<Monastery>, player: PlayerId, token: BonusToken) -> Option<TokenStage> {
        if token == BonusToken::Promotion && !Monastery::promotable(state, player).is_empty() {
            Some(TokenStage::Promote)
        } else if Monastery::can_pray(state, player) {
            Some(TokenStage::Pray)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonasterySequence {
    Token { player: PlayerId, stage: TokenStage },
    /// One purchase or sale, then done.
    Market { player: PlayerId, done: bool },
}

impl ActionSequence<Monastery> for MonasterySequence {
    fn acting_player(&self) -> PlayerId {
        match *self {
            MonasterySequence::Token { player, .. } | MonasterySequence::Market { player, .. } => player,
        }
    }

    fn continuations(&self, state: &GameState<Monastery>) -> Vec<MonasteryAction> {
        match *self {
            MonasterySequence::Token { player, stage: TokenStage::Promote } => Monastery::promotable(state, player)
                .into_iter()
                .map(|piety| MonasteryAction::PromoteMonk { piety })
                .collect(),
            MonasterySequence::Token { player, stage: TokenStage::Pray } => {
                let prayers = Monastery::resource(state, player, Resource::Prayer);
                let prayers = u8::try_from(prayers).unwrap_or(u8::MAX);
                (0..=prayers).map(MonasteryAction::Pray).collect()
            }
            MonasterySequence::Token { stage: TokenStage::Done, .. } => Vec::new(),
            MonasterySequence::Market { player, done: false } => {
                let shillings = Monastery::resource(state, player, Resource::Shilling);
                let mut actions: Vec<MonasteryAction> = Resource::ALL
                    .into_iter()
                    .filter(|r| r.buy_price().is_some_and(|price| price <= shillings))
                    .map(MonasteryAction::Buy)
                    .collect();
                actions.extend(
                    Resource::ALL
                        .into_iter()
                        .filter(|&r| r.sell_price().is_some() && Monastery::resource(state, player, r) > 0)
                        .map(MonasteryAction::Sell),
                );
                if actions.is_empty() {
                    actions.push(MonasteryAction::DoNothing);
                }
                actions
            }
            MonasterySequence::Market { done: true, .. } => Vec::new(),
        }
    }

    fn after_action(&mut self, state: &GameState<Monastery>, _action: &MonasteryAction) {
        match self {
            MonasterySequence::Token { player, stage } => {
                *stage = match *stage {
                    TokenStage::Promote if Monastery::can_pray(state, *player) => TokenStage::Pray,
                    _ => TokenStage::Done,
                };
            }
            MonasterySequence::Market { done, .. } => *done = true,
        }
    }

    fn is_complete(&self, _state: &GameState<Monastery>) -> bool {
        matches!(
            self,
            MonasterySequence::Token { stage: TokenStage::Done, .. } | MonasterySequence::Market { done: true, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::rules::ForwardModel;

    fn state() -> GameState<Monastery> {
        ForwardModel::new(Monastery::default()).new_state(GameConfig::new(2).with_seed(3))
    }

    #[test]
    fn test_market_offers_affordable_trades() {
        let state = state();
        let p0 = PlayerId::new(0);
        let market = MonasterySequence::Market { player: p0, done: false };

        let actions = market.continuations(&state);
        // Six shillings, grain and honey and bread in store.
        assert!(actions.contains(&MonasteryAction::Buy(Resource::Wax)));
        assert!(actions.contains(&MonasteryAction::Sell(Resource::Bread)));
        assert!(!actions.contains(&MonasteryAction::Sell(Resource::Grain)));
        assert!(!actions.contains(&MonasteryAction::DoNothing));
    }

    #[test]
    fn test_market_completes_after_one_trade() {
        let state = state();
        let mut market = MonasterySequence::Market { player: PlayerId::new(0), done: false };
        assert!(!market.is_complete(&state));

        market.after_action(&state, &MonasteryAction::Buy(Resource::Grain));
        assert!(market.is_complete(&state));
        assert!(market.continuations(&state).is_empty());
    }

    #[test]
    fn test_token_without_prayers_finishes_after_promotion() {
        let state = state();
        let p0 = PlayerId::new(0);
        let mut token = MonasterySequence::Token { player: p0, stage: TokenStage::Promote };

        token.after_action(&state, &MonasteryAction::PromoteMonk { piety: 1 });
        assert_eq!(token, MonasterySequence::Token { player: p0, stage: TokenStage::Done });
        assert!(token.is_complete(&state));
    }

    #[test]
    fn test_first_stage_skips_when_nothing_to_decide() {
        let state = state();
        // Placement phase: nobody is in an area and nobody can pray.
        assert_eq!(TokenStage::first(&state, PlayerId::new(0), BonusToken::Promotion), None);
        assert_eq!(TokenStage::first(&state, PlayerId::new(0), BonusToken::Prestige), None);
    }
}
