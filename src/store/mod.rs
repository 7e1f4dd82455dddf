//! Upgrade store and rescue cards.
//!
//! Both are carried as data. Buying is accepted and logged, but no tokens
//! change hands and no card effect resolves yet.

use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::state::PlayerState;

/// Water and fire tokens needed to buy a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenCost {
    #[serde(default)]
    pub water: u8,
    #[serde(default)]
    pub fire: u8,
}

impl TokenCost {
    #[must_use]
    pub const fn new(water: u8, fire: u8) -> Self {
        Self { water, fire }
    }
}

impl std::fmt::Display for TokenCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "💧{} 🔥{}", self.water, self.fire)
    }
}

/// A purchasable upgrade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeCard {
    pub name: String,
    pub buy_cost: TokenCost,
    /// What the card would do, as printed.
    pub effect: String,
    /// Cost to use once owned, as printed.
    pub use_cost: String,
}

impl UpgradeCard {
    pub fn new(
        name: impl Into<String>,
        buy_cost: TokenCost,
        effect: impl Into<String>,
        use_cost: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            buy_cost,
            effect: effect.into(),
            use_cost: use_cost.into(),
        }
    }

    /// Whether a player holds enough water and banked fire tokens.
    #[must_use]
    pub fn can_afford(&self, player: &PlayerState) -> bool {
        player.water_tokens >= self.buy_cost.water
            && player.fire_tokens_banked >= self.buy_cost.fire
    }
}

/// Cards currently on offer: the first `store_size` upgrade cards.
#[must_use]
pub fn store_offer(config: &GameConfig) -> &[UpgradeCard] {
    let size = config.rules.store_size.min(config.upgrade_cards.len());
    &config.upgrade_cards[..size]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RoomId;
    use crate::core::player::CharacterId;

    #[test]
    fn test_can_afford() {
        let card = UpgradeCard::new("Hose", TokenCost::new(3, 2), "", "free");
        let mut player = PlayerState::new(CharacterId(0), RoomId::OUTSIDE);

        assert!(!card.can_afford(&player));

        player.water_tokens = 3;
        player.fire_tokens_banked = 1;
        assert!(!card.can_afford(&player));

        player.fire_tokens_banked = 2;
        assert!(card.can_afford(&player));
    }

    #[test]
    fn test_store_offer_is_limited() {
        let mut config = GameConfig::standard();
        assert_eq!(store_offer(&config).len(), 3);

        config.rules.store_size = 2;
        let offer = store_offer(&config);
        assert_eq!(offer.len(), 2);
        assert_eq!(offer[0].name, "Hose Junction");

        config.rules.store_size = 10;
        assert_eq!(store_offer(&config).len(), 3);
    }

    #[test]
    fn test_cost_display() {
        assert_eq!(TokenCost::new(7, 3).to_string(), "💧7 🔥3");
    }
}
