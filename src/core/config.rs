//! Game configuration.
//!
//! Everything static about a game is loaded once at startup:
//! - `RoomSpec`s: the house layout and its overflow chain
//! - `Character`s and the turn order they play in
//! - Upgrade cards and rescue cards (data only)
//! - `RulesConfig`: small rule knobs
//!
//! Configuration can be built in code ([`GameConfig::standard`]) or read
//! from JSON. [`GameConfig::validate`] rejects anything the engine could
//! not run with.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::{AbilityKind, Character, CharacterId};
use crate::board::{RoomGraph, RoomId, RoomSpec};
use crate::store::{TokenCost, UpgradeCard};

/// Rule knobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Rolls each player gets per turn.
    pub rolls_per_turn: u8,

    /// Upgrade cards on offer at once.
    pub store_size: usize,

    /// Only allow putting out fire in the room the player stands in.
    pub extinguish_requires_presence: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            rolls_per_turn: 3,
            store_size: 3,
            extinguish_requires_presence: false,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rooms: Vec<RoomSpec>,

    pub characters: Vec<Character>,

    /// Character names in seating order. Seat 0 plays first.
    pub turn_order: Vec<String>,

    #[serde(default)]
    pub upgrade_cards: Vec<UpgradeCard>,

    #[serde(default)]
    pub rescue_cards: Vec<String>,

    #[serde(default)]
    pub rules: RulesConfig,
}

impl GameConfig {
    /// Create a configuration with the given rooms and no characters.
    pub fn new(rooms: Vec<RoomSpec>) -> Self {
        Self {
            rooms,
            characters: Vec::new(),
            turn_order: Vec::new(),
            upgrade_cards: Vec::new(),
            rescue_cards: Vec::new(),
            rules: RulesConfig::default(),
        }
    }

    /// Add a character and seat it at the end of the turn order.
    #[must_use]
    pub fn with_player(mut self, character: Character) -> Self {
        self.turn_order.push(character.name.clone());
        self.characters.push(character);
        self
    }

    /// Replace the rule knobs.
    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Add an upgrade card to the store.
    #[must_use]
    pub fn with_upgrade_card(mut self, card: UpgradeCard) -> Self {
        self.upgrade_cards.push(card);
        self
    }

    /// The Animal City house with the four standard firefighters.
    #[must_use]
    pub fn standard() -> Self {
        let rooms = vec![
            RoomSpec::new(0, "Outside", 0).with_doors(&[2, 5, 9]).overflowing_to(1),
            RoomSpec::new(1, "Laundry Room", 2).with_doors(&[10]).overflowing_to(2),
            RoomSpec::new(2, "Kitchen", 5).with_doors(&[7, 10]).overflowing_to(3),
            RoomSpec::new(3, "Master Bathroom", 1).with_doors(&[4]).overflowing_to(4),
            RoomSpec::new(4, "Master Bedroom", 3).with_doors(&[5]).overflowing_to(5),
            RoomSpec::new(5, "Front Hallway", 1).with_doors(&[6, 7]).overflowing_to(6),
            RoomSpec::new(6, "Den", 7).with_doors(&[7]).overflowing_to(7),
            RoomSpec::new(7, "Dining Room", 6).with_doors(&[8, 10]).overflowing_to(8),
            RoomSpec::new(8, "Main Bathroom", 4).with_doors(&[9]).overflowing_to(9),
            RoomSpec::new(9, "Garage", 8).with_doors(&[10]).overflowing_to(1),
            RoomSpec::new(10, "Back Hallway", 1).overflowing_to(1),
        ];

        let mut config = Self::new(rooms)
            .with_player(
                Character::new("Lion", "🦁", "Leader", 3, 3)
                    .with_ability(AbilityKind::Water, "Can give water tokens to other firefighters")
                    .with_ability(AbilityKind::Fire, "Can take fire tokens from other firefighters")
                    .with_ability(AbilityKind::Mixed, "Can exchange tokens with other firefighters")
                    .with_max_carry(Some(2)),
            )
            .with_player(
                Character::new("Orca", "🐳", "Water Master", 6, 3)
                    .with_ability(AbilityKind::Water, "put out flame 1 room away")
                    .with_max_carry(Some(1)),
            )
            .with_player(
                Character::new("Golden Retriever", "🐕", "Rescue Expert", 4, 4)
                    .with_ability(AbilityKind::Mixed, "pick up additional rescue")
                    .with_max_carry(None),
            )
            .with_player(
                Character::new("Cheetah", "🐆", "Scout", 4, 6)
                    .with_ability(AbilityKind::Water, "move 1 room")
                    .with_ability(AbilityKind::Fire, "move 1 room")
                    .with_max_carry(Some(0)),
            )
            .with_upgrade_card(UpgradeCard::new(
                "Hose Junction",
                TokenCost::new(7, 3),
                "Players can give and receive Water Tokens",
                "free",
            ))
            .with_upgrade_card(UpgradeCard::new(
                "Fire Truck Quick Assist",
                TokenCost::new(4, 4),
                "Remove all flames from a room",
                "free, discard after use",
            ))
            .with_upgrade_card(UpgradeCard::new(
                "External Hose Quick Assist",
                TokenCost::new(3, 3),
                "Remove 3 flames from a room",
                "free, discard after use",
            ));

        config.rescue_cards = [
            "Parakeet", "Puppy", "Goldfish", "Kitten", "Hamster", "Mouse", "Rat", "Koala",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        config
    }

    /// Parse a configuration from JSON. Does not validate.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` on malformed JSON or missing fields.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the whole configuration and build the room graph.
    ///
    /// # Errors
    ///
    /// The first problem found; see [`ConfigError`].
    pub fn validate(&self) -> Result<RoomGraph, ConfigError> {
        let graph = RoomGraph::build(&self.rooms)?;

        if self.characters.len() > usize::from(u8::MAX) + 1 {
            return Err(ConfigError::TooManyCharacters(self.characters.len()));
        }
        let mut names = FxHashSet::default();
        for character in &self.characters {
            if !names.insert(character.name.as_str()) {
                return Err(ConfigError::DuplicateCharacter(character.name.clone()));
            }
        }

        if self.turn_order.is_empty() {
            return Err(ConfigError::NoPlayers);
        }
        if self.turn_order.len() > 255 {
            return Err(ConfigError::TooManyPlayers(self.turn_order.len()));
        }
        if self.rules.rolls_per_turn == 0 {
            return Err(ConfigError::NoRolls);
        }
        for name in &self.turn_order {
            self.character_by_name(name)
                .ok_or_else(|| ConfigError::UnknownCharacter(name.clone()))?;
        }
        for character in &self.characters {
            if !graph.contains(character.start_room) {
                return Err(ConfigError::UnknownStartRoom {
                    character: character.name.clone(),
                    room: character.start_room,
                });
            }
        }

        Ok(graph)
    }

    /// Find a character profile by name.
    ///
    /// Profiles past the 256th have no id and are never found.
    #[must_use]
    pub fn character_by_name(&self, name: &str) -> Option<(CharacterId, &Character)> {
        self.characters
            .iter()
            .enumerate()
            .find(|(_, character)| character.name == name)
            .and_then(|(i, character)| Some((CharacterId(u8::try_from(i).ok()?), character)))
    }

    /// Character profile by id.
    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.index())
    }

    /// Room spec by id.
    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&RoomSpec> {
        self.rooms.iter().find(|room| room.id == id)
    }
}
