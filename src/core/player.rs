//! Seats, characters and per-seat storage.
//!
//! A game seats 1 to 255 players in a fixed turn order. Each seat is bound
//! to one [`Character`] for the whole game: label, token capacities and
//! ability text. Everything that changes during play lives in
//! `PlayerState`, stored per seat in a [`SeatMap`].

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::board::RoomId;

/// Seat in turn order. Seat 0 plays first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that plays after this one, wrapping after the last seat.
    ///
    /// ```
    /// use firefighters::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(1).next(4), PlayerId::new(2));
    /// assert_eq!(PlayerId::new(3).next(4), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, seats: usize) -> Self {
        Self(((self.index() + 1) % seats.max(1)) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat, indexed by [`PlayerId`].
///
/// Never empty and never longer than 255 seats.
///
/// ```
/// use firefighters::core::{PlayerId, SeatMap};
///
/// let mut water = SeatMap::from_fn(4, |_| 0u8).unwrap();
/// water[PlayerId::new(1)] = 3;
/// assert_eq!(water[PlayerId::new(1)], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatMap<T> {
    seats: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Fill `seats` entries from a per-seat factory.
    ///
    /// Returns `None` for 0 seats or more than 255.
    pub fn from_fn(seats: usize, factory: impl FnMut(PlayerId) -> T) -> Option<Self> {
        let count = u8::try_from(seats).ok().filter(|&n| n > 0)?;
        Some(Self {
            seats: (0..count).map(PlayerId).map(factory).collect(),
        })
    }

    /// One value per seat, in turn order.
    ///
    /// Returns `None` when `values` is empty or longer than 255.
    pub fn from_vec(values: Vec<T>) -> Option<Self> {
        if values.is_empty() || values.len() > usize::from(u8::MAX) {
            return None;
        }
        Some(Self { seats: values })
    }

    /// Number of seats.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Build a new map from every seat's value.
    pub fn map<U>(&self, mut f: impl FnMut(PlayerId, &T) -> U) -> SeatMap<U> {
        SeatMap {
            seats: self.iter().map(|(seat, value)| f(seat, value)).collect(),
        }
    }

    /// Seats with their values, in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        (0..=u8::MAX).map(PlayerId).zip(&self.seats)
    }
}

impl<T> Index<PlayerId> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: PlayerId) -> &T {
        &self.seats[seat.index()]
    }
}

impl<T> IndexMut<PlayerId> for SeatMap<T> {
    fn index_mut(&mut self, seat: PlayerId) -> &mut T {
        &mut self.seats[seat.index()]
    }
}

/// Index of a character profile in `GameConfig::characters`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub u8);

impl CharacterId {
    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which token an ability text is attached to on the character mat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    Water,
    Fire,
    Mixed,
    Move,
}

/// Descriptive ability text. Never consulted by the rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub kind: AbilityKind,
    pub text: String,
}

impl Ability {
    pub fn new(kind: AbilityKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Static character profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Unique name, also used in turn order.
    pub name: String,

    pub emoji: String,

    /// Specialty label ("Leader", "Scout", ...).
    pub specialty: String,

    pub abilities: Vec<Ability>,

    /// Rescue cards the character can carry. `None` means unlimited.
    pub max_carry: Option<u8>,

    /// Water token capacity.
    pub max_water_tokens: u8,

    /// Banked fire token capacity.
    pub max_fire_tokens: u8,

    /// Room the character's token starts in.
    pub start_room: RoomId,
}

impl Character {
    /// Create a profile with no abilities and no carry limit, starting
    /// Outside.
    pub fn new(
        name: impl Into<String>,
        emoji: impl Into<String>,
        specialty: impl Into<String>,
        max_water_tokens: u8,
        max_fire_tokens: u8,
    ) -> Self {
        Self {
            name: name.into(),
            emoji: emoji.into(),
            specialty: specialty.into(),
            abilities: Vec::new(),
            max_carry: None,
            max_water_tokens,
            max_fire_tokens,
            start_room: RoomId::OUTSIDE,
        }
    }

    /// Add an ability description.
    #[must_use]
    pub fn with_ability(mut self, kind: AbilityKind, text: impl Into<String>) -> Self {
        self.abilities.push(Ability::new(kind, text));
        self
    }

    /// Set rescue carry capacity (`None` = unlimited).
    #[must_use]
    pub fn with_max_carry(mut self, max_carry: Option<u8>) -> Self {
        self.max_carry = max_carry;
        self
    }

    /// Set the starting room.
    #[must_use]
    pub fn with_start_room(mut self, room: RoomId) -> Self {
        self.start_room = room;
        self
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.emoji, self.name)
    }
}
