//! Room topology.
//!
//! Rooms are declared once in configuration and never change afterwards.
//! Adjacency is declared in one direction only (the lower-numbered room
//! lists the higher one); [`RoomGraph::build`] makes it symmetric.
//! The overflow chain is kept exactly as declared: directed, and possibly
//! cyclic.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::error::ConfigError;

/// Room identifier. Room 0 is always Outside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u8);

impl RoomId {
    /// The non-flammable Outside room.
    pub const OUTSIDE: RoomId = RoomId(0);

    /// Create a new room ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Room whose number equals a flame total, if one can exist.
    #[must_use]
    pub fn from_flames(total: u32) -> Option<Self> {
        u8::try_from(total).ok().map(Self)
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A room as written in configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub id: RoomId,
    pub name: String,

    /// Maximum simultaneous fire units. 0 for Outside.
    pub fire_capacity: u8,

    /// One-way adjacency declarations.
    #[serde(default)]
    pub adjacent: Vec<RoomId>,

    /// Where fire goes when this room is full.
    #[serde(default)]
    pub overflow_to: Option<RoomId>,
}

impl RoomSpec {
    /// Create a room with no connections.
    pub fn new(id: u8, name: impl Into<String>, fire_capacity: u8) -> Self {
        Self {
            id: RoomId(id),
            name: name.into(),
            fire_capacity,
            adjacent: Vec::new(),
            overflow_to: None,
        }
    }

    /// Declare doors to the given rooms.
    #[must_use]
    pub fn with_doors(mut self, rooms: &[u8]) -> Self {
        self.adjacent.extend(rooms.iter().copied().map(RoomId));
        self
    }

    /// Set the overflow target.
    #[must_use]
    pub fn overflowing_to(mut self, room: u8) -> Self {
        self.overflow_to = Some(RoomId(room));
        self
    }
}

/// A loaded room with symmetric adjacency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub fire_capacity: u8,
    /// Rooms reachable in one move, sorted.
    pub adjacent: SmallVec<[RoomId; 4]>,
    pub overflow_to: Option<RoomId>,
}

impl Room {
    /// Whether fire can ever burn here.
    #[must_use]
    pub fn is_flammable(&self) -> bool {
        self.fire_capacity > 0
    }
}

/// Immutable room graph.
#[derive(Clone, Debug)]
pub struct RoomGraph {
    rooms: Vec<Room>,
    index: FxHashMap<RoomId, usize>,
}

impl RoomGraph {
    /// Validate declarations and build the symmetric graph.
    ///
    /// # Errors
    ///
    /// Any reference to an undeclared room, a duplicate id, a door from a
    /// room to itself, or a room 0 that is missing or flammable.
    pub fn build(specs: &[RoomSpec]) -> Result<Self, ConfigError> {
        let mut index = FxHashMap::default();
        for (i, spec) in specs.iter().enumerate() {
            if index.insert(spec.id, i).is_some() {
                return Err(ConfigError::DuplicateRoom(spec.id));
            }
        }

        match index.get(&RoomId::OUTSIDE) {
            Some(&i) if specs[i].fire_capacity == 0 => {}
            _ => return Err(ConfigError::InvalidOutside),
        }

        for spec in specs {
            for &target in &spec.adjacent {
                if target == spec.id {
                    return Err(ConfigError::SelfAdjacent { room: spec.id });
                }
                if !index.contains_key(&target) {
                    return Err(ConfigError::DanglingAdjacency {
                        room: spec.id,
                        target,
                    });
                }
            }
            if let Some(target) = spec.overflow_to {
                if !index.contains_key(&target) {
                    return Err(ConfigError::DanglingOverflow {
                        room: spec.id,
                        target,
                    });
                }
            }
        }

        let mut rooms: Vec<Room> = specs
            .iter()
            .map(|spec| Room {
                id: spec.id,
                name: spec.name.clone(),
                fire_capacity: spec.fire_capacity,
                adjacent: spec.adjacent.iter().copied().collect(),
                overflow_to: spec.overflow_to,
            })
            .collect();
        symmetrize(&mut rooms, &index);

        Ok(Self { rooms, index })
    }

    /// Look up a room.
    #[must_use]
    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.index.get(&id).map(|&i| &self.rooms[i])
    }

    /// Whether the room exists.
    #[must_use]
    pub fn contains(&self, id: RoomId) -> bool {
        self.index.contains_key(&id)
    }

    /// Room name, or `"?"` for an unknown id.
    #[must_use]
    pub fn name(&self, id: RoomId) -> &str {
        self.get(id).map_or("?", |room| room.name.as_str())
    }

    /// Fire capacity (0 for unknown rooms).
    #[must_use]
    pub fn capacity(&self, id: RoomId) -> u8 {
        self.get(id).map_or(0, |room| room.fire_capacity)
    }

    /// Rooms one move away.
    #[must_use]
    pub fn neighbors(&self, id: RoomId) -> &[RoomId] {
        match self.get(id) {
            Some(room) => &room.adjacent,
            None => &[],
        }
    }

    /// Symmetric adjacency test.
    #[must_use]
    pub fn is_adjacent(&self, from: RoomId, to: RoomId) -> bool {
        self.neighbors(from).contains(&to)
    }

    /// Next room in the overflow chain.
    #[must_use]
    pub fn overflow_target(&self, id: RoomId) -> Option<RoomId> {
        self.get(id).and_then(|room| room.overflow_to)
    }

    /// All rooms in declaration order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    /// Number of rooms, Outside included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

/// Mirror every declared door so both rooms list each other.
///
/// Idempotent: running it on an already symmetric set changes nothing.
pub(crate) fn symmetrize(rooms: &mut [Room], index: &FxHashMap<RoomId, usize>) {
    let edges: Vec<(RoomId, RoomId)> = rooms
        .iter()
        .flat_map(|room| room.adjacent.iter().map(move |&to| (room.id, to)))
        .collect();

    for (from, to) in edges {
        let Some(&i) = index.get(&to) else {
            continue;
        };
        if !rooms[i].adjacent.contains(&from) {
            rooms[i].adjacent.push(from);
        }
    }

    for room in rooms.iter_mut() {
        room.adjacent.sort_unstable();
        room.adjacent.dedup();
    }
}
