//! Entity kinds the native server exposes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of game objects the native server names with handles.
///
/// Each kind has a stable wire id used where event payloads reference a
/// kind, and a query name the native existence and listing primitives
/// expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Npc,
    Door,
    Object,
    Pickup,
    Text3d,
    Vehicle,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Player,
        EntityKind::Npc,
        EntityKind::Door,
        EntityKind::Object,
        EntityKind::Pickup,
        EntityKind::Text3d,
        EntityKind::Vehicle,
    ];

    /// The query name the native primitives expect.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EntityKind::Player => "Player",
            EntityKind::Npc => "NPC",
            EntityKind::Door => "Door",
            EntityKind::Object => "Object",
            EntityKind::Pickup => "Pickup",
            EntityKind::Text3d => "Text3D",
            EntityKind::Vehicle => "Vehicle",
        }
    }

    /// Stable wire id for this kind.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            EntityKind::Player => 1,
            EntityKind::Npc => 2,
            EntityKind::Door => 3,
            EntityKind::Object => 4,
            EntityKind::Pickup => 5,
            EntityKind::Text3d => 6,
            EntityKind::Vehicle => 7,
        }
    }

    /// Maps a wire id back to its kind.
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(EntityKind::Player),
            2 => Some(EntityKind::Npc),
            3 => Some(EntityKind::Door),
            4 => Some(EntityKind::Object),
            5 => Some(EntityKind::Pickup),
            6 => Some(EntityKind::Text3d),
            7 => Some(EntityKind::Vehicle),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
