//! The native event taxonomy.
//!
//! Every event the native server can raise into the bridge is listed here
//! with its stable wire id. The set is closed: an id outside the table is
//! ignored by the dispatcher rather than treated as an error, so a newer
//! native build can fire events an older bridge does not know yet.
//!
//! Wire id 5 is unassigned and id 33 is bridge-assigned: the native layer
//! historically reported both the pre-command hook and the command-failure
//! notice under id 32, and the bridge keeps 32 for [`EventType::PlayerPreCommand`]
//! while remapping [`EventType::PlayerCommandFailed`] to 33.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A native event type, or [`EventType::Custom`] for manually named events.
///
/// The per-variant docs give the argument list handlers receive, in order.
/// Player-scoped variants always receive the acting player first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// A manually named event raised by plugin code. Custom events never
    /// travel through the numeric dispatch path; they are keyed by name.
    Custom,
    /// A player left the server. Args: `(player)`.
    PlayerQuit,
    /// A player wrote a chat message. Args: `(player, message)`.
    PlayerChat,
    /// A player issued a chat command. Args: `(player, command, exists)`
    /// where `exists` reports whether any registered command matched.
    PlayerChatCommand,
    /// A player finished joining. Args: `(player)`.
    PlayerJoin,
    /// A player touched a pickup. Args: `(player, pickup)`.
    PlayerPickupHit,
    /// The bridge package started. Args: none.
    PackageStart,
    /// The bridge package is stopping. Args: none.
    PackageStop,
    /// One server simulation tick. Args: `(delta_seconds)`.
    GameTick,
    /// An incoming connection asks to be admitted. Args: `(ip, port)`.
    /// A veto rejects the connection.
    ClientConnectionRequest,
    /// An NPC arrived at its movement target. Args: `(npc)`.
    NpcReachTarget,
    /// An NPC took damage. Args: `(npc, damage_type, amount)`.
    NpcDamage,
    /// An NPC spawned. Args: `(npc)`.
    NpcSpawn,
    /// An NPC died. Args: `(npc)`.
    NpcDeath,
    /// An NPC streamed into a player's view. Args: `(player, npc)`.
    NpcStreamIn,
    /// An NPC streamed out of a player's view. Args: `(player, npc)`.
    NpcStreamOut,
    /// A player entered a vehicle. Args: `(player, vehicle, seat)`.
    PlayerEnterVehicle,
    /// A player left a vehicle. Args: `(player, vehicle, seat)`.
    PlayerLeaveVehicle,
    /// A player's movement state changed. Args: `(player, new_state, old_state)`.
    PlayerStateChange,
    /// A vehicle respawned. Args: `(vehicle)`.
    VehicleRespawn,
    /// A vehicle streamed into a player's view. Args: `(player, vehicle)`.
    VehicleStreamIn,
    /// A vehicle streamed out of a player's view. Args: `(player, vehicle)`.
    VehicleStreamOut,
    /// A player passed server-side auth. Args: `(player)`.
    PlayerServerAuth,
    /// A player passed Steam auth. Args: `(player)`.
    PlayerSteamAuth,
    /// A player finished downloading a served file. Args:
    /// `(player, file_name, checksum)`.
    PlayerDownloadFile,
    /// Another player streamed into this player's view. Args: `(player, other)`.
    PlayerStreamIn,
    /// Another player streamed out of this player's view. Args: `(player, other)`.
    PlayerStreamOut,
    /// A player spawned. Args: `(player)`.
    PlayerSpawn,
    /// A player died. Args: `(player, killer)`. The killer is the player
    /// themselves for environment deaths.
    PlayerDeath,
    /// A player fired a weapon. Args: `(player, weapon, hit_type, [target],
    /// hit_x, hit_y, hit_z, start_x, start_y, start_z, impact_x, impact_y,
    /// impact_z)`. The target entity is omitted when nothing was hit.
    /// A veto suppresses the shot.
    PlayerWeaponShot,
    /// A player took damage. Args: `(player, damage_type, amount)`.
    PlayerDamage,
    /// A player used a door. Args: `(player, door, being_opened)`.
    PlayerInteractDoor,
    /// A chat command is about to run. Args: `(player, command, args_joined)`
    /// where `args_joined` is the space-joined argument tail. A veto cancels
    /// the command.
    PlayerPreCommand,
    /// A chat command failed to run. Args: `(player, command, args_joined,
    /// error_code)`.
    PlayerCommandFailed,
}

/// Variants whose first handler argument is the acting player.
const PLAYER_EVENTS: &[EventType] = &[
    EventType::PlayerChat,
    EventType::PlayerChatCommand,
    EventType::PlayerJoin,
    EventType::PlayerQuit,
    EventType::PlayerPickupHit,
    EventType::NpcStreamIn,
    EventType::NpcStreamOut,
    EventType::PlayerEnterVehicle,
    EventType::PlayerLeaveVehicle,
    EventType::PlayerStateChange,
    EventType::VehicleStreamIn,
    EventType::VehicleStreamOut,
    EventType::PlayerDamage,
    EventType::PlayerDeath,
    EventType::PlayerInteractDoor,
    EventType::PlayerStreamIn,
    EventType::PlayerStreamOut,
    EventType::PlayerServerAuth,
    EventType::PlayerSteamAuth,
    EventType::PlayerDownloadFile,
    EventType::PlayerWeaponShot,
    EventType::PlayerSpawn,
];

impl EventType {
    /// Every variant, in wire id order.
    pub const ALL: [EventType; 34] = [
        EventType::Custom,
        EventType::PlayerQuit,
        EventType::PlayerChat,
        EventType::PlayerChatCommand,
        EventType::PlayerJoin,
        EventType::PlayerPickupHit,
        EventType::PackageStart,
        EventType::PackageStop,
        EventType::GameTick,
        EventType::ClientConnectionRequest,
        EventType::NpcReachTarget,
        EventType::NpcDamage,
        EventType::NpcSpawn,
        EventType::NpcDeath,
        EventType::NpcStreamIn,
        EventType::NpcStreamOut,
        EventType::PlayerEnterVehicle,
        EventType::PlayerLeaveVehicle,
        EventType::PlayerStateChange,
        EventType::VehicleRespawn,
        EventType::VehicleStreamIn,
        EventType::VehicleStreamOut,
        EventType::PlayerServerAuth,
        EventType::PlayerSteamAuth,
        EventType::PlayerDownloadFile,
        EventType::PlayerStreamIn,
        EventType::PlayerStreamOut,
        EventType::PlayerSpawn,
        EventType::PlayerDeath,
        EventType::PlayerWeaponShot,
        EventType::PlayerDamage,
        EventType::PlayerInteractDoor,
        EventType::PlayerPreCommand,
        EventType::PlayerCommandFailed,
    ];

    /// The stable wire id of this variant.
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            EventType::Custom => -1,
            EventType::PlayerQuit => 0,
            EventType::PlayerChat => 1,
            EventType::PlayerChatCommand => 2,
            EventType::PlayerJoin => 3,
            EventType::PlayerPickupHit => 4,
            EventType::PackageStart => 6,
            EventType::PackageStop => 7,
            EventType::GameTick => 8,
            EventType::ClientConnectionRequest => 9,
            EventType::NpcReachTarget => 10,
            EventType::NpcDamage => 11,
            EventType::NpcSpawn => 12,
            EventType::NpcDeath => 13,
            EventType::NpcStreamIn => 14,
            EventType::NpcStreamOut => 15,
            EventType::PlayerEnterVehicle => 16,
            EventType::PlayerLeaveVehicle => 17,
            EventType::PlayerStateChange => 18,
            EventType::VehicleRespawn => 19,
            EventType::VehicleStreamIn => 20,
            EventType::VehicleStreamOut => 21,
            EventType::PlayerServerAuth => 22,
            EventType::PlayerSteamAuth => 23,
            EventType::PlayerDownloadFile => 24,
            EventType::PlayerStreamIn => 25,
            EventType::PlayerStreamOut => 26,
            EventType::PlayerSpawn => 27,
            EventType::PlayerDeath => 28,
            EventType::PlayerWeaponShot => 29,
            EventType::PlayerDamage => 30,
            EventType::PlayerInteractDoor => 31,
            EventType::PlayerPreCommand => 32,
            EventType::PlayerCommandFailed => 33,
        }
    }

    /// Maps a wire id to its variant. Unknown ids return `None`.
    #[must_use]
    pub const fn from_id(id: i32) -> Option<Self> {
        match id {
            -1 => Some(EventType::Custom),
            0 => Some(EventType::PlayerQuit),
            1 => Some(EventType::PlayerChat),
            2 => Some(EventType::PlayerChatCommand),
            3 => Some(EventType::PlayerJoin),
            4 => Some(EventType::PlayerPickupHit),
            6 => Some(EventType::PackageStart),
            7 => Some(EventType::PackageStop),
            8 => Some(EventType::GameTick),
            9 => Some(EventType::ClientConnectionRequest),
            10 => Some(EventType::NpcReachTarget),
            11 => Some(EventType::NpcDamage),
            12 => Some(EventType::NpcSpawn),
            13 => Some(EventType::NpcDeath),
            14 => Some(EventType::NpcStreamIn),
            15 => Some(EventType::NpcStreamOut),
            16 => Some(EventType::PlayerEnterVehicle),
            17 => Some(EventType::PlayerLeaveVehicle),
            18 => Some(EventType::PlayerStateChange),
            19 => Some(EventType::VehicleRespawn),
            20 => Some(EventType::VehicleStreamIn),
            21 => Some(EventType::VehicleStreamOut),
            22 => Some(EventType::PlayerServerAuth),
            23 => Some(EventType::PlayerSteamAuth),
            24 => Some(EventType::PlayerDownloadFile),
            25 => Some(EventType::PlayerStreamIn),
            26 => Some(EventType::PlayerStreamOut),
            27 => Some(EventType::PlayerSpawn),
            28 => Some(EventType::PlayerDeath),
            29 => Some(EventType::PlayerWeaponShot),
            30 => Some(EventType::PlayerDamage),
            31 => Some(EventType::PlayerInteractDoor),
            32 => Some(EventType::PlayerPreCommand),
            33 => Some(EventType::PlayerCommandFailed),
            _ => None,
        }
    }

    /// Whether handlers for this event receive the acting player as their
    /// first argument.
    #[must_use]
    pub fn is_player_event(self) -> bool {
        PLAYER_EVENTS.contains(&self)
    }

    /// The variant name, as it appears in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventType::Custom => "Custom",
            EventType::PlayerQuit => "PlayerQuit",
            EventType::PlayerChat => "PlayerChat",
            EventType::PlayerChatCommand => "PlayerChatCommand",
            EventType::PlayerJoin => "PlayerJoin",
            EventType::PlayerPickupHit => "PlayerPickupHit",
            EventType::PackageStart => "PackageStart",
            EventType::PackageStop => "PackageStop",
            EventType::GameTick => "GameTick",
            EventType::ClientConnectionRequest => "ClientConnectionRequest",
            EventType::NpcReachTarget => "NpcReachTarget",
            EventType::NpcDamage => "NpcDamage",
            EventType::NpcSpawn => "NpcSpawn",
            EventType::NpcDeath => "NpcDeath",
            EventType::NpcStreamIn => "NpcStreamIn",
            EventType::NpcStreamOut => "NpcStreamOut",
            EventType::PlayerEnterVehicle => "PlayerEnterVehicle",
            EventType::PlayerLeaveVehicle => "PlayerLeaveVehicle",
            EventType::PlayerStateChange => "PlayerStateChange",
            EventType::VehicleRespawn => "VehicleRespawn",
            EventType::VehicleStreamIn => "VehicleStreamIn",
            EventType::VehicleStreamOut => "VehicleStreamOut",
            EventType::PlayerServerAuth => "PlayerServerAuth",
            EventType::PlayerSteamAuth => "PlayerSteamAuth",
            EventType::PlayerDownloadFile => "PlayerDownloadFile",
            EventType::PlayerStreamIn => "PlayerStreamIn",
            EventType::PlayerStreamOut => "PlayerStreamOut",
            EventType::PlayerSpawn => "PlayerSpawn",
            EventType::PlayerDeath => "PlayerDeath",
            EventType::PlayerWeaponShot => "PlayerWeaponShot",
            EventType::PlayerDamage => "PlayerDamage",
            EventType::PlayerInteractDoor => "PlayerInteractDoor",
            EventType::PlayerPreCommand => "PlayerPreCommand",
            EventType::PlayerCommandFailed => "PlayerCommandFailed",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
