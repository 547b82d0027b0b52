//! Native event payload decoding.
//!
//! Payloads arrive as positional JSON arrays. The schema is fixed per event
//! type: player-scoped events carry the acting player's handle first, and
//! embedded handles resolve through the shared pools so every domain
//! dispatched in one fan-out observes the same wrapper identity. Vectors are
//! flattened to three floats and argument lists to joined text before the
//! payload ever reaches the bridge.

use crate::args::EventArg;
use serde_json::Value;
use tether_entities::{EntityRef, PoolRegistry};
use tether_types::{EntityKind, EventType, Handle};
use thiserror::Error;

/// Why a payload failed to decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload parsed, but is not an array.
    #[error("payload is not a JSON array")]
    NotAnArray,

    /// The array ended before the schema did.
    #[error("missing argument {index} ({what})")]
    Missing { index: usize, what: &'static str },

    /// An element does not have the type the schema expects.
    #[error("argument {index} ({what}) has the wrong type")]
    WrongType { index: usize, what: &'static str },

    /// An embedded entity reference names a kind id outside the table.
    #[error("argument {index} names unknown entity kind {id}")]
    UnknownKind { index: usize, id: i64 },

    /// Custom events are name-keyed and never travel the numeric path.
    #[error("{0} does not arrive through the native payload path")]
    NotNative(EventType),
}

/// Positional cursor over the payload array.
struct ArgReader<'a> {
    values: &'a [Value],
    pools: &'a PoolRegistry,
    index: usize,
}

impl<'a> ArgReader<'a> {
    fn new(values: &'a [Value], pools: &'a PoolRegistry) -> Self {
        Self {
            values,
            pools,
            index: 0,
        }
    }

    fn next(&mut self, what: &'static str) -> Result<&'a Value, DecodeError> {
        let value = self.values.get(self.index).ok_or(DecodeError::Missing {
            index: self.index,
            what,
        })?;
        self.index += 1;
        Ok(value)
    }

    fn int(&mut self, what: &'static str) -> Result<i64, DecodeError> {
        let index = self.index;
        self.next(what)?
            .as_i64()
            .ok_or(DecodeError::WrongType { index, what })
    }

    fn float(&mut self, what: &'static str) -> Result<f64, DecodeError> {
        let index = self.index;
        self.next(what)?
            .as_f64()
            .ok_or(DecodeError::WrongType { index, what })
    }

    fn bool(&mut self, what: &'static str) -> Result<bool, DecodeError> {
        let index = self.index;
        self.next(what)?
            .as_bool()
            .ok_or(DecodeError::WrongType { index, what })
    }

    fn text(&mut self, what: &'static str) -> Result<String, DecodeError> {
        let index = self.index;
        self.next(what)?
            .as_str()
            .map(str::to_owned)
            .ok_or(DecodeError::WrongType { index, what })
    }

    /// Reads a handle and resolves it through the pool for `kind`.
    fn entity(&mut self, kind: EntityKind, what: &'static str) -> Result<EntityRef, DecodeError> {
        let raw = self.int(what)?;
        Ok(self.pools.resolve(kind, Handle::from_raw(raw)))
    }
}

/// Decodes the payload for `event` into handler arguments.
///
/// Handle resolution may construct wrappers as a side effect, which is the
/// intended path for entities the bridge first learns about through an
/// event. [`EventType::Custom`] is rejected here.
pub fn decode_event_args(
    pools: &PoolRegistry,
    event: EventType,
    payload: &str,
) -> Result<Vec<EventArg>, DecodeError> {
    let parsed: Value = serde_json::from_str(payload)?;
    let Value::Array(values) = parsed else {
        return Err(DecodeError::NotAnArray);
    };

    let mut reader = ArgReader::new(&values, pools);
    let mut args = Vec::new();

    if event.is_player_event() {
        args.push(EventArg::Entity(
            reader.entity(EntityKind::Player, "player")?,
        ));
    }

    match event {
        EventType::Custom => return Err(DecodeError::NotNative(event)),

        // Player-scoped with no further payload.
        EventType::PlayerQuit
        | EventType::PlayerJoin
        | EventType::PlayerSpawn
        | EventType::PlayerServerAuth
        | EventType::PlayerSteamAuth => {}

        // Lifecycle notices with no payload at all.
        EventType::PackageStart | EventType::PackageStop => {}

        EventType::PlayerChat => {
            args.push(EventArg::Text(reader.text("message")?));
        }
        EventType::PlayerChatCommand => {
            args.push(EventArg::Text(reader.text("command")?));
            args.push(EventArg::Bool(reader.bool("exists")?));
        }
        EventType::PlayerPickupHit => {
            args.push(EventArg::Entity(
                reader.entity(EntityKind::Pickup, "pickup")?,
            ));
        }
        EventType::GameTick => {
            args.push(EventArg::Float(reader.float("delta_seconds")?));
        }
        EventType::ClientConnectionRequest => {
            args.push(EventArg::Text(reader.text("ip")?));
            args.push(EventArg::Int(reader.int("port")?));
        }
        EventType::NpcReachTarget | EventType::NpcSpawn | EventType::NpcDeath => {
            args.push(EventArg::Entity(reader.entity(EntityKind::Npc, "npc")?));
        }
        EventType::NpcDamage => {
            args.push(EventArg::Entity(reader.entity(EntityKind::Npc, "npc")?));
            args.push(EventArg::Int(reader.int("damage_type")?));
            args.push(EventArg::Float(reader.float("amount")?));
        }
        EventType::NpcStreamIn | EventType::NpcStreamOut => {
            args.push(EventArg::Entity(reader.entity(EntityKind::Npc, "npc")?));
        }
        EventType::PlayerEnterVehicle | EventType::PlayerLeaveVehicle => {
            args.push(EventArg::Entity(
                reader.entity(EntityKind::Vehicle, "vehicle")?,
            ));
            args.push(EventArg::Int(reader.int("seat")?));
        }
        EventType::PlayerStateChange => {
            args.push(EventArg::Int(reader.int("new_state")?));
            args.push(EventArg::Int(reader.int("old_state")?));
        }
        EventType::VehicleRespawn => {
            args.push(EventArg::Entity(
                reader.entity(EntityKind::Vehicle, "vehicle")?,
            ));
        }
        EventType::VehicleStreamIn | EventType::VehicleStreamOut => {
            args.push(EventArg::Entity(
                reader.entity(EntityKind::Vehicle, "vehicle")?,
            ));
        }
        EventType::PlayerDownloadFile => {
            args.push(EventArg::Text(reader.text("file_name")?));
            args.push(EventArg::Text(reader.text("checksum")?));
        }
        EventType::PlayerStreamIn | EventType::PlayerStreamOut => {
            args.push(EventArg::Entity(
                reader.entity(EntityKind::Player, "other")?,
            ));
        }
        EventType::PlayerDeath => {
            args.push(EventArg::Entity(
                reader.entity(EntityKind::Player, "killer")?,
            ));
        }
        EventType::PlayerWeaponShot => {
            args.push(EventArg::Int(reader.int("weapon")?));
            args.push(EventArg::Int(reader.int("hit_type")?));
            // Kind id 0 means the shot hit nothing; the target argument is
            // omitted in that case.
            let kind_index = reader.index;
            let target_kind = reader.int("target_kind")?;
            let target_handle = reader.int("target_handle")?;
            if target_kind != 0 {
                let kind = EntityKind::from_id(target_kind).ok_or(DecodeError::UnknownKind {
                    index: kind_index,
                    id: target_kind,
                })?;
                args.push(EventArg::Entity(
                    pools.resolve(kind, Handle::from_raw(target_handle)),
                ));
            }
            for what in [
                "hit_x", "hit_y", "hit_z", "start_x", "start_y", "start_z", "impact_x",
                "impact_y", "impact_z",
            ] {
                args.push(EventArg::Float(reader.float(what)?));
            }
        }
        EventType::PlayerDamage => {
            args.push(EventArg::Int(reader.int("damage_type")?));
            args.push(EventArg::Float(reader.float("amount")?));
        }
        EventType::PlayerInteractDoor => {
            args.push(EventArg::Entity(reader.entity(EntityKind::Door, "door")?));
            args.push(EventArg::Bool(reader.bool("being_opened")?));
        }
        // The command events carry a player but sit outside the
        // player-scoped set, so their player is read here.
        EventType::PlayerPreCommand => {
            args.push(EventArg::Entity(
                reader.entity(EntityKind::Player, "player")?,
            ));
            args.push(EventArg::Text(reader.text("command")?));
            args.push(EventArg::Text(reader.text("args_joined")?));
        }
        EventType::PlayerCommandFailed => {
            args.push(EventArg::Entity(
                reader.entity(EntityKind::Player, "player")?,
            ));
            args.push(EventArg::Text(reader.text("command")?));
            args.push(EventArg::Text(reader.text("args_joined")?));
            args.push(EventArg::Int(reader.int("error_code")?));
        }
    }

    Ok(args)
}
