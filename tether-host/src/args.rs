//! Event argument values.

use std::fmt;
use tether_entities::EntityRef;

/// One argument delivered to event handlers.
///
/// The union is flat: scalars, text, and entity references. Collections are
/// not representable, which is what keeps custom-event payloads portable
/// across every scripting environment the native server hosts. Anything
/// list-shaped in a native payload is flattened before it gets here
/// (vectors into three floats, argument lists into joined text).
#[derive(Debug, Clone)]
pub enum EventArg {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Entity(EntityRef),
}

impl EventArg {
    /// The boolean payload, if this is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EventArg::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer payload, if this is an `Int`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            EventArg::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The float payload, if this is a `Float`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            EventArg::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The text payload, if this is `Text`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EventArg::Text(value) => Some(value),
            _ => None,
        }
    }

    /// The entity payload, if this is an `Entity`.
    #[must_use]
    pub fn as_entity(&self) -> Option<&EntityRef> {
        match self {
            EventArg::Entity(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for EventArg {
    fn from(value: bool) -> Self {
        EventArg::Bool(value)
    }
}

impl From<i64> for EventArg {
    fn from(value: i64) -> Self {
        EventArg::Int(value)
    }
}

impl From<i32> for EventArg {
    fn from(value: i32) -> Self {
        EventArg::Int(i64::from(value))
    }
}

impl From<f64> for EventArg {
    fn from(value: f64) -> Self {
        EventArg::Float(value)
    }
}

impl From<&str> for EventArg {
    fn from(value: &str) -> Self {
        EventArg::Text(value.to_string())
    }
}

impl From<String> for EventArg {
    fn from(value: String) -> Self {
        EventArg::Text(value)
    }
}

impl From<EntityRef> for EventArg {
    fn from(value: EntityRef) -> Self {
        EventArg::Entity(value)
    }
}

impl fmt::Display for EventArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventArg::Bool(value) => write!(f, "{value}"),
            EventArg::Int(value) => write!(f, "{value}"),
            EventArg::Float(value) => write!(f, "{value}"),
            EventArg::Text(value) => write!(f, "{value:?}"),
            EventArg::Entity(value) => write!(f, "{value}"),
        }
    }
}
