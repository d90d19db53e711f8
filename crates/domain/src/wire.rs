//! Raw wire-level types exchanged with the transport collaborator.

use serde::Serialize;

use crate::identifier::Identifier;

/// Raw response payload from a transport call.
pub type RawResponse = serde_json::Value;

/// One raw property delivery from the transport.
///
/// The structured wire bundles several of these per delivery; the legacy
/// wire delivers them one key at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct RawUpdate {
    pub identifier: Identifier,
    pub value: serde_json::Value,
}

impl RawUpdate {
    #[must_use]
    pub fn keyed(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            identifier: Identifier::keyed(key),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn indexed(
        device_id: impl Into<String>,
        service_id: u32,
        property_id: u32,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            identifier: Identifier::indexed(device_id, service_id, property_id),
            value: value.into(),
        }
    }
}

/// Outbound parameter for one transport command.
///
/// Serializes to what the wire expects: a `{did, siid, piid, value}` object
/// on the structured scheme, a bare positional value on the legacy scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawCommand {
    Indexed {
        did: String,
        siid: u32,
        piid: u32,
        value: serde_json::Value,
    },
    Positional(serde_json::Value),
}

impl RawCommand {
    #[must_use]
    pub fn positional(value: impl Into<serde_json::Value>) -> Self {
        Self::Positional(value.into())
    }

    #[must_use]
    pub fn indexed(
        did: impl Into<String>,
        siid: u32,
        piid: u32,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Self::Indexed {
            did: did.into(),
            siid,
            piid,
            value: value.into(),
        }
    }
}
