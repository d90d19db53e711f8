//! Addressable handles for raw device properties.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle addressing one raw property on a device.
///
/// Two incompatible addressing schemes coexist across device generations:
/// flat string keys on the legacy wire, and `(device, service, property)`
/// triples on the structured wire. They are modeled side by side and never
/// inferred from one another.
///
/// Equality is structural and is what matches incoming raw updates to
/// property definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Keyed {
        key: String,
    },
    Indexed {
        device_id: String,
        service_id: u32,
        property_id: u32,
    },
}

impl Identifier {
    /// Legacy flat-key handle.
    #[must_use]
    pub fn keyed(key: impl Into<String>) -> Self {
        Self::Keyed { key: key.into() }
    }

    /// Structured `(device, service, property)` handle.
    #[must_use]
    pub fn indexed(device_id: impl Into<String>, service_id: u32, property_id: u32) -> Self {
        Self::Indexed {
            device_id: device_id.into(),
            service_id,
            property_id,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyed { key } => f.write_str(key),
            Self::Indexed {
                device_id,
                service_id,
                property_id,
            } => write!(f, "{device_id}/{service_id}/{property_id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_compare_keyed_identifiers_structurally() {
        assert_eq!(Identifier::keyed("power"), Identifier::keyed("power"));
        assert_ne!(Identifier::keyed("power"), Identifier::keyed("mode"));
    }

    #[test]
    fn should_compare_indexed_identifiers_structurally() {
        assert_eq!(
            Identifier::indexed("1234", 2, 5),
            Identifier::indexed("1234", 2, 5)
        );
        assert_ne!(
            Identifier::indexed("1234", 2, 5),
            Identifier::indexed("1234", 2, 4)
        );
        assert_ne!(
            Identifier::indexed("1234", 2, 5),
            Identifier::indexed("9999", 2, 5)
        );
    }

    #[test]
    fn should_never_equate_across_schemes() {
        assert_ne!(Identifier::keyed("power"), Identifier::indexed("power", 2, 2));
    }

    #[test]
    fn should_display_indexed_as_slash_separated_triple() {
        let id = Identifier::indexed("1234", 2, 5);
        assert_eq!(id.to_string(), "1234/2/5");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let id = Identifier::indexed("1234", 10, 10);
        let json = serde_json::to_string(&id).unwrap();
        let parsed: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
