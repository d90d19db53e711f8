//! Property registry — identifier → name → mapper tables and the value cache.

use std::collections::HashMap;

use lumio_domain::error::ConfigurationError;
use lumio_domain::identifier::Identifier;
use lumio_domain::time::{Timestamp, now};
use lumio_domain::value::PropertyValue;
use lumio_domain::wire::RawUpdate;

/// Translation from a raw wire value into a domain value.
///
/// Kept data-driven so concrete drivers stay declarative lists of
/// identifier → name → mapper entries. A mapper may decline (`None`) when
/// the raw value is not usable, which doubles as a filter under the
/// structured scheme where one delivery bundles several raw fields.
#[derive(Debug, Clone)]
pub enum PropertyMapper {
    /// Pass raw scalars through unchanged.
    Identity,
    /// Legacy `"on"` / `"off"` strings to booleans.
    OnOff,
    /// Any raw boolean to a domain boolean.
    Bool,
    /// Raw number divided by a fixed factor.
    Scaled(f64),
    /// Closed raw-integer → name table; unknown raw values are declined.
    Enum(&'static [(i64, &'static str)]),
    /// Escape hatch for one-off translations.
    Custom(fn(&serde_json::Value) -> Option<PropertyValue>),
}

impl PropertyMapper {
    /// Apply this mapper to one raw value.
    #[must_use]
    pub fn map(&self, raw: &serde_json::Value) -> Option<PropertyValue> {
        match self {
            Self::Identity => PropertyValue::from_json(raw),
            Self::OnOff => match raw.as_str() {
                Some("on") => Some(PropertyValue::Bool(true)),
                Some("off") => Some(PropertyValue::Bool(false)),
                _ => None,
            },
            Self::Bool => raw.as_bool().map(PropertyValue::Bool),
            Self::Scaled(factor) => {
                let number = raw.as_f64()?;
                Some(PropertyValue::Float(number / factor))
            }
            Self::Enum(table) => {
                let raw = raw.as_i64()?;
                table
                    .iter()
                    .find(|(value, _)| *value == raw)
                    .map(|(_, name)| PropertyValue::from(*name))
            }
            Self::Custom(mapper) => mapper(raw),
        }
    }
}

/// Binds an [`Identifier`] to a property name and its mapper.
#[derive(Debug, Clone)]
pub struct PropertyDefinition {
    pub identifier: Identifier,
    pub name: String,
    pub mapper: PropertyMapper,
}

impl PropertyDefinition {
    /// Apply this definition to one raw delivery.
    ///
    /// Declines when the identifier does not structurally match, or when the
    /// mapper declines the raw value.
    fn apply(&self, update: &RawUpdate) -> Option<PropertyValue> {
        if update.identifier != self.identifier {
            return None;
        }
        self.mapper.map(&update.value)
    }
}

/// Per-device property table plus the last known value per name.
///
/// Built once at device construction; mutated only by [`ingest`]; never
/// shrinks. The cache only ever holds names present in the definitions.
///
/// [`ingest`]: PropertyRegistry::ingest
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    definitions: Vec<PropertyDefinition>,
    values: HashMap<String, PropertyValue>,
    updated_at: HashMap<String, Timestamp>,
}

impl PropertyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateProperty`] when `name` already
    /// has a definition on this registry.
    pub fn define(
        &mut self,
        identifier: Identifier,
        name: impl Into<String>,
        mapper: PropertyMapper,
    ) -> Result<(), ConfigurationError> {
        let name = name.into();
        if self.is_defined(&name) {
            return Err(ConfigurationError::DuplicateProperty { name });
        }
        self.definitions.push(PropertyDefinition {
            identifier,
            name,
            mapper,
        });
        Ok(())
    }

    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.iter().any(|def| def.name == name)
    }

    /// Definitions in declaration order, for initial sync and batch polls.
    #[must_use]
    pub fn definitions(&self) -> &[PropertyDefinition] {
        &self.definitions
    }

    /// Turn one transport delivery into named, mapped values.
    ///
    /// Every definition is evaluated against every raw entry; a single
    /// structured delivery may therefore produce several pairs. Every
    /// accepted value is emitted, repeated identical readings included, so
    /// observers see each raw delivery; deduplication is reserved for
    /// derived republishes.
    pub fn ingest(&mut self, updates: &[RawUpdate]) -> Vec<(String, PropertyValue)> {
        let mut accepted = Vec::new();
        for update in updates {
            for definition in &self.definitions {
                let Some(value) = definition.apply(update) else {
                    continue;
                };
                tracing::debug!(
                    property = %definition.name,
                    %value,
                    "mapped raw update"
                );
                self.updated_at.insert(definition.name.clone(), now());
                self.values.insert(definition.name.clone(), value.clone());
                accepted.push((definition.name.clone(), value));
            }
        }
        accepted
    }

    /// Last known value for `name`; pure lookup, never triggers IO.
    #[must_use]
    pub fn current_value(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    /// When `name` was last seen in a delivery, changed or not.
    #[must_use]
    pub fn last_updated(&self, name: &str) -> Option<Timestamp> {
        self.updated_at.get(name).copied()
    }
}
