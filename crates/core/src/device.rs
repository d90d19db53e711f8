//! Device — the composition root tying registry, capabilities and transport.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use lumio_domain::error::{DriverError, TransportError};
use lumio_domain::identifier::Identifier;
use lumio_domain::value::PropertyValue;
use lumio_domain::wire::{RawCommand, RawResponse, RawUpdate};

use crate::capability::{Capability, Publisher};
use crate::ports::{CallOptions, Transport};
use crate::registry::{PropertyDefinition, PropertyMapper, PropertyRegistry};

/// One published property change, delivered to external observers.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyUpdate {
    pub name: String,
    pub value: PropertyValue,
}

/// One physical unit: a property registry plus an ordered capability chain
/// plus a reference to the transport collaborator.
///
/// A device is the unit of identity for command addressing; its id is the
/// one carried in every `Indexed` identifier. Drivers assume single-writer
/// usage per device: property ingestion and command issuance are never
/// raced from concurrent callers.
pub struct Device<T> {
    device_id: String,
    transport: Arc<T>,
    registry: PropertyRegistry,
    capabilities: Vec<Box<dyn Capability>>,
    derived: HashMap<String, PropertyValue>,
}

impl<T: Transport> Device<T> {
    /// Create a builder for composing a device.
    #[must_use]
    pub fn builder(device_id: impl Into<String>, transport: Arc<T>) -> DeviceBuilder<T> {
        DeviceBuilder {
            device_id: device_id.into(),
            transport,
            definitions: Vec::new(),
            capabilities: Vec::new(),
        }
    }

    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Last known value for `name`, defined or derived. Pure cache read;
    /// callers must have seen at least one update for the value to exist.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.registry
            .current_value(name)
            .or_else(|| self.derived.get(name))
    }

    /// Property definitions in declaration order, for batch polls.
    #[must_use]
    pub fn definitions(&self) -> &[PropertyDefinition] {
        self.registry.definitions()
    }

    /// Feed one transport delivery through the registry and the chain.
    ///
    /// Returns every published pair — accepted raw readings first, derived
    /// values appended in publish order — for external observers. Repeated
    /// identical raw readings are re-delivered; only derived values are
    /// deduplicated.
    #[tracing::instrument(skip_all, fields(device_id = %self.device_id))]
    pub fn handle_update(&mut self, updates: &[RawUpdate]) -> Vec<PropertyUpdate> {
        let changed = self.registry.ingest(updates);
        self.dispatch(changed)
    }

    /// Single-pass, forward-only propagation. Each pending pair is shown to
    /// every capability in chain order; derived publishes re-enter the same
    /// pass at the back of the queue. Derived values equal to the cached one
    /// are absorbed, which also breaks accidental derive cycles. A derived
    /// name that collides with a defined property is dropped — the registry
    /// stays the single source of truth for defined names.
    fn dispatch(&mut self, seed: Vec<(String, PropertyValue)>) -> Vec<PropertyUpdate> {
        let mut queue: VecDeque<(String, PropertyValue)> = seed.into_iter().collect();
        let mut published = Vec::new();

        while let Some((name, value)) = queue.pop_front() {
            let mut publisher = Publisher::new();
            for capability in &mut self.capabilities {
                capability.property_updated(&name, &value, &mut publisher);
            }
            for (derived_name, derived_value) in publisher.into_pending() {
                if self.registry.is_defined(&derived_name) {
                    tracing::warn!(
                        property = %derived_name,
                        "derived name collides with a defined property, dropped"
                    );
                    continue;
                }
                if self.property(&derived_name) == Some(&derived_value) {
                    continue;
                }
                tracing::debug!(property = %derived_name, value = %derived_value, "derived");
                self.derived
                    .insert(derived_name.clone(), derived_value.clone());
                queue.push_back((derived_name, derived_value));
            }
            published.push(PropertyUpdate { name, value });
        }

        published
    }

    /// Issue one command through the transport.
    ///
    /// # Errors
    ///
    /// Propagates transport failures unmodified; translation of the reserved
    /// "unsupported" code is the calling operation's concern.
    pub async fn call(
        &self,
        method: &str,
        params: Vec<RawCommand>,
        options: CallOptions,
    ) -> Result<RawResponse, TransportError> {
        self.transport.call(method, params, options).await
    }
}

/// Step-by-step builder for [`Device`].
///
/// Collects property definitions and capabilities in declaration order;
/// [`build`](Self::build) validates the duplicate-name invariant before any
/// property traffic can be processed.
pub struct DeviceBuilder<T> {
    device_id: String,
    transport: Arc<T>,
    definitions: Vec<(Identifier, String, PropertyMapper)>,
    capabilities: Vec<Box<dyn Capability>>,
}

impl<T: Transport> DeviceBuilder<T> {
    #[must_use]
    pub fn property(
        mut self,
        identifier: Identifier,
        name: impl Into<String>,
        mapper: PropertyMapper,
    ) -> Self {
        self.definitions.push((identifier, name.into(), mapper));
        self
    }

    /// Append a capability to the chain. Attachment order is the chain
    /// order and is part of the device type's contract.
    #[must_use]
    pub fn capability(mut self, capability: impl Capability + 'static) -> Self {
        self.capabilities.push(Box::new(capability));
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Configuration`] when two definitions share a
    /// property name.
    pub fn build(self) -> Result<Device<T>, DriverError> {
        let mut registry = PropertyRegistry::new();
        for (identifier, name, mapper) in self.definitions {
            registry.define(identifier, name, mapper)?;
        }
        Ok(Device {
            device_id: self.device_id,
            transport: self.transport,
            registry,
            capabilities: self.capabilities,
            derived: HashMap::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;

    use lumio_domain::error::ConfigurationError;

    use crate::capabilities::{FanSpeed, PowerFromMode, fan_speed, power};

    #[derive(Default)]
    struct NullTransport {
        calls: Mutex<Vec<(String, Vec<RawCommand>, CallOptions)>>,
    }

    impl Transport for NullTransport {
        fn call(
            &self,
            method: &str,
            params: Vec<RawCommand>,
            options: CallOptions,
        ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
            self.calls
                .lock()
                .unwrap()
                .push((method.to_string(), params, options));
            async { Ok(serde_json::json!(["ok"])) }
        }
    }

    /// Records every notification it sees, in delivery order.
    struct Recorder {
        seen: Arc<Mutex<Vec<(String, PropertyValue)>>>,
    }

    impl Capability for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn property_updated(
            &mut self,
            name: &str,
            value: &PropertyValue,
            _publisher: &mut Publisher,
        ) {
            self.seen
                .lock()
                .unwrap()
                .push((name.to_string(), value.clone()));
        }
    }

    fn transport() -> Arc<NullTransport> {
        Arc::new(NullTransport::default())
    }

    #[test]
    fn should_reject_duplicate_property_name_at_build_time() {
        let result = Device::builder("1234", transport())
            .property(Identifier::keyed("power"), "power", PropertyMapper::OnOff)
            .property(Identifier::keyed("pwr"), "power", PropertyMapper::OnOff)
            .build();
        assert!(matches!(
            result,
            Err(DriverError::Configuration(
                ConfigurationError::DuplicateProperty { .. }
            ))
        ));
    }

    #[test]
    fn should_cache_mapped_values_for_property_reads() {
        let mut device = Device::builder("1234", transport())
            .property(Identifier::keyed("aqi"), "aqi", PropertyMapper::Identity)
            .build()
            .unwrap();
        device.handle_update(&[RawUpdate::keyed("aqi", 17)]);
        assert_eq!(device.property("aqi"), Some(&PropertyValue::Int(17)));
        assert_eq!(device.property("humidity"), None);
    }

    #[test]
    fn should_deliver_every_update_to_every_capability_in_chain_order() {
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));
        let mut device = Device::builder("1234", transport())
            .property(Identifier::keyed("aqi"), "aqi", PropertyMapper::Identity)
            .property(
                Identifier::keyed("humidity"),
                "humidity",
                PropertyMapper::Identity,
            )
            .capability(Recorder { seen: first.clone() })
            .capability(Recorder {
                seen: second.clone(),
            })
            .build()
            .unwrap();

        device.handle_update(&[
            RawUpdate::keyed("aqi", 17),
            RawUpdate::keyed("humidity", 40),
        ]);

        let expected = vec![
            ("aqi".to_string(), PropertyValue::Int(17)),
            ("humidity".to_string(), PropertyValue::Int(40)),
        ];
        assert_eq!(*first.lock().unwrap(), expected);
        assert_eq!(*second.lock().unwrap(), expected);
    }

    #[test]
    fn should_show_derived_values_to_capabilities_later_in_the_chain() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut device = Device::builder("1234", transport())
            .property(
                Identifier::keyed("motor1_speed"),
                "fan_speed_1",
                PropertyMapper::Identity,
            )
            .property(
                Identifier::keyed("motor2_speed"),
                "fan_speed_2",
                PropertyMapper::Identity,
            )
            .capability(FanSpeed::new("fan_speed_1", "fan_speed_2"))
            .capability(Recorder { seen: seen.clone() })
            .build()
            .unwrap();

        device.handle_update(&[RawUpdate::keyed("motor1_speed", 5)]);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("fan_speed_1".to_string(), PropertyValue::Int(5)),
                (fan_speed::FAN_SPEED.to_string(), PropertyValue::Int(5)),
            ]
        );
        assert_eq!(
            device.property(fan_speed::FAN_SPEED),
            Some(&PropertyValue::Int(5))
        );
    }

    #[test]
    fn should_publish_derived_value_once_per_qualifying_update() {
        let mut device = Device::builder("1234", transport())
            .property(
                Identifier::keyed("motor1_speed"),
                "fan_speed_1",
                PropertyMapper::Identity,
            )
            .property(
                Identifier::keyed("motor2_speed"),
                "fan_speed_2",
                PropertyMapper::Identity,
            )
            .capability(FanSpeed::new("fan_speed_1", "fan_speed_2"))
            .build()
            .unwrap();

        let first = device.handle_update(&[RawUpdate::keyed("motor1_speed", 5)]);
        assert_eq!(
            first,
            vec![
                PropertyUpdate {
                    name: "fan_speed_1".to_string(),
                    value: PropertyValue::Int(5),
                },
                PropertyUpdate {
                    name: fan_speed::FAN_SPEED.to_string(),
                    value: PropertyValue::Int(5),
                },
            ]
        );

        // The unset sentinel leaves the effective speed at 5; the unchanged
        // derived value is absorbed.
        let second = device.handle_update(&[RawUpdate::keyed("motor2_speed", -1)]);
        assert_eq!(
            second,
            vec![PropertyUpdate {
                name: "fan_speed_2".to_string(),
                value: PropertyValue::Int(-1),
            }]
        );

        let third = device.handle_update(&[RawUpdate::keyed("motor2_speed", 9)]);
        assert_eq!(
            third,
            vec![
                PropertyUpdate {
                    name: "fan_speed_2".to_string(),
                    value: PropertyValue::Int(9),
                },
                PropertyUpdate {
                    name: fan_speed::FAN_SPEED.to_string(),
                    value: PropertyValue::Int(9),
                },
            ]
        );
    }

    #[test]
    fn should_chain_two_derivations_in_one_pass() {
        let mut device = Device::builder("1234", transport())
            .property(Identifier::keyed("mode"), "mode", PropertyMapper::Identity)
            .capability(PowerFromMode::new("mode"))
            .build()
            .unwrap();

        let published = device.handle_update(&[RawUpdate::keyed("mode", "idle")]);
        assert_eq!(
            published,
            vec![
                PropertyUpdate {
                    name: "mode".to_string(),
                    value: PropertyValue::from("idle"),
                },
                PropertyUpdate {
                    name: power::RUNNING.to_string(),
                    value: PropertyValue::Bool(false),
                },
            ]
        );
        assert_eq!(
            device.property(power::RUNNING),
            Some(&PropertyValue::Bool(false))
        );
    }

    #[test]
    fn should_redeliver_repeated_identical_raw_readings() {
        let mut device = Device::builder("1234", transport())
            .property(Identifier::keyed("mode"), "mode", PropertyMapper::Identity)
            .capability(PowerFromMode::new("mode"))
            .build()
            .unwrap();

        let first = device.handle_update(&[RawUpdate::keyed("mode", "auto")]);
        assert_eq!(
            first,
            vec![
                PropertyUpdate {
                    name: "mode".to_string(),
                    value: PropertyValue::from("auto"),
                },
                PropertyUpdate {
                    name: power::RUNNING.to_string(),
                    value: PropertyValue::Bool(true),
                },
            ]
        );

        // The raw reading is re-delivered; the unchanged derived flag is not.
        let second = device.handle_update(&[RawUpdate::keyed("mode", "auto")]);
        assert_eq!(
            second,
            vec![PropertyUpdate {
                name: "mode".to_string(),
                value: PropertyValue::from("auto"),
            }]
        );
    }

    /// Republishes under a name that already has a definition.
    struct Shadower;

    impl Capability for Shadower {
        fn name(&self) -> &'static str {
            "shadower"
        }

        fn property_updated(
            &mut self,
            name: &str,
            _value: &PropertyValue,
            publisher: &mut Publisher,
        ) {
            if name == "aqi" {
                publisher.publish("mode", "hijacked");
            }
        }
    }

    #[test]
    fn should_drop_derived_publish_colliding_with_a_defined_property() {
        let mut device = Device::builder("1234", transport())
            .property(Identifier::keyed("aqi"), "aqi", PropertyMapper::Identity)
            .property(Identifier::keyed("mode"), "mode", PropertyMapper::Identity)
            .capability(Shadower)
            .build()
            .unwrap();

        let published = device.handle_update(&[RawUpdate::keyed("aqi", 17)]);
        assert_eq!(
            published,
            vec![PropertyUpdate {
                name: "aqi".to_string(),
                value: PropertyValue::Int(17),
            }]
        );
        assert_eq!(device.property("mode"), None);

        // The registry keeps answering for the defined name afterwards.
        device.handle_update(&[RawUpdate::keyed("mode", "auto")]);
        assert_eq!(device.property("mode"), Some(&PropertyValue::from("auto")));
    }

    #[tokio::test]
    async fn should_forward_calls_to_the_transport() {
        let transport = transport();
        let device = Device::builder("1234", transport.clone())
            .build()
            .unwrap();

        device
            .call(
                "set_power",
                vec![RawCommand::positional("on")],
                CallOptions::refresh(["power"]),
            )
            .await
            .unwrap();

        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "set_power");
        assert_eq!(calls[0].1, vec![RawCommand::positional("on")]);
        assert_eq!(calls[0].2.refresh, vec!["power".to_string()]);
    }
}
