//! Structured-protocol air purifier driver.
//!
//! Every property is addressed by a `(device, service, property)` triple and
//! all writes go through a single `set_properties` method. One delivery may
//! bundle several raw fields; the registry sorts them out.
//!
//! This generation has a discrete power field and a single motor, so no
//! capability chain is attached; the chain order contract is trivially
//! empty.

use std::ops::RangeInclusive;
use std::sync::Arc;

use lumio_core::command::clamp_to;
use lumio_core::device::{Device, PropertyUpdate};
use lumio_core::ports::{CallOptions, Transport};
use lumio_core::registry::PropertyMapper;
use lumio_domain::error::{DriverError, InvalidArgumentError};
use lumio_domain::identifier::Identifier;
use lumio_domain::led::LedBrightness;
use lumio_domain::mode::Mode;
use lumio_domain::value::PropertyValue;
use lumio_domain::wire::{RawCommand, RawUpdate};

use crate::properties;

const FAN_LEVEL_RANGE: RangeInclusive<i64> = 1..=3;
const FAVORITE_LEVEL_RANGE: RangeInclusive<i64> = 0..=14;
const FAVORITE_SPEED_RANGE: RangeInclusive<i64> = 300..=2300;

const LED_BRIGHTNESS_TABLE: &[(i64, &str)] = &[(0, "bright"), (1, "dim"), (2, "off")];
const MODE_TABLE: &[(i64, &str)] = &[(0, "auto"), (1, "sleep"), (2, "favorite"), (3, "none")];

// Service/property ids from the device's public spec.
const SIID_PURIFIER: u32 = 2;
const PIID_POWER: u32 = 2;
const PIID_FAN_LEVEL: u32 = 4;
const PIID_MODE: u32 = 5;

const SIID_ENVIRONMENT: u32 = 3;
const PIID_AQI: u32 = 6;
const PIID_HUMIDITY: u32 = 7;
const PIID_TEMPERATURE: u32 = 8;

const SIID_FILTER: u32 = 4;
const PIID_FILTER_LIFE: u32 = 3;
const PIID_FILTER_HOURS: u32 = 5;

const SIID_ALARM: u32 = 5;
const PIID_BUZZER: u32 = 1;

const SIID_LED: u32 = 6;
const PIID_LED_BRIGHTNESS: u32 = 1;
const PIID_LED: u32 = 6;

const SIID_PHYSICAL_CONTROLS: u32 = 7;
const PIID_CHILD_LOCK: u32 = 1;

const SIID_MOTOR: u32 = 10;
const PIID_SPEED_STRONG: u32 = 1;
const PIID_SPEED_HIGH: u32 = 2;
const PIID_SPEED_MEDIUM: u32 = 3;
const PIID_SPEED_MEDIUM_LOW: u32 = 4;
const PIID_SPEED_LOW: u32 = 5;
const PIID_SPEED_SILENT: u32 = 6;
const PIID_FAVORITE_SPEED: u32 = 7;
const PIID_MOTOR_SPEED: u32 = 8;
const PIID_MOTOR_SPEED_SET: u32 = 9;
const PIID_FAVORITE_LEVEL: u32 = 10;

/// Translate a mode through this generation's closed table.
///
/// The legacy wire left unknown branches undefined; here anything outside
/// the table is rejected before the transport is touched.
fn raw_mode(mode: Mode) -> Result<i64, InvalidArgumentError> {
    match mode {
        Mode::Auto => Ok(0),
        Mode::Sleep => Ok(1),
        Mode::Favorite => Ok(2),
        Mode::None => Ok(3),
        other => Err(InvalidArgumentError::UnsupportedMode {
            mode: other.to_string(),
        }),
    }
}

/// Abstraction over a structured-generation air purifier.
pub struct AirPurifierMiot<T> {
    device: Device<T>,
}

impl<T: Transport> AirPurifierMiot<T> {
    /// Compose the device from the published service/property map.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Configuration`] if the property table is
    /// invalid (should not happen with the fixed declarations here).
    pub fn new(device_id: impl Into<String>, transport: Arc<T>) -> Result<Self, DriverError> {
        let did = device_id.into();
        let device = Device::builder(did.clone(), transport)
            .property(
                Identifier::indexed(did.clone(), SIID_PURIFIER, PIID_POWER),
                properties::POWER,
                PropertyMapper::Bool,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_PURIFIER, PIID_MODE),
                properties::MODE,
                PropertyMapper::Enum(MODE_TABLE),
            )
            .property(
                Identifier::indexed(did.clone(), SIID_PURIFIER, PIID_FAN_LEVEL),
                properties::FAN_LEVEL,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_ENVIRONMENT, PIID_TEMPERATURE),
                properties::TEMPERATURE,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_ENVIRONMENT, PIID_HUMIDITY),
                properties::HUMIDITY,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_ENVIRONMENT, PIID_AQI),
                properties::AQI,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_FILTER, PIID_FILTER_LIFE),
                properties::FILTER_LIFE_REMAINING,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_FILTER, PIID_FILTER_HOURS),
                properties::FILTER_HOURS_USED,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_LED, PIID_LED_BRIGHTNESS),
                properties::LED_BRIGHTNESS,
                PropertyMapper::Enum(LED_BRIGHTNESS_TABLE),
            )
            .property(
                Identifier::indexed(did.clone(), SIID_LED, PIID_LED),
                properties::LED,
                PropertyMapper::Bool,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_PHYSICAL_CONTROLS, PIID_CHILD_LOCK),
                properties::CHILD_LOCK,
                PropertyMapper::Bool,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_ALARM, PIID_BUZZER),
                properties::BUZZER,
                PropertyMapper::Bool,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_MOTOR, PIID_FAVORITE_LEVEL),
                properties::FAVORITE_LEVEL,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_MOTOR, PIID_FAVORITE_SPEED),
                properties::FAVORITE_SPEED,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_MOTOR, PIID_MOTOR_SPEED),
                properties::FAN_SPEED_1,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_MOTOR, PIID_MOTOR_SPEED_SET),
                properties::FAN_SPEED_SET,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_MOTOR, PIID_SPEED_SILENT),
                properties::FAN_SPEED_SILENT,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_MOTOR, PIID_SPEED_LOW),
                properties::FAN_SPEED_LOW,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_MOTOR, PIID_SPEED_MEDIUM_LOW),
                properties::FAN_SPEED_MEDIUM_LOW,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_MOTOR, PIID_SPEED_MEDIUM),
                properties::FAN_SPEED_MEDIUM,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did.clone(), SIID_MOTOR, PIID_SPEED_HIGH),
                properties::FAN_SPEED_HIGH,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::indexed(did, SIID_MOTOR, PIID_SPEED_STRONG),
                properties::FAN_SPEED_STRONG,
                PropertyMapper::Identity,
            )
            .build()?;
        Ok(Self { device })
    }

    fn write(&self, siid: u32, piid: u32, value: impl Into<serde_json::Value>) -> RawCommand {
        RawCommand::indexed(self.device.device_id(), siid, piid, value)
    }

    /// Feed one raw transport delivery through the registry.
    pub fn handle_update(&mut self, updates: &[RawUpdate]) -> Vec<PropertyUpdate> {
        self.device.handle_update(updates)
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.device.property(name)
    }

    /// Switch the unit on or off.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    #[tracing::instrument(skip(self))]
    pub async fn change_power(&self, on: bool) -> Result<(), DriverError> {
        self.device
            .call(
                "set_properties",
                vec![self.write(SIID_PURIFIER, PIID_POWER, on)],
                CallOptions::none(),
            )
            .await?;
        Ok(())
    }

    /// Change the operating mode through the closed table.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InvalidArgument`] for modes outside this
    /// generation's table, before any transport call.
    #[tracing::instrument(skip(self))]
    pub async fn change_mode(&self, mode: Mode) -> Result<(), DriverError> {
        let value = raw_mode(mode)?;
        self.device
            .call(
                "set_properties",
                vec![self.write(SIID_PURIFIER, PIID_MODE, value)],
                CallOptions::none(),
            )
            .await?;
        Ok(())
    }

    /// Set the fan level. Clamped to 1–3.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn change_fan_level(&self, level: i64) -> Result<(), DriverError> {
        let value = clamp_to(&FAN_LEVEL_RANGE, level);
        self.device
            .call(
                "set_properties",
                vec![self.write(SIID_PURIFIER, PIID_FAN_LEVEL, value)],
                CallOptions::none(),
            )
            .await?;
        Ok(())
    }

    /// Set the level used in `favorite` mode. Clamped to 0–14.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn change_favorite_level(&self, level: i64) -> Result<(), DriverError> {
        let value = clamp_to(&FAVORITE_LEVEL_RANGE, level);
        self.device
            .call(
                "set_properties",
                vec![self.write(SIID_MOTOR, PIID_FAVORITE_LEVEL, value)],
                CallOptions::none(),
            )
            .await?;
        Ok(())
    }

    /// Set the motor speed used in `favorite` mode. Clamped to 300–2300 rpm.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn change_favorite_speed(&self, speed: i64) -> Result<(), DriverError> {
        let value = clamp_to(&FAVORITE_SPEED_RANGE, speed);
        self.device
            .call(
                "set_properties",
                vec![self.write(SIID_MOTOR, PIID_FAVORITE_SPEED, value)],
                CallOptions::none(),
            )
            .await?;
        Ok(())
    }

    /// Set the status LED brightness.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn change_led_brightness(&self, level: LedBrightness) -> Result<(), DriverError> {
        self.device
            .call(
                "set_properties",
                vec![self.write(SIID_LED, PIID_LED_BRIGHTNESS, level.raw_value())],
                CallOptions::none(),
            )
            .await?;
        Ok(())
    }

    /// Switch the status LED on or off.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn change_led(&self, on: bool) -> Result<(), DriverError> {
        self.device
            .call(
                "set_properties",
                vec![self.write(SIID_LED, PIID_LED, on)],
                CallOptions::none(),
            )
            .await?;
        Ok(())
    }

    /// Engage or release the physical-controls lock.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn change_child_lock(&self, lock: bool) -> Result<(), DriverError> {
        self.device
            .call(
                "set_properties",
                vec![self.write(SIID_PHYSICAL_CONTROLS, PIID_CHILD_LOCK, lock)],
                CallOptions::none(),
            )
            .await?;
        Ok(())
    }

    /// Switch the beeper on or off.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn change_buzzer(&self, on: bool) -> Result<(), DriverError> {
        self.device
            .call(
                "set_properties",
                vec![self.write(SIID_ALARM, PIID_BUZZER, on)],
                CallOptions::none(),
            )
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn power(&self) -> Option<bool> {
        self.device.property(properties::POWER)?.as_bool()
    }

    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.device.property(properties::MODE)?.as_str()?.parse().ok()
    }

    #[must_use]
    pub fn fan_level(&self) -> Option<i64> {
        self.device.property(properties::FAN_LEVEL)?.as_int()
    }

    #[must_use]
    pub fn temperature(&self) -> Option<f64> {
        self.device.property(properties::TEMPERATURE)?.as_f64()
    }

    #[must_use]
    pub fn humidity(&self) -> Option<i64> {
        self.device.property(properties::HUMIDITY)?.as_int()
    }

    #[must_use]
    pub fn aqi(&self) -> Option<i64> {
        self.device.property(properties::AQI)?.as_int()
    }

    #[must_use]
    pub fn favorite_level(&self) -> Option<i64> {
        self.device.property(properties::FAVORITE_LEVEL)?.as_int()
    }

    #[must_use]
    pub fn favorite_speed(&self) -> Option<i64> {
        self.device.property(properties::FAVORITE_SPEED)?.as_int()
    }

    #[must_use]
    pub fn motor_speed(&self) -> Option<i64> {
        self.device.property(properties::FAN_SPEED_1)?.as_int()
    }

    /// Currently requested motor speed set point, in rpm.
    #[must_use]
    pub fn motor_speed_set(&self) -> Option<i64> {
        self.device.property(properties::FAN_SPEED_SET)?.as_int()
    }

    #[must_use]
    pub fn fan_speed_silent(&self) -> Option<i64> {
        self.device.property(properties::FAN_SPEED_SILENT)?.as_int()
    }

    #[must_use]
    pub fn fan_speed_low(&self) -> Option<i64> {
        self.device.property(properties::FAN_SPEED_LOW)?.as_int()
    }

    #[must_use]
    pub fn fan_speed_medium_low(&self) -> Option<i64> {
        self.device
            .property(properties::FAN_SPEED_MEDIUM_LOW)?
            .as_int()
    }

    #[must_use]
    pub fn fan_speed_medium(&self) -> Option<i64> {
        self.device.property(properties::FAN_SPEED_MEDIUM)?.as_int()
    }

    #[must_use]
    pub fn fan_speed_high(&self) -> Option<i64> {
        self.device.property(properties::FAN_SPEED_HIGH)?.as_int()
    }

    #[must_use]
    pub fn fan_speed_strong(&self) -> Option<i64> {
        self.device.property(properties::FAN_SPEED_STRONG)?.as_int()
    }

    /// Filter life remaining, in percent.
    #[must_use]
    pub fn filter_life_remaining(&self) -> Option<i64> {
        self.device
            .property(properties::FILTER_LIFE_REMAINING)?
            .as_int()
    }

    #[must_use]
    pub fn filter_hours_used(&self) -> Option<i64> {
        self.device
            .property(properties::FILTER_HOURS_USED)?
            .as_int()
    }

    #[must_use]
    pub fn led_brightness(&self) -> Option<LedBrightness> {
        self.device
            .property(properties::LED_BRIGHTNESS)?
            .as_str()?
            .parse()
            .ok()
    }

    #[must_use]
    pub fn child_lock(&self) -> Option<bool> {
        self.device.property(properties::CHILD_LOCK)?.as_bool()
    }

    #[must_use]
    pub fn buzzer(&self) -> Option<bool> {
        self.device.property(properties::BUZZER)?.as_bool()
    }
}
