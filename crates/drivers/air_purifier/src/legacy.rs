//! Legacy keyed-protocol air purifier driver.
//!
//! Properties travel as flat string keys; every setting has its own command
//! method taking positional arguments. The unit signals standby through the
//! `idle` mode, so a derived `running` flag is republished from `mode`, and
//! the effective fan speed is derived from the two motor readings.
//!
//! Capability chain order (contract for this device type): fan speed, then
//! power-from-mode.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use lumio_core::capabilities::{FanSpeed, PowerFromMode, fan_speed, power};
use lumio_core::command::{clamp_to, ensure_ok, translate_unsupported};
use lumio_core::device::{Device, PropertyUpdate};
use lumio_core::ports::{CallOptions, Transport};
use lumio_core::registry::PropertyMapper;
use lumio_domain::error::DriverError;
use lumio_domain::identifier::Identifier;
use lumio_domain::led::LedBrightness;
use lumio_domain::mode::Mode;
use lumio_domain::value::PropertyValue;
use lumio_domain::wire::{RawCommand, RawUpdate};

use crate::properties;

const FAVORITE_LEVEL_RANGE: RangeInclusive<i64> = 0..=14;
const REFRESH_DELAY: Duration = Duration::from_millis(200);

const LED_BRIGHTNESS_TABLE: &[(i64, &str)] = &[(0, "bright"), (1, "dim"), (2, "off")];

/// Abstraction over a legacy-generation air purifier.
pub struct AirPurifier<T> {
    device: Device<T>,
}

impl<T: Transport> AirPurifier<T> {
    /// Compose the device: property table plus capability chain.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Configuration`] if the property table is
    /// invalid (should not happen with the fixed declarations here).
    pub fn new(device_id: impl Into<String>, transport: Arc<T>) -> Result<Self, DriverError> {
        let device = Device::builder(device_id, transport)
            .property(Identifier::keyed("power"), properties::POWER, PropertyMapper::OnOff)
            .property(Identifier::keyed("mode"), properties::MODE, PropertyMapper::Identity)
            .property(
                Identifier::keyed("temp_dec"),
                properties::TEMPERATURE,
                PropertyMapper::Scaled(10.0),
            )
            .property(
                Identifier::keyed("humidity"),
                properties::HUMIDITY,
                PropertyMapper::Identity,
            )
            .property(Identifier::keyed("aqi"), properties::AQI, PropertyMapper::Identity)
            .property(
                Identifier::keyed("average_aqi"),
                properties::AVERAGE_AQI,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::keyed("favorite_level"),
                properties::FAVORITE_LEVEL,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::keyed("filter1_life"),
                properties::FILTER_LIFE_REMAINING,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::keyed("f1_hour_used"),
                properties::FILTER_HOURS_USED,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::keyed("use_time"),
                properties::USE_TIME,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::keyed("motor1_speed"),
                properties::FAN_SPEED_1,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::keyed("motor2_speed"),
                properties::FAN_SPEED_2,
                PropertyMapper::Identity,
            )
            .property(
                Identifier::keyed("bright"),
                properties::ILLUMINANCE,
                PropertyMapper::Scaled(2.0),
            )
            .property(Identifier::keyed("led"), properties::LED, PropertyMapper::OnOff)
            .property(
                Identifier::keyed("led_b"),
                properties::LED_BRIGHTNESS,
                PropertyMapper::Enum(LED_BRIGHTNESS_TABLE),
            )
            .property(
                Identifier::keyed("child_lock"),
                properties::CHILD_LOCK,
                PropertyMapper::OnOff,
            )
            .property(
                Identifier::keyed("buzzer"),
                properties::BUZZER,
                PropertyMapper::OnOff,
            )
            .capability(FanSpeed::new(properties::FAN_SPEED_1, properties::FAN_SPEED_2))
            .capability(PowerFromMode::new(properties::MODE))
            .build()?;
        Ok(Self { device })
    }

    /// Feed one raw transport delivery through the registry and the chain.
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
        let argument = if on { "on" } else { "off" };
        let options = CallOptions::refresh([properties::POWER, properties::MODE])
            .with_delay(REFRESH_DELAY);
        self.device
            .call("set_power", vec![RawCommand::positional(argument)], options)
            .await?;
        Ok(())
    }

    /// Change the operating mode.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Unsupported`] when the device rejects the mode
    /// for its current state; other transport failures pass through.
    #[tracing::instrument(skip(self))]
    pub async fn change_mode(&self, mode: Mode) -> Result<(), DriverError> {
        let options = CallOptions::refresh([properties::POWER, properties::MODE])
            .with_delay(REFRESH_DELAY);
        let response = self
            .device
            .call("set_mode", vec![RawCommand::positional(mode.as_str())], options)
            .await
            .map_err(|err| translate_unsupported(err, "change_mode", mode))?;
        ensure_ok(&response)?;
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
                "set_level_favorite",
                vec![RawCommand::positional(value)],
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
                "set_led_b",
                vec![RawCommand::positional(level.raw_value())],
                CallOptions::refresh([properties::LED_BRIGHTNESS]),
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
        let argument = if on { "on" } else { "off" };
        self.device
            .call(
                "set_led",
                vec![RawCommand::positional(argument)],
                CallOptions::refresh([properties::LED]),
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
        let argument = if lock { "on" } else { "off" };
        self.device
            .call(
                "set_child_lock",
                vec![RawCommand::positional(argument)],
                CallOptions::refresh([properties::CHILD_LOCK]),
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
        let argument = if on { "on" } else { "off" };
        self.device
            .call(
                "set_buzzer",
                vec![RawCommand::positional(argument)],
                CallOptions::refresh([properties::BUZZER]),
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

    /// Whether the unit is actively running (derived from `mode`).
    #[must_use]
    pub fn is_running(&self) -> Option<bool> {
        self.device.property(power::RUNNING)?.as_bool()
    }

    /// Effective fan speed (derived from both motor readings).
    #[must_use]
    pub fn fan_speed(&self) -> Option<i64> {
        self.device.property(fan_speed::FAN_SPEED)?.as_int()
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
    pub fn average_aqi(&self) -> Option<i64> {
        self.device.property(properties::AVERAGE_AQI)?.as_int()
    }

    #[must_use]
    pub fn favorite_level(&self) -> Option<i64> {
        self.device.property(properties::FAVORITE_LEVEL)?.as_int()
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
    pub fn filter_days_used(&self) -> Option<i64> {
        Some(self.filter_hours_used()? / 24)
    }

    /// Ambient light level from the built-in sensor (raw reading halved).
    #[must_use]
    pub fn illuminance(&self) -> Option<f64> {
        self.device.property(properties::ILLUMINANCE)?.as_f64()
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
