//! Effective fan speed derived from the two motor speed readings.

use lumio_domain::value::PropertyValue;

use crate::capability::{Capability, Publisher};

/// Name the effective speed is republished under.
pub const FAN_SPEED: &str = "fan_speed";

/// Sentinel for a motor reading that has not been seen yet.
const UNSET: i64 = -1;

/// Tracks both motor speed readings and republishes the effective speed.
///
/// The second motor wins whenever it reports a real (positive) speed;
/// otherwise the first motor's reading is used. Nothing is published until
/// at least one reading has arrived.
#[derive(Debug)]
pub struct FanSpeed {
    source1: &'static str,
    source2: &'static str,
    speed1: i64,
    speed2: i64,
}

impl FanSpeed {
    #[must_use]
    pub fn new(source1: &'static str, source2: &'static str) -> Self {
        Self {
            source1,
            source2,
            speed1: UNSET,
            speed2: UNSET,
        }
    }
}

impl Capability for FanSpeed {
    fn name(&self) -> &'static str {
        "fan-speed"
    }

    fn property_updated(
        &mut self,
        name: &str,
        value: &PropertyValue,
        publisher: &mut Publisher,
    ) {
        let Some(speed) = value.as_int() else {
            return;
        };
        if name == self.source1 {
            self.speed1 = speed;
        } else if name == self.source2 {
            self.speed2 = speed;
        } else {
            return;
        }

        let effective = if self.speed2 > 0 {
            self.speed2
        } else {
            self.speed1
        };
        if effective != UNSET {
            publisher.publish(FAN_SPEED, effective);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deliver(capability: &mut FanSpeed, name: &str, speed: i64) -> Vec<(String, PropertyValue)> {
        let mut publisher = Publisher::new();
        capability.property_updated(name, &PropertyValue::Int(speed), &mut publisher);
        publisher.into_pending()
    }

    #[test]
    fn should_publish_first_motor_reading() {
        let mut capability = FanSpeed::new("fan_speed_1", "fan_speed_2");
        let published = deliver(&mut capability, "fan_speed_1", 5);
        assert_eq!(
            published,
            vec![(FAN_SPEED.to_string(), PropertyValue::Int(5))]
        );
    }

    #[test]
    fn should_keep_first_motor_reading_when_second_is_unset() {
        let mut capability = FanSpeed::new("fan_speed_1", "fan_speed_2");
        deliver(&mut capability, "fan_speed_1", 5);
        let published = deliver(&mut capability, "fan_speed_2", -1);
        assert_eq!(
            published,
            vec![(FAN_SPEED.to_string(), PropertyValue::Int(5))]
        );
    }

    #[test]
    fn should_prefer_second_motor_when_it_reports_a_real_speed() {
        let mut capability = FanSpeed::new("fan_speed_1", "fan_speed_2");
        deliver(&mut capability, "fan_speed_1", 5);
        let published = deliver(&mut capability, "fan_speed_2", 9);
        assert_eq!(
            published,
            vec![(FAN_SPEED.to_string(), PropertyValue::Int(9))]
        );
    }

    #[test]
    fn should_fall_back_to_first_motor_when_second_reads_zero() {
        let mut capability = FanSpeed::new("fan_speed_1", "fan_speed_2");
        deliver(&mut capability, "fan_speed_1", 5);
        let published = deliver(&mut capability, "fan_speed_2", 0);
        assert_eq!(
            published,
            vec![(FAN_SPEED.to_string(), PropertyValue::Int(5))]
        );
    }

    #[test]
    fn should_stay_silent_until_any_reading_arrived() {
        let mut capability = FanSpeed::new("fan_speed_1", "fan_speed_2");
        let published = deliver(&mut capability, "fan_speed_2", -1);
        assert!(published.is_empty());
    }

    #[test]
    fn should_ignore_unrelated_properties() {
        let mut capability = FanSpeed::new("fan_speed_1", "fan_speed_2");
        let published = deliver(&mut capability, "humidity", 40);
        assert!(published.is_empty());
    }

    #[test]
    fn should_publish_exactly_once_per_qualifying_update() {
        let mut capability = FanSpeed::new("fan_speed_1", "fan_speed_2");
        let published = deliver(&mut capability, "fan_speed_1", 5);
        assert_eq!(published.len(), 1);
    }
}
