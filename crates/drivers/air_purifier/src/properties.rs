//! Framework-internal property names shared by both driver generations.
//!
//! Raw wire keys keep their protocol spelling inside each driver; these are
//! the names the registry and capability chain speak.

pub const POWER: &str = "power";
pub const MODE: &str = "mode";
pub const FAN_LEVEL: &str = "fan_level";
pub const TEMPERATURE: &str = "temperature";
pub const HUMIDITY: &str = "humidity";
pub const AQI: &str = "aqi";
pub const AVERAGE_AQI: &str = "average_aqi";
pub const FAVORITE_LEVEL: &str = "favorite_level";
pub const FAVORITE_SPEED: &str = "favorite_speed";
pub const FILTER_LIFE_REMAINING: &str = "filter_life_remaining";
pub const FILTER_HOURS_USED: &str = "filter_hours_used";
pub const USE_TIME: &str = "use_time";
pub const FAN_SPEED_1: &str = "fan_speed_1";
pub const FAN_SPEED_2: &str = "fan_speed_2";
pub const FAN_SPEED_SET: &str = "fan_speed_set";
pub const FAN_SPEED_SILENT: &str = "fan_speed_silent";
pub const FAN_SPEED_LOW: &str = "fan_speed_low";
pub const FAN_SPEED_MEDIUM_LOW: &str = "fan_speed_medium_low";
pub const FAN_SPEED_MEDIUM: &str = "fan_speed_medium";
pub const FAN_SPEED_HIGH: &str = "fan_speed_high";
pub const FAN_SPEED_STRONG: &str = "fan_speed_strong";
pub const ILLUMINANCE: &str = "illuminance";
pub const LED: &str = "led";
pub const LED_BRIGHTNESS: &str = "led_brightness";
pub const CHILD_LOCK: &str = "child_lock";
pub const BUZZER: &str = "buzzer";
