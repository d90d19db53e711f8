//! Stock capabilities shared by the concrete drivers.

pub mod fan_speed;
pub mod power;

pub use fan_speed::FanSpeed;
pub use power::PowerFromMode;
