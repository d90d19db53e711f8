//! LED indicator brightness setting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidArgumentError;

/// Brightness of the status LED.
///
/// The raw table is fixed across generations: bright → 0, dim → 1, off → 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedBrightness {
    Bright,
    Dim,
    Off,
}

impl LedBrightness {
    /// Raw wire value for this level.
    #[must_use]
    pub fn raw_value(self) -> i64 {
        match self {
            Self::Bright => 0,
            Self::Dim => 1,
            Self::Off => 2,
        }
    }

    /// Reverse lookup for incoming raw values; unknown values are declined.
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Self::Bright),
            1 => Some(Self::Dim),
            2 => Some(Self::Off),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bright => "bright",
            Self::Dim => "dim",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for LedBrightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedBrightness {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bright" => Ok(Self::Bright),
            "dim" => Ok(Self::Dim),
            "off" => Ok(Self::Off),
            other => Err(InvalidArgumentError::UnknownLedBrightness {
                value: other.to_string(),
            }),
        }
    }
}
