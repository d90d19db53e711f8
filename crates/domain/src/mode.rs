//! Operating modes across device generations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidArgumentError;

/// Operating mode of a device.
///
/// The union of modes across driver generations; each driver translates the
/// subset it supports through its own closed table and rejects the rest
/// before touching the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Standby; powers the unit off on generations without a power field.
    Idle,
    Auto,
    Silent,
    Sleep,
    Favorite,
    None,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Auto => "auto",
            Self::Silent => "silent",
            Self::Sleep => "sleep",
            Self::Favorite => "favorite",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "auto" => Ok(Self::Auto),
            "silent" => Ok(Self::Silent),
            "sleep" => Ok(Self::Sleep),
            "favorite" => Ok(Self::Favorite),
            "none" => Ok(Self::None),
            other => Err(InvalidArgumentError::UnknownMode {
                value: other.to_string(),
            }),
        }
    }
}
