//! Common error types used across the workspace.
//!
//! Each failure class gets its own typed error; the umbrella [`DriverError`]
//! converts from all of them via `#[from]`. Transport failures other than the
//! reserved "unsupported" application code pass through unmodified.

use thiserror::Error;

/// A driver declared an invalid property table.
///
/// Raised at device construction, before any property traffic is processed.
/// Not recoverable at runtime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// One property name has exactly one active definition per device.
    #[error("property `{name}` is already defined")]
    DuplicateProperty { name: String },
}

/// A caller passed a domain argument a change operation cannot translate.
///
/// The operation is rejected before any transport call; device state is
/// unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidArgumentError {
    #[error("unknown mode `{value}`")]
    UnknownMode { value: String },
    #[error("unknown LED brightness `{value}`")]
    UnknownLedBrightness { value: String },
    /// The mode exists but is outside this driver generation's table.
    #[error("mode `{mode}` is not supported by this driver")]
    UnsupportedMode { mode: String },
}

/// The device reported that the requested state is not supported right now.
///
/// Carries the offending argument so callers can surface it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("device rejected {operation}({argument}) with code {code}")]
pub struct UnsupportedOperationError {
    pub operation: &'static str,
    pub argument: String,
    pub code: i64,
}

/// Failure surfaced by the transport collaborator.
///
/// `Device` carries the numeric application error code devices answer with;
/// everything else is opaque to this core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("device error {code}: {message}")]
    Device { code: i64, message: String },
    #[error("transport failure: {0}")]
    Connection(String),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Umbrella error for every driver-facing operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgumentError),
    #[error("unsupported operation: {0}")]
    Unsupported(#[from] UnsupportedOperationError),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_duplicate_property_with_name() {
        let err = ConfigurationError::DuplicateProperty {
            name: "power".to_string(),
        };
        assert_eq!(err.to_string(), "property `power` is already defined");
    }

    #[test]
    fn should_display_unsupported_operation_with_argument_and_code() {
        let err = UnsupportedOperationError {
            operation: "change_mode",
            argument: "favorite".to_string(),
            code: -5001,
        };
        assert_eq!(
            err.to_string(),
            "device rejected change_mode(favorite) with code -5001"
        );
    }

    #[test]
    fn should_convert_configuration_error_into_driver_error() {
        let err: DriverError = ConfigurationError::DuplicateProperty {
            name: "mode".to_string(),
        }
        .into();
        assert!(matches!(err, DriverError::Configuration(_)));
    }

    #[test]
    fn should_convert_transport_error_into_driver_error() {
        let err: DriverError = TransportError::Connection("timed out".to_string()).into();
        assert!(matches!(err, DriverError::Transport(_)));
    }

    #[test]
    fn should_preserve_device_code_through_conversion() {
        let err: DriverError = TransportError::Device {
            code: -5001,
            message: "unsupported".to_string(),
        }
        .into();
        match err {
            DriverError::Transport(TransportError::Device { code, .. }) => {
                assert_eq!(code, -5001);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
