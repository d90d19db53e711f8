//! Shared helpers for the `change_*` command pattern.
//!
//! Every mutating driver operation follows the same contract: translate the
//! domain argument to a raw value (clamping numbers, rejecting unknown
//! enums), issue one transport call, and translate the reserved
//! "unsupported" device code into a domain error.

use std::ops::RangeInclusive;

use lumio_domain::error::{DriverError, TransportError, UnsupportedOperationError};
use lumio_domain::wire::RawResponse;

/// Application error code devices answer for operations their current state
/// does not support.
pub const CODE_UNSUPPORTED: i64 = -5001;

/// Saturate `value` into the documented closed range.
///
/// Out-of-range set-point arguments are corrected silently; the nearer bound
/// is sent instead of an error. This is contract, not an omission.
#[must_use]
pub fn clamp_to(range: &RangeInclusive<i64>, value: i64) -> i64 {
    value.clamp(*range.start(), *range.end())
}

/// Check the legacy `["ok"]` acknowledgement convention.
///
/// # Errors
///
/// Returns [`TransportError::UnexpectedResponse`] when the device answered
/// anything else.
pub fn ensure_ok(response: &RawResponse) -> Result<(), TransportError> {
    let acknowledged = response
        .as_array()
        .and_then(|items| items.first())
        .and_then(serde_json::Value::as_str)
        == Some("ok")
        || response.as_str() == Some("ok");
    if acknowledged {
        Ok(())
    } else {
        Err(TransportError::UnexpectedResponse(response.to_string()))
    }
}

/// Translate the reserved "unsupported" device code into a domain error
/// carrying the offending argument; every other failure passes through.
#[must_use]
pub fn translate_unsupported(
    err: TransportError,
    operation: &'static str,
    argument: impl ToString,
) -> DriverError {
    match err {
        TransportError::Device { code, .. } if code == CODE_UNSUPPORTED => {
            UnsupportedOperationError {
                operation,
                argument: argument.to_string(),
                code,
            }
            .into()
        }
        other => other.into(),
    }
}
