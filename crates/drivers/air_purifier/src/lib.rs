//! # lumio-driver-air-purifier
//!
//! Air purifier drivers for both protocol generations:
//!
//! - [`legacy`] — the keyed wire: flat string property keys, per-setting
//!   command methods with positional arguments
//! - [`miot`] — the structured wire: `(device, service, property)` triples
//!   and a single `set_properties` method
//!
//! Each driver is a declarative list of identifier → name → mapper entries
//! plus clamped, table-translated `change_*` operations; all shared
//! mechanics live in `lumio-core`.

pub mod legacy;
pub mod miot;
pub mod properties;

#[cfg(test)]
pub(crate) mod testing;
