//! # lumio-domain
//!
//! Pure domain model for the lumio device-driver framework.
//!
//! ## Responsibilities
//! - Foundational types: raw-property identifiers, typed property values,
//!   timestamps, error conventions
//! - Define the two wire addressing schemes (**Keyed** and **Indexed**) as
//!   data, without trying to reconcile them
//! - Define driver-facing settings (**Mode**, **LedBrightness**) with their
//!   closed raw translation tables
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `core`, drivers, or external IO crates.
//! All IO boundaries are expressed as traits in the `core` crate (ports).

pub mod error;
pub mod identifier;
pub mod led;
pub mod mode;
pub mod time;
pub mod value;
pub mod wire;
