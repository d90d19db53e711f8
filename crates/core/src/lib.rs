//! # lumio-core
//!
//! Device-abstraction core shared by every concrete device driver.
//!
//! ## Responsibilities
//! - Define the **transport port** (trait) drivers issue commands through:
//!   discovery, handshake, framing and retries all live behind it
//! - Own the **property registry**: identifier → name → mapper tables and the
//!   per-device value cache, fed by raw transport deliveries
//! - Drive the **capability chain**: an ordered list of capability objects
//!   attached at construction, each observing every published value and
//!   optionally republishing derived values through the same pass
//! - Provide the shared **change-command helpers**: saturating range
//!   clamping, acknowledgement checks, and translation of the reserved
//!   "unsupported" device code into a domain error
//!
//! ## Dependency rule
//! Depends on `lumio-domain` only. Never imports driver crates; drivers
//! depend on *this* crate, not the reverse.

pub mod capabilities;
pub mod capability;
pub mod command;
pub mod device;
pub mod ports;
pub mod registry;
