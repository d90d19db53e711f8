//! Running flag derived from the operating mode.

use lumio_domain::value::PropertyValue;

use crate::capability::{Capability, Publisher};

/// Name the derived flag is published under.
pub const RUNNING: &str = "running";

/// Derives a boolean running flag from the `mode` property.
///
/// Air purifiers signal standby through the `idle` mode; every other mode
/// means the unit is actively running, independent of the power switch.
#[derive(Debug)]
pub struct PowerFromMode {
    source: &'static str,
}

impl PowerFromMode {
    #[must_use]
    pub fn new(source: &'static str) -> Self {
        Self { source }
    }
}

impl Capability for PowerFromMode {
    fn name(&self) -> &'static str {
        "power-from-mode"
    }

    fn property_updated(
        &mut self,
        name: &str,
        value: &PropertyValue,
        publisher: &mut Publisher,
    ) {
        if name != self.source {
            return;
        }
        let Some(mode) = value.as_str() else {
            return;
        };
        publisher.publish(RUNNING, mode != "idle");
    }
}
