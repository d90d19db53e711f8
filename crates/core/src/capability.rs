//! Capability composition — the ordered change-propagation chain.
//!
//! Capabilities are attached to a device in a fixed, explicit order at
//! construction time; that order is part of each device type's contract. The
//! device drives every capability for every published value, so delivery is
//! always complete — there is no forwarding step a capability could forget.

use lumio_domain::value::PropertyValue;

/// Collects derived values a capability republishes during one notification.
///
/// Everything published here is appended to the current dispatch pass and
/// delivered to the whole chain, so capabilities later in the chain observe
/// derived values the same way they observe raw ones. Values equal to the
/// device's cached value are absorbed, which keeps accidental derive cycles
/// from spinning.
#[derive(Debug, Default)]
pub struct Publisher {
    pending: Vec<(String, PropertyValue)>,
}

impl Publisher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue `name` for delivery to the whole chain after the current
    /// notification finishes its pass.
    pub fn publish(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.pending.push((name.into(), value.into()));
    }

    pub(crate) fn into_pending(self) -> Vec<(String, PropertyValue)> {
        self.pending
    }
}

/// A unit of device behavior participating in change propagation.
///
/// A capability that does not care about a name simply returns; the device
/// keeps driving the rest of the chain. Derived state must not form a cycle:
/// a capability must not publish a name it also observes as input.
pub trait Capability: Send {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Observe one published property value.
    fn property_updated(
        &mut self,
        name: &str,
        value: &PropertyValue,
        publisher: &mut Publisher,
    );
}
