//! Port definitions — the transport boundary this core drives.
//!
//! The transport collaborator owns discovery, encryption, packet framing,
//! retries and timeouts. The core only issues commands and ingests raw
//! property deliveries, so the boundary is a single trait.

use std::future::Future;
use std::time::Duration;

use lumio_domain::error::TransportError;
use lumio_domain::wire::{RawCommand, RawResponse};

/// Options attached to a transport call.
///
/// The refresh hint asks the transport to re-read the named properties after
/// a short delay so the cache reconciles sooner than the next natural poll.
/// It is advisory; correctness never depends on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOptions {
    pub refresh: Vec<String>,
    pub refresh_delay: Option<Duration>,
}

impl CallOptions {
    /// No refresh hint.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Hint the transport to re-read the named properties afterwards.
    #[must_use]
    pub fn refresh<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            refresh: properties.into_iter().map(Into::into).collect(),
            refresh_delay: None,
        }
    }

    /// Delay before the hinted refresh.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = Some(delay);
        self
    }
}

/// Command dispatch into the physical transport.
///
/// Implementations resolve one command per call and surface device-reported
/// application error codes through [`TransportError::Device`].
pub trait Transport: Send + Sync {
    fn call(
        &self,
        method: &str,
        params: Vec<RawCommand>,
        options: CallOptions,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_empty_options_by_default() {
        let options = CallOptions::none();
        assert!(options.refresh.is_empty());
        assert!(options.refresh_delay.is_none());
    }

    #[test]
    fn should_collect_refresh_properties_in_order() {
        let options = CallOptions::refresh(["power", "mode"]);
        assert_eq!(options.refresh, vec!["power".to_string(), "mode".to_string()]);
    }

    #[test]
    fn should_attach_refresh_delay() {
        let options =
            CallOptions::refresh(["mode"]).with_delay(Duration::from_millis(200));
        assert_eq!(options.refresh_delay, Some(Duration::from_millis(200)));
    }
}
