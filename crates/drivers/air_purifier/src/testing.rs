//! Test transport shared by the driver test modules.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use lumio_core::ports::{CallOptions, Transport};
use lumio_domain::error::TransportError;
use lumio_domain::wire::{RawCommand, RawResponse};

/// Records every call and answers from a queue, defaulting to `["ok"]`.
#[derive(Default)]
pub struct FakeTransport {
    pub calls: Mutex<Vec<(String, Vec<RawCommand>, CallOptions)>>,
    pub responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
}

impl FakeTransport {
    pub fn enqueue(&self, response: Result<RawResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Transport for FakeTransport {
    fn call(
        &self,
        method: &str,
        params: Vec<RawCommand>,
        options: CallOptions,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params, options));
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(serde_json::json!(["ok"])));
        async move { response }
    }
}
