//! Shared fakes: a scripted transport and a recording chart backend.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use mp_client::{ChartBackend, LayoutPatch, RawResponse, Transport, TransportError};
use mp_protocol::{RestylePatch, TraceData};

/// What the controller sent over the wire.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub endpoint: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Default)]
struct Inner {
    requests: Vec<RecordedRequest>,
    responses: VecDeque<Result<RawResponse, TransportError>>,
}

/// Scripted transport: responses are queued ahead of time and handed out
/// in order; every request is recorded. Clones share the same script so a
/// test can keep a handle after moving one into the controller.
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Rc<RefCell<Inner>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_ok(&self, body: serde_json::Value) {
        self.inner
            .borrow_mut()
            .responses
            .push_back(Ok(RawResponse::success(body.to_string().into_bytes())));
    }

    pub fn queue_rejection(&self, message: &str) {
        let body = serde_json::json!({ "message": message });
        self.inner
            .borrow_mut()
            .responses
            .push_back(Ok(RawResponse::failure(body.to_string().into_bytes())));
    }

    pub fn queue_transport_failure(&self, message: &str) {
        self.inner
            .borrow_mut()
            .responses
            .push_back(Err(TransportError(message.to_string())));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.borrow().requests.len()
    }

    fn record(
        &self,
        method: &'static str,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<RawResponse, TransportError> {
        let mut inner = self.inner.borrow_mut();
        inner.requests.push(RecordedRequest {
            method,
            endpoint: endpoint.to_string(),
            body,
        });
        inner
            .responses
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted request: {method} {endpoint}"))
    }
}

impl Transport for FakeTransport {
    fn get(&self, endpoint: &str) -> Result<RawResponse, TransportError> {
        self.record("GET", endpoint, None)
    }

    fn post_json(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<RawResponse, TransportError> {
        self.record("POST", endpoint, Some(body.clone()))
    }

    fn delete(&self, endpoint: &str) -> Result<RawResponse, TransportError> {
        self.record("DELETE", endpoint, None)
    }
}

/// Chart backend that keeps the rendered state and a log of every layout
/// and style operation.
#[derive(Default)]
pub struct RecordingChart {
    pub traces: Vec<TraceData>,
    pub relayouts: Vec<LayoutPatch>,
    pub restyles: Vec<(usize, RestylePatch)>,
}

impl ChartBackend for RecordingChart {
    fn add_traces(&mut self, mut traces: Vec<TraceData>) {
        self.traces.append(&mut traces);
    }

    fn delete_traces(&mut self, indices: &[usize]) {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for index in sorted.into_iter().rev() {
            if index < self.traces.len() {
                self.traces.remove(index);
            }
        }
    }

    fn restyle(&mut self, index: usize, patch: &RestylePatch) {
        self.restyles.push((index, patch.clone()));
    }

    fn relayout(&mut self, patch: LayoutPatch) {
        self.relayouts.push(patch);
    }

    fn trace_count(&self) -> usize {
        self.traces.len()
    }
}

/// A canned `/initplot` body with two plot controls and two options per
/// axis.
pub fn init_body(files: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "controls": {
            "a": ["1", "3"],
            "b": ["2", "4"],
        },
        "xaxis": { "opts": ["x1", "x2"], "def": "x1" },
        "yaxis": { "opts": ["y1", "y2"], "def": "y1" },
        "files": files,
    })
}

/// A canned `/plot` response with a single named trace.
pub fn plot_body(name: &str) -> serde_json::Value {
    serde_json::json!({ "trace": trace_body(name) })
}

pub fn trace_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "x": [1.0, 2.0, 3.0],
        "y": [10.0, 20.0, 30.0],
        "mode": "lines+markers",
        "name": name,
        "hovertext": ["32K", "64K", "128K"],
        "type": "scattergl",
        "showlegend": true,
    })
}
