//! Production transport over HTTP.

use std::io::Read;

use crate::transport::{RawResponse, Transport, TransportError};

/// Blocking HTTP transport against the plotting server's base URL.
pub struct UreqTransport {
    agent: ureq::Agent,
    base: String,
}

impl UreqTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            agent: ureq::Agent::new(),
            base,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base, endpoint)
    }

    fn run(
        &self,
        request: ureq::Request,
        body: Option<String>,
    ) -> Result<RawResponse, TransportError> {
        let outcome = match body {
            Some(json) => request
                .set("Content-Type", "application/json")
                .send_string(&json),
            None => request.call(),
        };
        match outcome {
            Ok(response) => read_body(response, true),
            // Non-2xx still carries a body (the server's message field)
            Err(ureq::Error::Status(_, response)) => read_body(response, false),
            Err(err) => Err(TransportError(err.to_string())),
        }
    }
}

fn read_body(response: ureq::Response, ok: bool) -> Result<RawResponse, TransportError> {
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|e| TransportError(e.to_string()))?;
    Ok(RawResponse { ok, body })
}

impl Transport for UreqTransport {
    fn get(&self, endpoint: &str) -> Result<RawResponse, TransportError> {
        self.run(self.agent.get(&self.url(endpoint)), None)
    }

    fn post_json(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<RawResponse, TransportError> {
        self.run(self.agent.post(&self.url(endpoint)), Some(body.to_string()))
    }

    fn delete(&self, endpoint: &str) -> Result<RawResponse, TransportError> {
        self.run(self.agent.delete(&self.url(endpoint)), None)
    }
}
