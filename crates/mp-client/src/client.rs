//! Typed server access with a single dispatch path.
//!
//! Every endpoint call funnels through the same success/failure routing:
//! a non-success status has its body's `message` field promoted to a
//! [`ClientError::Server`], transport and decode problems get their own
//! variants, and every failure is logged with its endpoint before it is
//! returned. Exactly one of the Ok/Err branches happens per call.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;

use mp_protocol::{
    ChangeAxesRequest, ErrorBody, InitResponse, LoadResponse, PlotRequest, PlotResponse,
    RestylePatch, SaveRequest, endpoints,
};

use crate::error::{ClientError, ClientResult};
use crate::transport::{RawResponse, Transport, TransportError};

pub struct ServerClient<T> {
    transport: T,
}

impl<T: Transport> ServerClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn init(&self) -> ClientResult<InitResponse> {
        self.finish(endpoints::INIT, self.transport.get(endpoints::INIT))
    }

    pub fn plot(&self, request: &PlotRequest) -> ClientResult<PlotResponse> {
        self.post(endpoints::PLOT, request)
    }

    pub fn change_axes(&self, request: &ChangeAxesRequest) -> ClientResult<Vec<RestylePatch>> {
        self.post(endpoints::CHANGE_AXES, request)
    }

    pub fn load(&self, name: &str) -> ClientResult<LoadResponse> {
        let endpoint = endpoints::load(name);
        self.finish(&endpoint, self.transport.get(&endpoint))
    }

    pub fn save(&self, name: &str, request: &SaveRequest) -> ClientResult<()> {
        let endpoint = endpoints::save(name);
        let body = encode(&endpoint, request)?;
        self.ack(&endpoint, self.transport.post_json(&endpoint, &body))
    }

    pub fn delete(&self, name: &str) -> ClientResult<()> {
        let endpoint = endpoints::delete(name);
        self.ack(&endpoint, self.transport.delete(&endpoint))
    }

    fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: &B,
    ) -> ClientResult<R> {
        let body = encode(endpoint, request)?;
        self.finish(endpoint, self.transport.post_json(endpoint, &body))
    }

    /// Route a raw outcome: decode the payload on success, surface the
    /// server's message on rejection.
    fn finish<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        outcome: Result<RawResponse, TransportError>,
    ) -> ClientResult<R> {
        let response = self.accept(endpoint, outcome)?;
        serde_json::from_slice(&response.body).map_err(|e| {
            fail(ClientError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })
        })
    }

    /// Like `finish` but for endpoints whose success body is an
    /// acknowledgement the client does not inspect.
    fn ack(
        &self,
        endpoint: &str,
        outcome: Result<RawResponse, TransportError>,
    ) -> ClientResult<()> {
        self.accept(endpoint, outcome).map(|_| ())
    }

    fn accept(
        &self,
        endpoint: &str,
        outcome: Result<RawResponse, TransportError>,
    ) -> ClientResult<RawResponse> {
        let response = outcome.map_err(|e| {
            fail(ClientError::Transport {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })
        })?;

        if response.ok {
            return Ok(response);
        }

        // Every non-success body must carry a human-readable message; a
        // body without one is a protocol violation reported as a decode
        // failure.
        match serde_json::from_slice::<ErrorBody>(&response.body) {
            Ok(body) => Err(fail(ClientError::Server {
                endpoint: endpoint.to_string(),
                message: body.message,
            })),
            Err(e) => Err(fail(ClientError::Decode {
                endpoint: endpoint.to_string(),
                message: format!("non-success response without a message field: {e}"),
            })),
        }
    }
}

fn encode<B: Serialize>(endpoint: &str, request: &B) -> ClientResult<serde_json::Value> {
    serde_json::to_value(request).map_err(|e| {
        fail(ClientError::Decode {
            endpoint: endpoint.to_string(),
            message: format!("failed to encode request: {e}"),
        })
    })
}

fn fail(err: ClientError) -> ClientError {
    error!(error = %err, "request failed");
    err
}
