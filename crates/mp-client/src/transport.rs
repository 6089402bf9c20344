//! Transport seam.
//!
//! The service layer never talks HTTP directly; it goes through this trait
//! so every workflow is testable against an in-memory fake. The production
//! implementation is [`crate::http::UreqTransport`].

/// A response that made it back from the server, success or not.
///
/// `ok` mirrors the HTTP success range; the body is raw bytes because the
/// dispatch layer decides how to decode it (payload on success, an error
/// message otherwise).
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub ok: bool,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn success(body: Vec<u8>) -> Self {
        Self { ok: true, body }
    }

    pub fn failure(body: Vec<u8>) -> Self {
        Self { ok: false, body }
    }
}

/// Failure below the HTTP status level: connection refused, timeout,
/// interrupted body read.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Blocking request issuer. One call maps to one request; the caller owns
/// all sequencing (the control gate guarantees no workflow re-entry while
/// its request is outstanding).
pub trait Transport {
    fn get(&self, endpoint: &str) -> Result<RawResponse, TransportError>;
    fn post_json(&self, endpoint: &str, body: &serde_json::Value)
    -> Result<RawResponse, TransportError>;
    fn delete(&self, endpoint: &str) -> Result<RawResponse, TransportError>;
}
