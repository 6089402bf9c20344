//! mp-protocol: wire schema for the plotting server.
//!
//! Request and response bodies for every endpoint the client talks to, plus
//! the endpoint paths themselves. Pure data; transport lives in mp-client.

pub mod endpoints;
pub mod wire;

pub use wire::*;
