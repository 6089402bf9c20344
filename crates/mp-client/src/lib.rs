//! mp-client: the client-side state synchronization core.
//!
//! This crate centralizes everything between the page's widgets and the
//! plotting server: the control panel model and its per-operation gate, the
//! chart session, typed server access with a single failure path, the chart
//! backend seam, and the user workflows built on all of them. Frontends
//! (the terminal app, a future web shell) stay thin.

pub mod chart;
pub mod client;
pub mod controller;
pub mod controls;
pub mod error;
pub mod http;
pub mod transport;

// Re-export key types for convenience
pub use chart::{AxisLayout, ChartBackend, LayoutPatch, clear_all};
pub use client::ServerClient;
pub use controller::{PlotOutcome, PlotterController, SaveOutcome};
pub use controls::{ActionButton, ControlGate, ControlPanel, ControlRef, SelectControl};
pub use error::{ClientError, ClientResult};
pub use http::UreqTransport;
pub use transport::{RawResponse, Transport, TransportError};
