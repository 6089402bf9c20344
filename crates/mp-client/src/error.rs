//! Error types for the mp-client service layer.

use mp_session::SessionError;

/// Unified error for everything a workflow can fail with.
///
/// `Transport`, `Decode` and `Server` are the two network-failure classes
/// (no/unparsable response vs. well-formed rejection); they are logged with
/// their endpoint at the dispatch layer. The remaining variants are local
/// rejections that never reach the network and are not logged as errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Transport failure for {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("Malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Server rejected {endpoint}: {message}")]
    Server { endpoint: String, message: String },

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("The {0} action is currently disabled")]
    ActionUnavailable(&'static str),

    #[error("No such control: {0}")]
    UnknownControl(String),

    #[error("Not an available option for {control}: {value}")]
    InvalidSelection { control: String, value: String },

    #[error("No saved chart named {0}")]
    UnknownSavedChart(String),
}

/// Result type for mp-client operations.
pub type ClientResult<T> = Result<T, ClientError>;
