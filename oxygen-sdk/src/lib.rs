//! An unofficial async client for the OxygenAI inference API.
//!
//! The entry point is [`OxygenClient`], configured through
//! [`OxygenClient::builder`] or created directly with [`OxygenClient::new`].
//! Requests go out through a pluggable [`Transport`](transport::Transport);
//! the default one is backed by `reqwest`.

use std::sync::Arc;

use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use self::transport::Transport;

pub mod builder;
pub mod client;
pub mod transport;
pub mod types;

/// Base URL used when none is configured on the builder.
pub const DEFAULT_BASE_URL: &str = "https://app.oxyapi.uk";

/// Model used by [`OxygenClient::chat_completion`] when the request leaves it empty.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo-1106";

/// Model used by [`OxygenClient::image_generation`] when the request leaves it empty.
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Endpoint path used by [`OxygenClient::chat_completion`].
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
/// Endpoint path used by [`OxygenClient::image_generation`].
pub const IMAGE_GENERATIONS_PATH: &str = "/v1/images/generations";

/// Client for the OxygenAI API.
///
/// Cloning is cheap: clones share the same transport and carry no mutable
/// state, so a single client can serve concurrent callers.
#[derive(Clone)]
pub struct OxygenClient {
    base_url: String,
    authorization: Option<HeaderValue>,
    transport: Arc<dyn Transport + Send + Sync>,
    cancellation_token: Option<CancellationToken>,
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Client error: {0}")]
    Client(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("I/O error while reading response body: {0}")]
    Io(#[source] reqwest::Error),

    #[error("oxygenAI error: {message}")]
    Service { status: StatusCode, message: String },

    #[error("Decoding error: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("Request cancelled")]
    Cancelled,
}

impl Error {
    /// Returns the HTTP status for [`Error::Service`] errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}
