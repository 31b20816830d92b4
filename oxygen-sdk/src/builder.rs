use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "tracing")]
use tracing::instrument;

use reqwest::header::HeaderValue;
use reqwest::Url;

use crate::transport::{ReqwestTransport, Transport};
use crate::{Error, OxygenClient, Result, DEFAULT_BASE_URL};

/// A builder for constructing an [`OxygenClient`].
///
/// - Uses [`DEFAULT_BASE_URL`] unless [`base_url`](OxygenClientBuilder::base_url) is set.
/// - Sends no `Authorization` header unless a non-empty token is set.
/// - Uses `reqwest`-based transport by default - [`ReqwestTransport`].
#[derive(Default)]
pub struct OxygenClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport + Send + Sync>>,
}

impl OxygenClientBuilder {
    /// Creates a new [`OxygenClientBuilder`]. This method is called by [`OxygenClient::builder`]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL for the OxygenAI API, e.g. `https://app.oxyapi.uk`.
    ///
    /// Endpoint paths are appended after a single `/`, so a trailing slash or a
    /// path prefix (for a proxy) are both fine.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the bearer token sent in the `Authorization` header.
    ///
    /// An empty token is allowed; requests are then sent unauthenticated.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets a deadline for each whole request made by the default transport.
    ///
    /// Ignored when a custom [`transport`](OxygenClientBuilder::transport) is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom transport implementation for the client.
    ///
    /// For testing, you can use [`MockTransport`](crate::transport::MockTransport)
    /// or your own [`Transport`] implementation.
    pub fn transport(mut self, transport: Arc<dyn Transport + Send + Sync>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the [`OxygenClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Client`](variant@Error::Client) if the base URL is
    /// invalid, the token cannot be used as a header value, or the default
    /// [`ReqwestTransport`] fails to initialize.
    #[cfg_attr(feature = "tracing", instrument(skip(self)))]
    pub fn build(self) -> Result<OxygenClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url).map_err(|e| Error::Client(format!("Invalid base URL: {}", e)))?;

        let authorization = match self.token.as_deref() {
            None | Some("") => None,
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| Error::Client(format!("Invalid bearer token: {}", e)))?;
                value.set_sensitive(true);
                Some(value)
            }
        };

        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new(self.timeout)?),
        };

        Ok(OxygenClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization,
            transport,
            cancellation_token: None,
        })
    }
}
