use std::time::Duration;

#[cfg(feature = "tracing")]
use tracing::instrument;

use async_trait::async_trait;
use reqwest::Client;

use crate::transport::Transport;
use crate::types::{HttpRequest, HttpResponse};
use crate::{Error, Result};

/// A [`Transport`] implementation that uses the `reqwest` crate for making HTTP requests.
///
/// This is the default transport used by [`OxygenClient`](crate::OxygenClient) if no custom transport
/// is provided.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a new `ReqwestTransport`.
    ///
    /// # Arguments
    ///
    /// * `timeout` - An optional deadline applied to every whole request.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Client`] if the `reqwest` client cannot be built.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| Error::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wraps an already configured `reqwest` [`Client`].
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    /// Sends the request using `reqwest` and reads the whole body.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Transport`] if the request fails and an
    /// [`Error::Io`] if the response body cannot be read.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(url = %request.url)))]
    async fn send_http_request(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut request_builder = self
            .client
            .post(request.url.as_str())
            .headers(request.headers);

        if let Some(body) = request.body {
            request_builder = request_builder.json(&body);
        }

        let response = request_builder.send().await.map_err(Error::Transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(Error::Io)?;

        Ok(HttpResponse { status, body })
    }
}
