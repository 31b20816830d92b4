use bytes::Bytes;
use reqwest::StatusCode;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

#[cfg(feature = "metrics")]
use metrics::counter;
#[cfg(feature = "tracing")]
use tracing::{debug, instrument, warn};

use crate::builder::OxygenClientBuilder;
use crate::types::chat::{ChatRequest, ChatResponse};
use crate::types::image::{ImageRequest, ImageResponse};
use crate::types::{ErrorResponse, HttpRequest, HttpResponse};
use crate::OxygenClient;
use crate::{
    Error, Result, CHAT_COMPLETIONS_PATH, DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL,
    IMAGE_GENERATIONS_PATH,
};

impl OxygenClient {
    pub fn builder() -> OxygenClientBuilder {
        OxygenClientBuilder::new()
    }

    /// Creates a client for the default base URL using the default transport.
    ///
    /// An empty `token` is allowed and results in unauthenticated requests.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder().token(token).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a clone of this client whose requests abort with
    /// [`Error::Cancelled`] once `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancellation_token: Some(token),
            ..self.clone()
        }
    }

    /// Requests a chat completion.
    ///
    /// An empty `request.model` is set to [`DEFAULT_CHAT_MODEL`] before sending,
    /// and the change stays visible in `request`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `request.messages` is empty, otherwise any
    /// error from [`post`](OxygenClient::post) or [`Error::Decoding`].
    #[cfg_attr(feature = "tracing", instrument(skip(self, request)))]
    pub async fn chat_completion(&self, request: &mut ChatRequest) -> Result<ChatResponse> {
        if request.messages.is_empty() {
            return Err(Error::InvalidArgument(
                "chat request needs at least one message".into(),
            ));
        }
        if request.model.is_empty() {
            request.model = DEFAULT_CHAT_MODEL.to_string();
        }

        #[cfg(feature = "metrics")]
        counter!("oxygen_client.requests_total", "endpoint" => "chat_completions").increment(1);

        let bytes = self.post(CHAT_COMPLETIONS_PATH, &*request).await?;
        ChatResponse::from_bytes(bytes)
    }

    /// Requests an image generation.
    ///
    /// An empty `request.model` is set to [`DEFAULT_IMAGE_MODEL`] before sending,
    /// and the change stays visible in `request`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `request.prompt` is empty, otherwise any
    /// error from [`post`](OxygenClient::post) or [`Error::Decoding`].
    #[cfg_attr(feature = "tracing", instrument(skip(self, request)))]
    pub async fn image_generation(&self, request: &mut ImageRequest) -> Result<ImageResponse> {
        if request.prompt.is_empty() {
            return Err(Error::InvalidArgument(
                "image request needs a non-empty prompt".into(),
            ));
        }
        if request.model.is_empty() {
            request.model = DEFAULT_IMAGE_MODEL.to_string();
        }

        #[cfg(feature = "metrics")]
        counter!("oxygen_client.requests_total", "endpoint" => "image_generations").increment(1);

        let bytes = self.post(IMAGE_GENERATIONS_PATH, &*request).await?;
        ImageResponse::from_bytes(bytes)
    }

    /// Sends `payload` as JSON to `path` (relative to the base URL) and returns
    /// the raw body of a `200 OK` response.
    ///
    /// # Errors
    ///
    /// - [`Error::Serialization`] if `payload` cannot be encoded.
    /// - [`Error::Transport`] / [`Error::Io`] from the transport.
    /// - [`Error::Cancelled`] if the client's cancellation token fires first.
    /// - [`Error::Service`] for any status but `200 OK`, carrying the server's
    ///   `error` message or, failing that, the raw body text.
    #[cfg_attr(feature = "tracing", instrument(skip(self, payload)))]
    pub async fn post<T>(&self, path: &str, payload: &T) -> Result<Bytes>
    where
        T: Serialize + ?Sized,
    {
        let request = HttpRequest::new(self.resolve_url(path))
            .authorization(self.authorization.clone())
            .body(payload)?;

        #[cfg(feature = "tracing")]
        debug!(url = %request.url, "sending request");

        let send = self.transport.send_http_request(request);
        let response = match &self.cancellation_token {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(Error::Cancelled),
                response = send => response?,
            },
            None => send.await?,
        };

        #[cfg(feature = "tracing")]
        debug!(status = %response.status, "received response");

        if response.status != StatusCode::OK {
            return Err(service_error(response));
        }

        Ok(response.body)
    }

    fn resolve_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn service_error(response: HttpResponse) -> Error {
    let message = match serde_json::from_slice::<ErrorResponse>(&response.body) {
        Ok(err) => err.error,
        Err(_) => String::from_utf8_lossy(&response.body).into_owned(),
    };

    #[cfg(feature = "tracing")]
    warn!(status = %response.status, %message, "service returned an error");
    #[cfg(feature = "metrics")]
    counter!("oxygen_client.service_errors_total", "status" => response.status.as_str().to_owned())
        .increment(1);

    Error::Service {
        status: response.status,
        message,
    }
}
