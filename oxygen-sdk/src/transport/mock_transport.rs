use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[cfg(feature = "tracing")]
use tracing::instrument;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use crate::transport::Transport;
use crate::types::{HttpRequest, HttpResponse};
use crate::{Error, Result};

/// A mock implementation of the [`Transport`] trait for testing purposes.
///
/// Responses are queued up front and handed out in order, one per request.
/// Every request that reaches the transport is recorded so tests can inspect
/// the URL, headers and JSON body that would have gone over the wire.
#[derive(Clone, Default)]
pub struct MockTransport {
    /// Responses returned by subsequent requests, oldest first.
    responses: Arc<Mutex<VecDeque<HttpResponse>>>,
    /// Requests received so far.
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    /// When set, requests are recorded but never answered.
    stalled: bool,
}

impl MockTransport {
    /// Creates a new, empty [`MockTransport`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and raw body.
    pub fn with_response(self, status: StatusCode, body: impl Into<bytes::Bytes>) -> Self {
        self.with_http_response(HttpResponse::new(status, body))
    }

    /// Queues a `200 OK` response whose body is `body` encoded as JSON.
    pub fn with_json_response<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        Ok(self.with_http_response(HttpResponse::json(StatusCode::OK, body)?))
    }

    /// Queues a prepared [`HttpResponse`].
    pub fn with_http_response(self, response: HttpResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Makes every request hang forever, e.g. to exercise cancellation.
    pub fn stalled(mut self) -> Self {
        self.stalled = true;
        self
    }

    /// Returns the requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the most recent request, if any.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    /// Records the request and returns the next queued response.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Client`] when no response is queued.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request)))]
    async fn send_http_request(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);

        if self.stalled {
            std::future::pending::<()>().await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Client("MockTransport: no response configured".to_string()))
    }
}
