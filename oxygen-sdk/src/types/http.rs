use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Serialize;

use crate::{Error, Result};

/// A single JSON `POST` handed to a [`Transport`](crate::transport::Transport).
#[derive(Default, Debug, Clone)]
pub struct HttpRequest {
    /// Absolute URL of the endpoint.
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl HttpRequest {
    /// Creates a request carrying the JSON `Content-Type` and `Accept` headers.
    pub fn new(url: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            url: url.into(),
            headers,
            body: None,
        }
    }

    /// Sets the `Authorization` header. `None` leaves the request unauthenticated.
    pub fn authorization(mut self, value: Option<HeaderValue>) -> Self {
        match value {
            Some(value) => {
                self.headers.insert(AUTHORIZATION, value);
            }
            None => {
                self.headers.remove(AUTHORIZATION);
            }
        }
        self
    }

    pub fn body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(Error::Serialization)?);
        Ok(self)
    }
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Builds a response whose body is `body` encoded as JSON.
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(body).map_err(Error::Serialization)?;
        Ok(Self::new(status, bytes))
    }
}
