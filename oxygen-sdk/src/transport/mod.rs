use async_trait::async_trait;

use crate::types::{HttpRequest, HttpResponse};
use crate::Result;

mod mock_transport;
mod reqwest_transport;

pub use mock_transport::MockTransport;
pub use reqwest_transport::ReqwestTransport;

/// Sends one HTTP request and returns one fully read response.
///
/// Implementations only deal with the network. Status handling is left to
/// [`OxygenClient`](crate::OxygenClient), so a non-2xx status must be
/// returned as an `Ok` [`HttpResponse`], not as an error.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends a JSON `POST` and returns the response.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`](crate::Error::Transport) on network failures and
    /// [`Error::Io`](crate::Error::Io) when the body cannot be read.
    async fn send_http_request(&self, request: HttpRequest) -> Result<HttpResponse>;
}
