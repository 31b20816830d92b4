//! Contains all data structures that are particularly used for the image generations API

use std::ops::{Deref, DerefMut};

use oxygen_sdk_macros::FromBytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Represents an image generation request.
///
/// An empty `model` is replaced with
/// [`DEFAULT_IMAGE_MODEL`](crate::DEFAULT_IMAGE_MODEL) when the request is sent.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct ImageRequest {
    /// Text description of the desired image. Must not be empty.
    pub prompt: String,
    /// The model to use (e.g. "dall-e-3").
    #[serde(default)]
    pub model: String,
    /// If set, the service may send partial images with progression deltas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl ImageRequest {
    /// Creates a new [`ImageRequest`] for `prompt` using the default model.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }
}

/// Represents an image generation response.
///
/// The service does not commit to a schema here, so the JSON object is kept
/// as-is. Dereferences to the underlying [`Map`].
#[derive(Deserialize, Serialize, Default, FromBytes, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct ImageResponse(pub Map<String, Value>);

impl ImageResponse {
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl Deref for ImageResponse {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ImageResponse {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
