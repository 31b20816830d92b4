//! Contains all data structures that are particularly used for the chat completions API

use oxygen_sdk_macros::FromBytes;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Represents a chat completion request.
///
/// Unset optional parameters are omitted from the JSON body, leaving the
/// service defaults in effect. An empty `model` is replaced with
/// [`DEFAULT_CHAT_MODEL`](crate::DEFAULT_CHAT_MODEL) when the request is sent.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// The conversation so far. Must not be empty.
    pub messages: Vec<ChatMessage>,
    /// The model to use for the completion (e.g. "gpt-3.5-turbo-1106").
    #[serde(default)]
    pub model: String,
    /// Number between -2.0 and 2.0. Positive values penalize tokens by how often
    /// they already appear in the text.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_finite"
    )]
    pub frequency_penalty: Option<f64>,
    /// The maximum number of tokens that can be generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// How many completion choices to generate for each input message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    /// Streaming flag forwarded to the service. The response is always read
    /// as a single JSON document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Sampling temperature between 0 and 2.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_finite"
    )]
    pub temperature: Option<f64>,
    /// Nucleus sampling probability mass.
    #[serde(
        rename = "top",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_finite"
    )]
    pub top_p: Option<f64>,
}

impl ChatRequest {
    /// Creates an empty [`ChatRequest`] that will use the default model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model used for the completion.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Adds a message to the chat request.
    pub fn add_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }
}

/// A single message in the conversation.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// The role of the author, usually `system`, `user` or `assistant`.
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Represents a chat completion response.
///
/// Missing or `null` fields decode to their defaults. `choices` are kept as raw JSON
/// since their shape is not fixed by the service.
#[derive(Deserialize, Serialize, Default, FromBytes, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    /// Unique identifier for the chat completion.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// List of chat completion choices.
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<serde_json::Value>,
    /// Unix timestamp (in seconds) of when the completion was created.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created: i64,
    /// The model used for the completion.
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    /// Fingerprint of the backend configuration the model ran with.
    #[serde(default, deserialize_with = "null_as_default")]
    pub system_fingerprint: String,
    /// Object type, always "chat.completion".
    #[serde(default, deserialize_with = "null_as_default")]
    pub object: String,
}

/// JSON has no representation for NaN or infinities.
fn serialize_finite<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) if !v.is_finite() => Err(S::Error::custom(format!(
            "cannot encode non-finite number {} as JSON",
            v
        ))),
        _ => value.serialize(serializer),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
