use serde::{Deserialize, Serialize};

/// Body of a non-200 response from the OxygenAI API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}
