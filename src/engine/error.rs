use thiserror::Error;

/// Message shown to the player for any failed turn.
pub const TURN_FAILURE_MESSAGE: &str =
    "The storyteller returned an invalid response. Please try again.";

/// Transport-level failures talking to the generative service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("response contained no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum TurnError {
    #[error("turn request failed: {0}")]
    Request(#[from] ClientError),

    #[error("response is not valid JSON: {0}")]
    Parse(String),

    #[error("field `{field}` must be {expected}")]
    Validation {
        field: &'static str,
        expected: &'static str,
    },
}

impl TurnError {
    /// All failures collapse to one message for the player; the detail is logged.
    pub fn user_message(&self) -> &'static str {
        TURN_FAILURE_MESSAGE
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image request failed: {0}")]
    Request(#[from] ClientError),

    #[error("the service returned no images")]
    NoImages,
}
