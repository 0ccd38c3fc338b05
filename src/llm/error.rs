// src/llm/error.rs
// Error taxonomy for the model gateway. Each variant maps to a distinct
// user-facing behaviour at the HTTP boundary; see api::http::chat.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    /// Required credential absent. Fatal for the request, not for the server.
    #[error("Server is missing OPENAI_API_KEY.")]
    MissingCredentials,

    /// Non-success response from the provider; recoverable by user retry.
    #[error("Upstream error: {status} {body}")]
    Upstream { status: u16, body: String },

    /// The bounded wait expired. Surfaced distinctly so the client can offer
    /// "try again".
    #[error("The request timed out. Please try again.")]
    Timeout,

    /// Reply missing or not shaped like a completion.
    #[error("model reply was missing or malformed")]
    MalformedReply,

    /// Structured output that did not parse as valid JSON.
    #[error("Invalid JSON from model.")]
    Parse,

    /// Connection-level failure talking to the provider.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Transport(err.to_string())
        }
    }
}
