//! Client error types covering the full failure taxonomy.
//!
//! [`ClientError`] is the central error type for the client: transport
//! failures, non-success HTTP statuses (with the server's optional
//! `{"error": "..."}` body), malformed response bodies, and session-store
//! I/O. Every command surfaces exactly one of these as a user-visible
//! message; nothing is retried automatically.

use serde::Deserialize;

/// Error body the Snippedia API attaches to non-success responses.
///
/// The server is not guaranteed to send one; absent or unparseable bodies
/// fall back to the HTTP status line.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// Client-side error enum.
///
/// # Variant groups
///
/// | Group         | Variants                          | Origin                     |
/// |---------------|-----------------------------------|----------------------------|
/// | Transport     | `Network`                         | no response at all         |
/// | Remote        | `Api`                             | non-2xx with optional body |
/// | Decoding      | `MalformedResponse`               | 2xx with a bad body        |
/// | Local state   | `Session`, `NotAuthenticated`     | token store                |
/// | Usage         | `InvalidInput`, `CommentInFlight` | caller mistakes, gating    |
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Message from the `{"error": ...}` body, or the status line.
        message: String,
    },

    /// The server answered 2xx but the body did not decode as expected.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Reading or writing the token store failed.
    #[error("session store error: {0}")]
    Session(#[from] std::io::Error),

    /// An authenticated operation was attempted with no stored token.
    #[error("not logged in; run `snippedia login` first")]
    NotAuthenticated,

    /// The caller supplied input the client refuses to send.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A comment submission is already in flight.
    #[error("a comment is already being posted; wait for it to finish")]
    CommentInFlight,

    /// The login callback listener failed before a token arrived.
    #[error("login callback error: {0}")]
    Callback(String),
}

impl ClientError {
    /// Builds a [`ClientError::Api`] from a status code and raw body,
    /// extracting the server's `{"error": ...}` message when present.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("request failed with status {status}"));
        Self::Api { status, message }
    }

    /// Returns the HTTP status code for remote errors, `None` otherwise.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` when the error came from the server rejecting the
    /// request as unauthenticated.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::Api { status: 401, .. })
    }
}
