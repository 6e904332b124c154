//! OAuth token handoff.
//!
//! Authentication itself happens entirely between the browser, GitHub,
//! and the Snippedia backend; this module only handles the edges the
//! client owns: building the authorize URL, and receiving the bearer
//! token the backend hands back via a redirect carrying a `token` query
//! parameter. A one-shot loopback HTTP listener plays the role of the
//! original web client's redirect target; alternatively the user can
//! paste the token (or the whole callback URL) into `login --token`.

use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Builds the GitHub authorize URL for this deployment.
///
/// The redirect target is the backend's callback endpoint; after the
/// exchange the backend redirects to the client with the issued token.
///
/// # Errors
///
/// Returns [`ClientError::InvalidInput`] when no GitHub client id is
/// configured, or when the resulting URL cannot be built.
pub fn authorize_url(config: &ClientConfig) -> Result<String, ClientError> {
    let client_id = config.github_client_id.as_deref().ok_or_else(|| {
        ClientError::InvalidInput("SNIPPEDIA_GITHUB_CLIENT_ID is not set".to_string())
    })?;
    let redirect_uri = format!("{}/auth/github/callback", config.api_url.trim_end_matches('/'));
    let url = reqwest::Url::parse_with_params(
        "https://github.com/login/oauth/authorize",
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri.as_str()),
            ("scope", "user:email"),
        ],
    )
    .map_err(|e| ClientError::InvalidInput(format!("invalid authorize URL: {e}")))?;
    Ok(url.into())
}

/// Extracts a bearer token from user-pasted input: either a raw token
/// or a full callback URL carrying a `token` query parameter.
#[must_use]
pub fn extract_token(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(url) = reqwest::Url::parse(trimmed) {
        return url
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .filter(|token| !token.is_empty());
    }
    Some(trimmed.to_string())
}

/// Waits for the OAuth redirect on a loopback listener and returns the
/// delivered token.
///
/// Binds `127.0.0.1:{port}` (the address the backend is configured to
/// redirect to) and blocks until a request with a non-empty `token`
/// query parameter arrives. There is deliberately no timeout: like the
/// original client, an abandoned login simply waits until the user
/// interrupts it.
///
/// # Errors
///
/// Returns [`ClientError::Callback`] when the listener cannot bind or
/// stops before a token arrives.
pub async fn receive_token(port: u16) -> Result<String, ClientError> {
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .map_err(|e| ClientError::Callback(format!("cannot bind 127.0.0.1:{port}: {e}")))?;
    receive_on(listener).await
}

#[derive(Clone)]
struct CallbackState {
    sender: Arc<Mutex<Option<oneshot::Sender<String>>>>,
}

#[derive(Debug, Deserialize)]
struct CallbackParams {
    token: Option<String>,
}

async fn receive_on(listener: TcpListener) -> Result<String, ClientError> {
    let (token_tx, token_rx) = oneshot::channel::<String>();
    let state = CallbackState {
        sender: Arc::new(Mutex::new(Some(token_tx))),
    };
    let app = Router::new().route("/", get(callback)).with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let token = token_rx
        .await
        .map_err(|_| ClientError::Callback("listener stopped before a token arrived".to_string()))?;
    // Give the redirect response a moment to flush before the caller
    // tears the process down.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    Ok(token)
}

async fn callback(
    State(state): State<CallbackState>,
    Query(params): Query<CallbackParams>,
) -> impl IntoResponse {
    match params.token.filter(|t| !t.is_empty()) {
        Some(token) => {
            if let Some(tx) = state
                .sender
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take()
            {
                let _ = tx.send(token);
            }
            (
                StatusCode::OK,
                "Login complete — you can close this tab and return to the terminal.",
            )
        }
        None => (StatusCode::BAD_REQUEST, "Missing token parameter."),
    }
}
