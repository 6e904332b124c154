//! Typed HTTP client for the Snippedia API.
//!
//! [`ApiClient`] wraps a single `reqwest::Client` and exposes one async
//! method per remote operation. The bearer token is read from the
//! injected [`SessionStore`] immediately before each request — never
//! cached — so login and logout take effect without rebuilding the
//! client. The feed endpoint is public; the header is simply omitted
//! when no token is stored and protected endpoints surface the server's
//! 401 as a [`ClientError::Api`].
//!
//! No request is retried; a failure maps to exactly one error.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::api::dto::{BookmarkResponse, CreateSnippetRequest, NewCommentRequest};
use crate::config::ClientConfig;
use crate::domain::{ReactionKind, Snippet, SnippetId, UserProfile};
use crate::error::ClientError;
use crate::session::SessionStore;

/// HTTP client over the Snippedia REST contract.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Builds a client from configuration and a session store.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Starts a request, attaching the stored bearer token when present.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "api request");
        let builder = self.http.request(method, url);
        match self.session.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// `GET /api/snippets` — the full snippet feed.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure, a non-success
    /// status, or an undecodable body.
    pub async fn list_snippets(&self) -> Result<Vec<Snippet>, ClientError> {
        let response = self.request(Method::GET, "/api/snippets").send().await?;
        decode(response).await
    }

    /// `GET /api/snippets/{id}` — one snippet with comments, reaction
    /// counts, and bookmark state.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure, a non-success
    /// status, or an undecodable body.
    pub async fn get_snippet(&self, id: &SnippetId) -> Result<Snippet, ClientError> {
        let response = self
            .request(Method::GET, &format!("/api/snippets/{id}"))
            .send()
            .await?;
        decode(response).await
    }

    /// `POST /api/snippets` — submit a new snippet.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure, a non-success
    /// status, or an undecodable body.
    pub async fn create_snippet(
        &self,
        request: &CreateSnippetRequest,
    ) -> Result<Snippet, ClientError> {
        let response = self
            .request(Method::POST, "/api/snippets")
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    /// `DELETE /api/snippets/{id}` — remove an own snippet
    /// (author-only, enforced server-side).
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure or a non-success
    /// status.
    pub async fn delete_snippet(&self, id: &SnippetId) -> Result<(), ClientError> {
        let response = self
            .request(Method::DELETE, &format!("/api/snippets/{id}"))
            .send()
            .await?;
        check(response).await
    }

    /// `POST /api/snippets/{id}/reaction?type={kind}` — record one
    /// reaction. No body in either direction.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure or a non-success
    /// status.
    pub async fn react(&self, id: &SnippetId, kind: ReactionKind) -> Result<(), ClientError> {
        let response = self
            .request(Method::POST, &format!("/api/snippets/{id}/reaction"))
            .query(&[("type", kind.as_str())])
            .send()
            .await?;
        check(response).await
    }

    /// `POST /api/snippets/{id}/bookmark` — toggle the bookmark and
    /// return the authoritative state.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure, a non-success
    /// status, or an undecodable body.
    pub async fn toggle_bookmark(&self, id: &SnippetId) -> Result<BookmarkResponse, ClientError> {
        let response = self
            .request(Method::POST, &format!("/api/snippets/{id}/bookmark"))
            .send()
            .await?;
        decode(response).await
    }

    /// `POST /api/snippets/{id}/comment` — add a comment or reply.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure or a non-success
    /// status.
    pub async fn add_comment(
        &self,
        id: &SnippetId,
        request: &NewCommentRequest,
    ) -> Result<(), ClientError> {
        let response = self
            .request(Method::POST, &format!("/api/snippets/{id}/comment"))
            .json(request)
            .send()
            .await?;
        check(response).await
    }

    /// `GET /api/user/profile` — the logged-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure, a non-success
    /// status, or an undecodable body.
    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        let response = self.request(Method::GET, "/api/user/profile").send().await?;
        decode(response).await
    }

    /// `GET /api/user/snippets` — snippets authored by the logged-in
    /// user.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure, a non-success
    /// status, or an undecodable body.
    pub async fn own_snippets(&self) -> Result<Vec<Snippet>, ClientError> {
        let response = self
            .request(Method::GET, "/api/user/snippets")
            .send()
            .await?;
        decode(response).await
    }

    /// `GET /api/user/bookmarks` — snippets the logged-in user has
    /// bookmarked.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure, a non-success
    /// status, or an undecodable body.
    pub async fn own_bookmarks(&self) -> Result<Vec<Snippet>, ClientError> {
        let response = self
            .request(Method::GET, "/api/user/bookmarks")
            .send()
            .await?;
        decode(response).await
    }
}

/// Maps a response to `T`: non-success statuses become
/// [`ClientError::Api`] (with the `{error}` body when present), success
/// with a bad body becomes [`ClientError::MalformedResponse`].
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::from_response(status.as_u16(), &body));
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::MalformedResponse(e.to_string()))
}

/// Like [`decode`] for endpoints whose success body is irrelevant.
async fn check(response: Response) -> Result<(), ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::from_response(status.as_u16(), &body));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::Router;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Json};
    use axum::routing::{get, post};
    use serde_json::json;
    use std::collections::HashMap;

    use super::*;
    use crate::session::MemorySessionStore;

    /// Serves the router on an ephemeral loopback port and returns a
    /// client pointed at it.
    async fn client_for(router: Router, session: MemorySessionStore) -> ApiClient {
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("loopback bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        let config = ClientConfig {
            api_url: format!("http://{addr}"),
            github_client_id: None,
            callback_port: 0,
            request_timeout_secs: 5,
            token_path: None,
        };
        let Ok(client) = ApiClient::new(&config, Arc::new(session)) else {
            panic!("client construction failed");
        };
        client
    }

    fn sample_snippet_json() -> serde_json::Value {
        json!({
            "id": "s1",
            "title": "Binary search",
            "description": "classic",
            "code": "fn bsearch() {}",
            "language": "Rust",
            "tags": ["algorithm"],
            "author_id": "u1",
            "author_username": "ada",
            "created_at": "2024-05-01T09:00:00Z",
            "useful": 2,
            "smart": 0,
            "refactored": 1,
            "bookmarked_by": ["u2"],
            "comments": []
        })
    }

    #[tokio::test]
    async fn list_snippets_decodes_feed() {
        let router = Router::new().route(
            "/api/snippets",
            get(|| async { Json(json!([sample_snippet_json()])) }),
        );
        let client = client_for(router, MemorySessionStore::new()).await;

        let snippets = client.list_snippets().await;
        let Ok(snippets) = snippets else {
            panic!("feed fetch failed");
        };
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets.first().map(|s| s.reactions.useful), Some(2));
    }

    #[tokio::test]
    async fn bearer_token_is_read_from_session_before_each_request() {
        let router = Router::new().route(
            "/api/user/profile",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if auth == "Bearer jwt-123" {
                    Json(json!({"id": "u1", "username": "ada"})).into_response()
                } else {
                    StatusCode::UNAUTHORIZED.into_response()
                }
            }),
        );
        let client = client_for(router, MemorySessionStore::with_token("jwt-123")).await;

        let profile = client.profile().await;
        assert!(profile.is_ok());
    }

    #[tokio::test]
    async fn missing_token_omits_authorization_header() {
        let router = Router::new().route(
            "/api/snippets",
            get(|headers: HeaderMap| async move {
                if headers.contains_key("authorization") {
                    StatusCode::BAD_REQUEST.into_response()
                } else {
                    Json(json!([])).into_response()
                }
            }),
        );
        let client = client_for(router, MemorySessionStore::new()).await;

        let snippets = client.list_snippets().await;
        assert!(matches!(snippets, Ok(ref v) if v.is_empty()));
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let router = Router::new().route(
            "/api/snippets/{id}",
            axum::routing::delete(|| async {
                (StatusCode::FORBIDDEN, Json(json!({"error": "author only"})))
            }),
        );
        let client = client_for(router, MemorySessionStore::with_token("jwt")).await;

        let result = client.delete_snippet(&SnippetId::new("s1")).await;
        let Err(err) = result else {
            panic!("expected an error");
        };
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.to_string(), "server error (403): author only");
    }

    #[tokio::test]
    async fn malformed_success_body_is_classified() {
        let router = Router::new().route("/api/snippets", get(|| async { "definitely not json" }));
        let client = client_for(router, MemorySessionStore::new()).await;

        let result = client.list_snippets().await;
        assert!(matches!(result, Err(ClientError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn react_sends_kind_as_type_query_param() {
        let router = Router::new().route(
            "/api/snippets/{id}/reaction",
            post(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("type").map(String::as_str) == Some("refactored") {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_REQUEST
                }
            }),
        );
        let client = client_for(router, MemorySessionStore::with_token("jwt")).await;

        let result = client
            .react(&SnippetId::new("s1"), ReactionKind::Refactored)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn bookmark_toggle_returns_server_boolean() {
        let router = Router::new().route(
            "/api/snippets/{id}/bookmark",
            post(|| async { Json(json!({"bookmarked": false})) }),
        );
        let client = client_for(router, MemorySessionStore::with_token("jwt")).await;

        let result = client.toggle_bookmark(&SnippetId::new("s1")).await;
        assert!(matches!(result, Ok(r) if !r.bookmarked));
    }

    #[tokio::test]
    async fn reply_posts_camel_cased_parent_id() {
        let router = Router::new().route(
            "/api/snippets/{id}/comment",
            post(|Json(body): Json<serde_json::Value>| async move {
                if body.get("parentId").and_then(|v| v.as_str()) == Some("c1") {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_REQUEST
                }
            }),
        );
        let client = client_for(router, MemorySessionStore::with_token("jwt")).await;

        let request = NewCommentRequest::reply("agreed", crate::domain::CommentId::new("c1"));
        let result = client.add_comment(&SnippetId::new("s1"), &request).await;
        assert!(result.is_ok());
    }
}
