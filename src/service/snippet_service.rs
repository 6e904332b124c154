//! Snippet service: orchestrates API calls and domain logic.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::api::ApiClient;
use crate::api::dto::{CreateSnippetRequest, NewCommentRequest};
use crate::domain::{
    CommentId, CommentNode, FeedQuery, ReactionKind, Snippet, SnippetId, UserProfile, build_tree,
    collect_tags,
};
use crate::error::ClientError;

/// A rendered-ready feed: the filtered/sorted snippets plus the tag
/// list derived from the full, unfiltered collection (the sidebar shows
/// every tag even while a filter is active).
#[derive(Debug, Clone)]
pub struct FeedView {
    /// Snippets after the filter/sort pipeline.
    pub snippets: Vec<Snippet>,
    /// Unique tags over the whole feed, first-seen order.
    pub all_tags: Vec<String>,
}

/// A snippet with its comment thread reconstructed.
#[derive(Debug, Clone)]
pub struct SnippetDetail {
    /// The snippet record.
    pub snippet: Snippet,
    /// Reply forest built from the embedded flat comments.
    pub thread: Vec<CommentNode>,
}

/// Orchestration layer between the API client and the domain logic.
///
/// Stateless apart from the comment gate. Every mutation follows the
/// original client's pattern: issue one request, apply the local
/// consequence on success only, and let the caller re-fetch for the
/// authoritative state.
#[derive(Debug, Clone)]
pub struct SnippetService {
    api: ApiClient,
    // Comment posting is guarded against concurrent submission; the
    // original UI disables only the comment form while a post is in
    // flight, so reactions and bookmarks deliberately have no gate.
    comment_in_flight: Arc<AtomicBool>,
}

/// Releases the comment gate when the submission finishes, success or
/// not.
struct GateGuard<'a>(&'a AtomicBool);

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SnippetService {
    /// Creates a new service over an API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            comment_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Fetches the feed and runs the filter/sort pipeline.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when the feed fetch fails.
    pub async fn load_feed(&self, query: &FeedQuery) -> Result<FeedView, ClientError> {
        let snippets = self.api.list_snippets().await?;
        let all_tags = collect_tags(&snippets);
        let view = query.apply(&snippets);
        tracing::debug!(total = snippets.len(), shown = view.len(), "feed loaded");
        Ok(FeedView {
            snippets: view,
            all_tags,
        })
    }

    /// Fetches one snippet and reconstructs its comment thread.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when the fetch fails.
    pub async fn snippet_detail(&self, id: &SnippetId) -> Result<SnippetDetail, ClientError> {
        let snippet = self.api.get_snippet(id).await?;
        let thread = build_tree(&snippet.comments);
        Ok(SnippetDetail { snippet, thread })
    }

    /// Records a reaction and applies the optimistic local increment.
    ///
    /// On success the matching counter on the caller's snippet is
    /// bumped by exactly one; on failure the counters are untouched.
    /// There is no deduplication on either side — repeated reactions
    /// from the same user count repeatedly (at-least-once,
    /// unsynchronized). Callers re-fetch for the authoritative count.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when the reaction call fails.
    pub async fn react(
        &self,
        snippet: &mut Snippet,
        kind: ReactionKind,
    ) -> Result<(), ClientError> {
        self.api.react(&snippet.id, kind).await?;
        snippet.reactions.bump(kind);
        tracing::info!(snippet = %snippet.id, %kind, "reaction recorded");
        Ok(())
    }

    /// Toggles the bookmark and returns the server's authoritative
    /// state — never a locally flipped value.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when the toggle call fails.
    pub async fn toggle_bookmark(&self, id: &SnippetId) -> Result<bool, ClientError> {
        let response = self.api.toggle_bookmark(id).await?;
        tracing::info!(snippet = %id, bookmarked = response.bookmarked, "bookmark toggled");
        Ok(response.bookmarked)
    }

    /// Posts a comment or reply.
    ///
    /// Rejects empty text and refuses to start while another comment
    /// submission is in flight; the gate is released when the request
    /// finishes either way.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] for empty text,
    /// [`ClientError::CommentInFlight`] while another submission is
    /// outstanding, or the underlying [`ClientError`] from the request.
    pub async fn add_comment(
        &self,
        id: &SnippetId,
        content: &str,
        parent: Option<CommentId>,
    ) -> Result<(), ClientError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ClientError::InvalidInput("comment text is empty".to_string()));
        }

        if self
            .comment_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ClientError::CommentInFlight);
        }
        let _gate = GateGuard(&self.comment_in_flight);

        let request = match parent {
            Some(parent) => NewCommentRequest::reply(content, parent),
            None => NewCommentRequest::top_level(content),
        };
        self.api.add_comment(id, &request).await?;
        tracing::info!(snippet = %id, reply = request.parent_id.is_some(), "comment posted");
        Ok(())
    }

    /// Submits a new snippet and returns the created record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] when title or code is
    /// empty, or the underlying [`ClientError`] from the request.
    pub async fn submit(&self, request: CreateSnippetRequest) -> Result<Snippet, ClientError> {
        if request.title.trim().is_empty() {
            return Err(ClientError::InvalidInput("title is required".to_string()));
        }
        if request.code.trim().is_empty() {
            return Err(ClientError::InvalidInput("code is required".to_string()));
        }
        let created = self.api.create_snippet(&request).await?;
        tracing::info!(snippet = %created.id, "snippet submitted");
        Ok(created)
    }

    /// Deletes an own snippet (author-only, enforced server-side).
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when the delete call fails.
    pub async fn delete(&self, id: &SnippetId) -> Result<(), ClientError> {
        self.api.delete_snippet(id).await?;
        tracing::info!(snippet = %id, "snippet deleted");
        Ok(())
    }

    /// Fetches the logged-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when the fetch fails.
    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        self.api.profile().await
    }

    /// Fetches the logged-in user's own snippets.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when the fetch fails.
    pub async fn own_snippets(&self) -> Result<Vec<Snippet>, ClientError> {
        self.api.own_snippets().await
    }

    /// Fetches the logged-in user's bookmarked snippets.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when the fetch fails.
    pub async fn own_bookmarks(&self) -> Result<Vec<Snippet>, ClientError> {
        self.api.own_bookmarks().await
    }
}
