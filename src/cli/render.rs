//! Plain-text rendering of feed, detail, and profile views.
//!
//! Pure string builders so output is testable without a terminal. The
//! comment thread is printed via the iterative pre-order walk from
//! `domain::comment_tree`, so reply depth is unbounded here too.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::domain::{CommentNode, ReactionKind, Snippet, SnippetId, UserProfile, walk};
use crate::service::{FeedView, SnippetDetail};

/// Renders the feed: one block per snippet plus the tag sidebar line.
#[must_use]
pub fn feed(view: &FeedView, bookmarked: &HashSet<SnippetId>) -> String {
    let mut out = String::new();
    if view.all_tags.is_empty() {
        out.push_str("tags: (none)\n");
    } else {
        let _ = writeln!(out, "tags: {}", view.all_tags.join(", "));
    }
    out.push('\n');

    if view.snippets.is_empty() {
        out.push_str("No snippets match.\n");
        return out;
    }
    for snippet in &view.snippets {
        out.push_str(&feed_entry(snippet, bookmarked.contains(&snippet.id)));
    }
    out
}

/// One feed entry: title line, author/date line, counters line.
fn feed_entry(snippet: &Snippet, bookmarked: bool) -> String {
    let mut out = String::new();
    let marker = if bookmarked { "*" } else { " " };
    let _ = writeln!(
        out,
        "{marker} [{}] {} ({})",
        snippet.id, snippet.title, snippet.language
    );
    let _ = writeln!(
        out,
        "    by {} on {}",
        snippet.author_username,
        snippet.created_at.format("%Y-%m-%d")
    );
    let _ = writeln!(
        out,
        "    useful {}  smart {}  refactored {}  bookmarks {}  comments {}",
        snippet.reactions.useful,
        snippet.reactions.smart,
        snippet.reactions.refactored,
        snippet.bookmark_count(),
        snippet.comments.len()
    );
    if !snippet.tags.is_empty() {
        let _ = writeln!(out, "    tags: {}", snippet.tags.join(", "));
    }
    out
}

/// Full snippet view: header, code, reactions, and the comment thread.
#[must_use]
pub fn snippet_detail(detail: &SnippetDetail) -> String {
    let snippet = &detail.snippet;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", snippet.title, snippet.language);
    let _ = writeln!(
        out,
        "by {} on {}",
        snippet.author_username,
        snippet.created_at.format("%Y-%m-%d %H:%M")
    );
    if let Some(github) = &snippet.author_github {
        let _ = writeln!(out, "author profile: {github}");
    }
    if !snippet.description.is_empty() {
        let _ = writeln!(out, "\n{}", snippet.description);
    }
    out.push('\n');
    for line in snippet.code.lines() {
        let _ = writeln!(out, "    {line}");
    }
    out.push('\n');
    for kind in ReactionKind::ALL {
        let _ = write!(out, "{kind} {}  ", snippet.reactions.get(kind));
    }
    let _ = writeln!(out, "bookmarks {}", snippet.bookmark_count());
    out.push('\n');

    if detail.thread.is_empty() {
        out.push_str("No comments yet.\n");
    } else {
        let _ = writeln!(out, "Comments:");
        out.push_str(&comment_thread(&detail.thread));
    }
    out
}

/// Renders the reply forest with two-space indentation per depth.
#[must_use]
pub fn comment_thread(forest: &[CommentNode]) -> String {
    let mut out = String::new();
    for (depth, node) in walk(forest) {
        let indent = "  ".repeat(depth);
        let _ = writeln!(
            out,
            "{indent}[{}] {}: {}",
            node.comment.id, node.comment.author_username, node.comment.content
        );
    }
    out
}

/// Profile view with badges and bookmark count.
#[must_use]
pub fn profile(profile: &UserProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", profile.username, profile.id);
    if !profile.bio.is_empty() {
        let _ = writeln!(out, "bio: {}", profile.bio);
    }
    if !profile.github_url.is_empty() {
        let _ = writeln!(out, "github: {}", profile.github_url);
    }
    if profile.badges.is_empty() {
        out.push_str("badges: (none)\n");
    } else {
        let _ = writeln!(out, "badges: {}", profile.badges.join(", "));
    }
    let _ = writeln!(out, "bookmarked snippets: {}", profile.bookmarked_ids.len());
    out
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::domain::{Comment, CommentId, UserId, build_tree};

    fn ts() -> DateTime<Utc> {
        let Ok(t) = "2024-03-01T12:00:00Z".parse() else {
            panic!("valid timestamp");
        };
        t
    }

    fn comment(id: &str, parent: Option<&str>, author: &str, content: &str) -> Comment {
        Comment {
            id: CommentId::new(id),
            content: content.to_string(),
            author_id: UserId::new("u1"),
            author_username: author.to_string(),
            avatar_url: None,
            github_url: None,
            created_at: ts(),
            is_reply: parent.is_some(),
            parent_id: parent.map(CommentId::new),
        }
    }

    #[test]
    fn thread_is_indented_by_depth_in_input_order() {
        let forest = build_tree(&[
            comment("c1", None, "ada", "root comment"),
            comment("c2", Some("c1"), "grace", "first reply"),
            comment("c3", Some("c2"), "ada", "nested reply"),
            comment("c4", None, "linus", "second root"),
        ]);
        let rendered = comment_thread(&forest);
        assert_eq!(
            rendered,
            "[c1] ada: root comment\n\
             \x20\x20[c2] grace: first reply\n\
             \x20\x20\x20\x20[c3] ada: nested reply\n\
             [c4] linus: second root\n"
        );
    }

    #[test]
    fn deep_thread_renders_without_overflow() {
        const DEPTH: usize = 5_000;
        let mut comments = vec![comment("c0", None, "ada", "start")];
        for i in 1..DEPTH {
            let prev = i.saturating_sub(1);
            comments.push(comment(
                &format!("c{i}"),
                Some(&format!("c{prev}")),
                "ada",
                "reply",
            ));
        }
        let rendered = comment_thread(&build_tree(&comments));
        assert_eq!(rendered.lines().count(), DEPTH);
    }

    #[test]
    fn empty_forest_renders_to_nothing() {
        assert_eq!(comment_thread(&[]), "");
    }
}
