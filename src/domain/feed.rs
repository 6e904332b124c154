//! Feed filter/sort pipeline.
//!
//! Three composable, independent criteria over the in-memory snippet
//! list: a case-insensitive substring search (OR across title,
//! description, and code), an optional single-tag equality filter, and
//! an optional sort. The pipeline never mutates its input.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::snippet::Snippet;

/// Direction of the date sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// Most recent first.
    Newest,
    /// Oldest first.
    Oldest,
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Newest => f.write_str("newest"),
            Self::Oldest => f.write_str("oldest"),
        }
    }
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            other => Err(format!("unknown date order '{other}' (expected newest or oldest)")),
        }
    }
}

/// The feed view's filter and sort state.
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    /// Free-text search; empty matches everything.
    pub search: String,
    /// Single-tag equality filter.
    pub tag: Option<String>,
    /// Sort by bookmark count, descending.
    pub sort_by_bookmarks: bool,
    /// Date sort direction.
    pub sort_by_date: Option<DateOrder>,
}

impl FeedQuery {
    /// Runs the pipeline: search filter, then tag filter, then sort.
    ///
    /// Sort cascade: with the bookmark sort active, snippets are first
    /// ordered by bookmark count descending; a date direction, when also
    /// set, is applied as a second stable pass on top and therefore
    /// always wins (ties on date keep the bookmark order). With only a
    /// date direction set, the sort is by date alone. With neither, the
    /// filtered order is preserved.
    #[must_use]
    pub fn apply(&self, snippets: &[Snippet]) -> Vec<Snippet> {
        let needle = self.search.to_lowercase();

        let mut view: Vec<Snippet> = snippets
            .iter()
            .filter(|s| matches_search(s, &needle))
            .filter(|s| {
                self.tag
                    .as_ref()
                    .is_none_or(|tag| s.tags.iter().any(|t| t == tag))
            })
            .cloned()
            .collect();

        if self.sort_by_bookmarks {
            view.sort_by(|a, b| b.bookmark_count().cmp(&a.bookmark_count()));
            if let Some(order) = self.sort_by_date {
                sort_by_date(&mut view, order);
            }
        } else if let Some(order) = self.sort_by_date {
            sort_by_date(&mut view, order);
        }

        view
    }
}

/// OR across the three searchable fields, all lowercased. An empty
/// needle matches everything.
fn matches_search(snippet: &Snippet, needle: &str) -> bool {
    snippet.title.to_lowercase().contains(needle)
        || snippet.description.to_lowercase().contains(needle)
        || snippet.code.to_lowercase().contains(needle)
}

/// Stable date sort in the given direction.
fn sort_by_date(view: &mut [Snippet], order: DateOrder) {
    match order {
        DateOrder::Newest => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        DateOrder::Oldest => view.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
}

/// Unique tags over the full collection, in first-seen order.
#[must_use]
pub fn collect_tags(snippets: &[Snippet]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for snippet in snippets {
        for tag in &snippet.tags {
            if seen.insert(tag.as_str()) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}
