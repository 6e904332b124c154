//! Command-line surface: argument parsing and command dispatch.
//!
//! Each subcommand maps onto one page or action of the original web
//! client: `feed` is the main feed with its filter sidebar, `show` the
//! snippet detail view, `profile`/`mine`/`bookmarks` the profile tabs,
//! and the mutating commands mirror the buttons on the detail view.

pub mod render;

use std::collections::HashSet;
use std::io::{Read, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::api::dto::CreateSnippetRequest;
use crate::auth;
use crate::config::ClientConfig;
use crate::domain::{CommentId, DateOrder, FeedQuery, ReactionKind, SnippetId};
use crate::error::ClientError;
use crate::service::SnippetService;
use crate::session::SessionStore;

/// Terminal client for the Snippedia code-snippet sharing platform.
#[derive(Debug, Parser)]
#[command(name = "snippedia", version, about)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// All client operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the snippet feed.
    Feed {
        /// Case-insensitive search across title, description, and code.
        #[arg(short, long, default_value = "")]
        search: String,
        /// Show only snippets carrying this exact tag.
        #[arg(short, long)]
        tag: Option<String>,
        /// Sort by bookmark count, descending.
        #[arg(long)]
        most_bookmarked: bool,
        /// Sort by date (`newest` or `oldest`); overrides the bookmark
        /// sort when both are given.
        #[arg(long, value_name = "ORDER")]
        date: Option<DateOrder>,
    },
    /// Show one snippet with its comment thread.
    Show {
        /// Snippet id.
        id: String,
    },
    /// Submit a new snippet.
    Submit {
        /// Title line.
        #[arg(long)]
        title: String,
        /// Free-text description.
        #[arg(long, default_value = "")]
        description: String,
        /// Language tag (e.g. `Rust`).
        #[arg(long)]
        language: String,
        /// Comma-separated tags.
        #[arg(long, default_value = "")]
        tags: String,
        /// File to read the code from; `-` reads stdin.
        #[arg(long, value_name = "PATH")]
        file: String,
    },
    /// Delete one of your snippets.
    Delete {
        /// Snippet id.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// React to a snippet (`useful`, `smart`, or `refactored`).
    React {
        /// Snippet id.
        id: String,
        /// Reaction kind.
        kind: ReactionKind,
    },
    /// Toggle a bookmark on a snippet.
    Bookmark {
        /// Snippet id.
        id: String,
    },
    /// Comment on a snippet, or reply to an existing comment.
    Comment {
        /// Snippet id.
        id: String,
        /// Comment text.
        text: String,
        /// Comment id to reply to.
        #[arg(long, value_name = "COMMENT_ID")]
        reply_to: Option<String>,
    },
    /// Show your profile and badges.
    Profile,
    /// List your own snippets.
    Mine,
    /// List your bookmarked snippets.
    Bookmarks,
    /// Log in via GitHub OAuth.
    Login {
        /// Paste a token (or the full callback URL) instead of waiting
        /// on the loopback listener.
        #[arg(long)]
        token: Option<String>,
    },
    /// Log out and clear the stored token.
    Logout,
}

/// Executes one parsed command.
///
/// # Errors
///
/// Returns the [`ClientError`] of whichever operation failed; the
/// binary turns it into a single stderr message.
pub async fn run(
    command: Command,
    config: &ClientConfig,
    service: &SnippetService,
    session: &Arc<dyn SessionStore>,
) -> Result<(), ClientError> {
    match command {
        Command::Feed {
            search,
            tag,
            most_bookmarked,
            date,
        } => {
            let query = FeedQuery {
                search,
                tag,
                sort_by_bookmarks: most_bookmarked,
                sort_by_date: date,
            };
            let view = service.load_feed(&query).await?;
            // The profile fetch only decorates the feed with bookmark
            // markers; its failure must not take the feed down with it.
            let bookmarked: HashSet<SnippetId> = match service.profile().await {
                Ok(profile) => profile.bookmarked_ids.into_iter().collect(),
                Err(e) => {
                    tracing::debug!(error = %e, "profile unavailable, feed unmarked");
                    HashSet::new()
                }
            };
            print!("{}", render::feed(&view, &bookmarked));
            Ok(())
        }
        Command::Show { id } => {
            let detail = service.snippet_detail(&SnippetId::new(id)).await?;
            print!("{}", render::snippet_detail(&detail));
            Ok(())
        }
        Command::Submit {
            title,
            description,
            language,
            tags,
            file,
        } => {
            require_token(session)?;
            let code = read_code(&file)?;
            // Like the original form, the author id rides along when
            // the profile is available.
            let author_id = service.profile().await.ok().map(|p| p.id);
            let created = service
                .submit(CreateSnippetRequest {
                    title,
                    description,
                    code,
                    language,
                    tags: parse_tags(&tags),
                    author_id,
                })
                .await?;
            println!("Submitted '{}' as {}", created.title, created.id);
            Ok(())
        }
        Command::Delete { id, yes } => {
            require_token(session)?;
            if !yes && !confirm(&format!("Delete snippet {id}? This cannot be undone."))? {
                println!("Aborted.");
                return Ok(());
            }
            let id = SnippetId::new(id);
            service.delete(&id).await?;
            println!("Deleted {id}.");
            Ok(())
        }
        Command::React { id, kind } => {
            require_token(session)?;
            let id = SnippetId::new(id);
            let mut snippet = service.snippet_detail(&id).await?.snippet;
            service.react(&mut snippet, kind).await?;
            println!("{kind} on '{}': {}", snippet.title, snippet.reactions.get(kind));
            // Resynchronize with the authoritative count.
            let refreshed = service.snippet_detail(&id).await?.snippet;
            println!("server count: {}", refreshed.reactions.get(kind));
            Ok(())
        }
        Command::Bookmark { id } => {
            require_token(session)?;
            let bookmarked = service.toggle_bookmark(&SnippetId::new(id)).await?;
            if bookmarked {
                println!("Bookmarked.");
            } else {
                println!("Bookmark removed.");
            }
            Ok(())
        }
        Command::Comment { id, text, reply_to } => {
            require_token(session)?;
            let id = SnippetId::new(id);
            service
                .add_comment(&id, &text, reply_to.map(CommentId::new))
                .await?;
            let detail = service.snippet_detail(&id).await?;
            println!("Comment posted.\n");
            print!("{}", render::comment_thread(&detail.thread));
            Ok(())
        }
        Command::Profile => {
            require_token(session)?;
            let profile = service.profile().await?;
            print!("{}", render::profile(&profile));
            Ok(())
        }
        Command::Mine => {
            require_token(session)?;
            let snippets = service.own_snippets().await?;
            print_listing(&snippets, "You have no snippets yet.");
            Ok(())
        }
        Command::Bookmarks => {
            require_token(session)?;
            let snippets = service.own_bookmarks().await?;
            print_listing(&snippets, "You have no bookmarks yet.");
            Ok(())
        }
        Command::Login { token } => {
            let token = match token {
                Some(input) => auth::extract_token(&input).ok_or_else(|| {
                    ClientError::InvalidInput("no token found in the pasted value".to_string())
                })?,
                None => {
                    let url = auth::authorize_url(config)?;
                    println!("Open this URL in your browser to authorize:\n\n  {url}\n");
                    println!(
                        "Waiting for the redirect on http://127.0.0.1:{} ...",
                        config.callback_port
                    );
                    auth::receive_token(config.callback_port).await?
                }
            };
            session.set(&token)?;
            println!("Logged in.");
            Ok(())
        }
        Command::Logout => {
            session.clear()?;
            println!("Logged out.");
            Ok(())
        }
    }
}

/// Fast-fails authenticated commands when no token is stored, instead
/// of bouncing a request off the server first.
fn require_token(session: &Arc<dyn SessionStore>) -> Result<(), ClientError> {
    if session.get().is_none() {
        return Err(ClientError::NotAuthenticated);
    }
    Ok(())
}

/// Splits the comma-separated tag input: trimmed, empties discarded.
fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Reads the snippet code from a file, or stdin when the path is `-`.
fn read_code(path: &str) -> Result<String, ClientError> {
    if path == "-" {
        let mut code = String::new();
        std::io::stdin().read_to_string(&mut code)?;
        Ok(code)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// y/N confirmation on stdin; anything but an explicit yes aborts.
fn confirm(prompt: &str) -> Result<bool, ClientError> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn print_listing(snippets: &[crate::domain::Snippet], empty_message: &str) {
    if snippets.is_empty() {
        println!("{empty_message}");
        return;
    }
    for snippet in snippets {
        println!(
            "[{}] {} ({}) — useful {} smart {} refactored {}",
            snippet.id,
            snippet.title,
            snippet.language,
            snippet.reactions.useful,
            snippet.reactions.smart,
            snippet.reactions.refactored
        );
    }
}
