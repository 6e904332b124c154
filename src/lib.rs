//! # snippedia
//!
//! Terminal client for the Snippedia code-snippet sharing platform.
//!
//! Users authenticate via GitHub OAuth, browse a feed of shared
//! snippets, react to and bookmark them, comment with threaded
//! replies, and submit new snippets. All state except the bearer token
//! is a transient cache of the server's; every mutation re-fetches to
//! resynchronize.
//!
//! ## Architecture
//!
//! ```text
//! CLI commands (cli/)
//!     │
//!     ├── SnippetService (service/)
//!     │       │
//!     │       ├── ApiClient (api/)  ── Snippedia REST API
//!     │       └── domain logic (domain/)
//!     │             comment tree · feed pipeline · reactions
//!     │
//!     ├── OAuth handoff (auth/) ── loopback listener
//!     └── SessionStore (session/) ── bearer token file
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod session;
