//! HTTP layer: the typed API client and wire-only DTOs.

pub mod client;
pub mod dto;

pub use client::ApiClient;
