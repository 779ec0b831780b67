//! Minimal read-only PostgREST client for a Supabase project.
//!
//! Layout:
//! - `client.rs`: HTTP client construction and authenticated `select` calls
//! - `query.rs`: `Select` builder and `Content-Range` parsing

pub mod client;
pub mod query;

pub use client::SupabaseClient;
pub use query::{Select, Selected};
