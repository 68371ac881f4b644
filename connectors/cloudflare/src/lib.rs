//! Cloudflare connectors for Courtside
//!
//! [`WorkersAiClient`] runs text-generation models on Workers AI and
//! [`WorkersKvStore`] keeps generated analyses in a Workers KV namespace. Both
//! talk to the Cloudflare v4 REST API with a bearer token.

mod ai;
mod config;
mod kv;
mod models;

pub use ai::WorkersAiClient;
pub use config::CloudflareConfig;
pub use kv::{WorkersKvStore, MIN_EXPIRATION_TTL};
