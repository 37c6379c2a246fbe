//! In-process backends for the travel chat engine
//!
//! - [`cache`]: volatile per-conversation slot cache (DashMap)
//! - [`context_log`]: in-memory durable-log implementation of
//!   [`travel_chat_core::ContextStore`]
//! - [`results`]: in-memory inventory implementing
//!   [`travel_chat_core::ResultStore`]
//! - [`seed`]: deterministic inventory generator for tests and demos

pub mod cache;
pub mod context_log;
pub mod results;
pub mod seed;

pub use cache::ConversationCache;
pub use context_log::MemoryContextStore;
pub use results::MemoryResultStore;
pub use seed::{seed_inventory, SeedConfig};
