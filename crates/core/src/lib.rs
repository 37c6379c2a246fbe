//! Core types and traits for the travel chat engine
//!
//! This crate provides foundational types used across all other crates:
//! - The closed intent tag set (`Intent`)
//! - Slot values and the per-conversation slot context (`SlotContext`)
//! - Domain result records (flights, hotels, restaurants)
//! - The per-turn response envelope (`ChatResponse`)
//! - Collaborator traits for pluggable backends (context log, result
//!   store, LLM fallback)
//! - Error types

pub mod error;
pub mod intent;
pub mod records;
pub mod response;
pub mod slots;
pub mod traits;

pub use error::{Error, Result};
pub use intent::Intent;
pub use records::{Flight, Hotel, Restaurant, ResultSet};
pub use response::ChatResponse;
pub use slots::{SlotContext, TurnMetadata};
pub use traits::{
    ChatMessage, ContextStore, LlmFallback, MessageRole, ResultStore, TurnRecord,
};
