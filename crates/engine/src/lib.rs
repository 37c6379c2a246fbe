//! Conversation engine for the travel chat assistant
//!
//! Combines the pure text analysis from `travel-chat-nlu` with a
//! three-tier context model (current turn, durable log, volatile cache)
//! to turn free-text utterances into flight/hotel/restaurant queries,
//! clarifying questions, filter refinements, or an LLM fallback.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod filter;
pub mod merge;

pub use config::{load_config, EngineConfig};
pub use engine::ChatEngine;
pub use filter::FilterOutcome;
pub use merge::{merge_turn, MergeOutcome};
