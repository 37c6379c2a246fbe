//! Collaborator traits for pluggable backends
//!
//! The engine is generic over these traits. Production deployments back
//! them with real storage and an LLM provider; `travel-chat-store`
//! provides in-process implementations used by tests and demos.

use crate::error::Result;
use crate::intent::Intent;
use crate::records::{Flight, Hotel, Restaurant};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role tag for LLM conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One role-tagged message in LLM conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: MessageRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: MessageRole::Assistant, content: content.into() }
    }
}

/// One past turn in the durable per-conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub prompt: String,
    pub intent: Intent,
    /// Serialized [`crate::TurnMetadata`] envelope; malformed or empty
    /// metadata is treated as no-context by readers.
    pub metadata: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TurnRecord {
    pub fn new(prompt: impl Into<String>, intent: Intent, metadata: Option<String>) -> Self {
        Self {
            prompt: prompt.into(),
            intent,
            metadata,
            created_at: Utc::now(),
        }
    }
}

/// Durable log of past turns, keyed by opaque conversation key.
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Most recent turn for a conversation, if any.
    async fn latest_turn(&self, conversation_key: &str) -> Result<Option<TurnRecord>>;

    /// Append a turn to the conversation log.
    async fn record_turn(&self, conversation_key: &str, turn: TurnRecord) -> Result<()>;

    /// Up to `limit` most recent prompts, oldest first.
    async fn recent_prompts(&self, conversation_key: &str, limit: usize) -> Result<Vec<String>>;
}

/// Read access to the flight/hotel/restaurant inventory.
///
/// The core only consumes filter predicates; it does not own the schema.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// All flights on a route, any date. City names are matched
    /// case-insensitively.
    async fn flights_by_route(&self, source: &str, destination: &str) -> Result<Vec<Flight>>;

    /// Up to `limit` distinct destinations served from an origin.
    async fn destinations_from(&self, source: &str, limit: usize) -> Result<Vec<String>>;

    /// Hotels whose city contains `city` (case-insensitive), optionally
    /// capped by room price.
    async fn hotels_in_city(&self, city: &str, max_price: Option<f64>) -> Result<Vec<Hotel>>;

    /// Restaurants whose location contains `city` (case-insensitive),
    /// optionally narrowed by cuisine substring.
    async fn restaurants_in_city(&self, city: &str, cuisine: Option<&str>) -> Result<Vec<Restaurant>>;
}

/// External LLM used only on the no-match fallback path.
#[async_trait]
pub trait LlmFallback: Send + Sync {
    /// Complete a capped, role-tagged conversation history.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

// Shared handles delegate, so callers can keep a reference to a store
// they hand to the engine.

#[async_trait]
impl<T: ContextStore + ?Sized> ContextStore for std::sync::Arc<T> {
    async fn latest_turn(&self, conversation_key: &str) -> Result<Option<TurnRecord>> {
        (**self).latest_turn(conversation_key).await
    }

    async fn record_turn(&self, conversation_key: &str, turn: TurnRecord) -> Result<()> {
        (**self).record_turn(conversation_key, turn).await
    }

    async fn recent_prompts(&self, conversation_key: &str, limit: usize) -> Result<Vec<String>> {
        (**self).recent_prompts(conversation_key, limit).await
    }
}

#[async_trait]
impl<T: ResultStore + ?Sized> ResultStore for std::sync::Arc<T> {
    async fn flights_by_route(&self, source: &str, destination: &str) -> Result<Vec<Flight>> {
        (**self).flights_by_route(source, destination).await
    }

    async fn destinations_from(&self, source: &str, limit: usize) -> Result<Vec<String>> {
        (**self).destinations_from(source, limit).await
    }

    async fn hotels_in_city(&self, city: &str, max_price: Option<f64>) -> Result<Vec<Hotel>> {
        (**self).hotels_in_city(city, max_price).await
    }

    async fn restaurants_in_city(&self, city: &str, cuisine: Option<&str>) -> Result<Vec<Restaurant>> {
        (**self).restaurants_in_city(city, cuisine).await
    }
}

#[async_trait]
impl<T: LlmFallback + ?Sized> LlmFallback for std::sync::Arc<T> {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        (**self).complete(messages).await
    }
}
