//! In-memory durable-log backend
//!
//! Append-only per-conversation turn log behind a `parking_lot` RwLock.
//! Used by tests and demos; production deployments substitute a real
//! database behind the same trait.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use travel_chat_core::{ContextStore, Result, TurnRecord};

#[derive(Debug, Default)]
pub struct MemoryContextStore {
    turns: RwLock<HashMap<String, Vec<TurnRecord>>>,
}

impl MemoryContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded turns for a conversation.
    pub fn turn_count(&self, conversation_key: &str) -> usize {
        self.turns
            .read()
            .get(conversation_key)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl ContextStore for MemoryContextStore {
    async fn latest_turn(&self, conversation_key: &str) -> Result<Option<TurnRecord>> {
        Ok(self
            .turns
            .read()
            .get(conversation_key)
            .and_then(|log| log.last().cloned()))
    }

    async fn record_turn(&self, conversation_key: &str, turn: TurnRecord) -> Result<()> {
        tracing::debug!(conversation_key, intent = %turn.intent, "Recording turn");
        self.turns
            .write()
            .entry(conversation_key.to_string())
            .or_default()
            .push(turn);
        Ok(())
    }

    async fn recent_prompts(&self, conversation_key: &str, limit: usize) -> Result<Vec<String>> {
        let turns = self.turns.read();
        let log = match turns.get(conversation_key) {
            Some(log) => log,
            None => return Ok(Vec::new()),
        };
        let start = log.len().saturating_sub(limit);
        Ok(log[start..].iter().map(|t| t.prompt.clone()).collect())
    }
}
