//! Volatile per-conversation slot cache
//!
//! Process-local and lock-free for readers. Entries are replaced whole
//! on every write, so concurrent writers to the same conversation
//! resolve to last-write-wins and a reader never observes a partially
//! updated context.

use dashmap::DashMap;
use travel_chat_core::SlotContext;

/// Concurrent map of conversation key to last-known slot context.
#[derive(Debug, Default)]
pub struct ConversationCache {
    entries: DashMap<String, SlotContext>,
}

impl ConversationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the cached context, empty if the conversation has no
    /// entry yet.
    pub fn get(&self, conversation_key: &str) -> SlotContext {
        self.entries
            .get(conversation_key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Replace the whole entry for a conversation.
    pub fn put(&self, conversation_key: &str, slots: SlotContext) {
        tracing::debug!(conversation_key, "Updating cached slot context");
        self.entries.insert(conversation_key.to_string(), slots);
    }

    /// Drop a conversation's entry entirely.
    pub fn forget(&self, conversation_key: &str) {
        self.entries.remove(conversation_key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
