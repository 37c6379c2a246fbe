//! Turn orchestrator
//!
//! Wires the text analysis, context tiers, filter resolution, and
//! per-intent dispatch into a single `handle` call. Generic over the
//! collaborator traits so tests run against in-memory stores and a
//! scripted LLM.

use chrono::Utc;
use travel_chat_core::{
    ChatMessage, ChatResponse, ContextStore, Intent, LlmFallback, ResultStore, SlotContext,
    TurnMetadata, TurnRecord,
};
use travel_chat_nlu::{classify, extract_slots, is_off_topic};
use travel_chat_store::ConversationCache;

use crate::config::EngineConfig;
use crate::{dispatch, filter, merge};

const OFF_TOPIC_MESSAGE: &str = "I'm your travel assistant and can only help with \
travel-related questions. Would you like information about flights, hotels, or \
restaurants for your next trip?";

const FALLBACK_GREETING: &str =
    "🤖 I'm your travel assistant. Please ask about flights, hotels, or restaurants!";

pub struct ChatEngine<C, R, L> {
    context: C,
    results: R,
    llm: L,
    cache: ConversationCache,
    config: EngineConfig,
}

impl<C, R, L> ChatEngine<C, R, L>
where
    C: ContextStore,
    R: ResultStore,
    L: LlmFallback,
{
    pub fn new(context: C, results: R, llm: L, config: EngineConfig) -> Self {
        Self {
            context,
            results,
            llm,
            cache: ConversationCache::new(),
            config,
        }
    }

    /// Handle one turn, resolving relative dates against the current day.
    pub async fn handle(&self, conversation_key: &str, prompt: &str) -> ChatResponse {
        self.handle_at(conversation_key, prompt, Utc::now().date_naive())
            .await
    }

    /// Handle one turn with an explicit "today" for date resolution.
    pub async fn handle_at(
        &self,
        conversation_key: &str,
        prompt: &str,
        today: chrono::NaiveDate,
    ) -> ChatResponse {
        let trimmed = prompt.trim();

        if is_off_topic(trimmed) {
            tracing::info!(conversation_key, "Turn rejected as off-topic");
            return ChatResponse::message(Intent::OffTopic, SlotContext::default(), OFF_TOPIC_MESSAGE);
        }

        let classified = classify(trimmed);
        let current = extract_slots(trimmed, today);

        let persisted = self.persisted_context(conversation_key).await;
        let cached = self.cache.get(conversation_key);

        let outcome = merge::merge_turn(
            trimmed,
            &current,
            classified,
            &persisted,
            &cached,
            self.config.date_only_max_len,
        );
        tracing::debug!(
            conversation_key,
            intent = %outcome.intent,
            filter_turn = outcome.filter_turn,
            continuation = outcome.continuation || outcome.date_only_continuation,
            "Merged turn context"
        );

        if outcome.date_only_continuation {
            self.cache.put(conversation_key, outcome.slots.clone());
        }

        // Filter turns re-narrow remembered results and bypass both the
        // durable log and dispatch.
        if outcome.filter_turn {
            if let Some(resolved) = filter::resolve(
                trimmed,
                outcome.intent,
                &outcome.slots,
                &current,
                &persisted,
                &cached,
                &self.config,
            ) {
                if let Some(update) = resolved.cache_update {
                    self.cache.put(conversation_key, update);
                }
                tracing::info!(conversation_key, intent = %resolved.response.intent, "Filter turn resolved");
                return resolved.response;
            }
        }

        self.record_turn(conversation_key, trimmed, &outcome.slots, outcome.intent)
            .await;

        let response = match outcome.intent {
            Intent::Flight => {
                dispatch::flight(
                    &self.results,
                    &self.cache,
                    conversation_key,
                    outcome.slots,
                    &self.config,
                )
                .await
            }
            Intent::Hotel => {
                dispatch::hotel(&self.results, &self.cache, conversation_key, outcome.slots).await
            }
            Intent::Restaurant => {
                dispatch::restaurant(&self.results, &self.cache, conversation_key, outcome.slots)
                    .await
            }
            _ => self.llm_fallback(conversation_key, trimmed, outcome.slots).await,
        };
        tracing::info!(
            conversation_key,
            intent = %response.intent,
            results = response.results.as_ref().map(|r| r.len()),
            fallback = response.fallback,
            "Turn completed"
        );
        response
    }

    /// Latest durable-log metadata, or an empty context when the log is
    /// empty, unreadable, or malformed.
    async fn persisted_context(&self, conversation_key: &str) -> SlotContext {
        match self.context.latest_turn(conversation_key).await {
            Ok(Some(turn)) => turn
                .metadata
                .as_deref()
                .and_then(TurnMetadata::parse)
                .map(|meta| meta.slots)
                .unwrap_or_default(),
            Ok(None) => SlotContext::default(),
            Err(err) => {
                tracing::warn!(conversation_key, error = %err, "Context read failed");
                SlotContext::default()
            }
        }
    }

    /// Logging never blocks the turn; failures are recorded and dropped.
    async fn record_turn(
        &self,
        conversation_key: &str,
        prompt: &str,
        slots: &SlotContext,
        intent: Intent,
    ) {
        let metadata = TurnMetadata::new(slots.clone(), intent).to_json();
        let turn = TurnRecord::new(prompt, intent, Some(metadata));
        if let Err(err) = self.context.record_turn(conversation_key, turn).await {
            tracing::warn!(conversation_key, error = %err, "Failed to record turn");
        }
    }

    async fn llm_fallback(
        &self,
        conversation_key: &str,
        prompt: &str,
        slots: SlotContext,
    ) -> ChatResponse {
        let mut messages: Vec<ChatMessage> = match self
            .context
            .recent_prompts(conversation_key, self.config.history_turn_limit)
            .await
        {
            Ok(prompts) => prompts.into_iter().map(ChatMessage::user).collect(),
            Err(err) => {
                tracing::warn!(conversation_key, error = %err, "History read failed");
                vec![ChatMessage::user(prompt)]
            }
        };
        messages.push(ChatMessage::system(self.config.system_prompt.clone()));

        let message = match self.llm.complete(&messages).await {
            Ok(completion) => completion,
            Err(err) => {
                tracing::warn!(conversation_key, error = %err, "LLM fallback failed");
                FALLBACK_GREETING.to_string()
            }
        };

        ChatResponse {
            intent: Intent::Unknown,
            slots,
            message: Some(message),
            results: None,
            fallback: true,
            error: false,
        }
    }
}
