//! Multi-turn conversation tests against the in-memory stores and a
//! scripted LLM.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use travel_chat_core::{
    ChatMessage, Error, Flight, Hotel, Intent, LlmFallback, MessageRole, Restaurant, Result,
    ResultSet, ResultStore,
};
use travel_chat_engine::{ChatEngine, EngineConfig};
use travel_chat_store::{seed_inventory, MemoryContextStore, MemoryResultStore, SeedConfig};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// LLM stub that records what it was asked and replies from a script.
#[derive(Default)]
struct ScriptedLlm {
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    reply: Option<String>,
}

impl ScriptedLlm {
    fn replying(reply: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Some(reply.to_string()),
        }
    }

    fn failing() -> Self {
        Self::default()
    }

    fn last_call(&self) -> Option<Vec<ChatMessage>> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmFallback for ScriptedLlm {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.reply
            .clone()
            .ok_or_else(|| Error::Llm("provider unavailable".into()))
    }
}

/// Result store whose every lookup fails.
struct BrokenResultStore;

#[async_trait]
impl ResultStore for BrokenResultStore {
    async fn flights_by_route(&self, _: &str, _: &str) -> Result<Vec<Flight>> {
        Err(Error::ResultStore("connection refused".into()))
    }

    async fn destinations_from(&self, _: &str, _: usize) -> Result<Vec<String>> {
        Err(Error::ResultStore("connection refused".into()))
    }

    async fn hotels_in_city(&self, _: &str, _: Option<f64>) -> Result<Vec<Hotel>> {
        Err(Error::ResultStore("connection refused".into()))
    }

    async fn restaurants_in_city(&self, _: &str, _: Option<&str>) -> Result<Vec<Restaurant>> {
        Err(Error::ResultStore("connection refused".into()))
    }
}

fn engine_with_inventory() -> (
    ChatEngine<Arc<MemoryContextStore>, Arc<MemoryResultStore>, Arc<ScriptedLlm>>,
    Arc<MemoryContextStore>,
    Arc<ScriptedLlm>,
) {
    init_tracing();
    let context = Arc::new(MemoryContextStore::new());
    let results = Arc::new(seed_inventory(&SeedConfig::compact(today())));
    let llm = Arc::new(ScriptedLlm::replying(
        "Goa is lovely in winter. Want help with flights?",
    ));
    let engine = ChatEngine::new(
        Arc::clone(&context),
        Arc::clone(&results),
        Arc::clone(&llm),
        EngineConfig::default(),
    );
    (engine, context, llm)
}

#[tokio::test]
async fn test_complete_flight_query_returns_results() {
    let (engine, context, _) = engine_with_inventory();

    let response = engine
        .handle_at("user-1", "flights from delhi to mumbai tomorrow", today())
        .await;

    assert_eq!(response.intent, Intent::Flight);
    let results = response.results.expect("flight results");
    assert!(!results.is_empty());
    match results {
        ResultSet::Flights(flights) => {
            assert!(flights.iter().all(|f| f.source == "Delhi" && f.destination == "Mumbai"));
            assert!(flights.iter().all(|f| f.date.day() == 2));
        }
        other => panic!("expected flights, got {other:?}"),
    }
    assert_eq!(context.turn_count("user-1"), 1);
}

#[tokio::test]
async fn test_date_only_follow_up_completes_flight_search() {
    let (engine, _, _) = engine_with_inventory();

    let first = engine
        .handle_at("user-2", "flights from delhi to goa", today())
        .await;
    assert_eq!(first.intent, Intent::Flight);
    assert!(first.results.is_none());
    assert!(first.message.as_deref().unwrap().contains("When would you like to travel"));

    let second = engine.handle_at("user-2", "tomorrow", today()).await;
    assert_eq!(second.intent, Intent::Flight);
    let results = second.results.expect("flight results after date follow-up");
    assert!(!results.is_empty());
    assert_eq!(second.slots.origin.as_deref(), Some("delhi"));
    assert_eq!(second.slots.destination.as_deref(), Some("goa"));
    assert_eq!(second.slots.date.as_deref(), Some("2026-09-02"));
}

#[tokio::test]
async fn test_price_filter_re_narrows_previous_results() {
    let (engine, _, _) = engine_with_inventory();

    let search = engine
        .handle_at("user-3", "flights from delhi to mumbai tomorrow", today())
        .await;
    let total = search.results.as_ref().expect("results").len();
    assert!(total > 0);

    let filtered = engine.handle_at("user-3", "under 9000", today()).await;
    assert_eq!(filtered.intent, Intent::Flight);
    match filtered.results.expect("filtered results") {
        ResultSet::Flights(flights) => {
            assert!(flights.iter().all(|f| f.price <= 9000.0));
            assert!(flights.len() <= total);
        }
        other => panic!("expected flights, got {other:?}"),
    }
}

#[tokio::test]
async fn test_filter_turn_is_not_logged() {
    let (engine, context, _) = engine_with_inventory();

    engine
        .handle_at("user-4", "flights from delhi to mumbai tomorrow", today())
        .await;
    assert_eq!(context.turn_count("user-4"), 1);

    engine.handle_at("user-4", "under 9000", today()).await;
    assert_eq!(context.turn_count("user-4"), 1);
}

#[tokio::test]
async fn test_hotel_query_with_price_cap() {
    let (engine, _, _) = engine_with_inventory();

    let response = engine
        .handle_at("user-5", "hotels in jaipur under 20000", today())
        .await;

    assert_eq!(response.intent, Intent::Hotel);
    match response.results.expect("hotel results") {
        ResultSet::Hotels(hotels) => {
            assert!(!hotels.is_empty());
            assert!(hotels.iter().all(|h| h.city == "Jaipur" && h.room_price <= 20000.0));
        }
        other => panic!("expected hotels, got {other:?}"),
    }
    assert!(response.message.as_deref().unwrap().contains("hotels in jaipur"));
}

#[tokio::test]
async fn test_hotel_query_without_city_asks_for_one() {
    let (engine, _, _) = engine_with_inventory();

    let response = engine.handle_at("user-6", "I need a hotel room", today()).await;
    assert_eq!(response.intent, Intent::Hotel);
    assert!(response.results.is_none());
    assert!(response.message.as_deref().unwrap().contains("which city"));
}

#[tokio::test]
async fn test_restaurant_query_in_unseeded_city_synthesizes_samples() {
    let (engine, _, _) = engine_with_inventory();

    let response = engine
        .handle_at("user-7", "suggest restaurants in indore", today())
        .await;

    assert_eq!(response.intent, Intent::Restaurant);
    match response.results.expect("restaurant results") {
        ResultSet::Restaurants(restaurants) => {
            assert_eq!(restaurants.len(), 5);
            assert!(restaurants.iter().all(|r| r.location == "indore"));
        }
        other => panic!("expected restaurants, got {other:?}"),
    }
    assert!(response.message.as_deref().unwrap().contains("indore"));
}

#[tokio::test]
async fn test_off_topic_prompt_is_rejected_and_not_logged() {
    let (engine, context, _) = engine_with_inventory();

    let response = engine
        .handle_at("user-8", "explain the sorting algorithm", today())
        .await;

    assert_eq!(response.intent, Intent::OffTopic);
    assert!(response.message.as_deref().unwrap().contains("travel assistant"));
    assert_eq!(context.turn_count("user-8"), 0);
}

#[tokio::test]
async fn test_unknown_prompt_goes_to_llm_with_system_prompt_last() {
    let (engine, _, llm) = engine_with_inventory();

    let response = engine.handle_at("user-9", "hello there", today()).await;

    assert_eq!(response.intent, Intent::Unknown);
    assert!(response.fallback);
    assert_eq!(response.message.as_deref(), Some("Goa is lovely in winter. Want help with flights?"));

    let messages = llm.last_call().expect("llm called");
    assert_eq!(messages.last().unwrap().role, MessageRole::System);
    assert!(messages
        .iter()
        .any(|m| m.role == MessageRole::User && m.content == "hello there"));
}

#[tokio::test]
async fn test_llm_failure_degrades_to_canned_greeting() {
    let context = Arc::new(MemoryContextStore::new());
    let results = Arc::new(seed_inventory(&SeedConfig::compact(today())));
    let engine = ChatEngine::new(
        context,
        results,
        Arc::new(ScriptedLlm::failing()),
        EngineConfig::default(),
    );

    let response = engine.handle_at("user-10", "hello there", today()).await;
    assert_eq!(response.intent, Intent::Unknown);
    assert!(response.fallback);
    assert!(response.message.as_deref().unwrap().contains("travel assistant"));
}

#[tokio::test]
async fn test_result_store_failure_degrades_without_corrupting_context() {
    let context = Arc::new(MemoryContextStore::new());
    let engine = ChatEngine::new(
        Arc::clone(&context),
        BrokenResultStore,
        Arc::new(ScriptedLlm::failing()),
        EngineConfig::default(),
    );

    let response = engine
        .handle_at("user-11", "flights from delhi to mumbai tomorrow", today())
        .await;

    assert_eq!(response.intent, Intent::Flight);
    assert!(response.fallback);
    assert!(response.error);
    // The turn is still recorded so the conversation can continue.
    assert_eq!(context.turn_count("user-11"), 1);
}

#[tokio::test]
async fn test_route_change_resets_remembered_date() {
    let (engine, _, _) = engine_with_inventory();

    engine
        .handle_at("user-12", "flights from delhi to mumbai tomorrow", today())
        .await;

    // New route, no date: the old date must not leak into the search.
    let response = engine
        .handle_at("user-12", "flights from delhi to goa", today())
        .await;
    assert_eq!(response.intent, Intent::Flight);
    assert!(response.results.is_none());
    assert!(response.message.as_deref().unwrap().contains("When would you like to travel"));
    assert!(response.slots.date.is_none());
}

#[tokio::test]
async fn test_conversations_do_not_share_context() {
    let (engine, _, _) = engine_with_inventory();

    engine
        .handle_at("user-13", "flights from delhi to goa", today())
        .await;

    // A different conversation's bare date is not a continuation.
    let response = engine.handle_at("user-14", "tomorrow", today()).await;
    assert_eq!(response.intent, Intent::Unknown);
    assert!(response.fallback);
}
