//! Dialogue context merging
//!
//! Combines the current turn's slots with the persisted context (latest
//! durable-log metadata) and the volatile cache, applying the guarded
//! transitions that turn fragmentary follow-ups into actionable
//! queries. Pure: the caller performs all cache and log writes.

use once_cell::sync::Lazy;
use regex::Regex;
use travel_chat_core::{Intent, SlotContext};

static UNDER_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"under\s+(?:rs\.?|inr|₹)?\s*\d+").unwrap());

const FILTER_PHRASES: &[&str] = &[
    "filter", "show me only", "show only", "show me flights under",
    "flights under", "cheaper", "price range", "budget",
];

/// Whether the utterance uses narrowing vocabulary.
pub fn is_filter_request(prompt: &str) -> bool {
    let lower = prompt.to_lowercase();
    FILTER_PHRASES.iter().any(|phrase| lower.contains(phrase))
        || UNDER_AMOUNT.is_match(&lower)
}

/// The merged view of one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub slots: SlotContext,
    pub intent: Intent,
    /// The utterance used narrowing vocabulary; filter resolution runs.
    pub filter_turn: bool,
    /// A short date-only utterance re-activated a prior flight search;
    /// the caller must write the merged slots back to the cache.
    pub date_only_continuation: bool,
    /// An `Unknown` utterance was folded into the prior flight search.
    pub continuation: bool,
    /// The flight route changed, so the stale date was dropped.
    pub reset_date: bool,
}

fn strip_route_artifacts(raw: &str) -> String {
    let mut s = raw.trim();
    for prefix in ["flights from ", "flight from ", "to "] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest.trim();
        }
    }
    if let Some(rest) = s.strip_suffix(" on") {
        s = rest.trim();
    }
    s.to_string()
}

/// Merge one turn against its persisted and cached context.
pub fn merge_turn(
    prompt: &str,
    current: &SlotContext,
    classified: Intent,
    persisted: &SlotContext,
    cached: &SlotContext,
    date_only_max_len: usize,
) -> MergeOutcome {
    let mut intent = classified;

    let previous_origin = persisted.origin.as_deref().or(cached.origin.as_deref());
    let previous_destination = persisted
        .destination
        .as_deref()
        .or(cached.destination.as_deref());

    // A flight query naming a full route different from the remembered
    // one starts a new search; the remembered date no longer applies.
    let mut reset_date = false;
    if intent == Intent::Flight && current.has_route() {
        let origin_changed = previous_origin
            .is_some_and(|prev| Some(prev) != current.origin.as_deref());
        let destination_changed = previous_destination
            .is_some_and(|prev| Some(prev) != current.destination.as_deref());
        if origin_changed || destination_changed {
            tracing::debug!("Flight route changed, dropping remembered date");
            reset_date = true;
        }
    }

    let filter_turn = is_filter_request(prompt);
    if filter_turn && intent == Intent::Unknown {
        intent = Intent::Filter;
    }

    let mut slots = SlotContext::merged(current, persisted, cached);

    let previous_intent = persisted.last_intent.or(cached.last_intent);
    let intent_changed = previous_intent.map_or(true, |prev| prev != intent);
    if (intent_changed && intent != Intent::Filter && intent != Intent::Unknown) || reset_date {
        tracing::debug!(?previous_intent, %intent, reset_date, "Context reset");
        slots.max_price = None;
        if reset_date {
            slots.date = None;
        }
    }

    // A bare date ("tomorrow") after a complete flight search re-runs
    // that search on the new date.
    let mut date_only_continuation = false;
    if current.date.is_some()
        && current.origin.is_none()
        && current.destination.is_none()
        && prompt.len() < date_only_max_len
        && (persisted.last_intent == Some(Intent::Flight)
            || cached.last_intent == Some(Intent::Flight))
    {
        let prior_origin = persisted.origin.as_deref().or(cached.origin.as_deref());
        let prior_destination = persisted
            .destination
            .as_deref()
            .or(cached.destination.as_deref());
        if let (Some(origin), Some(destination)) = (prior_origin, prior_destination) {
            tracing::debug!("Date-only continuation of prior flight search");
            intent = Intent::Flight;
            date_only_continuation = true;
            slots.origin = Some(strip_route_artifacts(origin));
            slots.destination = Some(strip_route_artifacts(destination));
            slots.date = current.date.clone();
            slots.last_intent = Some(Intent::Flight);
        }
    }

    // Other fragmentary follow-ups to a flight search: a fresh date in a
    // longer utterance, or a new destination with a remembered origin.
    let mut continuation = false;
    if intent == Intent::Unknown && persisted.last_intent == Some(Intent::Flight) {
        if current.date.is_some() {
            tracing::debug!("Date continuation of prior flight search");
            intent = Intent::Flight;
            continuation = true;
            slots.origin = persisted.origin.clone();
            slots.destination = persisted.destination.clone();
            slots.date = current.date.clone();
        } else if current.destination.is_some()
            && current.origin.is_none()
            && persisted.origin.is_some()
        {
            tracing::debug!("Destination continuation of prior flight search");
            intent = Intent::Flight;
            continuation = true;
            slots.origin = persisted.origin.clone();
            slots.destination = current.destination.clone();
            slots.date = persisted.date.clone();
        }
    }

    MergeOutcome {
        slots,
        intent,
        filter_turn,
        date_only_continuation,
        continuation,
        reset_date,
    }
}
