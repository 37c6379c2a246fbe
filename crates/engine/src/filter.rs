//! Filter resolution
//!
//! Re-narrows the previous turn's result set in place of a fresh
//! inventory query. Runs only on turns using filter vocabulary; when it
//! produces an outcome the engine short-circuits without logging the
//! turn.

use once_cell::sync::Lazy;
use regex::Regex;
use travel_chat_core::{ChatResponse, Intent, ResultSet, SlotContext};

use crate::config::EngineConfig;

static FILTER_PRICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:under|less than|below|cheaper than|max|maximum|up to|not more than)\s+(?:rs\.?|inr|₹)?\s*(\d+)",
    )
    .unwrap()
});

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

// Word-bounded so record ids and years inside the prompt don't read as
// ratings.
static BARE_RATING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-5](\.[0-9])?\b").unwrap());

/// What a resolved filter turn produces: the response to return and the
/// cache entry to store.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub response: ChatResponse,
    pub cache_update: Option<SlotContext>,
}

fn price_threshold(prompt: &str) -> Option<f64> {
    let lower = prompt.to_lowercase();
    if let Some(caps) = FILTER_PRICE.captures(&lower) {
        return caps[1].parse().ok();
    }
    FIRST_NUMBER
        .find(&lower)
        .and_then(|m| m.as_str().parse().ok())
}

fn is_rating_filter(prompt: &str, last_intent: Intent) -> bool {
    let lower = prompt.to_lowercase();
    lower.contains("rating")
        || lower.contains("stars")
        || lower.contains("rated")
        || (lower.contains("below") && !lower.contains("price"))
        || (last_intent == Intent::Restaurant && BARE_RATING.is_match(&lower))
}

/// Try to resolve a filter turn against the remembered result set.
///
/// Returns `None` when there is nothing to re-narrow, in which case the
/// turn flows on to normal dispatch.
pub fn resolve(
    prompt: &str,
    intent: Intent,
    slots: &SlotContext,
    current: &SlotContext,
    persisted: &SlotContext,
    cached: &SlotContext,
    config: &EngineConfig,
) -> Option<FilterOutcome> {
    let last_results = persisted
        .last_results
        .as_ref()
        .or(cached.last_results.as_ref())?;
    let last_intent = persisted.last_intent.or(cached.last_intent)?;

    let threshold = price_threshold(prompt);
    let rating_filter = is_rating_filter(prompt, last_intent);
    tracing::debug!(?threshold, rating_filter, %last_intent, "Resolving filter turn");

    if intent == Intent::Filter && threshold.is_some() && !last_intent.is_domain_query() {
        return Some(FilterOutcome {
            response: ChatResponse::message(
                Intent::Unknown,
                slots.clone(),
                "I'm not sure what you want to filter. Could you please specify if you're \
                 looking for flights, hotels, or restaurants with that filter?",
            ),
            cache_update: None,
        });
    }

    if rating_filter && last_intent == Intent::Restaurant {
        if let (Some(threshold), ResultSet::Restaurants(restaurants)) = (threshold, last_results) {
            let cap = config.rating_cap;
            let rating_threshold = if threshold > cap { cap } else { threshold };
            let kept: Vec<_> = restaurants
                .iter()
                .filter(|r| r.rating < rating_threshold)
                .cloned()
                .collect();
            tracing::debug!(kept = kept.len(), rating_threshold, "Applied rating filter");

            let message = if kept.is_empty() {
                format!("I couldn't find any restaurants with ratings below {rating_threshold}.")
            } else {
                format!("Here are restaurants with ratings below {rating_threshold}:")
            };
            let filtered = ResultSet::Restaurants(kept);
            let mut cache = persisted.clone();
            cache.last_results = Some(filtered.clone());
            cache.last_intent = Some(Intent::Restaurant);
            return Some(FilterOutcome {
                response: ChatResponse::results(
                    Intent::Restaurant,
                    slots.clone(),
                    filtered,
                    Some(message),
                ),
                cache_update: Some(cache),
            });
        }
    }

    if let Some(threshold) = threshold {
        match (last_intent, last_results) {
            (Intent::Flight, ResultSet::Flights(flights)) => {
                let kept: Vec<_> = flights
                    .iter()
                    .filter(|f| f.price <= threshold)
                    .cloned()
                    .collect();
                tracing::debug!(kept = kept.len(), threshold, "Applied flight price filter");

                let cache = SlotContext {
                    origin: slots.origin.clone(),
                    destination: slots.destination.clone(),
                    date: slots.date.clone(),
                    max_price: Some(threshold),
                    last_intent: Some(Intent::Flight),
                    last_results: Some(ResultSet::Flights(kept.clone())),
                    ..Default::default()
                };
                let response = if kept.is_empty() {
                    ChatResponse::no_match(
                        Intent::Flight,
                        slots.clone(),
                        ResultSet::Flights(kept),
                        format!(
                            "I couldn't find any flights under ₹{threshold}. Would you like \
                             to try a higher budget?"
                        ),
                    )
                } else {
                    ChatResponse::results(
                        Intent::Flight,
                        slots.clone(),
                        ResultSet::Flights(kept),
                        Some(format!("Here are flights under ₹{threshold}:")),
                    )
                };
                return Some(FilterOutcome { response, cache_update: Some(cache) });
            }
            (Intent::Hotel, ResultSet::Hotels(hotels)) => {
                let kept: Vec<_> = hotels
                    .iter()
                    .filter(|h| h.room_price <= threshold)
                    .cloned()
                    .collect();
                tracing::debug!(kept = kept.len(), threshold, "Applied hotel price filter");

                let cache = SlotContext {
                    city: slots.city.clone(),
                    max_price: Some(threshold),
                    last_intent: Some(Intent::Hotel),
                    last_results: Some(ResultSet::Hotels(kept.clone())),
                    ..Default::default()
                };
                let response = if kept.is_empty() {
                    ChatResponse::no_match(
                        Intent::Hotel,
                        slots.clone(),
                        ResultSet::Hotels(kept),
                        format!(
                            "I couldn't find any hotels under ₹{threshold}. Would you like \
                             to try a higher budget?"
                        ),
                    )
                } else {
                    ChatResponse::results(
                        Intent::Hotel,
                        slots.clone(),
                        ResultSet::Hotels(kept),
                        Some(format!("Here are hotels under ₹{threshold}:")),
                    )
                };
                return Some(FilterOutcome { response, cache_update: Some(cache) });
            }
            (Intent::Restaurant, ResultSet::Restaurants(restaurants)) if !rating_filter => {
                let tier = ((threshold / 1000.0).ceil() as usize).min(config.price_tier_cap);
                let symbols = "$".repeat(tier);
                let kept: Vec<_> = restaurants
                    .iter()
                    .filter(|r| r.price_range.len() <= tier)
                    .cloned()
                    .collect();
                tracing::debug!(kept = kept.len(), tier, "Applied restaurant tier filter");

                let cache = SlotContext {
                    city: slots.city.clone(),
                    cuisine: slots.cuisine.clone(),
                    max_price: Some(threshold),
                    last_intent: Some(Intent::Restaurant),
                    last_results: Some(ResultSet::Restaurants(kept.clone())),
                    ..Default::default()
                };
                let response = if kept.is_empty() {
                    ChatResponse::no_match(
                        Intent::Restaurant,
                        slots.clone(),
                        ResultSet::Restaurants(kept),
                        format!(
                            "I couldn't find any restaurants within your budget of \
                             ₹{threshold}. Would you like to try a higher price range?"
                        ),
                    )
                } else {
                    ChatResponse::results(
                        Intent::Restaurant,
                        slots.clone(),
                        ResultSet::Restaurants(kept),
                        Some(format!(
                            "Here are restaurants with price range {symbols} or less \
                             (under ₹{threshold}):"
                        )),
                    )
                };
                return Some(FilterOutcome { response, cache_update: Some(cache) });
            }
            _ => {}
        }

        // A threshold with no matching remembered results: ask which
        // domain to apply it to, specialised by the current turn's slots.
        let message = if current.city.is_some() && intent == Intent::Filter {
            format!("I can help you find hotels under ₹{threshold}. In which city are you looking to stay?")
        } else if current.origin.is_some() || current.destination.is_some() {
            format!(
                "I can help you find flights under ₹{threshold}. Please let me know your \
                 departure city, destination, and travel date."
            )
        } else {
            format!(
                "I can help you find options under ₹{threshold}. Are you looking for \
                 flights, hotels, or restaurants?"
            )
        };
        return Some(FilterOutcome {
            response: ChatResponse::message(Intent::Unknown, slots.clone(), message),
            cache_update: None,
        });
    }

    None
}
