//! Intent classification by keyword/pattern precedence

use once_cell::sync::Lazy;
use regex::Regex;
use travel_chat_core::Intent;

const FLIGHT_KEYWORDS: &[&str] = &["flight", "airline", "airways", "airport"];

const HOTEL_KEYWORDS: &[&str] = &["hotel", "room", "stay", "accommodation", "lodge", "resort"];

const RESTAURANT_KEYWORDS: &[&str] = &[
    "restaurant",
    // common misspellings
    "restaurent",
    "restauraunt",
    "restuarant",
    "food",
    "eat",
    "dining",
    "cuisine",
    "dinner",
    "lunch",
    "breakfast",
];

// "from ... to ..." or bare "X to Y" phrasing is highly distinctive of
// route requests, so flight is checked first even without a flight keyword.
static ROUTE_KEYWORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(from|to)\b.*\b(from|to)\b").unwrap());
static CITY_TO_CITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]+\s+to\s+[a-z]+\b").unwrap());

static RESTAURANT_LISTING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(show|list|find|get|suggest)\s+.*(restaurants?|places?|food|dining)\b").unwrap());

/// Map a raw utterance to an intent. Pure, case-insensitive, first match
/// wins in the order flight → hotel → restaurant → unknown.
pub fn classify(utterance: &str) -> Intent {
    let lower = utterance.to_lowercase();

    if FLIGHT_KEYWORDS.iter().any(|kw| lower.contains(kw))
        || ROUTE_KEYWORDS.is_match(&lower)
        || CITY_TO_CITY.is_match(&lower)
    {
        tracing::debug!(intent = "flight", "Intent classified");
        return Intent::Flight;
    }

    if HOTEL_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        tracing::debug!(intent = "hotel", "Intent classified");
        return Intent::Hotel;
    }

    if RESTAURANT_KEYWORDS.iter().any(|kw| lower.contains(kw))
        || RESTAURANT_LISTING.is_match(&lower)
        || (lower.contains("list")
            && (lower.contains("place") || lower.contains("places") || lower.contains("restaurants")))
    {
        tracing::debug!(intent = "restaurant", "Intent classified");
        return Intent::Restaurant;
    }

    tracing::debug!(intent = "unknown", "Intent classified");
    Intent::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_keywords() {
        assert_eq!(classify("flights from Delhi to Mumbai tomorrow"), Intent::Flight);
        assert_eq!(classify("which airlines fly direct"), Intent::Flight);
        assert_eq!(classify("nearest airport please"), Intent::Flight);
    }

    #[test]
    fn test_route_pattern_without_flight_keyword() {
        assert_eq!(classify("delhi to mumbai"), Intent::Flight);
        assert_eq!(classify("I want to go from pune to goa"), Intent::Flight);
    }

    #[test]
    fn test_hotel_keywords() {
        assert_eq!(classify("find hotels in Jaipur"), Intent::Hotel);
        assert_eq!(classify("I need a resort with a pool"), Intent::Hotel);
        assert_eq!(classify("somewhere nice for my overnight accommodation"), Intent::Hotel);
    }

    #[test]
    fn test_restaurant_keywords_and_misspellings() {
        assert_eq!(classify("list vegetarian restaurants in Delhi"), Intent::Restaurant);
        assert_eq!(classify("best restaurent nearby"), Intent::Restaurant);
        assert_eq!(classify("where should I have dinner"), Intent::Restaurant);
        assert_eq!(classify("suggest some places for dining"), Intent::Restaurant);
    }

    #[test]
    fn test_flight_beats_restaurant_on_route_phrasing() {
        // "breakfast" is a restaurant cue, but the route pattern wins.
        assert_eq!(classify("from goa to pune after breakfast"), Intent::Flight);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify("what is 2+2"), Intent::Unknown);
        assert_eq!(classify("hello"), Intent::Unknown);
    }
}
