//! Slot extraction
//!
//! Pulls structured slots (city, route, price ceiling, cuisine, date)
//! out of a single utterance. Extraction is regex- and vocabulary-driven
//! and never fails; any slot that cannot be found is simply left unset.
//! Probes are independent: a route mention and a city mention in the
//! same utterance both land in the context.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use travel_chat_core::SlotContext;

use crate::dates::resolve_date;
use crate::normalize::{normalize_city, normalize_cuisine};

static IN_CITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:in|at|for|near)\s+([a-z\s]+?)(?:\s|$|,|\.)").unwrap()
});

// Listing phrasings put the city after the object noun; when one
// matches it overrides whatever the plain city probe found.
static LISTING_CITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:list|show|find|suggest)\s+(?:me\s+)?(?:restaurants?|restaurents|restuarants|restauraunts|places?|food)\s+(?:in|at|for|near)\s+([a-z\s]+?)(?:\s|$|,|\.)",
    )
    .unwrap()
});

static ROUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"from\s+([a-z\s]+?)\s+to\s+([a-z\s]+?)(?:\s|$|,|\.)").unwrap()
});

static ORIGIN_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:flights|flight)\s+from\s+([a-z\s]+?)(?:\s|$|,|\.)").unwrap()
});

static MAX_PRICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:under|less than|below|max|maximum|up to|not more than)\s+(?:rs\.?|inr|₹)?\s*(\d+)")
        .unwrap()
});

/// Ordered cuisine vocabulary; the first entry contained in the
/// utterance wins.
const CUISINES: &[&str] = &[
    "italian", "chinese", "indian", "mexican", "thai", "japanese",
    "mediterranean", "french", "spanish", "american", "greek", "turkish",
    "lebanese", "korean", "vietnamese", "german", "brazilian", "argentine",
    "african", "caribbean", "british", "russian", "middle eastern",
    "north indian", "south indian", "bengali", "punjabi", "gujarati",
    "maharashtrian", "goan", "kerala", "mughlai", "rajasthani", "andhra",
    "chettinad", "hyderabadi", "kashmiri", "awadhi", "biryani", "kebab",
    "tandoor", "vegetarian", "vegan", "seafood", "steakhouse", "barbecue",
    "sushi", "pizza", "burger", "fast food", "fine dining", "buffet",
    "street food", "deli", "bakery", "cafe", "bistro", "pub", "bar",
    "lounge", "fusion",
];

/// Extract every recognisable slot from `utterance`.
pub fn extract_slots(utterance: &str, today: NaiveDate) -> SlotContext {
    let lower = utterance.trim().to_lowercase();
    let mut slots = SlotContext::default();

    if let Some(caps) = IN_CITY.captures(&lower) {
        slots.city = Some(normalize_city(caps[1].trim()));
    }
    if let Some(caps) = LISTING_CITY.captures(&lower) {
        slots.city = Some(normalize_city(caps[1].trim()));
    }

    if let Some(caps) = ROUTE.captures(&lower) {
        slots.origin = Some(normalize_city(caps[1].trim()));
        slots.destination = Some(normalize_city(caps[2].trim()));
    }
    if slots.origin.is_none() {
        if let Some(caps) = ORIGIN_ONLY.captures(&lower) {
            slots.origin = Some(normalize_city(caps[1].trim()));
        }
    }

    if let Some(caps) = MAX_PRICE.captures(&lower) {
        slots.max_price = caps[1].parse::<f64>().ok();
    }

    for cuisine in CUISINES {
        if lower.contains(cuisine) {
            slots.cuisine = Some(normalize_cuisine(cuisine));
            break;
        }
    }

    if let Some(date) = resolve_date(&lower, today) {
        slots.date = Some(date.format("%Y-%m-%d").to_string());
    }

    if !slots.is_empty() {
        tracing::debug!(?slots, "Extracted slots");
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    #[test]
    fn test_route_extraction() {
        let slots = extract_slots("flights from Delhi to Mumbai", today());
        assert_eq!(slots.origin.as_deref(), Some("delhi"));
        assert_eq!(slots.destination.as_deref(), Some("mumbai"));
        assert!(slots.city.is_none());
    }

    #[test]
    fn test_route_with_alias_normalisation() {
        let slots = extract_slots("from bombay to banglore", today());
        assert_eq!(slots.origin.as_deref(), Some("mumbai"));
        assert_eq!(slots.destination.as_deref(), Some("bangalore"));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let a = extract_slots("flights from bangalore to mumbai", today());
        let b = extract_slots("flights from bangalore to mumbai", today());
        assert_eq!(a, b);
        assert_eq!(a.origin.as_deref(), Some("bangalore"));
    }

    #[test]
    fn test_origin_only() {
        let slots = extract_slots("flights from pune", today());
        assert_eq!(slots.origin.as_deref(), Some("pune"));
        assert!(slots.destination.is_none());
    }

    #[test]
    fn test_city_probe() {
        let slots = extract_slots("hotels in goa", today());
        assert_eq!(slots.city.as_deref(), Some("goa"));
        assert!(slots.origin.is_none());
    }

    #[test]
    fn test_listing_pattern_overrides_city_probe() {
        let slots = extract_slots("show me restaurants near indiranagar", today());
        assert_eq!(slots.city.as_deref(), Some("indiranagar"));
    }

    #[test]
    fn test_cuisine_first_match_in_vocabulary_order() {
        // "indian" precedes "south indian" in the vocabulary.
        let slots = extract_slots("south indian restaurants in chennai", today());
        assert_eq!(slots.cuisine.as_deref(), Some("indian"));
        assert_eq!(slots.city.as_deref(), Some("chennai"));
    }

    #[test]
    fn test_single_word_cuisine() {
        let slots = extract_slots("any good italian place", today());
        assert_eq!(slots.cuisine.as_deref(), Some("italian"));
    }

    #[test]
    fn test_max_price() {
        let slots = extract_slots("flights under rs. 5000", today());
        assert_eq!(slots.max_price, Some(5000.0));
        let slots = extract_slots("rooms not more than ₹3000", today());
        assert_eq!(slots.max_price, Some(3000.0));
    }

    #[test]
    fn test_date_slot() {
        let slots = extract_slots("flights from delhi to goa tomorrow", today());
        assert_eq!(slots.date.as_deref(), Some("2025-03-13"));
    }

    #[test]
    fn test_empty_utterance_yields_empty_slots() {
        let slots = extract_slots("hello there", today());
        assert!(slots.is_empty());
    }
}
