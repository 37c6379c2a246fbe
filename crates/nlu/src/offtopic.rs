//! Vocabulary-based off-topic gate
//!
//! Checked before classification. The filter is deliberately biased
//! toward false negatives: ambiguous input stays on-topic so that short
//! follow-up turns ("tomorrow", "under 5000") are never blocked.

pub(crate) const TRAVEL_TERMS: &[&str] = &[
    "travel", "trip", "vacation", "visit", "tour", "flight", "hotel",
    "restaurant", "accommodation", "food", "destination", "city",
    "airport", "booking", "holiday", "journey", "itinerary", "ticket",
    "sightseeing", "tourist", "tourism", "resort", "beach", "mountain",
    "cruise", "train", "bus", "taxi", "car rental", "luggage", "passport",
    "visa", "international", "domestic", "check-in", "check-out", "lodging",
    "breakfast", "lunch", "dinner", "cafe", "dining", "cuisine", "reservation",
    "attractions", "landmark", "museum", "gallery", "park", "hiking", "adventure",
    "backpacking", "airbnb", "motel", "hostel", "inn", "departure", "arrival",
];

pub(crate) const LOCATION_TERMS: &[&str] = &[
    "delhi", "mumbai", "bangalore", "kolkata", "chennai", "hyderabad",
    "ahmedabad", "pune", "jaipur", "lucknow", "kanpur", "nagpur", "indore",
    "thane", "bhopal", "visakhapatnam", "patna", "vadodara", "ghaziabad",
    "ludhiana", "agra", "nashik", "faridabad", "meerut", "rajkot", "kalyan",
    "varanasi", "srinagar", "aurangabad", "dhanbad", "amritsar", "navi",
    "allahabad", "ranchi", "haora", "coimbatore", "jabalpur", "gwalior",
    "vijayawada", "jodhpur", "madurai", "raipur", "kota", "guwahati",
    "chandigarh", "solapur", "hubli", "dharwad", "bareilly", "moradabad",
    "mysore", "gurgaon", "aligarh", "jalandhar", "tiruchirappalli", "bhubaneswar",
    "salem", "mira", "thiruvananthapuram", "bhiwandi", "saharanpur", "gorakhpur",
    "guntur", "bikaner", "amravati", "noida", "jamshedpur", "bhilai", "warangal",
    "mangalore", "new york", "los angeles", "chicago", "houston", "phoenix",
    "philadelphia", "san antonio", "san diego", "dallas", "san francisco",
    "austin", "seattle", "london", "paris", "tokyo", "dubai", "singapore",
    "sydney", "hong kong", "bangkok", "istanbul", "toronto", "rome", "barcelona",
];

// Order matters: city names containing "ai" (mumbai, chennai) are caught
// by the gazetteer before this list is consulted.
const OFF_TOPIC_SUBJECTS: &[&str] = &[
    "algorithm", "code", "programming", "math", "science", "politics",
    "religion", "database", "sorting", "ai", "machine learning", "complexity",
    "big o", "computation", "equation", "formula", "theorem", "notation",
    "cryptocurrency", "bitcoin", "blockchain", "homework", "assignment",
    "chemistry", "physics", "biology", "history", "economics", "psychology",
    "medicine", "philosophy", "literature", "grammar", "language model", "gpt",
];

const AMBIGUOUS_TERMS: &[&str] = &[
    "from", "to", "when", "where", "how", "much", "cost", "price", "best",
];

/// Whether a prompt should be rejected before intent classification.
///
/// Ordered checks: travel vocabulary → known locations → off-topic
/// subjects → default permissive (on-topic).
pub fn is_off_topic(prompt: &str) -> bool {
    let lower = prompt.to_lowercase();

    if TRAVEL_TERMS.iter().any(|term| lower.contains(term)) {
        return false;
    }

    if LOCATION_TERMS.iter().any(|term| lower.contains(term)) {
        return false;
    }

    if OFF_TOPIC_SUBJECTS.iter().any(|term| lower.contains(term)) {
        tracing::debug!("Prompt gated as off-topic");
        return true;
    }

    // Very short prompts made entirely of connective words ("from",
    // "to", "how much") are follow-up fragments, not new subjects.
    if prompt.split_whitespace().count() < 4 {
        let words: Vec<&str> = lower.split_whitespace().collect();
        if !words.is_empty() && words.iter().all(|w| AMBIGUOUS_TERMS.contains(w)) {
            return false;
        }
    }

    false
}
