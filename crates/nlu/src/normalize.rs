//! City and cuisine name normalization
//!
//! Single consolidation point for the alias/misspelling table; every
//! extracted city value passes through here before it reaches the
//! merger or a store query.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Known misspellings and aliases mapped to canonical city names.
static CITY_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("banaglore", "bangalore"),
        ("banglore", "bangalore"),
        ("bengaluru", "bangalore"),
        ("bangalroe", "bangalore"),
        ("bangloe", "bangalore"),
        ("bombay", "mumbai"),
        ("mubai", "mumbai"),
        ("calcutta", "kolkata"),
        ("madras", "chennai"),
        ("chenai", "chennai"),
        ("dilli", "delhi"),
        ("newdelhi", "delhi"),
        ("new delhi", "delhi"),
        ("deli", "delhi"),
        ("dilhi", "delhi"),
        ("hydrabad", "hyderabad"),
        ("hiderabad", "hyderabad"),
    ])
});

/// Lower-case, trim, and substitute known aliases/misspellings.
/// Unknown names pass through unchanged. Idempotent.
pub fn normalize_city(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    match CITY_ALIASES.get(lowered.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => lowered,
    }
}

/// Lower-case and trim a cuisine name. The cuisine vocabulary itself is
/// already canonical, so no alias table is needed here.
pub fn normalize_cuisine(name: &str) -> String {
    name.trim().to_lowercase()
}
