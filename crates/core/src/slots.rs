//! Slot values and the per-conversation slot context

use crate::intent::Intent;
use crate::records::ResultSet;
use serde::{Deserialize, Serialize};

/// Structured parameters extracted from free-text utterances, plus the
/// continuation fields carried across turns.
///
/// Every field is optional: a missing slot is an absence, never an error.
/// The merger's invariant is that each field of the final context holds
/// the first non-absent value across {current turn, persisted context,
/// volatile cache}, in that priority order, unless a reset rule applies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotContext {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub city: Option<String>,
    pub max_price: Option<f64>,
    pub cuisine: Option<String>,
    pub date: Option<String>,
    /// Intent of the most recent actionable turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_intent: Option<Intent>,
    /// Result set of the most recent actionable turn, kept for filter
    /// continuations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_results: Option<ResultSet>,
}

fn first_of<T: Clone>(a: &Option<T>, b: &Option<T>, c: &Option<T>) -> Option<T> {
    a.as_ref().or(b.as_ref()).or(c.as_ref()).cloned()
}

impl SlotContext {
    /// Per-field merge: first non-absent value of
    /// {current, persisted, cached}, each field independently.
    pub fn merged(current: &SlotContext, persisted: &SlotContext, cached: &SlotContext) -> SlotContext {
        SlotContext {
            origin: first_of(&current.origin, &persisted.origin, &cached.origin),
            destination: first_of(&current.destination, &persisted.destination, &cached.destination),
            city: first_of(&current.city, &persisted.city, &cached.city),
            max_price: first_of(&current.max_price, &persisted.max_price, &cached.max_price),
            cuisine: first_of(&current.cuisine, &persisted.cuisine, &cached.cuisine),
            date: first_of(&current.date, &persisted.date, &cached.date),
            last_intent: persisted.last_intent.or(cached.last_intent),
            last_results: persisted
                .last_results
                .as_ref()
                .or(cached.last_results.as_ref())
                .cloned(),
        }
    }

    /// Whether both endpoints of a flight route are present.
    pub fn has_route(&self) -> bool {
        self.origin.is_some() && self.destination.is_some()
    }

    /// Whether no slot of any kind was extracted.
    pub fn is_empty(&self) -> bool {
        self.origin.is_none()
            && self.destination.is_none()
            && self.city.is_none()
            && self.max_price.is_none()
            && self.cuisine.is_none()
            && self.date.is_none()
    }
}

/// Serialized envelope persisted with each durable-log turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnMetadata {
    pub slots: SlotContext,
    pub intent: Intent,
}

impl TurnMetadata {
    pub fn new(slots: SlotContext, intent: Intent) -> Self {
        Self { slots, intent }
    }

    /// Serialize for storage. Falls back to an empty envelope if the
    /// context cannot be encoded, so a logging turn never fails.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Lenient parse: empty, `{}`, or malformed metadata is treated as
    /// no prior context, never as an error.
    pub fn parse(raw: &str) -> Option<TurnMetadata> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "{}" {
            return None;
        }
        match serde_json::from_str::<TurnMetadata>(trimmed) {
            Ok(meta) => Some(meta),
            Err(err) => {
                tracing::debug!(error = %err, "Discarding malformed turn metadata");
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(origin: Option<&str>, destination: Option<&str>) -> SlotContext {
        SlotContext {
            origin: origin.map(String::from),
            destination: destination.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_prefers_current_then_persisted_then_cached() {
        let current = ctx(Some("delhi"), None);
        let mut persisted = ctx(None, Some("mumbai"));
        persisted.city = Some("jaipur".into());
        let mut cached = ctx(Some("pune"), Some("pune"));
        cached.city = Some("goa".into());
        cached.max_price = Some(5000.0);

        let merged = SlotContext::merged(&current, &persisted, &cached);
        assert_eq!(merged.origin.as_deref(), Some("delhi"));
        assert_eq!(merged.destination.as_deref(), Some("mumbai"));
        assert_eq!(merged.city.as_deref(), Some("jaipur"));
        assert_eq!(merged.max_price, Some(5000.0));
    }

    #[test]
    fn test_merge_falls_through_to_cache() {
        let current = SlotContext::default();
        let persisted = SlotContext::default();
        let cached = ctx(Some("chennai"), Some("kolkata"));

        let merged = SlotContext::merged(&current, &persisted, &cached);
        assert_eq!(merged.origin.as_deref(), Some("chennai"));
        assert_eq!(merged.destination.as_deref(), Some("kolkata"));
    }

    #[test]
    fn test_metadata_round_trip() {
        let meta = TurnMetadata::new(ctx(Some("delhi"), Some("mumbai")), Intent::Flight);
        let json = meta.to_json();
        let back = TurnMetadata::parse(&json).unwrap();
        assert_eq!(back, meta);
    }

    #[test]
    fn test_metadata_lenient_parse() {
        assert!(TurnMetadata::parse("").is_none());
        assert!(TurnMetadata::parse("{}").is_none());
        assert!(TurnMetadata::parse("not json at all").is_none());
        assert!(TurnMetadata::parse("{\"slots\": 42}").is_none());
    }

    #[test]
    fn test_slot_context_camel_case_wire_format() {
        let mut slots = SlotContext::default();
        slots.max_price = Some(3000.0);
        let json = serde_json::to_string(&slots).unwrap();
        assert!(json.contains("\"maxPrice\":3000.0"));
    }
}
