//! Per-turn response envelope emitted by the engine

use crate::intent::Intent;
use crate::records::ResultSet;
use crate::slots::SlotContext;
use serde::{Deserialize, Serialize};

/// What the engine hands back to its caller for one turn.
///
/// `results` is present only on successful domain queries. `fallback`
/// signals a degraded or no-match response that still carries a
/// human-readable suggestion; `error` additionally marks a collaborator
/// failure that was caught at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub intent: Intent,
    pub slots: SlotContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultSet>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl ChatResponse {
    /// A plain conversational message (clarifying question, redirect).
    pub fn message(intent: Intent, slots: SlotContext, message: impl Into<String>) -> Self {
        Self {
            intent,
            slots,
            message: Some(message.into()),
            results: None,
            fallback: false,
            error: false,
        }
    }

    /// A successful domain query with results.
    pub fn results(
        intent: Intent,
        slots: SlotContext,
        results: ResultSet,
        message: Option<String>,
    ) -> Self {
        Self {
            intent,
            slots,
            message,
            results: Some(results),
            fallback: false,
            error: false,
        }
    }

    /// A valid query that found nothing: empty results plus a
    /// suggestion message.
    pub fn no_match(intent: Intent, slots: SlotContext, results: ResultSet, message: impl Into<String>) -> Self {
        Self {
            intent,
            slots,
            message: Some(message.into()),
            results: Some(results),
            fallback: true,
            error: false,
        }
    }

    /// A collaborator failure degraded to a conversational apology.
    pub fn degraded(intent: Intent, slots: SlotContext, results: ResultSet, message: impl Into<String>) -> Self {
        Self {
            intent,
            slots,
            message: Some(message.into()),
            results: Some(results),
            fallback: true,
            error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_omitted_when_clear() {
        let resp = ChatResponse::message(Intent::Hotel, SlotContext::default(), "Which city?");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("fallback"));
        assert!(!json.contains("error"));
        assert!(!json.contains("results"));
    }

    #[test]
    fn test_degraded_sets_both_flags() {
        let resp = ChatResponse::degraded(
            Intent::Flight,
            SlotContext::default(),
            ResultSet::Flights(vec![]),
            "Sorry, something went wrong.",
        );
        assert!(resp.fallback);
        assert!(resp.error);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"fallback\":true"));
        assert!(json.contains("\"error\":true"));
    }
}
