//! The closed intent tag set

use serde::{Deserialize, Serialize};

/// Coarse category of what the user wants from a turn.
///
/// Computed fresh each turn by the classifier, then possibly overridden
/// by the context merger (continuation rules, filter detection,
/// route-change reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    /// Flight search
    Flight,
    /// Hotel search
    Hotel,
    /// Restaurant search
    Restaurant,
    /// Narrowing of a previously returned result set
    Filter,
    /// No travel intent recognized
    #[default]
    Unknown,
    /// Prompt rejected by the off-topic gate
    OffTopic,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Flight => "flight",
            Intent::Hotel => "hotel",
            Intent::Restaurant => "restaurant",
            Intent::Filter => "filter",
            Intent::Unknown => "unknown",
            Intent::OffTopic => "off-topic",
        }
    }

    /// Whether this intent dispatches a domain query (flight/hotel/restaurant).
    pub fn is_domain_query(&self) -> bool {
        matches!(self, Intent::Flight | Intent::Hotel | Intent::Restaurant)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
