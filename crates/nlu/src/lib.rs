//! Rule-based natural-language analysis for travel queries
//!
//! Pattern and heuristic based by design: a fixed slot vocabulary and a
//! closed intent set for a single domain, no ML. Every function here is
//! pure and total — a miss is an absent value, never an error.
//!
//! - [`classify`] maps an utterance to an [`Intent`] by keyword/pattern
//!   precedence
//! - [`extract_slots`] probes an utterance for origin/destination, city,
//!   max price, cuisine, and date, independently of intent
//! - [`resolve_date`] runs the ordered date-resolution cascade
//! - [`normalize_city`] / [`normalize_cuisine`] canonicalize noisy names
//! - [`is_off_topic`] gates non-travel prompts before classification

pub mod classify;
pub mod dates;
pub mod extract;
pub mod normalize;
pub mod offtopic;

pub use classify::classify;
pub use dates::resolve_date;
pub use extract::extract_slots;
pub use normalize::{normalize_city, normalize_cuisine};
pub use offtopic::is_off_topic;

pub use travel_chat_core::Intent;
