//! Domain result records returned by the result store
//!
//! The core does not own the storage schema; these are the record shapes
//! it consumes when filtering and re-filtering result sets.

use crate::intent::Intent;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scheduled flight on a specific calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub flight_name: String,
    pub flight_number: String,
    pub source: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub date: NaiveDate,
    pub price: f64,
}

/// A hotel listing in a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub city: String,
    pub stars: u8,
    pub room_price: f64,
    pub availability: bool,
}

/// A restaurant listing.
///
/// `price_range` is a tier symbol string (`$` through `$$$$`); its length
/// is the tier used for price filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub location: String,
    pub cuisine: String,
    pub rating: f64,
    pub price_range: String,
}

/// An ordered sequence of prior results, carried in conversation context
/// so that filter turns can re-narrow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "records", rename_all = "snake_case")]
pub enum ResultSet {
    Flights(Vec<Flight>),
    Hotels(Vec<Hotel>),
    Restaurants(Vec<Restaurant>),
}

impl ResultSet {
    pub fn len(&self) -> usize {
        match self {
            ResultSet::Flights(v) => v.len(),
            ResultSet::Hotels(v) => v.len(),
            ResultSet::Restaurants(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The domain intent this result set belongs to.
    pub fn intent(&self) -> Intent {
        match self {
            ResultSet::Flights(_) => Intent::Flight,
            ResultSet::Hotels(_) => Intent::Hotel,
            ResultSet::Restaurants(_) => Intent::Restaurant,
        }
    }
}
