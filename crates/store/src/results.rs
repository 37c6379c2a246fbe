//! In-memory inventory backend

use async_trait::async_trait;
use travel_chat_core::{Flight, Hotel, Restaurant, Result, ResultStore};

/// Immutable inventory of flights, hotels and restaurants.
///
/// All lookups are case-insensitive; city matches are substring matches
/// so "navi mumbai" is found by "mumbai".
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    flights: Vec<Flight>,
    hotels: Vec<Hotel>,
    restaurants: Vec<Restaurant>,
}

impl MemoryResultStore {
    pub fn new(flights: Vec<Flight>, hotels: Vec<Hotel>, restaurants: Vec<Restaurant>) -> Self {
        Self { flights, hotels, restaurants }
    }

    pub fn flight_count(&self) -> usize {
        self.flights.len()
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn flights_by_route(&self, source: &str, destination: &str) -> Result<Vec<Flight>> {
        let source = source.to_lowercase();
        let destination = destination.to_lowercase();
        Ok(self
            .flights
            .iter()
            .filter(|f| {
                f.source.to_lowercase() == source && f.destination.to_lowercase() == destination
            })
            .cloned()
            .collect())
    }

    async fn destinations_from(&self, source: &str, limit: usize) -> Result<Vec<String>> {
        let source = source.to_lowercase();
        let mut destinations = Vec::new();
        for flight in self.flights.iter().filter(|f| f.source.to_lowercase() == source) {
            if !destinations.contains(&flight.destination) {
                destinations.push(flight.destination.clone());
                if destinations.len() == limit {
                    break;
                }
            }
        }
        Ok(destinations)
    }

    async fn hotels_in_city(&self, city: &str, max_price: Option<f64>) -> Result<Vec<Hotel>> {
        let city = city.to_lowercase();
        Ok(self
            .hotels
            .iter()
            .filter(|h| h.city.to_lowercase().contains(&city))
            .filter(|h| max_price.map_or(true, |cap| h.room_price <= cap))
            .cloned()
            .collect())
    }

    async fn restaurants_in_city(&self, city: &str, cuisine: Option<&str>) -> Result<Vec<Restaurant>> {
        let city = city.to_lowercase();
        let cuisine = cuisine.map(str::to_lowercase);
        Ok(self
            .restaurants
            .iter()
            .filter(|r| r.location.to_lowercase().contains(&city))
            .filter(|r| {
                cuisine
                    .as_deref()
                    .map_or(true, |c| r.cuisine.to_lowercase().contains(c))
            })
            .cloned()
            .collect())
    }
}
