//! Deterministic inventory generator
//!
//! Builds a plausible flight/hotel/restaurant inventory from a fixed RNG
//! seed so tests and demos see the same data on every run.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use travel_chat_core::{Flight, Hotel, Restaurant};

use crate::results::MemoryResultStore;

const CITIES: &[&str] = &[
    "Delhi", "Mumbai", "Bangalore", "Chennai", "Kolkata", "Hyderabad", "Pune",
    "Jaipur", "Ahmedabad", "Goa",
];

const AIRLINES: &[(&str, &str)] = &[
    ("IndiGo", "6E-"),
    ("Air India", "AI-"),
    ("SpiceJet", "SG-"),
    ("Vistara", "UK-"),
    ("AirAsia", "I5-"),
];

const HOTEL_NAMES: &[&str] = &[
    "Grand", "Royal", "Imperial", "Sunset", "Ocean", "Majestic", "Luxury",
    "Elite", "Paradise", "Golden",
];

const HOTEL_SUFFIXES: &[&str] = &[
    "Hotel", "Resort", "Suites", "Inn", "Plaza", "Palace", "Residency",
    "Towers", "Heights",
];

const CUISINES: &[&str] = &[
    "North Indian", "South Indian", "Chinese", "Italian", "Continental",
    "Japanese", "Mexican", "Thai", "Mediterranean", "Bengali", "Punjabi",
    "Coastal", "Mughlai",
];

const RESTAURANT_PREFIXES: &[&str] = &[
    "The", "Royal", "Spice", "Golden", "Blue", "Green", "Red", "Silver",
    "Urban", "Metro",
];

const RESTAURANT_SUFFIXES: &[&str] = &[
    "Kitchen", "Bistro", "Cafe", "Restaurant", "Diner", "Eatery", "Grill",
    "Brasserie", "Dining", "Lounge",
];

/// Shape of the generated inventory.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub rng_seed: u64,
    /// First calendar day flights are scheduled on.
    pub start_date: NaiveDate,
    pub days: u32,
    pub flights_per_route_per_day: u32,
    pub hotels_per_city: u32,
    pub restaurants_per_city: u32,
}

impl SeedConfig {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            rng_seed: 42,
            start_date,
            days: 14,
            flights_per_route_per_day: 5,
            hotels_per_city: 10,
            restaurants_per_city: 10,
        }
    }

    /// A small inventory for tests: 3 days, 2 flights per route per day.
    pub fn compact(start_date: NaiveDate) -> Self {
        Self {
            days: 3,
            flights_per_route_per_day: 2,
            hotels_per_city: 4,
            restaurants_per_city: 4,
            ..Self::new(start_date)
        }
    }
}

fn clock_label(minutes_from_midnight: u32) -> String {
    let hour24 = (minutes_from_midnight / 60) % 24;
    let minute = minutes_from_midnight % 60;
    let (hour12, suffix) = match hour24 {
        0 => (12, "AM"),
        1..=11 => (hour24, "AM"),
        12 => (12, "PM"),
        _ => (hour24 - 12, "PM"),
    };
    format!("{hour12}:{minute:02} {suffix}")
}

fn generate_flights(config: &SeedConfig, rng: &mut StdRng) -> Vec<Flight> {
    let mut flights = Vec::new();
    let mut flight_number = 1000u32;
    for day in 0..config.days {
        let date = config.start_date + Duration::days(day as i64);
        for source in CITIES {
            for destination in CITIES.iter().filter(|city| *city != source) {
                for i in 0..config.flights_per_route_per_day {
                    // Airlines rotate per slot rather than at random.
                    let (airline, prefix) = AIRLINES[i as usize % AIRLINES.len()];
                    let departure = rng.gen_range(0..24) * 60 + [0u32, 15, 30, 45][rng.gen_range(0..4)];
                    let duration_minutes = rng.gen_range(60..300);
                    flights.push(Flight {
                        id: format!("flight-{flight_number}"),
                        flight_name: airline.to_string(),
                        flight_number: format!("{prefix}{flight_number}"),
                        source: source.to_string(),
                        destination: destination.to_string(),
                        departure_time: clock_label(departure),
                        arrival_time: clock_label(departure + duration_minutes),
                        duration: format!("{:.1} hrs", duration_minutes as f64 / 60.0),
                        date,
                        price: rng.gen_range(3000.0..15000.0f64).round(),
                    });
                    flight_number += 1;
                }
            }
        }
    }
    flights
}

fn generate_hotels(config: &SeedConfig, rng: &mut StdRng) -> Vec<Hotel> {
    let mut hotels = Vec::new();
    let mut serial = 0u32;
    for city in CITIES {
        for _ in 0..config.hotels_per_city {
            serial += 1;
            let name = HOTEL_NAMES[rng.gen_range(0..HOTEL_NAMES.len())];
            let suffix = HOTEL_SUFFIXES[rng.gen_range(0..HOTEL_SUFFIXES.len())];
            hotels.push(Hotel {
                id: format!("hotel-{serial}"),
                name: format!("{name} {suffix}"),
                city: city.to_string(),
                stars: rng.gen_range(3..=5),
                room_price: rng.gen_range(2000.0..20000.0f64).round(),
                availability: rng.gen_bool(0.8),
            });
        }
    }
    hotels
}

fn generate_restaurants(config: &SeedConfig, rng: &mut StdRng) -> Vec<Restaurant> {
    let mut restaurants = Vec::new();
    let mut serial = 0u32;
    for city in CITIES {
        for _ in 0..config.restaurants_per_city {
            serial += 1;
            let prefix = RESTAURANT_PREFIXES[rng.gen_range(0..RESTAURANT_PREFIXES.len())];
            let suffix = RESTAURANT_SUFFIXES[rng.gen_range(0..RESTAURANT_SUFFIXES.len())];
            let tier = rng.gen_range(1..=4usize);
            restaurants.push(Restaurant {
                id: format!("restaurant-{serial}"),
                name: format!("{prefix} {suffix}"),
                location: city.to_string(),
                cuisine: CUISINES[rng.gen_range(0..CUISINES.len())].to_string(),
                rating: (rng.gen_range(3.0..5.0f64) * 10.0).round() / 10.0,
                price_range: "$".repeat(tier),
            });
        }
    }
    restaurants
}

/// Build a fully populated [`MemoryResultStore`] from a seed config.
pub fn seed_inventory(config: &SeedConfig) -> MemoryResultStore {
    let mut rng = StdRng::seed_from_u64(config.rng_seed);
    let flights = generate_flights(config, &mut rng);
    let hotels = generate_hotels(config, &mut rng);
    let restaurants = generate_restaurants(config, &mut rng);
    tracing::info!(
        flights = flights.len(),
        hotels = hotels.len(),
        restaurants = restaurants.len(),
        "Seeded inventory"
    );
    MemoryResultStore::new(flights, hotels, restaurants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_chat_core::ResultStore;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
    }

    #[test]
    fn test_seed_is_deterministic() {
        let config = SeedConfig::compact(start());
        let a = seed_inventory(&config);
        let b = seed_inventory(&config);
        assert_eq!(a.flight_count(), b.flight_count());
    }

    #[test]
    fn test_flight_volume_matches_config() {
        let config = SeedConfig::compact(start());
        let store = seed_inventory(&config);
        // 10 cities, 9 destinations each, days * flights_per_route_per_day.
        let expected = 10 * 9 * config.days * config.flights_per_route_per_day;
        assert_eq!(store.flight_count(), expected as usize);
    }

    #[tokio::test]
    async fn test_every_route_is_served() {
        let store = seed_inventory(&SeedConfig::compact(start()));
        let flights = store.flights_by_route("delhi", "goa").await.unwrap();
        assert!(!flights.is_empty());
        assert!(flights.iter().all(|f| (3000.0..=15000.0).contains(&f.price)));
    }

    #[tokio::test]
    async fn test_hotels_and_restaurants_per_city() {
        let config = SeedConfig::compact(start());
        let store = seed_inventory(&config);
        let hotels = store.hotels_in_city("jaipur", None).await.unwrap();
        assert_eq!(hotels.len(), config.hotels_per_city as usize);
        let restaurants = store.restaurants_in_city("jaipur", None).await.unwrap();
        assert_eq!(restaurants.len(), config.restaurants_per_city as usize);
    }
}
