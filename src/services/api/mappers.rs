//! Backend shapes to display shapes.
//!
//! The display model is richer than what the backend sends (tags, amenities,
//! ratings), so missing fields get fixed defaults here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::model::api::{ApiTrip, FlightOffer, HotelOffer, TripState};
use crate::model::{
    ActionKind, AgentAction, AgentState, FlightOption, FlightTag, LodgingOption, LodgingTag, Trip,
    TripStatus,
};

const SUMMARY_LIMIT: usize = 80;
const UNKNOWN_AIRPORT: &str = "???";

pub fn trip_status(state: TripState) -> TripStatus {
    match state {
        TripState::Idle | TripState::CollectingInfo | TripState::Planning => TripStatus::Planning,
        TripState::Monitoring | TripState::Recovery => TripStatus::Monitoring,
        TripState::Completed => TripStatus::Locked,
    }
}

pub fn agent_state(state: TripState) -> AgentState {
    match state {
        TripState::Idle | TripState::Completed => AgentState::Idle,
        TripState::CollectingInfo => AgentState::Initializing,
        TripState::Planning => AgentState::SearchingFlights,
        TripState::Monitoring => AgentState::Monitoring,
        TripState::Recovery => AgentState::Reoptimizing,
    }
}

/// Budget is not tracked by the backend and always maps to 0; the dashboard
/// overlays its own.
pub fn map_trip(api_trip: &ApiTrip) -> Trip {
    let c = &api_trip.constraints;
    let today = Utc::now().date_naive();
    Trip {
        id: api_trip.id.clone(),
        origin: c.from.clone().unwrap_or_else(|| UNKNOWN_AIRPORT.to_string()),
        destination: c.to.clone().unwrap_or_else(|| UNKNOWN_AIRPORT.to_string()),
        depart_date: c.depart.as_deref().and_then(parse_date).unwrap_or(today),
        return_date: c.return_date.as_deref().and_then(parse_date).unwrap_or(today),
        budget: 0.0,
        travelers: c.travelers.unwrap_or(1),
        status: trip_status(api_trip.state),
        date_flexible: false,
        preference_bias: None,
    }
}

pub fn map_flight(offer: &FlightOffer, index: usize) -> FlightOption {
    const TAGS: [FlightTag; 3] = [FlightTag::BestValue, FlightTag::Fastest, FlightTag::MostFlexible];
    FlightOption {
        id: offer.id.clone(),
        // backend sends no carrier
        airline: "Airline".to_string(),
        price: parse_price(&offer.price),
        departure: format_time(&offer.depart),
        arrival: String::new(),
        duration: String::new(),
        stops: 0,
        tag: TAGS.get(index).copied(),
        cabin: "Economy".to_string(),
        booking_class: String::new(),
        booking_url: Some(offer.booking_link.clone()),
    }
}

pub fn map_hotel(offer: &HotelOffer, index: usize) -> LodgingOption {
    const TAGS: [LodgingTag; 3] = [LodgingTag::BestValue, LodgingTag::TopRated, LodgingTag::BestLocation];
    let total = parse_price(&offer.price);
    let nights = nights_between(&offer.checkin, &offer.checkout);
    LodgingOption {
        id: offer.id.clone(),
        name: offer.name.clone(),
        price: total,
        per_night: (total / nights as f64).round(),
        rating: 0.0,
        review_count: 0,
        amenities: Vec::new(),
        tag: TAGS.get(index).copied(),
        neighborhood: offer.city.clone(),
        cancellation: String::new(),
        booking_url: Some(offer.booking_link.clone()),
    }
}

/// Flight and lodging options of the trip plan, empty without a plan.
pub fn map_options(api_trip: &ApiTrip) -> (Vec<FlightOption>, Vec<LodgingOption>) {
    match &api_trip.plan {
        Some(plan) => (
            plan.flight_options.iter().enumerate().map(|(i, o)| map_flight(o, i)).collect(),
            plan.hotel_options.iter().enumerate().map(|(i, o)| map_hotel(o, i)).collect(),
        ),
        None => (Vec::new(), Vec::new()),
    }
}

pub fn map_reasoning(reasoning: &[String]) -> Vec<AgentAction> {
    let now = Utc::now();
    reasoning
        .iter()
        .enumerate()
        .map(|(i, text)| AgentAction {
            id: format!("reason-{}", i),
            timestamp: now,
            kind: ActionKind::Compare,
            summary: summarize(text),
            detail: text.clone(),
            rationale: Vec::new(),
            sms_sent: false,
        })
        .collect()
}

pub fn map_logs(logs: &[String]) -> Vec<AgentAction> {
    let now = Utc::now();
    logs.iter()
        .enumerate()
        .map(|(i, text)| AgentAction {
            id: format!("log-{}", i),
            timestamp: now,
            kind: infer_log_kind(text),
            summary: summarize(text),
            detail: text.clone(),
            rationale: Vec::new(),
            sms_sent: text.to_lowercase().contains("sms"),
        })
        .collect()
}

pub fn infer_log_kind(text: &str) -> ActionKind {
    let lower = text.to_lowercase();
    let has = |needle: &str| lower.contains(needle);
    if has("sms") || has("message") {
        ActionKind::Sms
    } else if has("search") || has("scan") {
        ActionKind::Search
    } else if has("alert") || has("drop") {
        ActionKind::Alert
    } else if has("optim") || has("re-") {
        ActionKind::Optimize
    } else if has("monitor") {
        ActionKind::Monitor
    } else {
        ActionKind::Compare
    }
}

/// Cuts to 77 characters plus an ellipsis once `text` exceeds 80.
pub fn summarize(text: &str) -> String {
    if text.chars().count() > SUMMARY_LIMIT {
        let head: String = text.chars().take(SUMMARY_LIMIT - 3).collect();
        format!("{}…", head)
    } else {
        text.to_string()
    }
}

/// Unparseable prices count as 0.
pub fn parse_price(raw: &str) -> f64 {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite()).unwrap_or(0.0)
}

/// `7:05 AM` style. Falls back to the raw string.
pub fn format_time(raw: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"));
    match parsed {
        Ok(dt) => dt.format("%-I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Whole nights between two dates, at least one.
pub fn nights_between(checkin: &str, checkout: &str) -> i64 {
    match (parse_date(checkin), parse_date(checkout)) {
        (Some(from), Some(to)) => (to - from).num_days().max(1),
        _ => 1,
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d").ok()
}
