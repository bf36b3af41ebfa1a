//! Static tables feeding the simulation. Demo mode and the replacement
//! pools draw from here; nothing is fetched.

use chrono::{Duration, NaiveDate, Utc};

use crate::model::{
    ActionKind, ActivityCategory, ActivityOption, ActivityTag, AgentAction, AgentState,
    FlightOption, FlightTag, ImpactMetrics, LodgingOption, LodgingTag, PreferenceBias,
    Preferences, Trip, TripStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn trips() -> Vec<Trip> {
    vec![
        Trip {
            id: "trip-1".into(),
            origin: "SFO".into(),
            destination: "JFK".into(),
            depart_date: date(2026, 11, 12),
            return_date: date(2026, 11, 16),
            budget: 1800.0,
            travelers: 2,
            status: TripStatus::Monitoring,
            date_flexible: true,
            preference_bias: Some(PreferenceBias::Balanced),
        },
        Trip {
            id: "trip-2".into(),
            origin: "SEA".into(),
            destination: "AUS".into(),
            depart_date: date(2026, 12, 4),
            return_date: date(2026, 12, 7),
            budget: 1100.0,
            travelers: 1,
            status: TripStatus::Planning,
            date_flexible: false,
            preference_bias: Some(PreferenceBias::Cheaper),
        },
    ]
}

/// The trip demo mode opens on.
pub fn trip() -> Trip {
    trips().remove(0)
}

#[allow(clippy::too_many_arguments)]
fn flight(
    id: &str,
    airline: &str,
    price: f64,
    departure: &str,
    arrival: &str,
    duration: &str,
    stops: u32,
    tag: Option<FlightTag>,
    booking_class: &str,
) -> FlightOption {
    FlightOption {
        id: id.into(),
        airline: airline.into(),
        price,
        departure: departure.into(),
        arrival: arrival.into(),
        duration: duration.into(),
        stops,
        tag,
        cabin: "Economy".into(),
        booking_class: booking_class.into(),
        booking_url: None,
    }
}

pub fn flights() -> Vec<FlightOption> {
    vec![
        flight("fl-1", "JetBlue", 289.0, "7:05 AM", "3:38 PM", "5h 33m", 0, Some(FlightTag::BestValue), "L"),
        flight("fl-2", "Delta", 342.0, "9:15 AM", "5:32 PM", "5h 17m", 0, Some(FlightTag::Fastest), "T"),
        flight("fl-3", "United", 318.0, "11:40 AM", "10:55 PM", "8h 15m", 1, Some(FlightTag::MostFlexible), "K"),
    ]
}

pub fn replacement_flights() -> Vec<FlightOption> {
    vec![
        flight("fl-pool-1", "Alaska", 274.0, "6:20 AM", "2:51 PM", "5h 31m", 0, Some(FlightTag::BestValue), "G"),
        flight("fl-pool-2", "American", 301.0, "1:10 PM", "9:45 PM", "5h 35m", 0, None, "O"),
        flight("fl-pool-3", "Southwest", 256.0, "8:30 AM", "7:20 PM", "7h 50m", 1, Some(FlightTag::BestValue), "W"),
        flight("fl-pool-4", "Delta", 365.0, "3:45 PM", "11:59 PM", "5h 14m", 0, Some(FlightTag::Fastest), "M"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn lodging(
    id: &str,
    name: &str,
    price: f64,
    per_night: f64,
    rating: f32,
    review_count: u32,
    amenities: &[&str],
    tag: Option<LodgingTag>,
    neighborhood: &str,
    cancellation: &str,
) -> LodgingOption {
    LodgingOption {
        id: id.into(),
        name: name.into(),
        price,
        per_night,
        rating,
        review_count,
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        tag,
        neighborhood: neighborhood.into(),
        cancellation: cancellation.into(),
        booking_url: None,
    }
}

pub fn lodgings() -> Vec<LodgingOption> {
    vec![
        lodging("lg-1", "The Jane Hotel", 596.0, 149.0, 4.3, 2140, &["Wi-Fi", "Bar"], Some(LodgingTag::BestValue), "West Village", "Free cancellation until Nov 10"),
        lodging("lg-2", "Arlo SoHo", 792.0, 198.0, 4.6, 3811, &["Wi-Fi", "Gym", "Rooftop"], Some(LodgingTag::TopRated), "SoHo", "Free cancellation until Nov 11"),
        lodging("lg-3", "citizenM Times Square", 708.0, 177.0, 4.5, 5207, &["Wi-Fi", "24h Cafe"], Some(LodgingTag::BestLocation), "Midtown", "Non-refundable"),
    ]
}

pub fn replacement_lodgings() -> Vec<LodgingOption> {
    vec![
        lodging("lg-pool-1", "Moxy Chelsea", 644.0, 161.0, 4.4, 1988, &["Wi-Fi", "Gym"], Some(LodgingTag::BestValue), "Chelsea", "Free cancellation until Nov 10"),
        lodging("lg-pool-2", "The Hoxton Williamsburg", 736.0, 184.0, 4.6, 2764, &["Wi-Fi", "Restaurant"], Some(LodgingTag::TopRated), "Williamsburg", "Free cancellation until Nov 9"),
        lodging("lg-pool-3", "Pod 51", 468.0, 117.0, 4.0, 6120, &["Wi-Fi"], None, "Midtown East", "Free cancellation until Nov 11"),
        lodging("lg-pool-4", "The Standard High Line", 956.0, 239.0, 4.7, 3402, &["Wi-Fi", "Spa", "Rooftop"], Some(LodgingTag::BestLocation), "Meatpacking", "Non-refundable"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn activity(
    id: &str,
    title: &str,
    category: ActivityCategory,
    kind: &str,
    description: &str,
    price: f64,
    duration: &str,
    rating: f32,
    suggested_time: &str,
    address: &str,
    tag: Option<ActivityTag>,
) -> ActivityOption {
    ActivityOption {
        id: id.into(),
        title: title.into(),
        category,
        kind: kind.into(),
        description: description.into(),
        price,
        duration: duration.into(),
        rating,
        suggested_time: suggested_time.into(),
        address: address.into(),
        tag,
        website: None,
        booking_url: None,
    }
}

pub fn activities() -> Vec<ActivityOption> {
    use ActivityCategory::*;
    vec![
        activity("act-1", "Katz's Delicatessen", Restaurant, "Deli", "Pastrami on rye at the 1888 counter.", 35.0, "1h", 4.6, "Day 1 lunch", "205 E Houston St", Some(ActivityTag::MustDo)),
        activity("act-2", "High Line Walk", Hike, "Urban trail", "Elevated park from Gansevoort to Hudson Yards.", 0.0, "1.5h", 4.8, "Day 1 afternoon", "Gansevoort St", Some(ActivityTag::TopPick)),
        activity("act-3", "The Met", Sightseeing, "Museum", "Five thousand years of art under one roof.", 30.0, "3h", 4.8, "Day 2 morning", "1000 5th Ave", Some(ActivityTag::MustDo)),
        activity("act-4", "Comedy Cellar", Activity, "Stand-up", "Late set in the West Village basement.", 28.0, "2h", 4.7, "Day 2 evening", "117 MacDougal St", Some(ActivityTag::LocalGem)),
        activity("act-5", "Via Carota", Restaurant, "Italian", "Walk-in only trattoria, go early.", 70.0, "1.5h", 4.6, "Day 3 dinner", "51 Grove St", None),
    ]
}

pub fn replacement_activities() -> Vec<ActivityOption> {
    use ActivityCategory::*;
    vec![
        activity("act-pool-1", "Brooklyn Bridge at Sunrise", Hike, "Walk", "Cross before the crowds.", 0.0, "1h", 4.9, "Day 1 morning", "Brooklyn Bridge", Some(ActivityTag::TopPick)),
        activity("act-pool-2", "Russ & Daughters", Restaurant, "Appetizing", "Bagels and smoked fish since 1914.", 25.0, "45m", 4.7, "Day 2 breakfast", "179 E Houston St", Some(ActivityTag::LocalGem)),
        activity("act-pool-3", "MoMA", Sightseeing, "Museum", "Modern art, free Friday evenings.", 30.0, "2.5h", 4.6, "Day 3 afternoon", "11 W 53rd St", None),
        activity("act-pool-4", "Broadway Lottery Show", Activity, "Theater", "Enter the digital lottery the day before.", 45.0, "2.5h", 4.8, "Day 2 evening", "Theater District", Some(ActivityTag::MustDo)),
        activity("act-pool-5", "Central Park Loop", Hike, "Run", "Six-mile loop around the park drive.", 0.0, "1h", 4.7, "Day 3 morning", "Central Park", None),
        activity("act-pool-6", "Smorgasburg", Restaurant, "Food market", "Weekend outdoor food market.", 30.0, "2h", 4.5, "Day 4 lunch", "Marsha P. Johnson State Park", Some(ActivityTag::LocalGem)),
    ]
}

fn seeded_action(id: &str, minutes_ago: i64, kind: ActionKind, summary: &str, detail: &str, sms_sent: bool) -> AgentAction {
    AgentAction {
        id: id.into(),
        timestamp: Utc::now() - Duration::minutes(minutes_ago),
        kind,
        summary: summary.into(),
        detail: detail.into(),
        rationale: Vec::new(),
        sms_sent,
    }
}

/// Feed contents before the first demo tick, newest first.
pub fn initial_actions() -> Vec<AgentAction> {
    vec![
        seeded_action("act-init-5", 2, ActionKind::Alert, "JetBlue fare dropped $23", "SFO → JFK on Nov 12 fell from $312 to $289.", true),
        seeded_action("act-init-4", 9, ActionKind::Compare, "Compared 48 lodging options", "Ranked by price, rating, and distance to your plans.", false),
        seeded_action("act-init-3", 17, ActionKind::Optimize, "Swapped a red-eye for a morning nonstop", "Same price band, no overnight travel.", false),
        seeded_action("act-init-2", 31, ActionKind::Search, "Scanned 6 airlines and 212 fares", "Covered flexible dates ±1 day.", false),
        seeded_action("act-init-1", 45, ActionKind::Trip, "Trip created: SFO → JFK", "2 travelers, Nov 12 to Nov 16, budget $1800.", false),
    ]
}

/// States demo mode cycles through, one per tick.
pub fn demo_agent_states() -> Vec<AgentState> {
    vec![
        AgentState::SearchingFlights,
        AgentState::Reoptimizing,
        AgentState::SearchingLodging,
        AgentState::WaitingForApproval,
        AgentState::Monitoring,
    ]
}

/// Templates for demo ticks. Ids and timestamps are filled in when emitted.
pub fn demo_action_templates() -> Vec<AgentAction> {
    vec![
        seeded_action("tpl-1", 0, ActionKind::Search, "Rescanned fares for your dates", "Checked 94 new fares across 6 carriers.", false),
        seeded_action("tpl-2", 0, ActionKind::Alert, "Price drop on Arlo SoHo", "Nightly rate fell $14. Texted you the details.", true)
            .with_rationale(vec!["Below your 30-day average".into(), "Free cancellation still available".into()]),
        seeded_action("tpl-3", 0, ActionKind::Compare, "Compared nonstop vs one-stop", "Nonstop saves 2h 40m for $24 more.", false),
        seeded_action("tpl-4", 0, ActionKind::Monitor, "Watching 3 fares", "Will alert on drops over $15.", false),
        seeded_action("tpl-5", 0, ActionKind::Sms, "Sent shortlist via SMS", "Top flight and lodging pick texted to you.", true),
    ]
}

pub fn metrics() -> ImpactMetrics {
    ImpactMetrics {
        money_saved: 184.0,
        baseline_price: 1249.0,
        time_saved_hours: 6.5,
        alerts_sent: 3,
        options_evaluated: 1284,
    }
}

pub fn preferences() -> Preferences {
    Preferences {
        avoid_red_eyes: true,
        prefer_nonstop: true,
        max_stops: 1,
        min_hotel_rating: 4.0,
        prefer_window: false,
        early_check_in: false,
    }
}
