//! Backend wire types. These mirror the TripMaster REST contract exactly and
//! should only change when the backend does.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripState {
    Idle,
    CollectingInfo,
    Planning,
    Monitoring,
    Recovery,
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripConstraints {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    /// YYYY-MM-DD
    #[serde(default)]
    pub depart: Option<String>,
    /// YYYY-MM-DD
    #[serde(default, rename = "return")]
    pub return_date: Option<String>,
    #[serde(default)]
    pub travelers: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlightStatus {
    OnTime,
    Delayed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub id: String,
    pub from: String,
    pub to: String,
    /// ISO timestamp
    pub depart: String,
    /// Total price, as a decimal string
    pub price: String,
    pub booking_link: String,
    pub status: FlightStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelOffer {
    pub id: String,
    pub name: String,
    pub city: String,
    pub checkin: String,
    pub checkout: String,
    pub price: String,
    pub booking_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub flight: FlightOffer,
    pub hotel: HotelOffer,
    #[serde(default)]
    pub flight_options: Vec<FlightOffer>,
    #[serde(default)]
    pub hotel_options: Vec<HotelOffer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTrip {
    pub id: String,
    #[serde(default)]
    pub user_phone: String,
    pub state: TripState,
    #[serde(default)]
    pub constraints: TripConstraints,
    #[serde(default)]
    pub plan: Option<TripPlan>,
    #[serde(default)]
    pub reasoning: Vec<String>,
    #[serde(default)]
    pub logs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripResponse {
    pub trip: Option<ApiTrip>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningResponse {
    #[serde(default)]
    pub reasoning: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body shape the backend uses for non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
