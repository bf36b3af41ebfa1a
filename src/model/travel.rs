use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripStatus {
    Planning,
    Monitoring,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceBias {
    Cheaper,
    Comfort,
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub depart_date: NaiveDate,
    pub return_date: NaiveDate,
    pub budget: f64,
    pub travelers: u32,
    pub status: TripStatus,
    #[serde(default)]
    pub date_flexible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference_bias: Option<PreferenceBias>,
}

/// Bookable category of a flight/lodging option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Flight,
    Lodging,
}

impl Category {
    pub fn other(&self) -> Category {
        match self {
            Category::Flight => Category::Lodging,
            Category::Lodging => Category::Flight,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Flight => "flight",
            Category::Lodging => "lodging",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Flight => "Flight",
            Category::Lodging => "Lodging",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records that can be swapped out of an option list by id.
pub trait OptionRecord: Clone {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn price(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightTag {
    #[serde(rename = "Best Value")]
    BestValue,
    Fastest,
    #[serde(rename = "Most Flexible")]
    MostFlexible,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOption {
    pub id: String,
    pub airline: String,
    pub price: f64,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    pub stops: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<FlightTag>,
    pub cabin: String,
    pub booking_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
}

impl OptionRecord for FlightOption {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn price(&self) -> f64 {
        self.price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LodgingTag {
    #[serde(rename = "Best Value")]
    BestValue,
    #[serde(rename = "Top Rated")]
    TopRated,
    #[serde(rename = "Best Location")]
    BestLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LodgingOption {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub per_night: f64,
    pub rating: f32,
    pub review_count: u32,
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<LodgingTag>,
    pub neighborhood: String,
    pub cancellation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
}

impl OptionRecord for LodgingOption {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn price(&self) -> f64 {
        self.price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityCategory {
    Restaurant,
    Hike,
    Sightseeing,
    Activity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityTag {
    #[serde(rename = "Top Pick")]
    TopPick,
    #[serde(rename = "Local Gem")]
    LocalGem,
    #[serde(rename = "Must Do")]
    MustDo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityOption {
    pub id: String,
    pub title: String,
    pub category: ActivityCategory,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub price: f64,
    pub duration: String,
    pub rating: f32,
    pub suggested_time: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<ActivityTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
}

impl OptionRecord for ActivityOption {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn price(&self) -> f64 {
        self.price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedActivity {
    pub activity_id: String,
    pub activity: ActivityOption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    Selected,
    Rejected,
    Replacing,
    None,
}

/// The user's current disposition toward one flight or lodging option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDecision {
    pub option_id: String,
    pub category: Category,
    pub status: DecisionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
    #[serde(default)]
    pub monitor_price: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDecision {
    pub activity_id: String,
    pub status: DecisionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub avoid_red_eyes: bool,
    pub prefer_nonstop: bool,
    pub max_stops: u32,
    pub min_hotel_rating: f32,
    pub prefer_window: bool,
    pub early_check_in: bool,
}

/// Activity curation toggles. Flipping one triggers a re-optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityPreference {
    FoodDrink,
    Outdoor,
    Cultural,
    EveningHeavy,
}

impl ActivityPreference {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityPreference::FoodDrink => "Food & drink",
            ActivityPreference::Outdoor => "Outdoor",
            ActivityPreference::Cultural => "Cultural",
            ActivityPreference::EveningHeavy => "Evening heavy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPreferences {
    pub food_drink: bool,
    pub outdoor: bool,
    pub cultural: bool,
    pub evening_heavy: bool,
}

impl Default for ActivityPreferences {
    fn default() -> Self {
        Self {
            food_drink: true,
            outdoor: false,
            cultural: true,
            evening_heavy: false,
        }
    }
}

impl ActivityPreferences {
    /// Flips one toggle and returns its new value.
    pub fn toggle(&mut self, pref: ActivityPreference) -> bool {
        let slot = match pref {
            ActivityPreference::FoodDrink => &mut self.food_drink,
            ActivityPreference::Outdoor => &mut self.outdoor,
            ActivityPreference::Cultural => &mut self.cultural,
            ActivityPreference::EveningHeavy => &mut self.evening_heavy,
        };
        *slot = !*slot;
        *slot
    }
}
