use serde::{Deserialize, Serialize};

use super::place::PointOfInterest;

/// The response contract surfaced to rendering collaborators.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub summary: String,
    /// Always the sum of every day's `daily_cost`.
    pub total_cost: u64,
    pub over_budget: bool,
    pub hotels: Vec<Hotel>,
    pub itinerary: Vec<DayPlan>,
    /// `[longitude, latitude]`
    pub city_coordinates: [f64; 2],
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points_of_interest: Vec<PointOfInterest>,
    #[serde(rename = "_fallback", default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    #[serde(rename = "_error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub name: String,
    pub price_per_night: u64,
    pub description: String,
    pub rating: f32,
    pub distance_from_center: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: u32,
    pub morning: ActivitySlot,
    pub afternoon: ActivitySlot,
    pub evening: ActivitySlot,
    pub dining: DiningSlot,
    pub hotel: HotelStay,
    pub daily_cost: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ActivitySlot {
    pub activity: String,
    pub cost: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DiningSlot {
    pub restaurant: String,
    pub cuisine: String,
    pub cost: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct HotelStay {
    pub name: String,
    pub price: u64,
}
