use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Attraction,
    Restaurant,
    Lodging,
}

impl PlaceCategory {
    /// Search phrase sent to the places lookup, e.g. "tourist attractions in Goa".
    pub fn query_term(&self) -> &'static str {
        match self {
            PlaceCategory::Attraction => "tourist attractions",
            PlaceCategory::Restaurant => "restaurants",
            PlaceCategory::Lodging => "hotels",
        }
    }
}

/// A named map marker returned by the places lookup.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PointOfInterest {
    pub name: String,
    pub category: PlaceCategory,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}
