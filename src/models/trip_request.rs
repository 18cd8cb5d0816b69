use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A validated, normalized trip request. Built only by the validation service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub city: String,
    pub total_budget: u64,
    pub days: u32,
    pub preferences: String,
}

impl TripRequest {
    /// Travel themes mentioned in the free-text preferences, in declaration order.
    pub fn themes(&self) -> Vec<TravelTheme> {
        TravelTheme::ALL
            .iter()
            .copied()
            .filter(|theme| theme.pattern().is_match(&self.preferences))
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TravelTheme {
    Adventure,
    Food,
    Culture,
    Nature,
    Nightlife,
    Shopping,
    Relaxation,
}

impl TravelTheme {
    pub const ALL: [TravelTheme; 7] = [
        TravelTheme::Adventure,
        TravelTheme::Food,
        TravelTheme::Culture,
        TravelTheme::Nature,
        TravelTheme::Nightlife,
        TravelTheme::Shopping,
        TravelTheme::Relaxation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TravelTheme::Adventure => "adventure",
            TravelTheme::Food => "food",
            TravelTheme::Culture => "culture",
            TravelTheme::Nature => "nature",
            TravelTheme::Nightlife => "nightlife",
            TravelTheme::Shopping => "shopping",
            TravelTheme::Relaxation => "relaxation",
        }
    }

    /// Words in a preferences string that select this theme
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            TravelTheme::Adventure => &[
                "adventure",
                "adventurous",
                "trek",
                "trekking",
                "hiking",
                "rafting",
            ],
            TravelTheme::Food => &["food", "foodie", "cuisine", "street food", "culinary"],
            TravelTheme::Culture => &[
                "culture",
                "cultural",
                "history",
                "heritage",
                "museum",
                "museums",
                "temple",
                "temples",
            ],
            TravelTheme::Nature => &[
                "nature",
                "wildlife",
                "beach",
                "beaches",
                "mountain",
                "mountains",
                "park",
            ],
            TravelTheme::Nightlife => &["nightlife", "party", "bar", "bars", "club", "clubs"],
            TravelTheme::Shopping => &["shopping", "market", "markets", "bazaar", "souvenirs"],
            TravelTheme::Relaxation => &[
                "relax",
                "relaxation",
                "relaxing",
                "spa",
                "wellness",
                "yoga",
            ],
        }
    }

    fn pattern(&self) -> &'static Regex {
        static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
        let patterns = PATTERNS.get_or_init(|| {
            TravelTheme::ALL
                .iter()
                .map(|theme| {
                    let alternatives: Vec<String> =
                        theme.keywords().iter().map(|k| regex::escape(k)).collect();
                    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
                        .expect("theme keyword pattern is valid")
                })
                .collect()
        });
        &patterns[*self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(preferences: &str) -> TripRequest {
        TripRequest {
            city: "Jaipur".to_string(),
            total_budget: 50000,
            days: 3,
            preferences: preferences.to_string(),
        }
    }

    #[test]
    fn test_themes_from_preferences() {
        let themes = request("Adventure, street food and some Museums").themes();
        assert_eq!(
            themes,
            vec![TravelTheme::Adventure, TravelTheme::Food, TravelTheme::Culture]
        );
    }

    #[test]
    fn test_no_themes_for_empty_or_partial_words() {
        assert!(request("").themes().is_empty());
        // "barbecue" must not match the nightlife keyword "bar"
        assert!(request("barbecue").themes().is_empty());
    }
}
