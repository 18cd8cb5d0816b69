//! Lenient shape of an itinerary produced by an external generator.
//!
//! Generators return loosely-structured JSON: costs as strings ("₹1,200"),
//! slots as bare strings, missing or null sections. Everything here is
//! optional and coerced; nothing fails unless the top level is not an object.
//! Declared aggregates (`dailyCost`, `totalCost`) are read but never trusted.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialItinerary {
    #[serde(deserialize_with = "lenient_text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient_cost")]
    pub total_cost: Option<u64>,
    #[serde(deserialize_with = "lenient_list")]
    pub hotels: Vec<PartialHotel>,
    #[serde(deserialize_with = "lenient_list")]
    pub itinerary: Vec<PartialDayPlan>,
}

impl PartialItinerary {
    pub fn has_days(&self) -> bool {
        !self.itinerary.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialHotel {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(alias = "price", deserialize_with = "lenient_cost")]
    pub price_per_night: Option<u64>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_rating")]
    pub rating: Option<f32>,
    #[serde(alias = "distance", deserialize_with = "lenient_text")]
    pub distance_from_center: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialDayPlan {
    #[serde(deserialize_with = "lenient_day")]
    pub day: Option<u32>,
    #[serde(deserialize_with = "lenient_activity")]
    pub morning: Option<PartialActivity>,
    #[serde(deserialize_with = "lenient_activity")]
    pub afternoon: Option<PartialActivity>,
    #[serde(deserialize_with = "lenient_activity")]
    pub evening: Option<PartialActivity>,
    #[serde(deserialize_with = "lenient_dining")]
    pub dining: Option<PartialDining>,
    #[serde(deserialize_with = "lenient_stay")]
    pub hotel: Option<PartialHotelStay>,
    #[serde(deserialize_with = "lenient_cost")]
    pub daily_cost: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PartialActivity {
    #[serde(alias = "name", deserialize_with = "lenient_text")]
    pub activity: Option<String>,
    #[serde(deserialize_with = "lenient_cost")]
    pub cost: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PartialDining {
    #[serde(alias = "name", deserialize_with = "lenient_text")]
    pub restaurant: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cuisine: Option<String>,
    #[serde(deserialize_with = "lenient_cost")]
    pub cost: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialHotelStay {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(alias = "pricePerNight", deserialize_with = "lenient_cost")]
    pub price: Option<u64>,
}

/// Ceiling for any single upstream cost. Five slots over even a long trip stay
/// below 2^53, so sums are exact in `u64` and in a JavaScript number.
pub const MAX_UPSTREAM_COST: u64 = 1_000_000_000_000;

/// Coerces a JSON number or numeric-looking string into a non-negative whole amount.
///
/// Fractions are floored, negatives become 0, amounts above `MAX_UPSTREAM_COST`
/// are capped, and currency symbols or thousands separators in strings are
/// ignored. Returns `None` when no number is present.
pub fn coerce_cost(value: &Value) -> Option<u64> {
    coerce_amount(value).map(|amount| amount.min(MAX_UPSTREAM_COST))
}

fn coerce_amount(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Some(v)
            } else if n.as_i64().is_some() {
                Some(0)
            } else {
                n.as_f64().map(floor_amount)
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            let start = trimmed.find(|c: char| c.is_ascii_digit())?;
            let digits: String = trimmed[start..]
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
                .filter(|c| *c != ',')
                .collect();
            let amount: f64 = digits.trim_end_matches('.').parse().ok()?;
            if trimmed[..start].contains('-') {
                Some(0)
            } else {
                Some(floor_amount(amount))
            }
        }
        _ => None,
    }
}

fn floor_amount(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        v.floor() as u64
    } else {
        0
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_of(&value))
}

fn lenient_cost<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_cost(&value))
}

fn lenient_day<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_cost(&value).and_then(|day| u32::try_from(day).ok()))
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let rating = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(rating.filter(|r| r.is_finite()).map(|r| r as f32))
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_object<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

fn lenient_activity<'de, D>(deserializer: D) -> Result<Option<PartialActivity>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match text_of(&value) {
        Some(activity) => Some(PartialActivity {
            activity: Some(activity),
            cost: None,
        }),
        None => lenient_object(value),
    })
}

fn lenient_dining<'de, D>(deserializer: D) -> Result<Option<PartialDining>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match text_of(&value) {
        Some(restaurant) => Some(PartialDining {
            restaurant: Some(restaurant),
            ..PartialDining::default()
        }),
        None => lenient_object(value),
    })
}

fn lenient_stay<'de, D>(deserializer: D) -> Result<Option<PartialHotelStay>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match text_of(&value) {
        Some(name) => Some(PartialHotelStay {
            name: Some(name),
            price: None,
        }),
        None => lenient_object(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_cost_variants() {
        assert_eq!(coerce_cost(&json!(1200)), Some(1200));
        assert_eq!(coerce_cost(&json!(1200.9)), Some(1200));
        assert_eq!(coerce_cost(&json!(-40)), Some(0));
        assert_eq!(coerce_cost(&json!("₹1,200")), Some(1200));
        assert_eq!(coerce_cost(&json!("Rs. 350.75 per person")), Some(350));
        assert_eq!(coerce_cost(&json!("-300")), Some(0));
        assert_eq!(coerce_cost(&json!("free")), None);
        assert_eq!(coerce_cost(&json!(null)), None);
    }

    #[test]
    fn test_coerce_cost_caps_absurd_amounts() {
        assert_eq!(
            coerce_cost(&json!("99999999999999999999999")),
            Some(MAX_UPSTREAM_COST)
        );
        assert_eq!(coerce_cost(&json!(1e300)), Some(MAX_UPSTREAM_COST));
        assert_eq!(coerce_cost(&json!(u64::MAX)), Some(MAX_UPSTREAM_COST));
        assert_eq!(
            coerce_cost(&json!(MAX_UPSTREAM_COST)),
            Some(MAX_UPSTREAM_COST)
        );
    }

    #[test]
    fn test_partial_itinerary_tolerates_messy_input() {
        let parsed: PartialItinerary = serde_json::from_value(json!({
            "summary": "  Pink city getaway ",
            "totalCost": "99999",
            "hotels": [
                {"name": "Rambagh Palace", "pricePerNight": "₹25,000", "rating": "4.8"},
                "not a hotel"
            ],
            "itinerary": [
                {
                    "day": "1",
                    "morning": "Amber Fort",
                    "afternoon": {"activity": "City Palace", "cost": 700},
                    "evening": null,
                    "dining": {"name": "LMB", "cuisine": "Rajasthani", "cost": "650"},
                    "hotel": {"name": "Rambagh Palace", "price": 25000},
                    "dailyCost": 1
                },
                42
            ]
        }))
        .unwrap();

        assert_eq!(parsed.summary.as_deref(), Some("Pink city getaway"));
        assert_eq!(parsed.hotels.len(), 1);
        assert_eq!(parsed.hotels[0].price_per_night, Some(25000));
        assert_eq!(parsed.hotels[0].rating, Some(4.8));
        assert_eq!(parsed.itinerary.len(), 1);

        let day = &parsed.itinerary[0];
        assert_eq!(day.day, Some(1));
        assert_eq!(
            day.morning,
            Some(PartialActivity {
                activity: Some("Amber Fort".to_string()),
                cost: None
            })
        );
        assert_eq!(day.afternoon.as_ref().and_then(|a| a.cost), Some(700));
        assert!(day.evening.is_none());
        assert_eq!(
            day.dining.as_ref().and_then(|d| d.restaurant.as_deref()),
            Some("LMB")
        );
        assert_eq!(day.dining.as_ref().and_then(|d| d.cost), Some(650));
        assert_eq!(day.hotel.as_ref().and_then(|h| h.price), Some(25000));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let parsed: PartialItinerary = serde_json::from_str("{}").unwrap();
        assert!(!parsed.has_days());
        assert!(parsed.hotels.is_empty());
        assert!(parsed.summary.is_none());
    }
}
