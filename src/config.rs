//! Environment-driven configuration.
//!
//! Every setting has a default so the service boots with no environment at all;
//! in that case no external collaborator is enabled and every plan is
//! synthesized locally. Malformed values are logged and replaced by defaults.

use std::{env, str::FromStr, time::Duration};

use log::warn;

use crate::services::budget_service::BudgetSplit;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const MIN_DAILY_COST: u64 = 5000;
const MAX_TRIP_DAYS: u32 = 30;
const CURRENCY_SYMBOL: &str = "₹";
const EXTERNAL_TIMEOUT_SECS: u64 = 8;
const GEMINI_MODEL: &str = "gemini-1.5-flash";
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const MAPBOX_API_BASE: &str = "https://api.mapbox.com";
const PLACES_API_BASE: &str = "https://maps.googleapis.com";

/// Fallback map centre (Delhi) as `[longitude, latitude]`.
pub const DEFAULT_CITY_COORDINATES: [f64; 2] = [77.209, 28.6139];

/// Limits applied to every inbound trip request.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPolicy {
    pub min_daily_cost: u64,
    pub max_days: u32,
    pub currency_symbol: String,
}

impl Default for TripPolicy {
    fn default() -> Self {
        Self {
            min_daily_cost: MIN_DAILY_COST,
            max_days: MAX_TRIP_DAYS,
            currency_symbol: CURRENCY_SYMBOL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: GEMINI_MODEL.to_string(),
            api_base: GEMINI_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapboxConfig {
    pub access_token: Option<String>,
    pub api_base: String,
}

impl Default for MapboxConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base: MAPBOX_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacesConfig {
    pub api_key: Option<String>,
    pub api_base: String,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: PLACES_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub trip_policy: TripPolicy,
    pub budget_split: BudgetSplit,
    pub external_timeout: Duration,
    pub default_coordinates: [f64; 2],
    pub gemini: GeminiConfig,
    pub mapbox: MapboxConfig,
    pub places: PlacesConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            environment: "development".to_string(),
            trip_policy: TripPolicy::default(),
            budget_split: BudgetSplit::default(),
            external_timeout: Duration::from_secs(EXTERNAL_TIMEOUT_SECS),
            default_coordinates: DEFAULT_CITY_COORDINATES,
            gemini: GeminiConfig::default(),
            mapbox: MapboxConfig::default(),
            places: PlacesConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let budget_split = match lookup("BUDGET_SPLIT") {
            Some(raw) => BudgetSplit::parse(&raw).unwrap_or_else(|e| {
                warn!("Ignoring BUDGET_SPLIT '{}': {}", raw, e);
                BudgetSplit::default()
            }),
            None => BudgetSplit::default(),
        };

        let timeout_secs: u64 = parsed(&lookup, "EXTERNAL_TIMEOUT_SECS", EXTERNAL_TIMEOUT_SECS);

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "PORT", PORT),
            environment: lookup("RUST_ENV").unwrap_or(defaults.environment),
            trip_policy: TripPolicy {
                min_daily_cost: parsed(&lookup, "MIN_DAILY_COST", MIN_DAILY_COST),
                max_days: parsed(&lookup, "MAX_TRIP_DAYS", MAX_TRIP_DAYS).max(1),
                currency_symbol: lookup("CURRENCY_SYMBOL")
                    .unwrap_or(defaults.trip_policy.currency_symbol),
            },
            budget_split,
            external_timeout: Duration::from_secs(timeout_secs.max(1)),
            default_coordinates: defaults.default_coordinates,
            gemini: GeminiConfig {
                api_key: secret(&lookup, "GOOGLE_AI_API_KEY"),
                model: lookup("GEMINI_MODEL").unwrap_or(defaults.gemini.model),
                api_base: lookup("GEMINI_API_BASE").unwrap_or(defaults.gemini.api_base),
            },
            mapbox: MapboxConfig {
                access_token: secret(&lookup, "MAPBOX_ACCESS_TOKEN"),
                api_base: lookup("MAPBOX_API_BASE").unwrap_or(defaults.mapbox.api_base),
            },
            places: PlacesConfig {
                api_key: secret(&lookup, "GOOGLE_PLACES_API_KEY"),
                api_base: lookup("GOOGLE_PLACES_API_BASE").unwrap_or(defaults.places.api_base),
            },
        }
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {} value '{}'", key, raw);
            default
        }),
        None => default,
    }
}

// Blank secrets count as unset so an empty `.env` entry disables the service.
fn secret<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
