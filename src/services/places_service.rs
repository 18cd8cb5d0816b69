//! Google Places text search, used to seed local synthesis with real venue
//! names and to provide map markers when no AI plan is available.

use std::time::Duration;

use futures::future::join_all;
use log::warn;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::PlacesConfig;
use crate::error::CollaboratorError;
use crate::models::place::{PlaceCategory, PointOfInterest};

const SERVICE: &str = "Google Places";
const RESULTS_PER_CATEGORY: usize = 6;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TextSearchResponse {
    status: String,
    error_message: Option<String>,
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PlaceResult {
    name: Option<String>,
    rating: Option<f32>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Clone)]
pub struct PlacesService {
    client: Client,
    api_key: String,
    api_base: String,
}

impl PlacesService {
    pub fn new(config: &PlacesConfig, timeout: Duration) -> Result<Self, CollaboratorError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(CollaboratorError::NotConfigured(SERVICE))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CollaboratorError::request(SERVICE, e))?;

        Ok(Self {
            client,
            api_key,
            api_base: config.api_base.clone(),
        })
    }

    /// Attractions, restaurants and hotels for a city, queried concurrently.
    ///
    /// A failing category is skipped; the call only fails when every category does.
    pub async fn discover(&self, city: &str) -> Result<Vec<PointOfInterest>, CollaboratorError> {
        let categories = [
            PlaceCategory::Attraction,
            PlaceCategory::Restaurant,
            PlaceCategory::Lodging,
        ];
        let results = join_all(
            categories
                .iter()
                .map(|category| self.search(city, *category)),
        )
        .await;

        let mut places = Vec::new();
        let mut last_error = None;
        for (category, result) in categories.iter().zip(results) {
            match result {
                Ok(found) => places.extend(found),
                Err(e) => {
                    warn!("Places lookup for {:?} in {} failed: {}", category, city, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if places.is_empty() => Err(e),
            _ => Ok(places),
        }
    }

    pub async fn search(
        &self,
        city: &str,
        category: PlaceCategory,
    ) -> Result<Vec<PointOfInterest>, CollaboratorError> {
        let url = self.search_url(city, category)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CollaboratorError::request(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CollaboratorError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let search: TextSearchResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::parse(SERVICE, e.to_string()))?;

        match search.status.as_str() {
            "OK" | "ZERO_RESULTS" => {}
            other => {
                return Err(CollaboratorError::Rejected {
                    service: SERVICE,
                    reason: search
                        .error_message
                        .unwrap_or_else(|| other.to_string()),
                })
            }
        }

        Ok(search
            .results
            .into_iter()
            .filter_map(|result| into_point(result, category))
            .take(RESULTS_PER_CATEGORY)
            .collect())
    }

    fn search_url(&self, city: &str, category: PlaceCategory) -> Result<Url, CollaboratorError> {
        let base = format!(
            "{}/maps/api/place/textsearch/json",
            self.api_base.trim_end_matches('/')
        );
        let query = format!("{} in {}", category.query_term(), city);
        Url::parse_with_params(&base, &[("query", query.as_str()), ("key", self.api_key.as_str())])
            .map_err(|e| CollaboratorError::parse(SERVICE, format!("invalid base url: {}", e)))
    }
}

fn into_point(result: PlaceResult, category: PlaceCategory) -> Option<PointOfInterest> {
    let name = result.name.filter(|n| !n.trim().is_empty())?;
    let location = result.geometry?.location;
    Some(PointOfInterest {
        name,
        category,
        coordinates: [location.lng, location.lat],
        rating: result.rating,
    })
}
