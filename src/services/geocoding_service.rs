use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::MapboxConfig;
use crate::error::CollaboratorError;

const SERVICE: &str = "Mapbox geocoding";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GeocodingResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Feature {
    center: Option<Vec<f64>>,
}

#[derive(Clone)]
pub struct GeocodingService {
    client: Client,
    access_token: String,
    api_base: String,
}

impl GeocodingService {
    pub fn new(config: &MapboxConfig, timeout: Duration) -> Result<Self, CollaboratorError> {
        let access_token = config
            .access_token
            .clone()
            .ok_or(CollaboratorError::NotConfigured(SERVICE))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CollaboratorError::request(SERVICE, e))?;

        Ok(Self {
            client,
            access_token,
            api_base: config.api_base.clone(),
        })
    }

    /// Resolve a city name to `[longitude, latitude]`.
    pub async fn geocode(&self, city: &str) -> Result<[f64; 2], CollaboratorError> {
        let url = self.geocode_url(city)?;

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

        let geocoded: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::parse(SERVICE, e.to_string()))?;

        geocoded
            .features
            .first()
            .and_then(|feature| feature.center.as_deref())
            .and_then(valid_center)
            .ok_or(CollaboratorError::Empty(SERVICE))
    }

    fn geocode_url(&self, city: &str) -> Result<Url, CollaboratorError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| CollaboratorError::parse(SERVICE, format!("invalid base url: {}", e)))?;
        let query_file = format!("{}.json", city);
        url.path_segments_mut()
            .map_err(|_| CollaboratorError::parse(SERVICE, "base url cannot hold a path"))?
            .pop_if_empty()
            .extend(["geocoding", "v5", "mapbox.places", query_file.as_str()]);
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("limit", "1");
        Ok(url)
    }
}

fn valid_center(center: &[f64]) -> Option<[f64; 2]> {
    match center {
        [lon, lat, ..]
            if lon.is_finite()
                && lat.is_finite()
                && (-180.0..=180.0).contains(lon)
                && (-90.0..=90.0).contains(lat) =>
        {
            Some([*lon, *lat])
        }
        _ => None,
    }
}
