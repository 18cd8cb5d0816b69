use futures::join;
use log::{info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{CollaboratorError, SynthesisError};
use crate::models::{
    itinerary::Itinerary, partial::PartialItinerary, place::PointOfInterest,
    trip_request::TripRequest,
};
use crate::services::activity_pool::ActivityPool;
use crate::services::gemini_service::GeminiService;
use crate::services::geocoding_service::GeocodingService;
use crate::services::places_service::PlacesService;
use crate::services::synthesis_service::{ItinerarySynthesizer, SynthesisConfig};

/// Runs one request through the optional collaborators and the synthesizer.
pub struct TripPlanner {
    synthesizer: ItinerarySynthesizer,
    gemini: Option<GeminiService>,
    geocoder: Option<GeocodingService>,
    places: Option<PlacesService>,
    default_coordinates: [f64; 2],
    currency_symbol: String,
}

impl TripPlanner {
    pub fn new(config: &AppConfig) -> Self {
        // Every collaborator is optional; a missing key only disables that lookup.
        let gemini = available(GeminiService::new(&config.gemini, config.external_timeout));
        let geocoder = available(GeocodingService::new(&config.mapbox, config.external_timeout));
        let places = available(PlacesService::new(&config.places, config.external_timeout));

        let synthesizer = ItinerarySynthesizer::new(SynthesisConfig {
            budget_split: config.budget_split,
            default_coordinates: config.default_coordinates,
            currency_symbol: config.trip_policy.currency_symbol.clone(),
        });

        Self {
            synthesizer,
            gemini,
            geocoder,
            places,
            default_coordinates: config.default_coordinates,
            currency_symbol: config.trip_policy.currency_symbol.clone(),
        }
    }

    /// `(name, enabled)` for each external collaborator
    pub fn collaborators(&self) -> [(&'static str, bool); 3] {
        [
            ("gemini", self.gemini.is_some()),
            ("mapbox", self.geocoder.is_some()),
            ("places", self.places.is_some()),
        ]
    }

    pub async fn plan(
        &self,
        req: &TripRequest,
        request_id: Uuid,
    ) -> Result<Itinerary, SynthesisError> {
        let (coordinates, generated) =
            join!(self.locate(&req.city, request_id), self.generate(req));

        let mut itinerary = match generated {
            Ok(plan) if plan.has_days() => {
                info!("[{}] Reconciling AI itinerary for {}", request_id, req.city);
                self.synthesizer.synthesize(req, Some(plan))?
            }
            outcome => {
                let failure = match outcome {
                    Ok(_) => Some("AI response contained no itinerary days".to_string()),
                    Err(e) if e.is_not_configured() => None,
                    Err(e) => Some(e.to_string()),
                };
                if let Some(reason) = &failure {
                    warn!("[{}] Falling back to local synthesis: {}", request_id, reason);
                }
                self.synthesize_locally(req, failure, request_id).await?
            }
        };

        itinerary.city_coordinates = coordinates;
        Ok(itinerary)
    }

    async fn synthesize_locally(
        &self,
        req: &TripRequest,
        failure: Option<String>,
        request_id: Uuid,
    ) -> Result<Itinerary, SynthesisError> {
        let places = self.discover(&req.city, request_id).await;
        let pool = ActivityPool::from_places(req, &places)
            .unwrap_or_else(|| ActivityPool::for_request(req));

        let mut itinerary = self.synthesizer.synthesize_with_pool(req, &pool)?;
        itinerary.points_of_interest = places;
        if let Some(reason) = failure {
            itinerary.fallback = true;
            itinerary.error = Some(reason);
        }
        Ok(itinerary)
    }

    async fn generate(&self, req: &TripRequest) -> Result<PartialItinerary, CollaboratorError> {
        match &self.gemini {
            Some(gemini) => gemini.generate_itinerary(req, &self.currency_symbol).await,
            None => Err(CollaboratorError::NotConfigured("Gemini")),
        }
    }

    async fn locate(&self, city: &str, request_id: Uuid) -> [f64; 2] {
        let Some(geocoder) = &self.geocoder else {
            return self.default_coordinates;
        };
        match geocoder.geocode(city).await {
            Ok(coordinates) => coordinates,
            Err(e) => {
                warn!(
                    "[{}] Geocoding {} failed: {}. Using default coordinates.",
                    request_id, city, e
                );
                self.default_coordinates
            }
        }
    }

    async fn discover(&self, city: &str, request_id: Uuid) -> Vec<PointOfInterest> {
        let Some(places) = &self.places else {
            return Vec::new();
        };
        match places.discover(city).await {
            Ok(found) => found,
            Err(e) => {
                warn!("[{}] Places lookup for {} failed: {}", request_id, city, e);
                Vec::new()
            }
        }
    }
}

fn available<T>(service: Result<T, CollaboratorError>) -> Option<T> {
    match service {
        Ok(service) => Some(service),
        Err(e) => {
            info!("{}. Using local synthesis in its place.", e);
            None
        }
    }
}
