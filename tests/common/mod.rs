#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error,
};
use std::time::Duration;
use serde_json::{json, Value};

use trip_planner_api::{config::AppConfig, routes, state::AppState};

pub struct TestApp {
    pub config: AppConfig,
}

impl TestApp {
    /// No collaborators configured; every plan is synthesized locally.
    pub fn offline() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn with_gemini(mut self, base: &str) -> Self {
        self.config.gemini.api_key = Some("test-gemini-key".to_string());
        self.config.gemini.api_base = base.to_string();
        self
    }

    pub fn with_mapbox(mut self, base: &str) -> Self {
        self.config.mapbox.access_token = Some("pk.test-token".to_string());
        self.config.mapbox.api_base = base.to_string();
        self
    }

    pub fn with_places(mut self, base: &str) -> Self {
        self.config.places.api_key = Some("test-places-key".to_string());
        self.config.places.api_base = base.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.external_timeout = timeout;
        self
    }

    /// Same middleware stack as the server; the body type is whatever
    /// `Cors` and `Logger` wrap it in.
    pub fn create_app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + 'static>,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(AppState::new(self.config.clone())))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure)
    }
}

/// Wraps itinerary JSON the way the Gemini generateContent API returns it.
pub fn gemini_reply(text: &str) -> String {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
    .to_string()
}

pub fn day_costs(body: &Value) -> Vec<u64> {
    body["itinerary"]
        .as_array()
        .map(|days| days.iter().filter_map(|d| d["dailyCost"].as_u64()).collect())
        .unwrap_or_default()
}

/// Asserts every day's `dailyCost` is its slot sum and `totalCost` is their sum.
pub fn assert_reconciled(body: &Value) {
    let days = body["itinerary"].as_array().expect("itinerary array");
    for day in days {
        let slots = day["morning"]["cost"].as_u64().unwrap()
            + day["afternoon"]["cost"].as_u64().unwrap()
            + day["evening"]["cost"].as_u64().unwrap()
            + day["dining"]["cost"].as_u64().unwrap()
            + day["hotel"]["price"].as_u64().unwrap();
        assert_eq!(day["dailyCost"].as_u64().unwrap(), slots);
    }
    let total: u64 = day_costs(body).iter().sum();
    assert_eq!(body["totalCost"].as_u64().unwrap(), total);
}
