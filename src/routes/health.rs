use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let config = &state.config;
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: config.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let checks = [
        ("gemini", "GOOGLE_AI_API_KEY", config.gemini.api_key.as_deref()),
        ("mapbox", "MAPBOX_ACCESS_TOKEN", config.mapbox.access_token.as_deref()),
        ("places", "GOOGLE_PLACES_API_KEY", config.places.api_key.as_deref()),
    ];

    for (service, variable, secret) in checks {
        let result = check_key(variable, secret);
        // A missing key only disables that collaborator
        if result.status != "ok" {
            health.status = "degraded".to_string();
        }
        health.services.insert(service.to_string(), result);
    }

    HttpResponse::Ok().json(health)
}

fn check_key(variable: &str, secret: Option<&str>) -> ServiceStatus {
    match secret {
        Some(key) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("{} configured ({})", variable, mask(key))),
        },
        None => ServiceStatus {
            status: "error".to_string(),
            details: Some(format!("{} not configured", variable)),
        },
    }
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}
