use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::services::validation_service::validate;
use crate::state::AppState;

/*
    POST /api/generate
    POST /.netlify/functions/generate
*/
pub async fn generate(body: web::Bytes, state: web::Data<AppState>) -> impl Responder {
    let request_id = Uuid::new_v4();

    let raw: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            return HttpResponse::BadRequest().json(json!({
                "error": "Invalid JSON body",
                "details": e.to_string()
            }))
        }
    };

    let trip = match validate(&raw, &state.config.trip_policy) {
        Ok(trip) => trip,
        Err(e) => {
            info!("[{}] Rejected trip request: {}", request_id, e);
            return HttpResponse::BadRequest().json(json!({
                "error": e.to_string(),
                "details": e.kind()
            }));
        }
    };

    info!(
        "[{}] Planning {} days in {} on {}{}",
        request_id,
        trip.days,
        trip.city,
        state.config.trip_policy.currency_symbol,
        trip.total_budget
    );

    match state.planner.plan(&trip, request_id).await {
        Ok(itinerary) => HttpResponse::Ok().json(itinerary),
        Err(e) => {
            error!("[{}] Failed to generate itinerary: {}", request_id, e);
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to generate itinerary",
                "details": e.to_string()
            }))
        }
    }
}

pub async fn method_not_allowed() -> impl Responder {
    HttpResponse::MethodNotAllowed().json(json!({ "error": "Method not allowed" }))
}
