use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::state::AppState;

/*
    GET /api/mapbox-token
    GET /.netlify/functions/get-mapbox-token
*/
pub async fn get_mapbox_token(state: web::Data<AppState>) -> impl Responder {
    match &state.config.mapbox.access_token {
        Some(token) => HttpResponse::Ok().json(json!({ "token": token })),
        None => HttpResponse::NotFound().json(json!({ "error": "Mapbox token not configured" })),
    }
}
