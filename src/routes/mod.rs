use actix_web::web;

pub mod generate;
pub mod health;
pub mod map_token;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(|| async { "Trip planner API is running" }))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::resource("/api/generate")
                .route(web::post().to(generate::generate))
                .default_service(web::to(generate::method_not_allowed)),
        )
        .service(
            web::resource("/.netlify/functions/generate")
                .route(web::post().to(generate::generate))
                .default_service(web::to(generate::method_not_allowed)),
        )
        .route("/api/mapbox-token", web::get().to(map_token::get_mapbox_token))
        .route(
            "/.netlify/functions/get-mapbox-token",
            web::get().to(map_token::get_mapbox_token),
        );
}
