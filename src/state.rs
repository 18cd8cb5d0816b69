use crate::config::AppConfig;
use crate::services::planner_service::TripPlanner;

/// Shared across workers through `web::Data`.
pub struct AppState {
    pub config: AppConfig,
    pub planner: TripPlanner,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let planner = TripPlanner::new(&config);
        Self { config, planner }
    }
}
