pub mod activity_pool;
pub mod budget_service;
pub mod gemini_service;
pub mod geocoding_service;
pub mod places_service;
pub mod planner_service;
pub mod synthesis_service;
pub mod validation_service;
