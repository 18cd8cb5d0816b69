pub mod itinerary;
pub mod partial;
pub mod place;
pub mod trip_request;
