//! Itinerary Synthesizer
//!
//! Turns a validated `TripRequest` into a complete, budget-consistent
//! `Itinerary`. Two modes:
//!
//! - **Reconcile**: an external generator supplied a (possibly partial) plan.
//!   Descriptive fields are kept, gaps are filled with fixed placeholders, and
//!   every aggregate cost is recomputed from its parts.
//! - **Local synthesis**: no usable external plan. The per-day budget is split
//!   across slots and text is drawn from a rotating `ActivityPool`.
//!
//! Both modes are pure functions of their inputs.

use crate::config::DEFAULT_CITY_COORDINATES;
use crate::error::SynthesisError;
use crate::models::{
    itinerary::{ActivitySlot, DayPlan, DiningSlot, Hotel, HotelStay, Itinerary},
    partial::{
        PartialActivity, PartialDayPlan, PartialDining, PartialHotel, PartialHotelStay,
        PartialItinerary,
    },
    trip_request::TripRequest,
};
use crate::services::activity_pool::ActivityPool;
use crate::services::budget_service::{BudgetService, BudgetSplit};

const PLACEHOLDER_MORNING: &str = "Explore local area";
const PLACEHOLDER_AFTERNOON: &str = "Sightseeing";
const PLACEHOLDER_EVENING: &str = "Evening activity";
const PLACEHOLDER_RESTAURANT: &str = "Local eatery";
const PLACEHOLDER_CUISINE: &str = "Local cuisine";
const PLACEHOLDER_HOTEL: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
    pub budget_split: BudgetSplit,
    pub default_coordinates: [f64; 2],
    pub currency_symbol: String,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            budget_split: BudgetSplit::default(),
            default_coordinates: DEFAULT_CITY_COORDINATES,
            currency_symbol: "₹".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItinerarySynthesizer {
    config: SynthesisConfig,
}

impl ItinerarySynthesizer {
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    /// Reconcile `external` when it carries at least one day, otherwise synthesize locally.
    pub fn synthesize(
        &self,
        req: &TripRequest,
        external: Option<PartialItinerary>,
    ) -> Result<Itinerary, SynthesisError> {
        match external.filter(PartialItinerary::has_days) {
            Some(plan) => self.reconcile(req, plan),
            None => self.synthesize_with_pool(req, &ActivityPool::for_request(req)),
        }
    }

    /// Deterministic local plan drawn from `pool`.
    pub fn synthesize_with_pool(
        &self,
        req: &TripRequest,
        pool: &ActivityPool,
    ) -> Result<Itinerary, SynthesisError> {
        let per_day = BudgetService::per_day_budget(req.total_budget, req.days)
            .ok_or(SynthesisError::InvalidDays(req.days))?;
        let allocation = BudgetService::allocate(per_day, &self.config.budget_split);

        let mut days = Vec::with_capacity(req.days as usize);
        for day in 1..=req.days {
            let (restaurant, cuisine) = pool.dining(day)?;
            days.push(DayPlan {
                day,
                morning: ActivitySlot {
                    activity: pool.morning(day)?.to_string(),
                    cost: allocation.morning,
                },
                afternoon: ActivitySlot {
                    activity: pool.afternoon(day)?.to_string(),
                    cost: allocation.afternoon,
                },
                evening: ActivitySlot {
                    activity: pool.evening(day)?.to_string(),
                    cost: allocation.evening,
                },
                dining: DiningSlot {
                    restaurant: restaurant.to_string(),
                    cuisine: cuisine.to_string(),
                    cost: allocation.dining,
                },
                hotel: HotelStay {
                    name: pool.hotel_for_day(day)?.name.clone(),
                    price: allocation.hotel,
                },
                daily_cost: 0,
            });
        }

        let hotels = self.hotel_list(req, pool, allocation.hotel);
        Ok(self.assemble(req, self.local_summary(req), hotels, days))
    }

    fn reconcile(
        &self,
        req: &TripRequest,
        plan: PartialItinerary,
    ) -> Result<Itinerary, SynthesisError> {
        if req.days == 0 {
            return Err(SynthesisError::InvalidDays(req.days));
        }

        let days: Vec<DayPlan> = (1..=req.days)
            .map(|day| merge_day(day, upstream_day(&plan.itinerary, day)))
            .collect();

        let mut hotels: Vec<Hotel> = plan
            .hotels
            .into_iter()
            .filter_map(|hotel| merge_hotel(hotel, &req.city))
            .collect();
        if hotels.is_empty() {
            let pool = ActivityPool::for_request(req);
            let per_day = BudgetService::per_day_budget(req.total_budget, req.days)
                .ok_or(SynthesisError::InvalidDays(req.days))?;
            let lodging = BudgetService::allocate(per_day, &self.config.budget_split).hotel;
            hotels = self.hotel_list(req, &pool, lodging);
        }

        let summary = plan.summary.unwrap_or_else(|| self.local_summary(req));
        Ok(self.assemble(req, summary, hotels, days))
    }

    fn assemble(
        &self,
        req: &TripRequest,
        summary: String,
        hotels: Vec<Hotel>,
        mut days: Vec<DayPlan>,
    ) -> Itinerary {
        let total_cost = BudgetService::reconcile(&mut days);
        Itinerary {
            summary,
            total_cost,
            over_budget: total_cost > req.total_budget,
            hotels,
            itinerary: days,
            city_coordinates: self.config.default_coordinates,
            points_of_interest: Vec::new(),
            fallback: false,
            error: None,
        }
    }

    /// Every tier is listed at the nightly lodging allocation, the same price a
    /// day charges for staying there.
    fn hotel_list(&self, req: &TripRequest, pool: &ActivityPool, lodging: u64) -> Vec<Hotel> {
        pool.hotels()
            .iter()
            .map(|option| Hotel {
                name: option.name.clone(),
                price_per_night: lodging,
                description: option.tier.description(&req.city),
                rating: option.rating.clamp(0.0, 5.0),
                distance_from_center: option.tier.distance_from_center().to_string(),
            })
            .collect()
    }

    fn local_summary(&self, req: &TripRequest) -> String {
        let themes: Vec<&str> = req.themes().iter().map(|t| t.label()).collect();
        let flavour = if themes.is_empty() {
            String::new()
        } else {
            format!(" {}", themes.join(" and "))
        };
        format!(
            "A {}-day{} trip to {} planned around a {}{} budget.",
            req.days, flavour, req.city, self.config.currency_symbol, req.total_budget
        )
    }
}

/// The upstream entry numbered `day`, else the unnumbered entry at that position.
fn upstream_day(plan: &[PartialDayPlan], day: u32) -> Option<&PartialDayPlan> {
    plan.iter().find(|d| d.day == Some(day)).or_else(|| {
        plan.get(day as usize - 1)
            .filter(|d| d.day.is_none())
    })
}

fn merge_day(day: u32, upstream: Option<&PartialDayPlan>) -> DayPlan {
    let upstream = upstream.cloned().unwrap_or_default();
    DayPlan {
        day,
        morning: merge_activity(upstream.morning, PLACEHOLDER_MORNING),
        afternoon: merge_activity(upstream.afternoon, PLACEHOLDER_AFTERNOON),
        evening: merge_activity(upstream.evening, PLACEHOLDER_EVENING),
        dining: merge_dining(upstream.dining),
        hotel: merge_stay(upstream.hotel),
        // recomputed in `assemble`; the upstream figure is never used
        daily_cost: 0,
    }
}

fn merge_activity(slot: Option<PartialActivity>, placeholder: &str) -> ActivitySlot {
    let slot = slot.unwrap_or_default();
    ActivitySlot {
        activity: slot.activity.unwrap_or_else(|| placeholder.to_string()),
        cost: slot.cost.unwrap_or(0),
    }
}

fn merge_dining(slot: Option<PartialDining>) -> DiningSlot {
    let slot = slot.unwrap_or_default();
    DiningSlot {
        restaurant: slot.restaurant.unwrap_or_else(|| PLACEHOLDER_RESTAURANT.to_string()),
        cuisine: slot.cuisine.unwrap_or_else(|| PLACEHOLDER_CUISINE.to_string()),
        cost: slot.cost.unwrap_or(0),
    }
}

fn merge_stay(stay: Option<PartialHotelStay>) -> HotelStay {
    let stay = stay.unwrap_or_default();
    HotelStay {
        name: stay.name.unwrap_or_else(|| PLACEHOLDER_HOTEL.to_string()),
        price: stay.price.unwrap_or(0),
    }
}

// Nameless hotels are dropped.
fn merge_hotel(hotel: PartialHotel, city: &str) -> Option<Hotel> {
    let name = hotel.name?;
    Some(Hotel {
        name,
        price_per_night: hotel.price_per_night.unwrap_or(0),
        description: hotel
            .description
            .unwrap_or_else(|| format!("Hotel in {}", city)),
        rating: hotel.rating.unwrap_or(0.0).clamp(0.0, 5.0),
        distance_from_center: hotel
            .distance_from_center
            .unwrap_or_else(|| "Distance not available".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::partial::MAX_UPSTREAM_COST;
    use serde_json::json;

    fn request(city: &str, budget: u64, days: u32, preferences: &str) -> TripRequest {
        TripRequest {
            city: city.to_string(),
            total_budget: budget,
            days,
            preferences: preferences.to_string(),
        }
    }

    fn assert_invariants(req: &TripRequest, itinerary: &Itinerary) {
        assert_eq!(itinerary.itinerary.len(), req.days as usize);
        for (i, day) in itinerary.itinerary.iter().enumerate() {
            assert_eq!(day.day, i as u32 + 1);
            assert_eq!(
                day.daily_cost,
                day.morning.cost
                    + day.afternoon.cost
                    + day.evening.cost
                    + day.dining.cost
                    + day.hotel.price
            );
        }
        let sum: u64 = itinerary.itinerary.iter().map(|d| d.daily_cost).sum();
        assert_eq!(itinerary.total_cost, sum);
        assert!(!itinerary.hotels.is_empty());
        assert_eq!(itinerary.over_budget, itinerary.total_cost > req.total_budget);
    }

    fn partial(value: serde_json::Value) -> PartialItinerary {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_local_synthesis_allocates_budget() {
        let req = request("Jaipur", 50000, 3, "");
        let itinerary = ItinerarySynthesizer::default().synthesize(&req, None).unwrap();
        assert_invariants(&req, &itinerary);

        // 16666 per day
        let day = &itinerary.itinerary[0];
        assert_eq!(day.morning.cost, 4166);
        assert_eq!(day.afternoon.cost, 3333);
        assert_eq!(day.evening.cost, 4166);
        assert_eq!(day.dining.cost, 2499);
        assert_eq!(day.hotel.price, 2499);
        assert_eq!(day.daily_cost, 16663);
        assert_eq!(itinerary.total_cost, 16663 * 3);
        assert!(!itinerary.over_budget);
        assert_eq!(itinerary.city_coordinates, DEFAULT_CITY_COORDINATES);
    }

    #[test]
    fn test_local_rounding_drift_is_bounded() {
        for (budget, days) in [(5000, 1), (25003, 5), (99_999, 7), (150_001, 30)] {
            let req = request("Goa", budget, days, "food");
            let itinerary = ItinerarySynthesizer::default().synthesize(&req, None).unwrap();
            assert_invariants(&req, &itinerary);
            let per_day = budget / days as u64;
            for day in &itinerary.itinerary {
                assert!(day.daily_cost <= per_day);
                assert!(per_day - day.daily_cost <= 5);
            }
        }
    }

    #[test]
    fn test_local_synthesis_is_deterministic() {
        let req = request("Paris", 120000, 4, "culture and nightlife");
        let synthesizer = ItinerarySynthesizer::default();
        let first = serde_json::to_string(&synthesizer.synthesize(&req, None).unwrap()).unwrap();
        let second = serde_json::to_string(&synthesizer.synthesize(&req, None).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_hotels_cycle_by_day() {
        let req = request("Delhi", 100000, 4, "");
        let itinerary = ItinerarySynthesizer::default().synthesize(&req, None).unwrap();
        let names: Vec<&str> = itinerary.itinerary.iter().map(|d| d.hotel.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["The Imperial", "Bloomrooms @ Janpath", "Zostel Delhi", "The Imperial"]
        );
        assert_eq!(itinerary.hotels.len(), 3);
    }

    #[test]
    fn test_listed_hotel_price_matches_nightly_charge() {
        let req = request("Delhi", 100000, 4, "");
        let itinerary = ItinerarySynthesizer::default().synthesize(&req, None).unwrap();
        for day in &itinerary.itinerary {
            let listed = itinerary
                .hotels
                .iter()
                .find(|hotel| hotel.name == day.hotel.name)
                .unwrap();
            assert_eq!(listed.price_per_night, day.hotel.price, "day {}", day.day);
        }
        // tiers still differ in rating
        assert!(itinerary.hotels[0].rating > itinerary.hotels[2].rating);
    }

    #[test]
    fn test_single_day_and_unknown_city() {
        let req = request("Nowhereville", 5000, 1, "");
        let itinerary = ItinerarySynthesizer::default().synthesize(&req, None).unwrap();
        assert_invariants(&req, &itinerary);
        assert_eq!(itinerary.itinerary.len(), 1);
        assert!(itinerary.itinerary[0].morning.activity.contains("Nowhereville"));
    }

    #[test]
    fn test_zero_days_is_a_synthesis_error() {
        let req = request("Goa", 5000, 0, "");
        let synthesizer = ItinerarySynthesizer::default();
        assert_eq!(synthesizer.synthesize(&req, None), Err(SynthesisError::InvalidDays(0)));
        let plan = partial(json!({"itinerary": [{"day": 1}]}));
        assert_eq!(synthesizer.synthesize(&req, Some(plan)), Err(SynthesisError::InvalidDays(0)));
    }

    #[test]
    fn test_reconcile_overrides_upstream_totals() {
        let req = request("Jaipur", 40000, 2, "");
        let plan = partial(json!({
            "summary": "Royal Rajasthan",
            "totalCost": 1,
            "hotels": [{"name": "Rambagh Palace", "pricePerNight": 25000, "rating": 9}],
            "itinerary": [
                {
                    "day": 1,
                    "dailyCost": 5,
                    "morning": {"activity": "Amber Fort", "cost": 500},
                    "afternoon": {"activity": "City Palace", "cost": 700},
                    "evening": {"activity": "Chokhi Dhani", "cost": 1200},
                    "dining": {"restaurant": "LMB", "cuisine": "Rajasthani", "cost": 800},
                    "hotel": {"name": "Rambagh Palace", "price": 25000}
                },
                {
                    "day": 2,
                    "dailyCost": 99999,
                    "morning": {"activity": "Hawa Mahal", "cost": 200}
                }
            ]
        }));

        let itinerary = ItinerarySynthesizer::default().synthesize(&req, Some(plan)).unwrap();
        assert_invariants(&req, &itinerary);
        assert_eq!(itinerary.summary, "Royal Rajasthan");
        assert_eq!(itinerary.itinerary[0].daily_cost, 28200);
        assert_eq!(itinerary.itinerary[1].daily_cost, 200);
        assert_eq!(itinerary.total_cost, 28400);
        assert!(!itinerary.over_budget);
        assert_eq!(itinerary.hotels[0].rating, 5.0);
    }

    #[test]
    fn test_reconcile_keeps_exact_sums_for_absurd_costs() {
        let req = request("Jaipur", 40000, 2, "");
        let plan = partial(json!({
            "itinerary": [
                {
                    "day": 1,
                    "morning": {"activity": "Amber Fort", "cost": "99999999999999999999999"},
                    "afternoon": {"activity": "City Palace", "cost": 700}
                },
                {"day": 2, "hotel": {"name": "Rambagh Palace", "price": 1e300}}
            ]
        }));

        let itinerary = ItinerarySynthesizer::default().synthesize(&req, Some(plan)).unwrap();
        assert_invariants(&req, &itinerary);
        let first = &itinerary.itinerary[0];
        assert_eq!(first.morning.cost, MAX_UPSTREAM_COST);
        assert_eq!(first.daily_cost, MAX_UPSTREAM_COST + 700);
        assert_eq!(itinerary.total_cost, 2 * MAX_UPSTREAM_COST + 700);
        assert!(itinerary.total_cost < 1 << 53);
        assert!(itinerary.over_budget);
    }

    #[test]
    fn test_reconcile_fills_missing_slots_with_placeholders() {
        let req = request("Goa", 30000, 3, "");
        let plan = partial(json!({
            "itinerary": [{"day": 2, "morning": {"cost": 300}}]
        }));

        let itinerary = ItinerarySynthesizer::default().synthesize(&req, Some(plan)).unwrap();
        assert_invariants(&req, &itinerary);

        let first = &itinerary.itinerary[0];
        assert_eq!(first.morning.activity, PLACEHOLDER_MORNING);
        assert_eq!(first.afternoon.activity, PLACEHOLDER_AFTERNOON);
        assert_eq!(first.evening.activity, PLACEHOLDER_EVENING);
        assert_eq!(first.dining.restaurant, PLACEHOLDER_RESTAURANT);
        assert_eq!(first.dining.cuisine, PLACEHOLDER_CUISINE);
        assert_eq!(first.hotel.name, PLACEHOLDER_HOTEL);
        assert_eq!(first.daily_cost, 0);

        let second = &itinerary.itinerary[1];
        assert_eq!(second.morning.activity, PLACEHOLDER_MORNING);
        assert_eq!(second.morning.cost, 300);
        assert_eq!(itinerary.total_cost, 300);

        // no upstream hotels: the local tier list keeps `hotels` non-empty
        assert_eq!(itinerary.hotels.len(), 3);
        assert!(itinerary.summary.contains("Goa"));
    }

    #[test]
    fn test_reconcile_trims_extra_days_and_matches_by_position() {
        let req = request("Goa", 20000, 2, "");
        let plan = partial(json!({
            "itinerary": [
                {"morning": {"activity": "Beach", "cost": 10}},
                {"morning": {"activity": "Fort", "cost": 20}},
                {"morning": {"activity": "Market", "cost": 30}}
            ]
        }));

        let itinerary = ItinerarySynthesizer::default().synthesize(&req, Some(plan)).unwrap();
        assert_invariants(&req, &itinerary);
        assert_eq!(itinerary.itinerary[0].morning.activity, "Beach");
        assert_eq!(itinerary.itinerary[1].morning.activity, "Fort");
        assert_eq!(itinerary.total_cost, 30);
    }

    #[test]
    fn test_reconcile_flags_over_budget() {
        let req = request("Mumbai", 10000, 1, "");
        let plan = partial(json!({
            "itinerary": [{"day": 1, "hotel": {"name": "The Taj Mahal Palace", "price": 30000}}]
        }));
        let itinerary = ItinerarySynthesizer::default().synthesize(&req, Some(plan)).unwrap();
        assert_eq!(itinerary.total_cost, 30000);
        assert!(itinerary.over_budget);
    }

    #[test]
    fn test_plan_without_days_falls_back_to_local() {
        let req = request("Goa", 30000, 3, "");
        let plan = partial(json!({"summary": "nothing useful", "itinerary": []}));
        let synthesizer = ItinerarySynthesizer::default();
        let with_plan = synthesizer.synthesize(&req, Some(plan)).unwrap();
        let local = synthesizer.synthesize(&req, None).unwrap();
        assert_eq!(with_plan, local);
    }
}
