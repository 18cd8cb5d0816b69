use crate::models::itinerary::DayPlan;

/// Percentage of the per-day budget given to each slot. Always totals 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetSplit {
    pub morning: u32,
    pub afternoon: u32,
    pub evening: u32,
    pub dining: u32,
    pub hotel: u32,
}

impl Default for BudgetSplit {
    fn default() -> Self {
        Self {
            morning: 25,
            afternoon: 20,
            evening: 25,
            dining: 15,
            hotel: 15,
        }
    }
}

impl BudgetSplit {
    pub fn new(
        morning: u32,
        afternoon: u32,
        evening: u32,
        dining: u32,
        hotel: u32,
    ) -> Result<Self, String> {
        let split = Self {
            morning,
            afternoon,
            evening,
            dining,
            hotel,
        };
        match split.total_percent() {
            100 => Ok(split),
            total => Err(format!("slot percentages must total 100, got {}", total)),
        }
    }

    /// Parses "morning,afternoon,evening,dining,hotel", e.g. "25,20,25,15,15".
    pub fn parse(raw: &str) -> Result<Self, String> {
        let parts = raw
            .split(',')
            .map(|part| {
                part.trim()
                    .trim_end_matches('%')
                    .parse::<u32>()
                    .map_err(|_| format!("'{}' is not a whole percentage", part.trim()))
            })
            .collect::<Result<Vec<u32>, String>>()?;

        match parts.as_slice() {
            [morning, afternoon, evening, dining, hotel] => {
                Self::new(*morning, *afternoon, *evening, *dining, *hotel)
            }
            _ => Err(format!("expected 5 percentages, got {}", parts.len())),
        }
    }

    pub fn total_percent(&self) -> u32 {
        self.morning + self.afternoon + self.evening + self.dining + self.hotel
    }
}

/// Floored per-slot amounts for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAllocation {
    pub morning: u64,
    pub afternoon: u64,
    pub evening: u64,
    pub dining: u64,
    pub hotel: u64,
}

impl SlotAllocation {
    pub fn total(&self) -> u64 {
        self.morning + self.afternoon + self.evening + self.dining + self.hotel
    }
}

pub struct BudgetService;

impl BudgetService {
    /// floor(total / days); `None` for a zero-day trip
    pub fn per_day_budget(total_budget: u64, days: u32) -> Option<u64> {
        if days == 0 {
            None
        } else {
            Some(total_budget / u64::from(days))
        }
    }

    /// Split a day's budget across slots, flooring each share.
    pub fn allocate(per_day: u64, split: &BudgetSplit) -> SlotAllocation {
        SlotAllocation {
            morning: Self::share(per_day, split.morning),
            afternoon: Self::share(per_day, split.afternoon),
            evening: Self::share(per_day, split.evening),
            dining: Self::share(per_day, split.dining),
            hotel: Self::share(per_day, split.hotel),
        }
    }

    pub fn share(amount: u64, percent: u32) -> u64 {
        (u128::from(amount) * u128::from(percent) / 100) as u64
    }

    /// Exact sum of a day's five cost fields.
    pub fn daily_cost(day: &DayPlan) -> u64 {
        [
            day.morning.cost,
            day.afternoon.cost,
            day.evening.cost,
            day.dining.cost,
            day.hotel.price,
        ]
        .iter()
        .fold(0u64, |sum, cost| sum.saturating_add(*cost))
    }

    /// Overwrites each day's `daily_cost` from its parts and returns the trip total.
    pub fn reconcile(days: &mut [DayPlan]) -> u64 {
        days.iter_mut().fold(0u64, |total, day| {
            day.daily_cost = Self::daily_cost(day);
            total.saturating_add(day.daily_cost)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::itinerary::{ActivitySlot, DiningSlot, HotelStay};

    fn day(costs: [u64; 5], declared: u64) -> DayPlan {
        let slot = |cost| ActivitySlot {
            activity: "x".to_string(),
            cost,
        };
        DayPlan {
            day: 1,
            morning: slot(costs[0]),
            afternoon: slot(costs[1]),
            evening: slot(costs[2]),
            dining: DiningSlot {
                restaurant: "r".to_string(),
                cuisine: "c".to_string(),
                cost: costs[3],
            },
            hotel: HotelStay {
                name: "h".to_string(),
                price: costs[4],
            },
            daily_cost: declared,
        }
    }

    #[test]
    fn test_split_parsing() {
        assert_eq!(BudgetSplit::parse("25,20,25,15,15"), Ok(BudgetSplit::default()));
        assert_eq!(
            BudgetSplit::parse("30%, 20%, 20%, 15%, 15%").map(|s| s.morning),
            Ok(30)
        );
        assert!(BudgetSplit::parse("25,20,25,15").is_err());
        assert!(BudgetSplit::parse("25,20,25,15,16").is_err());
        assert!(BudgetSplit::parse("a,b,c,d,e").is_err());
    }

    #[test]
    fn test_allocation_floors_each_slot() {
        // 3333 per day: 833.25, 666.6, 833.25, 499.95, 499.95
        let allocation = BudgetService::allocate(3333, &BudgetSplit::default());
        assert_eq!(allocation.morning, 833);
        assert_eq!(allocation.afternoon, 666);
        assert_eq!(allocation.evening, 833);
        assert_eq!(allocation.dining, 499);
        assert_eq!(allocation.hotel, 499);
        assert_eq!(allocation.total(), 3330);
        assert!(3333 - allocation.total() <= 5);
    }

    #[test]
    fn test_per_day_budget() {
        assert_eq!(BudgetService::per_day_budget(50000, 3), Some(16666));
        assert_eq!(BudgetService::per_day_budget(50000, 0), None);
    }

    #[test]
    fn test_reconcile_ignores_declared_totals() {
        let mut days = vec![day([100, 200, 300, 400, 500], 9), day([1, 2, 3, 4, 5], 0)];
        let total = BudgetService::reconcile(&mut days);
        assert_eq!(days[0].daily_cost, 1500);
        assert_eq!(days[1].daily_cost, 15);
        assert_eq!(total, 1515);
    }
}
