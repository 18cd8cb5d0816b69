//! Rotating pools of activity, restaurant and hotel text for local synthesis.
//!
//! Selection is keyed by city and preference themes and rotates by day, so the
//! same request always yields the same plan.

use crate::error::SynthesisError;
use crate::models::{
    place::{PlaceCategory, PointOfInterest},
    trip_request::{TravelTheme, TripRequest},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotelTier {
    Luxury,
    MidRange,
    Budget,
}

impl HotelTier {
    pub const ALL: [HotelTier; 3] = [HotelTier::Luxury, HotelTier::MidRange, HotelTier::Budget];

    pub fn default_rating(&self) -> f32 {
        match self {
            HotelTier::Luxury => 4.7,
            HotelTier::MidRange => 4.2,
            HotelTier::Budget => 3.8,
        }
    }

    pub fn distance_from_center(&self) -> &'static str {
        match self {
            HotelTier::Luxury => "0.5 km from city center",
            HotelTier::MidRange => "1.8 km from city center",
            HotelTier::Budget => "3.5 km from city center",
        }
    }

    pub fn description(&self, city: &str) -> String {
        match self {
            HotelTier::Luxury => format!(
                "Luxury stay in the heart of {} with spa and fine dining",
                city
            ),
            HotelTier::MidRange => format!(
                "Comfortable mid-range hotel close to {}'s main sights",
                city
            ),
            HotelTier::Budget => format!("Clean, friendly budget option for exploring {}", city),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelOption {
    pub tier: HotelTier,
    pub name: String,
    pub rating: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityPool {
    morning: Vec<String>,
    afternoon: Vec<String>,
    evening: Vec<String>,
    dining: Vec<(String, String)>,
    hotels: Vec<HotelOption>,
}

impl ActivityPool {
    /// Pool for a request using built-in city data, extended by preference themes.
    pub fn for_request(req: &TripRequest) -> Self {
        let city = display_city(&req.city);
        let mut pool = match city_pool(&city) {
            Some(pool) => pool,
            None => generic_pool(&city),
        };
        pool.extend_with_themes(&req.themes(), &city);
        pool
    }

    /// Pool built from places lookup results; `None` when no attractions were found.
    pub fn from_places(req: &TripRequest, places: &[PointOfInterest]) -> Option<Self> {
        let attractions: Vec<&PointOfInterest> = places
            .iter()
            .filter(|p| p.category == PlaceCategory::Attraction)
            .collect();
        if attractions.is_empty() {
            return None;
        }

        let city = display_city(&req.city);
        let fallback = generic_pool(&city);

        // Deal attractions round-robin so each slot sees different places.
        let mut slots: [Vec<String>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for (i, place) in attractions.iter().enumerate() {
            slots[i % 3].push(format!("Visit {}", place.name));
        }
        let [morning, afternoon, evening] = slots;

        let dining: Vec<(String, String)> = places
            .iter()
            .filter(|p| p.category == PlaceCategory::Restaurant)
            .map(|p| (p.name.clone(), "Local cuisine".to_string()))
            .collect();

        let mut lodging = places.iter().filter(|p| p.category == PlaceCategory::Lodging);
        let hotels = HotelTier::ALL
            .iter()
            .zip(fallback.hotels.iter())
            .map(|(tier, generic)| match lodging.next() {
                Some(place) => HotelOption {
                    tier: *tier,
                    name: place.name.clone(),
                    rating: place.rating.unwrap_or_else(|| tier.default_rating()),
                },
                None => generic.clone(),
            })
            .collect();

        let mut pool = Self {
            morning: non_empty_or(morning, &fallback.morning),
            afternoon: non_empty_or(afternoon, &fallback.afternoon),
            evening: non_empty_or(evening, &fallback.evening),
            dining: non_empty_or(dining, &fallback.dining),
            hotels,
        };
        pool.extend_with_themes(&req.themes(), &city);
        Some(pool)
    }

    pub fn morning(&self, day: u32) -> Result<&str, SynthesisError> {
        pick(&self.morning, day, "morning").map(String::as_str)
    }

    pub fn afternoon(&self, day: u32) -> Result<&str, SynthesisError> {
        pick(&self.afternoon, day, "afternoon").map(String::as_str)
    }

    pub fn evening(&self, day: u32) -> Result<&str, SynthesisError> {
        pick(&self.evening, day, "evening").map(String::as_str)
    }

    /// `(restaurant, cuisine)` for the day
    pub fn dining(&self, day: u32) -> Result<(&str, &str), SynthesisError> {
        pick(&self.dining, day, "dining").map(|(r, c)| (r.as_str(), c.as_str()))
    }

    pub fn hotel_for_day(&self, day: u32) -> Result<&HotelOption, SynthesisError> {
        pick(&self.hotels, day, "hotel")
    }

    pub fn hotels(&self) -> &[HotelOption] {
        &self.hotels
    }

    fn extend_with_themes(&mut self, themes: &[TravelTheme], city: &str) {
        for theme in themes {
            let (morning, afternoon, evening, dining) = theme_entries(*theme, city);
            self.morning.push(morning);
            self.afternoon.push(afternoon);
            self.evening.push(evening);
            self.dining.push(dining);
        }
    }
}

/// Day 1 takes the first entry; later days rotate through the pool.
fn pick<'a, T>(items: &'a [T], day: u32, slot: &'static str) -> Result<&'a T, SynthesisError> {
    if items.is_empty() {
        return Err(SynthesisError::EmptyPool(slot));
    }
    let index = (day.saturating_sub(1) as usize) % items.len();
    Ok(&items[index])
}

fn non_empty_or<T: Clone>(items: Vec<T>, fallback: &[T]) -> Vec<T> {
    if items.is_empty() {
        fallback.to_vec()
    } else {
        items
    }
}

/// "new delhi, india " -> "New Delhi"
fn display_city(raw: &str) -> String {
    let name = raw.split(',').next().unwrap_or(raw).trim();
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn restaurants(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(name, cuisine)| (name.to_string(), cuisine.to_string()))
        .collect()
}

fn hotel_options(names: [&str; 3]) -> Vec<HotelOption> {
    HotelTier::ALL
        .iter()
        .zip(names)
        .map(|(tier, name)| HotelOption {
            tier: *tier,
            name: name.to_string(),
            rating: tier.default_rating(),
        })
        .collect()
}

fn city_pool(city: &str) -> Option<ActivityPool> {
    let pool = match city.to_lowercase().as_str() {
        "delhi" | "new delhi" => ActivityPool {
            morning: strings(&[
                "Visit Red Fort",
                "Explore Qutub Minar",
                "Walk through Lodhi Garden",
            ]),
            afternoon: strings(&[
                "Tour Humayun's Tomb",
                "Shop at Chandni Chowk",
                "Visit India Gate and Kartavya Path",
            ]),
            evening: strings(&[
                "Light show at Red Fort",
                "Evening aarti at Akshardham",
                "Stroll around Connaught Place",
            ]),
            dining: restaurants(&[
                ("Karim's", "Mughlai"),
                ("Bukhara", "North Indian"),
                ("Paranthe Wali Gali", "Street food"),
            ]),
            hotels: hotel_options(["The Imperial", "Bloomrooms @ Janpath", "Zostel Delhi"]),
        },
        "mumbai" | "bombay" => ActivityPool {
            morning: strings(&[
                "Visit Gateway of India",
                "Ferry to Elephanta Caves",
                "Walk the Banganga Tank",
            ]),
            afternoon: strings(&[
                "Explore Chhatrapati Shivaji Terminus",
                "Browse Colaba Causeway",
                "Tour Dhobi Ghat",
            ]),
            evening: strings(&[
                "Sunset at Marine Drive",
                "Juhu Beach stroll",
                "Bandra Bandstand walk",
            ]),
            dining: restaurants(&[
                ("Leopold Cafe", "Continental"),
                ("Trishna", "Seafood"),
                ("Swati Snacks", "Gujarati"),
            ]),
            hotels: hotel_options([
                "The Taj Mahal Palace",
                "Fariyas Hotel Colaba",
                "Zostel Mumbai",
            ]),
        },
        "jaipur" => ActivityPool {
            morning: strings(&[
                "Explore Amber Fort",
                "Visit Jantar Mantar",
                "Photograph Hawa Mahal",
            ]),
            afternoon: strings(&[
                "Tour City Palace",
                "Shop at Johari Bazaar",
                "Visit Albert Hall Museum",
            ]),
            evening: strings(&[
                "Sunset at Nahargarh Fort",
                "Cultural evening at Chokhi Dhani",
                "Walk around Jal Mahal",
            ]),
            dining: restaurants(&[
                ("Laxmi Misthan Bhandar", "Rajasthani"),
                ("Suvarna Mahal", "Royal Indian"),
                ("Rawat Mishthan Bhandar", "Street food"),
            ]),
            hotels: hotel_options(["Rambagh Palace", "Alsisar Haveli", "Moustache Jaipur"]),
        },
        "goa" => ActivityPool {
            morning: strings(&[
                "Relax at Palolem Beach",
                "Visit Basilica of Bom Jesus",
                "Spice plantation tour",
            ]),
            afternoon: strings(&[
                "Explore Fort Aguada",
                "Walk through Fontainhas",
                "Dolphin spotting boat ride",
            ]),
            evening: strings(&[
                "Sunset at Chapora Fort",
                "Saturday night market at Arpora",
                "Beach shack evening at Baga",
            ]),
            dining: restaurants(&[
                ("Fisherman's Wharf", "Goan"),
                ("Gunpowder", "South Indian"),
                ("Britto's", "Seafood"),
            ]),
            hotels: hotel_options([
                "Taj Exotica Resort & Spa",
                "Fairfield by Marriott Anjuna",
                "The Hosteller Goa",
            ]),
        },
        "paris" => ActivityPool {
            morning: strings(&[
                "Visit the Louvre",
                "Climb the Arc de Triomphe",
                "Explore Montmartre",
            ]),
            afternoon: strings(&[
                "Tour Musée d'Orsay",
                "Walk the Jardin du Luxembourg",
                "Visit Sainte-Chapelle",
            ]),
            evening: strings(&[
                "Seine river cruise",
                "Eiffel Tower at night",
                "Evening in Le Marais",
            ]),
            dining: restaurants(&[
                ("Le Comptoir du Relais", "French bistro"),
                ("Bouillon Chartier", "Traditional French"),
                ("L'As du Fallafel", "Middle Eastern"),
            ]),
            hotels: hotel_options(["Le Meurice", "Hôtel des Grands Boulevards", "Generator Paris"]),
        },
        _ => return None,
    };
    Some(pool)
}

fn generic_pool(city: &str) -> ActivityPool {
    ActivityPool {
        morning: vec![
            format!("Walking tour of {}'s old quarter", city),
            format!("Visit the main museum of {}", city),
            format!("Sunrise at {}'s best viewpoint", city),
        ],
        afternoon: vec![
            format!("Explore local markets in {}", city),
            format!("Guided heritage tour of {}", city),
            format!("Relax at a park in {}", city),
        ],
        evening: vec![
            format!("Sunset stroll through {}", city),
            format!("Cultural performance in {}", city),
            format!("Night market in {}", city),
        ],
        dining: vec![
            (format!("{} Spice House", city), "Local cuisine".to_string()),
            (format!("The {} Kitchen", city), "Regional specialties".to_string()),
            ("Street food lane".to_string(), "Street food".to_string()),
        ],
        hotels: HotelTier::ALL
            .iter()
            .map(|tier| HotelOption {
                tier: *tier,
                name: match tier {
                    HotelTier::Luxury => format!("{} Grand Palace", city),
                    HotelTier::MidRange => format!("{} Central Inn", city),
                    HotelTier::Budget => format!("{} Backpackers Lodge", city),
                },
                rating: tier.default_rating(),
            })
            .collect(),
    }
}

fn theme_entries(theme: TravelTheme, city: &str) -> (String, String, String, (String, String)) {
    match theme {
        TravelTheme::Adventure => (
            format!("Sunrise trek near {}", city),
            "Zip-lining or river rafting excursion".to_string(),
            "Night camping under the stars".to_string(),
            ("Trailhead Grill".to_string(), "Barbecue".to_string()),
        ),
        TravelTheme::Food => (
            "Street food breakfast trail".to_string(),
            format!("Cooking class with a {} chef", city),
            "Night food market crawl".to_string(),
            ("Chef's tasting table".to_string(), "Regional tasting menu".to_string()),
        ),
        TravelTheme::Culture => (
            format!("Heritage walk through historic {}", city),
            "Museum and gallery visit".to_string(),
            "Traditional music and dance show".to_string(),
            ("Heritage courtyard restaurant".to_string(), "Traditional thali".to_string()),
        ),
        TravelTheme::Nature => (
            format!("Morning nature walk outside {}", city),
            "Botanical garden and lake visit".to_string(),
            "Sunset at a scenic viewpoint".to_string(),
            ("Garden cafe".to_string(), "Farm-to-table".to_string()),
        ),
        TravelTheme::Nightlife => (
            "Late brunch at a rooftop cafe".to_string(),
            "Craft brewery tour".to_string(),
            format!("Bar hopping in {}'s nightlife district", city),
            ("Rooftop lounge".to_string(), "Fusion".to_string()),
        ),
        TravelTheme::Shopping => (
            "Morning at the artisan quarter".to_string(),
            format!("Shopping at {}'s famous bazaars", city),
            "Evening flea market".to_string(),
            ("Market food court".to_string(), "Street food".to_string()),
        ),
        TravelTheme::Relaxation => (
            "Sunrise yoga session".to_string(),
            "Spa and wellness afternoon".to_string(),
            "Slow evening at a quiet cafe".to_string(),
            ("Wellness kitchen".to_string(), "Healthy cuisine".to_string()),
        ),
    }
}
