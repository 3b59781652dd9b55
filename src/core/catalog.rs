//! Static Waterloo Region venue list and the read-only catalog around it.

use crate::models::{PriceTier, Restaurant};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Dietary tags the pickers offer
pub const DIET_TAGS: [&str; 5] = ["vegan", "vegetarian", "gluten_free", "halal", "kosher"];

#[allow(clippy::too_many_arguments)]
fn venue(
    id: &str,
    name: &str,
    cuisine: &str,
    price: PriceTier,
    rating: f64,
    diet: &[&str],
    lat: f64,
    lng: f64,
    access: &[&str],
) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: name.to_string(),
        cuisine: cuisine.to_string(),
        price,
        rating,
        diet: diet.iter().map(|s| s.to_string()).collect(),
        lat,
        lng,
        access: access.iter().map(|s| s.to_string()).collect(),
    }
}

/// The twelve seeded venues, in their fixed order
pub fn seed_restaurants() -> Vec<Restaurant> {
    use PriceTier::*;

    vec![
        venue("w1", "Uptown Pho", "Vietnamese", Budget, 4.5, &["gluten_free"], 43.466, -80.519, &["wheelchair_ramp"]),
        venue("w2", "King St. Pizza", "Pizza", Budget, 4.1, &["vegetarian"], 43.473, -80.524, &["step_free"]),
        venue("w3", "KW Tacos", "Mexican", Moderate, 4.4, &["halal"], 43.449, -80.489, &["braille_menu"]),
        venue("w4", "Gaukel Ramen", "Japanese", Moderate, 4.7, &["vegetarian"], 43.448, -80.492, &["accessible_washroom"]),
        venue("w5", "Cambridge Curry House", "Indian", Moderate, 4.6, &["vegan", "halal"], 43.360, -80.317, &["wheelchair_ramp"]),
        venue("w6", "St. Jacobs Smokehouse", "BBQ", Pricey, 4.2, &[], 43.539, -80.553, &["step_free"]),
        venue("w7", "University Falafel", "Middle Eastern", Budget, 4.3, &["halal", "vegetarian"], 43.473, -80.540, &["accessible_washroom"]),
        venue("w8", "Conestoga BBQ", "BBQ", Pricey, 4.1, &[], 43.422, -80.472, &[]),
        venue("w9", "Hespeler Shawarma", "Middle Eastern", Budget, 4.5, &["halal"], 43.430, -80.311, &[]),
        venue("w10", "Erb Street Sushi", "Japanese", Moderate, 4.4, &["gluten_free"], 43.462, -80.554, &["step_free"]),
        venue("w11", "Victoria Gelato", "Dessert", Budget, 4.8, &["vegetarian"], 43.446, -80.494, &["step_free"]),
        venue("w12", "Bridgeport Bistro", "Bistro", Moderate, 4.2, &["vegetarian"], 43.485, -80.509, &["wheelchair_ramp"]),
    ]
}

/// Immutable restaurant list shared by the server and sessions
#[derive(Debug, Clone)]
pub struct Catalog {
    restaurants: Arc<[Restaurant]>,
}

impl Catalog {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self {
            restaurants: restaurants.into(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_restaurants())
    }

    /// Every restaurant, unfiltered, in seed order
    pub fn all(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    /// Distinct cuisines, sorted
    pub fn cuisines(&self) -> Vec<&str> {
        self.restaurants
            .iter()
            .map(|r| r.cuisine.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}
