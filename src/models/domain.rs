use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Price tier, cheapest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Pricey,
    #[serde(rename = "$$$$")]
    Luxury,
}

impl PriceTier {
    pub const ALL: [PriceTier; 4] = [
        PriceTier::Budget,
        PriceTier::Moderate,
        PriceTier::Pricey,
        PriceTier::Luxury,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            PriceTier::Budget => "$",
            PriceTier::Moderate => "$$",
            PriceTier::Pricey => "$$$",
            PriceTier::Luxury => "$$$$",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for PriceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceTier::ALL
            .into_iter()
            .find(|tier| tier.symbol() == s)
            .ok_or_else(|| format!("unknown price tier '{}', expected one of $, $$, $$$, $$$$", s))
    }
}

/// A venue in the catalog. Seeded once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub price: PriceTier,
    pub rating: f64,
    #[serde(default)]
    pub diet: Vec<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub access: Vec<String>,
}

impl Restaurant {
    pub fn location(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lng,
        }
    }

    pub fn has_diet(&self, tag: &str) -> bool {
        self.diet.iter().any(|d| d == tag)
    }
}

/// A point on the globe, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0), custom(function = "finite"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0), custom(function = "finite"))]
    pub lng: f64,
}

/// Range checks let NaN through
fn finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// User-chosen filters. An unset field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct FilterCriteria {
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub price: Option<PriceTier>,
    #[serde(default, rename = "radiusKm")]
    #[validate(range(exclusive_min = 0.0), custom(function = "finite"))]
    pub radius_km: Option<f64>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.cuisine.is_none()
            && self.diet.is_none()
            && self.price.is_none()
            && self.radius_km.is_none()
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn with_diet(mut self, diet: impl Into<String>) -> Self {
        self.diet = Some(diet.into());
        self
    }

    pub fn with_price(mut self, price: PriceTier) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }
}

/// A restaurant annotated with its distance from the user, if known
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

impl Candidate {
    pub fn id(&self) -> &str {
        &self.restaurant.id
    }

    /// Distance rounded to one decimal, or a dash when unknown
    pub fn distance_label(&self) -> String {
        match self.distance_km {
            Some(km) => format!("{:.1} km", (km * 10.0).round() / 10.0),
            None => "— km".to_string(),
        }
    }
}

/// Saved favorite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: String,
    pub name: String,
    pub rating: f64,
    pub cuisine: String,
}

impl From<&Restaurant> for FavoriteEntry {
    fn from(r: &Restaurant) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            rating: r.rating,
            cuisine: r.cuisine.clone(),
        }
    }
}

/// One past pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub name: String,
    pub at: chrono::DateTime<chrono::Utc>,
}

impl HistoryEntry {
    pub fn now(r: &Restaurant) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            at: chrono::Utc::now(),
        }
    }
}

/// History row resolved against the catalog for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub id: String,
    pub name: String,
    pub cuisine: Option<String>,
    pub rating: Option<f64>,
    pub at: chrono::DateTime<chrono::Utc>,
}
