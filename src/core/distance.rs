use crate::models::{Coordinates, Restaurant};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance from the user to a restaurant, `None` when the user's position is unknown
#[inline]
pub fn distance_from(origin: Option<Coordinates>, restaurant: &Restaurant) -> Option<f64> {
    let there = restaurant.location();
    origin.map(|me| haversine_distance(me.lat, me.lng, there.lat, there.lng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::seed_restaurants;

    #[test]
    fn test_haversine_distance() {
        // Distance from London to Paris (approximately 344 km)
        let london_lat = 51.5074;
        let london_lon = -0.1278;
        let paris_lat = 48.8566;
        let paris_lon = 2.3522;

        let distance = haversine_distance(london_lat, london_lon, paris_lat, paris_lon);
        assert!((distance - 344.0).abs() < 10.0, "Distance should be ~344km, got {}", distance);
    }

    #[test]
    fn test_distance_without_origin_is_unknown() {
        let uptown = &seed_restaurants()[0];
        assert_eq!(distance_from(None, uptown), None);
    }

    #[test]
    fn test_distance_from_same_point_is_zero() {
        let uptown = &seed_restaurants()[0];
        let d = distance_from(Some(Coordinates::new(43.466, -80.519)), uptown).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_waterloo_to_cambridge() {
        // Uptown Waterloo to Cambridge Curry House is roughly 20 km
        let d = haversine_distance(43.466, -80.519, 43.360, -80.317);
        assert!(d > 15.0 && d < 25.0, "got {}", d);
    }
}
