use crate::models::Coordinates;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle (haversine) distance between two coordinate pairs.
///
/// # Arguments
/// * `origin` - Starting latitude/longitude in degrees
/// * `destination` - Destination latitude/longitude in degrees
///
/// # Returns
/// Distance in kilometres. Symmetric, and zero for identical points.
#[inline]
pub fn haversine_distance(origin: Coordinates, destination: Coordinates) -> f64 {
    let origin_lat = origin.lat.to_radians();
    let destination_lat = destination.lat.to_radians();
    let delta_lat = (destination.lat - origin.lat).to_radians();
    let delta_lng = (destination.lng - origin.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + origin_lat.cos() * destination_lat.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Whether a destination lies within a maximum travel radius of an origin.
///
/// Non-finite or non-positive radii never match.
#[inline]
pub fn is_within_radius(
    origin: Coordinates,
    destination: Coordinates,
    max_distance_km: f64,
) -> bool {
    if !max_distance_km.is_finite() || max_distance_km <= 0.0 {
        return false;
    }

    haversine_distance(origin, destination) <= max_distance_km
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEW_YORK: Coordinates = Coordinates {
        lat: 40.7128,
        lng: -74.0060,
    };

    #[test]
    fn test_haversine_distance() {
        // Distance from London to Paris (approximately 344 km)
        let london = Coordinates {
            lat: 51.5074,
            lng: -0.1278,
        };
        let paris = Coordinates {
            lat: 48.8566,
            lng: 2.3522,
        };

        let distance = haversine_distance(london, paris);
        assert!(
            (distance - 344.0).abs() < 10.0,
            "Distance should be ~344km, got {}",
            distance
        );
    }

    #[test]
    fn test_haversine_symmetric() {
        let brooklyn = Coordinates {
            lat: 40.6782,
            lng: -73.9442,
        };

        let forward = haversine_distance(NEW_YORK, brooklyn);
        let backward = haversine_distance(brooklyn, NEW_YORK);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        assert_eq!(haversine_distance(NEW_YORK, NEW_YORK), 0.0);
    }

    #[test]
    fn test_within_radius() {
        let brooklyn = Coordinates {
            lat: 40.6782,
            lng: -73.9442,
        };

        // Manhattan to Brooklyn is well under 50km
        assert!(is_within_radius(NEW_YORK, brooklyn, 50.0));
        assert!(!is_within_radius(NEW_YORK, brooklyn, 1.0));
    }

    #[test]
    fn test_within_radius_rejects_bad_radii() {
        assert!(!is_within_radius(NEW_YORK, NEW_YORK, 0.0));
        assert!(!is_within_radius(NEW_YORK, NEW_YORK, -5.0));
        assert!(!is_within_radius(NEW_YORK, NEW_YORK, f64::NAN));
        assert!(!is_within_radius(NEW_YORK, NEW_YORK, f64::INFINITY));
    }
}
