use crate::error::GeoError;
use crate::models::point::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance in kilometers, unrounded.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let delta_lat = (b.lat() - a.lat()).to_radians();
    let delta_lng = (b.lng() - a.lng()).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    // Rounding can push near-antipodal pairs just past 1.
    let haversine =
        (sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng).clamp(0.0, 1.0);
    let central_angle = 2.0 * haversine.sqrt().atan2((1.0 - haversine).sqrt());

    EARTH_RADIUS_KM * central_angle
}

// Bearing is clockwise from true north.
pub fn destination_point(
    origin: &GeoPoint,
    distance_km: f64,
    bearing_deg: f64,
) -> Result<GeoPoint, GeoError> {
    let angular = distance_km / EARTH_RADIUS_KM;
    let bearing = bearing_deg.to_radians();
    let lat1 = origin.lat().to_radians();
    let lng1 = origin.lng().to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lng2 = lng1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    GeoPoint::new(lat2.to_degrees(), normalize_lng(lng2.to_degrees()))
}

pub fn round_km(distance_km: f64) -> f64 {
    (distance_km * 100.0).round() / 100.0
}

pub fn normalize_lng(lng: f64) -> f64 {
    if (-180.0..=180.0).contains(&lng) {
        return lng;
    }
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{destination_point, haversine_km, normalize_lng, round_km};
    use crate::models::point::GeoPoint;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn zero_distance_for_same_point() {
        let p = point(35.68839378384561, 51.39163970947266);
        assert_eq!(round_km(haversine_km(&p, &p)), 0.0);
    }

    #[test]
    fn london_to_paris_is_around_343_km() {
        let london = point(51.5074, -0.1278);
        let paris = point(48.8566, 2.3522);
        let distance = haversine_km(&london, &paris);
        assert!((distance - 343.0).abs() < 5.0);
    }

    #[test]
    fn one_km_east_of_tehran_origin() {
        let origin = point(35.68839378384561, 51.39163970947266);
        let east = destination_point(&origin, 1.0, 90.0).unwrap();

        assert!(east.lng() > origin.lng());
        assert!((east.lat() - origin.lat()).abs() < 1e-4);
        assert_eq!(round_km(haversine_km(&origin, &east)), 1.0);
    }

    #[test]
    fn bearing_zero_moves_north() {
        let origin = point(10.0, 20.0);
        let north = destination_point(&origin, 5.0, 0.0).unwrap();
        assert!(north.lat() > origin.lat());
        assert!((north.lng() - origin.lng()).abs() < 1e-9);
    }

    #[test]
    fn projection_across_antimeridian_stays_in_bounds() {
        let origin = point(0.0, 179.99);
        let east = destination_point(&origin, 10.0, 90.0).unwrap();
        assert!(east.lng() < 0.0);
        assert!((haversine_km(&origin, &east) - 10.0).abs() < 0.01);
    }

    #[test]
    fn non_finite_distance_is_rejected() {
        let origin = point(0.0, 0.0);
        assert!(destination_point(&origin, f64::NAN, 90.0).is_err());
    }

    #[test]
    fn rounding_and_wrapping() {
        assert_eq!(round_km(1.004), 1.0);
        assert_eq!(round_km(1.006), 1.01);
        assert_eq!(normalize_lng(190.0), -170.0);
        assert_eq!(normalize_lng(-190.0), 170.0);
        assert_eq!(normalize_lng(180.0), 180.0);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..=90.0, lng1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lng2 in -180.0f64..=180.0,
        ) {
            let a = point(lat1, lng1);
            let b = point(lat2, lng2);
            prop_assert!((haversine_km(&a, &b) - haversine_km(&b, &a)).abs() < 1e-9);
            prop_assert_eq!(round_km(haversine_km(&a, &a)), 0.0);
        }

        #[test]
        fn projection_round_trips(
            lat in -85.0f64..=85.0,
            lng in -180.0f64..=180.0,
            distance in 0.1f64..=50.0,
            bearing in 0.0f64..360.0,
        ) {
            let origin = point(lat, lng);
            let projected = destination_point(&origin, distance, bearing).unwrap();
            prop_assert!((haversine_km(&origin, &projected) - distance).abs() <= 0.01);
        }
    }
}
