use crate::models::{GeoCoordinate, QiblaResult};
use crate::utils::format::format_thousands;

/// Mean Earth radius used by the haversine distance.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// The Kaaba in Mecca.
pub const KAABA: GeoCoordinate = GeoCoordinate {
    lat: 21.4225,
    lng: 39.8262,
};

/// Initial great-circle bearing from `from` to `to`, degrees in [0, 360).
pub fn initial_bearing(from: GeoCoordinate, to: GeoCoordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Haversine distance in kilometres.
pub fn haversine_km(from: GeoCoordinate, to: GeoCoordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1.0 for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}

pub fn bearing_and_distance(from: GeoCoordinate, to: GeoCoordinate) -> QiblaResult {
    let mut direction = (initial_bearing(from, to) * 10.0).round() / 10.0;
    if direction >= 360.0 {
        direction = 0.0;
    }
    let distance_km = haversine_km(from, to);

    QiblaResult {
        direction,
        distance_km,
        distance: format!("{} km", format_thousands(distance_km)),
    }
}

/// Qibla direction and distance from `from` to the Kaaba.
pub fn qibla_from(from: GeoCoordinate) -> QiblaResult {
    bearing_and_distance(from, KAABA)
}

/// Eight-point compass label for a bearing, e.g. 58.5 -> "NE".
pub fn compass_point(bearing: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let idx = ((bearing.rem_euclid(360.0) + 22.5) / 45.0).floor() as usize % 8;
    POINTS[idx]
}
