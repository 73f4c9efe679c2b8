//! Great-circle distance on a spherical Earth model.
//!
//! Straight-line distance ignores roads; the planner only needs a consistent
//! metric for grouping and ordering nearby attractions, where the spherical
//! approximation is plenty.

use crate::poi::Coordinate;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometers.
///
/// Identical points yield exactly 0. The square root argument is clamped to
/// 1 so rounding on near-antipodal pairs cannot push `asin` out of domain.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}
