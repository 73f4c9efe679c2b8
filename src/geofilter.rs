//! Radius filtering of candidate POIs around a reference coordinate.

use tracing::{debug, warn};

use crate::error::PlannerError;
use crate::geo;
use crate::poi::{Coordinate, Poi};

/// Keep the POIs within `radius_km` of `reference`.
///
/// A candidate with an out-of-range coordinate is dropped with a warning
/// rather than failing the run; one bad record should not block an otherwise
/// valid batch. Duplicates pass through untouched (graph persistence dedups
/// by identity downstream).
///
/// Fails with a validation error only when the reference itself is out of
/// range or the radius is not strictly positive.
pub fn filter(reference: Coordinate, pois: &[Poi], radius_km: f64) -> Result<Vec<Poi>, PlannerError> {
    reference.validate()?;
    if !(radius_km > 0.0) {
        return Err(PlannerError::validation(format!(
            "radius must be positive, got {radius_km}"
        )));
    }

    let mut kept = Vec::new();
    for poi in pois {
        if !poi.coordinate.is_in_range() {
            warn!(
                label = %poi.label,
                latitude = poi.coordinate.latitude,
                longitude = poi.coordinate.longitude,
                "dropping POI with out-of-range coordinates"
            );
            continue;
        }
        if geo::distance_km(reference, poi.coordinate) <= radius_km {
            kept.push(poi.clone());
        }
    }

    debug!(candidates = pois.len(), kept = kept.len(), radius_km, "geofilter done");
    Ok(kept)
}
