//! Points of interest and their coordinates.

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// A WGS84 latitude/longitude pair in degrees.
///
/// The fields are plain `f64`s (deserialization can produce any value), so
/// range checking happens through [`Coordinate::is_in_range`] /
/// [`Coordinate::validate`] rather than a gatekeeping constructor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180].
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.is_in_range() {
            Ok(())
        } else {
            Err(PlannerError::validation(format!(
                "coordinate ({}, {}) is out of range",
                self.latitude, self.longitude
            )))
        }
    }
}

/// A labeled geographic location with a category tag.
///
/// Immutable once produced by the data source. Identity for downstream
/// graph dedup is (label, coordinate); see [`Poi::identity_key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub label: String,
    pub coordinate: Coordinate,
    pub category: String,
}

impl Poi {
    pub fn new(label: impl Into<String>, coordinate: Coordinate, category: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            coordinate,
            category: category.into(),
        }
    }

    /// Dedup key for graph persistence: two POIs with the same label and the
    /// same coordinate (to 1e-6 degrees) are the same entity.
    pub fn identity_key(&self) -> String {
        format!(
            "{}@{:.6},{:.6}",
            self.label, self.coordinate.latitude, self.coordinate.longitude
        )
    }
}
