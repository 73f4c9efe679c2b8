//! Route geometry as a decoded coordinate sequence.
//!
//! A day's tour is index-based; rendering collaborators (map, GeoJSON)
//! want the actual coordinates walked in order. Encoding to a compact
//! polyline format, if a frontend needs one, happens at that boundary,
//! not here.

use serde::{Deserialize, Serialize};

use crate::pipeline::DayPlan;

/// A route geometry as (latitude, longitude) points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// The closed day loop: every stop in visiting order, including the
    /// return to the first stop. A day without a tour yields an empty
    /// geometry.
    pub fn from_day(day: &DayPlan) -> Self {
        let points = match &day.tour {
            Some(tour) => tour
                .order
                .iter()
                .map(|&index| {
                    let c = day.stops[index].coordinate;
                    (c.latitude, c.longitude)
                })
                .collect(),
            None => Vec::new(),
        };
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}
