//! Pairwise great-circle distance matrix for one cluster's POIs.

use crate::error::PlannerError;
use crate::geo;
use crate::poi::Poi;

/// Square matrix of pairwise distances in kilometers, indexed by position
/// in the POI sequence it was built from. Symmetric, zero diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Build the matrix for a non-empty POI sequence. Each unordered pair is
    /// computed once and mirrored.
    pub fn build(pois: &[Poi]) -> Result<Self, PlannerError> {
        if pois.is_empty() {
            return Err(PlannerError::validation(
                "distance matrix requires at least one POI",
            ));
        }

        let n = pois.len();
        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i + 1..n {
                let km = geo::distance_km(pois[i].coordinate, pois[j].coordinate);
                rows[i][j] = km;
                rows[j][i] = km;
            }
        }

        Ok(Self { rows })
    }

    /// Wrap externally supplied rows (e.g. durations from a routing API)
    /// without validation; the solver checks shape and entries itself.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}
