//! The three-stage planning pipeline: filter, cluster, route.
//!
//! Pure computation over in-memory POIs. Each invocation starts from fresh
//! inputs and returns fresh outputs; nothing is cached between runs and no
//! I/O happens here. Persistence and rendering consume the result through
//! the boundary traits.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::cluster::{self, Cluster, ClusterParams};
use crate::error::PlannerError;
use crate::geofilter;
use crate::matrix::DistanceMatrix;
use crate::poi::{Coordinate, Poi};
use crate::solver::{self, Tour};

/// Parameters for one planning run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    pub reference: Coordinate,
    pub radius_km: f64,
    pub clusters: ClusterParams,
}

/// One visiting day: the cluster's stops (capped to the per-cluster limit)
/// and the tour ordering them. `tour.order` indexes into `stops`, with the
/// first stop as depot. An empty cluster produces a day with no stops and
/// no tour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub cluster_id: usize,
    pub stops: Vec<Poi>,
    pub tour: Option<Tour>,
    pub total_km: f64,
}

impl DayPlan {
    /// Stops in visiting order, depot first; the closing return leg is
    /// omitted.
    pub fn ordered_stops(&self) -> Vec<&Poi> {
        match &self.tour {
            Some(tour) => tour.order[..tour.order.len() - 1]
                .iter()
                .map(|&index| &self.stops[index])
                .collect(),
            None => self.stops.iter().collect(),
        }
    }
}

/// Result of a full planning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryPlan {
    pub reference: Coordinate,
    pub clusters: Vec<Cluster>,
    pub days: Vec<DayPlan>,
}

impl ItineraryPlan {
    pub fn total_km(&self) -> f64 {
        self.days.iter().map(|day| day.total_km).sum()
    }
}

/// Run the pipeline: geofilter, partition into day clusters, then order each
/// day's visits.
///
/// Stages are strictly sequential, but the per-day routing has no cross-day
/// data dependency and runs in parallel. Any stage error aborts the run;
/// partial plans are never returned.
pub fn plan(pois: &[Poi], request: &PlanRequest) -> Result<ItineraryPlan, PlannerError> {
    let filtered = geofilter::filter(request.reference, pois, request.radius_km)?;
    let clusters = cluster::assign(&filtered, request.clusters)?;

    let days = clusters
        .par_iter()
        .map(|cluster| route_cluster(cluster, request.clusters.max_per_cluster))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        days = days.len(),
        total_km = days.iter().map(|d| d.total_km).sum::<f64>(),
        "itinerary planned"
    );
    Ok(ItineraryPlan {
        reference: request.reference,
        clusters,
        days,
    })
}

/// Route one cluster: cap its members for downstream consumption, build the
/// pairwise matrix, and solve from the first stop as depot.
fn route_cluster(cluster: &Cluster, max_per_cluster: usize) -> Result<DayPlan, PlannerError> {
    let stops: Vec<Poi> = cluster.capped_members(max_per_cluster).to_vec();
    if stops.is_empty() {
        return Ok(DayPlan {
            cluster_id: cluster.id,
            stops,
            tour: None,
            total_km: 0.0,
        });
    }

    let matrix = DistanceMatrix::build(&stops)?;
    let tour = solver::solve(matrix.rows(), 0)?;
    Ok(DayPlan {
        cluster_id: cluster.id,
        stops,
        total_km: tour.total_km,
        tour: Some(tour),
    })
}
