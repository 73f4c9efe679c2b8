//! Day-sized grouping of POIs via centroid-based partitioning.
//!
//! Lloyd's k-means over raw (latitude, longitude), which is an adequate
//! Euclidean proxy at sightseeing radii. Initial centers come from a seeded
//! shuffle so repeated runs over identical input produce identical
//! assignments.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use crate::error::PlannerError;
use crate::poi::Poi;

/// Fixed seed for center initialization. Partitioning must be bit-for-bit
/// reproducible across runs, so the seed is part of the contract.
pub const KMEANS_SEED: u64 = 42;

/// Upper bound on Lloyd iterations; convergence normally stops the loop
/// much earlier.
const MAX_ITERATIONS: usize = 100;

/// A group of POIs assigned to the same visiting day.
///
/// Ids are dense zero-based indices in the order produced by the
/// partitioning run, not persisted identity: clusters are rebuilt from
/// scratch on every invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub id: usize,
    pub members: Vec<Poi>,
}

impl Cluster {
    /// Members capped for downstream consumption (reporting, export,
    /// per-day routing). The cap is a presentation-layer limit: the
    /// partitioning itself carries no per-cluster capacity constraint, and
    /// an oversized cluster keeps its full membership here.
    pub fn capped_members(&self, max_per_cluster: usize) -> &[Poi] {
        let limit = self.members.len().min(max_per_cluster);
        &self.members[..limit]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    pub num_clusters: usize,
    /// Minimum total POI count required for partitioning to be meaningful.
    pub min_per_cluster: usize,
    /// Presentation-layer cap on members handed downstream per cluster.
    pub max_per_cluster: usize,
}

/// Partition `pois` into `params.num_clusters` groups.
///
/// Every input POI lands in exactly one cluster; empty clusters are
/// preserved so callers can detect degenerate partitions. Fails with
/// `InsufficientData` before any partitioning work when fewer POIs are
/// available than `min_per_cluster` requires.
pub fn assign(pois: &[Poi], params: ClusterParams) -> Result<Vec<Cluster>, PlannerError> {
    if params.num_clusters == 0 {
        return Err(PlannerError::validation("at least one cluster is required"));
    }
    if pois.len() < params.min_per_cluster {
        return Err(PlannerError::InsufficientData {
            available: pois.len(),
            required: params.min_per_cluster,
        });
    }

    let assignments = kmeans_assignments(pois, params.num_clusters);

    let mut clusters: Vec<Cluster> = (0..params.num_clusters)
        .map(|id| Cluster {
            id,
            members: Vec::new(),
        })
        .collect();
    for (poi, &cluster_id) in pois.iter().zip(&assignments) {
        clusters[cluster_id].members.push(poi.clone());
    }

    debug!(
        pois = pois.len(),
        clusters = params.num_clusters,
        empty = clusters.iter().filter(|c| c.members.is_empty()).count(),
        "cluster assignment done"
    );
    Ok(clusters)
}

/// Lloyd's algorithm over (lat, lng). Returns one cluster index per POI.
fn kmeans_assignments(pois: &[Poi], k: usize) -> Vec<usize> {
    let n = pois.len();
    if n == 0 {
        return Vec::new();
    }
    if k >= n {
        // Degenerate request: every POI its own cluster, the rest empty.
        return (0..n).collect();
    }

    let points: Vec<(f64, f64)> = pois
        .iter()
        .map(|poi| (poi.coordinate.latitude, poi.coordinate.longitude))
        .collect();

    // Seeded shuffle picks k distinct points as initial centers.
    let mut rng = StdRng::seed_from_u64(KMEANS_SEED);
    let mut candidates: Vec<usize> = (0..n).collect();
    candidates.shuffle(&mut rng);
    let mut centers: Vec<(f64, f64)> = candidates[..k].iter().map(|&i| points[i]).collect();

    let mut assignments = vec![0usize; n];
    for _ in 0..MAX_ITERATIONS {
        // Assignment sweep. Strict `<` keeps ties on the lowest cluster index.
        let mut changed = false;
        for (i, point) in points.iter().enumerate() {
            let mut best_cluster = 0;
            let mut best_dist = f64::INFINITY;
            for (j, center) in centers.iter().enumerate() {
                let dist = squared_dist(*point, *center);
                if dist < best_dist {
                    best_dist = dist;
                    best_cluster = j;
                }
            }
            if assignments[i] != best_cluster {
                assignments[i] = best_cluster;
                changed = true;
            }
        }

        if !changed {
            break;
        }

        // Update sweep: centers move to the mean of their members; a center
        // that lost all members stays put.
        let mut sums = vec![(0.0, 0.0); k];
        let mut counts = vec![0usize; k];
        for (i, point) in points.iter().enumerate() {
            let cluster = assignments[i];
            sums[cluster].0 += point.0;
            sums[cluster].1 += point.1;
            counts[cluster] += 1;
        }
        for j in 0..k {
            if counts[j] > 0 {
                centers[j] = (sums[j].0 / counts[j] as f64, sums[j].1 / counts[j] as f64);
            }
        }
    }

    assignments
}

fn squared_dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)
}
