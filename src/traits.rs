//! Boundary contracts around the planning pipeline.
//!
//! These are intentionally minimal. The pipeline consumes plain in-memory
//! data and never holds storage or session handles itself; collaborators
//! implement these traits and own their resources.

use crate::cluster::Cluster;
use crate::pipeline::ItineraryPlan;
use crate::poi::{Coordinate, Poi};

/// Read-only source of candidate POIs.
///
/// `categories` is an exact-match-any filter; an empty filter selects every
/// record. Fallibility (connections, parsing) belongs to construction of the
/// source, not to the query.
pub trait PoiSource {
    fn pois_in_categories(&self, categories: &[String]) -> Vec<Poi>;
}

/// Resolves a free-text address to a coordinate.
///
/// Returns `None` when the address has no match; adapters are expected to be
/// lossy at this boundary and map transport failures to `None` as well.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Option<Coordinate>;
}

/// Persists the cluster/POI graph.
///
/// Implementations must clear prior graph state before writing so that
/// re-running the whole pipeline is idempotent; clusters are never persisted
/// incrementally.
pub trait GraphSink {
    type Error;

    fn replace_clusters(&mut self, clusters: &[Cluster]) -> Result<(), Self::Error>;
}

/// Renders a finished plan for presentation (map, table, export file).
///
/// Purely consuming; nothing rendered feeds back into the pipeline.
pub trait RouteRenderer {
    type Error;

    fn render(&mut self, plan: &ItineraryPlan) -> Result<(), Self::Error>;
}
