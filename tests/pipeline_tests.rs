//! End-to-end pipeline tests
//!
//! Covers geofiltering, cluster partitioning, full itinerary planning, the
//! persistence contract, and the export formats, using real Paris fixtures.

mod fixtures;

use std::collections::HashMap;

use itinerary_planner::cluster::{self, Cluster, ClusterParams};
use itinerary_planner::error::PlannerError;
use itinerary_planner::export::{to_geojson, CsvExporter};
use itinerary_planner::geo;
use itinerary_planner::geofilter;
use itinerary_planner::matrix::DistanceMatrix;
use itinerary_planner::pipeline::{self, PlanRequest};
use itinerary_planner::poi::{Coordinate, Poi};
use itinerary_planner::traits::{GraphSink, RouteRenderer};

use fixtures::paris_locations::{self, REFERENCE};

// ============================================================================
// Helpers
// ============================================================================

/// Kilometers per degree of latitude on the spherical model.
const KM_PER_DEGREE_LAT: f64 = std::f64::consts::PI * geo::EARTH_RADIUS_KM / 180.0;

fn paris() -> Coordinate {
    REFERENCE.coordinate()
}

/// A POI roughly `km` kilometers due north of the reference point.
fn poi_km_north(label: &str, km: f64) -> Poi {
    let reference = paris();
    Poi::new(
        label,
        Coordinate::new(reference.latitude + km / KM_PER_DEGREE_LAT, reference.longitude),
        "Monument",
    )
}

fn params(num_clusters: usize, min_per_cluster: usize, max_per_cluster: usize) -> ClusterParams {
    ClusterParams {
        num_clusters,
        min_per_cluster,
        max_per_cluster,
    }
}

/// Multiset of POI identities, for partition comparisons.
fn identity_counts(pois: impl IntoIterator<Item = Poi>) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for poi in pois {
        *counts.entry(poi.identity_key()).or_insert(0) += 1;
    }
    counts
}

/// Three tight groups of three POIs each, hundreds of kilometers apart.
fn three_cities() -> Vec<Poi> {
    let mut pois = Vec::new();
    for (city, lat, lng) in [
        ("paris", 48.8566, 2.3522),
        ("lyon", 45.7640, 4.8357),
        ("marseille", 43.2965, 5.3698),
    ] {
        for i in 0..3 {
            let offset = i as f64 * 0.01;
            pois.push(Poi::new(
                format!("{city}-{i}"),
                Coordinate::new(lat + offset, lng + offset),
                "Monument",
            ));
        }
    }
    pois
}

// ============================================================================
// Geofilter
// ============================================================================

#[test]
fn test_filter_keeps_exactly_the_pois_inside_the_radius() {
    // POIs ~2, ~5 and ~15 km out; a 10 km radius keeps the first two.
    let pois = vec![
        poi_km_north("near", 2.0),
        poi_km_north("mid", 5.0),
        poi_km_north("far", 15.0),
    ];

    let kept = geofilter::filter(paris(), &pois, 10.0).unwrap();
    let labels: Vec<&str> = kept.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["near", "mid"]);
}

#[test]
fn test_filter_output_is_a_subset_within_the_radius() {
    let mut pois = paris_locations::all_pois();
    pois.push(Poi::new("Lyon outlier", Coordinate::new(45.7640, 4.8357), "Monument"));

    let radius_km = 10.0;
    let kept = geofilter::filter(paris(), &pois, radius_km).unwrap();

    assert!(kept.len() < pois.len(), "the outlier should be filtered out");
    let input_keys = identity_counts(pois);
    for poi in &kept {
        assert!(
            input_keys.contains_key(&poi.identity_key()),
            "output contains a POI not present in the input"
        );
        assert!(geo::distance_km(paris(), poi.coordinate) <= radius_km);
    }
}

#[test]
fn test_filter_preserves_duplicates() {
    let poi = poi_km_north("twice", 1.0);
    let kept = geofilter::filter(paris(), &[poi.clone(), poi], 10.0).unwrap();
    assert_eq!(kept.len(), 2);
}

#[test]
fn test_filter_drops_out_of_range_poi_and_continues() {
    let pois = vec![
        poi_km_north("fine", 1.0),
        Poi::new("broken", Coordinate::new(200.0, 2.35), "Monument"),
    ];
    let kept = geofilter::filter(paris(), &pois, 10.0).unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].label, "fine");
}

// ============================================================================
// Clustering
// ============================================================================

#[test]
fn test_assignment_is_an_exact_partition() {
    let pois = three_cities();
    let clusters = cluster::assign(&pois, params(3, 2, 10)).unwrap();

    assert_eq!(clusters.len(), 3);
    let total: usize = clusters.iter().map(|c| c.members.len()).sum();
    assert_eq!(total, 9, "memberships should sum to the input size");

    let union = identity_counts(clusters.into_iter().flat_map(|c| c.members));
    assert_eq!(
        union,
        identity_counts(pois),
        "union of cluster members should equal the input as a multiset"
    );
}

#[test]
fn test_assignment_is_repeatable_across_runs() {
    let pois = three_cities();
    let first = cluster::assign(&pois, params(3, 2, 10)).unwrap();
    let second = cluster::assign(&pois, params(3, 2, 10)).unwrap();
    assert_eq!(first, second, "same input and seed should reproduce the partition");
}

#[test]
fn test_insufficient_data_stops_before_partitioning() {
    let pois = three_cities();
    let result = cluster::assign(&pois, params(3, 50, 10));
    assert_eq!(
        result,
        Err(PlannerError::InsufficientData {
            available: 9,
            required: 50,
        })
    );
}

#[test]
fn test_ids_are_dense_and_empty_clusters_survive() {
    let pois: Vec<Poi> = three_cities().into_iter().take(2).collect();
    let clusters = cluster::assign(&pois, params(5, 1, 10)).unwrap();
    assert_eq!(clusters.len(), 5);
    for (expected_id, cluster) in clusters.iter().enumerate() {
        assert_eq!(cluster.id, expected_id);
    }
    assert_eq!(clusters.iter().filter(|c| c.members.is_empty()).count(), 3);
}

// ============================================================================
// Full Pipeline
// ============================================================================

fn plan_request(num_clusters: usize, min: usize, max: usize) -> PlanRequest {
    PlanRequest {
        reference: paris(),
        radius_km: 10.0,
        clusters: params(num_clusters, min, max),
    }
}

#[test]
fn test_three_day_paris_itinerary() {
    let pois = paris_locations::all_pois();
    let plan = pipeline::plan(&pois, &plan_request(3, 6, 10)).unwrap();

    assert_eq!(plan.days.len(), 3);
    let clustered: usize = plan.clusters.iter().map(|c| c.members.len()).sum();
    assert_eq!(clustered, pois.len(), "every fixture POI is within 10 km");

    let mut planned_stops = 0;
    for day in &plan.days {
        let n = day.stops.len();
        planned_stops += n;
        if n == 0 {
            assert!(day.tour.is_none());
            assert_eq!(day.total_km, 0.0);
            continue;
        }
        let tour = day.tour.as_ref().unwrap();
        assert_eq!(tour.order.len(), n + 1);
        assert_eq!(tour.order[0], 0);
        assert_eq!(tour.order[n], 0);
        let mut interior: Vec<usize> = tour.order[..n].to_vec();
        interior.sort_unstable();
        assert_eq!(interior, (0..n).collect::<Vec<_>>());

        // The reported length must match the day's own distance matrix.
        let matrix = DistanceMatrix::build(&day.stops).unwrap();
        let recomputed: f64 = tour
            .order
            .windows(2)
            .map(|e| matrix.get(e[0], e[1]))
            .sum();
        assert!((day.total_km - recomputed).abs() < 1e-9);
    }
    assert!(planned_stops > 0);
}

#[test]
fn test_plans_are_repeatable_across_runs() {
    let pois = paris_locations::all_pois();
    let first = pipeline::plan(&pois, &plan_request(3, 6, 10)).unwrap();
    let second = pipeline::plan(&pois, &plan_request(3, 6, 10)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_max_per_cluster_truncates_without_repartitioning() {
    let pois = paris_locations::all_pois();
    let plan = pipeline::plan(&pois, &plan_request(1, 1, 5)).unwrap();

    // The single cluster keeps its full membership; only the day view is
    // capped.
    assert_eq!(plan.clusters[0].members.len(), pois.len());
    assert_eq!(plan.days[0].stops.len(), 5);
    assert_eq!(plan.days[0].tour.as_ref().unwrap().order.len(), 6);
}

#[test]
fn test_insufficient_data_surfaces_from_the_pipeline() {
    let pois = vec![poi_km_north("lonely", 1.0)];
    let result = pipeline::plan(&pois, &plan_request(2, 6, 10));
    assert!(matches!(
        result,
        Err(PlannerError::InsufficientData {
            available: 1,
            required: 6,
        })
    ));
}

#[test]
fn test_invalid_request_is_a_validation_error() {
    let pois = paris_locations::all_pois();

    let zero_radius = PlanRequest {
        radius_km: 0.0,
        ..plan_request(3, 1, 10)
    };
    assert!(matches!(
        pipeline::plan(&pois, &zero_radius),
        Err(PlannerError::Validation(_))
    ));

    let bad_reference = PlanRequest {
        reference: Coordinate::new(100.0, 2.35),
        ..plan_request(3, 1, 10)
    };
    assert!(matches!(
        pipeline::plan(&pois, &bad_reference),
        Err(PlannerError::Validation(_))
    ));
}

// ============================================================================
// Graph Persistence Contract
// ============================================================================

/// In-memory sink: cluster id -> member identity keys.
#[derive(Debug, Default, PartialEq)]
struct InMemoryGraph {
    belongs_to: HashMap<usize, Vec<String>>,
}

impl GraphSink for InMemoryGraph {
    type Error = std::convert::Infallible;

    fn replace_clusters(&mut self, clusters: &[Cluster]) -> Result<(), Self::Error> {
        // Prior graph state is cleared first: rerunning the pipeline must
        // not accumulate stale nodes.
        self.belongs_to.clear();
        for cluster in clusters {
            let members = cluster.members.iter().map(Poi::identity_key).collect();
            self.belongs_to.insert(cluster.id, members);
        }
        Ok(())
    }
}

#[test]
fn test_rerunning_persistence_is_idempotent() {
    let pois = paris_locations::all_pois();
    let plan = pipeline::plan(&pois, &plan_request(3, 6, 10)).unwrap();

    let mut graph = InMemoryGraph::default();
    graph.replace_clusters(&plan.clusters).unwrap();
    let after_first = graph.belongs_to.clone();

    graph.replace_clusters(&plan.clusters).unwrap();
    assert_eq!(graph.belongs_to, after_first);
    assert_eq!(graph.belongs_to.len(), 3);
}

#[test]
fn test_persistence_replaces_stale_state() {
    let pois = paris_locations::all_pois();
    let big = pipeline::plan(&pois, &plan_request(3, 6, 10)).unwrap();
    let small = pipeline::plan(&pois, &plan_request(2, 6, 10)).unwrap();

    let mut graph = InMemoryGraph::default();
    graph.replace_clusters(&big.clusters).unwrap();
    graph.replace_clusters(&small.clusters).unwrap();
    assert_eq!(graph.belongs_to.len(), 2, "stale clusters must not linger");
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_csv_export_covers_every_planned_stop() {
    let pois = paris_locations::all_pois();
    let plan = pipeline::plan(&pois, &plan_request(3, 6, 10)).unwrap();

    let mut buffer = Vec::new();
    CsvExporter::new(&mut buffer).render(&plan).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    let expected_rows: usize = plan.days.iter().map(|d| d.ordered_stops().len()).sum();
    assert_eq!(text.lines().count(), expected_rows + 1, "header plus one row per stop");
    assert!(text.starts_with("day,label,latitude,longitude"));
}

#[test]
fn test_geojson_export_has_a_loop_per_day() {
    let pois = paris_locations::all_pois();
    let plan = pipeline::plan(&pois, &plan_request(3, 6, 10)).unwrap();

    let geojson = to_geojson(&plan);
    let features = geojson["features"].as_array().unwrap();
    let stops: usize = plan.days.iter().map(|d| d.ordered_stops().len()).sum();
    let lines = features
        .iter()
        .filter(|f| f["geometry"]["type"] == "LineString")
        .count();
    let routed_days = plan.days.iter().filter(|d| !d.stops.is_empty()).count();
    assert_eq!(lines, routed_days);
    assert_eq!(features.len(), stops + lines);
}
