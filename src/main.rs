//! CLI surface over the planning pipeline.
//!
//! Runs the pipeline in-process and reports a distinct exit code when there
//! are not enough POIs, so wrappers can tell "widen your criteria" apart
//! from a real failure.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use itinerary_planner::cluster::ClusterParams;
use itinerary_planner::error::PlannerError;
use itinerary_planner::export::{self, CsvExporter};
use itinerary_planner::geocode::{BanGeocoder, GeocoderConfig};
use itinerary_planner::pipeline::{self, PlanRequest};
use itinerary_planner::poi::Coordinate;
use itinerary_planner::source::JsonPoiSource;
use itinerary_planner::traits::{Geocoder, PoiSource, RouteRenderer};

/// Exit code for the "not enough POIs" outcome. Machine-detectable, distinct
/// from generic failures.
const EXIT_INSUFFICIENT_DATA: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "itinerary-planner")]
#[command(about = "Cluster points of interest around a location and order each day's visits")]
struct Args {
    /// Latitude of the reference point.
    #[arg(long, requires = "longitude", conflicts_with = "address")]
    latitude: Option<f64>,

    /// Longitude of the reference point.
    #[arg(long, requires = "latitude", conflicts_with = "address")]
    longitude: Option<f64>,

    /// Free-text address to geocode as the reference point.
    #[arg(long, required_unless_present = "latitude")]
    address: Option<String>,

    /// JSON file of POI records (label, latitude, longitude, category).
    #[arg(long)]
    pois: PathBuf,

    /// POI categories to include; repeat or list several.
    #[arg(long, num_args = 1.., required = true)]
    categories: Vec<String>,

    /// Search radius around the reference point, in kilometers.
    #[arg(long)]
    radius_km: f64,

    /// Number of visiting days (clusters) to plan.
    #[arg(long)]
    num_clusters: usize,

    /// Minimum POI count required for a plan to make sense.
    #[arg(long, default_value_t = 1)]
    min_poi: usize,

    /// Maximum POIs kept per day for the itinerary.
    #[arg(long, default_value_t = 10)]
    max_poi: usize,

    /// Write the itinerary table to this CSV file.
    #[arg(long)]
    csv_out: Option<PathBuf>,

    /// Write the itinerary map data to this GeoJSON file.
    #[arg(long)]
    geojson_out: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            if let RunError::Planner(PlannerError::InsufficientData { .. }) = error {
                eprintln!("hint: widen the radius or add more categories");
                ExitCode::from(EXIT_INSUFFICIENT_DATA)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error(transparent)]
    Source(#[from] itinerary_planner::source::SourceError),
    #[error("geocoder setup failed: {0}")]
    Geocoder(#[from] reqwest::Error),
    #[error("address \"{0}\" could not be resolved")]
    AddressNotFound(String),
    #[error("write {}: {}", .0.display(), .1)]
    Write(PathBuf, std::io::Error),
}

fn run(args: &Args) -> Result<(), RunError> {
    let reference = resolve_reference(args)?;

    let source = JsonPoiSource::from_path(&args.pois)?;
    let pois = source.pois_in_categories(&args.categories);

    let request = PlanRequest {
        reference,
        radius_km: args.radius_km,
        clusters: ClusterParams {
            num_clusters: args.num_clusters,
            min_per_cluster: args.min_poi,
            max_per_cluster: args.max_poi,
        },
    };
    let plan = pipeline::plan(&pois, &request)?;

    for day in &plan.days {
        println!(
            "{}: {} stops, {:.1} km",
            export::day_label(day.cluster_id),
            day.ordered_stops().len(),
            day.total_km
        );
    }
    println!("total: {:.1} km", plan.total_km());

    if let Some(path) = &args.csv_out {
        let file = File::create(path).map_err(|e| RunError::Write(path.clone(), e))?;
        CsvExporter::new(BufWriter::new(file))
            .render(&plan)
            .map_err(|e| RunError::Write(path.clone(), e))?;
    }
    if let Some(path) = &args.geojson_out {
        let file = File::create(path).map_err(|e| RunError::Write(path.clone(), e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &export::to_geojson(&plan))
            .map_err(|e| RunError::Write(path.clone(), std::io::Error::other(e)))?;
    }

    Ok(())
}

fn resolve_reference(args: &Args) -> Result<Coordinate, RunError> {
    if let (Some(latitude), Some(longitude)) = (args.latitude, args.longitude) {
        return Ok(Coordinate::new(latitude, longitude));
    }

    // clap guarantees an address when no explicit coordinates were given.
    let address = args.address.as_deref().unwrap_or_default();
    let geocoder = BanGeocoder::new(GeocoderConfig::default())?;
    geocoder
        .geocode(address)
        .ok_or_else(|| RunError::AddressNotFound(address.to_string()))
}
