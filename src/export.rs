//! Presentation-side exports: day labels, CSV table, GeoJSON map data.

use std::borrow::Cow;
use std::io::{self, Write};

use serde_json::{json, Value};

use crate::pipeline::{DayPlan, ItineraryPlan};
use crate::polyline::Polyline;
use crate::traits::RouteRenderer;

/// Marker colors, one per day, cycling when a plan has more days.
pub const DAY_COLORS: &[&str] = &[
    "red",
    "blue",
    "green",
    "purple",
    "orange",
    "lightgreen",
    "pink",
    "white",
    "gray",
    "black",
];

pub fn day_color(cluster_id: usize) -> &'static str {
    DAY_COLORS[cluster_id % DAY_COLORS.len()]
}

/// Human-facing day label, e.g. `red - Day 1`.
pub fn day_label(cluster_id: usize) -> String {
    format!("{} - Day {}", day_color(cluster_id), cluster_id + 1)
}

// ============================================================================
// CSV
// ============================================================================

/// Writes `day,label,latitude,longitude` rows, stops in visiting order.
pub struct CsvExporter<W> {
    writer: W,
}

impl<W: Write> CsvExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> RouteRenderer for CsvExporter<W> {
    type Error = io::Error;

    fn render(&mut self, plan: &ItineraryPlan) -> Result<(), Self::Error> {
        writeln!(self.writer, "day,label,latitude,longitude")?;
        for day in &plan.days {
            let label = day_label(day.cluster_id);
            for poi in day.ordered_stops() {
                writeln!(
                    self.writer,
                    "{},{},{},{}",
                    csv_field(&label),
                    csv_field(&poi.label),
                    poi.coordinate.latitude,
                    poi.coordinate.longitude
                )?;
            }
        }
        self.writer.flush()
    }
}

/// Quote a field when it contains a separator, quote, or newline.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

// ============================================================================
// GeoJSON
// ============================================================================

/// FeatureCollection with one Point per stop and one LineString per day
/// loop. GeoJSON positions are [longitude, latitude].
pub fn to_geojson(plan: &ItineraryPlan) -> Value {
    let mut features = Vec::new();
    for day in &plan.days {
        features.extend(day_features(day));
    }
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn day_features(day: &DayPlan) -> Vec<Value> {
    let label = day_label(day.cluster_id);
    let mut features: Vec<Value> = day
        .ordered_stops()
        .iter()
        .enumerate()
        .map(|(stop_number, poi)| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [poi.coordinate.longitude, poi.coordinate.latitude],
                },
                "properties": {
                    "day": label,
                    "color": day_color(day.cluster_id),
                    "label": poi.label,
                    "category": poi.category,
                    "stop": stop_number + 1,
                },
            })
        })
        .collect();

    let loop_points: Vec<[f64; 2]> = Polyline::from_day(day)
        .into_points()
        .into_iter()
        .map(|(lat, lng)| [lng, lat])
        .collect();
    if loop_points.len() > 1 {
        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": loop_points,
            },
            "properties": {
                "day": label,
                "color": day_color(day.cluster_id),
                "total_km": day.total_km,
            },
        }));
    }

    features
}
