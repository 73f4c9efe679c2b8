//! File-backed POI source.
//!
//! Stand-in for the relational store behind the query interface: a JSON
//! array of `(label, latitude, longitude, category)` records. Range checking
//! is deliberately left to the geofilter so that one bad record surfaces as
//! a dropped POI, not a load failure.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::poi::{Coordinate, Poi};
use crate::traits::PoiSource;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("read POI file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse POI file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One record of the POI file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: String,
}

impl From<&PoiRecord> for Poi {
    fn from(record: &PoiRecord) -> Self {
        Poi::new(
            record.label.clone(),
            Coordinate::new(record.latitude, record.longitude),
            record.category.clone(),
        )
    }
}

/// POI source backed by a JSON file loaded once up front.
#[derive(Debug, Clone)]
pub struct JsonPoiSource {
    records: Vec<PoiRecord>,
}

impl JsonPoiSource {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, SourceError> {
        let records = serde_json::from_reader(reader)?;
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<PoiRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PoiSource for JsonPoiSource {
    fn pois_in_categories(&self, categories: &[String]) -> Vec<Poi> {
        self.records
            .iter()
            .filter(|record| {
                categories.is_empty() || categories.iter().any(|c| *c == record.category)
            })
            .map(Poi::from)
            .collect()
    }
}
