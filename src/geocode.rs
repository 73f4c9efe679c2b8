//! BAN (Base Adresse Nationale) HTTP adapter for geocoding.

use serde::Deserialize;
use tracing::warn;

use crate::poi::Coordinate;
use crate::traits::Geocoder;

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-adresse.data.gouv.fr".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BanGeocoder {
    config: GeocoderConfig,
    client: reqwest::blocking::Client,
}

impl BanGeocoder {
    pub fn new(config: GeocoderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for BanGeocoder {
    fn geocode(&self, address: &str) -> Option<Coordinate> {
        let url = format!("{}/search/", self.config.base_url);

        let response = self
            .client
            .get(url)
            .query(&[("q", address), ("limit", "1")])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<SearchResponse>());

        let body = match response {
            Ok(body) => body,
            Err(err) => {
                warn!(%address, error = %err, "geocoding request failed");
                return None;
            }
        };

        body.features.first().and_then(|feature| {
            // GeoJSON order is [longitude, latitude].
            let coordinate = Coordinate::new(
                *feature.geometry.coordinates.get(1)?,
                *feature.geometry.coordinates.first()?,
            );
            coordinate.is_in_range().then_some(coordinate)
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<f64>,
}
