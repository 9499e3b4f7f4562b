use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::http::get_json;
use crate::types::GeoBoundingBox;
use crate::{Error, Result};

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Resolves free text to a bounding box. `None` means "not found", for
/// whatever reason.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, place: &str) -> Option<GeoBoundingBox>;
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub url: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GEOCODER_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    #[serde(default)]
    boundingbox: Option<Vec<Value>>,
}

/// Nominatim search client. Only the first match is used.
pub struct NominatimGeocoder {
    http: HttpClient,
    config: GeocoderConfig,
}

impl NominatimGeocoder {
    pub fn new(http: HttpClient, config: GeocoderConfig) -> Self {
        Self { http, config }
    }

    /// `Ok(None)` when the provider has no match.
    pub async fn lookup(&self, place: &str) -> Result<Option<GeoBoundingBox>> {
        let places: Vec<Place> = get_json(
            &self.http,
            &self.config.url,
            &[("q", place), ("format", "json"), ("limit", "1")],
        )
        .await?;

        let Some(first) = places.into_iter().next() else {
            return Ok(None);
        };
        let raw = first
            .boundingbox
            .ok_or_else(|| Error::MalformedResponse("missing boundingbox".to_string()))?;
        parse_bounding_box(&raw).map(Some)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, place: &str) -> Option<GeoBoundingBox> {
        match self.lookup(place).await {
            Ok(Some(bbox)) => Some(bbox),
            Ok(None) => {
                warn!(query = place, "No results found for city");
                None
            }
            Err(e) => {
                error!(query = place, "Error geocoding: {}", e);
                None
            }
        }
    }
}

/// Parses Nominatim's `[min_lat, max_lat, min_lon, max_lon]`. Values may be
/// numeric strings or plain numbers.
pub fn parse_bounding_box(raw: &[Value]) -> Result<GeoBoundingBox> {
    if raw.len() != 4 {
        return Err(Error::MalformedResponse(format!(
            "boundingbox has {} elements, expected 4",
            raw.len()
        )));
    }
    let mut bounds = [0f64; 4];
    for (slot, value) in bounds.iter_mut().zip(raw) {
        *slot = coordinate(value)?;
    }
    Ok(GeoBoundingBox::from_bounds(
        bounds[0], bounds[1], bounds[2], bounds[3],
    ))
}

fn coordinate(value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::MalformedResponse(format!("invalid coordinate: {value}")))
}
