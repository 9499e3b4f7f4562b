use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::error;

use crate::http::get_json;
use crate::types::{GeoBoundingBox, Venue, VenueCategory, UNKNOWN_VENUE_NAME, VENUE_REQUEST_LIMIT};
use crate::Result;

pub const DEFAULT_VENUES_URL: &str = "https://api.btcmap.org/v2/elements";

/// Lists bitcoin-accepting bars and similar places inside a box.
///
/// An empty list covers both "nothing there" and "provider failed".
#[async_trait]
pub trait VenueFinder: Send + Sync {
    async fn find(&self, bbox: &GeoBoundingBox) -> Vec<Venue>;
}

#[derive(Debug, Clone)]
pub struct VenueFinderConfig {
    pub url: String,
    pub limit: usize,
}

impl Default for VenueFinderConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_VENUES_URL.to_string(),
            limit: VENUE_REQUEST_LIMIT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Element {
    #[serde(default)]
    osm_json: Option<OsmJson>,
}

#[derive(Debug, Deserialize)]
struct OsmJson {
    #[serde(default)]
    tags: Option<Map<String, Value>>,
}

/// BTC Map elements client.
pub struct BtcMapVenueFinder {
    http: HttpClient,
    config: VenueFinderConfig,
}

impl BtcMapVenueFinder {
    pub fn new(http: HttpClient, config: VenueFinderConfig) -> Self {
        Self { http, config }
    }

    pub async fn fetch(&self, bbox: &GeoBoundingBox) -> Result<Vec<Venue>> {
        let bounding_box = bbox.to_venue_query();
        let limit = self.config.limit.to_string();
        let elements: Vec<Element> = get_json(
            &self.http,
            &self.config.url,
            &[("bounding_box", bounding_box.as_str()), ("limit", limit.as_str())],
        )
        .await?;

        Ok(elements
            .iter()
            .filter_map(|el| el.osm_json.as_ref()?.tags.as_ref())
            .filter_map(venue_from_tags)
            .collect())
    }
}

#[async_trait]
impl VenueFinder for BtcMapVenueFinder {
    async fn find(&self, bbox: &GeoBoundingBox) -> Vec<Venue> {
        match self.fetch(bbox).await {
            Ok(venues) => venues,
            Err(e) => {
                error!(bbox = %bbox.to_venue_query(), "Error fetching from BTCmap: {}", e);
                Vec::new()
            }
        }
    }
}

fn tag<'a>(tags: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    tags.get(key).and_then(Value::as_str)
}

/// Builds a venue from OSM tags, or `None` if the amenity is outside the
/// listed categories or no bitcoin payment is accepted.
pub fn venue_from_tags(tags: &Map<String, Value>) -> Option<Venue> {
    let category = tag(tags, "amenity").and_then(VenueCategory::from_amenity)?;
    let lightning = tag(tags, "payment:lightning") == Some("yes");
    let onchain = tag(tags, "payment:onchain") == Some("yes");
    if !(lightning || onchain) {
        return None;
    }

    let name = tag(tags, "name")
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_VENUE_NAME);

    Some(Venue {
        name: name.to_string(),
        category,
        lightning,
        onchain,
        city: tag(tags, "addr:city").unwrap_or_default().to_string(),
    })
}
