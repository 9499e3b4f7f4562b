use nostr::Event;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TEXT_NOTE_KIND: u16 = 1;
pub const MENTION_TAG: &str = "p";

/// Marker matched case-insensitively against note content.
pub const HASHTAG_MARKER: &str = "#barstr";

/// `t` tag values the hashtag subscription asks relays for.
pub const SUBSCRIPTION_HASHTAGS: [&str; 2] = ["barstr", "Barstr"];

pub const DEFAULT_LOOKBACK_SECS: u64 = 300;
pub const LEDGER_CAPACITY: usize = 10_000;
pub const VENUE_REQUEST_LIMIT: usize = 50;
pub const MAX_LISTED_VENUES: usize = 10;
pub const UNKNOWN_VENUE_NAME: &str = "Unknown Place";

/// A relay event as seen by the pipeline. Never mutated after intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    pub id: String,
    pub author: String,
    pub content: String,
    pub tags: Vec<Vec<String>>,
    pub created_at: u64,
}

impl From<&Event> for InboundEvent {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_hex(),
            author: event.pubkey.to_hex(),
            content: event.content.clone(),
            tags: event
                .tags
                .iter()
                .map(|tag| tag.as_slice().to_vec())
                .collect(),
            created_at: event.created_at.as_u64(),
        }
    }
}

/// Rectangle in geocoder axis order: latitudes first, then longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBoundingBox {
    /// Builds a box from two latitude and two longitude bounds in any order.
    pub fn from_bounds(lat_a: f64, lat_b: f64, lon_a: f64, lon_b: f64) -> Self {
        Self {
            min_lat: lat_a.min(lat_b),
            max_lat: lat_a.max(lat_b),
            min_lon: lon_a.min(lon_b),
            max_lon: lon_a.max(lon_b),
        }
    }

    /// `west,south,east,north`, the order the venue provider expects.
    pub fn to_venue_query(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueCategory {
    Bar,
    Pub,
    Nightclub,
    Biergarten,
    Cafe,
    Restaurant,
}

impl VenueCategory {
    pub fn from_amenity(amenity: &str) -> Option<Self> {
        match amenity {
            "bar" => Some(Self::Bar),
            "pub" => Some(Self::Pub),
            "nightclub" => Some(Self::Nightclub),
            "biergarten" => Some(Self::Biergarten),
            "cafe" => Some(Self::Cafe),
            "restaurant" => Some(Self::Restaurant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Pub => "pub",
            Self::Nightclub => "nightclub",
            Self::Biergarten => "biergarten",
            Self::Cafe => "cafe",
            Self::Restaurant => "restaurant",
        }
    }
}

impl fmt::Display for VenueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub category: VenueCategory,
    pub lightning: bool,
    pub onchain: bool,
    /// Empty when the provider has no `addr:city`.
    pub city: String,
}

impl Venue {
    pub fn accepts_bitcoin(&self) -> bool {
        self.lightning || self.onchain
    }
}

/// Reply text bound to the event it answers. Consumed by a single send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyDraft {
    pub target_event_id: String,
    pub body: String,
}
