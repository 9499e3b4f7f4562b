use barstr::geocoder::DEFAULT_GEOCODER_URL;
use barstr::http::{DEFAULT_HTTP_TIMEOUT, DEFAULT_USER_AGENT};
use barstr::venues::DEFAULT_VENUES_URL;
use barstr::{GeocoderConfig, VenueFinderConfig, DEFAULT_LOOKBACK_SECS, VENUE_REQUEST_LIMIT};
use std::time::Duration;

/// Bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret key (nsec or hex). A fresh identity is generated when unset.
    pub secret_key: Option<String>,

    /// Relays to read from and publish to
    pub relays: Vec<String>,

    pub geocoder_url: String,
    pub venues_url: String,
    pub user_agent: String,
    pub http_timeout: Duration,

    /// How far back the subscriptions reach at startup
    pub lookback_secs: u64,
}

pub fn default_relays() -> Vec<String> {
    vec![
        "wss://relay.damus.io".to_string(),
        "wss://relay.primal.net".to_string(),
        "wss://relay.nostr.band".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret_key: None,
            relays: default_relays(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            venues_url: DEFAULT_VENUES_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            lookback_secs: DEFAULT_LOOKBACK_SECS,
        }
    }
}

impl Config {
    /// Relays with surrounding whitespace and blanks removed, falling back
    /// to the defaults when nothing usable is configured.
    pub fn resolved_relays(&self) -> Vec<String> {
        let relays: Vec<String> = self
            .relays
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(String::from)
            .collect();
        if relays.is_empty() {
            default_relays()
        } else {
            relays
        }
    }

    /// The secret key, unless it is blank.
    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn geocoder(&self) -> GeocoderConfig {
        GeocoderConfig {
            url: self.geocoder_url.clone(),
        }
    }

    pub fn venue_finder(&self) -> VenueFinderConfig {
        VenueFinderConfig {
            url: self.venues_url.clone(),
            limit: VENUE_REQUEST_LIMIT,
        }
    }
}
