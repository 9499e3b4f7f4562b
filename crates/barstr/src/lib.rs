//! Intake and reply pipeline for Barstr, a nostr bot that answers
//! `#barstr <place>` notes with nearby bars accepting bitcoin.

pub mod classifier;
pub mod error;
pub mod geocoder;
pub mod handler;
pub mod http;
pub mod i18n;
pub mod language;
pub mod ledger;
pub mod publisher;
pub mod reply;
pub mod types;
pub mod venues;

pub use classifier::{classify, extract_query, is_relevant, Classification};
pub use error::{Error, Result};
pub use geocoder::{Geocoder, GeocoderConfig, NominatimGeocoder};
pub use handler::{Decision, EventHandler, Ignored, Outcome, ReplyOrchestrator};
pub use http::create_http_client;
pub use i18n::{Localization, Templates};
pub use language::detect_language;
pub use ledger::ProcessedIds;
pub use publisher::{reply_builder, ReplyPublisher};
pub use reply::{compose_reply, Lookup};
pub use types::*;
pub use venues::{BtcMapVenueFinder, VenueFinder, VenueFinderConfig};
