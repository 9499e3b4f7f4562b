//! Barstr bot process: identity, relay session and the listen loop around
//! the `barstr` reply pipeline.

pub mod config;
pub mod identity;
pub mod listen;
pub mod nostr_client;

use anyhow::Result;
use barstr::{create_http_client, BtcMapVenueFinder, EventHandler, NominatimGeocoder, ReplyOrchestrator};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

pub use config::Config;

/// Runs the bot until `shutdown` resolves.
pub async fn run<F>(config: Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let (keys, _) = identity::load_keys(config.secret_key());
    info!("Bot Public Key (npub): {}", identity::npub(&keys));

    let http = create_http_client(&config.user_agent, config.http_timeout)?;
    let geocoder = Arc::new(NominatimGeocoder::new(http.clone(), config.geocoder()));
    let venues = Arc::new(BtcMapVenueFinder::new(http, config.venue_finder()));

    let client = nostr_client::connect_client(&keys, &config).await?;

    // Taken before subscribing so no early event is missed.
    let notifications = client.notifications();
    nostr_client::subscribe_requests(&client, keys.public_key(), config.lookback_secs).await?;

    let orchestrator = ReplyOrchestrator::new(keys.public_key(), geocoder, venues);
    let publisher = Arc::new(nostr_client::NostrReplyPublisher::new(client.clone()));
    let handler = EventHandler::new(orchestrator, publisher);

    let result = listen::listen(notifications, &handler, shutdown).await;
    client.disconnect().await;
    result
}
