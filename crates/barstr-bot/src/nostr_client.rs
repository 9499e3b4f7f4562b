use anyhow::{Context, Result};
use async_trait::async_trait;
use barstr::{reply_builder, ReplyDraft, ReplyPublisher, SUBSCRIPTION_HASHTAGS, TEXT_NOTE_KIND};
use nostr::{Event, EventId, Filter, Keys, Kind, PublicKey, Timestamp};
use nostr_sdk::Client;
use tracing::{info, warn};

use crate::config::Config;

/// Adds every configured relay and connects. Unparseable relay URLs are
/// skipped; having none left is an error.
pub async fn connect_client(keys: &Keys, config: &Config) -> Result<Client> {
    let client = Client::new(keys.clone());
    let mut added = 0;
    for relay in config.resolved_relays() {
        match client.add_relay(relay.as_str()).await {
            Ok(_) => added += 1,
            Err(e) => warn!(relay = %relay, "Skipping relay: {}", e),
        }
    }
    if added == 0 {
        anyhow::bail!("No usable relays configured");
    }
    client.connect().await;
    info!(relays = added, "Connected to relays.");
    Ok(client)
}

pub fn lookback_since(lookback_secs: u64) -> Timestamp {
    Timestamp::from_secs(Timestamp::now().as_u64().saturating_sub(lookback_secs))
}

/// Text notes that `p`-tag the bot, and text notes tagged `#barstr`.
pub fn request_filters(bot: PublicKey, since: Timestamp) -> [Filter; 2] {
    let kind = Kind::from(TEXT_NOTE_KIND);
    [
        Filter::new().kind(kind).pubkey(bot).since(since),
        Filter::new()
            .kind(kind)
            .hashtags(SUBSCRIPTION_HASHTAGS)
            .since(since),
    ]
}

pub async fn subscribe_requests(client: &Client, bot: PublicKey, lookback_secs: u64) -> Result<()> {
    let [mentions, hashtags] = request_filters(bot, lookback_since(lookback_secs));

    client
        .subscribe(mentions, None)
        .await
        .context("Failed to subscribe to mentions")?;
    info!("Subscribed to Mentions.");

    client
        .subscribe(hashtags, None)
        .await
        .context("Failed to subscribe to hashtags")?;
    info!("Subscribed to Hashtags.");
    Ok(())
}

/// Signs replies with the client's keys and broadcasts them to all relays.
pub struct NostrReplyPublisher {
    client: Client,
}

impl NostrReplyPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReplyPublisher for NostrReplyPublisher {
    async fn send_reply(&self, origin: &Event, draft: &ReplyDraft) -> barstr::Result<EventId> {
        let output = self
            .client
            .send_event_builder(reply_builder(origin, draft))
            .await
            .map_err(|e| barstr::Error::Publish(e.to_string()))?;

        if !output.failed.is_empty() {
            warn!(
                event_id = %draft.target_event_id,
                accepted = output.success.len(),
                rejected = output.failed.len(),
                "Reply not accepted by every relay"
            );
        }
        Ok(output.val)
    }
}
