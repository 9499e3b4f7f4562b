//! Per-event reply pipeline.
//!
//! `ReplyOrchestrator` decides what to say about an inbound note;
//! `EventHandler` adds the send step and is what the relay loop calls.
//! Neither returns errors: every failure ends as a logged `Outcome`.

use nostr::{Event, EventId, PublicKey};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::classifier::{classify, Classification};
use crate::geocoder::Geocoder;
use crate::i18n::Localization;
use crate::language::detect_language;
use crate::ledger::ProcessedIds;
use crate::publisher::ReplyPublisher;
use crate::reply::{compose_reply, Lookup};
use crate::types::{InboundEvent, ReplyDraft};
use crate::venues::VenueFinder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    Duplicate,
    Irrelevant,
    EmptyQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Ignore(Ignored),
    Reply(ReplyDraft),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ignored(Ignored),
    Sent(EventId),
    SendFailed,
}

pub struct ReplyOrchestrator {
    bot_pubkey: String,
    geocoder: Arc<dyn Geocoder>,
    venues: Arc<dyn VenueFinder>,
    localization: Arc<Localization>,
    ledger: ProcessedIds,
}

impl ReplyOrchestrator {
    pub fn new(
        bot_pubkey: PublicKey,
        geocoder: Arc<dyn Geocoder>,
        venues: Arc<dyn VenueFinder>,
    ) -> Self {
        Self {
            bot_pubkey: bot_pubkey.to_hex(),
            geocoder,
            venues,
            localization: Arc::new(Localization::new()),
            ledger: ProcessedIds::new(),
        }
    }

    pub fn with_localization(mut self, localization: Arc<Localization>) -> Self {
        self.localization = localization;
        self
    }

    pub fn with_ledger(mut self, ledger: ProcessedIds) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn ledger(&self) -> &ProcessedIds {
        &self.ledger
    }

    /// Runs dedup, classification, lookup and formatting for one event.
    ///
    /// The id is recorded before anything else happens, so a redelivery is
    /// dropped even if this attempt later fails to send.
    pub async fn process(&self, event: &InboundEvent) -> Decision {
        if !self.ledger.check_and_record(&event.id) {
            debug!(event_id = %event.id, "Skipping already processed event");
            return Decision::Ignore(Ignored::Duplicate);
        }

        let query = match classify(event, &self.bot_pubkey) {
            Classification::Irrelevant => return Decision::Ignore(Ignored::Irrelevant),
            Classification::EmptyQuery => {
                debug!(event_id = %event.id, "Relevant event without a query");
                return Decision::Ignore(Ignored::EmptyQuery);
            }
            Classification::Query(query) => query,
        };

        info!(
            event_id = %event.id,
            author = %event.author,
            content = %event.content.trim(),
            "Received relevant event"
        );

        let lang = detect_language(&query);
        info!(query = %query, lang, "Looking up bars");

        let lookup = self.lookup(&query).await;
        let templates = self.localization.templates(lang);

        Decision::Reply(ReplyDraft {
            target_event_id: event.id.clone(),
            body: compose_reply(templates, &query, &lookup),
        })
    }

    pub async fn lookup(&self, query: &str) -> Lookup {
        let Some(bbox) = self.geocoder.resolve(query).await else {
            return Lookup::PlaceNotFound;
        };
        let venues = self.venues.find(&bbox).await;
        debug!(query, venues = venues.len(), "Venue lookup finished");
        if venues.is_empty() {
            Lookup::NoVenues
        } else {
            Lookup::Venues(venues)
        }
    }
}

pub struct EventHandler {
    orchestrator: ReplyOrchestrator,
    publisher: Arc<dyn ReplyPublisher>,
}

impl EventHandler {
    pub fn new(orchestrator: ReplyOrchestrator, publisher: Arc<dyn ReplyPublisher>) -> Self {
        Self {
            orchestrator,
            publisher,
        }
    }

    pub fn orchestrator(&self) -> &ReplyOrchestrator {
        &self.orchestrator
    }

    /// Processes one relay event end to end. Safe to call concurrently.
    pub async fn handle(&self, event: &Event) -> Outcome {
        let inbound = InboundEvent::from(event);
        let draft = match self.orchestrator.process(&inbound).await {
            Decision::Ignore(reason) => return Outcome::Ignored(reason),
            Decision::Reply(draft) => draft,
        };

        match self.publisher.send_reply(event, &draft).await {
            Ok(reply_id) => {
                info!(event_id = %draft.target_event_id, reply_id = %reply_id, "Replied");
                Outcome::Sent(reply_id)
            }
            Err(e) => {
                error!(event_id = %draft.target_event_id, "Failed to reply: {}", e);
                Outcome::SendFailed
            }
        }
    }
}
