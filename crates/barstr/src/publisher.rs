use async_trait::async_trait;
use nostr::{Event, EventBuilder, EventId};

use crate::types::ReplyDraft;
use crate::Result;

/// Outbound side of the relay boundary.
///
/// Implementations turn a draft into a threaded reply to `origin` and
/// broadcast it. Called at most once per draft.
#[async_trait]
pub trait ReplyPublisher: Send + Sync {
    async fn send_reply(&self, origin: &Event, draft: &ReplyDraft) -> Result<EventId>;
}

/// NIP-10 reply to `origin`: root/reply `e` markers plus the author's `p` tag.
pub fn reply_builder(origin: &Event, draft: &ReplyDraft) -> EventBuilder {
    EventBuilder::text_note_reply(draft.body.clone(), origin, None, None)
}
