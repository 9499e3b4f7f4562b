//! Relevance filtering and query extraction for inbound notes.
//!
//! A note is relevant when it `p`-tags the bot or mentions `#barstr` anywhere
//! in its content. The query is whatever is left after dropping the hashtag
//! and anything that looks like a mention or a `nostr:` link.

use crate::types::{InboundEvent, HASHTAG_MARKER, MENTION_TAG};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Irrelevant,
    /// Relevant, but nothing is left to search for.
    EmptyQuery,
    Query(String),
}

/// Exact, case-sensitive match on a `["p", <bot pubkey>, ...]` tag.
pub fn mentions_pubkey(event: &InboundEvent, bot_pubkey: &str) -> bool {
    event
        .tags
        .iter()
        .any(|tag| tag.len() >= 2 && tag[0] == MENTION_TAG && tag[1] == bot_pubkey)
}

pub fn has_hashtag(content: &str) -> bool {
    content.to_lowercase().contains(HASHTAG_MARKER)
}

pub fn is_relevant(event: &InboundEvent, bot_pubkey: &str) -> bool {
    mentions_pubkey(event, bot_pubkey) || has_hashtag(&event.content)
}

/// Drops hashtag, mention and link tokens, keeping the rest in order.
///
/// Any token containing `@` is treated as a mention, so e.g. an email
/// address in the query is lost as well.
pub fn extract_query(content: &str) -> Option<String> {
    let words: Vec<&str> = content
        .split_whitespace()
        .filter(|word| {
            let lower = word.to_lowercase();
            !(lower.contains(HASHTAG_MARKER) || lower.contains("nostr:") || lower.contains('@'))
        })
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

pub fn classify(event: &InboundEvent, bot_pubkey: &str) -> Classification {
    if !is_relevant(event, bot_pubkey) {
        return Classification::Irrelevant;
    }
    match extract_query(&event.content) {
        Some(query) => Classification::Query(query),
        None => Classification::EmptyQuery,
    }
}
