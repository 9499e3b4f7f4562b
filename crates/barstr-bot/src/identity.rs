use nostr::{Keys, ToBech32};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Parsed from the configured secret key
    Configured,
    /// No key configured
    Generated,
    /// A key was configured but could not be parsed
    GeneratedAfterInvalid,
}

/// Loads the bot identity from an nsec or hex secret key.
///
/// Never fails: a missing or invalid key yields an ephemeral identity for
/// this session.
pub fn load_keys(secret_key: Option<&str>) -> (Keys, KeySource) {
    let Some(secret_key) = secret_key else {
        info!("No secret key found. Generating random keys for this session.");
        return (Keys::generate(), KeySource::Generated);
    };

    match Keys::parse(secret_key) {
        Ok(keys) => {
            info!("Loaded keys from environment.");
            (keys, KeySource::Configured)
        }
        Err(e) => {
            error!("Invalid secret key in environment: {}", e);
            (Keys::generate(), KeySource::GeneratedAfterInvalid)
        }
    }
}

pub fn npub(keys: &Keys) -> String {
    keys.public_key()
        .to_bech32()
        .unwrap_or_else(|_| keys.public_key().to_hex())
}
