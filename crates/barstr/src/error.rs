use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Publish error: {0}")]
    Publish(String),

    #[error(transparent)]
    Nostr(#[from] nostr::event::builder::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
