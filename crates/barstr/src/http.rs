//! Shared HTTP plumbing for the provider adapters.

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{Error, Result};

pub const DEFAULT_USER_AGENT: &str = "BarstrBot/1.0";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Client with a per-request timeout and the bot's User-Agent.
pub fn create_http_client(user_agent: &str, timeout: Duration) -> Result<HttpClient> {
    Ok(HttpClient::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()?)
}

/// Sends a GET with `query` and decodes a JSON body.
///
/// # Errors
///
/// `Error::Http` on transport or decode failures, `Error::Status` on
/// non-success status codes.
pub async fn get_json<T: DeserializeOwned>(
    client: &HttpClient,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T> {
    let response = client.get(url).query(query).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response.json().await?)
}
