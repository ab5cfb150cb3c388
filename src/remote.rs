//! Outbound HTTP client for the remote file-hosting API.

use anyhow::Result;
use std::time::Duration;

use crate::config::RemoteConfig;

/// Builds the client shared by the catalog fetcher and the downloader.
///
/// `timeout_secs` bounds a whole request including the streamed body;
/// `connect_timeout_secs` bounds connection setup alone.
pub fn build_client(config: &RemoteConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .user_agent(concat!("pdf-scout/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
