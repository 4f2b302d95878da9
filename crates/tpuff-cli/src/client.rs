//! Client construction from the environment.

use std::time::Duration;

use anyhow::Context;

use tpuff_client::TpuffClient;

/// Explicit flag wins; otherwise fall back to `TURBOPUFFER_REGION`.
pub fn resolve_region(flag: Option<String>) -> Option<String> {
    flag.or_else(|| {
        std::env::var("TURBOPUFFER_REGION")
            .ok()
            .filter(|r| !r.is_empty())
    })
}

/// Build a client from `TURBOPUFFER_API_KEY` (required) and
/// `TURBOPUFFER_BASE_URL` (optional endpoint override).
pub fn build(timeout: Duration) -> anyhow::Result<TpuffClient> {
    let api_key = std::env::var("TURBOPUFFER_API_KEY")
        .context("TURBOPUFFER_API_KEY environment variable is not set")?;
    let mut client = TpuffClient::new(api_key, timeout)?;
    if let Ok(base_url) = std::env::var("TURBOPUFFER_BASE_URL") {
        if !base_url.is_empty() {
            client = client.with_base_url(base_url);
        }
    }
    Ok(client)
}
