//! Fetching and decoding remote manifests.

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::manifest::Manifest;

/// Error fetching or decoding a manifest.
///
/// Both variants carry the URL the request was issued against.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The request failed in transport or the server answered with a
    /// non-success status.
    #[error("Network error fetching '{url}': {reason}")]
    Network { url: String, reason: String },
    /// The response body is not a JSON object of string values.
    #[error("Parse error in manifest '{url}': {reason}")]
    Parse { url: String, reason: String },
}

impl FetchError {
    /// The URL of the failed request.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Network { url, .. } | FetchError::Parse { url, .. } => url,
        }
    }
}

/// Fetch `url` and decode the body as a [`Manifest`].
///
/// Issues exactly one request and resolves exactly once; there are no
/// retries and no timeout beyond the client's own policy.
pub async fn fetch_manifest(client: &Client, url: &str) -> Result<Manifest, FetchError> {
    debug!(url, "fetching sprite manifest");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Network {
            url: url.to_string(),
            reason: format!("status {status}"),
        });
    }

    let body = response.text().await.map_err(|e| FetchError::Network {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&body).map_err(|e| FetchError::Parse {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
