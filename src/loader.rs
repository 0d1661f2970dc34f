//! Loading sprite sheets into a registry.

use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, warn};

use crate::fetch::{fetch_manifest, FetchError};
use crate::manifest::SpriteSheet;
use crate::mode::RenderMode;
use crate::registry::SpriteRegistry;

/// Fetches sprite-sheet manifests and merges them into a registry.
///
/// Every load fetches fresh and merges the full manifest on completion, so
/// repeated loads are safe and, for overlapping keys, the last merge to
/// finish wins. In-flight loads are never cancelled.
#[derive(Debug, Clone)]
pub struct SpriteLoader {
    registry: Arc<SpriteRegistry>,
    mode: RenderMode,
    client: Client,
}

impl SpriteLoader {
    /// Create a loader writing into `registry` under `mode`.
    pub fn new(registry: Arc<SpriteRegistry>, mode: RenderMode) -> Self {
        Self::with_client(registry, mode, Client::new())
    }

    /// Create a loader using a shared HTTP client.
    ///
    /// Timeout and connection policy belong to the client.
    pub fn with_client(registry: Arc<SpriteRegistry>, mode: RenderMode, client: Client) -> Self {
        Self {
            registry,
            mode,
            client,
        }
    }

    /// The render mode this loader fetches for.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// The registry this loader writes into.
    pub fn registry(&self) -> &Arc<SpriteRegistry> {
        &self.registry
    }

    /// Fetch the sheet's manifest for the configured mode and merge every
    /// entry into the registry.
    ///
    /// On error the registry is left untouched and the error names the URL
    /// that was selected.
    pub async fn load(&self, sheet: &SpriteSheet) -> Result<(), FetchError> {
        let url = sheet.url_for(self.mode);
        let manifest = fetch_manifest(&self.client, url).await?;
        debug!(url, entries = manifest.len(), "merging sprite manifest");
        self.registry.merge(&manifest);
        Ok(())
    }

    /// Run [`load`](Self::load) on the tokio runtime without waiting for it.
    ///
    /// Failures are logged and dropped; await the returned handle to
    /// observe completion.
    pub fn spawn(&self, sheet: SpriteSheet) -> tokio::task::JoinHandle<()> {
        let loader = self.clone();
        tokio::spawn(async move {
            if let Err(err) = loader.load(&sheet).await {
                warn!(url = err.url(), %err, "sprite sheet load failed");
            }
        })
    }
}
