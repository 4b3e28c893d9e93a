use anyhow::{Context, Result};
use reqwest::header::CACHE_CONTROL;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::data_models::ManifestEntry;

/// Wire shape of the manifest document. Entries live under `runners`; a
/// manifest without the key is treated as empty rather than malformed.
#[derive(Deserialize, Debug)]
pub(crate) struct Manifest {
    #[serde(default)]
    pub(crate) runners: Vec<ManifestEntry>,
}

/// Fetches the list of candidate pages once at widget activation.
pub struct ManifestLoader {
    client: Client,
    manifest_url: Url,
}

impl ManifestLoader {
    pub fn new(client: Client, manifest_url: Url) -> ManifestLoader {
        ManifestLoader {
            client,
            manifest_url,
        }
    }

    /// The manifest may change between deployments, so the request always
    /// bypasses caches. Fetch or parse errors propagate to the caller;
    /// page fetches are the only place where failure is contained.
    pub async fn load(&self) -> Result<Vec<ManifestEntry>> {
        let response = self
            .client
            .get(self.manifest_url.clone())
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .context("fetching manifest")?;
        let body = response.text().await.context("reading manifest body")?;
        let manifest: Manifest = serde_json::from_str(&body).context("parsing manifest")?;
        log::info!("loaded manifest with {} pages", manifest.runners.len());
        Ok(manifest.runners)
    }
}
