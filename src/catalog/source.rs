use std::fs;
use std::path::PathBuf;

use rust_embed::Embed;

use crate::catalog::{ModeTable, VerbCatalog};
use crate::error::CatalogError;

#[derive(Embed)]
#[folder = "assets/data/"]
struct DataAssets;

const BUNDLED_VERBS: &str = "verbs.json";

/// Where the verb list comes from. Resolved once, before any drill starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    Embedded,
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Embedded => "bundled verb list".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Url(url) => url.clone(),
        }
    }

    pub fn load(&self, modes: &ModeTable) -> Result<VerbCatalog, CatalogError> {
        log::info!("loading verbs from {}", self.describe());
        let result = self
            .read_raw()
            .and_then(|json| VerbCatalog::from_json(&json, modes));
        match &result {
            Ok(catalog) => log::info!("loaded {} verbs", catalog.len()),
            Err(err) => log::error!("verb catalog failed to load: {err}"),
        }
        result
    }

    fn read_raw(&self) -> Result<String, CatalogError> {
        match self {
            CatalogSource::Embedded => {
                let file = DataAssets::get(BUNDLED_VERBS)
                    .ok_or_else(|| CatalogError::Unavailable(BUNDLED_VERBS.to_string()))?;
                String::from_utf8(file.data.into_owned())
                    .map_err(|e| CatalogError::Unavailable(format!("{BUNDLED_VERBS}: {e}")))
            }
            CatalogSource::File(path) => fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            }),
            CatalogSource::Url(url) => fetch_url(url),
        }
    }
}

#[cfg(feature = "network")]
fn fetch_url(url: &str) -> Result<String, CatalogError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| CatalogError::Fetch(e.to_string()))?;
    let response = client
        .get(url)
        .send()
        .map_err(|e| CatalogError::Fetch(e.to_string()))?;
    if !response.status().is_success() {
        return Err(CatalogError::Fetch(format!("{url}: HTTP {}", response.status())));
    }
    response.text().map_err(|e| CatalogError::Fetch(e.to_string()))
}

#[cfg(not(feature = "network"))]
fn fetch_url(url: &str) -> Result<String, CatalogError> {
    Err(CatalogError::Unavailable(format!(
        "{url}: built without the `network` feature"
    )))
}
