use crate::config::CliConfig;
use anyhow::{Context, Result};
use lumen_catalog::{CatalogSnapshot, CuCatalog};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_BUNDLED: &str = "troffer-2x4";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Bundled(String),
}

impl CatalogSource {
    /// Flags win over config; the bundled troffer chart is the last resort.
    pub fn select(catalog: Option<PathBuf>, bundled: Option<String>, config: &CliConfig) -> Self {
        if let Some(path) = catalog {
            return Self::File(path);
        }
        if let Some(name) = bundled {
            return Self::Bundled(name);
        }
        if let Some(path) = &config.catalog {
            return Self::File(path.clone());
        }
        Self::Bundled(
            config
                .bundled
                .clone()
                .unwrap_or_else(|| DEFAULT_BUNDLED.to_string()),
        )
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Bundled(name) => write!(f, "bundled:{name}"),
        }
    }
}

/// Reads and validates the catalog off the async runtime, then publishes it to `snapshot`.
pub async fn load_catalog(
    source: &CatalogSource,
    snapshot: &CatalogSnapshot,
) -> Result<Arc<CuCatalog>> {
    let catalog = match source {
        CatalogSource::File(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read CU catalog {}", path.display()))?;
            tokio::task::spawn_blocking(move || lumen_catalog::load_slice(&bytes))
                .await
                .context("CU catalog loader task failed")?
                .with_context(|| format!("Invalid CU catalog {}", path.display()))?
        }
        CatalogSource::Bundled(name) => lumen_catalog::bundled(name)?,
    };
    log::info!("Using CU catalog {source} ({} tables)", catalog.len());
    Ok(snapshot.publish(catalog))
}
