//! Offline cache registration.
//!
//! On startup the shop writes an offline manifest (shop name, menu snapshot
//! and payment details) into the cache directory so the menu can be shown
//! without the menu file. Registration runs as a detached task:
//! the cart never waits for it, and its outcome is only logged.

use std::path::{Path, PathBuf};

use grizzly_core::PaymentDetails;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::menu::Menu;

/// File name of the manifest inside the cache directory.
pub const MANIFEST_FILE: &str = "offline-manifest.json";

/// Errors writing the offline cache.
#[derive(Debug, thiserror::Error)]
pub enum OfflineError {
    #[error("failed to prepare cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode manifest: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Build the offline manifest document.
#[must_use]
pub fn build_manifest(menu: &Menu, payment: &PaymentDetails) -> serde_json::Value {
    serde_json::json!({
        "name": "Grizzly World Deliveries",
        "short_name": "GWD",
        "version": env!("CARGO_PKG_VERSION"),
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "menu": menu,
        "payment": payment,
    })
}

/// Write the manifest into `cache_dir`, returning the file path.
///
/// # Errors
///
/// Returns `OfflineError` if the directory or file cannot be written.
#[instrument(skip(menu, payment))]
pub async fn register(
    cache_dir: &Path,
    menu: &Menu,
    payment: &PaymentDetails,
) -> Result<PathBuf, OfflineError> {
    tokio::fs::create_dir_all(cache_dir)
        .await
        .map_err(|source| OfflineError::CreateDir {
            path: cache_dir.to_path_buf(),
            source,
        })?;

    let manifest = serde_json::to_vec_pretty(&build_manifest(menu, payment))?;
    let path = cache_dir.join(MANIFEST_FILE);
    tokio::fs::write(&path, manifest)
        .await
        .map_err(|source| OfflineError::Write {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Spawn offline registration in the background.
///
/// Returns `None` without spawning when no cache directory is configured.
/// The handle may be dropped; the task runs to completion either way.
pub fn register_async(
    cache_dir: Option<PathBuf>,
    menu: Menu,
    payment: PaymentDetails,
) -> Option<JoinHandle<()>> {
    let Some(cache_dir) = cache_dir else {
        debug!("Offline cache not supported by configuration, skipping registration");
        return None;
    };

    info!(dir = %cache_dir.display(), "Spawning offline cache registration");
    Some(tokio::spawn(async move {
        match register(&cache_dir, &menu, &payment).await {
            Ok(path) => info!(path = %path.display(), "Offline cache registered"),
            Err(e) => warn!(error = %e, "Offline cache registration failed"),
        }
    }))
}
