//! On-disk snapshot cache for the probed system info.
//!
//! Stored as JSON at `<config_dir>/hops/host.json`. A missing or corrupt
//! cache silently falls through to a fresh probe.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SystemInfo;

#[derive(Debug, Serialize, Deserialize)]
struct CachedSnapshot {
    captured_at: DateTime<Utc>,
    #[serde(flatten)]
    info: SystemInfo,
}

/// Path of the host snapshot cache file.
pub fn cache_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("hops");
    Ok(config_dir.join("host.json"))
}

/// Read a cached snapshot. Any read or parse failure is treated as a cache
/// miss.
pub fn load_cached(path: &Path) -> Option<SystemInfo> {
    let contents = fs::read_to_string(path).ok()?;
    let snapshot: CachedSnapshot = serde_json::from_str(&contents).ok()?;
    Some(snapshot.info)
}

/// Write the snapshot to disk, creating the parent directory if needed.
pub fn store_cache(path: &Path, info: &SystemInfo) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating cache directory at {}", parent.display()))?;
    }

    let snapshot = CachedSnapshot {
        captured_at: Utc::now(),
        info: info.clone(),
    };
    let contents = serde_json::to_string_pretty(&snapshot).context("serializing host snapshot")?;
    fs::write(path, contents)
        .with_context(|| format!("writing host snapshot to {}", path.display()))?;

    Ok(())
}
