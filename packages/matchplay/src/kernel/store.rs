//! JSON file the sweeper keeps its match book in between runs.
//!
//! Loading goes through the validated `Match` deserializer, so a hand-edited
//! or corrupted file is refused as a whole instead of seeding broken matches.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::domains::matches::Match;

/// Reads every match stored at `path`. A missing file is an empty book.
pub async fn load_matches(path: &Path) -> Result<Vec<Match>> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "no match file yet, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let matches: Vec<Match> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid match file {}", path.display()))?;
    info!(path = %path.display(), count = matches.len(), "Loaded matches");
    Ok(matches)
}

/// Writes `matches` to `path`, replacing the previous file in one rename.
pub async fn save_matches(path: &Path, matches: &[Match]) -> Result<()> {
    let json = serde_json::to_string_pretty(matches).context("Failed to encode matches")?;

    let staging = path.with_extension("json.tmp");
    tokio::fs::write(&staging, json)
        .await
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    tokio::fs::rename(&staging, path)
        .await
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    info!(path = %path.display(), count = matches.len(), "Saved matches");
    Ok(())
}
