use crate::models::{LibraryFile, Track};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Supplies the read-only track snapshot a generation request runs against
#[cfg_attr(test, mockall::automock)]
pub trait TrackSource {
    /// Fetch every track the source currently exposes
    fn fetch_tracks(&self) -> Result<Vec<Track>>;
}

/// A library snapshot exported to a JSON file
pub struct JsonLibrary {
    path: PathBuf,
}

impl JsonLibrary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonLibrary { path: path.into() }
    }
}

impl TrackSource for JsonLibrary {
    fn fetch_tracks(&self) -> Result<Vec<Track>> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read library file '{}'", self.path.display()))?;
        let library: LibraryFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse library file '{}'", self.path.display()))?;
        let tracks = library.into_tracks();
        tracing::info!(
            path = %self.path.display(),
            tracks = tracks.len(),
            "Loaded library snapshot"
        );
        Ok(tracks)
    }
}
