use serde::{Deserialize, Serialize};

/// Credit used when a track carries no artist at all
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
/// Album label used when a track carries no album
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// A single audio track from the library snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artist: String, // Raw artist credit, may include featured artists
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub duration: u64, // in seconds
}

/// On-disk library layout, either a bare array or an object wrapping one
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LibraryFile {
    Tracks(Vec<Track>),
    Wrapped { tracks: Vec<Track> },
}

impl LibraryFile {
    pub fn into_tracks(self) -> Vec<Track> {
        match self {
            LibraryFile::Tracks(tracks) => tracks,
            LibraryFile::Wrapped { tracks } => tracks,
        }
    }
}

impl Track {
    /// Artist credit for display, falling back to "Unknown Artist"
    pub fn display_artist(&self) -> &str {
        if self.artist.trim().is_empty() {
            UNKNOWN_ARTIST
        } else {
            &self.artist
        }
    }

    /// Album for display, falling back to "Unknown Album"
    pub fn display_album(&self) -> &str {
        if self.album.trim().is_empty() {
            UNKNOWN_ALBUM
        } else {
            &self.album
        }
    }

    /// Non-blank genres in declaration order
    pub fn genre_names(&self) -> impl Iterator<Item = &str> {
        self.genres
            .iter()
            .map(|genre| genre.as_str())
            .filter(|genre| !genre.trim().is_empty())
    }

    /// Check if this track carries any of the given genres (case-insensitive)
    pub fn has_any_genre(&self, genres: &[String]) -> bool {
        self.genre_names().any(|own| {
            let own = own.to_lowercase();
            genres.iter().any(|wanted| wanted.to_lowercase() == own)
        })
    }
}

impl Default for Track {
    fn default() -> Self {
        Track {
            id: String::new(),
            name: "Unknown".to_string(),
            artist: String::new(),
            album: String::new(),
            genres: Vec::new(),
            year: None,
            duration: 0,
        }
    }
}
