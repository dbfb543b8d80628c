use super::GenreWeights;
use super::artist::normalize_artist;
use crate::models::Track;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A track as it was picked into a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackPick {
    pub id: String,
    pub name: String,
    pub artist: String,     // Raw credit, for display
    pub artist_key: String, // Normalized primary artist used for diversity
    pub album: String,
    pub genre: String, // Genre the track was drawn under, not necessarily its only one
    pub year: Option<i32>,
    pub duration: u64, // in seconds
    pub is_must_have: bool,
}

impl TrackPick {
    pub fn from_track(track: &Track, genre: &str, artist_key: String) -> Self {
        Self {
            id: track.id.clone(),
            name: track.name.clone(),
            artist: track.display_artist().to_string(),
            artist_key,
            album: track.display_album().to_string(),
            genre: genre.to_string(),
            year: track.year,
            duration: track.duration,
            is_must_have: false,
        }
    }

    /// A track as listed outside of any block, under its first genre
    pub fn listing(track: &Track) -> Self {
        let genre = track.genre_names().next().unwrap_or("Unknown");
        Self::from_track(track, genre, normalize_artist(&track.artist))
    }

    pub fn duration_display(&self) -> String {
        format_minutes(self.duration)
    }
}

/// One generated segment of a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockResult {
    pub name: String,
    pub genre_weights: GenreWeights,
    pub tracks: Vec<TrackPick>,
    pub total_duration: u64, // in seconds
}

impl BlockResult {
    pub fn empty(name: &str, genre_weights: &GenreWeights) -> Self {
        Self {
            name: name.to_string(),
            genre_weights: genre_weights.clone(),
            tracks: Vec::new(),
            total_duration: 0,
        }
    }

    /// Flag the picks whose ids are in `must_have_ids`, returning how many were flagged
    pub fn mark_must_have(&mut self, must_have_ids: &[String]) -> usize {
        let mut marked = 0;
        for pick in &mut self.tracks {
            pick.is_must_have = must_have_ids.contains(&pick.id);
            if pick.is_must_have {
                marked += 1;
            }
        }
        marked
    }

    pub fn duration_display(&self) -> String {
        format_hours(self.total_duration)
    }
}

/// A full generated playlist, blocks in declared order
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistResult {
    pub name: String,
    pub blocks: Vec<BlockResult>,
    pub total_duration: u64, // Sum of realized block durations, in seconds
    pub generated_at: DateTime<Utc>,
}

impl PlaylistResult {
    pub fn total_tracks(&self) -> usize {
        self.blocks.iter().map(|block| block.tracks.len()).sum()
    }

    /// Track ids in playback order, as handed to a playlist store
    pub fn track_ids(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .flat_map(|block| block.tracks.iter().map(|pick| pick.id.as_str()))
            .collect()
    }

    pub fn mark_must_have(&mut self, must_have_ids: &[String]) -> usize {
        self.blocks
            .iter_mut()
            .map(|block| block.mark_must_have(must_have_ids))
            .sum()
    }

    pub fn duration_display(&self) -> String {
        format_hours(self.total_duration)
    }
}

/// `m:ss`
pub fn format_minutes(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// `h:mm:ss`
pub fn format_hours(seconds: u64) -> String {
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
