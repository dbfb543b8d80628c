use super::PlaylistRequest;
use crate::models::Track;

/// Library-side track filtering applied before the genre index is built
pub struct TrackFilters;

impl TrackFilters {
    /// Check if a track carries one of the requested genres
    pub fn matches_genres(track: &Track, request: &PlaylistRequest) -> bool {
        // No genre filter means every genre is welcome
        if request.genres.is_empty() {
            return true;
        }
        track.has_any_genre(&request.genres)
    }

    /// Check if a track was released inside the requested year range (inclusive)
    pub fn matches_year_range(track: &Track, request: &PlaylistRequest) -> bool {
        if request.year_start.is_none() && request.year_end.is_none() {
            return true;
        }

        // A bounded range only admits tracks with a known release year
        let Some(year) = track.year else {
            return false;
        };

        let after_start = request.year_start.is_none_or(|start| year >= start);
        let before_end = request.year_end.is_none_or(|end| year <= end);
        after_start && before_end
    }

    /// Apply all filters to determine if a track should be offered to the generator
    pub fn should_include_track(track: &Track, request: &PlaylistRequest) -> bool {
        Self::matches_genres(track, request) && Self::matches_year_range(track, request)
    }

    /// Keep the tracks that pass every filter, preserving library order
    pub fn apply(tracks: Vec<Track>, request: &PlaylistRequest) -> Vec<Track> {
        tracks
            .into_iter()
            .filter(|track| Self::should_include_track(track, request))
            .collect()
    }

    /// Check a track against a free-text search: title term and artist substring.
    ///
    /// Both match case-insensitively; a missing or blank term matches anything.
    pub fn matches_search(track: &Track, query: Option<&str>, artist: Option<&str>) -> bool {
        contains_term(&track.name, query) && contains_term(&track.artist, artist)
    }
}

fn contains_term(text: &str, term: Option<&str>) -> bool {
    match term.map(str::trim) {
        Some(term) if !term.is_empty() => text.to_lowercase().contains(&term.to_lowercase()),
        _ => true,
    }
}
