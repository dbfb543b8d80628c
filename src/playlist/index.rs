use crate::models::Track;
use std::collections::HashMap;

/// Tracks grouped under one genre, keyed by the first casing seen
#[derive(Debug)]
struct GenreBucket<'a> {
    display_name: String,
    tracks: Vec<&'a Track>,
}

/// Case-insensitive genre → tracks lookup over a borrowed library snapshot.
///
/// Buckets hold references, so a track tagged with several genres is shared
/// between them rather than copied.
#[derive(Debug, Default)]
pub struct GenreIndex<'a> {
    buckets: HashMap<String, GenreBucket<'a>>,
}

/// Key used for case-insensitive genre comparison
pub fn genre_key(genre: &str) -> String {
    genre.to_lowercase()
}

impl<'a> GenreIndex<'a> {
    /// Group every track under each of its non-blank genres
    pub fn build(tracks: &'a [Track]) -> Self {
        let mut buckets: HashMap<String, GenreBucket<'a>> = HashMap::new();

        for track in tracks {
            for genre in track.genre_names() {
                buckets
                    .entry(genre_key(genre))
                    .or_insert_with(|| GenreBucket {
                        display_name: genre.to_string(),
                        tracks: Vec::new(),
                    })
                    .tracks
                    .push(track);
            }
        }

        tracing::debug!(genres = buckets.len(), tracks = tracks.len(), "Built genre index");
        Self { buckets }
    }

    /// Tracks filed under a genre, matched in any casing
    pub fn tracks_for(&self, genre: &str) -> &[&'a Track] {
        self.buckets
            .get(&genre_key(genre))
            .map(|bucket| bucket.tracks.as_slice())
            .unwrap_or(&[])
    }

    /// Display names with track counts, sorted case-insensitively by name
    pub fn genre_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .buckets
            .values()
            .map(|bucket| (bucket.display_name.as_str(), bucket.tracks.len()))
            .collect();
        counts.sort_by_key(|(name, _)| name.to_lowercase());
        counts
    }

    /// Display names only, in the same order as `genre_counts`
    pub fn genre_names(&self) -> Vec<&str> {
        self.genre_counts().into_iter().map(|(name, _)| name).collect()
    }
}
