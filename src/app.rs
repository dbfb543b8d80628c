use crate::config::Config;
use crate::library::TrackSource;
use crate::playlist::filters::TrackFilters;
use crate::playlist::{
    BlockResult, GenerateError, GenreIndex, PlaylistGenerator, PlaylistRequest, PlaylistResult,
    TrackPick,
};
use anyhow::{Context, Result};
use rand::Rng;
use serde::{Serialize, Serializer};

/// What a single run produced
#[derive(Debug)]
pub enum Outcome {
    Playlist(PlaylistResult),
    Remix { index: usize, block: BlockResult },
}

// Hands off the generated value itself; the remix index is only for reporting
impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Playlist(playlist) => playlist.serialize(serializer),
            Outcome::Remix { block, .. } => block.serialize(serializer),
        }
    }
}

/// Fetch the library, filter it for the request, and generate a playlist or remix one block
pub fn run_request<S, R>(
    request: &PlaylistRequest,
    config: &Config,
    source: &S,
    remix: Option<usize>,
    rng: &mut R,
) -> Result<Outcome>
where
    S: TrackSource + ?Sized,
    R: Rng + ?Sized,
{
    let tracks = source.fetch_tracks().context("Failed to fetch tracks")?;
    let fetched = tracks.len();
    let tracks = TrackFilters::apply(tracks, request);
    tracing::info!(
        fetched,
        kept = tracks.len(),
        "Filtered library for request"
    );

    let index = GenreIndex::build(&tracks);
    let duration = request.duration_seconds(config)?;
    let blocks = request.resolve_blocks(config, &index, rng)?;
    let generator = PlaylistGenerator::new(&index);

    match remix {
        Some(block_index) => {
            let spec = blocks
                .get(block_index)
                .ok_or(GenerateError::BlockIndexOutOfRange {
                    index: block_index,
                    count: blocks.len(),
                })?;
            let target = PlaylistGenerator::per_block_target(duration, blocks.len())?;
            let mut block = generator.remix_block(spec, target, rng);
            block.mark_must_have(&request.must_have_track_ids);
            Ok(Outcome::Remix {
                index: block_index,
                block,
            })
        }
        None => {
            let mut playlist = generator.generate(&request.name, &blocks, duration, rng)?;
            let marked = playlist.mark_must_have(&request.must_have_track_ids);
            if marked < request.must_have_track_ids.len() {
                tracing::debug!(
                    marked,
                    requested = request.must_have_track_ids.len(),
                    "Some must-have tracks were not picked"
                );
            }
            Ok(Outcome::Playlist(playlist))
        }
    }
}

/// Genre names and track counts across the whole library
pub fn list_genres<S: TrackSource + ?Sized>(source: &S) -> Result<Vec<(String, usize)>> {
    let tracks = source.fetch_tracks().context("Failed to fetch tracks")?;
    let index = GenreIndex::build(&tracks);
    Ok(index
        .genre_counts()
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect())
}

/// Tracks whose title contains `query` and whose artist credit contains `artist`, up to `limit`
pub fn search_tracks<S: TrackSource + ?Sized>(
    source: &S,
    query: Option<&str>,
    artist: Option<&str>,
    limit: usize,
) -> Result<Vec<TrackPick>> {
    let tracks = source.fetch_tracks().context("Failed to fetch tracks")?;
    let found: Vec<TrackPick> = tracks
        .iter()
        .filter(|track| TrackFilters::matches_search(track, query, artist))
        .take(limit)
        .map(TrackPick::listing)
        .collect();
    tracing::info!(found = found.len(), limit, "Searched library");
    Ok(found)
}

/// Write an outcome as pretty JSON for whatever stores playlists downstream
pub fn write_outcome(outcome: &Outcome, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("Failed to serialize result")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write result to '{path}'"))?;
    Ok(())
}
