use super::index::GenreIndex;
use super::utils::BlockNaming;
use super::{GenerateError, GenreWeights};
use crate::config::Config;
use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One named segment and the genre mix it should be drawn from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub name: String,
    #[serde(default)]
    pub genre_weights: GenreWeights,
}

/// A playlist generation request loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistRequest {
    pub name: String,
    #[serde(default)]
    pub duration_minutes: Option<i64>, // Falls back to the configured default
    #[serde(default)]
    pub genres: Vec<String>, // Upstream genre filter; empty means every genre
    #[serde(default)]
    pub year_start: Option<i32>,
    #[serde(default)]
    pub year_end: Option<i32>,
    #[serde(default)]
    pub block_count: Option<usize>, // Only used when `blocks` is empty
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
    #[serde(default)]
    pub must_have_track_ids: Vec<String>, // Picks with these ids are flagged, never forced in
}

impl PlaylistRequest {
    /// Load a playlist request from a JSON file
    pub fn load_from_file(path: &str) -> Result<PlaylistRequest> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read playlist request '{path}'"))?;
        let request: PlaylistRequest = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse playlist request '{path}'"))?;
        Ok(request)
    }

    /// Requested length in seconds
    pub fn duration_seconds(&self, config: &Config) -> Result<u64, GenerateError> {
        match self.duration_minutes {
            Some(minutes) if minutes < 0 => Err(GenerateError::NegativeDuration(minutes)),
            Some(minutes) => Ok(minutes.unsigned_abs().saturating_mul(60)),
            None => Ok(u64::from(config.default_duration_hours) * 3600),
        }
    }

    /// The blocks to generate: the declared ones, or a default layout.
    ///
    /// The default layout gives every block the same weight for each requested
    /// genre, or for every genre in the index when none were requested.
    pub fn resolve_blocks<R: Rng + ?Sized>(
        &self,
        config: &Config,
        index: &GenreIndex<'_>,
        rng: &mut R,
    ) -> Result<Vec<BlockSpec>, GenerateError> {
        if !self.blocks.is_empty() {
            return Ok(self.blocks.clone());
        }

        let count = self.block_count.unwrap_or(config.default_block_count);
        if count == 0 {
            return Err(GenerateError::NoBlocks);
        }

        let genre_weights: GenreWeights = if self.genres.is_empty() {
            index
                .genre_names()
                .into_iter()
                .map(|genre| (genre, config.default_genre_weight))
                .collect()
        } else {
            self.genres
                .iter()
                .map(|genre| (genre.as_str(), config.default_genre_weight))
                .collect()
        };

        Ok((0..count)
            .map(|i| BlockSpec {
                name: BlockNaming::block_name(i, count, rng),
                genre_weights: genre_weights.clone(),
            })
            .collect())
    }
}
