use super::block::BlockGenerator;
use super::index::GenreIndex;
use super::{BlockResult, BlockSpec, GenerateError, PlaylistResult};
use chrono::Utc;
use rand::Rng;
use std::collections::HashSet;

/// Main playlist generator
pub struct PlaylistGenerator<'i, 'a> {
    index: &'i GenreIndex<'a>,
}

impl<'i, 'a> PlaylistGenerator<'i, 'a> {
    pub fn new(index: &'i GenreIndex<'a>) -> Self {
        Self { index }
    }

    /// Length each block aims for; the division remainder is dropped
    pub fn per_block_target(total_duration: u64, block_count: usize) -> Result<u64, GenerateError> {
        if block_count == 0 {
            return Err(GenerateError::NoBlocks);
        }
        Ok(total_duration / block_count as u64)
    }

    /// Generate every block in order, never reusing a track across blocks
    pub fn generate<R: Rng + ?Sized>(
        &self,
        name: &str,
        blocks: &[BlockSpec],
        total_duration: u64,
        rng: &mut R,
    ) -> Result<PlaylistResult, GenerateError> {
        let target = Self::per_block_target(total_duration, blocks.len())?;
        let generator = BlockGenerator::new(self.index);
        let mut used: HashSet<String> = HashSet::new();

        let mut block_results = Vec::with_capacity(blocks.len());
        for spec in blocks {
            block_results.push(generator.generate(spec, target, Some(&mut used), rng));
        }
        let total_duration = block_results
            .iter()
            .fold(0u64, |sum, block| sum.saturating_add(block.total_duration));

        let playlist = PlaylistResult {
            name: name.to_string(),
            blocks: block_results,
            total_duration,
            generated_at: Utc::now(),
        };
        tracing::info!(
            playlist = %playlist.name,
            blocks = playlist.blocks.len(),
            tracks = playlist.total_tracks(),
            duration = playlist.total_duration,
            "Generated playlist"
        );
        Ok(playlist)
    }

    /// Regenerate one block on its own, free to reuse tracks from other blocks
    pub fn remix_block<R: Rng + ?Sized>(
        &self,
        spec: &BlockSpec,
        target_duration: u64,
        rng: &mut R,
    ) -> BlockResult {
        BlockGenerator::new(self.index).generate(spec, target_duration, None, rng)
    }
}
