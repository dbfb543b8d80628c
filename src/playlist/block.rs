use super::artist::normalize_artist;
use super::index::{GenreIndex, genre_key};
use super::selector::select_genre;
use super::{BlockResult, BlockSpec, TrackPick};
use crate::models::Track;
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, info};

/// Per-block pick state, discarded once the block is built
#[derive(Debug, Default)]
struct BlockSession<'a> {
    picked: HashSet<&'a str>,
    artists: HashSet<String>, // Lowercased artist keys in the current diversity window
    exhausted: HashSet<String>,
    resets: usize,
    picked_in_window: bool,
}

impl<'a> BlockSession<'a> {
    fn is_exhausted(&self, genre: &str) -> bool {
        self.exhausted.contains(&genre_key(genre))
    }

    fn exhaust(&mut self, genre: &str) {
        debug!(genre, "Genre exhausted");
        self.exhausted.insert(genre_key(genre));
    }

    /// A window that followed a reset ended without a single pick
    fn is_stalled(&self) -> bool {
        self.resets > 0 && !self.picked_in_window
    }

    fn start_window(&mut self) {
        self.exhausted.clear();
        self.artists.clear();
        self.resets += 1;
        self.picked_in_window = false;
        debug!(window = self.resets, "All genres exhausted, starting a new diversity window");
    }

    /// Unused tracks from a bucket, optionally skipping artists already heard this window
    fn candidates(
        &self,
        bucket: &[&'a Track],
        global_used: Option<&HashSet<String>>,
        enforce_diversity: bool,
    ) -> Vec<&'a Track> {
        bucket
            .iter()
            .copied()
            .filter(|track| !self.picked.contains(track.id.as_str()))
            .filter(|track| global_used.is_none_or(|used| !used.contains(&track.id)))
            .filter(|track| {
                !enforce_diversity
                    || !self
                        .artists
                        .contains(&normalize_artist(&track.artist).to_lowercase())
            })
            .collect()
    }

    fn record(&mut self, track: &'a Track, artist_key: &str) {
        self.picked.insert(track.id.as_str());
        self.artists.insert(artist_key.to_lowercase());
        self.picked_in_window = true;
    }
}

/// Fills a single block from a shared genre index
pub struct BlockGenerator<'i, 'a> {
    index: &'i GenreIndex<'a>,
}

impl<'i, 'a> BlockGenerator<'i, 'a> {
    pub fn new(index: &'i GenreIndex<'a>) -> Self {
        Self { index }
    }

    /// Pick tracks for one block until `target_duration` is reached or nothing is left.
    ///
    /// When `global_used` is given, tracks in it are skipped and every pick is
    /// added to it. A block that falls short of its target is a normal outcome.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        spec: &BlockSpec,
        target_duration: u64,
        mut global_used: Option<&mut HashSet<String>>,
        rng: &mut R,
    ) -> BlockResult {
        let mut block = BlockResult::empty(&spec.name, &spec.genre_weights);
        if spec.genre_weights.total() == 0 {
            debug!(block = %spec.name, "Block has no positive genre weights");
            return block;
        }

        let mut session = BlockSession::default();

        while block.total_duration < target_duration {
            let mut available: Vec<(&str, u32)> = spec
                .genre_weights
                .positive()
                .filter(|(genre, _)| !session.is_exhausted(genre))
                .collect();

            if available.is_empty() {
                if session.is_stalled() {
                    break;
                }
                session.start_window();
                available = spec.genre_weights.positive().collect();
                if available.is_empty() {
                    break;
                }
            }

            let available_weight: u64 =
                available.iter().map(|(_, weight)| u64::from(*weight)).sum();
            let Some(genre) = select_genre(&available, available_weight, rng) else {
                break;
            };

            let bucket = self.index.tracks_for(genre);
            if bucket.is_empty() {
                session.exhaust(genre);
                continue;
            }

            let mut candidates = session.candidates(bucket, global_used.as_deref(), true);
            if candidates.is_empty() {
                candidates = session.candidates(bucket, global_used.as_deref(), false);
            }
            if candidates.is_empty() {
                session.exhaust(genre);
                continue;
            }

            let track = candidates[rng.gen_range(0..candidates.len())];
            let artist_key = normalize_artist(&track.artist);

            session.record(track, &artist_key);
            if let Some(used) = global_used.as_deref_mut() {
                used.insert(track.id.clone());
            }

            block.tracks.push(TrackPick::from_track(track, genre, artist_key));
            block.total_duration = block.total_duration.saturating_add(track.duration);
        }

        info!(
            block = %block.name,
            tracks = block.tracks.len(),
            duration = block.total_duration,
            target = target_duration,
            "Generated block"
        );
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::GenreWeights;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn track(id: &str, artist: &str, genres: &[&str], duration: u64) -> Track {
        Track {
            id: id.to_string(),
            name: format!("Track {id}"),
            artist: artist.to_string(),
            album: "Album".to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            year: Some(2001),
            duration,
        }
    }

    fn spec(name: &str, weights: &[(&str, u32)]) -> BlockSpec {
        BlockSpec {
            name: name.to_string(),
            genre_weights: weights.iter().copied().collect::<GenreWeights>(),
        }
    }

    #[test]
    fn test_zero_weights_give_empty_block() {
        let tracks = vec![track("1", "A", &["Rock"], 100)];
        let index = GenreIndex::build(&tracks);
        let mut rng = StdRng::seed_from_u64(7);

        let block = BlockGenerator::new(&index).generate(
            &spec("Quiet", &[("Rock", 0), ("Pop", 0)]),
            1_000,
            None,
            &mut rng,
        );

        assert!(block.tracks.is_empty());
        assert_eq!(block.total_duration, 0);
        assert_eq!(block.genre_weights.iter().count(), 2);
    }

    #[test]
    fn test_stops_once_target_reached() {
        let tracks: Vec<Track> = (0..20)
            .map(|i| track(&i.to_string(), &format!("Artist {i}"), &["Rock"], 100))
            .collect();
        let index = GenreIndex::build(&tracks);
        let mut rng = StdRng::seed_from_u64(3);

        let block = BlockGenerator::new(&index).generate(
            &spec("Set", &[("Rock", 1)]),
            450,
            None,
            &mut rng,
        );

        // Stops on the first pick that reaches the target
        assert_eq!(block.tracks.len(), 5);
        assert_eq!(block.total_duration, 500);
    }

    #[test]
    fn test_huge_durations_saturate() {
        let long = u64::MAX / 2 + 10;
        let tracks = vec![track("1", "A", &["Drone"], long), track("2", "B", &["Drone"], long)];
        let index = GenreIndex::build(&tracks);
        let mut rng = StdRng::seed_from_u64(1);

        let block = BlockGenerator::new(&index).generate(
            &spec("Endless", &[("Drone", 1)]),
            u64::MAX,
            None,
            &mut rng,
        );

        assert_eq!(block.tracks.len(), 2);
        assert_eq!(block.total_duration, u64::MAX);
    }

    #[test]
    fn test_one_track_per_genre_terminates() {
        let tracks = vec![
            track("r", "Rocker", &["Rock"], 200),
            track("p", "Popper", &["Pop"], 180),
        ];
        let index = GenreIndex::build(&tracks);
        let mut rng = StdRng::seed_from_u64(11);

        let block = BlockGenerator::new(&index).generate(
            &spec("Long", &[("Rock", 50), ("Pop", 50)]),
            10_000,
            None,
            &mut rng,
        );

        let mut ids: Vec<&str> = block.tracks.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["p", "r"]);
        assert_eq!(block.total_duration, 380);
    }

    #[test]
    fn test_missing_genre_is_never_picked() {
        let tracks = vec![
            track("1", "A", &["Rock"], 100),
            track("2", "B", &["Rock"], 100),
        ];
        let index = GenreIndex::build(&tracks);
        let mut rng = StdRng::seed_from_u64(5);

        let block = BlockGenerator::new(&index).generate(
            &spec("Mixed", &[("Polka", 90), ("Rock", 10)]),
            10_000,
            None,
            &mut rng,
        );

        assert_eq!(block.tracks.len(), 2);
        assert!(block.tracks.iter().all(|pick| pick.genre == "Rock"));
    }

    #[test]
    fn test_relaxes_diversity_before_exhausting_genre() {
        let tracks = vec![
            track("1", "Same Band", &["Rock"], 100),
            track("2", "The Same Band", &["Rock"], 100),
            track("3", "Same Band feat. Guest", &["Rock"], 100),
        ];
        let index = GenreIndex::build(&tracks);
        let mut rng = StdRng::seed_from_u64(9);

        let block = BlockGenerator::new(&index).generate(
            &spec("Solo", &[("Rock", 1)]),
            300,
            None,
            &mut rng,
        );

        assert_eq!(block.tracks.len(), 3);
        assert!(block.tracks.iter().all(|pick| pick.artist_key == "Same Band"));
    }

    #[test]
    fn test_distinct_artists_while_available() {
        let mut tracks = Vec::new();
        for artist in 0..5 {
            for song in 0..3 {
                tracks.push(track(
                    &format!("{artist}-{song}"),
                    &format!("Artist {artist}"),
                    &["Jazz"],
                    10,
                ));
            }
        }
        let index = GenreIndex::build(&tracks);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let block = BlockGenerator::new(&index).generate(
                &spec("Jazz", &[("Jazz", 1)]),
                50,
                None,
                &mut rng,
            );

            let artists: HashSet<&str> =
                block.tracks.iter().map(|t| t.artist_key.as_str()).collect();
            assert_eq!(block.tracks.len(), 5);
            assert_eq!(artists.len(), 5, "seed {seed} repeated an artist");
        }
    }

    #[test]
    fn test_artist_window_spans_genres() {
        // Each artist has a Rock track and a differently credited Pop track
        let mut tracks = Vec::new();
        for artist in 0..5 {
            tracks.push(track(&format!("r{artist}"), &format!("Artist {artist}"), &["Rock"], 10));
            tracks.push(track(
                &format!("p{artist}"),
                &format!("The Artist {artist} feat. Guest"),
                &["Pop"],
                10,
            ));
        }
        let index = GenreIndex::build(&tracks);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let block = BlockGenerator::new(&index).generate(
                &spec("Both", &[("Rock", 50), ("Pop", 50)]),
                50,
                None,
                &mut rng,
            );

            let artists: HashSet<&str> =
                block.tracks.iter().map(|t| t.artist_key.as_str()).collect();
            assert_eq!(block.tracks.len(), 5);
            assert_eq!(artists.len(), 5, "seed {seed} repeated an artist across genres");
        }
    }

    #[test]
    fn test_global_used_is_respected_and_extended() {
        let tracks = vec![
            track("1", "A", &["Rock"], 100),
            track("2", "B", &["Rock"], 100),
            track("3", "C", &["Rock"], 100),
        ];
        let index = GenreIndex::build(&tracks);
        let mut rng = StdRng::seed_from_u64(2);
        let mut used: HashSet<String> = ["2".to_string()].into_iter().collect();

        let block = BlockGenerator::new(&index).generate(
            &spec("Rest", &[("Rock", 1)]),
            10_000,
            Some(&mut used),
            &mut rng,
        );

        assert_eq!(block.tracks.len(), 2);
        assert!(block.tracks.iter().all(|pick| pick.id != "2"));
        assert_eq!(used.len(), 3);
    }

    #[test]
    fn test_records_selected_genre_for_multi_genre_tracks() {
        let tracks = vec![track("1", "A", &["Rock", "Blues"], 100)];
        let index = GenreIndex::build(&tracks);
        let mut rng = StdRng::seed_from_u64(4);

        let block = BlockGenerator::new(&index).generate(
            &spec("Blues", &[("blues", 1)]),
            100,
            None,
            &mut rng,
        );

        assert_eq!(block.tracks.len(), 1);
        assert_eq!(block.tracks[0].genre, "blues");
    }

    #[test]
    fn test_same_seed_same_block() {
        let tracks: Vec<Track> = (0..30)
            .map(|i| {
                let genre = if i % 2 == 0 { "Rock" } else { "Pop" };
                track(&i.to_string(), &format!("Artist {}", i % 7), &[genre], 120)
            })
            .collect();
        let index = GenreIndex::build(&tracks);
        let generator = BlockGenerator::new(&index);
        let block_spec = spec("Repeat", &[("Rock", 60), ("Pop", 40)]);

        let first = generator.generate(&block_spec, 1_200, None, &mut StdRng::seed_from_u64(99));
        let second = generator.generate(&block_spec, 1_200, None, &mut StdRng::seed_from_u64(99));

        assert_eq!(first, second);
    }
}
