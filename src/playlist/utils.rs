use rand::Rng;
use rand::seq::SliceRandom;

const OPENER_NAMES: [&str; 5] = ["Opener", "Welcome", "Arrival", "Warm Up", "Intro"];
const MIDDLE_NAMES: [&str; 5] = ["Building", "Cruising", "Groove", "Flow", "Voyage"];
const PEAK_NAMES: [&str; 5] = ["Peak", "Climax", "Zenith", "Summit", "Apex"];
const LATE_NAMES: [&str; 5] = ["Wind Down", "Descent", "Sunset", "Drift", "Twilight"];
const CLOSER_NAMES: [&str; 5] = ["Closer", "Finale", "Departure", "Nightcap", "Farewell"];

/// Block naming utilities
pub struct BlockNaming;

impl BlockNaming {
    /// Name a block after where it sits in the playlist's arc.
    ///
    /// A single block is the peak and two blocks are opener and closer, both
    /// with fixed names. Longer playlists draw from the name set for each
    /// position; the centre block (both centres for an even count) is a peak.
    pub fn block_name<R: Rng + ?Sized>(index: usize, total: usize, rng: &mut R) -> String {
        if total == 1 {
            return PEAK_NAMES[0].to_string();
        }
        if total == 2 {
            let name = if index == 0 { OPENER_NAMES[0] } else { CLOSER_NAMES[0] };
            return name.to_string();
        }

        let mid_point = total / 2;
        let names: &[&str] = if index == 0 {
            &OPENER_NAMES
        } else if index == total - 1 {
            &CLOSER_NAMES
        } else if index == mid_point || (total % 2 == 0 && index == mid_point - 1) {
            &PEAK_NAMES
        } else if index < mid_point {
            &MIDDLE_NAMES
        } else {
            &LATE_NAMES
        };

        names.choose(rng).unwrap_or(&names[0]).to_string()
    }
}
