use rand::Rng;

/// Draw one genre with probability proportional to its weight.
///
/// `total_weight` must equal the sum of `weights`; entries are walked in the
/// order given, so the same roll always lands on the same genre.
pub fn select_genre<'w, R: Rng + ?Sized>(
    weights: &[(&'w str, u32)],
    total_weight: u64,
    rng: &mut R,
) -> Option<&'w str> {
    if total_weight == 0 {
        return None;
    }
    let roll = rng.gen_range(0..total_weight);
    select_with_roll(weights, roll)
}

/// First genre whose running weight sum strictly exceeds `roll`
pub fn select_with_roll<'w>(weights: &[(&'w str, u32)], roll: u64) -> Option<&'w str> {
    let mut cumulative = 0u64;
    for &(genre, weight) in weights {
        cumulative += u64::from(weight);
        if roll < cumulative {
            return Some(genre);
        }
    }
    None
}
