use crate::models::UNKNOWN_ARTIST;

/// Collaboration markers, applied in this order; each pass sees the previous truncation
const CREDIT_SEPARATORS: [&str; 9] = [
    " and ",
    " & ",
    " feat. ",
    " feat ",
    " featuring ",
    " with ",
    " vs ",
    " vs. ",
    ", ",
];

/// Reduce a raw artist credit to the primary artist used for diversity checks.
///
/// "Artist A feat. Artist B" and "Artist A" map to the same key, and a leading
/// "The " is dropped so "The Beatles" and "Beatles" collide too. The key is
/// never empty; blank credits become "Unknown Artist".
pub fn normalize_artist(raw: &str) -> String {
    let mut normalized = raw.trim();
    if normalized.is_empty() {
        return UNKNOWN_ARTIST.to_string();
    }

    for separator in CREDIT_SEPARATORS {
        if let Some(idx) = find_ignore_ascii_case(normalized, separator) {
            if idx > 0 {
                normalized = normalized[..idx].trim();
            }
        }
    }

    if normalized
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("the "))
    {
        normalized = &normalized[4..];
    }

    if normalized.is_empty() {
        UNKNOWN_ARTIST.to_string()
    } else {
        normalized.to_string()
    }
}

/// Byte offset of the first case-insensitive occurrence of an ASCII needle
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().map(|(idx, _)| idx).find(|&idx| {
        haystack
            .get(idx..idx + needle.len())
            .is_some_and(|window| window.eq_ignore_ascii_case(needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_the() {
        assert_eq!(normalize_artist("The Beatles"), "Beatles");
        assert_eq!(normalize_artist("the strokes"), "strokes");
        // Only a whole-word prefix counts
        assert_eq!(normalize_artist("Theory of a Deadman"), "Theory of a Deadman");
    }

    #[test]
    fn test_featured_artists_collapse() {
        assert_eq!(normalize_artist("Artist A feat. Artist B"), "Artist A");
        assert_eq!(normalize_artist("Artist A FEAT Artist B"), "Artist A");
        assert_eq!(normalize_artist("Artist A featuring Artist B"), "Artist A");
        assert_eq!(normalize_artist("DJ A & DJ B"), "DJ A");
        assert_eq!(normalize_artist("DJ A vs. DJ B"), "DJ A");
        assert_eq!(normalize_artist("Simon and Garfunkel"), "Simon");
    }

    #[test]
    fn test_blank_credit_is_unknown() {
        assert_eq!(normalize_artist(""), UNKNOWN_ARTIST);
        assert_eq!(normalize_artist("   \t"), UNKNOWN_ARTIST);
    }

    #[test]
    fn test_separators_apply_sequentially() {
        // " and " truncates first, then ", " runs on what is left
        assert_eq!(normalize_artist("Crosby, Stills and Nash"), "Crosby");
        assert_eq!(
            normalize_artist("The Dead Weather with Jack White, Alison Mosshart"),
            "Dead Weather"
        );
    }

    #[test]
    fn test_separator_at_start_is_ignored() {
        assert_eq!(normalize_artist(", Solo"), ", Solo");
    }

    #[test]
    fn test_non_ascii_credit_is_preserved() {
        assert_eq!(normalize_artist("Björk feat. Thom Yorke"), "Björk");
        assert_eq!(normalize_artist("Sigur Rós"), "Sigur Rós");
    }
}
