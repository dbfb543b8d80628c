use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Genre → weight mapping that remembers declaration order.
///
/// Order decides which genre a given roll lands on, so it survives a JSON
/// round-trip unchanged. Serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreWeights {
    entries: Vec<(String, u32)>,
}

impl GenreWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a genre's weight, keeping its original position if already present
    pub fn insert(&mut self, genre: impl Into<String>, weight: u32) {
        let genre = genre.into();
        match self.entries.iter_mut().find(|(name, _)| *name == genre) {
            Some(entry) => entry.1 = weight,
            None => self.entries.push((genre, weight)),
        }
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries
            .iter()
            .map(|(genre, weight)| (genre.as_str(), *weight))
    }

    /// Entries that can actually be drawn
    pub fn positive(&self) -> impl Iterator<Item = (&str, u32)> {
        self.iter().filter(|(_, weight)| *weight > 0)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, weight)| u64::from(*weight)).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for GenreWeights {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut weights = GenreWeights::new();
        for (genre, weight) in iter {
            weights.insert(genre, weight);
        }
        weights
    }
}

impl Serialize for GenreWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (genre, weight) in &self.entries {
            map.serialize_entry(genre, weight)?;
        }
        map.end()
    }
}

struct GenreWeightsVisitor;

impl<'de> Visitor<'de> for GenreWeightsVisitor {
    type Value = GenreWeights;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of genre names to non-negative integer weights")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut weights = GenreWeights::new();
        while let Some((genre, weight)) = access.next_entry::<String, u32>()? {
            weights.insert(genre, weight);
        }
        Ok(weights)
    }
}

impl<'de> Deserialize<'de> for GenreWeights {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(GenreWeightsVisitor)
    }
}
