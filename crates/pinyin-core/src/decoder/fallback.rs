use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Seed characters for a first syllable that the unigram table does not
/// know. Consulted only when the syllable has no candidates; a syllable
/// missing here too gets the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackTable {
    placeholder: String,
    #[serde(default)]
    syllables: BTreeMap<String, String>,
}

impl FallbackTable {
    pub fn new<I>(placeholder: impl Into<String>, syllables: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            placeholder: placeholder.into(),
            syllables: syllables.into_iter().collect(),
        }
    }

    /// Character emitted when nothing else is known.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn get(&self, syllable: &str) -> Option<&str> {
        self.syllables.get(syllable).map(String::as_str)
    }

    /// Fallback character for `syllable`, or the placeholder.
    pub fn resolve(&self, syllable: &str) -> &str {
        self.get(syllable).unwrap_or(&self.placeholder)
    }

    /// Entries in syllable order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.syllables
            .iter()
            .map(|(s, c)| (s.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Settings::default().fallback
    }
}
