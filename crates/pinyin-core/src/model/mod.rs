//! Unigram and bigram frequency tables.
//!
//! `UnigramTable` maps a syllable to its candidate characters with counts.
//! `BigramTable` maps a syllable pair to character co-occurrence counts.
//! Both are validated at construction and immutable afterwards.

mod snapshot;
mod table_io;

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("table file not found: {}", .0.display())]
    MissingTable(PathBuf),

    #[error("invalid table JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{table} entry {key:?}: {words} words but {counts} counts")]
    LengthMismatch {
        table: &'static str,
        key: String,
        words: usize,
        counts: usize,
    },

    #[error("{table} entry {key:?}: zero count for {word:?}")]
    ZeroCount {
        table: &'static str,
        key: String,
        word: String,
    },

    #[error("{table} entry {key:?}: duplicate word {word:?}")]
    DuplicateWord {
        table: &'static str,
        key: String,
        word: String,
    },

    #[error("{table} entry {key:?}: expected two space-separated parts in {value:?}")]
    MalformedPair {
        table: &'static str,
        key: String,
        value: String,
    },

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected PYLM)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
}

/// A candidate character for one syllable with its corpus count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub ch: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct UnigramEntry {
    /// File order, which is also candidate evaluation order.
    candidates: Vec<Candidate>,
    total: u64,
}

/// Syllable → candidate characters with counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnigramTable {
    entries: HashMap<String, UnigramEntry>,
}

impl UnigramTable {
    /// Build from `(syllable, [(char, count)])` entries, validating counts and
    /// uniqueness. Entry lists keep their order.
    pub fn from_entries<I>(entries: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (String, Vec<(String, u64)>)>,
    {
        let mut table = HashMap::new();
        for (syllable, words) in entries {
            let mut seen = HashSet::new();
            let mut candidates = Vec::with_capacity(words.len());
            let mut total = 0u64;
            for (ch, count) in words {
                if count == 0 {
                    return Err(ModelError::ZeroCount {
                        table: "unigram",
                        key: syllable,
                        word: ch,
                    });
                }
                if !seen.insert(ch.clone()) {
                    return Err(ModelError::DuplicateWord {
                        table: "unigram",
                        key: syllable,
                        word: ch,
                    });
                }
                total = total.saturating_add(count);
                candidates.push(Candidate { ch, count });
            }
            table.insert(syllable, UnigramEntry { candidates, total });
        }
        Ok(Self { entries: table })
    }

    /// Candidates for a syllable in file order. Empty for unknown syllables.
    pub fn candidates(&self, syllable: &str) -> &[Candidate] {
        self.entries
            .get(syllable)
            .map(|e| e.candidates.as_slice())
            .unwrap_or(&[])
    }

    /// Sum of all counts under a syllable, 0 when absent.
    pub fn total(&self, syllable: &str) -> u64 {
        self.entries.get(syllable).map(|e| e.total).unwrap_or(0)
    }

    pub fn count(&self, syllable: &str, ch: &str) -> u64 {
        self.candidates(syllable)
            .iter()
            .find(|c| c.ch == ch)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    /// Number of distinct syllable keys, empty entries included.
    pub fn vocab_size(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, syllable: &str) -> bool {
        self.entries.contains_key(syllable)
    }

    /// Total number of (syllable, char) entries.
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(|e| e.candidates.len()).sum()
    }
}

/// Co-occurrence counts for one syllable pair: prev char → curr char → count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharBigrams {
    counts: HashMap<String, HashMap<String, u64>>,
}

impl CharBigrams {
    /// Observed count of `prev` followed by `curr`, 0 when unseen.
    pub fn count(&self, prev: &str, curr: &str) -> u64 {
        self.counts
            .get(prev)
            .and_then(|m| m.get(curr))
            .copied()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// (prev syllable, curr syllable) → character bigram counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigramTable {
    pairs: HashMap<String, HashMap<String, CharBigrams>>,
}

impl BigramTable {
    /// Build from `((prev_syl, curr_syl), [((prev_char, curr_char), count)])`
    /// entries. Entries with the same syllable pair are merged.
    pub fn from_entries<I>(entries: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = ((String, String), Vec<((String, String), u64)>)>,
    {
        let mut pairs: HashMap<String, HashMap<String, CharBigrams>> = HashMap::new();
        for ((prev_syl, curr_syl), words) in entries {
            let key = format!("{prev_syl} {curr_syl}");
            let bigrams = pairs
                .entry(prev_syl)
                .or_default()
                .entry(curr_syl)
                .or_default();
            for ((prev_ch, curr_ch), count) in words {
                if count == 0 {
                    return Err(ModelError::ZeroCount {
                        table: "bigram",
                        key,
                        word: format!("{prev_ch} {curr_ch}"),
                    });
                }
                let successors = bigrams.counts.entry(prev_ch.clone()).or_default();
                if successors.contains_key(&curr_ch) {
                    return Err(ModelError::DuplicateWord {
                        table: "bigram",
                        key,
                        word: format!("{prev_ch} {curr_ch}"),
                    });
                }
                successors.insert(curr_ch, count);
            }
        }
        Ok(Self { pairs })
    }

    /// Counts for one syllable pair, if the pair was observed at all.
    pub fn pair(&self, prev_syllable: &str, curr_syllable: &str) -> Option<&CharBigrams> {
        self.pairs.get(prev_syllable)?.get(curr_syllable)
    }

    pub fn count(&self, prev_syllable: &str, curr_syllable: &str, prev: &str, curr: &str) -> u64 {
        self.pair(prev_syllable, curr_syllable)
            .map(|b| b.count(prev, curr))
            .unwrap_or(0)
    }

    /// Number of distinct syllable pairs.
    pub fn pair_count(&self) -> usize {
        self.pairs.values().map(HashMap::len).sum()
    }

    /// Total number of character bigram entries.
    pub fn entry_count(&self) -> usize {
        self.pairs
            .values()
            .flat_map(HashMap::values)
            .map(CharBigrams::len)
            .sum()
    }
}

/// Both frequency tables, loaded once and shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageModel {
    pub unigram: UnigramTable,
    pub bigram: BigramTable,
}

impl LanguageModel {
    pub fn new(unigram: UnigramTable, bigram: BigramTable) -> Self {
        Self { unigram, bigram }
    }
}
