use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{BigramTable, LanguageModel, ModelError, UnigramTable};

/// One table entry as written by the corpus trainer: parallel `words` and
/// `counts` lists, ordered by descending count.
#[derive(Debug, Deserialize)]
struct RawEntry {
    words: Vec<String>,
    counts: Vec<u64>,
}

fn parse_raw(json: &str) -> Result<HashMap<String, RawEntry>, ModelError> {
    Ok(serde_json::from_str(json)?)
}

fn zip_entry(table: &'static str, key: &str, raw: RawEntry) -> Result<Vec<(String, u64)>, ModelError> {
    if raw.words.len() != raw.counts.len() {
        return Err(ModelError::LengthMismatch {
            table,
            key: key.to_string(),
            words: raw.words.len(),
            counts: raw.counts.len(),
        });
    }
    Ok(raw.words.into_iter().zip(raw.counts).collect())
}

/// Split `"a b"` into `("a", "b")`. Anything other than exactly two
/// whitespace-separated parts is malformed.
fn split_pair(table: &'static str, key: &str, value: &str) -> Result<(String, String), ModelError> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Ok((a.to_string(), b.to_string())),
        _ => Err(ModelError::MalformedPair {
            table,
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn read_table(path: &Path) -> Result<String, ModelError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ModelError::MissingTable(path.to_path_buf()),
        _ => ModelError::Io(e),
    })
}

impl UnigramTable {
    /// Parse the unigram JSON table (`syllable → {words, counts}`).
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let raw = parse_raw(json)?;
        let mut entries = Vec::with_capacity(raw.len());
        for (syllable, entry) in raw {
            let words = zip_entry("unigram", &syllable, entry)?;
            entries.push((syllable, words));
        }
        Self::from_entries(entries)
    }

    pub fn open(path: &Path) -> Result<Self, ModelError> {
        Self::from_json_str(&read_table(path)?)
    }
}

impl BigramTable {
    /// Parse the bigram JSON table (`"syl1 syl2" → {words: ["c1 c2"], counts}`).
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let raw = parse_raw(json)?;
        let mut entries = Vec::with_capacity(raw.len());
        for (key, entry) in raw {
            let syllables = split_pair("bigram", &key, &key)?;
            let words = zip_entry("bigram", &key, entry)?
                .into_iter()
                .map(|(word, count)| Ok((split_pair("bigram", &key, &word)?, count)))
                .collect::<Result<Vec<_>, ModelError>>()?;
            entries.push((syllables, words));
        }
        Self::from_entries(entries)
    }

    pub fn open(path: &Path) -> Result<Self, ModelError> {
        Self::from_json_str(&read_table(path)?)
    }
}

impl LanguageModel {
    /// Load both JSON tables. Either file missing or malformed fails the
    /// whole load.
    pub fn open(unigram_path: &Path, bigram_path: &Path) -> Result<Self, ModelError> {
        let unigram = UnigramTable::open(unigram_path)?;
        let bigram = BigramTable::open(bigram_path)?;
        info!(
            syllables = unigram.vocab_size(),
            unigrams = unigram.entry_count(),
            syllable_pairs = bigram.pair_count(),
            bigrams = bigram.entry_count(),
            "language model loaded"
        );
        Ok(Self::new(unigram, bigram))
    }

    pub fn from_json_strs(unigram_json: &str, bigram_json: &str) -> Result<Self, ModelError> {
        Ok(Self::new(
            UnigramTable::from_json_str(unigram_json)?,
            BigramTable::from_json_str(bigram_json)?,
        ))
    }
}
