//! Pinyin-to-character decoding via beam-pruned Viterbi search.
//!
//! Each syllable position holds a beam of DP cells (one per candidate
//! character). Cells are extended with smoothed bigram/unigram scores,
//! pruned to the configured width, and the best final cell is backtracked
//! into a character sequence.

mod beam;
pub(crate) mod cost;
pub mod explain;
mod fallback;

#[cfg(test)]
pub(crate) mod testutil;

use serde::Serialize;
use tracing::{debug, debug_span, warn};

use crate::model::{LanguageModel, UnigramTable};
use crate::settings::Settings;

use beam::{Beam, DpCell};
use cost::{DefaultScoring, ScoringPolicy};

pub use cost::{transition_score, MIN_SCORE};
pub use explain::Explanation;
pub use fallback::FallbackTable;

/// Best character sequence for one input line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedPath {
    /// One entry per input syllable.
    pub chars: Vec<String>,
    /// Cumulative log-score of the final cell.
    pub score: f64,
}

impl DecodedPath {
    pub fn text(&self) -> String {
        self.chars.concat()
    }
}

/// Decoder over a loaded model. Holds only shared references, so one decoder
/// can serve any number of lines and threads.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    model: &'a LanguageModel,
    settings: &'a Settings,
}

impl<'a> Decoder<'a> {
    pub fn new(model: &'a LanguageModel, settings: &'a Settings) -> Self {
        Self { model, settings }
    }

    /// Decode syllables into a character string.
    ///
    /// Empty input, or a final position with no candidates, yields an empty
    /// string. Never fails.
    pub fn decode<S: AsRef<str>>(&self, syllables: &[S]) -> String {
        self.decode_path(syllables)
            .map(|p| p.text())
            .unwrap_or_default()
    }

    /// Decode and keep the per-position characters and final score.
    pub fn decode_path<S: AsRef<str>>(&self, syllables: &[S]) -> Option<DecodedPath> {
        let syllables: Vec<&str> = syllables.iter().map(|s| s.as_ref()).collect();
        let _span = debug_span!("decode", len = syllables.len()).entered();
        let beams = self.search(&syllables);
        let path = backtrack(&beams, self.settings.fallback.placeholder());
        debug!(
            beam_sizes = ?beams.iter().map(Beam::len).collect::<Vec<_>>(),
            best_score = path.as_ref().map(|p| p.score)
        );
        path
    }

    /// Decode and report every position's beam.
    pub fn explain<S: AsRef<str>>(&self, syllables: &[S]) -> Explanation {
        let syllables: Vec<&str> = syllables.iter().map(|s| s.as_ref()).collect();
        let beams = self.search(&syllables);
        let path = backtrack(&beams, self.settings.fallback.placeholder());
        Explanation::new(&syllables, &beams, path)
    }

    fn search(&self, syllables: &[&str]) -> Vec<Beam<'a>> {
        let scorer = DefaultScoring::new(self.model, self.settings.decoder);
        beam_search(&self.model.unigram, &scorer, self.settings, syllables)
    }
}

/// Decode with a throwaway [`Decoder`].
pub fn decode<S: AsRef<str>>(
    model: &LanguageModel,
    settings: &Settings,
    syllables: &[S],
) -> String {
    Decoder::new(model, settings).decode(syllables)
}

/// Run the forward pass, returning one beam per syllable.
pub(crate) fn beam_search<'a>(
    unigram: &'a UnigramTable,
    scorer: &dyn ScoringPolicy,
    settings: &'a Settings,
    syllables: &[&str],
) -> Vec<Beam<'a>> {
    let Some((&first, rest)) = syllables.split_first() else {
        return Vec::new();
    };
    let width = settings.decoder.beam_width;

    let mut beams = Vec::with_capacity(syllables.len());
    beams.push(seed(unigram, scorer, settings, first));

    for (offset, &curr_syllable) in rest.iter().enumerate() {
        let prev_syllable = syllables[offset];
        let prev_beam = &beams[offset];
        let candidates = unigram.candidates(curr_syllable);

        if prev_beam.is_empty() && !candidates.is_empty() {
            warn!(
                position = offset + 1,
                syllable = curr_syllable,
                "previous beam empty, restarting search"
            );
        }

        let mut cells = Vec::with_capacity(candidates.len());
        for cand in candidates {
            let mut best: Option<(f64, usize)> = None;
            for (idx, prev) in prev_beam.cells().iter().enumerate() {
                let score = scorer.transition_score(prev_syllable, curr_syllable, prev, cand);
                if best.map_or(true, |(b, _)| score > b) {
                    best = Some((score, idx));
                }
            }
            let (score, prev) = match best {
                Some((score, idx)) => (score, Some(idx)),
                None => (settings.decoder.min_score, None),
            };
            cells.push(DpCell {
                ch: &cand.ch,
                score,
                prev,
            });
        }
        beams.push(Beam::pruned(cells, width));
    }

    beams
}

/// First position: every unigram candidate, or a single fallback cell.
fn seed<'a>(
    unigram: &'a UnigramTable,
    scorer: &dyn ScoringPolicy,
    settings: &'a Settings,
    syllable: &str,
) -> Beam<'a> {
    let candidates = unigram.candidates(syllable);
    let cells = if candidates.is_empty() {
        let ch = settings.fallback.resolve(syllable);
        warn!(
            syllable,
            seed = ch,
            known = unigram.contains(syllable),
            "no candidates for first syllable"
        );
        vec![DpCell {
            ch,
            score: scorer.seed_score(1),
            prev: None,
        }]
    } else {
        candidates
            .iter()
            .map(|c| DpCell {
                ch: &c.ch,
                score: scorer.seed_score(c.count),
                prev: None,
            })
            .collect()
    };
    Beam::pruned(cells, settings.decoder.beam_width)
}

/// Follow predecessor links back from the best final cell.
///
/// A missing link at an interior position falls back to the best cell of the
/// previous beam, or to `placeholder` when that beam is empty.
pub(crate) fn backtrack(beams: &[Beam<'_>], placeholder: &str) -> Option<DecodedPath> {
    let best = beams.last()?.best()?;
    let score = best.score;

    let mut chars = Vec::with_capacity(beams.len());
    let mut current = Some(best);
    for pos in (0..beams.len()).rev() {
        chars.push(current.map_or(placeholder, |c| c.ch).to_string());
        if pos == 0 {
            break;
        }
        current = match current.and_then(|c| c.prev) {
            Some(idx) => beams[pos - 1].get(idx),
            None => {
                debug!(position = pos, "broken predecessor link");
                beams[pos - 1].best()
            }
        };
    }
    chars.reverse();

    Some(DecodedPath { chars, score })
}
