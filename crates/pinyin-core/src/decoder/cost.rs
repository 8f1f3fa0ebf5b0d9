use crate::model::{Candidate, LanguageModel};
use crate::settings::DecoderSettings;

use super::beam::DpCell;

/// Stand-in for negative infinity. Every transition score is clamped to at
/// least this value, so comparisons never see an infinity or NaN.
pub const MIN_SCORE: f64 = -1e20;

/// Log-score of a path extended by one character.
///
/// - `transition > 0`: `prev + lm_weight * ln(transition)`
/// - `transition == 0`: Laplace backoff,
///   `prev + ln((curr_count + α) / (max(prev_total, 1) + α * vocab_size))`
///
/// The result is blended with `ln(curr_count)` by `interpolation` and
/// clamped to `min_score`.
pub fn transition_score(
    params: &DecoderSettings,
    transition: u64,
    prev_score: f64,
    curr_count: u64,
    prev_total: u64,
    vocab_size: usize,
) -> f64 {
    let base = if transition > 0 {
        prev_score + params.lm_weight * (transition as f64).ln()
    } else {
        let alpha = params.smoothing_alpha;
        let numerator = curr_count as f64 + alpha;
        let denominator = prev_total.max(1) as f64 + alpha * vocab_size as f64;
        prev_score + (numerator / denominator).ln()
    };
    let lambda = params.interpolation;
    let blended = lambda * base + (1.0 - lambda) * (curr_count as f64).ln();
    // f64::max drops a NaN operand, so ln(0) terms also land on the floor.
    blended.max(params.min_score)
}

/// Trait for scoring DP transitions during beam search.
pub(crate) trait ScoringPolicy: Send + Sync {
    /// Score of a first-position cell with the given unigram count.
    fn seed_score(&self, count: u64) -> f64;

    fn transition_score(
        &self,
        prev_syllable: &str,
        curr_syllable: &str,
        prev: &DpCell<'_>,
        curr: &Candidate,
    ) -> f64;
}

/// Smoothed bigram/unigram scoring over a loaded language model.
pub(crate) struct DefaultScoring<'a> {
    model: &'a LanguageModel,
    params: DecoderSettings,
}

impl<'a> DefaultScoring<'a> {
    pub fn new(model: &'a LanguageModel, params: DecoderSettings) -> Self {
        Self { model, params }
    }
}

impl ScoringPolicy for DefaultScoring<'_> {
    fn seed_score(&self, count: u64) -> f64 {
        (count as f64).ln()
    }

    fn transition_score(
        &self,
        prev_syllable: &str,
        curr_syllable: &str,
        prev: &DpCell<'_>,
        curr: &Candidate,
    ) -> f64 {
        let transition = self
            .model
            .bigram
            .count(prev_syllable, curr_syllable, prev.ch, &curr.ch);
        transition_score(
            &self.params,
            transition,
            prev.score,
            curr.count,
            self.model.unigram.total(prev_syllable),
            self.model.unigram.vocab_size(),
        )
    }
}
