//! Decoder settings loaded from TOML.
//!
//! - `Settings::default()` parses the embedded `default_settings.toml`
//! - `parse_settings_toml(toml)` parses and validates a custom file
//! - Settings are plain values; callers hand them to `Decoder::new`

use serde::Deserialize;

use crate::decoder::{FallbackTable, MIN_SCORE};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub decoder: DecoderSettings,
    pub fallback: FallbackTable,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

/// Numeric policy of the scorer and the beam.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DecoderSettings {
    /// Multiplier on ln(bigram count) for observed pairs.
    pub lm_weight: f64,
    /// Laplace smoothing constant of the backoff estimate.
    pub smoothing_alpha: f64,
    /// Weight of the path score against the standalone unigram term.
    pub interpolation: f64,
    pub beam_width: usize,
    /// Floor applied to every transition score.
    #[serde(default = "default_min_score")]
    pub min_score: f64,
}

impl Default for DecoderSettings {
    fn default() -> Self {
        Settings::default().decoder
    }
}

fn default_min_score() -> f64 {
    MIN_SCORE
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check {
        ($cond:expr, $section:ident . $field:ident, $reason:expr) => {
            if !$cond {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: $reason.to_string(),
                });
            }
        };
    }

    let d = &s.decoder;
    check!(
        d.lm_weight.is_finite() && d.lm_weight > 0.0,
        decoder.lm_weight,
        "must be positive"
    );
    check!(
        d.smoothing_alpha.is_finite() && d.smoothing_alpha > 0.0,
        decoder.smoothing_alpha,
        "must be positive"
    );
    check!(
        d.interpolation > 0.0 && d.interpolation <= 1.0,
        decoder.interpolation,
        "must be in (0, 1]"
    );
    check!(d.beam_width > 0, decoder.beam_width, "must be positive");
    check!(
        d.min_score.is_finite() && d.min_score < 0.0,
        decoder.min_score,
        "must be a finite negative number"
    );
    check!(
        !s.fallback.placeholder().is_empty(),
        fallback.placeholder,
        "must not be empty"
    );
    for (syllable, ch) in s.fallback.iter() {
        if ch.is_empty() {
            return Err(SettingsError::InvalidValue {
                field: format!("fallback.syllables.{syllable}"),
                reason: "must not be empty".to_string(),
            });
        }
    }

    Ok(())
}
