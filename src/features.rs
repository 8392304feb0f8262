//! Keyword features that drive the visual.
//!
//! Converts memory text into raw lexicon hit counts and then into the four
//! bounded axis scores that the schema assembler and renderer consume.
//!
//! - Valence: positive minus negative words, squashed into [-1, 1]
//! - Arousal: high-energy minus low-energy words, squashed into [0, 1]
//! - Social and nostalgia: single lexicon, squashed into [0, 1]

use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};

/// Weight of a single lexicon word found in the text.
pub const WORD_WEIGHT: i32 = 2;

/// Divisor inside the logistic; smaller values make scores saturate faster.
pub const SIGMOID_SOFTNESS: f64 = 4.0;

/// Logistic squashing used by every axis.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x / SIGMOID_SOFTNESS).exp())
}

/// How word boundaries are found before matching lexicon entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Pad the lowercased text with spaces and look for `" word "`.
    /// Words touching punctuation ("cake." or "party!") never match.
    SpacePadded,
    /// Like `SpacePadded`, but punctuation is turned into spaces first so
    /// "cake." matches `cake`. Apostrophes are kept inside words.
    #[default]
    Punctuation,
}

impl BoundaryMode {
    /// Lowercase `text` and pad it with boundary spaces.
    pub fn pad(self, text: &str) -> String {
        let lower = text.to_lowercase();
        let body: String = match self {
            BoundaryMode::SpacePadded => lower,
            BoundaryMode::Punctuation => lower
                .chars()
                .map(|c| {
                    if c.is_alphanumeric() || c == '\'' {
                        c
                    } else {
                        ' '
                    }
                })
                .collect(),
        };
        format!(" {} ", body)
    }
}

/// Weighted count of lexicon words present in `padded` as whole words.
///
/// `padded` must already be lowercased and space-padded (see
/// [`BoundaryMode::pad`]). Each distinct word counts once.
pub fn score(padded: &str, words: &[&str]) -> i32 {
    words
        .iter()
        .filter(|w| padded.contains(&format!(" {} ", w)))
        .count() as i32
        * WORD_WEIGHT
}

/// Scores text against every lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    pub boundary: BoundaryMode,
}

impl Scorer {
    pub fn new(boundary: BoundaryMode) -> Self {
        Self { boundary }
    }

    /// Count lexicon hits in `text`.
    pub fn raw_features(&self, text: &str) -> RawFeatures {
        let padded = self.boundary.pad(text.trim());
        let hits = |lexicon: Lexicon| score(&padded, lexicon.words());

        RawFeatures {
            positive: hits(Lexicon::Positive),
            negative: hits(Lexicon::Negative),
            high_energy: hits(Lexicon::HighEnergy),
            low_energy: hits(Lexicon::LowEnergy),
            social: hits(Lexicon::Social),
            nostalgia: hits(Lexicon::Nostalgia),
        }
    }

    /// Shorthand for `raw_features(text).normalized()`.
    pub fn axis_scores(&self, text: &str) -> AxisScores {
        self.raw_features(text).normalized()
    }
}

/// Weighted lexicon hits before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawFeatures {
    pub positive: i32,
    pub negative: i32,
    pub high_energy: i32,
    pub low_energy: i32,
    pub social: i32,
    pub nostalgia: i32,
}

impl RawFeatures {
    /// Squash raw counts into bounded axis scores.
    pub fn normalized(&self) -> AxisScores {
        let valence = (sigmoid((self.positive - self.negative) as f64) - 0.5) * 2.0;
        AxisScores {
            valence: valence.clamp(-1.0, 1.0),
            arousal: sigmoid((self.high_energy - self.low_energy) as f64).clamp(0.0, 1.0),
            social: sigmoid(self.social as f64).clamp(0.0, 1.0),
            nostalgia: sigmoid(self.nostalgia as f64).clamp(0.0, 1.0),
        }
    }
}

/// The four emotion axes, bounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisScores {
    /// Negative to positive feeling (-1 to 1).
    pub valence: f64,
    /// Calm to excited (0 to 1).
    pub arousal: f64,
    /// Alone to in company (0 to 1).
    pub social: f64,
    /// Present to past (0 to 1).
    pub nostalgia: f64,
}

impl Default for AxisScores {
    /// The "no signal" scores: every axis at its logistic midpoint.
    fn default() -> Self {
        RawFeatures::default().normalized()
    }
}

impl AxisScores {
    /// Round every axis to `decimals` places.
    pub fn rounded(&self, decimals: i32) -> Self {
        let factor = 10f64.powi(decimals);
        let round = |x: f64| (x * factor).round() / factor;
        Self {
            valence: round(self.valence),
            arousal: round(self.arousal),
            social: round(self.social),
            nostalgia: round(self.nostalgia),
        }
    }

    /// Clamp every axis into its declared range; NaN becomes the midpoint.
    pub fn clamped(&self) -> Self {
        let neutral = Self::default();
        let fix = |x: f64, lo: f64, hi: f64, mid: f64| {
            if x.is_nan() {
                mid
            } else {
                x.clamp(lo, hi)
            }
        };
        Self {
            valence: fix(self.valence, -1.0, 1.0, neutral.valence),
            arousal: fix(self.arousal, 0.0, 1.0, neutral.arousal),
            social: fix(self.social, 0.0, 1.0, neutral.social),
            nostalgia: fix(self.nostalgia, 0.0, 1.0, neutral.nostalgia),
        }
    }

    pub fn in_bounds(&self) -> bool {
        (-1.0..=1.0).contains(&self.valence)
            && (0.0..=1.0).contains(&self.arousal)
            && (0.0..=1.0).contains(&self.social)
            && (0.0..=1.0).contains(&self.nostalgia)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_midpoint_and_softness() {
        assert_eq!(sigmoid(0.0), 0.5);
        let expected = 1.0 / (1.0 + (-1.0f64).exp());
        assert!((sigmoid(4.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn score_counts_each_word_once() {
        let padded = BoundaryMode::Punctuation.pad("Happy happy joy");
        assert_eq!(score(&padded, &["happy", "joy", "sad"]), 4);
    }

    #[test]
    fn empty_lexicon_scores_zero() {
        let padded = BoundaryMode::SpacePadded.pad("anything at all");
        assert_eq!(score(&padded, &[]), 0);
    }

    #[test]
    fn space_padded_misses_words_next_to_punctuation() {
        let padded = BoundaryMode::SpacePadded.pad("What a party!");
        assert_eq!(score(&padded, &["party"]), 0);

        let padded = BoundaryMode::Punctuation.pad("What a party!");
        assert_eq!(score(&padded, &["party"]), 2);
    }

    #[test]
    fn matching_is_whole_word_only() {
        let padded = BoundaryMode::Punctuation.pad("a partygoer");
        assert_eq!(score(&padded, &["party"]), 0);
    }

    #[test]
    fn apostrophes_stay_inside_words() {
        let padded = BoundaryMode::Punctuation.pad("It's fine");
        assert!(padded.contains(" it's "));
    }

    #[test]
    fn no_signal_gives_neutral_scores() {
        let scores = Scorer::default().axis_scores("");
        assert_eq!(scores.valence, 0.0);
        assert_eq!(scores.arousal, 0.5);
        assert_eq!(scores.social, 0.5);
        assert_eq!(scores.nostalgia, 0.5);
    }

    #[test]
    fn valence_follows_lexicon_balance() {
        let scorer = Scorer::default();
        assert!(scorer.axis_scores("so happy and grateful").valence > 0.0);
        assert!(scorer.axis_scores("sad, lonely and tired").valence < 0.0);
    }

    #[test]
    fn arousal_balances_high_against_low() {
        let scorer = Scorer::default();
        let raw = scorer.raw_features("a quiet party");
        assert_eq!(raw.high_energy, 2);
        assert_eq!(raw.low_energy, 2);
        assert_eq!(raw.normalized().arousal, 0.5);
    }

    #[test]
    fn saturated_input_stays_in_bounds() {
        let text = Lexicon::Positive.words().join(" ");
        let scores = Scorer::default().axis_scores(&text);
        assert!(scores.in_bounds());
        assert!(scores.valence > 0.9);
    }

    #[test]
    fn non_ascii_text_is_neutral_and_bounded() {
        let scores = Scorer::default().axis_scores("昨日は誕生日でした 🎂");
        assert!(scores.in_bounds());
        assert_eq!(scores, AxisScores::default());
    }

    #[test]
    fn clamped_repairs_nan_and_overflow() {
        let broken = AxisScores {
            valence: 3.0,
            arousal: f64::NAN,
            social: -1.0,
            nostalgia: 0.2,
        };
        let fixed = broken.clamped();
        assert_eq!(fixed.valence, 1.0);
        assert_eq!(fixed.arousal, 0.5);
        assert_eq!(fixed.social, 0.0);
        assert_eq!(fixed.nostalgia, 0.2);
    }
}
