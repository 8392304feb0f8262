//! Deterministic seed derivation.
//!
//! The seed string is the trimmed text (or `"empty"`) followed by each knob
//! formatted with two decimals, joined by `|`:
//!
//! ```text
//! rain on the window|0.00|0.80|1.00
//! ```
//!
//! Its SHA-256 digest is read as one big-endian integer and reduced modulo
//! `2^31 - 1`. Same text and same knobs (to two decimals) always give the
//! same seed on every platform.

use crate::input::{Knobs, RawMemoryInput};
use sha2::{Digest, Sha256};

/// Modulus applied to the digest.
pub const SEED_MODULUS: u64 = (1 << 31) - 1;

/// Text used in place of an empty or whitespace-only story.
pub const EMPTY_TEXT: &str = "empty";

/// Decimal places used when formatting knobs into the seed string.
pub const KNOB_PRECISION: usize = 2;

/// Build the exact string that gets hashed.
pub fn seed_text(text: &str, knobs: &Knobs) -> String {
    let story = text.trim();
    let story = if story.is_empty() { EMPTY_TEXT } else { story };
    format!(
        "{}|{:.p$}|{:.p$}|{:.p$}",
        story,
        knobs.motion(),
        knobs.smoke_density(),
        knobs.brightness(),
        p = KNOB_PRECISION
    )
}

/// Reduce a big-endian byte string modulo [`SEED_MODULUS`].
pub fn reduce_digest(digest: &[u8]) -> u32 {
    let reduced = digest
        .iter()
        .fold(0u64, |acc, &byte| ((acc << 8) | byte as u64) % SEED_MODULUS);
    reduced as u32
}

/// Seed for `text` under `knobs`.
pub fn seed_for(text: &str, knobs: &Knobs) -> u32 {
    let mut hasher = Sha256::new();
    hasher.update(seed_text(text, knobs).as_bytes());
    let digest = hasher.finalize();
    reduce_digest(&digest)
}

impl RawMemoryInput {
    /// Generate a deterministic seed from this input.
    /// Same input always produces the same art.
    pub fn to_seed(&self) -> u32 {
        seed_for(self.text(), &self.knobs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_text_layout() {
        let knobs = Knobs::new(0.25, 0.8, 1.0);
        assert_eq!(seed_text(" hello ", &knobs), "hello|0.25|0.80|1.00");
    }

    #[test]
    fn empty_text_hashes_as_literal_empty() {
        let knobs = Knobs::default();
        assert_eq!(seed_text("", &knobs), "empty|0.00|0.80|1.00");
        assert_eq!(seed_text("   \n\t", &knobs), "empty|0.00|0.80|1.00");
        assert_eq!(seed_for("", &knobs), seed_for("empty", &knobs));
    }

    #[test]
    fn reduction_matches_small_cases() {
        assert_eq!(reduce_digest(&[]), 0);
        assert_eq!(reduce_digest(&[0x01, 0x00]), 256);
        // 2^31 - 1 itself reduces to zero, 2^31 to one.
        assert_eq!(reduce_digest(&[0x7f, 0xff, 0xff, 0xff]), 0);
        assert_eq!(reduce_digest(&[0x80, 0x00, 0x00, 0x00]), 1);
    }

    #[test]
    fn seeds_stay_below_modulus() {
        for text in ["", "a", "rain", "Yesterday was my birthday."] {
            assert!((seed_for(text, &Knobs::default()) as u64) < SEED_MODULUS);
        }
    }

    #[test]
    fn knob_changes_below_precision_do_not_move_the_seed() {
        let a = seed_for("tea at dawn", &Knobs::new(0.5, 0.8, 1.0));
        let b = seed_for("tea at dawn", &Knobs::new(0.501, 0.8, 1.0));
        let c = seed_for("tea at dawn", &Knobs::new(0.55, 0.8, 1.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn surrounding_whitespace_does_not_matter() {
        let knobs = Knobs::default();
        assert_eq!(seed_for("  beach day ", &knobs), seed_for("beach day", &knobs));
    }
}
