//! User-supplied memory text and the three numeric knobs.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Declared range, default and slider step of one knob.
#[derive(Debug, Clone)]
pub struct KnobSpec {
    pub name: &'static str,
    pub range: RangeInclusive<f64>,
    pub default: f64,
    pub step: f64,
}

impl KnobSpec {
    /// Clamp `value` into range. Non-finite values fall back to the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        value.clamp(*self.range.start(), *self.range.end())
    }
}

pub const MOTION: KnobSpec = KnobSpec {
    name: "motion",
    range: 0.0..=1.0,
    default: 0.0,
    step: 0.05,
};

pub const SMOKE_DENSITY: KnobSpec = KnobSpec {
    name: "smoke_density",
    range: 0.2..=1.2,
    default: 0.8,
    step: 0.05,
};

pub const BRIGHTNESS: KnobSpec = KnobSpec {
    name: "brightness",
    range: 0.2..=1.3,
    default: 1.0,
    step: 0.05,
};

/// Numeric controls, always within their declared ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "KnobsRecord")]
pub struct Knobs {
    motion: f64,
    smoke_density: f64,
    brightness: f64,
}

/// Knobs as they appear in a record, before clamping.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct KnobsRecord {
    motion: f64,
    smoke_density: f64,
    brightness: f64,
}

impl Default for KnobsRecord {
    fn default() -> Self {
        Self {
            motion: MOTION.default,
            smoke_density: SMOKE_DENSITY.default,
            brightness: BRIGHTNESS.default,
        }
    }
}

impl From<KnobsRecord> for Knobs {
    fn from(record: KnobsRecord) -> Self {
        Knobs::new(record.motion, record.smoke_density, record.brightness)
    }
}

impl Default for Knobs {
    fn default() -> Self {
        Self {
            motion: MOTION.default,
            smoke_density: SMOKE_DENSITY.default,
            brightness: BRIGHTNESS.default,
        }
    }
}

impl Knobs {
    /// Build knobs, clamping every value to its range.
    pub fn new(motion: f64, smoke_density: f64, brightness: f64) -> Self {
        let knobs = Self {
            motion: MOTION.clamp(motion),
            smoke_density: SMOKE_DENSITY.clamp(smoke_density),
            brightness: BRIGHTNESS.clamp(brightness),
        };
        if knobs.motion != motion
            || knobs.smoke_density != smoke_density
            || knobs.brightness != brightness
        {
            tracing::debug!(
                motion,
                smoke_density,
                brightness,
                "knob values clamped to {:?}",
                knobs
            );
        }
        knobs
    }

    pub fn motion(&self) -> f64 {
        self.motion
    }

    pub fn smoke_density(&self) -> f64 {
        self.smoke_density
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    /// Same knobs with `motion` replaced (and clamped).
    pub fn with_motion(self, motion: f64) -> Self {
        Self::new(motion, self.smoke_density, self.brightness)
    }
}

/// One generation request: the memory text plus knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMemoryInput {
    text: String,
    knobs: Knobs,
}

impl RawMemoryInput {
    pub fn new(text: impl Into<String>, knobs: Knobs) -> Self {
        Self {
            text: text.into(),
            knobs,
        }
    }

    /// Text with default knobs.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(text, Knobs::default())
    }

    /// The text exactly as supplied.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text with surrounding whitespace removed; this is the "story".
    pub fn story(&self) -> &str {
        self.text.trim()
    }

    pub fn knobs(&self) -> Knobs {
        self.knobs
    }
}
