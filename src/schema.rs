//! The visual schema: every parameter the renderer needs, in one value.
//!
//! A schema is assembled once per request and never changed afterwards.
//! Its JSON form is a flat record that any consumer can render from:
//!
//! ```json
//! {"seed":123,"palette":["#101114","#ffc979","#ff9da3"],"fragments":["cake"],
//!  "valence":0.245,"arousal":0.5,"social":0.622,"nostalgia":0.731,
//!  "motion":0.0,"smokeDensity":0.8,"brightness":1.0,"scene":"group",
//!  "symbol":"cake","scenario":"birthday","scenarioTags":{...},"story":"..."}
//! ```

use crate::error::Result;
use crate::features::AxisScores;
use crate::fragments;
use crate::input::{Knobs, BRIGHTNESS, MOTION, SMOKE_DENSITY};
use crate::palette::{self, Palette};
use crate::scenario::{Classification, ScenarioTag, ScenarioTags, SymbolId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places kept for axis scores in a schema.
pub const SCORE_DECIMALS: i32 = 3;

/// Social score above which the memory is drawn as a group.
pub const GROUP_SOCIAL_THRESHOLD: f64 = 0.45;

/// Composition of the silhouette layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    /// Several figures in a row.
    #[default]
    Group,
    /// One central figure.
    Portrait,
}

impl Scene {
    pub fn from_social(social: f64) -> Self {
        if social > GROUP_SOCIAL_THRESHOLD {
            Scene::Group
        } else {
            Scene::Portrait
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scene::Group => f.write_str("group"),
            Scene::Portrait => f.write_str("portrait"),
        }
    }
}

/// Immutable parameter record handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisualSchema {
    pub seed: u32,
    pub palette: Palette,
    pub fragments: Vec<String>,
    #[serde(flatten)]
    pub scores: AxisScores,
    pub motion: f64,
    pub smoke_density: f64,
    pub brightness: f64,
    pub scene: Scene,
    pub symbol: SymbolId,
    /// Primary scenario, if any tag matched.
    pub scenario: Option<ScenarioTag>,
    pub scenario_tags: ScenarioTags,
    pub story: String,
}

impl Default for VisualSchema {
    /// The schema of an input with no signal: neutral scores, default
    /// palette, fallback fragments, default knobs.
    fn default() -> Self {
        let knobs = Knobs::default();
        Self {
            seed: crate::seed::seed_for("", &knobs),
            palette: Palette::default(),
            fragments: fragments::fallback(),
            scores: AxisScores::default().rounded(SCORE_DECIMALS),
            motion: knobs.motion(),
            smoke_density: knobs.smoke_density(),
            brightness: knobs.brightness(),
            scene: Scene::from_social(AxisScores::default().social),
            symbol: SymbolId::Core,
            scenario: None,
            scenario_tags: ScenarioTags::default(),
            story: String::new(),
        }
    }
}

impl VisualSchema {
    /// Combine pipeline outputs into a schema.
    ///
    /// Palette and scene are decided on the unrounded scores; the stored
    /// scores are rounded to [`SCORE_DECIMALS`].
    pub fn assemble(
        scores: AxisScores,
        classification: Classification,
        seed: u32,
        fragments: Vec<String>,
        knobs: Knobs,
        story: &str,
    ) -> Self {
        let scores = scores.clamped();
        let palette = palette::select(&scores, &classification.tags);
        let fragments = if fragments.is_empty() {
            fragments::fallback()
        } else {
            fragments
        };

        Self {
            seed,
            palette,
            fragments,
            scores: scores.rounded(SCORE_DECIMALS),
            motion: knobs.motion(),
            smoke_density: knobs.smoke_density(),
            brightness: knobs.brightness(),
            scene: Scene::from_social(scores.social),
            symbol: classification.symbol,
            scenario: classification.primary,
            scenario_tags: classification.tags,
            story: story.to_string(),
        }
    }

    pub fn knobs(&self) -> Knobs {
        Knobs::new(self.motion, self.smoke_density, self.brightness)
    }

    /// True when the schema describes a still image.
    pub fn is_still(&self) -> bool {
        self.motion <= 0.0 || self.motion.is_nan()
    }

    /// Copy with every field forced into its valid domain: knobs clamped,
    /// scores clamped, empty fragments replaced by the fallback list.
    pub fn sanitized(&self) -> Self {
        let mut fixed = self.clone();
        fixed.motion = MOTION.clamp(self.motion);
        fixed.smoke_density = SMOKE_DENSITY.clamp(self.smoke_density);
        fixed.brightness = BRIGHTNESS.clamp(self.brightness);
        fixed.scores = self.scores.clamped();
        if fixed.fragments.is_empty() {
            tracing::warn!(seed = self.seed, "schema has no fragments, using fallback");
            fixed.fragments = fragments::fallback();
        }
        fixed
    }

    /// Compact JSON record.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON record leniently: missing fields take their neutral
    /// defaults and the result is [`sanitized`](Self::sanitized).
    pub fn from_json(json: &str) -> Result<Self> {
        let schema: VisualSchema = serde_json::from_str(json)?;
        Ok(schema.sanitized())
    }
}
