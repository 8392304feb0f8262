//! Mood palettes and the ordered rule table that picks one.
//!
//! A palette is three colors: the background plate, then the two colors
//! everything else is blended between. Selection walks [`PALETTE_RULES`]
//! top to bottom and takes the first rule whose predicate holds, so the
//! table order is the tie-break.

use crate::features::AxisScores;
use crate::scenario::ScenarioTags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from `0xRRGGBB`.
    pub const fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Linear blend toward `other`; `t` is clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// A string that is not `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16)
                .map(Rgb::from_u32)
                .map_err(|_| err()),
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16)
                    .map(Rgb::from_u32)
                    .map_err(|_| err())
            }
            _ => Err(err()),
        }
    }
}

/// Background plus two blend colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", from = "Vec<String>")]
pub struct Palette {
    pub background: Rgb,
    pub primary: Rgb,
    pub secondary: Rgb,
}

impl Palette {
    pub const fn from_hex(background: u32, primary: u32, secondary: u32) -> Self {
        Self {
            background: Rgb::from_u32(background),
            primary: Rgb::from_u32(primary),
            secondary: Rgb::from_u32(secondary),
        }
    }

    pub fn colors(&self) -> [Rgb; 3] {
        [self.background, self.primary, self.secondary]
    }

    /// Parse three hex strings. Anything shorter than three valid colors
    /// yields [`DEFAULT_PALETTE`].
    pub fn from_hex_strings<S: AsRef<str>>(colors: &[S]) -> Self {
        let parsed: Vec<Rgb> = colors
            .iter()
            .filter_map(|c| c.as_ref().parse::<Rgb>().ok())
            .collect();
        match parsed.as_slice() {
            [background, primary, secondary, ..] => Self {
                background: *background,
                primary: *primary,
                secondary: *secondary,
            },
            _ => {
                tracing::warn!(
                    valid = parsed.len(),
                    "palette has fewer than three valid colors, using default"
                );
                DEFAULT_PALETTE
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        palette.colors().iter().map(|c| c.to_hex()).collect()
    }
}

impl From<Vec<String>> for Palette {
    fn from(colors: Vec<String>) -> Self {
        Palette::from_hex_strings(&colors)
    }
}

/// Neutral palette used when no other rule fires and as the repair value
/// for malformed records.
pub const DEFAULT_PALETTE: Palette = Palette::from_hex(0x0f1013, 0xE3DCD2, 0xC8D8C6);

/// Everything a palette rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct MoodContext {
    pub scores: AxisScores,
    pub tags: ScenarioTags,
}

/// One row of the palette decision table.
pub struct PaletteRule {
    pub name: &'static str,
    pub applies: fn(&MoodContext) -> bool,
    pub palette: Palette,
}

impl fmt::Debug for PaletteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaletteRule")
            .field("name", &self.name)
            .field("palette", &self.palette)
            .finish()
    }
}

/// Ordered palette table. The last rule always matches.
pub const PALETTE_RULES: &[PaletteRule] = &[
    PaletteRule {
        name: "rain",
        applies: |m| m.tags.rain,
        palette: Palette::from_hex(0x0f1116, 0x93A7BC, 0xD3D9E1),
    },
    PaletteRule {
        name: "bright_beach",
        applies: |m| m.tags.beach && m.scores.valence > 0.0,
        palette: Palette::from_hex(0x0e0f12, 0xF8D7B8, 0xBEE3F8),
    },
    PaletteRule {
        name: "remembered_loss",
        applies: |m| m.tags.loss && m.scores.nostalgia > 0.4,
        palette: Palette::from_hex(0x0e0f12, 0xBDA7D6, 0xAEB3C2),
    },
    PaletteRule {
        name: "joyful",
        applies: |m| m.scores.valence > 0.3 && m.scores.arousal > 0.5,
        palette: Palette::from_hex(0x101114, 0xFFC979, 0xFF9DA3),
    },
    PaletteRule {
        name: "fond",
        applies: |m| m.scores.valence > 0.3 && m.scores.nostalgia > 0.5,
        palette: Palette::from_hex(0x111216, 0xF8D7B8, 0xD9C6E6),
    },
    PaletteRule {
        name: "wistful",
        applies: |m| m.scores.valence < -0.3 && m.scores.nostalgia > 0.5,
        palette: Palette::from_hex(0x101116, 0xBDA7D6, 0xAEB3C2),
    },
    PaletteRule {
        name: "somber",
        applies: |m| m.scores.valence < -0.3,
        palette: Palette::from_hex(0x0f1014, 0x9AB0C2, 0x6C7A89),
    },
    PaletteRule {
        name: "neutral",
        applies: |_| true,
        palette: DEFAULT_PALETTE,
    },
];

/// First matching rule for the given mood.
pub fn select_rule(context: &MoodContext) -> &'static PaletteRule {
    PALETTE_RULES
        .iter()
        .find(|rule| (rule.applies)(context))
        .unwrap_or(&PALETTE_RULES[PALETTE_RULES.len() - 1])
}

/// Palette for the given scores and tags.
pub fn select(scores: &AxisScores, tags: &ScenarioTags) -> Palette {
    let context = MoodContext {
        scores: *scores,
        tags: *tags,
    };
    let rule = select_rule(&context);
    tracing::debug!(rule = rule.name, "selected palette");
    rule.palette
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioTag;

    fn scores(valence: f64, arousal: f64, nostalgia: f64) -> AxisScores {
        AxisScores {
            valence,
            arousal,
            social: 0.5,
            nostalgia,
        }
    }

    fn rule_name(s: AxisScores, tags: ScenarioTags) -> &'static str {
        select_rule(&MoodContext { scores: s, tags }).name
    }

    #[test]
    fn hex_parsing() {
        assert_eq!("#93A7BC".parse::<Rgb>(), Ok(Rgb::new(0x93, 0xa7, 0xbc)));
        assert_eq!("#fff".parse::<Rgb>(), Ok(Rgb::new(255, 255, 255)));
        assert!("93A7BC".parse::<Rgb>().is_err());
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#zzzzzz".parse::<Rgb>().is_err());
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(100, 50, 25));
        assert_eq!(a.lerp(b, 7.0), b);
    }

    #[test]
    fn rain_overrides_every_mood() {
        let tags = ScenarioTags::default().with(ScenarioTag::Rain).with(ScenarioTag::Beach);
        assert_eq!(rule_name(scores(0.9, 0.9, 0.9), tags), "rain");
        assert_eq!(rule_name(scores(-0.9, 0.1, 0.1), tags), "rain");
    }

    #[test]
    fn beach_needs_positive_valence() {
        let tags = ScenarioTags::default().with(ScenarioTag::Beach);
        assert_eq!(rule_name(scores(0.1, 0.5, 0.5), tags), "bright_beach");
        assert_eq!(rule_name(scores(0.0, 0.5, 0.5), tags), "neutral");
    }

    #[test]
    fn overlapping_rules_resolve_by_order() {
        // Both "joyful" and "fond" hold; joyful is listed first.
        let none = ScenarioTags::default();
        assert_eq!(rule_name(scores(0.5, 0.8, 0.8), none), "joyful");
        assert_eq!(rule_name(scores(0.5, 0.5, 0.8), none), "fond");
        // Both "wistful" and "somber" hold; wistful is listed first.
        assert_eq!(rule_name(scores(-0.5, 0.5, 0.8), none), "wistful");
        assert_eq!(rule_name(scores(-0.5, 0.5, 0.5), none), "somber");
    }

    #[test]
    fn loss_needs_some_nostalgia() {
        let tags = ScenarioTags::default().with(ScenarioTag::Loss);
        assert_eq!(rule_name(scores(-0.5, 0.5, 0.5), tags), "remembered_loss");
        assert_eq!(rule_name(scores(-0.5, 0.5, 0.3), tags), "somber");
    }

    #[test]
    fn thresholds_are_strict() {
        let none = ScenarioTags::default();
        assert_eq!(rule_name(scores(0.3, 0.9, 0.9), none), "neutral");
        assert_eq!(rule_name(scores(-0.3, 0.5, 0.9), none), "neutral");
    }

    #[test]
    fn last_rule_is_catch_all() {
        let last = PALETTE_RULES.last().unwrap();
        assert_eq!(last.palette, DEFAULT_PALETTE);
        let context = MoodContext {
            scores: AxisScores {
                valence: f64::NAN,
                arousal: f64::NAN,
                social: f64::NAN,
                nostalgia: f64::NAN,
            },
            tags: ScenarioTags::default(),
        };
        assert!((last.applies)(&context));
    }

    #[test]
    fn short_palettes_fall_back_to_default() {
        assert_eq!(Palette::from_hex_strings(&["#000000", "#ffffff"]), DEFAULT_PALETTE);
        assert_eq!(
            Palette::from_hex_strings(&["#000000", "nope", "#ffffff"]),
            DEFAULT_PALETTE
        );
        let ok = Palette::from_hex_strings(&["#000000", "#ffffff", "#ff0000"]);
        assert_eq!(ok.secondary, Rgb::new(255, 0, 0));
    }

    #[test]
    fn palette_serializes_as_hex_list() {
        let json = serde_json::to_string(&DEFAULT_PALETTE).unwrap();
        assert_eq!(json, r##"["#0f1013","#e3dcd2","#c8d8c6"]"##);
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DEFAULT_PALETTE);
    }
}
