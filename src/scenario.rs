//! Scenario tags and the symbolic motif chosen from them.
//!
//! Every tag is detected independently by keyword presence, so several
//! may be true at once (rain streaks over a birthday cake). The *primary*
//! scenario and the symbol are picked from fixed, ordered tables: the
//! first matching entry wins regardless of how many keywords matched.

use crate::lexicon;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete kind of memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioTag {
    Birthday,
    Beach,
    Rain,
    Travel,
    School,
    Loss,
    Night,
}

impl ScenarioTag {
    /// Priority order used to pick the primary scenario.
    pub const PRIORITY: [ScenarioTag; 7] = [
        ScenarioTag::Birthday,
        ScenarioTag::Beach,
        ScenarioTag::Rain,
        ScenarioTag::Travel,
        ScenarioTag::School,
        ScenarioTag::Loss,
        ScenarioTag::Night,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            ScenarioTag::Birthday => lexicon::BIRTHDAY_KEYWORDS,
            ScenarioTag::Beach => lexicon::BEACH_KEYWORDS,
            ScenarioTag::Rain => lexicon::RAIN_KEYWORDS,
            ScenarioTag::Travel => lexicon::TRAVEL_KEYWORDS,
            ScenarioTag::School => lexicon::SCHOOL_KEYWORDS,
            ScenarioTag::Loss => lexicon::LOSS_KEYWORDS,
            ScenarioTag::Night => lexicon::NIGHT_KEYWORDS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScenarioTag::Birthday => "birthday",
            ScenarioTag::Beach => "beach",
            ScenarioTag::Rain => "rain",
            ScenarioTag::Travel => "travel",
            ScenarioTag::School => "school",
            ScenarioTag::Loss => "loss",
            ScenarioTag::Night => "night",
        }
    }

    /// True if any keyword occurs as a substring of the lowercased text.
    pub fn matches(self, lowered: &str) -> bool {
        self.keywords().iter().any(|k| lowered.contains(k))
    }
}

impl fmt::Display for ScenarioTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which scenario tags are present. Serializes as an object of booleans
/// in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioTags {
    pub birthday: bool,
    pub beach: bool,
    pub rain: bool,
    pub travel: bool,
    pub school: bool,
    pub loss: bool,
    pub night: bool,
}

impl ScenarioTags {
    /// Detect every tag in `text`.
    pub fn detect(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let mut tags = Self::default();
        for tag in ScenarioTag::PRIORITY {
            tags.set(tag, tag.matches(&lowered));
        }
        tags
    }

    pub fn contains(&self, tag: ScenarioTag) -> bool {
        match tag {
            ScenarioTag::Birthday => self.birthday,
            ScenarioTag::Beach => self.beach,
            ScenarioTag::Rain => self.rain,
            ScenarioTag::Travel => self.travel,
            ScenarioTag::School => self.school,
            ScenarioTag::Loss => self.loss,
            ScenarioTag::Night => self.night,
        }
    }

    pub fn set(&mut self, tag: ScenarioTag, present: bool) {
        let slot = match tag {
            ScenarioTag::Birthday => &mut self.birthday,
            ScenarioTag::Beach => &mut self.beach,
            ScenarioTag::Rain => &mut self.rain,
            ScenarioTag::Travel => &mut self.travel,
            ScenarioTag::School => &mut self.school,
            ScenarioTag::Loss => &mut self.loss,
            ScenarioTag::Night => &mut self.night,
        };
        *slot = present;
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, tag: ScenarioTag) -> Self {
        self.set(tag, true);
        self
    }

    /// Present tags in priority order.
    pub fn iter(&self) -> impl Iterator<Item = ScenarioTag> + '_ {
        ScenarioTag::PRIORITY
            .into_iter()
            .filter(move |tag| self.contains(*tag))
    }

    /// First present tag in priority order.
    pub fn primary(&self) -> Option<ScenarioTag> {
        self.iter().next()
    }

    pub fn is_empty(&self) -> bool {
        self.primary().is_none()
    }
}

/// The motif drawn inside the glowing kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolId {
    Cake,
    Shell,
    Window,
    Horizon,
    Frame,
    Lamp,
    #[default]
    Core,
}

impl SymbolId {
    pub fn name(self) -> &'static str {
        match self {
            SymbolId::Cake => "cake",
            SymbolId::Shell => "shell",
            SymbolId::Window => "window",
            SymbolId::Horizon => "horizon",
            SymbolId::Frame => "frame",
            SymbolId::Lamp => "lamp",
            SymbolId::Core => "core",
        }
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered symbol rules; night has no motif and falls through to `Core`.
pub const SYMBOL_RULES: &[(ScenarioTag, SymbolId)] = &[
    (ScenarioTag::Birthday, SymbolId::Cake),
    (ScenarioTag::Beach, SymbolId::Shell),
    (ScenarioTag::Rain, SymbolId::Window),
    (ScenarioTag::Travel, SymbolId::Horizon),
    (ScenarioTag::School, SymbolId::Frame),
    (ScenarioTag::Loss, SymbolId::Lamp),
];

/// Pick the motif for a set of tags.
pub fn choose_symbol(tags: &ScenarioTags) -> SymbolId {
    SYMBOL_RULES
        .iter()
        .find(|(tag, _)| tags.contains(*tag))
        .map(|(_, symbol)| *symbol)
        .unwrap_or_default()
}

/// Output of the scenario classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tags: ScenarioTags,
    pub primary: Option<ScenarioTag>,
    pub symbol: SymbolId,
}

/// Classify memory text into tags, a primary scenario and a symbol.
pub fn classify(text: &str) -> Classification {
    let tags = ScenarioTags::detect(text);
    Classification {
        tags,
        primary: tags.primary(),
        symbol: choose_symbol(&tags),
    }
}
