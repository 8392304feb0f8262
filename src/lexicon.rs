//! Fixed word lists that drive scoring, scenario detection and fragment
//! extraction.
//!
//! All entries are lowercase. Lists are `&'static` slices so that lookup
//! order is stable; scoring only ever asks "is this word present", never
//! "where", so order matters only for the scenario priority table.

/// Lexicon feeding one side of an emotion axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lexicon {
    /// Pulls valence up.
    Positive,
    /// Pulls valence down.
    Negative,
    /// Pulls arousal up.
    HighEnergy,
    /// Pulls arousal down.
    LowEnergy,
    /// Company, crowds, family.
    Social,
    /// Looking back.
    Nostalgia,
}

impl Lexicon {
    pub const ALL: [Lexicon; 6] = [
        Lexicon::Positive,
        Lexicon::Negative,
        Lexicon::HighEnergy,
        Lexicon::LowEnergy,
        Lexicon::Social,
        Lexicon::Nostalgia,
    ];

    /// Trigger words for this lexicon.
    pub fn words(self) -> &'static [&'static str] {
        match self {
            Lexicon::Positive => POSITIVE,
            Lexicon::Negative => NEGATIVE,
            Lexicon::HighEnergy => HIGH_ENERGY,
            Lexicon::LowEnergy => LOW_ENERGY,
            Lexicon::Social => SOCIAL,
            Lexicon::Nostalgia => NOSTALGIA,
        }
    }
}

const POSITIVE: &[&str] = &[
    "joy",
    "happy",
    "happiness",
    "love",
    "laugh",
    "smile",
    "grateful",
    "peace",
    "calm",
    "celebrate",
    "birthday",
    "together",
    "hug",
    "success",
    "fun",
    "warm",
];

const NEGATIVE: &[&str] = &[
    "sad", "cry", "alone", "lonely", "fear", "anxious", "stress", "angry", "regret", "loss",
    "breakup", "hurt", "pain", "miss", "grief", "tired", "cold",
];

const HIGH_ENERGY: &[&str] = &[
    "party",
    "dance",
    "festival",
    "rush",
    "crowd",
    "concert",
    "goal",
    "celebration",
    "fireworks",
    "cheer",
    "scream",
    "running",
    "shouting",
];

const LOW_ENERGY: &[&str] = &[
    "quiet", "still", "slow", "breeze", "soft", "silent", "night", "dawn", "sunset", "walk",
    "reading", "tea", "coffee", "gentle", "serene",
];

const SOCIAL: &[&str] = &[
    "friends",
    "family",
    "together",
    "team",
    "crowd",
    "group",
    "party",
    "reunion",
    "gathering",
    "classmates",
    "colleagues",
    "kids",
    "children",
];

const NOSTALGIA: &[&str] = &[
    "yesterday",
    "childhood",
    "memories",
    "remember",
    "nostalgia",
    "nostalgic",
    "school",
    "college",
    "old",
    "album",
    "photo",
    "grandma",
    "grandfather",
    "past",
    "yesteryear",
];

// Scenario keywords are matched as plain substrings, so "sea" also fires
// on "season". That is the established behaviour and is kept.
pub(crate) const BIRTHDAY_KEYWORDS: &[&str] = &["birthday", "cake", "candles", "party"];
pub(crate) const BEACH_KEYWORDS: &[&str] = &["beach", "ocean", "sea", "waves", "shore", "sand"];
pub(crate) const RAIN_KEYWORDS: &[&str] = &["rain", "window", "umbrella", "drizzle", "storm"];
pub(crate) const TRAVEL_KEYWORDS: &[&str] = &[
    "travel", "journey", "road", "flight", "plane", "train", "bus", "drive", "airport", "station",
    "horizon",
];
pub(crate) const SCHOOL_KEYWORDS: &[&str] = &[
    "school",
    "classroom",
    "childhood",
    "kids",
    "children",
    "teacher",
    "college",
];
pub(crate) const LOSS_KEYWORDS: &[&str] = &[
    "loss",
    "lonely",
    "alone",
    "grief",
    "funeral",
    "miss",
    "heartbreak",
];
pub(crate) const NIGHT_KEYWORDS: &[&str] = &["night", "stars", "moon", "midnight"];

/// Words never used as floating fragments.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "of", "for", "to", "from", "is", "are", "was", "were", "be",
    "being", "been", "this", "that", "those", "these", "i", "me", "my", "we", "our", "you", "your",
    "he", "she", "they", "them", "his", "her", "their", "in", "on", "at", "by", "with", "without",
    "into", "out", "about", "over", "under", "after", "before", "again", "more", "most", "such",
    "very", "just", "not", "no", "yes", "it's", "its",
];

/// Fragments used when the text yields none of its own.
pub const FALLBACK_FRAGMENTS: &[&str] = &["memory", "moment", "echo", "warmth", "friends", "smile"];

/// Returns true if `word` (any case) is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
}
