//! Token catalog
//!
//! The fixed vocabulary of the criteria language: condition flags, language
//! flags (`speaks_<code>`), comparable fields and enumerated literals. Flag sets
//! are stored as bits, so a flag's position in its table is its bit index and
//! neither table may grow beyond 64 entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shared by every language flag identifier
pub const LANGUAGE_FLAG_PREFIX: &str = "speaks_";

/// Literal standing for "not sure / prefer not to answer"
pub const NOT_ANSWERED_LITERAL: &str = "na";

/// Condition flags, in bit order
pub const CONDITIONS: &[&str] = &[
    "autism_spectrum_disorder",
    "deaf",
    "hearing_impairment",
    "dyslexia",
    "multiple_birth",
];

/// Language codes, in bit order
pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("ase", "American Sign Language"),
    ("bn", "Bengali"),
    ("bg", "Bulgarian"),
    ("my", "Burmese"),
    ("yue", "Cantonese"),
    ("hr", "Croatian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("nl", "Dutch"),
    ("et", "Estonian"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("de", "German"),
    ("el", "Greek"),
    ("gu", "Gujarati"),
    ("ht", "Haitian Creole"),
    ("ha", "Hausa"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("is", "Icelandic"),
    ("ig", "Igbo"),
    ("id", "Indonesian"),
    ("ga", "Irish"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("kn", "Kannada"),
    ("km", "Khmer"),
    ("ko", "Korean"),
    ("lv", "Latvian"),
    ("lt", "Lithuanian"),
    ("ms", "Malay"),
    ("ml", "Malayalam"),
    ("zh", "Mandarin Chinese"),
    ("mr", "Marathi"),
    ("ne", "Nepali"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pa", "Punjabi"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sr", "Serbian"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("so", "Somali"),
    ("es", "Spanish"),
    ("sw", "Swahili"),
    ("sv", "Swedish"),
    ("tl", "Tagalog"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("cy", "Welsh"),
    ("yo", "Yoruba"),
    ("zu", "Zulu"),
];

/// Which flag set an identifier belongs to, with its bit index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagRef {
    Condition(u8),
    Language(u8),
}

/// Resolve a flag identifier such as `deaf` or `speaks_en`
pub fn lookup_flag(name: &str) -> Option<FlagRef> {
    if let Some(bit) = condition_bit(name) {
        return Some(FlagRef::Condition(bit));
    }
    name.strip_prefix(LANGUAGE_FLAG_PREFIX)
        .and_then(language_bit)
        .map(FlagRef::Language)
}

/// Bit index of a condition flag
pub fn condition_bit(name: &str) -> Option<u8> {
    CONDITIONS.iter().position(|c| *c == name).map(|i| i as u8)
}

/// Bit index of a language code (without the `speaks_` prefix)
pub fn language_bit(code: &str) -> Option<u8> {
    LANGUAGES.iter().position(|(c, _)| *c == code).map(|i| i as u8)
}

/// Every condition flag identifier
pub fn conditions() -> impl Iterator<Item = &'static str> {
    CONDITIONS.iter().copied()
}

/// Every language flag identifier, e.g. `speaks_en`
pub fn language_flags() -> impl Iterator<Item = String> {
    LANGUAGES
        .iter()
        .map(|(code, _)| format!("{LANGUAGE_FLAG_PREFIX}{code}"))
}

/// Every `(code, name)` language pair
pub fn languages() -> impl Iterator<Item = (&'static str, &'static str)> {
    LANGUAGES.iter().copied()
}

pub fn fields() -> impl Iterator<Item = Field> {
    Field::ALL.into_iter()
}

/// Fields that take a comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    AgeInDays,
    GestationalAgeInWeeks,
    Gender,
    NumLanguages,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::AgeInDays,
        Field::GestationalAgeInWeeks,
        Field::Gender,
        Field::NumLanguages,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::AgeInDays => "age_in_days",
            Self::GestationalAgeInWeeks => "gestational_age_in_weeks",
            Self::Gender => "gender",
            Self::NumLanguages => "num_languages",
        }
    }

    /// Whether only `=` may be used with this field
    pub const fn is_enumerated(&self) -> bool {
        matches!(self, Self::Gender)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A child's recorded gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[serde(alias = "m")]
    Male,
    #[serde(alias = "f")]
    Female,
    #[serde(alias = "o")]
    Other,
    #[default]
    #[serde(alias = "na")]
    NotAnswered,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Male, Gender::Female, Gender::Other, Gender::NotAnswered];

    /// Resolve an expression literal. Matching ignores case, so `OTHER`,
    /// `Other` and `other` all name the same category.
    pub fn from_literal(literal: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.literal().eq_ignore_ascii_case(literal))
    }

    /// Canonical literal used in expressions
    pub const fn literal(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::NotAnswered => NOT_ANSWERED_LITERAL,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}
