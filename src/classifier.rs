//! Strength classifier - maps a candidate password to a `StrengthCategory`.

use secrecy::{ExposeSecret, SecretString};

/// Punctuation accepted as a "symbol" character class.
pub const SYMBOLS: &str = "!@#$%^&*()\\[]{}-_+=~`|:;\"'<>,./?";

const MODERATE_MIN_LENGTH: usize = 8;
const STRONG_MIN_LENGTH: usize = 10;
const VERY_STRONG_MIN_LENGTH: usize = 20;

const WEAK_PASSWORD_MESSAGE: &str = "Weak password is not accepted";

/// Ordered strength classification, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum StrengthCategory {
    #[default]
    None,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl StrengthCategory {
    /// Custom validity message the password input should carry for this category.
    ///
    /// Only `Weak` is rejected; `None` (empty input) is left to the field's own
    /// `required` handling.
    pub fn validity_message(self) -> Option<&'static str> {
        match self {
            StrengthCategory::Weak => Some(WEAK_PASSWORD_MESSAGE),
            _ => None,
        }
    }
}

/// Character classes present in a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CharClasses {
    upper: bool,
    lower: bool,
    digit: bool,
    symbol: bool,
}

impl CharClasses {
    fn scan(candidate: &str) -> Self {
        candidate.chars().fold(Self::default(), |mut acc, c| {
            acc.upper |= c.is_ascii_uppercase();
            acc.lower |= c.is_ascii_lowercase();
            acc.digit |= c.is_ascii_digit();
            acc.symbol |= SYMBOLS.contains(c);
            acc
        })
    }
}

/// Classifies a candidate password. Rules are checked most demanding first.
///
/// Length is measured in UTF-16 code units, the unit form inputs report, so a
/// character outside the Basic Multilingual Plane counts twice.
pub fn classify(candidate: &str) -> StrengthCategory {
    let len = candidate.encode_utf16().count();
    let classes = CharClasses::scan(candidate);

    let very_strong = len >= VERY_STRONG_MIN_LENGTH
        && classes.upper
        && classes.lower
        && classes.digit
        && classes.symbol;
    let strong = len >= STRONG_MIN_LENGTH
        && classes.lower
        && classes.digit
        && (classes.upper || classes.symbol);

    if very_strong {
        StrengthCategory::VeryStrong
    } else if strong {
        StrengthCategory::Strong
    } else if len >= MODERATE_MIN_LENGTH {
        StrengthCategory::Moderate
    } else if len > 0 {
        StrengthCategory::Weak
    } else {
        StrengthCategory::None
    }
}

/// Same as [`classify`], for values kept behind `secrecy`.
pub fn classify_secret(candidate: &SecretString) -> StrengthCategory {
    classify(candidate.expose_secret())
}
