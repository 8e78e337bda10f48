//! Numerus form selection.
//!
//! A TS catalog stores the plural variants of a message as an ordered list of
//! numerus forms. The order is fixed per language; these rules map a count to
//! the index of the form to display.

use serde::Serialize;

use crate::language::{
    normalize_language_code,
    primary_subtag,
};

/// Plural rule families, named after a representative language group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PluralRule {
    /// A single form (Japanese, Chinese, Korean, ...).
    One,
    /// `1` / everything else (English, German, ...).
    OneOther,
    /// `0, 1` / everything else (French, Brazilian Portuguese).
    French,
    /// `1, 21, 31...` / `2-4, 22-24...` / everything else (Russian, Ukrainian, ...).
    EastSlavic,
    /// `1` / `2-4, 22-24...` / everything else.
    Polish,
    /// `1` / `2-4` / everything else.
    CzechSlovak,
    Lithuanian,
    Latvian,
    Romanian,
    Slovenian,
    Irish,
    Arabic,
}

impl PluralRule {
    /// Returns the rule for a language code such as `ru`, `ru_RU` or `pt-BR`,
    /// or `None` when the language is unknown.
    #[must_use]
    pub fn for_language(code: &str) -> Option<Self> {
        let normalized = normalize_language_code(code);
        if normalized == "pt_br" {
            return Some(Self::French);
        }

        let rule = match primary_subtag(&normalized) {
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "tr" | "fa" | "ka" | "lo" | "km"
            | "my" | "jv" | "su" => Self::One,
            "en" | "de" | "nl" | "sv" | "da" | "nb" | "nn" | "no" | "fi" | "et" | "it" | "es"
            | "pt" | "el" | "hu" | "bg" | "ca" | "eu" | "gl" | "eo" | "he" | "hi" | "bn" | "ta"
            | "te" | "ml" | "kn" | "mr" | "gu" | "pa" | "ur" | "sq" | "af" | "az" | "kk" | "ky"
            | "mn" | "uz" | "is" | "fo" | "sw" | "zu" | "xh" | "fy" | "lb" => {
                Self::OneOther
            }
            "fr" | "oc" | "ln" | "ti" | "ak" | "fil" => Self::French,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => Self::EastSlavic,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::CzechSlovak,
            "lt" => Self::Lithuanian,
            "lv" => Self::Latvian,
            "ro" | "mo" => Self::Romanian,
            "sl" => Self::Slovenian,
            "ga" => Self::Irish,
            "ar" => Self::Arabic,
            _ => return None,
        };
        Some(rule)
    }

    /// Number of numerus forms a catalog of this language carries.
    #[must_use]
    pub const fn form_count(self) -> usize {
        match self {
            Self::One => 1,
            Self::OneOther | Self::French => 2,
            Self::EastSlavic
            | Self::Polish
            | Self::CzechSlovak
            | Self::Lithuanian
            | Self::Latvian
            | Self::Romanian
            | Self::Irish => 3,
            Self::Slovenian => 4,
            Self::Arabic => 6,
        }
    }

    /// Index of the numerus form to use for `n`. Negative counts select the
    /// same form as their absolute value.
    #[must_use]
    pub fn form_index(self, n: i64) -> usize {
        let n = n.unsigned_abs();
        let mod10 = n % 10;
        let mod100 = n % 100;
        let teen = (12..=14).contains(&mod100);

        match self {
            Self::One => 0,
            Self::OneOther => usize::from(n != 1),
            Self::French => usize::from(n >= 2),
            Self::EastSlavic => {
                if mod10 == 1 && mod100 != 11 {
                    0
                } else if (2..=4).contains(&mod10) && !teen {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&mod10) && !teen {
                    1
                } else {
                    2
                }
            }
            Self::CzechSlovak => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            Self::Lithuanian => {
                if mod10 == 1 && mod100 != 11 {
                    0
                } else if mod10 >= 2 && (mod100 < 10 || mod100 >= 20) {
                    1
                } else {
                    2
                }
            }
            Self::Latvian => {
                if mod10 == 1 && mod100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            Self::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=19).contains(&mod100) {
                    1
                } else {
                    2
                }
            }
            Self::Slovenian => match mod100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            Self::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Arabic => match n {
                0 => 0,
                1 => 1,
                2 => 2,
                _ if (3..=10).contains(&mod100) => 3,
                _ if mod100 >= 11 => 4,
                _ => 5,
            },
        }
    }
}
