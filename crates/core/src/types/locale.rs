//! UI locale.
//!
//! The shop is bilingual. Arabic is rendered right-to-left, English
//! left-to-right; everything else about a page is identical.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Locale`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct LocaleError(pub String);

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Ar,
}

impl Locale {
    /// All supported locales, in switcher order.
    pub const ALL: [Self; 2] = [Self::Ar, Self::En];

    /// ISO 639-1 language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Text direction for the `dir` attribute.
    #[must_use]
    pub const fn dir(self) -> &'static str {
        match self {
            Self::En => "ltr",
            Self::Ar => "rtl",
        }
    }

    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Ar)
    }

    /// The locale the language switcher offers.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }

    /// Name of the language in that language.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ar => "العربية",
        }
    }

    /// Pick the best supported locale from an `Accept-Language` header.
    ///
    /// Entries are ranked by their `q` weight (default 1.0); ties keep header
    /// order. Returns `None` when no entry names a supported language.
    #[must_use]
    pub fn negotiate(accept_language: &str) -> Option<Self> {
        let mut best: Option<(Self, f32)> = None;

        for entry in accept_language.split(',') {
            let mut parts = entry.split(';');
            let Some(tag) = parts.next().map(str::trim) else {
                continue;
            };
            let Ok(locale) = tag.parse::<Self>() else {
                continue;
            };

            let weight = parts
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            if weight <= 0.0 {
                continue;
            }

            match best {
                Some((_, w)) if w >= weight => {}
                _ => best = Some((locale, weight)),
            }
        }

        best.map(|(locale, _)| locale)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Accepts bare codes and region-qualified tags (`ar-SA`, `en_US`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            _ => Err(LocaleError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region_tags() {
        assert_eq!("ar-SA".parse::<Locale>().unwrap(), Locale::Ar);
        assert_eq!("en_US".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
        assert!("".parse::<Locale>().is_err());
    }

    #[test]
    fn test_direction() {
        assert_eq!(Locale::Ar.dir(), "rtl");
        assert_eq!(Locale::En.dir(), "ltr");
        assert_eq!(Locale::Ar.other(), Locale::En);
    }

    #[test]
    fn test_negotiate_prefers_highest_weight() {
        assert_eq!(
            Locale::negotiate("fr-FR,en;q=0.5,ar;q=0.8"),
            Some(Locale::Ar)
        );
        assert_eq!(Locale::negotiate("en-GB,ar;q=0.9"), Some(Locale::En));
    }

    #[test]
    fn test_negotiate_ties_keep_header_order() {
        assert_eq!(Locale::negotiate("ar,en"), Some(Locale::Ar));
    }

    #[test]
    fn test_negotiate_ignores_zero_weight_and_unknown() {
        assert_eq!(Locale::negotiate("de,fr;q=0.9"), None);
        assert_eq!(Locale::negotiate("ar;q=0,en;q=0.1"), Some(Locale::En));
    }
}
