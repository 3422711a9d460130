//! Bilingual UI strings.
//!
//! A flat key-value dictionary per locale. Lookups never fail: a missing key
//! renders as the key itself so an untranslated label is visible on the page
//! instead of blank.
//!
//! # Example
//!
//! ```rust
//! use bazaar_core::{Locale, Translator};
//!
//! let t = Translator::new(Locale::En);
//! assert_eq!(t.t("nav.cart"), "Cart");
//! assert_eq!(t.t("nav.unknown"), "nav.unknown");
//! ```

mod ar;
mod en;

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::types::{Locale, OrderStatus};

static EN: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| en::ENTRIES.iter().copied().collect());

static AR: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ar::ENTRIES.iter().copied().collect());

fn table(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    match locale {
        Locale::En => &EN,
        Locale::Ar => &AR,
    }
}

/// Look up `key`, returning the key itself when it has no translation.
#[must_use]
pub fn t(locale: Locale, key: &str) -> &str {
    table(locale).get(key).copied().unwrap_or(key)
}

/// Whether `key` has a translation in `locale`.
#[must_use]
pub fn has_key(locale: Locale, key: &str) -> bool {
    table(locale).contains_key(key)
}

/// All keys defined for `locale`.
pub fn keys(locale: Locale) -> impl Iterator<Item = &'static str> {
    table(locale).keys().copied()
}

/// Look up `key` and substitute `{name}` placeholders.
#[must_use]
pub fn format(locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
    args.iter()
        .fold(t(locale, key).to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{name}}}"), value)
        })
}

/// Locale-bound lookup handle handed to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Usage in templates: `{{ i18n.t("nav.home") }}`
    #[must_use]
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        t(self.locale, key)
    }

    /// Lookup with `{name}` substitution, see [`format`].
    #[must_use]
    pub fn f(&self, key: &str, args: &[(&str, &str)]) -> String {
        format(self.locale, key, args)
    }

    /// Label for an order status.
    #[must_use]
    pub fn status(&self, status: OrderStatus) -> &'static str {
        t(self.locale, status.i18n_key())
    }

    /// Value for `<html lang>`.
    #[must_use]
    pub const fn lang(&self) -> &'static str {
        self.locale.code()
    }

    /// Value for `<html dir>`.
    #[must_use]
    pub const fn dir(&self) -> &'static str {
        self.locale.dir()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_missing_key_returns_key() {
        assert_eq!(t(Locale::Ar, "does.not.exist"), "does.not.exist");
    }

    #[test]
    fn test_known_keys_translate() {
        assert_eq!(t(Locale::En, "nav.home"), "Home");
        assert_eq!(t(Locale::Ar, "nav.home"), "الرئيسية");
    }

    #[test]
    fn test_dictionaries_have_identical_key_sets() {
        let en: BTreeSet<_> = keys(Locale::En).collect();
        let ar: BTreeSet<_> = keys(Locale::Ar).collect();
        let missing_ar: Vec<_> = en.difference(&ar).collect();
        let missing_en: Vec<_> = ar.difference(&en).collect();
        assert!(missing_ar.is_empty(), "missing Arabic keys: {missing_ar:?}");
        assert!(missing_en.is_empty(), "missing English keys: {missing_en:?}");
    }

    #[test]
    fn test_no_duplicate_keys() {
        assert_eq!(EN.len(), en::ENTRIES.len());
        assert_eq!(AR.len(), ar::ENTRIES.len());
    }

    #[test]
    fn test_every_status_has_a_label() {
        for status in OrderStatus::all() {
            for locale in Locale::ALL {
                assert!(has_key(locale, status.i18n_key()), "{status} / {locale}");
            }
        }
    }

    #[test]
    fn test_format_substitutes_placeholders() {
        let text = format(
            Locale::En,
            "common.page_of",
            &[("current", "2"), ("last", "5")],
        );
        assert_eq!(text, "Page 2 of 5");
    }

    #[test]
    fn test_translator_direction() {
        let tr = Translator::new(Locale::Ar);
        assert_eq!(tr.dir(), "rtl");
        assert_eq!(tr.lang(), "ar");
        assert_eq!(tr.status(OrderStatus::Shipped), "تم الشحن");
    }
}
