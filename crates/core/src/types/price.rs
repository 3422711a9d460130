//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Locale;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (riyals, not halalas).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Price of `quantity` units, or `None` on overflow.
    #[must_use]
    pub fn times(self, quantity: u32) -> Option<Self> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// Sum of two prices in the same currency.
    ///
    /// Returns `None` when the currencies differ or the sum overflows.
    #[must_use]
    pub fn add(self, other: Self) -> Option<Self> {
        if self.currency_code != other.currency_code {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// Format for display with exactly two decimal places.
    ///
    /// `149.5 SAR` renders as `149.50 SAR` in English and `149.50 ر.س` in Arabic.
    #[must_use]
    pub fn display(&self, locale: Locale) -> String {
        let mut amount = self.amount.round_dp(2);
        amount.rescale(2);
        format!("{amount} {}", self.currency_code.symbol(locale))
    }
}

/// ISO 4217 currency codes the shop can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    SAR,
    AED,
    EGP,
    KWD,
    USD,
}

impl CurrencyCode {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::SAR => "SAR",
            Self::AED => "AED",
            Self::EGP => "EGP",
            Self::KWD => "KWD",
            Self::USD => "USD",
        }
    }

    /// Symbol shown after the amount.
    #[must_use]
    pub const fn symbol(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::SAR, Locale::Ar) => "ر.س",
            (Self::AED, Locale::Ar) => "د.إ",
            (Self::EGP, Locale::Ar) => "ج.م",
            (Self::KWD, Locale::Ar) => "د.ك",
            (Self::USD, _) => "$",
            (code, Locale::En) => code.code(),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SAR" => Ok(Self::SAR),
            "AED" => Ok(Self::AED),
            "EGP" => Ok(Self::EGP),
            "KWD" => Ok(Self::KWD),
            "USD" => Ok(Self::USD),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sar(amount: &str) -> Price {
        Price::new(amount.parse().unwrap(), CurrencyCode::SAR)
    }

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(sar("149.5").display(Locale::En), "149.50 SAR");
        assert_eq!(sar("10").display(Locale::Ar), "10.00 ر.س");
    }

    #[test]
    fn test_display_rounds() {
        assert_eq!(sar("9.999").display(Locale::En), "10.00 SAR");
    }

    #[test]
    fn test_usd_symbol_is_locale_independent() {
        let price = Price::new(Decimal::new(500, 2), CurrencyCode::USD);
        assert_eq!(price.display(Locale::Ar), "5.00 $");
    }

    #[test]
    fn test_times_and_add() {
        let line = sar("12.25").times(3).unwrap();
        assert_eq!(line.amount, "36.75".parse::<Decimal>().unwrap());
        let total = line.add(sar("1.25")).unwrap();
        assert_eq!(total.amount, Decimal::from(38));
    }

    #[test]
    fn test_add_rejects_mixed_currencies() {
        let usd = Price::new(Decimal::ONE, CurrencyCode::USD);
        assert!(sar("1").add(usd).is_none());
    }

    #[test]
    fn test_overflow_yields_none() {
        let max = Price::new(Decimal::MAX, CurrencyCode::SAR);
        assert!(max.times(2).is_none());
        assert!(max.add(max).is_none());
        assert_eq!(max.times(1), Some(max));
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("aed".parse::<CurrencyCode>().unwrap(), CurrencyCode::AED);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
