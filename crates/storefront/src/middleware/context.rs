//! Per-request page context: locale, cart badge counts and flash messages.

use axum::{
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};
use bazaar_core::{CurrencyCode, Locale, Price, Translator};
use rust_decimal::Decimal;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session::{self, keys};
use crate::models::{Cart, Flash, Wishlist};
use crate::state::AppState;

/// Pick the display locale: session choice, then `Accept-Language`, then the default.
#[must_use]
pub fn resolve_locale(
    session_locale: Option<Locale>,
    accept_language: Option<&str>,
    default: Locale,
) -> Locale {
    session_locale
        .or_else(|| accept_language.and_then(Locale::negotiate))
        .unwrap_or(default)
}

/// A flash message resolved to display text.
#[derive(Debug, Clone)]
pub struct FlashView {
    pub class: &'static str,
    pub text: String,
}

/// Everything the base layout needs.
///
/// Extracting it drains the flash queue, so only handlers that render a page
/// should take it. Handlers that redirect use [`ShopperLocale`].
#[derive(Debug, Clone)]
pub struct PageContext {
    pub locale: Locale,
    pub i18n: Translator,
    pub currency: CurrencyCode,
    pub cart_count: u32,
    pub wishlist: Wishlist,
    pub wishlist_count: usize,
    pub flashes: Vec<FlashView>,
    /// Path and query of the current request.
    pub current_path: String,
    /// Link that switches to the other language and comes back here.
    pub switch_locale_url: String,
    pub switch_locale_name: &'static str,
}

impl PageContext {
    /// Format an amount in the store currency for the current locale.
    #[must_use]
    pub fn price(&self, amount: Decimal) -> String {
        Price::new(amount, self.currency).display(self.locale)
    }

    /// Format a computed amount, or a dash when the arithmetic overflowed.
    #[must_use]
    pub fn price_or_dash(&self, amount: Option<Decimal>) -> String {
        amount.map_or_else(
            || {
                tracing::warn!("Price arithmetic overflowed");
                "-".to_string()
            },
            |amount| self.price(amount),
        )
    }
}

fn session_of(parts: &Parts) -> Result<Session, AppError> {
    parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or_else(|| AppError::Internal("session layer missing".to_string()))
}

async fn locale_of(parts: &Parts, session: &Session, default: Locale) -> Result<Locale, AppError> {
    let chosen: Option<Locale> = session::load(session, keys::LOCALE).await?;
    let accept = parts
        .headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    Ok(resolve_locale(chosen, accept, default))
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = session_of(parts)?;
        let locale = locale_of(parts, &session, state.config().default_locale).await?;
        let current_path = parts
            .uri
            .path_and_query()
            .map_or_else(|| "/".to_string(), ToString::to_string);
        Self::load(state, &session, locale, current_path).await
    }
}

impl PageContext {
    /// Build the context for a page at `current_path`, draining the flash queue.
    ///
    /// Form handlers call this only on the branches that render.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read.
    pub async fn load(
        state: &AppState,
        session: &Session,
        locale: Locale,
        current_path: String,
    ) -> Result<Self, AppError> {
        let i18n = Translator::new(locale);

        let cart: Cart = session::load(session, keys::CART).await?;
        let wishlist: Wishlist = session::load(session, keys::WISHLIST).await?;
        let flashes = Flash::drain(session)
            .await?
            .into_iter()
            .map(|flash| FlashView {
                class: flash.kind.css_class(),
                text: bazaar_core::i18n::t(locale, &flash.key).to_string(),
            })
            .collect();

        let other = locale.other();
        let switch_locale_url = format!(
            "/lang/{}?{}",
            other.code(),
            url::form_urlencoded::Serializer::new(String::new())
                .append_pair("return_to", &current_path)
                .finish()
        );

        Ok(Self {
            locale,
            i18n,
            currency: state.config().currency,
            cart_count: cart.item_count(),
            wishlist_count: wishlist.len(),
            wishlist,
            flashes,
            current_path,
            switch_locale_url,
            switch_locale_name: other.native_name(),
        })
    }
}

/// The shopper's locale, without touching the flash queue.
#[derive(Debug, Clone, Copy)]
pub struct ShopperLocale(pub Locale);

impl FromRequestParts<AppState> for ShopperLocale {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = session_of(parts)?;
        Ok(Self(locale_of(parts, &session, state.config().default_locale).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_choice_wins() {
        assert_eq!(
            resolve_locale(Some(Locale::En), Some("ar-SA"), Locale::Ar),
            Locale::En
        );
    }

    #[test]
    fn test_accept_language_beats_default() {
        assert_eq!(
            resolve_locale(None, Some("fr;q=0.9, en-US;q=0.8"), Locale::Ar),
            Locale::En
        );
    }

    #[test]
    fn test_default_when_nothing_matches() {
        assert_eq!(resolve_locale(None, Some("fr, de"), Locale::Ar), Locale::Ar);
        assert_eq!(resolve_locale(None, None, Locale::En), Locale::En);
    }
}
