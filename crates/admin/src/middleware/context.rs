//! Per-request layout context for dashboard pages.

use axum::{
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};
use bazaar_core::{CurrencyCode, Locale, Price, Translator};
use rust_decimal::Decimal;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::{CurrentAdmin, Flash, keys};
use crate::state::AppState;

/// A flash message resolved to display text.
#[derive(Debug, Clone)]
pub struct FlashView {
    pub class: &'static str,
    pub text: String,
}

/// Everything the base layout needs.
///
/// Extracting it drains the flash queue. Protected handlers take
/// [`super::RequireAdminAuth`] first so an anonymous request is redirected
/// before its flashes are consumed.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub locale: Locale,
    pub i18n: Translator,
    pub currency: CurrencyCode,
    /// Display name of the signed-in admin, if any.
    pub admin_name: Option<String>,
    pub flashes: Vec<FlashView>,
    pub current_path: String,
    /// Top-level nav section the current path belongs to.
    pub section: &'static str,
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

    /// Add an error message to this render only, bypassing the session queue.
    pub fn push_error(&mut self, key_or_text: &str) {
        self.flashes.push(FlashView {
            class: crate::models::FlashKind::Error.css_class(),
            text: self.i18n.t(key_or_text).to_string(),
        });
    }

    /// Whether `section` is the active nav entry.
    #[must_use]
    pub fn is_section(&self, section: &str) -> bool {
        self.section == section
    }
}

/// Map a path to its nav section.
#[must_use]
pub fn section_of(path: &str) -> &'static str {
    let first = path.trim_start_matches('/').split(['/', '?']).next();
    match first {
        Some("products") => "products",
        Some("categories") => "categories",
        Some("orders") => "orders",
        Some("customers") => "customers",
        Some("login") => "login",
        _ => "dashboard",
    }
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let chosen: Option<Locale> = session.get(keys::LOCALE).await?;
        let locale = chosen
            .or_else(|| {
                parts
                    .headers
                    .get(ACCEPT_LANGUAGE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(Locale::negotiate)
            })
            .unwrap_or(state.config().default_locale);
        let i18n = Translator::new(locale);

        let admin: Option<CurrentAdmin> = session.get(keys::CURRENT_ADMIN).await?;
        let flashes = Flash::drain(&session)
            .await?
            .into_iter()
            .map(|flash| FlashView {
                class: flash.kind.css_class(),
                text: i18n.t(&flash.key).to_string(),
            })
            .collect();

        let current_path = parts
            .uri
            .path_and_query()
            .map_or_else(|| "/".to_string(), ToString::to_string);
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
            admin_name: admin.map(|a| a.name),
            flashes,
            section: section_of(parts.uri.path()),
            current_path,
            switch_locale_url,
            switch_locale_name: other.native_name(),
        })
    }
}
