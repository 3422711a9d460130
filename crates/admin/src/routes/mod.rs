//! HTTP route handlers for the admin dashboard.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! GET  /login                      - Sign-in form
//! POST /login                      - Sign in (rate limited, admin role only)
//! POST /logout                     - Sign out
//!
//! GET  /                           - Dashboard stats
//!
//! # Products
//! GET  /products                   - List (?q, ?sort, ?dir, ?page)
//! GET  /products/new               - Create form
//! POST /products                   - Create
//! GET  /products/{id}/edit         - Edit form
//! POST /products/{id}              - Update
//! POST /products/{id}/delete       - Delete
//!
//! # Categories
//! GET  /categories                 - List
//! GET  /categories/new             - Create form
//! POST /categories                 - Create
//! GET  /categories/{id}/edit       - Edit form
//! POST /categories/{id}            - Update
//! POST /categories/{id}/delete     - Delete
//!
//! # Orders
//! GET  /orders                     - List (?status, ?q, ?sort, ?dir, ?page)
//! GET  /orders/{id}                - Detail
//! POST /orders/{id}/status         - Change status
//!
//! # Customers
//! GET  /customers                  - List (?q, ?sort, ?dir, ?page)
//! GET  /customers/{id}             - Detail
//!
//! # Misc
//! GET  /lang/{code}                - Switch language, redirect back
//! GET  /health                     - Liveness
//! ```

pub mod auth;
pub mod categories;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod language;
pub mod orders;
pub mod products;

use axum::{
    Router,
    handler::Handler,
    http::StatusCode,
    routing::{get, post},
};

use crate::api::ApiError;
use crate::error::{AppError, Result};
use crate::forms::error_lines;
use crate::middleware::{PageContext, login_rate_limiter};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new))
        .route("/{id}", post(products::update))
        .route("/{id}/edit", get(products::edit))
        .route("/{id}/delete", post(products::delete))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route("/new", get(categories::new))
        .route("/{id}", post(categories::update))
        .route("/{id}/edit", get(categories::edit))
        .route("/{id}/delete", post(categories::delete))
}

/// Create all routes for the admin dashboard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(auth::login_page).post(auth::login.layer(login_rate_limiter())),
        )
        .route("/logout", post(auth::logout))
        .route("/", get(dashboard::dashboard))
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/status", post(orders::update_status))
        .route("/customers", get(customers::index))
        .route("/customers/{id}", get(customers::show))
        .route("/lang/{code}", get(language::switch))
        .route("/health", get(health::health))
}

/// Use a fetched list, or degrade to an empty one with an on-page error.
///
/// A rejected token still propagates so the session is signed out.
pub(crate) fn list_or_empty<T>(
    result: std::result::Result<Vec<T>, ApiError>,
    ctx: &mut PageContext,
    what: &'static str,
) -> Result<Vec<T>> {
    match result {
        Ok(items) => Ok(items),
        Err(ApiError::Unauthorized) => Err(AppError::Api(ApiError::Unauthorized)),
        Err(e) => {
            tracing::warn!(error = %e, what, "Failed to load list, showing empty");
            ctx.push_error("admin.error.load_failed");
            Ok(Vec::new())
        }
    }
}

/// Turn a failed save into on-page errors and the status to render with.
///
/// A rejected token still propagates so the session is signed out.
pub(crate) fn save_failed(error: ApiError, ctx: &mut PageContext) -> Result<StatusCode> {
    match error {
        ApiError::Unauthorized => Err(AppError::Api(ApiError::Unauthorized)),
        ApiError::Validation(errors) => {
            for line in error_lines(&errors, ctx.i18n) {
                ctx.push_error(&line);
            }
            Ok(StatusCode::UNPROCESSABLE_ENTITY)
        }
        ApiError::RateLimited(_) => {
            ctx.push_error("error.too_many_requests");
            Ok(StatusCode::TOO_MANY_REQUESTS)
        }
        ApiError::NotFound(_) => {
            ctx.push_error("admin.error.not_found");
            Ok(StatusCode::NOT_FOUND)
        }
        e => {
            tracing::error!(error = %e, "Failed to save");
            ctx.push_error("admin.error.save_failed");
            Ok(StatusCode::BAD_GATEWAY)
        }
    }
}

/// A same-site path, or `None` for anything that could leave the dashboard.
#[must_use]
pub fn safe_path(target: &str) -> Option<&str> {
    let target = target.trim();
    let is_local = target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !target.chars().any(char::is_control);
    is_local.then_some(target)
}

#[cfg(test)]
mod tests {
    use bazaar_core::Locale;

    use super::*;

    fn ctx() -> PageContext {
        let i18n = bazaar_core::Translator::new(Locale::En);
        PageContext {
            locale: Locale::En,
            i18n,
            currency: bazaar_core::CurrencyCode::SAR,
            admin_name: None,
            flashes: Vec::new(),
            current_path: "/products".into(),
            section: "products",
            switch_locale_url: "/lang/ar".into(),
            switch_locale_name: "العربية",
        }
    }

    #[test]
    fn test_list_or_empty_degrades() {
        let mut ctx = ctx();
        let items: Vec<i32> = list_or_empty(
            Err(ApiError::Status {
                status: 503,
                body: String::new(),
            }),
            &mut ctx,
            "products",
        )
        .unwrap_or_default();
        assert!(items.is_empty());
        assert_eq!(ctx.flashes.len(), 1);
        assert_eq!(
            ctx.flashes.first().map(|f| f.text.as_str()),
            Some("Could not load data from the store backend.")
        );
    }

    #[test]
    fn test_list_or_empty_propagates_unauthorized() {
        let mut ctx = ctx();
        let result: Result<Vec<i32>> = list_or_empty(Err(ApiError::Unauthorized), &mut ctx, "orders");
        assert!(matches!(result, Err(AppError::Api(ApiError::Unauthorized))));
        assert!(ctx.flashes.is_empty());
    }

    #[test]
    fn test_save_failed_shows_backend_messages() {
        let mut ctx = ctx();
        let mut errors = bazaar_core::ValidationErrors::default();
        errors.push("name", "The name has already been taken.");
        let status = save_failed(ApiError::Validation(errors), &mut ctx).unwrap_or(StatusCode::OK);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            ctx.flashes.first().map(|f| f.text.as_str()),
            Some("Name: The name has already been taken.")
        );
    }

    #[test]
    fn test_safe_path() {
        assert_eq!(safe_path("/orders?status=paid"), Some("/orders?status=paid"));
        assert_eq!(safe_path("//evil.example"), None);
        assert_eq!(safe_path("https://evil.example"), None);
    }
}
