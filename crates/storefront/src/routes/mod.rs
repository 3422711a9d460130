//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured products, categories)
//!
//! # Catalog
//! GET  /products               - Product listing (?page, ?q, ?category, ?sort)
//! GET  /products/{id}          - Product detail + related products
//! GET  /categories             - Category listing
//! GET  /categories/{id}        - Category detail (?page)
//!
//! # Cart (session-backed)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add product, redirect back
//! POST /cart/update            - Set line quantity
//! POST /cart/remove            - Remove line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - JSON item count
//!
//! # Wishlist (session-backed)
//! GET  /wishlist               - Wishlist page
//! POST /wishlist/toggle        - Add or remove a product, redirect back
//!
//! # Checkout
//! GET  /checkout               - Order form + summary
//! POST /checkout               - Place order (rate limited)
//! GET  /checkout/complete      - Confirmation of the last order
//!
//! # Contact
//! GET  /contact                - Contact form
//! POST /contact                - Send message (rate limited)
//!
//! # Misc
//! GET  /lang/{code}            - Switch language, redirect back
//! GET  /sitemap.xml            - XML sitemap
//! GET  /robots.txt             - Robots rules
//! GET  /health, /health/ready  - Liveness and readiness
//! ```

pub mod cart;
pub mod categories;
pub mod checkout;
pub mod contact;
pub mod health;
pub mod home;
pub mod language;
pub mod products;
pub mod sitemap;
pub mod wishlist;

use axum::{
    Router,
    handler::Handler,
    http::{HeaderMap, StatusCode, header::REFERER},
    response::Redirect,
    routing::{get, post},
};
use url::Url;

use crate::backend::BackendError;
use crate::middleware::form_rate_limiter;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(checkout::show).post(checkout::submit.layer(form_rate_limiter())),
        )
        .route("/complete", get(checkout::complete))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        // Catalog
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/categories", get(categories::index))
        .route("/categories/{id}", get(categories::show))
        // Shopper state
        .nest("/cart", cart_routes())
        .route("/wishlist", get(wishlist::show))
        .route("/wishlist/toggle", post(wishlist::toggle))
        .nest("/checkout", checkout_routes())
        .route(
            "/contact",
            get(contact::show).post(contact::submit.layer(form_rate_limiter())),
        )
        // Misc
        .route("/lang/{code}", get(language::switch))
        .route("/sitemap.xml", get(sitemap::sitemap_xml))
        .route("/robots.txt", get(sitemap::robots_txt))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
}

/// A same-site path, or `None` for anything that could leave the site.
#[must_use]
pub fn safe_path(target: &str) -> Option<&str> {
    let target = target.trim();
    let is_local = target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !target.chars().any(char::is_control);
    is_local.then_some(target)
}

/// Status and message key for a form the backend failed to process.
///
/// Throttling gets its own message; anything else shows `failed_key`.
#[must_use]
pub const fn submit_failure(
    error: &BackendError,
    failed_key: &'static str,
) -> (StatusCode, &'static str) {
    match error {
        BackendError::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, "error.too_many_requests"),
        _ => (StatusCode::BAD_GATEWAY, failed_key),
    }
}

/// Redirect to `return_to`, else the referring page, else `fallback`.
///
/// Only the path and query of the referrer are kept, so the redirect never
/// leaves the storefront.
#[must_use]
pub fn redirect_back(headers: &HeaderMap, return_to: Option<&str>, fallback: &str) -> Redirect {
    let referer = headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Url::parse(v).ok())
        .map(|url| match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        });

    let target = return_to
        .and_then(safe_path)
        .map(String::from)
        .or_else(|| referer.as_deref().and_then(safe_path).map(String::from))
        .unwrap_or_else(|| fallback.to_string());

    Redirect::to(&target)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{HeaderValue, header::LOCATION};
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn test_submit_failure_status() {
        let throttled = BackendError::RateLimited(30);
        assert_eq!(
            submit_failure(&throttled, "checkout.failed"),
            (StatusCode::TOO_MANY_REQUESTS, "error.too_many_requests")
        );
        let down = BackendError::Status {
            status: 500,
            body: String::new(),
        };
        assert_eq!(
            submit_failure(&down, "contact.failed"),
            (StatusCode::BAD_GATEWAY, "contact.failed")
        );
    }

    fn location(redirect: Redirect) -> String {
        redirect.into_response().headers()[LOCATION]
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_safe_path() {
        assert_eq!(safe_path("/cart"), Some("/cart"));
        assert_eq!(safe_path("//evil.example"), None);
        assert_eq!(safe_path("https://evil.example/"), None);
        assert_eq!(safe_path("/\\evil.example"), None);
        assert_eq!(safe_path(""), None);
    }

    #[test]
    fn test_redirect_prefers_return_to() {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://shop.example/products/3"));
        assert_eq!(location(redirect_back(&headers, Some("/wishlist"), "/")), "/wishlist");
    }

    #[test]
    fn test_redirect_uses_referer_path_only() {
        let mut headers = HeaderMap::new();
        headers.insert(
            REFERER,
            HeaderValue::from_static("https://elsewhere.example/products?page=2"),
        );
        assert_eq!(
            location(redirect_back(&headers, Some("https://evil.example"), "/")),
            "/products?page=2"
        );
    }

    #[test]
    fn test_redirect_fallback() {
        assert_eq!(location(redirect_back(&HeaderMap::new(), None, "/cart")), "/cart");
    }
}
