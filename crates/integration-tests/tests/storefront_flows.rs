//! End-to-end storefront flows against the stub backend.
//!
//! Covers catalog browsing, the session cart and wishlist, checkout, the
//! contact form, language switching and the sitemap.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use bazaar_integration_tests::{
    StubBackend, TestApp, location, spawn_storefront, spawn_storefront_with,
};
use reqwest::StatusCode;
use serde_json::Value;

async fn storefront() -> (StubBackend, TestApp) {
    let backend = StubBackend::start().await;
    let app = spawn_storefront(&backend).await;
    (backend, app)
}

async fn cart_count(app: &TestApp) -> u64 {
    let body: Value = app.get("/cart/count").await.json().await.unwrap();
    body["count"].as_u64().unwrap()
}

fn checkout_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("customer_name", "Sara Ahmed"),
        ("customer_phone", "0551234567"),
        ("customer_email", "sara@example.sa"),
        ("shipping_address", "King Fahd Rd 12"),
        ("city", "Riyadh"),
        ("notes", ""),
    ]
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_catalog_pages_render() {
    let (_backend, app) = storefront().await;

    assert_eq!(app.get("/").await.status(), StatusCode::OK);
    assert_eq!(app.get("/categories").await.status(), StatusCode::OK);
    assert_eq!(app.get("/categories/1").await.status(), StatusCode::OK);

    let listing = app.get("/products?q=sukkari").await;
    assert_eq!(listing.status(), StatusCode::OK);
    let body = listing.text().await.unwrap();
    assert!(body.contains("/products/2"));
    assert!(!body.contains("/products/3\""));

    assert_eq!(app.get("/products/1").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_product_is_404() {
    let (_backend, app) = storefront().await;
    assert_eq!(app.get("/products/999").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/categories/999").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_checks() {
    let (_backend, app) = storefront().await;
    assert_eq!(app.get("/health").await.status(), StatusCode::OK);
    assert_eq!(app.get("/health/ready").await.status(), StatusCode::OK);
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_add_update_remove() {
    let (_backend, app) = storefront().await;
    assert_eq!(cart_count(&app).await, 0);

    let added = app
        .post_form("/cart/add", &[("product_id", "1"), ("quantity", "2")])
        .await;
    assert_eq!(added.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&added), "/cart");
    assert_eq!(cart_count(&app).await, 2);

    // Adding again merges into the same line
    app.post_form("/cart/add", &[("product_id", "1")]).await;
    assert_eq!(cart_count(&app).await, 3);

    app.post_form("/cart/update", &[("product_id", "1"), ("quantity", "5")])
        .await;
    assert_eq!(cart_count(&app).await, 5);

    let cart = app.get("/cart").await;
    assert_eq!(cart.status(), StatusCode::OK);
    assert!(cart.text().await.unwrap().contains("/products/1"));

    app.post_form("/cart/remove", &[("product_id", "1")]).await;
    assert_eq!(cart_count(&app).await, 0);
}

#[tokio::test]
async fn test_cart_add_respects_return_to() {
    let (_backend, app) = storefront().await;

    let response = app
        .post_form("/cart/add", &[("product_id", "2"), ("return_to", "/products/2")])
        .await;
    assert_eq!(location(&response), "/products/2");

    let response = app
        .post_form(
            "/cart/add",
            &[("product_id", "2"), ("return_to", "//evil.example.com")],
        )
        .await;
    assert_eq!(location(&response), "/cart");
}

#[tokio::test]
async fn test_out_of_stock_product_is_not_added() {
    let (_backend, app) = storefront().await;
    app.post_form("/cart/add", &[("product_id", "3")]).await;
    assert_eq!(cart_count(&app).await, 0);
}

#[tokio::test]
async fn test_cart_clear() {
    let (_backend, app) = storefront().await;
    app.post_form("/cart/add", &[("product_id", "1")]).await;
    app.post_form("/cart/add", &[("product_id", "2")]).await;
    assert_eq!(cart_count(&app).await, 2);

    app.post_form("/cart/clear", &[]).await;
    assert_eq!(cart_count(&app).await, 0);
}

#[tokio::test]
async fn test_cart_with_huge_price_still_renders() {
    let (backend, app) = storefront().await;
    // Decimal::MAX; doubling it overflows
    backend.data().await.products[0]["price"] = "79228162514264337593543950335".into();

    app.post_form("/cart/add", &[("product_id", "1"), ("quantity", "2")])
        .await;
    assert_eq!(cart_count(&app).await, 2);

    assert_eq!(app.get("/cart").await.status(), StatusCode::OK);
    assert_eq!(app.get("/checkout").await.status(), StatusCode::OK);
}

// =============================================================================
// Wishlist
// =============================================================================

#[tokio::test]
async fn test_wishlist_toggle_adds_and_removes() {
    let (_backend, app) = storefront().await;

    let saved = app.post_form("/wishlist/toggle", &[("product_id", "1")]).await;
    assert_eq!(saved.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&saved), "/wishlist");
    app.post_form("/wishlist/toggle", &[("product_id", "2")]).await;

    let page = app.get("/wishlist").await;
    assert_eq!(page.status(), StatusCode::OK);
    let body = page.text().await.unwrap();
    assert!(body.contains("تمت الإضافة إلى المفضلة."));
    assert!(body.contains("/products/1\""));
    assert!(body.contains("/products/2\""));

    app.post_form("/wishlist/toggle", &[("product_id", "2")]).await;
    let body = app.get("/wishlist").await.text().await.unwrap();
    assert!(body.contains("/products/1\""));
    assert!(!body.contains("/products/2\""));
}

#[tokio::test]
async fn test_wishlist_rejects_unknown_product() {
    let (_backend, app) = storefront().await;

    let response = app
        .post_form("/wishlist/toggle", &[("product_id", "999")])
        .await;
    assert_eq!(location(&response), "/wishlist");

    let body = app.get("/wishlist").await.text().await.unwrap();
    assert!(body.contains("هذا المنتج لم يعد متاحاً."));
    assert!(body.contains("قائمة المفضلة فارغة."));
}

#[tokio::test]
async fn test_wishlist_drops_deleted_products() {
    let backend = StubBackend::start().await;
    let app = spawn_storefront_with(&backend, |config| {
        config.cache_ttl = Duration::from_millis(1);
    })
    .await;

    app.post_form("/wishlist/toggle", &[("product_id", "1")]).await;
    app.post_form("/wishlist/toggle", &[("product_id", "2")]).await;

    backend.data().await.products.retain(|p| p["id"] != 2);
    tokio::time::sleep(Duration::from_millis(20)).await;

    let page = app.get("/wishlist").await;
    assert_eq!(page.status(), StatusCode::OK);
    let body = page.text().await.unwrap();
    assert!(body.contains("/products/1\""));
    assert!(!body.contains("/products/2\""));
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_places_order_and_empties_cart() {
    let (backend, app) = storefront().await;
    app.post_form("/cart/add", &[("product_id", "1"), ("quantity", "2")])
        .await;
    app.post_form("/cart/add", &[("product_id", "2")]).await;

    assert_eq!(app.get("/checkout").await.status(), StatusCode::OK);

    let placed = app.post_form("/checkout", &checkout_form()).await;
    assert_eq!(placed.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&placed), "/checkout/complete");
    assert_eq!(cart_count(&app).await, 0);

    let complete = app.get("/checkout/complete").await;
    assert_eq!(complete.status(), StatusCode::OK);
    assert!(complete.text().await.unwrap().contains("BZ-1101"));

    let data = backend.data().await;
    let order = data.orders.last().unwrap();
    assert_eq!(order["customer_name"], "Sara Ahmed");
    assert_eq!(order["locale"], "ar");
    assert_eq!(order["notes"], Value::Null);
    assert_eq!(order["items"].as_array().unwrap().len(), 2);
    // 2 x 45.00 + 1 x 25.00 (sale price)
    assert_eq!(order["total"], "115.00");
}

#[tokio::test]
async fn test_checkout_with_empty_cart_goes_back_to_cart() {
    let (backend, app) = storefront().await;

    let show = app.get("/checkout").await;
    assert_eq!(location(&show), "/cart");

    let submit = app.post_form("/checkout", &checkout_form()).await;
    assert_eq!(location(&submit), "/cart");
    assert_eq!(backend.data().await.orders.len(), 2);
}

#[tokio::test]
async fn test_checkout_missing_fields_rerenders_form() {
    let (backend, app) = storefront().await;
    app.post_form("/cart/add", &[("product_id", "1")]).await;

    let response = app
        .post_form("/checkout", &[("customer_name", "Sara"), ("customer_phone", "12")])
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    // The entered name is kept
    assert!(response.text().await.unwrap().contains("value=\"Sara\""));

    assert_eq!(backend.data().await.orders.len(), 2);
    assert_eq!(cart_count(&app).await, 1);
}

#[tokio::test]
async fn test_checkout_backend_rejection_keeps_cart() {
    let (backend, app) = storefront().await;
    app.post_form("/cart/add", &[("product_id", "2"), ("quantity", "2")])
        .await;
    // Stock drops after the item went into the cart
    backend.data().await.products[1]["stock"] = 1.into();

    let response = app.post_form("/checkout", &checkout_form()).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Some items are no longer available.")
    );
    assert_eq!(cart_count(&app).await, 2);
}

#[tokio::test]
async fn test_checkout_success_keeps_earlier_flashes() {
    let (_backend, app) = storefront().await;
    // Queues a success flash without rendering a page
    app.post_form("/cart/add", &[("product_id", "1")]).await;

    let placed = app.post_form("/checkout", &checkout_form()).await;
    assert_eq!(location(&placed), "/checkout/complete");

    let body = app.get("/checkout/complete").await.text().await.unwrap();
    assert!(body.contains("تمت الإضافة إلى سلتك."));
}

#[tokio::test]
async fn test_checkout_backend_outage_shows_generic_error() {
    let (backend, app) = storefront().await;
    app.post_form("/cart/add", &[("product_id", "1")]).await;
    backend.data().await.failing_writes = true;

    let response = app.post_form("/checkout", &checkout_form()).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response.text().await.unwrap();
    assert!(body.contains("تعذر إرسال طلبك. يرجى المحاولة مرة أخرى."));
    // The entered details are kept
    assert!(body.contains("King Fahd Rd 12"));

    assert_eq!(backend.data().await.orders.len(), 2);
    assert_eq!(cart_count(&app).await, 1);
}

// =============================================================================
// Contact
// =============================================================================

#[tokio::test]
async fn test_contact_message_is_sent() {
    let (backend, app) = storefront().await;

    let response = app
        .post_form(
            "/contact",
            &[
                ("name", "Sara"),
                ("email", "sara@example.sa"),
                ("message", "Do you ship to Jeddah?"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/contact");

    let data = backend.data().await;
    assert_eq!(data.contacts.len(), 1);
    assert_eq!(data.contacts[0]["email"], "sara@example.sa");
}

#[tokio::test]
async fn test_contact_backend_validation_is_shown() {
    let (backend, app) = storefront().await;

    let response = app
        .post_form(
            "/contact",
            &[
                ("name", "Bot"),
                ("email", "bot@example.com"),
                ("message", "Cheap SPAM here"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("The message looks like spam.")
    );
    assert!(backend.data().await.contacts.is_empty());
}

#[tokio::test]
async fn test_contact_backend_outage_shows_generic_error() {
    let (backend, app) = storefront().await;
    backend.data().await.failing_writes = true;

    let response = app
        .post_form(
            "/contact",
            &[
                ("name", "Sara"),
                ("email", "sara@example.sa"),
                ("message", "Do you ship to Jeddah?"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response.text().await.unwrap();
    assert!(body.contains("حدث خطأ ما. يرجى المحاولة لاحقاً."));
    assert!(body.contains("Do you ship to Jeddah?"));
    assert!(backend.data().await.contacts.is_empty());
}

#[tokio::test]
async fn test_contact_success_keeps_earlier_flashes() {
    let (_backend, app) = storefront().await;
    // Queues an error flash without rendering a page
    app.post_form("/cart/add", &[("product_id", "3")]).await;

    let sent = app
        .post_form(
            "/contact",
            &[
                ("name", "Sara"),
                ("email", "sara@example.sa"),
                ("message", "Do you ship to Jeddah?"),
            ],
        )
        .await;
    assert_eq!(location(&sent), "/contact");

    let body = app.get("/contact").await.text().await.unwrap();
    assert!(body.contains("عذراً، هذا المنتج غير متوفر حالياً."));
    assert!(body.contains("شكراً! تم إرسال رسالتك."));
}

#[tokio::test]
async fn test_contact_local_validation_skips_backend() {
    let (backend, app) = storefront().await;

    let response = app
        .post_form("/contact", &[("name", ""), ("email", "not-an-email")])
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(backend.data().await.contacts.is_empty());
}

// =============================================================================
// Language and SEO
// =============================================================================

#[tokio::test]
async fn test_language_switch_persists_in_session() {
    let (_backend, app) = storefront().await;

    let home = app.get("/").await.text().await.unwrap();
    assert!(home.contains("lang=\"ar\" dir=\"rtl\""));

    let switched = app.get("/lang/en?return_to=/products").await;
    assert_eq!(location(&switched), "/products");

    let home = app.get("/").await.text().await.unwrap();
    assert!(home.contains("lang=\"en\" dir=\"ltr\""));
}

#[tokio::test]
async fn test_sitemap_lists_catalog() {
    let (_backend, app) = storefront().await;

    let response = app.get("/sitemap.xml").await;
    assert_eq!(response.status(), StatusCode::OK);
    let xml = response.text().await.unwrap();
    assert!(xml.contains(&format!("<loc>{}/products/1</loc>", app.base_url)));
    assert!(xml.contains(&format!("<loc>{}/categories/2</loc>", app.base_url)));

    let robots = app.get("/robots.txt").await.text().await.unwrap();
    assert!(robots.contains("sitemap.xml"));
}
