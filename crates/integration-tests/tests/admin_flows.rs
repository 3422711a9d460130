//! End-to-end admin dashboard flows against the stub backend.
//!
//! Covers sign-in and its rejections, catalog management, order status
//! changes, customer search and what happens when the backend revokes the
//! admin's token mid-session.

#![allow(clippy::unwrap_used)]

use bazaar_integration_tests::{
    ADMIN_EMAIL, PASSWORD, SHOPPER_EMAIL, StubBackend, TestApp, location, signed_in_admin,
    spawn_admin,
};
use reqwest::StatusCode;

async fn dashboard() -> (StubBackend, TestApp) {
    let backend = StubBackend::start().await;
    let app = signed_in_admin(&backend).await;
    (backend, app)
}

fn product_form<'a>(name: &'a str, price: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", name),
        ("name_ar", ""),
        ("description", ""),
        ("description_ar", ""),
        ("price", price),
        ("sale_price", ""),
        ("stock", "12"),
        ("category_id", "1"),
        ("image", ""),
    ]
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_pages_require_sign_in() {
    let backend = StubBackend::start().await;
    let app = spawn_admin(&backend).await;

    for path in ["/", "/products", "/orders/1", "/customers"] {
        let response = app.get(path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), "/login", "{path}");
    }
    assert_eq!(app.get("/login").await.status(), StatusCode::OK);
    assert_eq!(app.get("/health").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_rejections() {
    let backend = StubBackend::start().await;
    let app = spawn_admin(&backend).await;

    let empty = app.post_form("/login", &[("email", ""), ("password", "")]).await;
    assert_eq!(empty.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let wrong = app
        .post_form("/login", &[("email", ADMIN_EMAIL), ("password", "nope")])
        .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    // The email is kept, the password is not
    let body = wrong.text().await.unwrap();
    assert!(body.contains(ADMIN_EMAIL));
    assert!(!body.contains("nope"));

    let shopper = app
        .post_form("/login", &[("email", SHOPPER_EMAIL), ("password", PASSWORD)])
        .await;
    assert_eq!(shopper.status(), StatusCode::FORBIDDEN);
    // The non-admin token is revoked right away
    assert_eq!(backend.data().await.revoked, vec!["shopper-token".to_string()]);

    assert_eq!(location(&app.get("/").await), "/login");
}

#[tokio::test]
async fn test_login_and_logout() {
    let (backend, app) = dashboard().await;

    let home = app.get("/").await;
    assert_eq!(home.status(), StatusCode::OK);
    assert!(home.text().await.unwrap().contains("Layla Admin"));

    // Signed-in admins skip the login page
    assert_eq!(location(&app.get("/login").await), "/");

    let logout = app.post_form("/logout", &[]).await;
    assert_eq!(location(&logout), "/login");
    assert!(backend.data().await.revoked.contains(&"admin-token".to_string()));
    assert_eq!(location(&app.get("/").await), "/login");
}

#[tokio::test]
async fn test_revoked_token_signs_admin_out() {
    let (backend, app) = dashboard().await;
    assert_eq!(app.get("/products").await.status(), StatusCode::OK);

    backend.expire_tokens().await;

    let response = app.get("/products").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    // The session no longer holds the admin, so the login page renders
    let login = app.get("/login").await;
    assert_eq!(login.status(), StatusCode::OK);
    assert!(
        login
            .text()
            .await
            .unwrap()
            .contains("انتهت الجلسة. يرجى تسجيل الدخول مجدداً.")
    );
    assert_eq!(location(&app.get("/").await), "/login");
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_product_create_update_delete() {
    let (backend, app) = dashboard().await;

    assert_eq!(app.get("/products/new").await.status(), StatusCode::OK);

    let created = app
        .post_form("/products", &product_form("Saffron", "120.50"))
        .await;
    assert_eq!(created.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&created), "/products");

    let id = {
        let data = backend.data().await;
        let saffron = data.products.iter().find(|p| p["name"] == "Saffron").unwrap();
        assert_eq!(saffron["price"], "120.50");
        assert_eq!(saffron["category_id"], 1);
        assert_eq!(saffron["is_featured"], false);
        saffron["id"].as_i64().unwrap()
    };

    let list = app.get("/products?q=saff").await.text().await.unwrap();
    assert!(list.contains("Saffron"));
    assert!(!list.contains("Arabic Coffee"));

    assert_eq!(
        app.get(&format!("/products/{id}/edit")).await.status(),
        StatusCode::OK
    );
    let mut form = product_form("Saffron Threads", "99");
    form.push(("is_featured", "on"));
    let updated = app.post_form(&format!("/products/{id}"), &form).await;
    assert_eq!(location(&updated), "/products");
    {
        let data = backend.data().await;
        let saffron = data.products.iter().find(|p| p["id"] == id).unwrap();
        assert_eq!(saffron["name"], "Saffron Threads");
        assert_eq!(saffron["is_featured"], true);
    }

    let deleted = app.post_form(&format!("/products/{id}/delete"), &[]).await;
    assert_eq!(location(&deleted), "/products");
    assert!(!backend.data().await.products.iter().any(|p| p["id"] == id));
}

#[tokio::test]
async fn test_product_form_validation() {
    let (backend, app) = dashboard().await;

    let local = app.post_form("/products", &product_form("", "-3")).await;
    assert_eq!(local.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(backend.data().await.products.len(), 3);

    let remote = app
        .post_form("/products", &product_form("Medjool Dates", "10"))
        .await;
    assert_eq!(remote.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        remote
            .text()
            .await
            .unwrap()
            .contains("The name has already been taken.")
    );
    assert_eq!(backend.data().await.products.len(), 3);
}

#[tokio::test]
async fn test_missing_product_edit_redirects() {
    let (_backend, app) = dashboard().await;
    let response = app.get("/products/999/edit").await;
    assert_eq!(location(&response), "/products");
}

#[tokio::test]
async fn test_category_create_and_delete() {
    let (backend, app) = dashboard().await;

    let created = app
        .post_form(
            "/categories",
            &[("name", "Spices"), ("name_ar", "بهارات"), ("description", ""), ("image", "")],
        )
        .await;
    assert_eq!(location(&created), "/categories");

    let id = backend
        .data()
        .await
        .categories
        .iter()
        .find(|c| c["name"] == "Spices")
        .and_then(|c| c["id"].as_i64())
        .unwrap();
    assert!(app.get("/categories").await.text().await.unwrap().contains("بهارات"));

    app.post_form(&format!("/categories/{id}/delete"), &[]).await;
    assert_eq!(backend.data().await.categories.len(), 2);
}

// =============================================================================
// Orders and Customers
// =============================================================================

#[tokio::test]
async fn test_orders_filter_by_status() {
    let (_backend, app) = dashboard().await;

    let all = app.get("/orders").await.text().await.unwrap();
    assert!(all.contains("BZ-1001") && all.contains("BZ-1002"));

    let pending = app.get("/orders?status=pending").await.text().await.unwrap();
    assert!(pending.contains("BZ-1001"));
    assert!(!pending.contains("BZ-1002"));

    let show = app.get("/orders/1").await;
    assert_eq!(show.status(), StatusCode::OK);
    assert!(show.text().await.unwrap().contains("King Fahd Rd 12"));
}

#[tokio::test]
async fn test_order_status_update() {
    let (backend, app) = dashboard().await;

    let response = app
        .post_form("/orders/1/status", &[("status", "shipped")])
        .await;
    assert_eq!(location(&response), "/orders/1");
    assert_eq!(backend.data().await.orders[0]["status"], "shipped");
}

#[tokio::test]
async fn test_rejected_status_change_is_flashed() {
    let (backend, app) = dashboard().await;

    let response = app
        .post_form("/orders/2/status", &[("status", "pending")])
        .await;
    assert_eq!(location(&response), "/orders/2");
    assert_eq!(backend.data().await.orders[1]["status"], "cancelled");

    let show = app.get("/orders/2").await.text().await.unwrap();
    assert!(show.contains("A cancelled order cannot be reopened."));
}

#[tokio::test]
async fn test_customer_search_reaches_backend() {
    let (backend, app) = dashboard().await;

    let list = app.get("/customers?q=Sara").await.text().await.unwrap();
    assert!(list.contains("Sara Ahmed"));
    assert!(!list.contains("Omar Ali"));
    assert_eq!(backend.data().await.customer_searches, vec!["sara".to_string()]);

    let show = app.get("/customers/1").await;
    assert_eq!(show.status(), StatusCode::OK);
    assert!(show.text().await.unwrap().contains("sara@example.sa"));
}
