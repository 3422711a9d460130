//! Integration tests for Bazaar.
//!
//! Both apps run in-process against [`StubBackend`], an in-memory stand-in for
//! the REST backend that speaks the same JSON envelopes. Every test starts its
//! own backend and app so sessions and rate limits never leak between tests.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_flows` - Catalog, cart, checkout and contact
//! - `admin_flows` - Sign-in, catalog management, orders and session expiry

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bazaar_storefront::config::StorefrontConfig;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, MutexGuard};

pub const ADMIN_EMAIL: &str = "admin@bazaar.test";
pub const SHOPPER_EMAIL: &str = "shopper@bazaar.test";
pub const PASSWORD: &str = "correct horse battery";

const ADMIN_TOKEN: &str = "admin-token";
const SHOPPER_TOKEN: &str = "shopper-token";

// =============================================================================
// Stub Backend
// =============================================================================

/// Everything the stub backend knows, open for assertions.
#[derive(Debug)]
pub struct BackendData {
    pub categories: Vec<Value>,
    pub products: Vec<Value>,
    pub orders: Vec<Value>,
    pub customers: Vec<Value>,
    /// Accepted contact messages
    pub contacts: Vec<Value>,
    /// Tokens revoked through `POST /logout` or [`StubBackend::expire_tokens`]
    pub revoked: Vec<String>,
    /// `search` values seen by `GET /admin/customers`
    pub customer_searches: Vec<String>,
    /// When set, `POST /orders` and `POST /contact` answer 500
    pub failing_writes: bool,
    next_id: i64,
}

impl BackendData {
    fn seeded() -> Self {
        let dates = json!({"id": 1, "name": "Dates", "name_ar": "تمور", "products_count": 2});
        let coffee = json!({"id": 2, "name": "Coffee", "name_ar": "قهوة", "products_count": 1});
        Self {
            products: vec![
                json!({
                    "id": 1, "name": "Medjool Dates", "name_ar": "تمر مجدول",
                    "description": "Soft and rich.", "price": "45.00", "stock": 10,
                    "category_id": 1, "category": dates, "image": "products/medjool.jpg",
                    "is_featured": true, "updated_at": "2026-10-01T08:00:00Z"
                }),
                json!({
                    "id": 2, "name": "Sukkari Dates", "name_ar": "تمر سكري",
                    "price": "30.00", "sale_price": "25.00", "stock": 3,
                    "category_id": 1, "category": dates, "is_featured": false
                }),
                json!({
                    "id": 3, "name": "Arabic Coffee", "name_ar": "قهوة عربية",
                    "price": "60.00", "stock": 0, "category_id": 2, "category": coffee,
                    "is_featured": "1"
                }),
            ],
            categories: vec![dates, coffee],
            orders: vec![
                json!({
                    "id": 1, "order_number": "BZ-1001", "status": "pending",
                    "customer_name": "Sara Ahmed", "customer_email": "sara@example.sa",
                    "customer_phone": "+966 50 123 4567", "shipping_address": "King Fahd Rd 12",
                    "city": "Riyadh", "total": "90.00",
                    "items": [{"product_id": 1, "product_name": "Medjool Dates", "quantity": 2, "price": "45.00"}],
                    "created_at": "2026-10-01T10:00:00Z"
                }),
                json!({
                    "id": 2, "order_number": "BZ-1002", "status": "cancelled",
                    "customer_name": "Omar Ali", "customer_phone": "0551234567",
                    "total": "25.00",
                    "items": [{"product_id": 2, "product_name": "Sukkari Dates", "quantity": 1, "price": "25.00"}],
                    "created_at": "2026-10-02T10:00:00Z"
                }),
            ],
            customers: vec![
                json!({
                    "id": 1, "name": "Sara Ahmed", "email": "sara@example.sa",
                    "phone": "+966 50 123 4567", "orders_count": 1, "total_spent": "90.00",
                    "created_at": "2026-09-01T10:00:00Z"
                }),
                json!({
                    "id": 2, "name": "Omar Ali", "email": "omar@example.sa",
                    "orders_count": 1, "total_spent": "0.00"
                }),
            ],
            contacts: Vec::new(),
            revoked: Vec::new(),
            customer_searches: Vec::new(),
            failing_writes: false,
            next_id: 100,
        }
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn collection(&mut self, kind: Resource) -> &mut Vec<Value> {
        match kind {
            Resource::Products => &mut self.products,
            Resource::Categories => &mut self.categories,
        }
    }

    /// The admin token is the only one admin endpoints accept, until revoked.
    fn authorize(&self, headers: &HeaderMap) -> Option<Response> {
        let revoked = self.revoked.iter().any(|t| t == ADMIN_TOKEN);
        if bearer(headers).as_deref() == Some(ADMIN_TOKEN) && !revoked {
            return None;
        }
        Some(
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Unauthenticated."})),
            )
                .into_response(),
        )
    }
}

/// In-memory REST backend listening on an ephemeral port.
#[derive(Clone)]
pub struct StubBackend {
    /// API base URL, e.g. `http://127.0.0.1:40123/api`
    pub api_url: String,
    data: Arc<Mutex<BackendData>>,
}

impl StubBackend {
    /// Start a backend seeded with two categories, three products, two orders
    /// and two customers.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let data = Arc::new(Mutex::new(BackendData::seeded()));
        let router = stub_routes().with_state(Arc::clone(&data));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener.local_addr().expect("Stub backend has no address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            api_url: format!("http://{addr}/api"),
            data,
        }
    }

    /// Lock the backend state for inspection.
    pub async fn data(&self) -> MutexGuard<'_, BackendData> {
        self.data.lock().await
    }

    /// Make the backend reject the admin token from now on.
    pub async fn expire_tokens(&self) {
        self.data.lock().await.revoked.push(ADMIN_TOKEN.to_string());
    }
}

type Shared = Arc<Mutex<BackendData>>;

#[derive(Debug, Clone, Copy)]
enum Resource {
    Products,
    Categories,
}

fn stub_routes() -> Router<Shared> {
    Router::new()
        // Public catalog
        .route("/api/categories", get(categories))
        .route("/api/categories/{id}", get(category))
        .route("/api/categories/{id}/products", get(category_products))
        .route("/api/products", get(products))
        .route("/api/products/{id}", get(product))
        .route("/api/orders", post(place_order))
        .route("/api/contact", post(contact))
        // Auth
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        // Admin catalog
        .route(
            "/api/admin/products",
            get(|s: State<Shared>, h: HeaderMap| admin_list(s, h, Resource::Products))
                .post(|s: State<Shared>, h: HeaderMap, b: Json<Value>| {
                    admin_create(s, h, b, Resource::Products)
                }),
        )
        .route(
            "/api/admin/products/{id}",
            get(|s: State<Shared>, h: HeaderMap, p: Path<i64>| {
                admin_show(s, h, p, Resource::Products)
            })
            .post(|s: State<Shared>, h: HeaderMap, p: Path<i64>, b: Json<Value>| {
                admin_update(s, h, p, b, Resource::Products)
            })
            .delete(|s: State<Shared>, h: HeaderMap, p: Path<i64>| {
                admin_delete(s, h, p, Resource::Products)
            }),
        )
        .route(
            "/api/admin/categories",
            get(|s: State<Shared>, h: HeaderMap| admin_list(s, h, Resource::Categories))
                .post(|s: State<Shared>, h: HeaderMap, b: Json<Value>| {
                    admin_create(s, h, b, Resource::Categories)
                }),
        )
        .route(
            "/api/admin/categories/{id}",
            get(|s: State<Shared>, h: HeaderMap, p: Path<i64>| {
                admin_show(s, h, p, Resource::Categories)
            })
            .post(|s: State<Shared>, h: HeaderMap, p: Path<i64>, b: Json<Value>| {
                admin_update(s, h, p, b, Resource::Categories)
            })
            .delete(|s: State<Shared>, h: HeaderMap, p: Path<i64>| {
                admin_delete(s, h, p, Resource::Categories)
            }),
        )
        // Admin orders and customers
        .route("/api/admin/orders", get(admin_orders))
        .route(
            "/api/admin/orders/{id}",
            get(admin_order).patch(admin_update_order),
        )
        .route("/api/admin/customers", get(admin_customers))
        .route("/api/admin/customers/{id}", get(admin_customer))
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}

fn list(items: Vec<Value>) -> Response {
    Json(json!({ "data": items })).into_response()
}

fn one(status: StatusCode, item: Value) -> Response {
    (status, Json(json!({ "data": item }))).into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "No query results for model."})),
    )
        .into_response()
}

fn invalid(field: &str, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "message": message, "errors": { field: [message] } })),
    )
        .into_response()
}

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "Server Error"})),
    )
        .into_response()
}

fn find(items: &[Value], id: i64) -> Option<&Value> {
    items.iter().find(|item| item["id"] == id)
}

fn money(value: &Value) -> f64 {
    value.as_str().and_then(|s| s.parse().ok()).unwrap_or(0.0)
}

// -----------------------------------------------------------------------------
// Public catalog
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ProductParams {
    search: Option<String>,
    category_id: Option<i64>,
    featured: Option<String>,
}

async fn categories(State(data): State<Shared>) -> Response {
    list(data.lock().await.categories.clone())
}

async fn category(State(data): State<Shared>, Path(id): Path<i64>) -> Response {
    let data = data.lock().await;
    find(&data.categories, id).map_or_else(not_found, |c| one(StatusCode::OK, c.clone()))
}

async fn category_products(State(data): State<Shared>, Path(id): Path<i64>) -> Response {
    let data = data.lock().await;
    if find(&data.categories, id).is_none() {
        return not_found();
    }
    list(
        data.products
            .iter()
            .filter(|p| p["category_id"] == id)
            .cloned()
            .collect(),
    )
}

async fn products(State(data): State<Shared>, Query(params): Query<ProductParams>) -> Response {
    let data = data.lock().await;
    let needle = params.search.map(|s| s.to_lowercase());
    list(
        data.products
            .iter()
            .filter(|p| params.category_id.is_none_or(|id| p["category_id"] == id))
            .filter(|p| params.featured.is_none() || p["is_featured"] == true || p["is_featured"] == "1")
            .filter(|p| {
                needle.as_deref().is_none_or(|needle| {
                    p["name"]
                        .as_str()
                        .is_some_and(|name| name.to_lowercase().contains(needle))
                })
            })
            .cloned()
            .collect(),
    )
}

async fn product(State(data): State<Shared>, Path(id): Path<i64>) -> Response {
    let data = data.lock().await;
    find(&data.products, id).map_or_else(not_found, |p| one(StatusCode::OK, p.clone()))
}

/// Prices the order from current product data and rejects lines over stock.
async fn place_order(State(data): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut data = data.lock().await;
    if data.failing_writes {
        return server_error();
    }
    let mut items = Vec::new();
    let mut total = 0.0;

    for line in body["items"].as_array().into_iter().flatten() {
        let id = line["product_id"].as_i64().unwrap_or_default();
        let quantity = line["quantity"].as_i64().unwrap_or_default();
        let Some(product) = find(&data.products, id) else {
            return invalid("items", "The selected product is invalid.");
        };
        if product["stock"].as_i64().is_some_and(|stock| quantity > stock) {
            return invalid("items", "Some items are no longer available.");
        }
        let price = if product["sale_price"].is_string() {
            &product["sale_price"]
        } else {
            &product["price"]
        };
        #[allow(clippy::cast_precision_loss)]
        let line_total = money(price) * quantity as f64;
        total += line_total;
        items.push(json!({
            "product_id": id,
            "product_name": product["name"],
            "quantity": quantity,
            "price": price,
        }));
    }
    if items.is_empty() {
        return invalid("items", "The items field is required.");
    }

    let id = data.allocate_id();
    let mut order = json!({
        "id": id,
        "order_number": format!("BZ-{}", 1000 + id),
        "status": "pending",
        "total": format!("{total:.2}"),
        "items": items,
        "created_at": "2026-10-19T12:00:00Z",
    });
    for field in [
        "customer_name",
        "customer_email",
        "customer_phone",
        "shipping_address",
        "city",
        "notes",
        "locale",
    ] {
        order[field] = body[field].clone();
    }
    data.orders.push(order.clone());
    one(StatusCode::CREATED, order)
}

async fn contact(State(data): State<Shared>, Json(body): Json<Value>) -> Response {
    if data.lock().await.failing_writes {
        return server_error();
    }
    if body["message"]
        .as_str()
        .is_some_and(|m| m.to_lowercase().contains("spam"))
    {
        return invalid("message", "The message looks like spam.");
    }
    data.lock().await.contacts.push(body);
    (StatusCode::CREATED, Json(json!({"message": "Message sent."}))).into_response()
}

// -----------------------------------------------------------------------------
// Auth
// -----------------------------------------------------------------------------

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials."})),
        )
            .into_response();
    }
    match body["email"].as_str() {
        Some(ADMIN_EMAIL) => Json(json!({
            "token": ADMIN_TOKEN,
            "user": {"id": 1, "name": "Layla Admin", "email": ADMIN_EMAIL, "role": "admin"},
        }))
        .into_response(),
        Some(SHOPPER_EMAIL) => Json(json!({
            "access_token": SHOPPER_TOKEN,
            "user": {"id": 2, "name": "Sara Ahmed", "email": SHOPPER_EMAIL, "role": "customer"},
        }))
        .into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials."})),
        )
            .into_response(),
    }
}

async fn logout(State(data): State<Shared>, headers: HeaderMap) -> StatusCode {
    match bearer(&headers) {
        Some(token) => {
            data.lock().await.revoked.push(token);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::UNAUTHORIZED,
    }
}

// -----------------------------------------------------------------------------
// Admin catalog
// -----------------------------------------------------------------------------

async fn admin_list(State(data): State<Shared>, headers: HeaderMap, kind: Resource) -> Response {
    let mut data = data.lock().await;
    if let Some(rejection) = data.authorize(&headers) {
        return rejection;
    }
    list(data.collection(kind).clone())
}

async fn admin_show(
    State(data): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    kind: Resource,
) -> Response {
    let mut data = data.lock().await;
    if let Some(rejection) = data.authorize(&headers) {
        return rejection;
    }
    find(data.collection(kind), id).map_or_else(not_found, |v| one(StatusCode::OK, v.clone()))
}

async fn admin_create(
    State(data): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
    kind: Resource,
) -> Response {
    let mut data = data.lock().await;
    if let Some(rejection) = data.authorize(&headers) {
        return rejection;
    }
    let name = body["name"].as_str().unwrap_or_default();
    if data
        .collection(kind)
        .iter()
        .any(|existing| existing["name"] == name)
    {
        return invalid("name", "The name has already been taken.");
    }

    let id = data.allocate_id();
    let mut record = body;
    record["id"] = json!(id);
    data.collection(kind).push(record.clone());
    one(StatusCode::CREATED, record)
}

async fn admin_update(
    State(data): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
    kind: Resource,
) -> Response {
    let mut data = data.lock().await;
    if let Some(rejection) = data.authorize(&headers) {
        return rejection;
    }
    let Some(record) = data
        .collection(kind)
        .iter_mut()
        .find(|item| item["id"] == id)
    else {
        return not_found();
    };
    if let (Some(record), Value::Object(changes)) = (record.as_object_mut(), body) {
        merge(record, changes);
    }
    one(StatusCode::OK, record.clone())
}

fn merge(record: &mut Map<String, Value>, changes: Map<String, Value>) {
    for (key, value) in changes {
        record.insert(key, value);
    }
}

async fn admin_delete(
    State(data): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    kind: Resource,
) -> Response {
    let mut data = data.lock().await;
    if let Some(rejection) = data.authorize(&headers) {
        return rejection;
    }
    let items = data.collection(kind);
    let before = items.len();
    items.retain(|item| item["id"] != id);
    if items.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}

// -----------------------------------------------------------------------------
// Admin orders and customers
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct OrderParams {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CustomerParams {
    search: Option<String>,
}

async fn admin_orders(
    State(data): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<OrderParams>,
) -> Response {
    let data = data.lock().await;
    if let Some(rejection) = data.authorize(&headers) {
        return rejection;
    }
    list(
        data.orders
            .iter()
            .filter(|o| {
                params
                    .status
                    .as_deref()
                    .is_none_or(|status| o["status"] == status)
            })
            .cloned()
            .collect(),
    )
}

async fn admin_order(
    State(data): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let data = data.lock().await;
    if let Some(rejection) = data.authorize(&headers) {
        return rejection;
    }
    find(&data.orders, id).map_or_else(not_found, |o| one(StatusCode::OK, o.clone()))
}

/// Cancelled orders cannot be moved back into the pipeline.
async fn admin_update_order(
    State(data): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut data = data.lock().await;
    if let Some(rejection) = data.authorize(&headers) {
        return rejection;
    }
    let Some(order) = data.orders.iter_mut().find(|o| o["id"] == id) else {
        return not_found();
    };
    if order["status"] == "cancelled" && body["status"] != "cancelled" {
        return invalid("status", "A cancelled order cannot be reopened.");
    }
    order["status"] = body["status"].clone();
    one(StatusCode::OK, order.clone())
}

async fn admin_customers(
    State(data): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<CustomerParams>,
) -> Response {
    let mut data = data.lock().await;
    if let Some(rejection) = data.authorize(&headers) {
        return rejection;
    }
    let needle = params.search.map(|s| s.to_lowercase());
    if let Some(needle) = &needle {
        data.customer_searches.push(needle.clone());
    }
    list(
        data.customers
            .iter()
            .filter(|c| {
                needle.as_deref().is_none_or(|needle| {
                    c["name"]
                        .as_str()
                        .is_some_and(|name| name.to_lowercase().contains(needle))
                })
            })
            .cloned()
            .collect(),
    )
}

async fn admin_customer(
    State(data): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let data = data.lock().await;
    if let Some(rejection) = data.authorize(&headers) {
        return rejection;
    }
    find(&data.customers, id).map_or_else(not_found, |c| one(StatusCode::OK, c.clone()))
}

// =============================================================================
// App Harness
// =============================================================================

/// A running app plus a browser-like client with its own cookie jar.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestApp {
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// Submit a URL-encoded form, as a browser would.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }
}

/// The `Location` header of a redirect, or `""`.
#[must_use]
pub fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build HTTP client")
}

/// Bind an ephemeral port first so the app can be configured with its own URL.
async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind app");
    let addr = listener.local_addr().expect("App has no address");
    (listener, format!("http://{addr}"))
}

fn serve(listener: TcpListener, base_url: String, router: Router) -> TestApp {
    tokio::spawn(async move {
        let _ = axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await;
    });
    TestApp {
        base_url,
        client: browser(),
    }
}

/// Start the storefront against `backend`.
///
/// # Panics
///
/// Panics if the app cannot be configured or bound.
pub async fn spawn_storefront(backend: &StubBackend) -> TestApp {
    spawn_storefront_with(backend, |_| {}).await
}

/// Start the storefront with a config adjusted by `configure`.
///
/// # Panics
///
/// Panics if the app cannot be configured or bound.
pub async fn spawn_storefront_with(
    backend: &StubBackend,
    configure: impl FnOnce(&mut StorefrontConfig),
) -> TestApp {
    use bazaar_storefront::state::AppState;

    let (listener, base_url) = bind().await;
    let mut config = StorefrontConfig::for_urls(&base_url, &backend.api_url)
        .expect("Invalid storefront config");
    configure(&mut config);
    let state = AppState::new(config).expect("Failed to build storefront state");
    serve(listener, base_url, bazaar_storefront::app(state))
}

/// Start the admin dashboard against `backend`.
///
/// # Panics
///
/// Panics if the app cannot be configured or bound.
pub async fn spawn_admin(backend: &StubBackend) -> TestApp {
    use bazaar_admin::{config::AdminConfig, state::AppState};

    let (listener, base_url) = bind().await;
    let config =
        AdminConfig::for_urls(&base_url, &backend.api_url).expect("Invalid admin config");
    let state = AppState::new(config).expect("Failed to build admin state");
    serve(listener, base_url, bazaar_admin::app(state))
}

/// Start the admin dashboard and sign in as the admin user.
///
/// # Panics
///
/// Panics if sign-in does not redirect to the dashboard.
pub async fn signed_in_admin(backend: &StubBackend) -> TestApp {
    let app = spawn_admin(backend).await;
    let response = app
        .post_form("/login", &[("email", ADMIN_EMAIL), ("password", PASSWORD)])
        .await;
    assert_eq!(location(&response), "/", "admin sign-in failed");
    app
}
