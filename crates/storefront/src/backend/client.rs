//! Cached HTTP client for the public backend API.

use std::sync::Arc;
use std::time::Duration;

use bazaar_core::{
    Category, CategoryId, Order, Page, Product, ProductId, decode_list, decode_one,
};
use moka::future::Cache;
use reqwest::header::RETRY_AFTER;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::cache::{CacheKey, CacheValue};
use super::{BackendError, ContactRequest, OrderRequest, ProductQuery, error_for_status};
use crate::config::BackendConfig;

/// Client for the public backend REST API.
///
/// Catalog reads (categories, listings and product details) are cached for
/// the configured TTL. Searches, orders and contact messages are never cached.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<SecretString>,
    cache: Cache<CacheKey, CacheValue>,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig, cache_ttl: Duration) -> Result<Self, BackendError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(cache_ttl)
            .build();

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("bazaar-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.api_url.clone(),
                api_token: config.api_token.clone(),
                cache,
            }),
        })
    }

    // =========================================================================
    // Transport
    // =========================================================================

    fn url(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header(reqwest::header::ACCEPT, "application/json");
        match &self.inner.api_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Send a request and return the decoded JSON body.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<Value, BackendError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());

        // Body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            if status.is_server_error() {
                tracing::error!(
                    status = %status,
                    path,
                    body = %body.chars().take(500).collect::<String>(),
                    "Backend returned server error"
                );
            } else {
                debug!(status = %status, path, "Backend rejected request");
            }
            return Err(error_for_status(status, retry_after, path, &body));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                path,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse backend response"
            );
            BackendError::Parse(e)
        })
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, BackendError> {
        let url = self.url(path)?;
        let request = self.inner.client.get(url).query(query);
        self.send(request, path).await
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Value, BackendError> {
        let url = self.url(path)?;
        let request = self.inner.client.post(url).json(body);
        self.send(request, path).await
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// Get all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the body is not a list.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, BackendError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let body = self.get("categories", &[]).await?;
        let categories = decode_list::<Category>(body)?.items;

        self.inner
            .cache
            .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Get a category by id.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if the category does not exist.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn category(&self, id: CategoryId) -> Result<Category, BackendError> {
        let key = CacheKey::Category(id);
        if let Some(CacheValue::Category(category)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for category");
            return Ok(*category);
        }

        let body = self.get(&format!("categories/{id}"), &[]).await?;
        let category: Category = decode_one(body)?;

        self.inner
            .cache
            .insert(key, CacheValue::Category(Box::new(category.clone())))
            .await;

        Ok(category)
    }

    /// Get one page of a category's products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the payload is not
    /// list-shaped.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn category_products(
        &self,
        id: CategoryId,
        page: u32,
    ) -> Result<Page<Product>, BackendError> {
        let page = page.max(1);
        let key = CacheKey::CategoryProducts { id, page };
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for category products");
            return Ok(products);
        }

        let body = self
            .get(&format!("categories/{id}/products"), &[("page", page.to_string())])
            .await?;
        let products = decode_list::<Product>(body)?;

        self.inner
            .cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a page of products matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(page = query.page, search = ?query.search))]
    pub async fn products(&self, query: &ProductQuery) -> Result<Page<Product>, BackendError> {
        let key = CacheKey::Products(query.clone());
        if query.is_cacheable()
            && let Some(CacheValue::Products(products)) = self.inner.cache.get(&key).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let body = self.get("products", &query.to_params()).await?;
        let products = decode_list::<Product>(body)?;

        if query.is_cacheable() {
            self.inner
                .cache
                .insert(key, CacheValue::Products(products.clone()))
                .await;
        }

        Ok(products)
    }

    /// Get up to `limit` featured products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn featured_products(&self, limit: u32) -> Result<Vec<Product>, BackendError> {
        let query = ProductQuery {
            per_page: Some(limit),
            featured: true,
            ..ProductQuery::default()
        };
        let mut products = self.products(&query).await?.items;
        // Not every backend honors the filter
        products.retain(|p| p.is_featured);
        products.truncate(limit as usize);
        Ok(products)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, BackendError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let body = self.get(&format!("products/{id}"), &[]).await?;
        let product: Product = decode_one(body)?;

        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Other products from the same category, excluding `product` itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn related_products(
        &self,
        product: &Product,
        limit: usize,
    ) -> Result<Vec<Product>, BackendError> {
        let Some(category) = product.category_id() else {
            return Ok(Vec::new());
        };

        let mut related = self.category_products(category, 1).await?.items;
        related.retain(|p| p.id != product.id);
        related.truncate(limit);
        Ok(related)
    }

    // =========================================================================
    // Write Methods
    // =========================================================================

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Validation` when the backend rejects fields.
    #[instrument(skip(self, order), fields(items = order.items.len()))]
    pub async fn place_order(&self, order: &OrderRequest) -> Result<Order, BackendError> {
        let body = self.post("orders", order).await?;
        let order: Order = decode_one(body)?;

        // Stock levels changed
        for item in &order.items {
            self.inner
                .cache
                .invalidate(&CacheKey::Product(item.product_id))
                .await;
        }

        Ok(order)
    }

    /// Send a contact-form message.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Validation` when the backend rejects fields.
    #[instrument(skip(self, message))]
    pub async fn send_contact(&self, message: &ContactRequest) -> Result<(), BackendError> {
        self.post("contact", message).await?;
        Ok(())
    }

    /// Check the backend answers, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or unhealthy.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<(), BackendError> {
        self.get("categories", &[]).await?;
        Ok(())
    }

    /// Drop every cached response.
    pub fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
    }
}
