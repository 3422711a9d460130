//! HTTP client for the admin endpoints.

use std::sync::Arc;

use bazaar_core::{
    Category, CategoryId, Customer, CustomerId, LoginResponse, Order, OrderId, OrderStatus,
    Product, ProductId, decode_list, decode_one,
};
use reqwest::header::RETRY_AFTER;
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::{ApiError, CategoryInput, LoginRequest, ProductInput, StatusUpdate, error_for_status};
use crate::config::AdminConfig;

/// Rows requested from list endpoints. Filtering and sorting happen on this
/// fetched set.
const FETCH_LIMIT: u32 = 100;

/// Client for the backend's admin REST API.
#[derive(Clone)]
pub struct AdminApiClient {
    inner: Arc<AdminApiClientInner>,
}

struct AdminApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl AdminApiClient {
    /// Create a new admin API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &AdminConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("bazaar-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(AdminApiClientInner {
                client,
                base_url: config.api_url.clone(),
            }),
        })
    }

    // =========================================================================
    // Transport
    // =========================================================================

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&SecretString>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.inner.base_url.join(path.trim_start_matches('/'))?;
        let request = self
            .inner
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        Ok(match token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        })
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Value, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());
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
        Ok(serde_json::from_str(&body)?)
    }

    async fn get(
        &self,
        token: &SecretString,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, path, Some(token))?.query(query);
        self.send(request, path).await
    }

    async fn write<B: Serialize + Sync>(
        &self,
        method: Method,
        token: &SecretString,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let request = self.request(method, path, Some(token))?.json(body);
        self.send(request, path).await
    }

    async fn delete(&self, token: &SecretString, path: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, path, Some(token))?;
        self.send(request, path).await?;
        Ok(())
    }

    fn list_params(extra: &[(&'static str, Option<String>)]) -> Vec<(&'static str, String)> {
        let mut params = vec![("per_page", FETCH_LIMIT.to_string())];
        params.extend(
            extra
                .iter()
                .filter_map(|(key, value)| value.clone().map(|v| (*key, v))),
        );
        params
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` or `ApiError::Validation` for bad
    /// credentials, depending on the backend.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = self
            .request(Method::POST, "login", None)?
            .json(&LoginRequest { email, password });
        let body = self.send(request, "login").await?;
        Ok(decode_one(body)?)
    }

    /// Revoke the token on the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &SecretString) -> Result<(), ApiError> {
        self.write(Method::POST, token, "logout", &Value::Null).await?;
        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn products(&self, token: &SecretString) -> Result<Vec<Product>, ApiError> {
        let body = self
            .get(token, "admin/products", &Self::list_params(&[]))
            .await?;
        Ok(decode_list(body)?.items)
    }

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the product does not exist.
    #[instrument(skip(self, token), fields(product_id = %id))]
    pub async fn product(&self, token: &SecretString, id: ProductId) -> Result<Product, ApiError> {
        let body = self.get(token, &format!("admin/products/{id}"), &[]).await?;
        Ok(decode_one(body)?)
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` when the backend rejects fields.
    #[instrument(skip(self, token, input))]
    pub async fn create_product(
        &self,
        token: &SecretString,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        let body = self
            .write(Method::POST, token, "admin/products", input)
            .await?;
        Ok(decode_one(body)?)
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` when the backend rejects fields.
    #[instrument(skip(self, token, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        token: &SecretString,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        let body = self
            .write(Method::POST, token, &format!("admin/products/{id}"), input)
            .await?;
        Ok(decode_one(body)?)
    }

    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token), fields(product_id = %id))]
    pub async fn delete_product(&self, token: &SecretString, id: ProductId) -> Result<(), ApiError> {
        self.delete(token, &format!("admin/products/{id}")).await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn categories(&self, token: &SecretString) -> Result<Vec<Category>, ApiError> {
        let body = self
            .get(token, "admin/categories", &Self::list_params(&[]))
            .await?;
        Ok(decode_list(body)?.items)
    }

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the category does not exist.
    #[instrument(skip(self, token), fields(category_id = %id))]
    pub async fn category(
        &self,
        token: &SecretString,
        id: CategoryId,
    ) -> Result<Category, ApiError> {
        let body = self
            .get(token, &format!("admin/categories/{id}"), &[])
            .await?;
        Ok(decode_one(body)?)
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` when the backend rejects fields.
    #[instrument(skip(self, token, input))]
    pub async fn create_category(
        &self,
        token: &SecretString,
        input: &CategoryInput,
    ) -> Result<Category, ApiError> {
        let body = self
            .write(Method::POST, token, "admin/categories", input)
            .await?;
        Ok(decode_one(body)?)
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` when the backend rejects fields.
    #[instrument(skip(self, token, input), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        token: &SecretString,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Category, ApiError> {
        let body = self
            .write(Method::POST, token, &format!("admin/categories/{id}"), input)
            .await?;
        Ok(decode_one(body)?)
    }

    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token), fields(category_id = %id))]
    pub async fn delete_category(
        &self,
        token: &SecretString,
        id: CategoryId,
    ) -> Result<(), ApiError> {
        self.delete(token, &format!("admin/categories/{id}")).await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Orders, optionally only those in `status`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn orders(
        &self,
        token: &SecretString,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, ApiError> {
        let params = Self::list_params(&[("status", status.map(|s| s.as_str().to_string()))]);
        let body = self.get(token, "admin/orders", &params).await?;
        let mut orders: Vec<Order> = decode_list(body)?.items;
        // Guard against backends that ignore the filter
        if let Some(status) = status {
            orders.retain(|o| o.status == status);
        }
        Ok(orders)
    }

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order does not exist.
    #[instrument(skip(self, token), fields(order_id = %id))]
    pub async fn order(&self, token: &SecretString, id: OrderId) -> Result<Order, ApiError> {
        let body = self.get(token, &format!("admin/orders/{id}"), &[]).await?;
        Ok(decode_one(body)?)
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the transition is rejected.
    #[instrument(skip(self, token), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        token: &SecretString,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        self.write(
            Method::PATCH,
            token,
            &format!("admin/orders/{id}"),
            &StatusUpdate { status },
        )
        .await?;
        Ok(())
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Customers, optionally filtered by the backend's search.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn customers(
        &self,
        token: &SecretString,
        search: Option<&str>,
    ) -> Result<Vec<Customer>, ApiError> {
        let params = Self::list_params(&[("search", search.map(String::from))]);
        let body = self.get(token, "admin/customers", &params).await?;
        Ok(decode_list(body)?.items)
    }

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the customer does not exist.
    #[instrument(skip(self, token), fields(customer_id = %id))]
    pub async fn customer(
        &self,
        token: &SecretString,
        id: CustomerId,
    ) -> Result<Customer, ApiError> {
        let body = self
            .get(token, &format!("admin/customers/{id}"), &[])
            .await?;
        Ok(decode_one(body)?)
    }
}
