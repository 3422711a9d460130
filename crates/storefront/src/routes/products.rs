//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use bazaar_core::{CategoryId, Page, Product, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::backend::{ProductQuery, ProductSort};
use crate::error::{AppError, Result};
use crate::middleware::PageContext;
use crate::models::MAX_LINE_QUANTITY;
use crate::state::AppState;
use crate::views::{Pagination, ProductCard, SelectOption};

/// Products per listing page.
const PER_PAGE: u32 = 12;

/// Related products shown under a product.
const RELATED_LIMIT: usize = 4;

/// Listing query parameters.
///
/// Everything arrives as a string so a malformed value falls back to the
/// default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub page: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl ListingQuery {
    fn to_product_query(&self) -> ProductQuery {
        ProductQuery {
            page: parse_page(self.page.as_deref()),
            per_page: Some(PER_PAGE),
            search: self
                .q
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(String::from),
            category: self.category.as_deref().and_then(|c| c.trim().parse().ok()),
            featured: false,
            sort: self
                .sort
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        }
    }
}

/// Parse a `?page=` value, defaulting to the first page.
#[must_use]
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub ctx: PageContext,
    pub heading: String,
    pub search: String,
    pub products: Vec<ProductCard>,
    pub pagination: Option<Pagination>,
    pub sorts: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
}

/// Product detail view.
pub struct ProductDetail {
    pub card: ProductCard,
    pub description: Option<String>,
    pub category_url: Option<String>,
    pub category_name: Option<String>,
    pub max_quantity: u32,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub ctx: PageContext,
    pub product: ProductDetail,
    pub related: Vec<ProductCard>,
}

/// Display product listing page.
#[instrument(skip(state, ctx))]
pub async fn index(
    State(state): State<AppState>,
    ctx: PageContext,
    Query(query): Query<ListingQuery>,
) -> ProductsIndexTemplate {
    let backend = state.backend();
    let product_query = query.to_product_query();

    let (page, categories) = tokio::join!(backend.products(&product_query), backend.categories());
    let page = page.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch products");
        Page::empty()
    });
    let categories = categories.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch categories");
        Vec::new()
    });

    let search = product_query.search.clone().unwrap_or_default();
    let heading = if search.is_empty() {
        ctx.i18n.t("products.title").to_string()
    } else {
        ctx.i18n.f("products.results_for", &[("query", &search)])
    };

    let mut params = vec![("q", search.clone())];
    if let Some(category) = product_query.category {
        params.push(("category", category.to_string()));
    }
    if product_query.sort != ProductSort::default() {
        params.push(("sort", product_query.sort.as_param().to_string()));
    }

    let category_options = categories
        .iter()
        .map(|c| SelectOption {
            value: c.id.to_string(),
            label: c.localized_name(ctx.locale).to_string(),
            selected: product_query.category == Some(c.id),
        })
        .collect();

    ProductsIndexTemplate {
        heading,
        products: ProductCard::list(&page.items, &ctx, &state.config().backend),
        pagination: Pagination::new(&page, "/products", &params, &ctx),
        sorts: SelectOption::sorts(product_query.sort, &ctx),
        categories: category_options,
        search,
        ctx,
    }
}

/// Display product detail page.
#[instrument(skip(state, ctx))]
pub async fn show(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let id: ProductId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("product {id}")))?;

    let product = state.backend().product(id).await?;
    let related = state
        .backend()
        .related_products(&product, RELATED_LIMIT)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to fetch related products");
            Vec::new()
        });

    let assets = &state.config().backend;
    let detail = detail_view(&product, &ctx, assets);

    Ok(ProductShowTemplate {
        product: detail,
        related: ProductCard::list(&related, &ctx, assets),
        ctx,
    })
}

fn detail_view(
    product: &Product,
    ctx: &PageContext,
    assets: &crate::config::BackendConfig,
) -> ProductDetail {
    let category_id: Option<CategoryId> = product.category_id();
    ProductDetail {
        card: ProductCard::new(product, ctx, assets),
        description: product.localized_description(ctx.locale).map(String::from),
        category_url: category_id.map(|id| format!("/categories/{id}")),
        category_name: product
            .category
            .as_ref()
            .map(|c| c.localized_name(ctx.locale).to_string()),
        max_quantity: product
            .stock
            .and_then(|s| u32::try_from(s).ok())
            .map_or(MAX_LINE_QUANTITY, |s| s.clamp(1, MAX_LINE_QUANTITY)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("3")), 3);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
    }

    #[test]
    fn test_listing_query_tolerates_garbage() {
        let query = ListingQuery {
            page: Some("2".into()),
            q: Some("  ".into()),
            category: Some("x".into()),
            sort: Some("price_asc".into()),
        };
        let product_query = query.to_product_query();
        assert_eq!(product_query.page, 2);
        assert_eq!(product_query.search, None);
        assert_eq!(product_query.category, None);
        assert_eq!(product_query.sort, ProductSort::PriceAsc);
        assert_eq!(product_query.per_page, Some(PER_PAGE));
    }
}
