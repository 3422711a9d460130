//! Category route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use bazaar_core::{CategoryId, Page};
use serde::Deserialize;
use tracing::instrument;

use super::products::parse_page;
use crate::error::{AppError, Result};
use crate::middleware::PageContext;
use crate::state::AppState;
use crate::views::{CategoryCard, Pagination, ProductCard};

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub page: Option<String>,
}

/// Category listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub ctx: PageContext,
    pub categories: Vec<CategoryCard>,
}

/// Category detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub ctx: PageContext,
    pub category: CategoryCard,
    pub description: Option<String>,
    pub products: Vec<ProductCard>,
    pub pagination: Option<Pagination>,
}

/// Display all categories.
#[instrument(skip(state, ctx))]
pub async fn index(State(state): State<AppState>, ctx: PageContext) -> CategoriesIndexTemplate {
    let categories = state.backend().categories().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch categories");
        Vec::new()
    });

    let assets = &state.config().backend;
    CategoriesIndexTemplate {
        categories: categories
            .iter()
            .map(|c| CategoryCard::new(c, &ctx, assets))
            .collect(),
        ctx,
    }
}

/// Display a category and one page of its products.
///
/// A missing category is a 404; a failed product listing renders empty.
#[instrument(skip(state, ctx))]
pub async fn show(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(id): Path<String>,
    Query(query): Query<CategoryQuery>,
) -> Result<CategoryShowTemplate> {
    let id: CategoryId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("category {id}")))?;
    let page_number = parse_page(query.page.as_deref());

    let category = state.backend().category(id).await?;
    let page = state
        .backend()
        .category_products(id, page_number)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, category_id = %id, "Failed to fetch category products");
            Page::empty()
        });

    let assets = &state.config().backend;
    let path = format!("/categories/{id}");
    Ok(CategoryShowTemplate {
        category: CategoryCard::new(&category, &ctx, assets),
        description: category.description.clone().filter(|d| !d.trim().is_empty()),
        products: ProductCard::list(&page.items, &ctx, assets),
        pagination: Pagination::new(&page, &path, &[], &ctx),
        ctx,
    })
}
