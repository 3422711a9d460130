//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::middleware::PageContext;
use crate::state::AppState;
use crate::views::{CategoryCard, ProductCard};

/// Number of featured products on the home page.
const FEATURED_LIMIT: u32 = 8;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ctx: PageContext,
    pub featured: Vec<ProductCard>,
    pub categories: Vec<CategoryCard>,
}

/// Display the home page.
///
/// Either section renders empty if the backend call fails.
#[instrument(skip(state, ctx))]
pub async fn home(State(state): State<AppState>, ctx: PageContext) -> HomeTemplate {
    let backend = state.backend();
    let assets = &state.config().backend;

    let (featured, categories) =
        tokio::join!(backend.featured_products(FEATURED_LIMIT), backend.categories());

    let featured = featured.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch featured products");
        Vec::new()
    });
    let categories = categories.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch categories");
        Vec::new()
    });

    HomeTemplate {
        featured: ProductCard::list(&featured, &ctx, assets),
        categories: categories
            .iter()
            .map(|c| CategoryCard::new(c, &ctx, assets))
            .collect(),
        ctx,
    }
}
