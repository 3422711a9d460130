//! Sitemap and robots.txt.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::backend::ProductQuery;
use crate::sitemap::{ChangeFreq, SitemapBuilder};
use crate::state::AppState;

/// Upper bound on product listing pages walked per sitemap request.
const MAX_PRODUCT_PAGES: u32 = 50;

/// Listing page size requested while walking the catalog.
const SITEMAP_PAGE_SIZE: u32 = 100;

/// Display the XML sitemap.
///
/// Static pages are always listed. Catalog entries that cannot be fetched
/// are left out rather than failing the response.
#[instrument(skip(state))]
pub async fn sitemap_xml(State(state): State<AppState>) -> Response {
    let backend = state.backend();
    let mut sitemap = SitemapBuilder::new(state.config().base_url.clone());

    sitemap
        .add("/", None, ChangeFreq::Daily, 1.0)
        .add("/products", None, ChangeFreq::Daily, 0.9)
        .add("/categories", None, ChangeFreq::Weekly, 0.8)
        .add("/contact", None, ChangeFreq::Monthly, 0.3);

    match backend.categories().await {
        Ok(categories) => {
            for category in &categories {
                sitemap.add(
                    &format!("/categories/{}", category.id),
                    None,
                    ChangeFreq::Weekly,
                    0.7,
                );
            }
        }
        Err(e) => tracing::warn!(error = %e, "Sitemap: failed to load categories"),
    }

    let mut page = 1;
    loop {
        let query = ProductQuery {
            page,
            per_page: Some(SITEMAP_PAGE_SIZE),
            ..ProductQuery::default()
        };
        let products = match backend.products(&query).await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %e, page, "Sitemap: failed to load products");
                break;
            }
        };
        for product in &products.items {
            sitemap.add(
                &format!("/products/{}", product.id),
                product.updated_at,
                ChangeFreq::Weekly,
                0.6,
            );
        }
        if !products.has_next() || page >= MAX_PRODUCT_PAGES {
            break;
        }
        page += 1;
    }

    tracing::debug!(entries = sitemap.len(), "Sitemap built");

    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap.build(),
    )
        .into_response()
}

/// Display robots.txt.
#[instrument(skip(state))]
pub async fn robots_txt(State(state): State<AppState>) -> Response {
    let sitemap = state
        .config()
        .base_url
        .join("sitemap.xml")
        .map_or_else(|_| "/sitemap.xml".to_string(), String::from);

    let body = format!(
        "User-agent: *\n\
         Allow: /\n\
         Disallow: /cart\n\
         Disallow: /checkout\n\
         Disallow: /wishlist\n\
         Disallow: /lang/\n\
         \n\
         Sitemap: {sitemap}\n"
    );

    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}
