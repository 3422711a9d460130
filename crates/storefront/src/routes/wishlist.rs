//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, http::HeaderMap, response::Redirect};
use bazaar_core::{Product, ProductId};
use futures::{StreamExt, stream};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::redirect_back;
use crate::backend::{BackendClient, BackendError};
use crate::error::Result;
use crate::middleware::PageContext;
use crate::models::session::{self, keys};
use crate::models::{Flash, Wishlist, WishlistError};
use crate::state::AppState;
use crate::views::ProductCard;

/// Toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub product_id: ProductId,
    pub return_to: Option<String>,
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistTemplate {
    pub ctx: PageContext,
    pub products: Vec<ProductCard>,
}

/// Backend requests in flight while loading the wishlist page.
const FETCH_CONCURRENCY: usize = 8;

/// Fetch the saved products, keeping wishlist order.
///
/// Products the backend no longer has are dropped silently; other failures
/// are logged and dropped.
pub async fn fetch_products(backend: &BackendClient, wishlist: &Wishlist) -> Vec<Product> {
    let results: Vec<_> = stream::iter(wishlist.product_ids())
        .map(|id| backend.product(id))
        .buffered(FETCH_CONCURRENCY)
        .collect()
        .await;
    results
        .into_iter()
        .filter_map(|result| match result {
            Ok(product) => Some(product),
            Err(BackendError::NotFound(_)) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch wishlist product");
                None
            }
        })
        .collect()
}

/// Display the wishlist.
#[instrument(skip(state, ctx))]
pub async fn show(State(state): State<AppState>, ctx: PageContext) -> WishlistTemplate {
    let products = fetch_products(state.backend(), &ctx.wishlist).await;
    WishlistTemplate {
        products: ProductCard::list(&products, &ctx, &state.config().backend),
        ctx,
    }
}

/// Add or remove a product, then go back.
///
/// Removing never touches the backend. Adding checks the product exists first.
#[instrument(skip(state, session, headers), fields(product_id = %form.product_id))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect> {
    let back = redirect_back(&headers, form.return_to.as_deref(), "/wishlist");
    let mut wishlist: Wishlist = session::load(&session, keys::WISHLIST).await?;

    if wishlist.remove(form.product_id) {
        session::save(&session, keys::WISHLIST, &wishlist).await?;
        Flash::success(&session, "wishlist.removed").await?;
        return Ok(back);
    }
    if wishlist.is_full() {
        Flash::error(&session, "wishlist.full").await?;
        return Ok(back);
    }

    match state.backend().product(form.product_id).await {
        Ok(_) => {}
        Err(BackendError::NotFound(_)) => {
            Flash::error(&session, "cart.not_found").await?;
            return Ok(back);
        }
        Err(e) => return Err(e.into()),
    }

    match wishlist.add(form.product_id) {
        Ok(_) => {
            session::save(&session, keys::WISHLIST, &wishlist).await?;
            Flash::success(&session, "wishlist.added").await?;
        }
        Err(WishlistError::Full) => Flash::error(&session, "wishlist.full").await?,
    }

    Ok(back)
}
