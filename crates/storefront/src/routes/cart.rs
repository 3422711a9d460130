//! Cart route handlers.
//!
//! The cart lives in the session. Mutations redirect back with a flash
//! message; `/cart/count` serves the header badge as JSON.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    http::HeaderMap,
    response::Redirect,
};
use bazaar_core::ProductId;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use super::redirect_back;
use crate::backend::BackendError;
use crate::error::{Result, add_breadcrumb};
use crate::middleware::PageContext;
use crate::models::session::{self, keys};
use crate::models::{Cart, CartError, Flash};
use crate::state::AppState;
use crate::views::CartLineView;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
    pub return_to: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Cart badge count.
#[derive(Debug, Serialize, Deserialize)]
pub struct CartCount {
    pub count: u32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub ctx: PageContext,
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
}

async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session::load(session, keys::CART).await?)
}

async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    Ok(session::save(session, keys::CART, cart).await?)
}

/// Display cart page.
#[instrument(skip(state, ctx, session))]
pub async fn show(
    State(state): State<AppState>,
    ctx: PageContext,
    session: Session,
) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await?;
    let assets = &state.config().backend;

    Ok(CartShowTemplate {
        lines: cart
            .lines()
            .iter()
            .map(|line| CartLineView::new(line, &ctx, assets))
            .collect(),
        subtotal: ctx.price_or_dash(cart.subtotal()),
        ctx,
    })
}

/// Add a product to the cart.
///
/// Fetches the product first so the snapshot and stock check use current data.
#[instrument(skip(state, session, headers), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let back = |headers: &HeaderMap| redirect_back(headers, form.return_to.as_deref(), "/cart");

    let product = match state.backend().product(form.product_id).await {
        Ok(product) => product,
        Err(BackendError::NotFound(_)) => {
            Flash::error(&session, "cart.not_found").await?;
            return Ok(back(&headers));
        }
        Err(e) => return Err(e.into()),
    };

    let mut cart = load_cart(&session).await?;
    match cart.add(&product, form.quantity.unwrap_or(1)) {
        Ok(quantity) => {
            save_cart(&session, &cart).await?;
            add_breadcrumb(
                "cart",
                "Added product",
                Some(&[
                    ("product_id", &product.id.to_string()),
                    ("quantity", &quantity.to_string()),
                ]),
            );
            Flash::success(&session, "cart.added").await?;
        }
        Err(CartError::OutOfStock(_)) => {
            Flash::error(&session, "cart.out_of_stock").await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(back(&headers))
}

/// Set the quantity of a cart line. Zero removes it.
#[instrument(skip(session), fields(product_id = %form.product_id, quantity = form.quantity))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;
    match cart.set_quantity(form.product_id, form.quantity) {
        Ok(0) => {
            save_cart(&session, &cart).await?;
            Flash::success(&session, "cart.removed").await?;
        }
        Ok(_) => {
            save_cart(&session, &cart).await?;
            Flash::success(&session, "cart.updated").await?;
        }
        Err(_) => Flash::error(&session, "cart.not_found").await?,
    }
    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
#[instrument(skip(session), fields(product_id = %form.product_id))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;
    if cart.remove(form.product_id) {
        save_cart(&session, &cart).await?;
        Flash::success(&session, "cart.removed").await?;
    }
    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Redirect> {
    save_cart(&session, &Cart::default()).await?;
    Flash::success(&session, "cart.cleared").await?;
    Ok(Redirect::to("/cart"))
}

/// Item count for the header badge.
pub async fn count(session: Session) -> Result<Json<CartCount>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartCount {
        count: cart.item_count(),
    }))
}
