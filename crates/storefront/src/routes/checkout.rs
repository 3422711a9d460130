//! Checkout: order form, submission and confirmation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bazaar_core::{Locale, Order, Translator};
use tower_sessions::Session;
use tracing::instrument;

use super::submit_failure;
use crate::backend::BackendError;
use crate::error::{Result, add_breadcrumb};
use crate::forms::{CheckoutForm, FormErrors};
use crate::middleware::{PageContext, ShopperLocale};
use crate::models::Cart;
use crate::models::session::{self, keys};
use crate::state::AppState;
use crate::views::CartLineView;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub ctx: PageContext,
    pub form: CheckoutForm,
    pub errors: FormErrors,
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
}

/// A line on the confirmation page.
pub struct OrderLineView {
    pub name: String,
    pub quantity: u32,
    pub total: String,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/complete.html")]
pub struct CompleteTemplate {
    pub ctx: PageContext,
    pub reference: String,
    pub status: &'static str,
    pub lines: Vec<OrderLineView>,
    pub total: String,
}

fn render(
    state: &AppState,
    ctx: PageContext,
    cart: &Cart,
    form: CheckoutForm,
    errors: FormErrors,
) -> CheckoutTemplate {
    let assets = &state.config().backend;
    CheckoutTemplate {
        lines: cart
            .lines()
            .iter()
            .map(|line| CartLineView::new(line, &ctx, assets))
            .collect(),
        subtotal: ctx.price_or_dash(cart.subtotal()),
        form,
        errors,
        ctx,
    }
}

/// Display the order form. An empty cart goes back to the cart page.
#[instrument(skip(state, ctx, session))]
pub async fn show(
    State(state): State<AppState>,
    ctx: PageContext,
    session: Session,
) -> Result<Response> {
    let cart: Cart = session::load(&session, keys::CART).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }
    Ok(render(&state, ctx, &cart, CheckoutForm::default(), FormErrors::default()).into_response())
}

async fn rerender(
    state: &AppState,
    session: &Session,
    locale: Locale,
    status: StatusCode,
    cart: &Cart,
    form: CheckoutForm,
    errors: impl FnOnce(Translator) -> FormErrors,
) -> Result<Response> {
    let ctx = PageContext::load(state, session, locale, "/checkout".to_string()).await?;
    let errors = errors(ctx.i18n);
    Ok((status, render(state, ctx, cart, form, errors)).into_response())
}

/// Validate, place the order and redirect to the confirmation page.
///
/// Field errors (local or HTTP 422 from the backend) re-render the form with
/// status 422. Other backend failures re-render it with a generic message.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    ShopperLocale(locale): ShopperLocale,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut cart: Cart = session::load(&session, keys::CART).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let invalid = StatusCode::UNPROCESSABLE_ENTITY;
    let order = match form.validate(cart.order_lines(), locale) {
        Ok(order) => order,
        Err(errors) => {
            return rerender(&state, &session, locale, invalid, &cart, form, |i18n| {
                FormErrors::with_fallback(&errors, i18n, "checkout.fix_errors")
            })
            .await;
        }
    };

    match state.backend().place_order(&order).await {
        Ok(placed) => {
            tracing::info!(order_id = %placed.id, "Order placed");
            add_breadcrumb("checkout", "Order placed", Some(&[("order_id", &placed.id.to_string())]));
            // Cached stock levels are stale now
            state.backend().invalidate_all();
            cart.clear();
            session::save(&session, keys::CART, &cart).await?;
            session::save(&session, keys::LAST_ORDER, &Some(placed)).await?;
            Ok(Redirect::to("/checkout/complete").into_response())
        }
        Err(BackendError::Validation(errors)) => {
            rerender(&state, &session, locale, invalid, &cart, form, |i18n| {
                FormErrors::with_fallback(&errors, i18n, "checkout.fix_errors")
            })
            .await
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to place order");
            let (status, key) = submit_failure(&e, "checkout.failed");
            rerender(&state, &session, locale, status, &cart, form, |i18n| {
                FormErrors::with_summary(i18n.t(key))
            })
            .await
        }
    }
}

/// Confirmation of the most recent order in this session.
#[instrument(skip(ctx, session))]
pub async fn complete(ctx: PageContext, session: Session) -> Result<Response> {
    let order: Option<Order> = session::load(&session, keys::LAST_ORDER).await?;
    let Some(order) = order else {
        return Ok(Redirect::to("/").into_response());
    };

    let lines = order
        .items
        .iter()
        .map(|item| OrderLineView {
            name: item
                .product_name
                .clone()
                .unwrap_or_else(|| format!("#{}", item.product_id)),
            quantity: item.quantity,
            total: ctx.price_or_dash(item.line_total()),
        })
        .collect();

    Ok(CompleteTemplate {
        reference: order.reference(),
        status: ctx.i18n.status(order.status),
        total: ctx.price(order.total),
        lines,
        ctx,
    }
    .into_response())
}
