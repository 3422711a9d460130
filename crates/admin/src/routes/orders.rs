//! Orders: filtered list, detail and status changes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use bazaar_core::{Order, OrderId, OrderStatus};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::list_or_empty;
use crate::api::ApiError;
use crate::error::{Result, audit};
use crate::listing::{self, HeaderView, ListQuery, Pagination, TableColumn};
use crate::middleware::{PageContext, RequireAdminAuth};
use crate::models::Flash;
use crate::state::AppState;

const COLUMNS: [TableColumn; 6] = [
    TableColumn::sortable("id", "admin.field.id"),
    TableColumn::sortable("customer", "admin.field.customer"),
    TableColumn::sortable("total", "admin.field.total"),
    TableColumn::sortable("status", "admin.field.status"),
    TableColumn::sortable("created_at", "admin.field.created_at"),
    TableColumn::new("actions", "common.actions"),
];

fn format_time(time: Option<chrono::DateTime<chrono::Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Order row for tables.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub reference: String,
    pub customer: String,
    pub total: String,
    pub status_label: String,
    pub status_class: &'static str,
    pub created_at: String,
    pub url: String,
}

impl OrderRowView {
    #[must_use]
    pub fn new(order: &Order, ctx: &PageContext) -> Self {
        Self {
            reference: order.reference(),
            customer: order.customer_name.clone(),
            total: ctx.price(order.total),
            status_label: ctx.i18n.status(order.status).to_string(),
            status_class: order.status.badge_class(),
            created_at: format_time(order.created_at),
            url: format!("/orders/{}", order.id),
        }
    }
}

/// Status filter link above the table.
#[derive(Debug, Clone)]
pub struct StatusTab {
    pub label: String,
    pub url: String,
    pub active: bool,
}

/// `<option>` in the status form.
#[derive(Debug, Clone)]
pub struct StatusOption {
    pub value: &'static str,
    pub label: String,
    pub selected: bool,
}

/// Line on the order detail page.
#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub total: String,
}

/// Orders list page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub ctx: PageContext,
    pub tabs: Vec<StatusTab>,
    pub headers: Vec<HeaderView>,
    pub orders: Vec<OrderRowView>,
    pub total: usize,
    pub search: String,
    pub status: String,
    pub pagination: Option<Pagination>,
}

/// Order detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub ctx: PageContext,
    pub order: OrderRowView,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<OrderItemView>,
    pub statuses: Vec<StatusOption>,
    pub status_action: String,
}

fn status_tabs(active: Option<OrderStatus>, ctx: &PageContext) -> Vec<StatusTab> {
    let all = StatusTab {
        label: ctx.i18n.t("common.all").to_string(),
        url: "/orders".to_string(),
        active: active.is_none(),
    };
    std::iter::once(all)
        .chain(OrderStatus::all().into_iter().map(|status| StatusTab {
            label: ctx.i18n.status(status).to_string(),
            url: format!("/orders?status={}", status.as_str()),
            active: active == Some(status),
        }))
        .collect()
}

/// Orders list page handler. `?status=` narrows to one status.
#[instrument(skip(admin, state, ctx))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut ctx: PageContext,
    Query(query): Query<ListQuery>,
) -> Result<OrdersIndexTemplate> {
    let status = query
        .status_filter()
        .and_then(|raw| raw.parse::<OrderStatus>().ok());
    let orders = list_or_empty(
        state.api().orders(&admin.token, status).await,
        &mut ctx,
        "orders",
    )?;
    let paged = listing::paginate(
        listing::apply(orders, &query),
        query.page(),
        state.config().page_size,
    );

    Ok(OrdersIndexTemplate {
        tabs: status_tabs(status, &ctx),
        headers: listing::headers(&COLUMNS, &query, "/orders", ctx.i18n),
        orders: paged.items.iter().map(|o| OrderRowView::new(o, &ctx)).collect(),
        total: paged.total,
        search: query.search().unwrap_or_default().to_string(),
        status: status.map(|s| s.as_str().to_string()).unwrap_or_default(),
        pagination: Pagination::new(&paged, &query, "/orders", ctx.i18n),
        ctx,
    })
}

/// Order detail handler.
#[instrument(skip(admin, state, ctx), fields(order_id = %id))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    ctx: PageContext,
    Path(id): Path<OrderId>,
) -> Result<OrderShowTemplate> {
    let order = state.api().order(&admin.token, id).await?;

    let items = order
        .items
        .iter()
        .map(|item| OrderItemView {
            name: item
                .product_name
                .clone()
                .unwrap_or_else(|| format!("#{}", item.product_id)),
            quantity: item.quantity,
            price: ctx.price(item.price),
            total: ctx.price_or_dash(item.line_total()),
        })
        .collect();
    let statuses = OrderStatus::all()
        .into_iter()
        .map(|status| StatusOption {
            value: status.as_str(),
            label: ctx.i18n.status(status).to_string(),
            selected: status == order.status,
        })
        .collect();

    Ok(OrderShowTemplate {
        order: OrderRowView::new(&order, &ctx),
        email: order.customer_email,
        phone: order.customer_phone,
        address: order.shipping_address,
        city: order.city,
        notes: order.notes,
        items,
        statuses,
        status_action: format!("/orders/{id}/status"),
        ctx,
    })
}

/// Status change form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: String,
}

/// PATCH the new status and go back to the order.
#[instrument(skip(admin, state, session), fields(order_id = %id))]
pub async fn update_status(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<OrderId>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    let back = Redirect::to(&format!("/orders/{id}"));
    let Ok(status) = form.status.parse::<OrderStatus>() else {
        tracing::debug!(status = %form.status, "Ignoring unknown order status");
        Flash::error(&session, "admin.error.save_failed").await?;
        return Ok(back);
    };

    match state.api().update_order_status(&admin.token, id, status).await {
        Ok(()) => {
            audit("update_status", "order", id);
            Flash::success(&session, "admin.orders.status_updated").await?;
        }
        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
        Err(ApiError::Validation(errors)) => {
            for message in errors.all_messages() {
                Flash::error(&session, message).await?;
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update order status");
            Flash::error(&session, "admin.error.save_failed").await?;
        }
    }
    Ok(back)
}

#[cfg(test)]
mod tests {
    use bazaar_core::{CurrencyCode, Locale, Translator};

    use super::*;

    #[test]
    fn test_status_tabs_mark_active() {
        let ctx = PageContext {
            locale: Locale::En,
            i18n: Translator::new(Locale::En),
            currency: CurrencyCode::SAR,
            admin_name: None,
            flashes: Vec::new(),
            current_path: "/orders".into(),
            section: "orders",
            switch_locale_url: String::new(),
            switch_locale_name: "",
        };
        let tabs = status_tabs(Some(OrderStatus::Shipped), &ctx);
        assert_eq!(tabs.len(), 6);
        let active: Vec<&str> = tabs
            .iter()
            .filter(|t| t.active)
            .map(|t| t.url.as_str())
            .collect();
        assert_eq!(active, vec!["/orders?status=shipped"]);
    }
}
