//! Customers: list and detail.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use bazaar_core::{Customer, CustomerId};
use tracing::instrument;

use super::list_or_empty;
use crate::error::Result;
use crate::listing::{self, HeaderView, ListQuery, Pagination, TableColumn};
use crate::middleware::{PageContext, RequireAdminAuth};
use crate::state::AppState;

const COLUMNS: [TableColumn; 7] = [
    TableColumn::sortable("id", "admin.field.id"),
    TableColumn::sortable("name", "admin.field.name"),
    TableColumn::sortable("email", "admin.field.email"),
    TableColumn::new("phone", "admin.field.phone"),
    TableColumn::sortable("orders_count", "admin.field.orders_count"),
    TableColumn::sortable("total_spent", "admin.field.total_spent"),
    TableColumn::sortable("created_at", "admin.field.created_at"),
];

/// Customer view for templates.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub orders_count: i64,
    pub total_spent: String,
    pub created_at: String,
    pub url: String,
    /// Orders list searched by this customer's email.
    pub orders_url: String,
}

impl CustomerView {
    #[must_use]
    pub fn new(customer: &Customer, ctx: &PageContext) -> Self {
        Self {
            id: customer.id.to_string(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone().unwrap_or_default(),
            orders_count: customer.orders_count,
            total_spent: ctx.price(customer.total_spent.unwrap_or_default()),
            created_at: customer
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            url: format!("/customers/{}", customer.id),
            orders_url: format!(
                "/orders?{}",
                url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("q", &customer.email)
                    .finish()
            ),
        }
    }
}

/// Customers list page template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub ctx: PageContext,
    pub headers: Vec<HeaderView>,
    pub customers: Vec<CustomerView>,
    pub total: usize,
    pub search: String,
    pub pagination: Option<Pagination>,
}

/// Customer detail template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/show.html")]
pub struct CustomerShowTemplate {
    pub ctx: PageContext,
    pub customer: CustomerView,
}

/// Customers list page handler.
///
/// The search text goes to the backend as well, then filters the fetched rows
/// again so the result is the same whether or not the backend honours it.
#[instrument(skip(admin, state, ctx))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut ctx: PageContext,
    Query(query): Query<ListQuery>,
) -> Result<CustomersIndexTemplate> {
    let customers = list_or_empty(
        state.api().customers(&admin.token, query.search()).await,
        &mut ctx,
        "customers",
    )?;
    let paged = listing::paginate(
        listing::apply(customers, &query),
        query.page(),
        state.config().page_size,
    );

    Ok(CustomersIndexTemplate {
        headers: listing::headers(&COLUMNS, &query, "/customers", ctx.i18n),
        customers: paged.items.iter().map(|c| CustomerView::new(c, &ctx)).collect(),
        total: paged.total,
        search: query.search().unwrap_or_default().to_string(),
        pagination: Pagination::new(&paged, &query, "/customers", ctx.i18n),
        ctx,
    })
}

/// Customer detail handler.
#[instrument(skip(admin, state, ctx), fields(customer_id = %id))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    ctx: PageContext,
    Path(id): Path<CustomerId>,
) -> Result<CustomerShowTemplate> {
    let customer = state.api().customer(&admin.token, id).await?;
    Ok(CustomerShowTemplate {
        customer: CustomerView::new(&customer, &ctx),
        ctx,
    })
}
