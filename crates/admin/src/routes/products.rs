//! Product management: list, create, edit and delete.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use bazaar_core::{Category, Product, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use super::{list_or_empty, save_failed};
use crate::api::ApiError;
use crate::config::AdminConfig;
use crate::error::{Result, audit};
use crate::forms::{ProductForm, error_lines};
use crate::listing::{self, HeaderView, ListQuery, Pagination, TableColumn};
use crate::middleware::{PageContext, RequireAdminAuth};
use crate::models::{CurrentAdmin, Flash};
use crate::state::AppState;

const COLUMNS: [TableColumn; 6] = [
    TableColumn::sortable("id", "admin.field.id"),
    TableColumn::sortable("name", "admin.field.name"),
    TableColumn::sortable("category", "admin.field.category"),
    TableColumn::sortable("price", "admin.field.price"),
    TableColumn::sortable("stock", "admin.field.stock"),
    TableColumn::new("actions", "common.actions"),
];

/// Product row for tables.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub featured: bool,
    pub image: Option<String>,
    pub edit_url: String,
    pub delete_url: String,
}

impl ProductRowView {
    #[must_use]
    pub fn new(product: &Product, ctx: &PageContext, config: &AdminConfig) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.localized_name(ctx.locale).to_string(),
            category: product.category.as_ref().map_or_else(
                || ctx.i18n.t("admin.no_category").to_string(),
                |c| c.localized_name(ctx.locale).to_string(),
            ),
            price: ctx.price(product.effective_price()),
            stock: product
                .stock
                .map_or_else(|| "-".to_string(), |s| s.to_string()),
            featured: product.is_featured,
            image: product
                .image
                .as_deref()
                .and_then(|path| config.resolve_image(path)),
            edit_url: format!("/products/{}/edit", product.id),
            delete_url: format!("/products/{}/delete", product.id),
        }
    }
}

/// `<option>` for the category select.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Products list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub ctx: PageContext,
    pub headers: Vec<HeaderView>,
    pub products: Vec<ProductRowView>,
    pub total: usize,
    pub search: String,
    pub pagination: Option<Pagination>,
}

/// Create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub action: String,
    pub delete_url: Option<String>,
    pub form: ProductForm,
    pub categories: Vec<CategoryOption>,
}

/// Products list page handler.
#[instrument(skip(admin, state, ctx))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut ctx: PageContext,
    Query(query): Query<ListQuery>,
) -> Result<ProductsIndexTemplate> {
    let products = list_or_empty(state.api().products(&admin.token).await, &mut ctx, "products")?;
    let filtered = listing::apply(products, &query);
    let paged = listing::paginate(filtered, query.page(), state.config().page_size);

    Ok(ProductsIndexTemplate {
        headers: listing::headers(&COLUMNS, &query, "/products", ctx.i18n),
        products: paged
            .items
            .iter()
            .map(|p| ProductRowView::new(p, &ctx, state.config()))
            .collect(),
        total: paged.total,
        search: query.search().unwrap_or_default().to_string(),
        pagination: Pagination::new(&paged, &query, "/products", ctx.i18n),
        ctx,
    })
}

async fn render_form(
    state: &AppState,
    admin: &CurrentAdmin,
    mut ctx: PageContext,
    product: Option<ProductId>,
    form: ProductForm,
) -> Result<ProductFormTemplate> {
    let categories: Vec<Category> =
        list_or_empty(state.api().categories(&admin.token).await, &mut ctx, "categories")?;
    let categories = categories
        .iter()
        .map(|c| CategoryOption {
            id: c.id.to_string(),
            name: c.localized_name(ctx.locale).to_string(),
            selected: form.is_category(&c.id),
        })
        .collect();

    let (title, action, delete_url) = match product {
        Some(id) => (
            ctx.i18n.t("admin.products.edit").to_string(),
            format!("/products/{id}"),
            Some(format!("/products/{id}/delete")),
        ),
        None => (
            ctx.i18n.t("admin.products.new").to_string(),
            "/products".to_string(),
            None,
        ),
    };

    Ok(ProductFormTemplate {
        ctx,
        title,
        action,
        delete_url,
        form,
        categories,
    })
}

/// Empty create form.
#[instrument(skip(admin, state, ctx))]
pub async fn new(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    ctx: PageContext,
) -> Result<ProductFormTemplate> {
    render_form(&state, &admin, ctx, None, ProductForm::default()).await
}

/// Validate and save; re-render with errors or go back to the list.
async fn save(
    state: &AppState,
    admin: &CurrentAdmin,
    mut ctx: PageContext,
    session: &Session,
    id: Option<ProductId>,
    form: ProductForm,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            for line in error_lines(&errors, ctx.i18n) {
                ctx.push_error(&line);
            }
            let page = render_form(state, admin, ctx, id, form).await?;
            return Ok((axum::http::StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let result = match id {
        Some(id) => state.api().update_product(&admin.token, id, &input).await,
        None => state.api().create_product(&admin.token, &input).await,
    };

    match result {
        Ok(product) => {
            let (action, key) = if id.is_some() {
                ("update", "admin.products.updated")
            } else {
                ("create", "admin.products.created")
            };
            audit(action, "product", product.id);
            Flash::success(session, key).await?;
            Ok(Redirect::to("/products").into_response())
        }
        Err(e) => {
            let status = save_failed(e, &mut ctx)?;
            let page = render_form(state, admin, ctx, id, form).await?;
            Ok((status, page).into_response())
        }
    }
}

/// Create a product.
#[instrument(skip(admin, state, ctx, session, form))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    ctx: PageContext,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    save(&state, &admin, ctx, &session, None, form).await
}

/// Edit form prefilled from the backend.
#[instrument(skip(admin, state, ctx, session), fields(product_id = %id))]
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    ctx: PageContext,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Response> {
    match state.api().product(&admin.token, id).await {
        Ok(product) => {
            let form = ProductForm::from_product(&product);
            Ok(render_form(&state, &admin, ctx, Some(id), form)
                .await?
                .into_response())
        }
        Err(ApiError::NotFound(_)) => {
            Flash::error(&session, "admin.error.not_found").await?;
            Ok(Redirect::to("/products").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Update a product.
#[instrument(skip(admin, state, ctx, session, form), fields(product_id = %id))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    ctx: PageContext,
    session: Session,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    save(&state, &admin, ctx, &session, Some(id), form).await
}

/// Delete a product and return to the list.
#[instrument(skip(admin, state, session), fields(product_id = %id))]
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Redirect> {
    match state.api().delete_product(&admin.token, id).await {
        Ok(()) => {
            audit("delete", "product", id);
            Flash::success(&session, "admin.products.deleted").await?;
        }
        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
        Err(ApiError::Validation(errors)) => {
            for message in errors.all_messages() {
                Flash::error(&session, message).await?;
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete product");
            Flash::error(&session, "admin.error.delete_failed").await?;
        }
    }
    Ok(Redirect::to("/products"))
}
