//! Category management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bazaar_core::{Category, CategoryId};
use tower_sessions::Session;
use tracing::instrument;

use super::{list_or_empty, save_failed};
use crate::api::ApiError;
use crate::error::{Result, audit};
use crate::forms::{CategoryForm, error_lines};
use crate::listing::{self, HeaderView, ListQuery, Pagination, TableColumn};
use crate::middleware::{PageContext, RequireAdminAuth};
use crate::models::{CurrentAdmin, Flash};
use crate::state::AppState;

const COLUMNS: [TableColumn; 4] = [
    TableColumn::sortable("id", "admin.field.id"),
    TableColumn::sortable("name", "admin.field.name"),
    TableColumn::sortable("products_count", "admin.field.products_count"),
    TableColumn::new("actions", "common.actions"),
];

/// Category row for tables.
#[derive(Debug, Clone)]
pub struct CategoryRowView {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    pub products_count: String,
    pub edit_url: String,
    pub delete_url: String,
}

impl From<&Category> for CategoryRowView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            name_ar: category.name_ar.clone().unwrap_or_default(),
            products_count: category
                .products_count
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
            edit_url: format!("/categories/{}/edit", category.id),
            delete_url: format!("/categories/{}/delete", category.id),
        }
    }
}

/// Categories list page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub ctx: PageContext,
    pub headers: Vec<HeaderView>,
    pub categories: Vec<CategoryRowView>,
    pub total: usize,
    pub search: String,
    pub pagination: Option<Pagination>,
}

/// Create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/form.html")]
pub struct CategoryFormTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub action: String,
    pub delete_url: Option<String>,
    pub form: CategoryForm,
}

impl CategoryFormTemplate {
    fn new(ctx: PageContext, id: Option<CategoryId>, form: CategoryForm) -> Self {
        let (title, action, delete_url) = match id {
            Some(id) => (
                ctx.i18n.t("admin.categories.edit").to_string(),
                format!("/categories/{id}"),
                Some(format!("/categories/{id}/delete")),
            ),
            None => (
                ctx.i18n.t("admin.categories.new").to_string(),
                "/categories".to_string(),
                None,
            ),
        };
        Self {
            ctx,
            title,
            action,
            delete_url,
            form,
        }
    }
}

/// Categories list page handler.
#[instrument(skip(admin, state, ctx))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut ctx: PageContext,
    Query(query): Query<ListQuery>,
) -> Result<CategoriesIndexTemplate> {
    let categories =
        list_or_empty(state.api().categories(&admin.token).await, &mut ctx, "categories")?;
    let paged = listing::paginate(
        listing::apply(categories, &query),
        query.page(),
        state.config().page_size,
    );

    Ok(CategoriesIndexTemplate {
        headers: listing::headers(&COLUMNS, &query, "/categories", ctx.i18n),
        categories: paged.items.iter().map(CategoryRowView::from).collect(),
        total: paged.total,
        search: query.search().unwrap_or_default().to_string(),
        pagination: Pagination::new(&paged, &query, "/categories", ctx.i18n),
        ctx,
    })
}

/// Empty create form.
#[instrument(skip(_admin, ctx))]
pub async fn new(RequireAdminAuth(_admin): RequireAdminAuth, ctx: PageContext) -> CategoryFormTemplate {
    CategoryFormTemplate::new(ctx, None, CategoryForm::default())
}

async fn save(
    state: &AppState,
    admin: &CurrentAdmin,
    mut ctx: PageContext,
    session: &Session,
    id: Option<CategoryId>,
    form: CategoryForm,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            for line in error_lines(&errors, ctx.i18n) {
                ctx.push_error(&line);
            }
            let page = CategoryFormTemplate::new(ctx, id, form);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let result = match id {
        Some(id) => state.api().update_category(&admin.token, id, &input).await,
        None => state.api().create_category(&admin.token, &input).await,
    };

    match result {
        Ok(category) => {
            let (action, key) = if id.is_some() {
                ("update", "admin.categories.updated")
            } else {
                ("create", "admin.categories.created")
            };
            audit(action, "category", category.id);
            Flash::success(session, key).await?;
            Ok(Redirect::to("/categories").into_response())
        }
        Err(e) => {
            let status = save_failed(e, &mut ctx)?;
            Ok((status, CategoryFormTemplate::new(ctx, id, form)).into_response())
        }
    }
}

/// Create a category.
#[instrument(skip(admin, state, ctx, session, form))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    ctx: PageContext,
    session: Session,
    Form(form): Form<CategoryForm>,
) -> Result<Response> {
    save(&state, &admin, ctx, &session, None, form).await
}

/// Edit form prefilled from the backend.
#[instrument(skip(admin, state, ctx, session), fields(category_id = %id))]
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    ctx: PageContext,
    session: Session,
    Path(id): Path<CategoryId>,
) -> Result<Response> {
    match state.api().category(&admin.token, id).await {
        Ok(category) => Ok(CategoryFormTemplate::new(
            ctx,
            Some(id),
            CategoryForm::from_category(&category),
        )
        .into_response()),
        Err(ApiError::NotFound(_)) => {
            Flash::error(&session, "admin.error.not_found").await?;
            Ok(Redirect::to("/categories").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Update a category.
#[instrument(skip(admin, state, ctx, session, form), fields(category_id = %id))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    ctx: PageContext,
    session: Session,
    Path(id): Path<CategoryId>,
    Form(form): Form<CategoryForm>,
) -> Result<Response> {
    save(&state, &admin, ctx, &session, Some(id), form).await
}

/// Delete a category and return to the list.
///
/// Backends usually refuse to delete a category that still has products;
/// their message is shown as-is.
#[instrument(skip(admin, state, session), fields(category_id = %id))]
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<CategoryId>,
) -> Result<Redirect> {
    match state.api().delete_category(&admin.token, id).await {
        Ok(()) => {
            audit("delete", "category", id);
            Flash::success(&session, "admin.categories.deleted").await?;
        }
        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
        Err(ApiError::Validation(errors)) => {
            for message in errors.all_messages() {
                Flash::error(&session, message).await?;
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete category");
            Flash::error(&session, "admin.error.delete_failed").await?;
        }
    }
    Ok(Redirect::to("/categories"))
}
