//! Sign in and sign out.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use tower_sessions::Session;
use tracing::instrument;

use crate::api::ApiError;
use crate::error::{Result, audit, set_sentry_user};
use crate::middleware::{PageContext, clear_current_admin, set_current_admin};
use crate::models::{CurrentAdmin, Flash, keys};
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
    pub email: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(deserialize_with = "secret_password")]
    pub password: SecretString,
}

fn secret_password<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

/// Display the login page. Signed-in admins go straight to the dashboard.
#[instrument(skip(ctx, session))]
pub async fn login_page(ctx: PageContext, session: Session) -> Result<Response> {
    let admin: Option<CurrentAdmin> = session.get(keys::CURRENT_ADMIN).await?;
    if admin.is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(LoginTemplate {
        ctx,
        email: String::new(),
    }
    .into_response())
}

/// Exchange credentials for a backend token and start a session.
///
/// Only users whose role is `admin` are let in. A non-admin token is revoked
/// straight away.
#[instrument(skip(state, ctx, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    mut ctx: PageContext,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let email = form.email.trim().to_string();
    let failed = |mut ctx: PageContext, key: &str, email: String, status: StatusCode| {
        ctx.push_error(key);
        (status, LoginTemplate { ctx, email }).into_response()
    };

    if email.is_empty() || form.password.expose_secret().is_empty() {
        return Ok(failed(ctx, "admin.login.failed", email, StatusCode::UNPROCESSABLE_ENTITY));
    }

    let response = match state.api().login(&email, form.password.expose_secret()).await {
        Ok(response) => response,
        Err(ApiError::Unauthorized | ApiError::Validation(_)) => {
            tracing::info!("Login rejected by backend");
            return Ok(failed(ctx, "admin.login.failed", email, StatusCode::UNAUTHORIZED));
        }
        Err(ApiError::RateLimited(_)) => {
            return Ok(failed(
                ctx,
                "error.too_many_requests",
                email,
                StatusCode::TOO_MANY_REQUESTS,
            ));
        }
        Err(e) => {
            tracing::error!(error = %e, "Login request failed");
            ctx.push_error("error.backend_unavailable");
            return Ok((StatusCode::BAD_GATEWAY, LoginTemplate { ctx, email }).into_response());
        }
    };

    if !response.user.is_admin() {
        tracing::warn!(user_id = %response.user.id, "Non-admin login attempt");
        let token = SecretString::from(response.token);
        if let Err(e) = state.api().logout(&token).await {
            tracing::debug!(error = %e, "Failed to revoke non-admin token");
        }
        return Ok(failed(ctx, "admin.login.not_admin", email, StatusCode::FORBIDDEN));
    }

    let admin = CurrentAdmin::new(response.user, response.token);
    set_current_admin(&session, &admin).await?;
    set_sentry_user(admin.id.as_i64(), &admin.email);
    audit("login", "admin", admin.id);

    Ok(Redirect::to("/").into_response())
}

/// Revoke the token, clear the session and go back to the login page.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let admin: Option<CurrentAdmin> = session.get(keys::CURRENT_ADMIN).await?;
    if let Some(admin) = admin {
        // The local session ends either way
        if let Err(e) = state.api().logout(&admin.token).await {
            tracing::warn!(error = %e, "Backend logout failed");
        }
        audit("logout", "admin", admin.id);
    }
    clear_current_admin(&session).await?;
    Flash::success(&session, "admin.logged_out").await?;
    Ok(Redirect::to("/login"))
}
