//! Authentication extractors and helpers for admin.

use axum::{
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::{SessionExpired, clear_sentry_user, set_sentry_user};
use crate::models::{CurrentAdmin, Flash, keys};

/// Extractor that requires admin authentication.
///
/// If the admin is not logged in, returns a redirect to the login page
/// for HTML requests, or 401 Unauthorized for API requests.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Error returned when admin authentication is required but the user is not logged in.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        let admin: CurrentAdmin = session
            .get(keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                if parts.uri.path().starts_with("/api/") {
                    AdminAuthRejection::Unauthorized
                } else {
                    AdminAuthRejection::RedirectToLogin
                }
            })?;

        set_sentry_user(admin.id.as_i64(), &admin.email);
        Ok(Self(admin))
    }
}

/// Store the signed-in admin, rotating the session id first.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(keys::CURRENT_ADMIN, admin).await
}

/// Remove the admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentAdmin>(keys::CURRENT_ADMIN).await?;
    clear_sentry_user();
    Ok(())
}

/// Sign the admin out when a handler hit a backend 401.
///
/// Runs inside the session layer so the removal is persisted with the
/// redirect response.
pub async fn expire_rejected_sessions(session: Session, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.extensions().get::<SessionExpired>().is_some() {
        if let Err(e) = clear_current_admin(&session).await {
            tracing::warn!(error = %e, "Failed to clear expired admin session");
        }
        if let Err(e) = Flash::error(&session, "admin.session_expired").await {
            tracing::warn!(error = %e, "Failed to queue session expiry flash");
        }
    }
    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::{Router, body::Body, http::header::LOCATION, routing::get};
    use bazaar_core::UserId;
    use secrecy::SecretString;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    use super::*;

    async fn protected(RequireAdminAuth(admin): RequireAdminAuth) -> String {
        admin.name
    }

    fn app() -> Router {
        Router::new()
            .route("/orders", get(protected))
            .route("/api/ping", get(protected))
            .layer(SessionManagerLayer::new(MemoryStore::default()))
    }

    #[tokio::test]
    async fn test_html_requests_redirect_to_login() {
        let response = app()
            .oneshot(Request::builder().uri("/orders").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_api_requests_get_401() {
        let response = app()
            .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_clear_current_admin() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let admin = CurrentAdmin {
            id: UserId::new(7),
            name: "Huda".into(),
            email: "huda@example.sa".into(),
            token: SecretString::from("tok"),
        };
        session.insert(keys::CURRENT_ADMIN, &admin).await.unwrap();
        clear_current_admin(&session).await.unwrap();
        assert!(
            session
                .get::<CurrentAdmin>(keys::CURRENT_ADMIN)
                .await
                .unwrap()
                .is_none()
        );
    }
}
