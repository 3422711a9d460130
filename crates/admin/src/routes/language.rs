//! Dashboard language switching.

use axum::{
    extract::{Path, Query},
    response::Redirect,
};
use bazaar_core::Locale;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::safe_path;
use crate::error::Result;
use crate::models::keys;

#[derive(Debug, Deserialize)]
pub struct SwitchQuery {
    pub return_to: Option<String>,
}

/// Store the chosen locale and return to `return_to`, else the dashboard.
///
/// Available before sign-in so the login page can be switched too.
#[instrument(skip(session))]
pub async fn switch(
    Path(code): Path<String>,
    Query(query): Query<SwitchQuery>,
    session: Session,
) -> Result<Redirect> {
    match code.parse::<Locale>() {
        Ok(locale) => session.insert(keys::LOCALE, locale).await?,
        Err(e) => tracing::debug!(error = %e, "Ignoring unknown locale"),
    }
    let target = query
        .return_to
        .as_deref()
        .and_then(safe_path)
        .unwrap_or("/");
    Ok(Redirect::to(target))
}
