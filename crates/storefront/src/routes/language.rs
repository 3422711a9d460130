//! Language switching.

use axum::{
    extract::{Path, Query},
    http::HeaderMap,
    response::Redirect,
};
use bazaar_core::Locale;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::redirect_back;
use crate::error::Result;
use crate::models::session::{self, keys};

#[derive(Debug, Deserialize)]
pub struct SwitchQuery {
    pub return_to: Option<String>,
}

/// Store the chosen locale and go back to where the shopper was.
///
/// Unknown codes leave the current choice untouched.
#[instrument(skip(session, headers, query))]
pub async fn switch(
    Path(code): Path<String>,
    Query(query): Query<SwitchQuery>,
    session: Session,
    headers: HeaderMap,
) -> Result<Redirect> {
    match code.parse::<Locale>() {
        Ok(locale) => session::save(&session, keys::LOCALE, &locale).await?,
        Err(e) => tracing::debug!(error = %e, "Ignoring unknown locale"),
    }
    Ok(redirect_back(&headers, query.return_to.as_deref(), "/"))
}
