//! Contact form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bazaar_core::{Locale, Translator};
use tower_sessions::Session;
use tracing::instrument;

use super::submit_failure;
use crate::backend::BackendError;
use crate::error::{Result, add_breadcrumb};
use crate::forms::{ContactForm, FormErrors};
use crate::middleware::{PageContext, ShopperLocale};
use crate::models::Flash;
use crate::state::AppState;

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact/show.html")]
pub struct ContactTemplate {
    pub ctx: PageContext,
    pub form: ContactForm,
    pub errors: FormErrors,
}

/// Display the contact form.
#[instrument(skip(ctx))]
pub async fn show(ctx: PageContext) -> ContactTemplate {
    ContactTemplate {
        ctx,
        form: ContactForm::default(),
        errors: FormErrors::default(),
    }
}

async fn rerender(
    state: &AppState,
    session: &Session,
    locale: Locale,
    status: StatusCode,
    form: ContactForm,
    errors: impl FnOnce(Translator) -> FormErrors,
) -> Result<Response> {
    let ctx = PageContext::load(state, session, locale, "/contact".to_string()).await?;
    let page = ContactTemplate {
        errors: errors(ctx.i18n),
        ctx,
        form,
    };
    Ok((status, page).into_response())
}

/// Send the message, then redirect back with a confirmation.
///
/// The page context is built only when the form is shown again, so a
/// redirect leaves the flash queue for the next page.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    ShopperLocale(locale): ShopperLocale,
    session: Session,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let invalid = StatusCode::UNPROCESSABLE_ENTITY;
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => {
            return rerender(&state, &session, locale, invalid, form, |i18n| {
                FormErrors::with_fallback(&errors, i18n, "contact.fix_errors")
            })
            .await;
        }
    };

    match state.backend().send_contact(&request).await {
        Ok(()) => {
            add_breadcrumb("contact", "Message sent", None);
            Flash::success(&session, "contact.sent").await?;
            Ok(Redirect::to("/contact").into_response())
        }
        Err(BackendError::Validation(errors)) => {
            rerender(&state, &session, locale, invalid, form, |i18n| {
                FormErrors::with_fallback(&errors, i18n, "contact.fix_errors")
            })
            .await
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to send contact message");
            let (status, key) = submit_failure(&e, "contact.failed");
            rerender(&state, &session, locale, status, form, |i18n| {
                FormErrors::with_summary(i18n.t(key))
            })
            .await
        }
    }
}
