//! GET/POST handlers for the create forms.

use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use serde::Serialize;

use super::AppState;
use crate::entity::EntityKind;
use crate::error::AppError;
use crate::forms::submission::BodyFormat;
use crate::forms::{FormErrors, Limits, Submission};
use crate::registry::page_config;
use crate::services::choices;
use crate::services::record_service::{self, Outcome};
use crate::views::form_page::{self, FormView};
use crate::views::Flash;

const FLASH_COOKIE: &str = "zisodb_flash";
const MACHINE_INVALID: &str = "Please review the highlighted fields.";
const BROWSER_INVALID: &str = "Please review the highlighted fields and try again.";

#[derive(Debug, Serialize)]
pub struct SubmitResponse<'a> {
    pub success: bool,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<&'a FormErrors>,
}

/// Render the unbound form, consuming a pending success notice if present.
pub async fn show(
    kind: EntityKind,
    state: AppState,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let config = page_config(kind);
    let choices = choices::load(state.store.as_ref(), kind).await?;
    let saved = has_flash(&headers, kind);

    let html = form_page::render(&FormView {
        site_title: &state.config.site_title,
        config,
        action: kind.create_path(),
        choices: &choices,
        submitted: None,
        errors: None,
        flash: saved.then_some(Flash::Success(config.success_message)),
    });
    crate::metrics::page_viewed(kind.key());

    let mut response = Html(html).into_response();
    if saved {
        response
            .headers_mut()
            .insert(header::SET_COOKIE, flash_cookie(kind, ""));
    }
    Ok(response)
}

pub async fn submit(
    kind: EntityKind,
    state: AppState,
    request: Request,
) -> Result<Response, AppError> {
    let machine = is_machine_request(request.headers());
    let limits = Limits {
        max_upload_bytes: state.config.max_upload_bytes,
    };

    let submission = match Submission::read(request).await {
        Ok(submission) => submission,
        Err(e) => {
            tracing::info!(entity = %kind, error = %e, "Unreadable submission");
            crate::metrics::form_rejected(kind);
            let errors = FormErrors::non_field(e.to_string());
            return invalid(kind, &state, machine, None, &errors).await;
        }
    };

    let outcome = record_service::submit(
        state.store.as_ref(),
        &state.attachments,
        limits,
        kind,
        &submission,
    )
    .await?;

    match outcome {
        Outcome::Saved(_) => Ok(saved(kind, machine)),
        Outcome::Invalid(errors) => {
            invalid(kind, &state, machine, Some(&submission), &errors).await
        }
    }
}

/// Script clients flag themselves with `X-Requested-With`; JSON bodies count too.
pub fn is_machine_request(headers: &HeaderMap) -> bool {
    let ajax = headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));
    ajax || matches!(BodyFormat::from_headers(headers), Ok(BodyFormat::Json))
}

fn saved(kind: EntityKind, machine: bool) -> Response {
    let message = page_config(kind).success_message;
    if machine {
        return (
            StatusCode::CREATED,
            Json(SubmitResponse {
                success: true,
                message,
                errors: None,
            }),
        )
            .into_response();
    }

    let mut response = Redirect::to(kind.create_path()).into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, flash_cookie(kind, kind.key()));
    response
}

async fn invalid(
    kind: EntityKind,
    state: &AppState,
    machine: bool,
    submitted: Option<&Submission>,
    errors: &FormErrors,
) -> Result<Response, AppError> {
    if machine {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(SubmitResponse {
                success: false,
                message: MACHINE_INVALID,
                errors: Some(errors),
            }),
        )
            .into_response());
    }

    let choices = choices::load(state.store.as_ref(), kind).await?;
    let html = form_page::render(&FormView {
        site_title: &state.config.site_title,
        config: page_config(kind),
        action: kind.create_path(),
        choices: &choices,
        submitted,
        errors: Some(errors),
        flash: Some(Flash::Error(BROWSER_INVALID)),
    });
    Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
}

fn has_flash(headers: &HeaderMap, kind: EntityKind) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == FLASH_COOKIE && value == kind.key())
}

/// Set (non-empty `value`) or clear the notice cookie, scoped to the form path.
fn flash_cookie(kind: EntityKind, value: &str) -> HeaderValue {
    let max_age = if value.is_empty() { 0 } else { 60 };
    let cookie = format!(
        "{FLASH_COOKIE}={value}; Path={}; Max-Age={max_age}; HttpOnly; SameSite=Lax",
        kind.create_path()
    );
    // Keys and paths are ASCII literals.
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_requests_are_detected() {
        let mut headers = HeaderMap::new();
        assert!(!is_machine_request(&headers));

        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        assert!(is_machine_request(&headers));

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(is_machine_request(&headers));
    }

    #[test]
    fn flash_cookie_is_scoped_to_its_kind() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; zisodb_flash=company"),
        );
        assert!(has_flash(&headers, EntityKind::Company));
        assert!(!has_flash(&headers, EntityKind::Director));

        let set = flash_cookie(EntityKind::Company, "company");
        assert_eq!(
            set.to_str().unwrap(),
            "zisodb_flash=company; Path=/company/; Max-Age=60; HttpOnly; SameSite=Lax"
        );
    }
}
