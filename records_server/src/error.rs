//! Server-side failures surfaced as HTTP 500 responses.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::registry::RegistryError;
use crate::store::StoreError;
use crate::uploads::UploadError;

const SERVER_ERROR_PAGE: &str = "<!DOCTYPE html><title>Server error</title><h1>Server error</h1><p>The request could not be completed.</p>";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] RegistryError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("upload error: {0}")]
    Upload(#[from] UploadError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Config(e) => tracing::error!(error = %e, "Misconfigured request"),
            AppError::Store(e) => tracing::error!(error = %e, "Store failure"),
            AppError::Upload(e) => tracing::error!(error = %e, "Upload failure"),
        }
        crate::metrics::error_recorded(match self {
            AppError::Config(_) => "config",
            AppError::Store(_) => "store",
            AppError::Upload(_) => "upload",
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Html(SERVER_ERROR_PAGE)).into_response()
    }
}
