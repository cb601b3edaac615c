//! HTTP surface: home, per-kind create forms and record lists, media.

pub mod form;
pub mod home;
pub mod list;

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Query, Request, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::entity::EntityKind;
use crate::store::RecordStore;
use crate::uploads::AttachmentStore;

const NOT_FOUND_PAGE: &str = "<!DOCTYPE html><title>Not found</title><h1>Not found</h1><p>The requested page does not exist. <a href=\"/\">Back to the dashboard</a></p>";

/// Route name of the dashboard.
pub const HOME: &str = "home";

/// Headroom for multipart framing and text fields on top of the attachments.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Shared state for route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub attachments: AttachmentStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: AppConfig) -> Self {
        Self {
            store,
            attachments: AttachmentStore::new(config.media_root.clone()),
            config: Arc::new(config),
        }
    }
}

/// Resolve a route name (`home`, `<key>`, `<key>_list`) to its path.
pub fn reverse(name: &str) -> Option<&'static str> {
    if name == HOME {
        return Some("/");
    }
    EntityKind::ALL.into_iter().find_map(|kind| {
        if name == kind.key() {
            Some(kind.create_path())
        } else if name.strip_suffix("_list") == Some(kind.key()) {
            Some(kind.list_path())
        } else {
            None
        }
    })
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let mut app = Router::new().route("/", get(home::show));

    for kind in EntityKind::ALL {
        app = app
            .route(
                kind.create_path(),
                get(move |State(state): State<AppState>, headers: HeaderMap| {
                    form::show(kind, state, headers)
                })
                .post(move |State(state): State<AppState>, request: Request| {
                    form::submit(kind, state, request)
                }),
            )
            .route(
                kind.list_path(),
                get(
                    move |State(state): State<AppState>, Query(query): Query<list::ListQuery>| {
                        list::show(kind, state, query)
                    },
                ),
            );
    }

    let attachment_fields = EntityKind::ALL
        .iter()
        .map(|kind| kind.fields().iter().filter(|f| f.kind.is_attachment()).count())
        .max()
        .unwrap_or_default();
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_mul(attachment_fields.max(1))
        .saturating_add(FORM_OVERHEAD_BYTES);

    app.nest_service("/media", ServeDir::new(state.attachments.root()))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_names_resolve() {
        assert_eq!(reverse("home"), Some("/"));
        assert_eq!(reverse("court_cases"), Some("/court-cases/"));
        assert_eq!(reverse("court_cases_list"), Some("/court-cases/records/"));
        assert_eq!(reverse("court_cases_records"), None);
        assert_eq!(reverse("_list"), None);
    }

    #[test]
    fn every_kind_has_both_routes() {
        for kind in EntityKind::ALL {
            assert_eq!(reverse(kind.key()), Some(kind.create_path()));
            assert_eq!(reverse(&format!("{}_list", kind.key())), Some(kind.list_path()));
        }
    }
}
