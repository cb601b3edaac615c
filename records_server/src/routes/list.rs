//! Record list pages.

use axum::response::Html;
use serde::Deserialize;

use super::AppState;
use crate::entity::EntityKind;
use crate::error::AppError;
use crate::registry::page_config;
use crate::services::listing;
use crate::views::list_page;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

impl ListQuery {
    /// Requested page; anything unparseable means the first page.
    pub fn page(&self) -> Option<usize> {
        self.page.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}

pub async fn show(
    kind: EntityKind,
    state: AppState,
    query: ListQuery,
) -> Result<Html<String>, AppError> {
    let table = listing::build_table(
        state.store.as_ref(),
        kind,
        query.page(),
        state.config.page_size,
    )
    .await?;
    crate::metrics::page_viewed(page_config(kind).list_url_name);

    Ok(Html(list_page::render(
        &state.config.site_title,
        page_config(kind),
        &table,
    )))
}
