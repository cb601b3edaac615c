//! Dashboard handler.

use axum::extract::State;
use axum::response::Html;

use super::{AppState, HOME};
use crate::dashboard;
use crate::error::AppError;
use crate::views::home_page;

pub async fn show(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let cards = dashboard::cards(state.store.as_ref()).await?;
    crate::metrics::page_viewed(HOME);
    Ok(Html(home_page::render(&state.config.site_title, &cards)))
}
