//! Prometheus metrics for the records workspace.

use metrics::counter;

use crate::entity::EntityKind;

/// Initialize metrics exporter (Prometheus).
pub fn init_metrics() {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    if let Err(e) = builder.install() {
        tracing::warn!("Failed to install Prometheus exporter: {}", e);
    }
}

/// Record a successfully saved submission.
pub fn record_created(kind: EntityKind) {
    counter!("zisodb_records_created_total", "entity" => kind.key()).increment(1);
}

/// Record a submission rejected by validation.
pub fn form_rejected(kind: EntityKind) {
    counter!("zisodb_form_rejections_total", "entity" => kind.key()).increment(1);
}

/// Record a rendered page (`home`, `<key>` or `<key>_list`).
pub fn page_viewed(page: &str) {
    counter!("zisodb_page_views_total", "page" => page.to_string()).increment(1);
}

/// Record a server-side error.
pub fn error_recorded(category: &'static str) {
    counter!("zisodb_errors_total", "category" => category).increment(1);
}
