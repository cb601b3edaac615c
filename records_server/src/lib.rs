//! ZisoDB: a due-diligence records workspace.
//!
//! Nine record kinds (employees, next of kin, companies, directors, court
//! cases, criminal records, previous transactions, employment records and
//! customers) are captured through generic create forms and browsed through
//! generic list pages. Both are driven by the declarative schema in
//! [`entity`] and the display metadata in [`registry`].

pub mod config;
pub mod dashboard;
pub mod entity;
pub mod error;
pub mod forms;
pub mod metrics;
pub mod migration;
pub mod models;
pub mod record;
pub mod registry;
pub mod routes;
pub mod schema;
pub mod services;
pub mod store;
pub mod uploads;
pub mod views;

pub use routes::{router, AppState};
