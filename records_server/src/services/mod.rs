//! Request-level operations over the store: choices, submissions, listings.

pub mod choices;
pub mod listing;
pub mod record_service;
