//! Typed rows for the Postgres store, one per entity table.
//!
//! Each row converts to and from the kind-agnostic [`Record`](crate::record::Record).
//! Many-to-many ids live in link tables and are attached by the store.

pub mod company;
pub mod court_case;
pub mod criminal_record;
pub mod customer;
pub mod director;
pub mod employee;
pub mod employment_record;
pub mod next_of_kin;
pub mod previous_transaction;
