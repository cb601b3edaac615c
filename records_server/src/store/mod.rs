//! Storage seam. Views and services only ever see [`RecordStore`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::entity::EntityKind;
use crate::record::Record;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} #{id} already exists")]
    Duplicate { kind: EntityKind, id: i32 },

    #[error("{kind} references a missing record: {detail}")]
    MissingReference { kind: EntityKind, detail: String },

    #[error("{kind}.{field}: expected {expected}")]
    Malformed {
        kind: EntityKind,
        field: &'static str,
        expected: &'static str,
    },

    #[error("connection pool: {0}")]
    Pool(String),

    #[error(transparent)]
    Query(#[from] diesel::result::Error),
}

/// Persistence for records of every kind.
///
/// Implementations must make `insert` atomic: the row and its link rows land
/// together or not at all.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    async fn insert(&self, record: Record) -> Result<(), StoreError>;

    /// All records of a kind, many-to-many ids included. Order is unspecified.
    async fn list(&self, kind: EntityKind) -> Result<Vec<Record>, StoreError>;

    async fn count(&self, kind: EntityKind) -> Result<i64, StoreError>;

    async fn contains(&self, kind: EntityKind, id: i32) -> Result<bool, StoreError>;
}
