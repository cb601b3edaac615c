//! In-process store for dev mode and tests.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RecordStore, StoreError};
use crate::entity::{EntityKind, FieldKind};
use crate::record::{Record, Value};

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<EntityKind, BTreeMap<i32, Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_references(
    tables: &HashMap<EntityKind, BTreeMap<i32, Record>>,
    record: &Record,
) -> Result<(), StoreError> {
    let exists = |target: EntityKind, id: i32| {
        tables
            .get(&target)
            .is_some_and(|rows| rows.contains_key(&id))
    };

    for field in record.kind().fields() {
        let missing = match (field.kind, record.get(field.name)) {
            (FieldKind::ForeignKey(target), Some(Value::Ref(id))) => {
                (!exists(target, *id)).then_some((target, *id))
            }
            (FieldKind::ManyToMany(link), Some(Value::Refs(ids))) => ids
                .iter()
                .find(|id| !exists(link.target, **id))
                .map(|id| (link.target, *id)),
            (FieldKind::ForeignKey(target), None | Some(Value::Null)) if field.required => {
                return Err(StoreError::MissingReference {
                    kind: record.kind(),
                    detail: format!("{} is required ({target})", field.name),
                });
            }
            _ => None,
        };

        if let Some((target, id)) = missing {
            return Err(StoreError::MissingReference {
                kind: record.kind(),
                detail: format!("{target} #{id} via {}", field.name),
            });
        }
    }
    Ok(())
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, record: Record) -> Result<(), StoreError> {
        let kind = record.kind();
        let id = record.id()?;

        let mut tables = self.tables.write().await;
        if tables.get(&kind).is_some_and(|rows| rows.contains_key(&id)) {
            return Err(StoreError::Duplicate { kind, id });
        }
        check_references(&tables, &record)?;

        tables.entry(kind).or_default().insert(id, record);
        Ok(())
    }

    async fn list(&self, kind: EntityKind) -> Result<Vec<Record>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(&kind)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn count(&self, kind: EntityKind) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.get(&kind).map_or(0, |rows| rows.len() as i64))
    }

    async fn contains(&self, kind: EntityKind, id: i32) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.get(&kind).is_some_and(|rows| rows.contains_key(&id)))
    }
}
