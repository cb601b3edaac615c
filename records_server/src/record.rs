//! Kind-agnostic record values passed between forms, stores and views.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::entity::{EntityKind, FieldKind, Link};
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i32),
    Text(String),
    Date(NaiveDate),
    Bool(bool),
    /// Foreign key to another record's id.
    Ref(i32),
    /// Many-to-many link ids.
    Refs(Vec<i32>),
}

impl Value {
    /// True for values a table cell shows as an em-dash.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(text) => text.is_empty(),
            Value::Refs(ids) => ids.is_empty(),
            _ => false,
        }
    }

    /// Canonical string form.
    pub fn to_plain(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int(n) | Value::Ref(n) => n.to_string(),
            Value::Text(text) => text.clone(),
            Value::Date(date) => date.format("%Y-%m-%d").to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Refs(ids) => ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: EntityKind,
    values: BTreeMap<&'static str, Value>,
}

impl Record {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            values: BTreeMap::new(),
        }
    }

    /// Builder form of [`Record::set`].
    pub fn with(mut self, field: &'static str, value: Value) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &'static str, value: Value) {
        self.values.insert(field, value);
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Primary key value.
    pub fn id(&self) -> Result<i32, StoreError> {
        self.int(self.kind.primary_key().name)
    }

    pub fn int(&self, field: &'static str) -> Result<i32, StoreError> {
        match self.get(field) {
            Some(Value::Int(n)) => Ok(*n),
            _ => Err(self.malformed(field, "integer")),
        }
    }

    pub fn text(&self, field: &'static str) -> Result<String, StoreError> {
        match self.get(field) {
            Some(Value::Text(text)) => Ok(text.clone()),
            _ => Err(self.malformed(field, "text")),
        }
    }

    /// Nullable text; a missing field reads as `None`.
    pub fn opt_text(&self, field: &'static str) -> Result<Option<String>, StoreError> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Text(text)) => Ok(Some(text.clone())),
            _ => Err(self.malformed(field, "text or null")),
        }
    }

    pub fn date(&self, field: &'static str) -> Result<NaiveDate, StoreError> {
        match self.get(field) {
            Some(Value::Date(date)) => Ok(*date),
            _ => Err(self.malformed(field, "date")),
        }
    }

    pub fn reference(&self, field: &'static str) -> Result<i32, StoreError> {
        match self.get(field) {
            Some(Value::Ref(id)) => Ok(*id),
            _ => Err(self.malformed(field, "reference")),
        }
    }

    pub fn opt_reference(&self, field: &'static str) -> Result<Option<i32>, StoreError> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Ref(id)) => Ok(Some(*id)),
            _ => Err(self.malformed(field, "reference or null")),
        }
    }

    /// Link ids for a many-to-many field; a missing field reads as empty.
    pub fn refs(&self, field: &str) -> &[i32] {
        match self.get(field) {
            Some(Value::Refs(ids)) => ids.as_slice(),
            _ => &[],
        }
    }

    /// Every many-to-many field of this kind with its current ids.
    pub fn links(&self) -> impl Iterator<Item = (&'static str, Link, &[i32])> + '_ {
        self.kind.fields().iter().filter_map(move |field| match field.kind {
            FieldKind::ManyToMany(link) => Some((field.name, link, self.refs(field.name))),
            _ => None,
        })
    }

    fn malformed(&self, field: &'static str, expected: &'static str) -> StoreError {
        StoreError::Malformed {
            kind: self.kind,
            field,
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_detected() {
        assert!(Value::Null.is_empty());
        assert!(Value::Text(String::new()).is_empty());
        assert!(Value::Refs(Vec::new()).is_empty());
        assert!(!Value::Int(0).is_empty());
        assert!(!Value::Ref(3).is_empty());
    }

    #[test]
    fn typed_accessors_reject_mismatches() {
        let record = Record::new(EntityKind::Director)
            .with("director_id", Value::Int(4))
            .with("director_first_name", Value::Int(9));
        assert_eq!(record.id().unwrap(), 4);
        assert!(matches!(
            record.text("director_first_name"),
            Err(StoreError::Malformed { field: "director_first_name", .. })
        ));
        assert_eq!(record.opt_text("director_passport_number").unwrap(), None);
    }

    #[test]
    fn links_cover_every_many_field() {
        let record = Record::new(EntityKind::Company).with("directors", Value::Refs(vec![1, 2]));
        let links: Vec<_> = record.links().map(|(name, _, ids)| (name, ids.len())).collect();
        assert_eq!(
            links,
            vec![("directors", 2), ("employees", 0), ("next_of_kin", 0), ("court_cases", 0)]
        );
    }
}
