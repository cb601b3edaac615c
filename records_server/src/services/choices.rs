//! Options for relation fields, drawn from the current store contents.

use crate::entity::EntityKind;
use crate::forms::{Choice, ChoiceSets};
use crate::services::listing::record_labels;
use crate::store::{RecordStore, StoreError};

/// Choices for every relation field of `kind`, in each target's default order.
pub async fn load(store: &dyn RecordStore, kind: EntityKind) -> Result<ChoiceSets, StoreError> {
    let mut sets = ChoiceSets::new();

    for field in kind.fields() {
        let Some(target) = field.relation_target() else {
            continue;
        };
        let choices = record_labels(store, target)
            .await?
            .into_iter()
            .map(|(id, label)| Choice { id, label })
            .collect();
        sets.insert(field.name, choices);
    }

    Ok(sets)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::record::{Record, Value};
    use crate::store::MemoryStore;

    fn court_case(id: i32, number: &str, date: (i32, u32, u32)) -> Record {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        Record::new(EntityKind::CourtCases)
            .with("court_case_id", Value::Int(id))
            .with("court_case_number", Value::Text(number.into()))
            .with("court_case_name", Value::Text(format!("State v {id}")))
            .with("court_case_type", Value::Text("Civil".into()))
            .with("court_case_date", Value::Date(date))
            .with("court_case_time", Value::Text("09:00".into()))
            .with("court_case_location", Value::Text("Harare".into()))
            .with("court_case_description", Value::Text("Dispute".into()))
            .with("court_case_parties", Value::Text("Two".into()))
            .with("court_case_judge", Value::Text("Moyo".into()))
    }

    #[tokio::test]
    async fn relation_fields_get_ordered_choices() {
        let store = MemoryStore::new();
        store.insert(court_case(1, "HC-1", (2020, 1, 1))).await.unwrap();
        store.insert(court_case(2, "HC-2", (2023, 5, 1))).await.unwrap();

        let sets = load(&store, EntityKind::Employee).await.unwrap();
        let ids: Vec<_> = sets["court_cases"].iter().map(|c| c.id).collect();
        assert_eq!(ids, [2, 1]);
        assert_eq!(sets["court_cases"][0].label, "HC-2 – State v 2");
        assert!(sets["criminal_records"].is_empty());
        assert!(!sets.contains_key("first_name"));
    }

    #[tokio::test]
    async fn kinds_without_relations_get_nothing() {
        let store = MemoryStore::new();
        let sets = load(&store, EntityKind::Director).await.unwrap();
        assert!(sets.is_empty());
    }
}
