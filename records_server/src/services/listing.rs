//! Tabular projection of stored records for list pages.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::entity::{display, Direction, EntityKind, FieldKind, FieldSpec};
use crate::record::{Record, Value};
use crate::registry::page_config;
use crate::store::{RecordStore, StoreError};

/// Placeholder for empty cells.
pub const EMPTY_CELL: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based, always within `1..=total_pages`.
    pub page: usize,
    pub total_pages: usize,
    pub total_records: usize,
    pub page_size: usize,
}

impl Pagination {
    pub fn new(requested: Option<usize>, total_records: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_records.div_ceil(page_size).max(1);
        Self {
            page: requested.unwrap_or(1).clamp(1, total_pages),
            total_pages,
            total_records,
            page_size,
        }
    }

    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub pagination: Pagination,
}

/// Load, order, paginate and format the records of `kind`.
pub async fn build_table(
    store: &dyn RecordStore,
    kind: EntityKind,
    page: Option<usize>,
    page_size: usize,
) -> Result<Table, StoreError> {
    let columns = page_config(kind).columns();

    let mut records = store.list(kind).await?;
    sort_records(kind, &mut records);

    let mut labels: HashMap<EntityKind, HashMap<i32, String>> = HashMap::new();
    for (field, _) in &columns {
        if let Some(target) = field.relation_target() {
            if labels.contains_key(&target) {
                continue;
            }
            let by_id = record_labels(store, target).await?.into_iter().collect();
            labels.insert(target, by_id);
        }
    }

    let pagination = Pagination::new(page, records.len(), page_size);
    let rows = records
        .iter()
        .skip(pagination.offset())
        .take(pagination.page_size)
        .map(|record| {
            columns
                .iter()
                .map(|(field, _)| format_cell(field, record.get(field.name), &labels))
                .collect()
        })
        .collect();

    Ok(Table {
        headers: columns.into_iter().map(|(_, label)| label).collect(),
        rows,
        pagination,
    })
}

/// One-line labels for every record of `kind`, in its default order.
///
/// Foreign keys of `kind` itself are resolved one level deep.
pub async fn record_labels(
    store: &dyn RecordStore,
    kind: EntityKind,
) -> Result<Vec<(i32, String)>, StoreError> {
    let mut records = store.list(kind).await?;
    sort_records(kind, &mut records);

    let mut related: HashMap<(EntityKind, i32), String> = HashMap::new();
    for field in kind.fields() {
        if let FieldKind::ForeignKey(target) = field.kind {
            for record in store.list(target).await? {
                related.insert((target, record.id()?), display(&record, |_, _| None));
            }
        }
    }

    records
        .iter()
        .map(|record| {
            let label = display(record, |target, id| related.get(&(target, id)).cloned());
            Ok((record.id()?, label))
        })
        .collect()
}

/// Sort by the kind's default ordering, then by id.
pub fn sort_records(kind: EntityKind, records: &mut [Record]) {
    let ordering = kind.ordering();
    let pk = kind.primary_key().name;

    records.sort_by(|a, b| {
        ordering
            .iter()
            .map(|key| {
                let ordering = compare(a.get(key.field), b.get(key.field));
                match key.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| compare(a.get(pk), b.get(pk)))
    });
}

// Missing and null values sort after everything else, as Postgres does for ASC.
fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        (Some(Value::Int(a)), Some(Value::Int(b))) => a.cmp(b),
        (Some(Value::Ref(a)), Some(Value::Ref(b))) => a.cmp(b),
        (Some(Value::Date(a)), Some(Value::Date(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Text(a)), Some(Value::Text(b))) => a.cmp(b),
        (Some(a), Some(b)) => a.to_plain().cmp(&b.to_plain()),
    }
}

fn format_cell(
    field: &FieldSpec,
    value: Option<&Value>,
    labels: &HashMap<EntityKind, HashMap<i32, String>>,
) -> String {
    let label = |target: EntityKind, id: i32| {
        labels
            .get(&target)
            .and_then(|by_id| by_id.get(&id))
            .cloned()
            .unwrap_or_else(|| format!("#{id}"))
    };

    match (field.kind, value) {
        (_, None | Some(Value::Null)) => EMPTY_CELL.to_string(),
        (FieldKind::ManyToMany(link), Some(Value::Refs(ids))) => {
            if ids.is_empty() {
                EMPTY_CELL.to_string()
            } else {
                ids.iter()
                    .map(|id| label(link.target, *id))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
        (FieldKind::ForeignKey(target), Some(Value::Ref(id))) => label(target, *id),
        (_, Some(Value::Date(date))) => format_date(*date),
        (_, Some(Value::Bool(flag))) => (if *flag { "Yes" } else { "No" }).to_string(),
        (_, Some(value)) if value.is_empty() => EMPTY_CELL.to_string(),
        (_, Some(value)) => value.to_plain(),
    }
}

/// Associated Press style date: "Jan. 5, 2024", "March 3, 2023", "Sept. 9, 2021".
pub fn format_date(date: NaiveDate) -> String {
    const MONTHS: [&str; 12] = [
        "Jan.", "Feb.", "March", "April", "May", "June", "July", "Aug.", "Sept.", "Oct.",
        "Nov.", "Dec.",
    ];
    format!(
        "{} {}, {}",
        MONTHS[date.month0() as usize],
        date.day(),
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: i32, first: &str, last: &str, court_cases: Vec<i32>) -> Record {
        let text = |s: &str| Value::Text(s.to_string());
        Record::new(EntityKind::Employee)
            .with("employee_id", Value::Int(id))
            .with("first_name", text(first))
            .with("last_name", text(last))
            .with("address", text("1 Main St"))
            .with("phone_number", text("555"))
            .with("email", text("x@example.com"))
            .with("date_of_birth", Value::Date(date(1990, 1, 1)))
            .with("national_id", text("N1"))
            .with("id_image", Value::Null)
            .with("passport_number", text(""))
            .with("date_of_employment", Value::Date(date(2024, 1, 5)))
            .with("position", text("Analyst"))
            .with("court_cases", Value::Refs(court_cases))
            .with("criminal_records", Value::Refs(vec![]))
            .with("cv", Value::Null)
            .with("vehicle_registration_number", text(""))
    }

    fn court_case(id: i32) -> Record {
        let text = |s: &str| Value::Text(s.to_string());
        Record::new(EntityKind::CourtCases)
            .with("court_case_id", Value::Int(id))
            .with("court_case_number", text(&format!("HC-{id}")))
            .with("court_case_name", text("State v Li"))
            .with("court_case_type", text("Civil"))
            .with("court_case_date", Value::Date(date(2022, 9, 1)))
            .with("court_case_time", text("09:00"))
            .with("court_case_location", text("Harare"))
            .with("court_case_description", text("Dispute"))
            .with("court_case_parties", text("Two"))
            .with("court_case_judge", text("Moyo"))
    }

    #[test]
    fn dates_use_ap_month_abbreviations() {
        assert_eq!(format_date(date(2024, 1, 5)), "Jan. 5, 2024");
        assert_eq!(format_date(date(2023, 3, 31)), "March 31, 2023");
        assert_eq!(format_date(date(2021, 9, 9)), "Sept. 9, 2021");
        assert_eq!(format_date(date(2020, 12, 25)), "Dec. 25, 2020");
    }

    #[test]
    fn pagination_clamps_out_of_range_pages() {
        let p = Pagination::new(Some(9), 51, 25);
        assert_eq!((p.page, p.total_pages, p.offset()), (3, 3, 50));
        assert!(p.has_previous() && !p.has_next());

        let p = Pagination::new(Some(0), 0, 25);
        assert_eq!((p.page, p.total_pages), (1, 1));
        assert!(!p.has_previous() && !p.has_next());
    }

    #[test]
    fn records_follow_default_ordering() {
        let mut records = vec![
            employee(3, "Zoe", "Li", vec![]),
            employee(1, "Ana", "Ng", vec![]),
            employee(2, "Ana", "Li", vec![]),
        ];
        sort_records(EntityKind::Employee, &mut records);
        let ids: Vec<_> = records.iter().map(|r| r.id().unwrap()).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[tokio::test]
    async fn table_projects_configured_columns() {
        let store = MemoryStore::new();
        store.insert(court_case(4)).await.unwrap();
        store.insert(court_case(5)).await.unwrap();
        store.insert(employee(7, "Ana", "Li", vec![4, 5])).await.unwrap();
        store.insert(employee(8, "Ben", "Moyo", vec![])).await.unwrap();

        let table = build_table(&store, EntityKind::Employee, None, 25).await.unwrap();
        assert_eq!(table.headers[..3], ["ID", "First name", "Last name"]);
        assert_eq!(
            table.rows[0],
            [
                "7",
                "Ana",
                "Li",
                "Analyst",
                "Jan. 5, 2024",
                "HC-4 – State v Li, HC-5 – State v Li",
                "—"
            ]
        );
        assert_eq!(table.rows[1][5], "—");
        assert_eq!(table.pagination.total_records, 2);
    }

    #[tokio::test]
    async fn employment_record_labels_name_the_employee() {
        let store = MemoryStore::new();
        store.insert(employee(7, "Ana", "Li", vec![])).await.unwrap();
        store
            .insert(
                Record::new(EntityKind::EmploymentRecord)
                    .with("employment_record_id", Value::Int(1))
                    .with("employment_record_date", Value::Date(date(2022, 8, 1)))
                    .with("employment_record_time", Value::Text("08:00".into()))
                    .with("employment_record_description", Value::Text("Hired".into()))
                    .with("employment_record_employee", Value::Ref(7)),
            )
            .await
            .unwrap();

        let labels = record_labels(&store, EntityKind::EmploymentRecord).await.unwrap();
        assert_eq!(labels, [(1, "Ana Li – 2022-08-01".to_string())]);
    }

    #[tokio::test]
    async fn second_page_holds_the_rest() {
        let store = MemoryStore::new();
        for id in 1..=3 {
            store
                .insert(employee(id, "Ana", &format!("Li{id}"), vec![]))
                .await
                .unwrap();
        }
        let table = build_table(&store, EntityKind::Employee, Some(2), 2).await.unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], "3");
    }
}
