//! Round trip through a real database. Runs only when
//! `ZISODB_TEST_DATABASE_URL` points at a disposable Postgres instance.

use chrono::NaiveDate;

use zisodb_server::entity::EntityKind;
use zisodb_server::record::{Record, Value};
use zisodb_server::store::{PgStore, RecordStore, StoreError};

fn database_url() -> Option<String> {
    std::env::var("ZISODB_TEST_DATABASE_URL").ok().filter(|url| !url.is_empty())
}

fn fresh_id() -> i32 {
    (uuid::Uuid::new_v4().as_u128() % 1_000_000_000) as i32 + 1
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

#[tokio::test]
async fn records_and_links_survive_a_round_trip() {
    let Some(url) = database_url() else {
        eprintln!("ZISODB_TEST_DATABASE_URL not set; skipping");
        return;
    };
    let store = PgStore::connect(&url, 2).unwrap();
    store.migrate().await.unwrap();
    // Idempotent.
    store.migrate().await.unwrap();

    let case_id = fresh_id();
    let employee_id = fresh_id();
    let date = NaiveDate::from_ymd_opt(2022, 9, 1).unwrap();

    store
        .insert(
            Record::new(EntityKind::CourtCases)
                .with("court_case_id", Value::Int(case_id))
                .with("court_case_number", text("HC-12"))
                .with("court_case_name", text("State v Li"))
                .with("court_case_type", text("Civil"))
                .with("court_case_date", Value::Date(date))
                .with("court_case_time", text("09:00"))
                .with("court_case_location", text("Harare"))
                .with("court_case_description", text("Dispute"))
                .with("court_case_parties", text("State, Li"))
                .with("court_case_judge", text("Moyo")),
        )
        .await
        .unwrap();

    let employee = Record::new(EntityKind::Employee)
        .with("employee_id", Value::Int(employee_id))
        .with("first_name", text("Ana"))
        .with("last_name", text("Li"))
        .with("address", text("12 Harbour Rd"))
        .with("phone_number", text("555-0101"))
        .with("email", text("ana@example.com"))
        .with("date_of_birth", Value::Date(date))
        .with("national_id", text("NID-7"))
        .with("id_image", Value::Null)
        .with("passport_number", text(""))
        .with("date_of_employment", Value::Date(date))
        .with("position", text("Analyst"))
        .with("court_cases", Value::Refs(vec![case_id]))
        .with("criminal_records", Value::Refs(vec![]))
        .with("cv", Value::Null)
        .with("vehicle_registration_number", text(""));
    store.insert(employee.clone()).await.unwrap();

    assert!(store.contains(EntityKind::Employee, employee_id).await.unwrap());
    let stored = store
        .list(EntityKind::Employee)
        .await
        .unwrap()
        .into_iter()
        .find(|record| record.id().ok() == Some(employee_id))
        .unwrap();
    assert_eq!(stored.refs("court_cases"), [case_id]);
    assert_eq!(stored.get("first_name"), Some(&text("Ana")));

    let again = store.insert(employee).await;
    assert!(matches!(again, Err(StoreError::Duplicate { .. })));

    let dangling = Record::new(EntityKind::EmploymentRecord)
        .with("employment_record_id", Value::Int(fresh_id()))
        .with("employment_record_date", Value::Date(date))
        .with("employment_record_time", text("08:00"))
        .with("employment_record_description", text("Promoted"))
        .with("employment_record_employee", Value::Ref(-1));
    let result = store.insert(dangling).await;
    assert!(matches!(result, Err(StoreError::MissingReference { .. })));
}
