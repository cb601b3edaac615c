//! Short display strings, used for relation cells and select options.

use super::EntityKind;
use crate::record::{Record, Value};

/// Render the one-line label for a stored record.
///
/// `related` supplies labels for records a foreign key points at; an
/// unresolved reference falls back to `#id`.
pub fn display(record: &Record, related: impl Fn(EntityKind, i32) -> Option<String>) -> String {
    let plain = |field: &str| {
        record
            .get(field)
            .map(|value| value.to_plain())
            .unwrap_or_default()
    };

    match record.kind() {
        EntityKind::Employee => full_name(&plain("first_name"), &plain("last_name")),
        EntityKind::Director => full_name(
            &plain("director_first_name"),
            &plain("director_last_name"),
        ),
        EntityKind::Customer => full_name(
            &plain("customer_first_name"),
            &plain("customer_last_name"),
        ),
        EntityKind::NextOfKin => format!(
            "{} – {}",
            plain("next_of_kin_relationship"),
            plain("next_of_kin_phone_number")
        ),
        EntityKind::Company => plain("company_name"),
        EntityKind::CourtCases => format!(
            "{} – {}",
            plain("court_case_number"),
            plain("court_case_name")
        ),
        EntityKind::CriminalRecord => format!(
            "{} on {}",
            plain("criminal_record_type"),
            plain("criminal_record_date")
        ),
        EntityKind::PrevTransactions => format!(
            "{} – {}",
            plain("previous_transaction_date"),
            plain("previous_transaction_amount")
        ),
        EntityKind::EmploymentRecord => {
            let employee = match record.get("employment_record_employee") {
                Some(Value::Ref(id)) => {
                    related(EntityKind::Employee, *id).unwrap_or_else(|| format!("#{id}"))
                }
                _ => String::new(),
            };
            format!("{employee} – {}", plain("employment_record_date"))
        }
    }
}

fn full_name(first: &str, last: &str) -> String {
    format!("{first} {last}").trim().to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn unresolved(_: EntityKind, _: i32) -> Option<String> {
        None
    }

    #[test]
    fn names_are_trimmed() {
        let record = Record::new(EntityKind::Employee)
            .with("first_name", Value::Text("Ana".into()))
            .with("last_name", Value::Text(String::new()));
        assert_eq!(display(&record, unresolved), "Ana");
    }

    #[test]
    fn dated_kinds_use_iso_dates() {
        let record = Record::new(EntityKind::CriminalRecord)
            .with("criminal_record_type", Value::Text("Fraud".into()))
            .with(
                "criminal_record_date",
                Value::Date(NaiveDate::from_ymd_opt(2021, 3, 9).unwrap()),
            );
        assert_eq!(display(&record, unresolved), "Fraud on 2021-03-09");
    }

    #[test]
    fn court_cases_join_number_and_name() {
        let record = Record::new(EntityKind::CourtCases)
            .with("court_case_number", Value::Text("HC-12".into()))
            .with("court_case_name", Value::Text("State v Li".into()));
        assert_eq!(display(&record, unresolved), "HC-12 – State v Li");
    }

    #[test]
    fn employment_records_name_their_employee() {
        let record = Record::new(EntityKind::EmploymentRecord)
            .with("employment_record_id", Value::Int(4))
            .with("employment_record_employee", Value::Ref(7))
            .with(
                "employment_record_date",
                Value::Date(NaiveDate::from_ymd_opt(2022, 8, 1).unwrap()),
            );
        let related = |kind: EntityKind, id: i32| {
            (kind == EntityKind::Employee && id == 7).then(|| "Ana Li".to_string())
        };

        assert_eq!(display(&record, related), "Ana Li – 2022-08-01");
        assert_eq!(display(&record, unresolved), "#7 – 2022-08-01");
    }
}
