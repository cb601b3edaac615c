//! CourtCases: referenced by employees, companies, customers and criminal
//! records.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::entity::EntityKind;
use crate::record::{Record, Value};
use crate::schema::court_cases;
use crate::store::StoreError;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = court_cases)]
pub struct CourtCase {
    pub court_case_id: i32,
    pub court_case_number: String,
    pub court_case_name: String,
    pub court_case_type: String,
    pub court_case_date: NaiveDate,
    pub court_case_time: String,
    pub court_case_location: String,
    pub court_case_description: String,
    pub court_case_parties: String,
    pub court_case_judge: String,
}

impl TryFrom<&Record> for CourtCase {
    type Error = StoreError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            court_case_id: record.int("court_case_id")?,
            court_case_number: record.text("court_case_number")?,
            court_case_name: record.text("court_case_name")?,
            court_case_type: record.text("court_case_type")?,
            court_case_date: record.date("court_case_date")?,
            court_case_time: record.text("court_case_time")?,
            court_case_location: record.text("court_case_location")?,
            court_case_description: record.text("court_case_description")?,
            court_case_parties: record.text("court_case_parties")?,
            court_case_judge: record.text("court_case_judge")?,
        })
    }
}

impl From<CourtCase> for Record {
    fn from(row: CourtCase) -> Self {
        Record::new(EntityKind::CourtCases)
            .with("court_case_id", Value::Int(row.court_case_id))
            .with("court_case_number", Value::Text(row.court_case_number))
            .with("court_case_name", Value::Text(row.court_case_name))
            .with("court_case_type", Value::Text(row.court_case_type))
            .with("court_case_date", Value::Date(row.court_case_date))
            .with("court_case_time", Value::Text(row.court_case_time))
            .with("court_case_location", Value::Text(row.court_case_location))
            .with("court_case_description", Value::Text(row.court_case_description))
            .with("court_case_parties", Value::Text(row.court_case_parties))
            .with("court_case_judge", Value::Text(row.court_case_judge))
    }
}
