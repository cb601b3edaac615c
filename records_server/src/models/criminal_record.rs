//! CriminalRecord: screening finding, optionally tied to a court case.
//! Deleting the court case clears the link (ON DELETE SET NULL).

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::entity::EntityKind;
use crate::record::{Record, Value};
use crate::schema::criminal_records;
use crate::store::StoreError;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = criminal_records)]
pub struct CriminalRecord {
    pub criminal_record_id: i32,
    pub criminal_record_description: String,
    pub criminal_record_date: NaiveDate,
    pub criminal_record_time: String,
    pub criminal_record_location: String,
    pub criminal_record_type: String,
    pub criminal_record_court_case_id: Option<i32>,
}

impl TryFrom<&Record> for CriminalRecord {
    type Error = StoreError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            criminal_record_id: record.int("criminal_record_id")?,
            criminal_record_description: record.text("criminal_record_description")?,
            criminal_record_date: record.date("criminal_record_date")?,
            criminal_record_time: record.text("criminal_record_time")?,
            criminal_record_location: record.text("criminal_record_location")?,
            criminal_record_type: record.text("criminal_record_type")?,
            criminal_record_court_case_id: record.opt_reference("criminal_record_court_case")?,
        })
    }
}

impl From<CriminalRecord> for Record {
    fn from(row: CriminalRecord) -> Self {
        Record::new(EntityKind::CriminalRecord)
            .with("criminal_record_id", Value::Int(row.criminal_record_id))
            .with(
                "criminal_record_description",
                Value::Text(row.criminal_record_description),
            )
            .with("criminal_record_date", Value::Date(row.criminal_record_date))
            .with("criminal_record_time", Value::Text(row.criminal_record_time))
            .with("criminal_record_location", Value::Text(row.criminal_record_location))
            .with("criminal_record_type", Value::Text(row.criminal_record_type))
            .with(
                "criminal_record_court_case",
                row.criminal_record_court_case_id
                    .map_or(Value::Null, Value::Ref),
            )
    }
}
