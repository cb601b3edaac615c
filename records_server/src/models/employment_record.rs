//! EmploymentRecord: employment history entry. The owning employee is
//! required; deleting the employee deletes its records (ON DELETE CASCADE).

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::entity::EntityKind;
use crate::record::{Record, Value};
use crate::schema::employment_records;
use crate::store::StoreError;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = employment_records)]
pub struct EmploymentRecord {
    pub employment_record_id: i32,
    pub employment_record_date: NaiveDate,
    pub employment_record_time: String,
    pub employment_record_description: String,
    pub employment_record_employee_id: i32,
}

impl TryFrom<&Record> for EmploymentRecord {
    type Error = StoreError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            employment_record_id: record.int("employment_record_id")?,
            employment_record_date: record.date("employment_record_date")?,
            employment_record_time: record.text("employment_record_time")?,
            employment_record_description: record.text("employment_record_description")?,
            employment_record_employee_id: record.reference("employment_record_employee")?,
        })
    }
}

impl From<EmploymentRecord> for Record {
    fn from(row: EmploymentRecord) -> Self {
        Record::new(EntityKind::EmploymentRecord)
            .with("employment_record_id", Value::Int(row.employment_record_id))
            .with("employment_record_date", Value::Date(row.employment_record_date))
            .with("employment_record_time", Value::Text(row.employment_record_time))
            .with(
                "employment_record_description",
                Value::Text(row.employment_record_description),
            )
            .with(
                "employment_record_employee",
                Value::Ref(row.employment_record_employee_id),
            )
    }
}
