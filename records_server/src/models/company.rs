//! Company: registry entry; directors, employees, next of kin and court
//! cases are linked through join tables.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::entity::EntityKind;
use crate::record::{Record, Value};
use crate::schema::companies;
use crate::store::StoreError;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = companies)]
pub struct Company {
    pub company_id: i32,
    pub company_name: String,
    pub company_address: String,
    pub company_phone_number: String,
    pub company_email: String,
    pub company_date_of_incorporation: NaiveDate,
    pub company_registration_number: String,
}

impl TryFrom<&Record> for Company {
    type Error = StoreError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            company_id: record.int("company_id")?,
            company_name: record.text("company_name")?,
            company_address: record.text("company_address")?,
            company_phone_number: record.text("company_phone_number")?,
            company_email: record.text("company_email")?,
            company_date_of_incorporation: record.date("company_date_of_incorporation")?,
            company_registration_number: record.text("company_registration_number")?,
        })
    }
}

impl From<Company> for Record {
    fn from(row: Company) -> Self {
        Record::new(EntityKind::Company)
            .with("company_id", Value::Int(row.company_id))
            .with("company_name", Value::Text(row.company_name))
            .with("company_address", Value::Text(row.company_address))
            .with("company_phone_number", Value::Text(row.company_phone_number))
            .with("company_email", Value::Text(row.company_email))
            .with(
                "company_date_of_incorporation",
                Value::Date(row.company_date_of_incorporation),
            )
            .with(
                "company_registration_number",
                Value::Text(row.company_registration_number),
            )
    }
}
