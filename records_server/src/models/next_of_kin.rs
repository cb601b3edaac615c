//! NextOfKin: emergency contacts, standalone.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::entity::EntityKind;
use crate::record::{Record, Value};
use crate::schema::next_of_kin;
use crate::store::StoreError;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = next_of_kin)]
pub struct NextOfKin {
    pub next_of_kin_id: i32,
    pub next_of_kin_phone_number: String,
    pub next_of_kin_email: String,
    pub next_of_kin_address: String,
    pub next_of_kin_relationship: String,
    pub next_of_kin_date_of_birth: NaiveDate,
    pub next_of_kin_occupation: String,
    pub next_of_kin_id_number: String,
}

impl TryFrom<&Record> for NextOfKin {
    type Error = StoreError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            next_of_kin_id: record.int("next_of_kin_id")?,
            next_of_kin_phone_number: record.text("next_of_kin_phone_number")?,
            next_of_kin_email: record.text("next_of_kin_email")?,
            next_of_kin_address: record.text("next_of_kin_address")?,
            next_of_kin_relationship: record.text("next_of_kin_relationship")?,
            next_of_kin_date_of_birth: record.date("next_of_kin_date_of_birth")?,
            next_of_kin_occupation: record.text("next_of_kin_occupation")?,
            next_of_kin_id_number: record.text("next_of_kin_id_number")?,
        })
    }
}

impl From<NextOfKin> for Record {
    fn from(row: NextOfKin) -> Self {
        Record::new(EntityKind::NextOfKin)
            .with("next_of_kin_id", Value::Int(row.next_of_kin_id))
            .with(
                "next_of_kin_phone_number",
                Value::Text(row.next_of_kin_phone_number),
            )
            .with("next_of_kin_email", Value::Text(row.next_of_kin_email))
            .with("next_of_kin_address", Value::Text(row.next_of_kin_address))
            .with(
                "next_of_kin_relationship",
                Value::Text(row.next_of_kin_relationship),
            )
            .with(
                "next_of_kin_date_of_birth",
                Value::Date(row.next_of_kin_date_of_birth),
            )
            .with("next_of_kin_occupation", Value::Text(row.next_of_kin_occupation))
            .with("next_of_kin_id_number", Value::Text(row.next_of_kin_id_number))
    }
}
