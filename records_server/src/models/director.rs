//! Director: governance identities, standalone.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::entity::EntityKind;
use crate::record::{Record, Value};
use crate::schema::directors;
use crate::store::StoreError;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = directors)]
pub struct Director {
    pub director_id: i32,
    pub director_first_name: String,
    pub director_last_name: String,
    pub director_address: String,
    pub director_phone_number: String,
    pub director_email: String,
    pub director_date_of_birth: NaiveDate,
    pub director_national_id: String,
    pub director_passport_number: String,
    pub director_vehicle_registration_number: String,
}

impl TryFrom<&Record> for Director {
    type Error = StoreError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            director_id: record.int("director_id")?,
            director_first_name: record.text("director_first_name")?,
            director_last_name: record.text("director_last_name")?,
            director_address: record.text("director_address")?,
            director_phone_number: record.text("director_phone_number")?,
            director_email: record.text("director_email")?,
            director_date_of_birth: record.date("director_date_of_birth")?,
            director_national_id: record.text("director_national_id")?,
            director_passport_number: record.text("director_passport_number")?,
            director_vehicle_registration_number: record
                .text("director_vehicle_registration_number")?,
        })
    }
}

impl From<Director> for Record {
    fn from(row: Director) -> Self {
        Record::new(EntityKind::Director)
            .with("director_id", Value::Int(row.director_id))
            .with("director_first_name", Value::Text(row.director_first_name))
            .with("director_last_name", Value::Text(row.director_last_name))
            .with("director_address", Value::Text(row.director_address))
            .with("director_phone_number", Value::Text(row.director_phone_number))
            .with("director_email", Value::Text(row.director_email))
            .with("director_date_of_birth", Value::Date(row.director_date_of_birth))
            .with("director_national_id", Value::Text(row.director_national_id))
            .with(
                "director_passport_number",
                Value::Text(row.director_passport_number),
            )
            .with(
                "director_vehicle_registration_number",
                Value::Text(row.director_vehicle_registration_number),
            )
    }
}
