//! Employee: identity, onboarding and compliance details.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::entity::EntityKind;
use crate::record::{Record, Value};
use crate::schema::employees;
use crate::store::StoreError;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = employees)]
pub struct Employee {
    pub employee_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub national_id: String,
    pub id_image: Option<String>,
    pub passport_number: String,
    pub date_of_employment: NaiveDate,
    pub position: String,
    pub cv: Option<String>,
    pub vehicle_registration_number: String,
}

impl TryFrom<&Record> for Employee {
    type Error = StoreError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            employee_id: record.int("employee_id")?,
            first_name: record.text("first_name")?,
            last_name: record.text("last_name")?,
            address: record.text("address")?,
            phone_number: record.text("phone_number")?,
            email: record.text("email")?,
            date_of_birth: record.date("date_of_birth")?,
            national_id: record.text("national_id")?,
            id_image: record.opt_text("id_image")?,
            passport_number: record.text("passport_number")?,
            date_of_employment: record.date("date_of_employment")?,
            position: record.text("position")?,
            cv: record.opt_text("cv")?,
            vehicle_registration_number: record.text("vehicle_registration_number")?,
        })
    }
}

impl From<Employee> for Record {
    fn from(row: Employee) -> Self {
        Record::new(EntityKind::Employee)
            .with("employee_id", Value::Int(row.employee_id))
            .with("first_name", Value::Text(row.first_name))
            .with("last_name", Value::Text(row.last_name))
            .with("address", Value::Text(row.address))
            .with("phone_number", Value::Text(row.phone_number))
            .with("email", Value::Text(row.email))
            .with("date_of_birth", Value::Date(row.date_of_birth))
            .with("national_id", Value::Text(row.national_id))
            .with("id_image", row.id_image.map_or(Value::Null, Value::Text))
            .with("passport_number", Value::Text(row.passport_number))
            .with("date_of_employment", Value::Date(row.date_of_employment))
            .with("position", Value::Text(row.position))
            .with("cv", row.cv.map_or(Value::Null, Value::Text))
            .with(
                "vehicle_registration_number",
                Value::Text(row.vehicle_registration_number),
            )
    }
}
