//! Customer: KYC profile with linked records, transactions and court cases.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::entity::EntityKind;
use crate::record::{Record, Value};
use crate::schema::customers;
use crate::store::StoreError;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = customers)]
pub struct Customer {
    pub customer_id: i32,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_address: String,
    pub customer_phone_number: String,
    pub customer_email: String,
    pub customer_date_of_birth: NaiveDate,
    pub customer_national_id: String,
    pub customer_passport_number: String,
    pub customer_vehicle_registration_number: String,
}

impl TryFrom<&Record> for Customer {
    type Error = StoreError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            customer_id: record.int("customer_id")?,
            customer_first_name: record.text("customer_first_name")?,
            customer_last_name: record.text("customer_last_name")?,
            customer_address: record.text("customer_address")?,
            customer_phone_number: record.text("customer_phone_number")?,
            customer_email: record.text("customer_email")?,
            customer_date_of_birth: record.date("customer_date_of_birth")?,
            customer_national_id: record.text("customer_national_id")?,
            customer_passport_number: record.text("customer_passport_number")?,
            customer_vehicle_registration_number: record
                .text("customer_vehicle_registration_number")?,
        })
    }
}

impl From<Customer> for Record {
    fn from(row: Customer) -> Self {
        Record::new(EntityKind::Customer)
            .with("customer_id", Value::Int(row.customer_id))
            .with("customer_first_name", Value::Text(row.customer_first_name))
            .with("customer_last_name", Value::Text(row.customer_last_name))
            .with("customer_address", Value::Text(row.customer_address))
            .with("customer_phone_number", Value::Text(row.customer_phone_number))
            .with("customer_email", Value::Text(row.customer_email))
            .with("customer_date_of_birth", Value::Date(row.customer_date_of_birth))
            .with("customer_national_id", Value::Text(row.customer_national_id))
            .with(
                "customer_passport_number",
                Value::Text(row.customer_passport_number),
            )
            .with(
                "customer_vehicle_registration_number",
                Value::Text(row.customer_vehicle_registration_number),
            )
    }
}
