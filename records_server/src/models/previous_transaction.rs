//! PreviousTransactions: historical transactions, standalone.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::entity::EntityKind;
use crate::record::{Record, Value};
use crate::schema::previous_transactions;
use crate::store::StoreError;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = previous_transactions)]
pub struct PreviousTransaction {
    pub previous_transaction_id: i32,
    pub previous_transaction_date: NaiveDate,
    pub previous_transaction_time: String,
    pub previous_transaction_amount: String,
    pub previous_transaction_description: String,
}

impl TryFrom<&Record> for PreviousTransaction {
    type Error = StoreError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            previous_transaction_id: record.int("previous_transaction_id")?,
            previous_transaction_date: record.date("previous_transaction_date")?,
            previous_transaction_time: record.text("previous_transaction_time")?,
            previous_transaction_amount: record.text("previous_transaction_amount")?,
            previous_transaction_description: record
                .text("previous_transaction_description")?,
        })
    }
}

impl From<PreviousTransaction> for Record {
    fn from(row: PreviousTransaction) -> Self {
        Record::new(EntityKind::PrevTransactions)
            .with("previous_transaction_id", Value::Int(row.previous_transaction_id))
            .with(
                "previous_transaction_date",
                Value::Date(row.previous_transaction_date),
            )
            .with(
                "previous_transaction_time",
                Value::Text(row.previous_transaction_time),
            )
            .with(
                "previous_transaction_amount",
                Value::Text(row.previous_transaction_amount),
            )
            .with(
                "previous_transaction_description",
                Value::Text(row.previous_transaction_description),
            )
    }
}
