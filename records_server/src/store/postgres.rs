//! Postgres store: diesel-async connections from a deadpool pool.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Array, BigInt, Bool, Integer};
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use super::{RecordStore, StoreError};
use crate::entity::{EntityKind, FieldKind, Link};
use crate::models::company::Company;
use crate::models::court_case::CourtCase;
use crate::models::criminal_record::CriminalRecord;
use crate::models::customer::Customer;
use crate::models::director::Director;
use crate::models::employee::Employee;
use crate::models::employment_record::EmploymentRecord;
use crate::models::next_of_kin::NextOfKin;
use crate::models::previous_transaction::PreviousTransaction;
use crate::record::{Record, Value};
use crate::schema::{
    companies, court_cases, criminal_records, customers, directors, employees,
    employment_records, next_of_kin, previous_transactions,
};

pub type PgPool = Pool<AsyncPgConnection>;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Build the pool. Connections are opened lazily on first use.
    pub fn connect(database_url: &str, max_size: usize) -> Result<Self, StoreError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let pool = Pool::builder(manager)
            .max_size(max_size)
            .build()
            .map_err(|e| StoreError::Pool(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        let mut conn = self.conn().await?;
        crate::migration::run_migration(&mut conn).await
    }

    async fn conn(&self) -> Result<Object<AsyncPgConnection>, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Pool(e.to_string()))
    }
}

#[derive(QueryableByName)]
struct LinkRow {
    #[diesel(sql_type = Integer)]
    owner_id: i32,
    #[diesel(sql_type = Integer)]
    target_id: i32,
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[derive(QueryableByName)]
struct ExistsRow {
    #[diesel(sql_type = Bool)]
    found: bool,
}

async fn insert_row(conn: &mut AsyncPgConnection, record: &Record) -> Result<(), StoreError> {
    match record.kind() {
        EntityKind::Employee => {
            let row = Employee::try_from(record)?;
            diesel::insert_into(employees::table)
                .values(&row)
                .execute(conn)
                .await?;
        }
        EntityKind::NextOfKin => {
            let row = NextOfKin::try_from(record)?;
            diesel::insert_into(next_of_kin::table)
                .values(&row)
                .execute(conn)
                .await?;
        }
        EntityKind::Company => {
            let row = Company::try_from(record)?;
            diesel::insert_into(companies::table)
                .values(&row)
                .execute(conn)
                .await?;
        }
        EntityKind::Director => {
            let row = Director::try_from(record)?;
            diesel::insert_into(directors::table)
                .values(&row)
                .execute(conn)
                .await?;
        }
        EntityKind::CourtCases => {
            let row = CourtCase::try_from(record)?;
            diesel::insert_into(court_cases::table)
                .values(&row)
                .execute(conn)
                .await?;
        }
        EntityKind::CriminalRecord => {
            let row = CriminalRecord::try_from(record)?;
            diesel::insert_into(criminal_records::table)
                .values(&row)
                .execute(conn)
                .await?;
        }
        EntityKind::PrevTransactions => {
            let row = PreviousTransaction::try_from(record)?;
            diesel::insert_into(previous_transactions::table)
                .values(&row)
                .execute(conn)
                .await?;
        }
        EntityKind::EmploymentRecord => {
            let row = EmploymentRecord::try_from(record)?;
            diesel::insert_into(employment_records::table)
                .values(&row)
                .execute(conn)
                .await?;
        }
        EntityKind::Customer => {
            let row = Customer::try_from(record)?;
            diesel::insert_into(customers::table)
                .values(&row)
                .execute(conn)
                .await?;
        }
    }
    Ok(())
}

async fn load_rows(
    conn: &mut AsyncPgConnection,
    kind: EntityKind,
) -> Result<Vec<Record>, StoreError> {
    let records = match kind {
        EntityKind::Employee => employees::table
            .select(Employee::as_select())
            .load::<Employee>(conn)
            .await?
            .into_iter()
            .map(Record::from)
            .collect(),
        EntityKind::NextOfKin => next_of_kin::table
            .select(NextOfKin::as_select())
            .load::<NextOfKin>(conn)
            .await?
            .into_iter()
            .map(Record::from)
            .collect(),
        EntityKind::Company => companies::table
            .select(Company::as_select())
            .load::<Company>(conn)
            .await?
            .into_iter()
            .map(Record::from)
            .collect(),
        EntityKind::Director => directors::table
            .select(Director::as_select())
            .load::<Director>(conn)
            .await?
            .into_iter()
            .map(Record::from)
            .collect(),
        EntityKind::CourtCases => court_cases::table
            .select(CourtCase::as_select())
            .load::<CourtCase>(conn)
            .await?
            .into_iter()
            .map(Record::from)
            .collect(),
        EntityKind::CriminalRecord => criminal_records::table
            .select(CriminalRecord::as_select())
            .load::<CriminalRecord>(conn)
            .await?
            .into_iter()
            .map(Record::from)
            .collect(),
        EntityKind::PrevTransactions => previous_transactions::table
            .select(PreviousTransaction::as_select())
            .load::<PreviousTransaction>(conn)
            .await?
            .into_iter()
            .map(Record::from)
            .collect(),
        EntityKind::EmploymentRecord => employment_records::table
            .select(EmploymentRecord::as_select())
            .load::<EmploymentRecord>(conn)
            .await?
            .into_iter()
            .map(Record::from)
            .collect(),
        EntityKind::Customer => customers::table
            .select(Customer::as_select())
            .load::<Customer>(conn)
            .await?
            .into_iter()
            .map(Record::from)
            .collect(),
    };
    Ok(records)
}

// Link tables are addressed by name from the static entity catalog, never
// from request input.
async fn attach_links(
    conn: &mut AsyncPgConnection,
    kind: EntityKind,
    records: &mut [Record],
) -> Result<(), StoreError> {
    for field in kind.fields() {
        let FieldKind::ManyToMany(link) = field.kind else {
            continue;
        };

        let rows: Vec<LinkRow> = diesel::sql_query(format!(
            "SELECT {owner} AS owner_id, {target} AS target_id \
             FROM {table} \
             ORDER BY {owner}, {target}",
            owner = link.owner_column,
            target = link.target_column,
            table = link.table,
        ))
        .load(conn)
        .await?;

        let mut by_owner: HashMap<i32, Vec<i32>> = HashMap::new();
        for row in rows {
            by_owner.entry(row.owner_id).or_default().push(row.target_id);
        }

        for record in records.iter_mut() {
            let ids = by_owner.remove(&record.id()?).unwrap_or_default();
            record.set(field.name, Value::Refs(ids));
        }
    }
    Ok(())
}

async fn insert_links(
    conn: &mut AsyncPgConnection,
    link: Link,
    owner_id: i32,
    ids: &[i32],
) -> Result<(), StoreError> {
    diesel::sql_query(format!(
        "INSERT INTO {table} ({owner}, {target}) SELECT $1, UNNEST($2::int4[])",
        table = link.table,
        owner = link.owner_column,
        target = link.target_column,
    ))
    .bind::<Integer, _>(owner_id)
    .bind::<Array<Integer>, _>(ids.to_vec())
    .execute(conn)
    .await?;
    Ok(())
}

fn classify(kind: EntityKind, id: i32, err: StoreError) -> StoreError {
    match err {
        StoreError::Query(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            StoreError::Duplicate { kind, id }
        }
        StoreError::Query(DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            info,
        )) => StoreError::MissingReference {
            kind,
            detail: info.message().to_string(),
        },
        other => other,
    }
}

#[async_trait]
impl RecordStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, record: Record) -> Result<(), StoreError> {
        let kind = record.kind();
        let id = record.id()?;

        let mut conn = self.conn().await?;
        let conn: &mut AsyncPgConnection = &mut conn;
        conn.transaction::<_, StoreError, _>(|conn| {
            async move {
                insert_row(conn, &record).await?;
                for (_, link, ids) in record.links() {
                    if !ids.is_empty() {
                        insert_links(conn, link, id, ids).await?;
                    }
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| classify(kind, id, err))
    }

    async fn list(&self, kind: EntityKind) -> Result<Vec<Record>, StoreError> {
        let mut conn = self.conn().await?;
        let mut records = load_rows(&mut conn, kind).await?;
        attach_links(&mut conn, kind, &mut records).await?;
        Ok(records)
    }

    async fn count(&self, kind: EntityKind) -> Result<i64, StoreError> {
        let mut conn = self.conn().await?;
        let conn: &mut AsyncPgConnection = &mut conn;
        let row: CountRow =
            diesel::sql_query(format!("SELECT COUNT(*) AS count FROM {}", kind.table()))
                .get_result(conn)
                .await?;
        Ok(row.count)
    }

    async fn contains(&self, kind: EntityKind, id: i32) -> Result<bool, StoreError> {
        let mut conn = self.conn().await?;
        let conn: &mut AsyncPgConnection = &mut conn;
        let row: ExistsRow = diesel::sql_query(format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE {} = $1) AS found",
            kind.table(),
            kind.primary_key().name
        ))
        .bind::<Integer, _>(id)
        .get_result(conn)
        .await?;
        Ok(row.found)
    }
}
