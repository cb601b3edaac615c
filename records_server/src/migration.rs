//! Idempotent DDL for the Postgres store.

use diesel_async::{AsyncPgConnection, SimpleAsyncConnection};

/// SQL migration for the records tables.
///
/// Nine entity tables keyed by caller-assigned integer ids plus one link
/// table per many-to-many field.
pub const MIGRATION_SQL: &str = r#"
-- ================================================================
-- Entity tables
-- ================================================================

CREATE TABLE IF NOT EXISTS employees (
    employee_id                 INTEGER PRIMARY KEY,
    first_name                  VARCHAR(30) NOT NULL,
    last_name                   VARCHAR(30) NOT NULL,
    address                     VARCHAR(30) NOT NULL,
    phone_number                VARCHAR(30) NOT NULL,
    email                       VARCHAR(30) NOT NULL,
    date_of_birth               DATE NOT NULL,
    national_id                 VARCHAR(30) NOT NULL,
    id_image                    VARCHAR(100),
    passport_number             VARCHAR(30) NOT NULL DEFAULT '',
    date_of_employment          DATE NOT NULL,
    position                    VARCHAR(30) NOT NULL,
    cv                          VARCHAR(100),
    vehicle_registration_number VARCHAR(30) NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_employees_name ON employees (last_name, first_name);

CREATE TABLE IF NOT EXISTS next_of_kin (
    next_of_kin_id              INTEGER PRIMARY KEY,
    next_of_kin_phone_number    VARCHAR(30) NOT NULL,
    next_of_kin_email           VARCHAR(30) NOT NULL,
    next_of_kin_address         VARCHAR(30) NOT NULL,
    next_of_kin_relationship    VARCHAR(30) NOT NULL,
    next_of_kin_date_of_birth   DATE NOT NULL,
    next_of_kin_occupation      VARCHAR(30) NOT NULL,
    next_of_kin_id_number       VARCHAR(30) NOT NULL
);

CREATE TABLE IF NOT EXISTS directors (
    director_id                          INTEGER PRIMARY KEY,
    director_first_name                  VARCHAR(30) NOT NULL,
    director_last_name                   VARCHAR(30) NOT NULL,
    director_address                     VARCHAR(30) NOT NULL,
    director_phone_number                VARCHAR(30) NOT NULL,
    director_email                       VARCHAR(30) NOT NULL,
    director_date_of_birth               DATE NOT NULL,
    director_national_id                 VARCHAR(30) NOT NULL,
    director_passport_number             VARCHAR(30) NOT NULL DEFAULT '',
    director_vehicle_registration_number VARCHAR(30) NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS companies (
    company_id                    INTEGER PRIMARY KEY,
    company_name                  VARCHAR(30) NOT NULL,
    company_address               VARCHAR(30) NOT NULL,
    company_phone_number          VARCHAR(30) NOT NULL,
    company_email                 VARCHAR(30) NOT NULL,
    company_date_of_incorporation DATE NOT NULL,
    company_registration_number   VARCHAR(30) NOT NULL
);

CREATE TABLE IF NOT EXISTS court_cases (
    court_case_id           INTEGER PRIMARY KEY,
    court_case_number       VARCHAR(30) NOT NULL,
    court_case_name         VARCHAR(30) NOT NULL,
    court_case_type         VARCHAR(30) NOT NULL,
    court_case_date         DATE NOT NULL,
    court_case_time         VARCHAR(30) NOT NULL,
    court_case_location     VARCHAR(30) NOT NULL,
    court_case_description  VARCHAR(30) NOT NULL,
    court_case_parties      VARCHAR(30) NOT NULL,
    court_case_judge        VARCHAR(30) NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_court_cases_date ON court_cases (court_case_date DESC);

CREATE TABLE IF NOT EXISTS customers (
    customer_id                          INTEGER PRIMARY KEY,
    customer_first_name                  VARCHAR(30) NOT NULL,
    customer_last_name                   VARCHAR(30) NOT NULL,
    customer_address                     VARCHAR(30) NOT NULL,
    customer_phone_number                VARCHAR(30) NOT NULL,
    customer_email                       VARCHAR(30) NOT NULL,
    customer_date_of_birth               DATE NOT NULL,
    customer_national_id                 VARCHAR(30) NOT NULL,
    customer_passport_number             VARCHAR(30) NOT NULL DEFAULT '',
    customer_vehicle_registration_number VARCHAR(30) NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS criminal_records (
    criminal_record_id            INTEGER PRIMARY KEY,
    criminal_record_description   VARCHAR(30) NOT NULL,
    criminal_record_date          DATE NOT NULL,
    criminal_record_time          VARCHAR(30) NOT NULL,
    criminal_record_location      VARCHAR(30) NOT NULL,
    criminal_record_type          VARCHAR(30) NOT NULL,
    criminal_record_court_case_id INTEGER REFERENCES court_cases(court_case_id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_criminal_records_court_case ON criminal_records (criminal_record_court_case_id);

CREATE TABLE IF NOT EXISTS previous_transactions (
    previous_transaction_id          INTEGER PRIMARY KEY,
    previous_transaction_date        DATE NOT NULL,
    previous_transaction_time        VARCHAR(30) NOT NULL,
    previous_transaction_amount      VARCHAR(30) NOT NULL,
    previous_transaction_description VARCHAR(30) NOT NULL
);

CREATE TABLE IF NOT EXISTS employment_records (
    employment_record_id          INTEGER PRIMARY KEY,
    employment_record_date        DATE NOT NULL,
    employment_record_time        VARCHAR(30) NOT NULL,
    employment_record_description VARCHAR(30) NOT NULL,
    employment_record_employee_id INTEGER NOT NULL REFERENCES employees(employee_id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_employment_records_employee ON employment_records (employment_record_employee_id);

-- ================================================================
-- Link tables (many-to-many)
-- ================================================================

CREATE TABLE IF NOT EXISTS employee_court_cases (
    employee_id   INTEGER NOT NULL REFERENCES employees(employee_id) ON DELETE CASCADE,
    court_case_id INTEGER NOT NULL REFERENCES court_cases(court_case_id) ON DELETE CASCADE,
    PRIMARY KEY (employee_id, court_case_id)
);

CREATE TABLE IF NOT EXISTS employee_criminal_records (
    employee_id        INTEGER NOT NULL REFERENCES employees(employee_id) ON DELETE CASCADE,
    criminal_record_id INTEGER NOT NULL REFERENCES criminal_records(criminal_record_id) ON DELETE CASCADE,
    PRIMARY KEY (employee_id, criminal_record_id)
);

CREATE TABLE IF NOT EXISTS company_directors (
    company_id  INTEGER NOT NULL REFERENCES companies(company_id) ON DELETE CASCADE,
    director_id INTEGER NOT NULL REFERENCES directors(director_id) ON DELETE CASCADE,
    PRIMARY KEY (company_id, director_id)
);

CREATE TABLE IF NOT EXISTS company_employees (
    company_id  INTEGER NOT NULL REFERENCES companies(company_id) ON DELETE CASCADE,
    employee_id INTEGER NOT NULL REFERENCES employees(employee_id) ON DELETE CASCADE,
    PRIMARY KEY (company_id, employee_id)
);

CREATE TABLE IF NOT EXISTS company_next_of_kin (
    company_id     INTEGER NOT NULL REFERENCES companies(company_id) ON DELETE CASCADE,
    next_of_kin_id INTEGER NOT NULL REFERENCES next_of_kin(next_of_kin_id) ON DELETE CASCADE,
    PRIMARY KEY (company_id, next_of_kin_id)
);

CREATE TABLE IF NOT EXISTS company_court_cases (
    company_id    INTEGER NOT NULL REFERENCES companies(company_id) ON DELETE CASCADE,
    court_case_id INTEGER NOT NULL REFERENCES court_cases(court_case_id) ON DELETE CASCADE,
    PRIMARY KEY (company_id, court_case_id)
);

CREATE TABLE IF NOT EXISTS customer_criminal_records (
    customer_id        INTEGER NOT NULL REFERENCES customers(customer_id) ON DELETE CASCADE,
    criminal_record_id INTEGER NOT NULL REFERENCES criminal_records(criminal_record_id) ON DELETE CASCADE,
    PRIMARY KEY (customer_id, criminal_record_id)
);

CREATE TABLE IF NOT EXISTS customer_previous_transactions (
    customer_id             INTEGER NOT NULL REFERENCES customers(customer_id) ON DELETE CASCADE,
    previous_transaction_id INTEGER NOT NULL REFERENCES previous_transactions(previous_transaction_id) ON DELETE CASCADE,
    PRIMARY KEY (customer_id, previous_transaction_id)
);

CREATE TABLE IF NOT EXISTS customer_court_cases (
    customer_id   INTEGER NOT NULL REFERENCES customers(customer_id) ON DELETE CASCADE,
    court_case_id INTEGER NOT NULL REFERENCES court_cases(court_case_id) ON DELETE CASCADE,
    PRIMARY KEY (customer_id, court_case_id)
);
"#;

/// Run the records migration.
pub async fn run_migration(conn: &mut AsyncPgConnection) -> anyhow::Result<()> {
    conn.batch_execute(MIGRATION_SQL)
        .await
        .map_err(|e| anyhow::anyhow!("records migration failed: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityKind, FieldKind};

    #[test]
    fn every_table_and_link_table_is_created() {
        for kind in EntityKind::ALL {
            let ddl = format!("CREATE TABLE IF NOT EXISTS {} (", kind.table());
            assert!(MIGRATION_SQL.contains(&ddl), "missing table for {kind}");

            for field in kind.fields() {
                if let FieldKind::ManyToMany(link) = field.kind {
                    let ddl = format!("CREATE TABLE IF NOT EXISTS {} (", link.table);
                    assert!(MIGRATION_SQL.contains(&ddl), "missing link table {}", link.table);
                    assert!(MIGRATION_SQL.contains(&format!(
                        "PRIMARY KEY ({}, {})",
                        link.owner_column, link.target_column
                    )));
                }
            }
        }
    }

    #[test]
    fn deletion_semantics_are_declared() {
        assert!(MIGRATION_SQL.contains(
            "employment_record_employee_id INTEGER NOT NULL REFERENCES employees(employee_id) ON DELETE CASCADE"
        ));
        assert!(MIGRATION_SQL.contains(
            "criminal_record_court_case_id INTEGER REFERENCES court_cases(court_case_id) ON DELETE SET NULL"
        ));
    }
}
