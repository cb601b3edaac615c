use dagger_sdk::{Directory, Query};

use crate::containers;

/// Exercise the server against a fresh PostgreSQL database.
/// Flow: store round trip test -> start server -> create over HTTP -> verify list, dashboard and table
pub async fn run(client: &Query, source: Directory) -> eyre::Result<String> {
    let pg = containers::postgres(client);
    let db_url = containers::database_url();

    let test_script = r#"
set -euo pipefail

BINARY="./target/release/zisodb"
BASE="http://127.0.0.1:8000"

echo "=== Integration Test: Records Lifecycle ==="

echo "[1/6] Starting server..."
ZISO_MEDIA_ROOT=/tmp/zisodb-media $BINARY --port 8000 > /tmp/zisodb.log 2>&1 &
SERVER_PID=$!
trap 'kill $SERVER_PID 2>/dev/null || true' EXIT
for i in $(seq 1 30); do curl -fs "$BASE/" > /dev/null && break; sleep 1; done

echo "[2/6] Creating a court case..."
curl -fs -o /dev/null -w "%{http_code}\n" \
  -H "X-Requested-With: XMLHttpRequest" \
  --data "court_case_id=501&court_case_number=HC-501&court_case_name=State v Li&court_case_type=Civil&court_case_date=2022-09-01&court_case_time=09:00&court_case_location=Harare&court_case_description=Dispute&court_case_parties=State&court_case_judge=Moyo" \
  "$BASE/court-cases/" | grep -q 201

echo "[3/6] Creating an employee linked to it..."
curl -fs -o /dev/null -w "%{http_code}\n" \
  -H "Content-Type: application/json" \
  --data '{"employee_id":7,"first_name":"Ana","last_name":"Li","address":"12 Harbour Rd","phone_number":"555-0101","email":"ana@example.com","date_of_birth":"1990-04-12","national_id":"NID-7","date_of_employment":"2024-01-05","position":"Analyst","court_cases":[501]}' \
  "$BASE/employee/" | grep -q 201

echo "[4/6] Rejecting a repeated id with missing fields..."
STATUS=$(curl -s -o /dev/null -w "%{http_code}" -H "X-Requested-With: XMLHttpRequest" \
  --data "employee_id=7" "$BASE/employee/")
test "$STATUS" = "400"

echo "[5/6] Verifying list and dashboard..."
curl -fs "$BASE/employee/records/" | grep -q "HC-501"
curl -fs "$BASE/" | grep -q 'data-count="1"'

echo "[6/6] Verifying link table..."
LINKS=$(psql "$DATABASE_URL" -t -c "SELECT COUNT(*) FROM employee_court_cases WHERE employee_id = 7" | tr -d ' ')
test "$LINKS" = "1"

echo ""
echo "=== Integration Test Complete ==="
"#;

    let output = containers::rust_base(client, source)
        .with_service_binding("db", pg)
        .with_env_variable("DATABASE_URL", db_url.as_str())
        .with_env_variable("ZISODB_TEST_DATABASE_URL", db_url.as_str())
        .with_env_variable("RUST_LOG", "info")
        .with_exec(vec![
            "sh",
            "-c",
            "for i in $(seq 1 30); do pg_isready -h db -p 5432 -U zisodb && break; sleep 1; done",
        ])
        .with_exec(vec![
            "cargo",
            "test",
            "--package",
            "zisodb-server",
            "--test",
            "postgres",
        ])
        .with_exec(vec![
            "cargo",
            "build",
            "--release",
            "--package",
            "zisodb-server",
        ])
        .with_exec(vec!["bash", "-c", test_script])
        .stdout()
        .await?;

    Ok(format!("[integration] {output}"))
}
