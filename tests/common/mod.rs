#![allow(dead_code)]

use monthly_finance_server::database::{Db, init_db};
use monthly_finance_server::db_store::LibsqlStore;
use monthly_finance_server::month::FixedClock;
use monthly_finance_server::service::FinanceService;
use tempfile::{TempDir, tempdir};
use time::Date;
use uuid::Uuid;

pub type TestService = FinanceService<LibsqlStore, FixedClock>;

pub async fn setup_test_environment() -> (LibsqlStore, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let data_path = temp_dir
        .path()
        .to_str()
        .expect("Failed to convert path to string")
        .to_string();

    let db = init_db(&data_path)
        .await
        .unwrap_or_else(|e| panic!("Failed to initialize database at {}: {}", data_path, e));

    (LibsqlStore::new(db), temp_dir)
}

/// Service whose business "today" is pinned to `today`.
pub async fn setup_test_service(today: Date) -> (TestService, TempDir) {
    let (store, temp_dir) = setup_test_environment().await;
    (FinanceService::new(store, FixedClock::on(today)), temp_dir)
}

pub async fn create_test_pocket(db: &Db, name: &str) -> String {
    let pocket_id = Uuid::new_v4().to_string();
    let conn = db.write().await;
    conn.execute(
        "INSERT INTO pockets (id, name, description, created_at) VALUES (?, ?, '', 0)",
        (pocket_id.as_str(), name),
    )
    .await
    .unwrap_or_else(|e| panic!("Failed to insert test pocket '{}': {}", name, e));

    pocket_id
}

pub async fn create_test_fixed_expense(
    db: &Db,
    pocket_id: &str,
    concept_name: &str,
    amount: f64,
    month: &str,
    paid_date: Option<&str>,
) -> String {
    let expense_id = Uuid::new_v4().to_string();
    let conn = db.write().await;
    let is_paid = i64::from(paid_date.is_some());
    let paid_date = match paid_date {
        Some(date) => libsql::Value::Text(date.to_string()),
        None => libsql::Value::Null,
    };
    conn.execute(
        "INSERT INTO fixed_expenses (id, pocket_id, concept_name, amount, payment_day, month, is_paid, paid_date) \
         VALUES (?, ?, ?, ?, 5, ?, ?, ?)",
        libsql::params![
            expense_id.as_str(),
            pocket_id,
            concept_name,
            amount,
            month,
            is_paid,
            paid_date,
        ],
    )
    .await
    .unwrap_or_else(|e| panic!("Failed to insert fixed expense '{}': {}", concept_name, e));

    expense_id
}

pub async fn create_test_daily_expense(
    db: &Db,
    description: &str,
    amount: f64,
    date: &str,
    created_at: i64,
) -> String {
    let expense_id = Uuid::new_v4().to_string();
    let conn = db.write().await;
    conn.execute(
        "INSERT INTO daily_expenses (id, description, amount, date, created_at) VALUES (?, ?, ?, ?, ?)",
        (expense_id.as_str(), description, amount, date, created_at),
    )
    .await
    .unwrap_or_else(|e| panic!("Failed to insert daily expense '{}': {}", description, e));

    expense_id
}

pub async fn count_rows(db: &Db, table: &str) -> u32 {
    let conn = db.read().await;
    let mut rows = conn
        .query(&format!("SELECT COUNT(*) FROM {}", table), ())
        .await
        .expect("Failed to execute count query");
    let row = rows
        .next()
        .await
        .expect("Failed to read count row")
        .expect("Count query returned no rows");
    row.get(0).expect("Failed to get count value")
}
