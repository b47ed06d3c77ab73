use anyhow::Result;
use libsql::{Builder, Connection};
use std::{path::Path, sync::Arc};
use tokio::sync::RwLock;

use crate::constants::DATABASE_FILE_NAME;

const SCHEMA: &[&str] = &[
    r#"
CREATE TABLE IF NOT EXISTS salaries (
    id              TEXT    PRIMARY KEY,
    month           TEXT    UNIQUE NOT NULL,
    monthly_amount  REAL    NOT NULL CHECK (monthly_amount >= 0)
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS daily_budget_configs (
    id              TEXT    PRIMARY KEY,
    month           TEXT    UNIQUE NOT NULL,
    monthly_budget  REAL    NOT NULL CHECK (monthly_budget >= 0)
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS pockets (
    id           TEXT     PRIMARY KEY,
    name         TEXT     UNIQUE NOT NULL COLLATE NOCASE,
    description  TEXT     NOT NULL DEFAULT '',
    created_at   INTEGER  NOT NULL
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS fixed_expenses (
    id            TEXT     PRIMARY KEY,
    pocket_id     TEXT     NOT NULL REFERENCES pockets(id),
    concept_name  TEXT     NOT NULL,
    amount        REAL     NOT NULL CHECK (amount > 0),
    payment_day   INTEGER  NOT NULL CHECK (payment_day BETWEEN 1 AND 31),
    month         TEXT     NOT NULL,
    is_paid       INTEGER  NOT NULL DEFAULT 0,
    paid_date     TEXT,
    CHECK ((is_paid = 0 AND paid_date IS NULL) OR (is_paid = 1 AND paid_date IS NOT NULL))
);
"#,
    "CREATE INDEX IF NOT EXISTS idx_fixed_expenses_pocket_month ON fixed_expenses (pocket_id, month);",
    "CREATE INDEX IF NOT EXISTS idx_fixed_expenses_month ON fixed_expenses (month);",
    r#"
CREATE TABLE IF NOT EXISTS daily_expenses (
    id           TEXT     PRIMARY KEY,
    description  TEXT     NOT NULL,
    amount       REAL     NOT NULL CHECK (amount > 0),
    date         TEXT     NOT NULL,
    created_at   INTEGER  NOT NULL
);
"#,
    "CREATE INDEX IF NOT EXISTS idx_daily_expenses_date ON daily_expenses (date);",
];

pub type Db = Arc<RwLock<Connection>>;

/// Opens (creating if needed) the finance database under `data_dir`.
pub async fn init_db(data_dir: &str) -> Result<Db> {
    tokio::fs::create_dir_all(data_dir).await?;
    let path = Path::new(data_dir).join(DATABASE_FILE_NAME);
    let db = Builder::new_local(path).build().await?;
    let conn = db.connect()?;

    for statement in SCHEMA {
        conn.execute(statement, ()).await?;
    }
    Ok(Arc::new(RwLock::new(conn)))
}
