use anyhow::{Context, Result};
use libsql::{Row, Value, params};
use time::Date;
use uuid::Uuid;

use crate::database::Db;
use crate::models::{DailyBudgetConfig, DailyExpense, FixedExpense, Pocket, Salary};
use crate::month::{MonthKey, parse_date};
use crate::store::{
    DailyBudgetConfigStore, DailyExpenseStore, FixedExpenseStore, PocketStore, SalaryStore,
};

const FIXED_EXPENSE_COLUMNS: &str =
    "id, pocket_id, concept_name, amount, payment_day, month, is_paid, paid_date";
const DAILY_EXPENSE_COLUMNS: &str = "id, description, amount, date, created_at";

/// libsql implementation of every repository port.
#[derive(Clone)]
pub struct LibsqlStore {
    db: Db,
}

impl LibsqlStore {
    pub fn new(db: Db) -> Self {
        LibsqlStore { db }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }
}

fn month_from_row(row: &Row, idx: i32) -> Result<MonthKey> {
    let raw: String = row.get(idx).context("failed to get month")?;
    MonthKey::parse(&raw).with_context(|| format!("stored month '{raw}' is malformed"))
}

fn optional_date_from_row(row: &Row, idx: i32) -> Result<Option<Date>> {
    match row.get_value(idx)? {
        Value::Null => Ok(None),
        Value::Text(raw) => Ok(Some(parse_date(&raw)?)),
        other => anyhow::bail!("unexpected paid_date value: {:?}", other),
    }
}

fn optional_date_value(date: Option<Date>) -> Value {
    match date {
        Some(date) => Value::Text(date.to_string()),
        None => Value::Null,
    }
}

pub fn extract_salary_from_row(row: Row) -> Result<Salary> {
    let id: String = row.get(0).context("failed to get salary id")?;
    let month = month_from_row(&row, 1)?;
    let monthly_amount: f64 = row.get(2).context("failed to get salary amount")?;

    Ok(Salary {
        id: Some(id),
        monthly_amount,
        month,
    })
}

pub fn extract_budget_config_from_row(row: Row) -> Result<DailyBudgetConfig> {
    let id: String = row.get(0).context("failed to get budget config id")?;
    let month = month_from_row(&row, 1)?;
    let monthly_budget: f64 = row.get(2).context("failed to get monthly budget")?;

    Ok(DailyBudgetConfig {
        id: Some(id),
        monthly_budget,
        month,
    })
}

pub fn extract_pocket_from_row(row: Row) -> Result<Pocket> {
    let id: String = row.get(0).context("failed to get pocket id")?;
    let name: String = row.get(1).context("failed to get pocket name")?;
    let description: String = row.get(2).context("failed to get pocket description")?;
    let created_at: i64 = row.get(3).context("failed to get pocket created_at")?;

    Ok(Pocket {
        id,
        name,
        description,
        created_at,
    })
}

pub fn extract_fixed_expense_from_row(row: Row) -> Result<FixedExpense> {
    let id: String = row.get(0).context("failed to get fixed expense id")?;
    let pocket_id: String = row.get(1).context("failed to get fixed expense pocket_id")?;
    let concept_name: String = row.get(2).context("failed to get concept name")?;
    let amount: f64 = row.get(3).context("failed to get fixed expense amount")?;
    let payment_day: i64 = row.get(4).context("failed to get payment day")?;
    let month = month_from_row(&row, 5)?;
    let is_paid: i64 = row.get(6).context("failed to get is_paid")?;
    let paid_date = optional_date_from_row(&row, 7)?;

    Ok(FixedExpense {
        id,
        pocket_id,
        concept_name,
        amount,
        payment_day: u8::try_from(payment_day).context("payment day out of range")?,
        month,
        is_paid: is_paid != 0,
        paid_date,
    })
}

pub fn extract_daily_expense_from_row(row: Row) -> Result<DailyExpense> {
    let id: String = row.get(0).context("failed to get daily expense id")?;
    let description: String = row.get(1).context("failed to get description")?;
    let amount: f64 = row.get(2).context("failed to get daily expense amount")?;
    let date: String = row.get(3).context("failed to get daily expense date")?;
    let created_at: i64 = row.get(4).context("failed to get daily expense created_at")?;

    Ok(DailyExpense {
        id,
        description,
        amount,
        date: parse_date(&date)?,
        created_at,
    })
}

impl LibsqlStore {
    async fn query_one<T>(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
        extract: fn(Row) -> Result<T>,
    ) -> Result<Option<T>> {
        let conn = self.db.read().await;
        let mut rows = conn.query(sql, params).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(extract(row)?)),
            None => Ok(None),
        }
    }

    async fn query_all<T>(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
        extract: fn(Row) -> Result<T>,
    ) -> Result<Vec<T>> {
        let conn = self.db.read().await;
        let mut rows = conn.query(sql, params).await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(extract(row)?);
        }
        Ok(items)
    }

    async fn execute(&self, sql: &str, params: impl libsql::params::IntoParams) -> Result<u64> {
        let conn = self.db.write().await;
        Ok(conn.execute(sql, params).await?)
    }
}

impl SalaryStore for LibsqlStore {
    async fn salary_by_month(&self, month: MonthKey) -> Result<Option<Salary>> {
        self.query_one(
            "SELECT id, month, monthly_amount FROM salaries WHERE month = ?",
            [month.to_string()],
            extract_salary_from_row,
        )
        .await
    }

    async fn upsert_salary(&self, month: MonthKey, monthly_amount: f64) -> Result<Salary> {
        let id = Uuid::new_v4().to_string();
        self.execute(
            "INSERT INTO salaries (id, month, monthly_amount) VALUES (?, ?, ?) \
             ON CONFLICT(month) DO UPDATE SET monthly_amount = excluded.monthly_amount",
            (id.as_str(), month.to_string(), monthly_amount),
        )
        .await
        .context("salary upsert failed")?;

        self.salary_by_month(month)
            .await?
            .context("salary missing after upsert")
    }
}

impl DailyBudgetConfigStore for LibsqlStore {
    async fn budget_config_by_month(&self, month: MonthKey) -> Result<Option<DailyBudgetConfig>> {
        self.query_one(
            "SELECT id, month, monthly_budget FROM daily_budget_configs WHERE month = ?",
            [month.to_string()],
            extract_budget_config_from_row,
        )
        .await
    }

    async fn upsert_budget_config(
        &self,
        month: MonthKey,
        monthly_budget: f64,
    ) -> Result<DailyBudgetConfig> {
        let id = Uuid::new_v4().to_string();
        self.execute(
            "INSERT INTO daily_budget_configs (id, month, monthly_budget) VALUES (?, ?, ?) \
             ON CONFLICT(month) DO UPDATE SET monthly_budget = excluded.monthly_budget",
            (id.as_str(), month.to_string(), monthly_budget),
        )
        .await
        .context("daily budget upsert failed")?;

        self.budget_config_by_month(month)
            .await?
            .context("daily budget config missing after upsert")
    }
}

impl PocketStore for LibsqlStore {
    async fn pockets(&self) -> Result<Vec<Pocket>> {
        self.query_all(
            "SELECT id, name, description, created_at FROM pockets ORDER BY name",
            (),
            extract_pocket_from_row,
        )
        .await
    }

    async fn pocket_by_id(&self, id: &str) -> Result<Option<Pocket>> {
        self.query_one(
            "SELECT id, name, description, created_at FROM pockets WHERE id = ?",
            [id],
            extract_pocket_from_row,
        )
        .await
    }

    async fn pocket_by_name(&self, name: &str) -> Result<Option<Pocket>> {
        self.query_one(
            "SELECT id, name, description, created_at FROM pockets WHERE LOWER(name) = LOWER(?)",
            [name],
            extract_pocket_from_row,
        )
        .await
    }

    async fn create_pocket(&self, pocket: &Pocket) -> Result<()> {
        self.execute(
            "INSERT INTO pockets (id, name, description, created_at) VALUES (?, ?, ?, ?)",
            (
                pocket.id.as_str(),
                pocket.name.as_str(),
                pocket.description.as_str(),
                pocket.created_at,
            ),
        )
        .await
        .context("pocket creation failed")?;
        Ok(())
    }

    async fn update_pocket(&self, pocket: &Pocket) -> Result<bool> {
        let affected = self
            .execute(
                "UPDATE pockets SET name = ?, description = ? WHERE id = ?",
                (
                    pocket.name.as_str(),
                    pocket.description.as_str(),
                    pocket.id.as_str(),
                ),
            )
            .await
            .context("pocket update failed")?;
        Ok(affected > 0)
    }

    async fn delete_pocket(&self, id: &str) -> Result<bool> {
        let affected = self
            .execute("DELETE FROM pockets WHERE id = ?", [id])
            .await
            .context("pocket deletion failed")?;
        Ok(affected > 0)
    }

    async fn pocket_usage(&self, id: &str) -> Result<u32> {
        let count = self
            .query_one(
                "SELECT COUNT(*) FROM fixed_expenses WHERE pocket_id = ?",
                [id],
                |row| Ok(row.get::<u32>(0)?),
            )
            .await?;
        Ok(count.unwrap_or(0))
    }
}

impl FixedExpenseStore for LibsqlStore {
    async fn fixed_expenses_by_month(&self, month: MonthKey) -> Result<Vec<FixedExpense>> {
        let sql = format!(
            "SELECT {FIXED_EXPENSE_COLUMNS} FROM fixed_expenses WHERE month = ? \
             ORDER BY payment_day, concept_name"
        );
        self.query_all(&sql, [month.to_string()], extract_fixed_expense_from_row)
            .await
    }

    async fn fixed_expense_by_id(&self, id: &str) -> Result<Option<FixedExpense>> {
        let sql = format!("SELECT {FIXED_EXPENSE_COLUMNS} FROM fixed_expenses WHERE id = ?");
        self.query_one(&sql, [id], extract_fixed_expense_from_row)
            .await
    }

    async fn create_fixed_expense(&self, expense: &FixedExpense) -> Result<()> {
        let sql = format!(
            "INSERT INTO fixed_expenses ({FIXED_EXPENSE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        );
        self.execute(
            &sql,
            params![
                expense.id.as_str(),
                expense.pocket_id.as_str(),
                expense.concept_name.as_str(),
                expense.amount,
                i64::from(expense.payment_day),
                expense.month.to_string(),
                i64::from(expense.is_paid),
                optional_date_value(expense.paid_date),
            ],
        )
        .await
        .context("fixed expense creation failed")?;
        Ok(())
    }

    async fn update_fixed_expense(&self, expense: &FixedExpense) -> Result<bool> {
        let affected = self
            .execute(
                "UPDATE fixed_expenses SET pocket_id = ?, concept_name = ?, amount = ?, \
                 payment_day = ?, month = ? WHERE id = ?",
                params![
                    expense.pocket_id.as_str(),
                    expense.concept_name.as_str(),
                    expense.amount,
                    i64::from(expense.payment_day),
                    expense.month.to_string(),
                    expense.id.as_str(),
                ],
            )
            .await
            .context("fixed expense update failed")?;
        Ok(affected > 0)
    }

    async fn update_payment_status(
        &self,
        id: &str,
        is_paid: bool,
        paid_date: Option<Date>,
    ) -> Result<bool> {
        let affected = self
            .execute(
                "UPDATE fixed_expenses SET is_paid = ?, paid_date = ? WHERE id = ?",
                (i64::from(is_paid), optional_date_value(paid_date), id),
            )
            .await
            .context("payment status update failed")?;
        Ok(affected > 0)
    }

    async fn delete_fixed_expense(&self, id: &str) -> Result<bool> {
        let affected = self
            .execute("DELETE FROM fixed_expenses WHERE id = ?", [id])
            .await
            .context("fixed expense deletion failed")?;
        Ok(affected > 0)
    }
}

impl DailyExpenseStore for LibsqlStore {
    async fn daily_expenses_by_month(&self, month: MonthKey) -> Result<Vec<DailyExpense>> {
        let sql = format!(
            "SELECT {DAILY_EXPENSE_COLUMNS} FROM daily_expenses WHERE date LIKE ? \
             ORDER BY date DESC, created_at DESC"
        );
        self.query_all(&sql, [format!("{month}-%")], extract_daily_expense_from_row)
            .await
    }

    async fn daily_expense_by_id(&self, id: &str) -> Result<Option<DailyExpense>> {
        let sql = format!("SELECT {DAILY_EXPENSE_COLUMNS} FROM daily_expenses WHERE id = ?");
        self.query_one(&sql, [id], extract_daily_expense_from_row)
            .await
    }

    async fn create_daily_expense(&self, expense: &DailyExpense) -> Result<()> {
        let sql =
            format!("INSERT INTO daily_expenses ({DAILY_EXPENSE_COLUMNS}) VALUES (?, ?, ?, ?, ?)");
        self.execute(
            &sql,
            (
                expense.id.as_str(),
                expense.description.as_str(),
                expense.amount,
                expense.date.to_string(),
                expense.created_at,
            ),
        )
        .await
        .context("daily expense creation failed")?;
        Ok(())
    }

    async fn update_daily_expense(&self, expense: &DailyExpense) -> Result<bool> {
        let affected = self
            .execute(
                "UPDATE daily_expenses SET description = ?, amount = ?, date = ? WHERE id = ?",
                (
                    expense.description.as_str(),
                    expense.amount,
                    expense.date.to_string(),
                    expense.id.as_str(),
                ),
            )
            .await
            .context("daily expense update failed")?;
        Ok(affected > 0)
    }

    async fn delete_daily_expense(&self, id: &str) -> Result<bool> {
        let affected = self
            .execute("DELETE FROM daily_expenses WHERE id = ?", [id])
            .await
            .context("daily expense deletion failed")?;
        Ok(affected > 0)
    }
}
