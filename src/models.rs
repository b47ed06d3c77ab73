use serde::{Deserialize, Serialize};
use time::Date;

use crate::month::MonthKey;

// YYYY-MM-DD on the wire for every date field
time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Salary {
    /// `None` marks a record inherited from the previous month and never saved.
    pub id: Option<String>,
    pub monthly_amount: f64,
    pub month: MonthKey,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyBudgetConfig {
    pub id: Option<String>,
    pub monthly_budget: f64,
    pub month: MonthKey,
}

impl DailyBudgetConfig {
    /// Monthly budget spread evenly over the days of its month.
    pub fn daily_allowance(&self) -> f64 {
        if self.monthly_budget <= 0.0 {
            return 0.0;
        }
        self.monthly_budget / f64::from(self.month.days_in_month())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pocket {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FixedExpense {
    pub id: String,
    pub pocket_id: String,
    pub concept_name: String,
    pub amount: f64,
    pub payment_day: u8,
    pub month: MonthKey,
    pub is_paid: bool,
    /// Set exactly when `is_paid` is true.
    #[serde(with = "iso_date::option")]
    pub paid_date: Option<Date>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyExpense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub created_at: i64,
}

impl DailyExpense {
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FixedExpenseStatus {
    Paid,
    Pending,
    Overdue,
}

/// Derived view of one month; never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub total_income: f64,
    pub total_fixed_expenses: f64,
    pub total_daily_expenses: f64,
    pub remaining_budget: f64,
    pub fixed_expenses_paid: u32,
    pub fixed_expenses_total: u32,
    pub daily_budget_used: f64,
    pub daily_budget_total: f64,
    /// Percentage of the daily budget already spent.
    pub daily_budget_utilization: i32,
}

// Request payloads

#[derive(Deserialize, Debug, Clone)]
pub struct SalaryPayload {
    pub monthly_amount: f64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DailyBudgetPayload {
    pub monthly_budget: f64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PocketPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CreateFixedExpensePayload {
    pub pocket_id: String,
    pub concept_name: String,
    pub amount: f64,
    pub payment_day: u8,
    /// Defaults to the current business month.
    pub month: Option<MonthKey>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UpdateFixedExpensePayload {
    pub pocket_id: String,
    pub concept_name: String,
    pub amount: f64,
    pub payment_day: u8,
    pub month: MonthKey,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PaymentStatusPayload {
    pub is_paid: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DailyExpensePayload {
    pub description: String,
    pub amount: f64,
    /// Raw `YYYY-MM-DD`, validated by the service.
    pub date: String,
}

// Responses

#[derive(Serialize, Debug, Clone)]
pub struct IncomeResponse {
    pub month: MonthKey,
    pub monthly_amount: f64,
    pub inherited: bool,
}

#[derive(Serialize, Debug, Clone)]
pub struct DailyBudgetResponse {
    pub month: MonthKey,
    pub monthly_budget: f64,
    pub daily_budget: f64,
    pub inherited: bool,
}

#[derive(Serialize, Debug, Clone)]
pub struct FixedExpenseView {
    #[serde(flatten)]
    pub expense: FixedExpense,
    pub pocket_name: String,
    pub status: FixedExpenseStatus,
}

#[derive(Serialize, Debug, Clone)]
pub struct DeletedResponse {
    pub id: String,
    pub message: String,
}
