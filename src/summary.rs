use crate::error::{FinanceError, FinanceResult};
use crate::inheritance::resolve;
use crate::models::MonthlySummary;
use crate::month::MonthKey;
use crate::ratio::budget_ratio;
use crate::store::{DailyBudgetConfigStore, DailyExpenseStore, FixedExpenseStore, SalaryStore};

/// Builds the financial summary of `month`.
///
/// Salary and daily budget are resolved with one-month inheritance and fall
/// back to zero on absence or failure. Fixed and daily expenses are required:
/// a failure there fails the whole summary.
pub async fn monthly_summary<S>(store: &S, month: &str) -> FinanceResult<MonthlySummary>
where
    S: SalaryStore + FixedExpenseStore + DailyExpenseStore + DailyBudgetConfigStore,
{
    let month = MonthKey::parse(month)?;

    let total_income = resolve(month, |key| store.salary_by_month(key))
        .await
        .map(|salary| salary.monthly_amount)
        .unwrap_or(0.0);

    let fixed_expenses = store
        .fixed_expenses_by_month(month)
        .await
        .map_err(|cause| FinanceError::AggregationFailed {
            what: "fixed expenses",
            cause,
        })?;
    let total_fixed_expenses: f64 = fixed_expenses.iter().map(|e| e.amount).sum();
    let fixed_expenses_paid = fixed_expenses.iter().filter(|e| e.is_paid).count() as u32;
    let fixed_expenses_total = fixed_expenses.len() as u32;

    let daily_expenses = store
        .daily_expenses_by_month(month)
        .await
        .map_err(|cause| FinanceError::AggregationFailed {
            what: "daily expenses",
            cause,
        })?;
    let total_daily_expenses: f64 = daily_expenses.iter().map(|e| e.amount).sum();

    let daily_budget_total = resolve(month, |key| store.budget_config_by_month(key))
        .await
        .map(|config| config.monthly_budget)
        .unwrap_or(0.0);

    Ok(MonthlySummary {
        month,
        total_income,
        total_fixed_expenses,
        total_daily_expenses,
        remaining_budget: total_income - total_fixed_expenses - total_daily_expenses,
        fixed_expenses_paid,
        fixed_expenses_total,
        daily_budget_used: total_daily_expenses,
        daily_budget_total,
        daily_budget_utilization: budget_ratio(daily_budget_total, total_daily_expenses),
    })
}
