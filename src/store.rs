//! Repository ports consumed by the finance core.
//!
//! Every lookup by month or id returns `Ok(None)` for absence; `Err` is kept
//! for real storage failures. Listing by month returns an empty vector when
//! nothing matches.

use anyhow::Result;
use time::Date;

use crate::models::{DailyBudgetConfig, DailyExpense, FixedExpense, Pocket, Salary};
use crate::month::MonthKey;

pub trait SalaryStore: Send + Sync {
    fn salary_by_month(&self, month: MonthKey)
    -> impl Future<Output = Result<Option<Salary>>> + Send;

    /// Upsert keyed by month; returns the stored record.
    fn upsert_salary(
        &self,
        month: MonthKey,
        monthly_amount: f64,
    ) -> impl Future<Output = Result<Salary>> + Send;
}

pub trait DailyBudgetConfigStore: Send + Sync {
    fn budget_config_by_month(
        &self,
        month: MonthKey,
    ) -> impl Future<Output = Result<Option<DailyBudgetConfig>>> + Send;

    fn upsert_budget_config(
        &self,
        month: MonthKey,
        monthly_budget: f64,
    ) -> impl Future<Output = Result<DailyBudgetConfig>> + Send;
}

pub trait PocketStore: Send + Sync {
    fn pockets(&self) -> impl Future<Output = Result<Vec<Pocket>>> + Send;

    fn pocket_by_id(&self, id: &str) -> impl Future<Output = Result<Option<Pocket>>> + Send;

    /// Case-insensitive name lookup.
    fn pocket_by_name(&self, name: &str) -> impl Future<Output = Result<Option<Pocket>>> + Send;

    fn create_pocket(&self, pocket: &Pocket) -> impl Future<Output = Result<()>> + Send;

    fn update_pocket(&self, pocket: &Pocket) -> impl Future<Output = Result<bool>> + Send;

    fn delete_pocket(&self, id: &str) -> impl Future<Output = Result<bool>> + Send;

    /// Number of fixed expenses still pointing at the pocket.
    fn pocket_usage(&self, id: &str) -> impl Future<Output = Result<u32>> + Send;
}

pub trait FixedExpenseStore: Send + Sync {
    fn fixed_expenses_by_month(
        &self,
        month: MonthKey,
    ) -> impl Future<Output = Result<Vec<FixedExpense>>> + Send;

    fn fixed_expense_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<FixedExpense>>> + Send;

    fn create_fixed_expense(&self, expense: &FixedExpense)
    -> impl Future<Output = Result<()>> + Send;

    /// Writes every column except the payment state.
    fn update_fixed_expense(
        &self,
        expense: &FixedExpense,
    ) -> impl Future<Output = Result<bool>> + Send;

    fn update_payment_status(
        &self,
        id: &str,
        is_paid: bool,
        paid_date: Option<Date>,
    ) -> impl Future<Output = Result<bool>> + Send;

    fn delete_fixed_expense(&self, id: &str) -> impl Future<Output = Result<bool>> + Send;
}

pub trait DailyExpenseStore: Send + Sync {
    fn daily_expenses_by_month(
        &self,
        month: MonthKey,
    ) -> impl Future<Output = Result<Vec<DailyExpense>>> + Send;

    fn daily_expense_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<DailyExpense>>> + Send;

    fn create_daily_expense(&self, expense: &DailyExpense)
    -> impl Future<Output = Result<()>> + Send;

    fn update_daily_expense(
        &self,
        expense: &DailyExpense,
    ) -> impl Future<Output = Result<bool>> + Send;

    fn delete_daily_expense(&self, id: &str) -> impl Future<Output = Result<bool>> + Send;
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory ports for unit tests.

    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryStore {
        pub salaries: Mutex<Vec<Salary>>,
        pub configs: Mutex<Vec<DailyBudgetConfig>>,
        pub pockets: Mutex<Vec<Pocket>>,
        pub fixed: Mutex<Vec<FixedExpense>>,
        pub daily: Mutex<Vec<DailyExpense>>,
        pub fail_fixed: bool,
        pub fail_daily: bool,
        pub fail_salary: bool,
        pub fail_budget: bool,
    }

    impl MemoryStore {
        pub fn with_salary(self, month: &str, amount: f64) -> Self {
            self.salaries.lock().unwrap().push(Salary {
                id: Some(format!("salary-{month}")),
                monthly_amount: amount,
                month: MonthKey::parse(month).unwrap(),
            });
            self
        }

        pub fn with_budget(self, month: &str, budget: f64) -> Self {
            self.configs.lock().unwrap().push(DailyBudgetConfig {
                id: Some(format!("budget-{month}")),
                monthly_budget: budget,
                month: MonthKey::parse(month).unwrap(),
            });
            self
        }
    }

    impl SalaryStore for MemoryStore {
        async fn salary_by_month(&self, month: MonthKey) -> Result<Option<Salary>> {
            if self.fail_salary {
                anyhow::bail!("salary table unavailable");
            }
            let salaries = self.salaries.lock().unwrap();
            Ok(salaries.iter().find(|s| s.month == month).cloned())
        }

        async fn upsert_salary(&self, month: MonthKey, monthly_amount: f64) -> Result<Salary> {
            let mut salaries = self.salaries.lock().unwrap();
            salaries.retain(|s| s.month != month);
            let salary = Salary {
                id: Some(format!("salary-{month}")),
                monthly_amount,
                month,
            };
            salaries.push(salary.clone());
            Ok(salary)
        }
    }

    impl DailyBudgetConfigStore for MemoryStore {
        async fn budget_config_by_month(&self, month: MonthKey) -> Result<Option<DailyBudgetConfig>> {
            if self.fail_budget {
                anyhow::bail!("daily budget table unavailable");
            }
            let configs = self.configs.lock().unwrap();
            Ok(configs.iter().find(|c| c.month == month).cloned())
        }

        async fn upsert_budget_config(
            &self,
            month: MonthKey,
            monthly_budget: f64,
        ) -> Result<DailyBudgetConfig> {
            let mut configs = self.configs.lock().unwrap();
            configs.retain(|c| c.month != month);
            let config = DailyBudgetConfig {
                id: Some(format!("budget-{month}")),
                monthly_budget,
                month,
            };
            configs.push(config.clone());
            Ok(config)
        }
    }

    impl FixedExpenseStore for MemoryStore {
        async fn fixed_expenses_by_month(&self, month: MonthKey) -> Result<Vec<FixedExpense>> {
            if self.fail_fixed {
                anyhow::bail!("fixed expenses table unavailable");
            }
            let fixed = self.fixed.lock().unwrap();
            Ok(fixed.iter().filter(|e| e.month == month).cloned().collect())
        }

        async fn fixed_expense_by_id(&self, id: &str) -> Result<Option<FixedExpense>> {
            let fixed = self.fixed.lock().unwrap();
            Ok(fixed.iter().find(|e| e.id == id).cloned())
        }

        async fn create_fixed_expense(&self, expense: &FixedExpense) -> Result<()> {
            self.fixed.lock().unwrap().push(expense.clone());
            Ok(())
        }

        async fn update_fixed_expense(&self, expense: &FixedExpense) -> Result<bool> {
            let mut fixed = self.fixed.lock().unwrap();
            match fixed.iter_mut().find(|e| e.id == expense.id) {
                Some(existing) => {
                    existing.pocket_id = expense.pocket_id.clone();
                    existing.concept_name = expense.concept_name.clone();
                    existing.amount = expense.amount;
                    existing.payment_day = expense.payment_day;
                    existing.month = expense.month;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn update_payment_status(
            &self,
            id: &str,
            is_paid: bool,
            paid_date: Option<Date>,
        ) -> Result<bool> {
            let mut fixed = self.fixed.lock().unwrap();
            match fixed.iter_mut().find(|e| e.id == id) {
                Some(existing) => {
                    existing.is_paid = is_paid;
                    existing.paid_date = paid_date;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete_fixed_expense(&self, id: &str) -> Result<bool> {
            let mut fixed = self.fixed.lock().unwrap();
            let before = fixed.len();
            fixed.retain(|e| e.id != id);
            Ok(fixed.len() != before)
        }
    }

    impl DailyExpenseStore for MemoryStore {
        async fn daily_expenses_by_month(&self, month: MonthKey) -> Result<Vec<DailyExpense>> {
            if self.fail_daily {
                anyhow::bail!("daily expenses table unavailable");
            }
            let daily = self.daily.lock().unwrap();
            Ok(daily.iter().filter(|e| e.month() == month).cloned().collect())
        }

        async fn daily_expense_by_id(&self, id: &str) -> Result<Option<DailyExpense>> {
            let daily = self.daily.lock().unwrap();
            Ok(daily.iter().find(|e| e.id == id).cloned())
        }

        async fn create_daily_expense(&self, expense: &DailyExpense) -> Result<()> {
            self.daily.lock().unwrap().push(expense.clone());
            Ok(())
        }

        async fn update_daily_expense(&self, expense: &DailyExpense) -> Result<bool> {
            let mut daily = self.daily.lock().unwrap();
            match daily.iter_mut().find(|e| e.id == expense.id) {
                Some(existing) => {
                    *existing = expense.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete_daily_expense(&self, id: &str) -> Result<bool> {
            let mut daily = self.daily.lock().unwrap();
            let before = daily.len();
            daily.retain(|e| e.id != id);
            Ok(daily.len() != before)
        }
    }

    impl PocketStore for MemoryStore {
        async fn pockets(&self) -> Result<Vec<Pocket>> {
            Ok(self.pockets.lock().unwrap().clone())
        }

        async fn pocket_by_id(&self, id: &str) -> Result<Option<Pocket>> {
            let pockets = self.pockets.lock().unwrap();
            Ok(pockets.iter().find(|p| p.id == id).cloned())
        }

        async fn pocket_by_name(&self, name: &str) -> Result<Option<Pocket>> {
            let pockets = self.pockets.lock().unwrap();
            Ok(pockets
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(name))
                .cloned())
        }

        async fn create_pocket(&self, pocket: &Pocket) -> Result<()> {
            self.pockets.lock().unwrap().push(pocket.clone());
            Ok(())
        }

        async fn update_pocket(&self, pocket: &Pocket) -> Result<bool> {
            let mut pockets = self.pockets.lock().unwrap();
            match pockets.iter_mut().find(|p| p.id == pocket.id) {
                Some(existing) => {
                    *existing = pocket.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete_pocket(&self, id: &str) -> Result<bool> {
            let mut pockets = self.pockets.lock().unwrap();
            let before = pockets.len();
            pockets.retain(|p| p.id != id);
            Ok(pockets.len() != before)
        }

        async fn pocket_usage(&self, id: &str) -> Result<u32> {
            let fixed = self.fixed.lock().unwrap();
            Ok(fixed.iter().filter(|e| e.pocket_id == id).count() as u32)
        }
    }
}
