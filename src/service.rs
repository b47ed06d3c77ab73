use std::collections::HashMap;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::constants::*;
use crate::error::{FinanceError, FinanceResult};
use crate::inheritance::resolve;
use crate::models::*;
use crate::month::{Clock, MonthKey, parse_date};
use crate::status::fixed_expense_status;
use crate::store::{
    DailyBudgetConfigStore, DailyExpenseStore, FixedExpenseStore, PocketStore, SalaryStore,
};
use crate::summary;
use crate::utils::*;

/// Validated reads and writes over the repository ports.
///
/// Holds its store and clock explicitly; nothing here reaches for global state.
pub struct FinanceService<S, C> {
    store: S,
    clock: C,
}

impl<S, C: Clock> FinanceService<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        FinanceService { store, clock }
    }
}

// Monthly configuration

impl<S: SalaryStore, C: Clock> FinanceService<S, C> {
    pub async fn resolve_salary(&self, month: &str) -> FinanceResult<Salary> {
        let month = MonthKey::parse(month)?;
        resolve(month, |key| self.store.salary_by_month(key)).await
    }

    pub async fn update_salary(&self, month: &str, monthly_amount: f64) -> FinanceResult<Salary> {
        let month = MonthKey::parse(month)?;
        let monthly_amount = validate_non_negative_amount(monthly_amount, "Monthly amount")?;
        Ok(self.store.upsert_salary(month, monthly_amount).await?)
    }
}

impl<S: DailyBudgetConfigStore, C: Clock> FinanceService<S, C> {
    pub async fn resolve_daily_budget(&self, month: &str) -> FinanceResult<DailyBudgetConfig> {
        let month = MonthKey::parse(month)?;
        resolve(month, |key| self.store.budget_config_by_month(key)).await
    }

    pub async fn update_daily_budget(
        &self,
        month: &str,
        monthly_budget: f64,
    ) -> FinanceResult<DailyBudgetConfig> {
        let month = MonthKey::parse(month)?;
        let monthly_budget = validate_non_negative_amount(monthly_budget, "Monthly budget")?;
        Ok(self.store.upsert_budget_config(month, monthly_budget).await?)
    }
}

// Summary

impl<S, C> FinanceService<S, C>
where
    S: SalaryStore + FixedExpenseStore + DailyExpenseStore + DailyBudgetConfigStore,
    C: Clock,
{
    pub async fn monthly_summary(&self, month: &str) -> FinanceResult<MonthlySummary> {
        summary::monthly_summary(&self.store, month).await
    }

    pub async fn current_monthly_summary(&self) -> FinanceResult<MonthlySummary> {
        let month = self.clock.current_month().to_string();
        summary::monthly_summary(&self.store, &month).await
    }
}

// Pockets

impl<S: PocketStore, C: Clock> FinanceService<S, C> {
    pub async fn pockets(&self) -> FinanceResult<Vec<Pocket>> {
        Ok(self.store.pockets().await?)
    }

    pub async fn pocket(&self, id: &str) -> FinanceResult<Pocket> {
        let id = validate_id(id, "Pocket ID")?;
        self.store
            .pocket_by_id(id)
            .await?
            .ok_or_else(|| FinanceError::not_found(format!("pocket {id}")))
    }

    pub async fn create_pocket(&self, payload: PocketPayload) -> FinanceResult<Pocket> {
        let name = validate_string_length(&payload.name, "Pocket name", MAX_POCKET_NAME_LENGTH)?;
        if self.store.pocket_by_name(&name).await?.is_some() {
            return Err(FinanceError::Conflict(
                "Pocket name already exists (case-insensitive)".to_string(),
            ));
        }

        let pocket = Pocket {
            id: Uuid::new_v4().to_string(),
            name,
            description: payload.description.trim().to_string(),
            created_at: OffsetDateTime::now_utc().unix_timestamp(),
        };
        self.store.create_pocket(&pocket).await?;
        Ok(pocket)
    }

    pub async fn update_pocket(&self, id: &str, payload: PocketPayload) -> FinanceResult<Pocket> {
        let name = validate_string_length(&payload.name, "Pocket name", MAX_POCKET_NAME_LENGTH)?;
        let mut pocket = self.pocket(id).await?;

        if let Some(existing) = self.store.pocket_by_name(&name).await? {
            if existing.id != pocket.id {
                return Err(FinanceError::Conflict(
                    "Pocket name already exists (case-insensitive)".to_string(),
                ));
            }
        }

        pocket.name = name;
        pocket.description = payload.description.trim().to_string();
        if !self.store.update_pocket(&pocket).await? {
            return Err(FinanceError::not_found(format!("pocket {}", pocket.id)));
        }
        Ok(pocket)
    }

    /// Refuses to delete a pocket that fixed expenses still reference.
    pub async fn delete_pocket(&self, id: &str) -> FinanceResult<()> {
        let pocket = self.pocket(id).await?;
        let usage = self.store.pocket_usage(&pocket.id).await?;
        if usage > 0 {
            return Err(FinanceError::Conflict(format!(
                "Pocket is used by {} fixed expense(s)",
                usage
            )));
        }
        self.store.delete_pocket(&pocket.id).await?;
        Ok(())
    }
}

// Fixed expenses

impl<S: FixedExpenseStore + PocketStore, C: Clock> FinanceService<S, C> {
    async fn ensure_pocket_exists(&self, pocket_id: &str) -> FinanceResult<String> {
        let pocket_id = validate_id(pocket_id, "Pocket ID")?;
        if self.store.pocket_by_id(pocket_id).await?.is_none() {
            return Err(FinanceError::validation("Pocket does not exist"));
        }
        Ok(pocket_id.to_string())
    }

    /// Expenses stored for `month`, each with its pocket name and current status.
    /// Nothing is carried over from earlier months.
    pub async fn fixed_expenses(&self, month: &str) -> FinanceResult<Vec<FixedExpenseView>> {
        let month = MonthKey::parse(month)?;
        let expenses = self.store.fixed_expenses_by_month(month).await?;
        let pocket_names: HashMap<String, String> = self
            .store
            .pockets()
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();
        let today = self.clock.today();

        Ok(expenses
            .into_iter()
            .map(|expense| FixedExpenseView {
                pocket_name: pocket_names
                    .get(&expense.pocket_id)
                    .cloned()
                    .unwrap_or_default(),
                status: fixed_expense_status(&expense, today),
                expense,
            })
            .collect())
    }

    pub async fn fixed_expense(&self, id: &str) -> FinanceResult<FixedExpense> {
        let id = validate_id(id, "Expense ID")?;
        self.store
            .fixed_expense_by_id(id)
            .await?
            .ok_or_else(|| FinanceError::not_found(format!("fixed expense {id}")))
    }

    /// New expenses start unpaid; the month defaults to the current business month.
    pub async fn create_fixed_expense(
        &self,
        payload: CreateFixedExpensePayload,
    ) -> FinanceResult<FixedExpense> {
        let concept_name = validate_string_length(
            &payload.concept_name,
            "Concept name",
            MAX_CONCEPT_NAME_LENGTH,
        )?;
        let amount = validate_positive_amount(payload.amount, "Amount")?;
        let payment_day = validate_payment_day(payload.payment_day)?;
        let pocket_id = self.ensure_pocket_exists(&payload.pocket_id).await?;

        let expense = FixedExpense {
            id: Uuid::new_v4().to_string(),
            pocket_id,
            concept_name,
            amount,
            payment_day,
            month: payload
                .month
                .unwrap_or_else(|| self.clock.current_month()),
            is_paid: false,
            paid_date: None,
        };
        self.store.create_fixed_expense(&expense).await?;
        Ok(expense)
    }

    /// Full update of the descriptive fields; payment state is left as stored.
    pub async fn update_fixed_expense(
        &self,
        id: &str,
        payload: UpdateFixedExpensePayload,
    ) -> FinanceResult<FixedExpense> {
        let mut expense = self.fixed_expense(id).await?;
        expense.concept_name = validate_string_length(
            &payload.concept_name,
            "Concept name",
            MAX_CONCEPT_NAME_LENGTH,
        )?;
        expense.amount = validate_positive_amount(payload.amount, "Amount")?;
        expense.payment_day = validate_payment_day(payload.payment_day)?;
        expense.pocket_id = self.ensure_pocket_exists(&payload.pocket_id).await?;
        expense.month = payload.month;

        if !self.store.update_fixed_expense(&expense).await? {
            return Err(FinanceError::not_found(format!("fixed expense {}", expense.id)));
        }
        Ok(expense)
    }

    /// Marking paid stamps today's business date; marking unpaid clears it.
    pub async fn update_payment_status(
        &self,
        id: &str,
        is_paid: bool,
    ) -> FinanceResult<FixedExpense> {
        let mut expense = self.fixed_expense(id).await?;
        expense.is_paid = is_paid;
        expense.paid_date = is_paid.then(|| self.clock.today());

        if !self
            .store
            .update_payment_status(&expense.id, expense.is_paid, expense.paid_date)
            .await?
        {
            return Err(FinanceError::not_found(format!("fixed expense {}", expense.id)));
        }
        Ok(expense)
    }

    pub async fn delete_fixed_expense(&self, id: &str) -> FinanceResult<()> {
        let expense = self.fixed_expense(id).await?;
        self.store.delete_fixed_expense(&expense.id).await?;
        Ok(())
    }
}

// Daily expenses

impl<S: DailyExpenseStore, C: Clock> FinanceService<S, C> {
    fn validate_daily_expense(
        &self,
        payload: &DailyExpensePayload,
    ) -> FinanceResult<(String, f64, time::Date)> {
        let description = validate_string_length(
            &payload.description,
            "Description",
            MAX_DAILY_EXPENSE_DESCRIPTION_LENGTH,
        )?;
        let amount = validate_positive_amount(payload.amount, "Amount")?;
        let date = parse_date(payload.date.trim())?;
        if date > self.clock.today() {
            return Err(FinanceError::validation(
                "expense date cannot be in the future",
            ));
        }
        Ok((description, amount, date))
    }

    pub async fn daily_expenses(&self, month: &str) -> FinanceResult<Vec<DailyExpense>> {
        let month = MonthKey::parse(month)?;
        Ok(self.store.daily_expenses_by_month(month).await?)
    }

    pub async fn daily_expense(&self, id: &str) -> FinanceResult<DailyExpense> {
        let id = validate_id(id, "Expense ID")?;
        self.store
            .daily_expense_by_id(id)
            .await?
            .ok_or_else(|| FinanceError::not_found(format!("daily expense {id}")))
    }

    pub async fn create_daily_expense(
        &self,
        payload: DailyExpensePayload,
    ) -> FinanceResult<DailyExpense> {
        let (description, amount, date) = self.validate_daily_expense(&payload)?;
        let expense = DailyExpense {
            id: Uuid::new_v4().to_string(),
            description,
            amount,
            date,
            created_at: OffsetDateTime::now_utc().unix_timestamp(),
        };
        self.store.create_daily_expense(&expense).await?;
        Ok(expense)
    }

    pub async fn update_daily_expense(
        &self,
        id: &str,
        payload: DailyExpensePayload,
    ) -> FinanceResult<DailyExpense> {
        let mut expense = self.daily_expense(id).await?;
        let (description, amount, date) = self.validate_daily_expense(&payload)?;
        expense.description = description;
        expense.amount = amount;
        expense.date = date;

        if !self.store.update_daily_expense(&expense).await? {
            return Err(FinanceError::not_found(format!("daily expense {}", expense.id)));
        }
        Ok(expense)
    }

    pub async fn delete_daily_expense(&self, id: &str) -> FinanceResult<()> {
        let expense = self.daily_expense(id).await?;
        self.store.delete_daily_expense(&expense.id).await?;
        Ok(())
    }
}
