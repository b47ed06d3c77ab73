//! One-hop inheritance of monthly configuration.
//!
//! A month without its own salary or daily budget borrows the figure of the
//! month right before it. The borrowed record is re-stamped onto the requested
//! month and carries no id, so callers can tell it was never saved. Gaps wider
//! than one month resolve to `NotFound` instead of reaching further back.

use anyhow::Result;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{DailyBudgetConfig, Salary};
use crate::month::MonthKey;

/// A month-keyed configuration record that can be carried into a later month.
pub trait Inheritable: Sized {
    const KIND: &'static str;

    /// Copy of the configuration value only, stamped onto `month`, unsaved.
    fn inherit_into(&self, month: MonthKey) -> Self;

    fn is_inherited(&self) -> bool;
}

impl Inheritable for Salary {
    const KIND: &'static str = "salary";

    fn inherit_into(&self, month: MonthKey) -> Self {
        Salary {
            id: None,
            monthly_amount: self.monthly_amount,
            month,
        }
    }

    fn is_inherited(&self) -> bool {
        self.id.is_none()
    }
}

impl Inheritable for DailyBudgetConfig {
    const KIND: &'static str = "daily budget configuration";

    fn inherit_into(&self, month: MonthKey) -> Self {
        DailyBudgetConfig {
            id: None,
            monthly_budget: self.monthly_budget,
            month,
        }
    }

    fn is_inherited(&self) -> bool {
        self.id.is_none()
    }
}

/// Returns the record stored for `month`, else the previous month's record
/// re-stamped onto `month`, else `NotFound`.
pub async fn resolve<T, F, Fut>(month: MonthKey, lookup: F) -> FinanceResult<T>
where
    T: Inheritable,
    F: Fn(MonthKey) -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    if let Some(record) = lookup(month).await? {
        return Ok(record);
    }

    match lookup(month.previous()).await? {
        Some(previous) => Ok(previous.inherit_into(month)),
        None => Err(FinanceError::not_found(format!("{} for {month}", T::KIND))),
    }
}
