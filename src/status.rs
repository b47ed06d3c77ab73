use time::Date;

use crate::models::{FixedExpense, FixedExpenseStatus};

/// Payment status of a fixed expense as of `today`.
///
/// Only the expense's own month can turn overdue: an unpaid expense from a past
/// month stays `Pending`.
pub fn fixed_expense_status(expense: &FixedExpense, today: Date) -> FixedExpenseStatus {
    if expense.is_paid {
        return FixedExpenseStatus::Paid;
    }

    if expense.month.contains(today) && today.day() > expense.payment_day {
        FixedExpenseStatus::Overdue
    } else {
        FixedExpenseStatus::Pending
    }
}
