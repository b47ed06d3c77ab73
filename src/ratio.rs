use crate::constants::RATIO_UNBOUNDED;

/// Integer percentage of `budget` consumed by `spent`, floored.
///
/// A zero budget yields 0 when nothing was spent and [`RATIO_UNBOUNDED`]
/// otherwise. Results beyond the `i32` range saturate.
pub fn budget_ratio(budget: f64, spent: f64) -> i32 {
    if budget <= 0.0 {
        return if spent > 0.0 { RATIO_UNBOUNDED } else { 0 };
    }
    (spent / budget * 100.0).floor() as i32
}
