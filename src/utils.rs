use crate::constants::*;
use crate::error::{FinanceError, FinanceResult};

/// Trims `value` and checks it holds between 1 and `max_length` characters.
pub fn validate_string_length(
    value: &str,
    field_name: &str,
    max_length: usize,
) -> FinanceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FinanceError::validation(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    if trimmed.chars().count() > max_length {
        return Err(FinanceError::validation(format!(
            "{} cannot exceed {} characters",
            field_name, max_length
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_positive_amount(amount: f64, field_name: &str) -> FinanceResult<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(FinanceError::validation(format!(
            "{} must be greater than zero",
            field_name
        )));
    }
    Ok(amount)
}

pub fn validate_non_negative_amount(amount: f64, field_name: &str) -> FinanceResult<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(FinanceError::validation(format!(
            "{} cannot be negative",
            field_name
        )));
    }
    Ok(amount)
}

pub fn validate_payment_day(day: u8) -> FinanceResult<u8> {
    if !(MIN_PAYMENT_DAY..=MAX_PAYMENT_DAY).contains(&day) {
        return Err(FinanceError::validation(format!(
            "payment day must be between {} and {}",
            MIN_PAYMENT_DAY, MAX_PAYMENT_DAY
        )));
    }
    Ok(day)
}

pub fn validate_id<'a>(id: &'a str, field_name: &str) -> FinanceResult<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(FinanceError::validation(format!(
            "{} is required",
            field_name
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_length_trims_and_bounds() {
        assert_eq!(
            validate_string_length("  Rent  ", "Concept name", 255).unwrap(),
            "Rent"
        );
        assert!(validate_string_length("   ", "Concept name", 255).is_err());
        assert!(validate_string_length(&"a".repeat(256), "Concept name", 255).is_err());
        assert!(validate_string_length(&"a".repeat(255), "Concept name", 255).is_ok());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let accented = "é".repeat(255);
        assert!(validate_string_length(&accented, "Pocket name", 255).is_ok());
    }

    #[test]
    fn amounts() {
        assert!(validate_positive_amount(0.0, "Amount").is_err());
        assert!(validate_positive_amount(-1.0, "Amount").is_err());
        assert!(validate_positive_amount(f64::NAN, "Amount").is_err());
        assert!(validate_positive_amount(0.01, "Amount").is_ok());
        assert!(validate_non_negative_amount(0.0, "Monthly amount").is_ok());
        assert!(validate_non_negative_amount(-0.5, "Monthly amount").is_err());
        assert!(validate_non_negative_amount(f64::INFINITY, "Monthly amount").is_err());
    }

    #[test]
    fn payment_day_range() {
        assert!(validate_payment_day(0).is_err());
        assert!(validate_payment_day(1).is_ok());
        assert!(validate_payment_day(31).is_ok());
        assert!(validate_payment_day(32).is_err());
    }

    #[test]
    fn ids_must_not_be_blank() {
        assert_eq!(validate_id(" abc ", "Pocket ID").unwrap(), "abc");
        assert!(validate_id("  ", "Pocket ID").is_err());
    }
}
