//! Input validation for action and multiplier edits.
//!
//! Every check runs before the state is touched, so a rejected edit leaves
//! the tracker exactly as it was.

use rust_decimal::Decimal;

use crate::error::TrackerError;

/// Trim `name` and reject it if nothing is left.
pub fn validate_name(name: &str) -> Result<String, TrackerError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::Validation {
            field: "name",
            reason: "must not be empty".to_owned(),
        });
    }
    Ok(trimmed.to_owned())
}

/// Reject zero and negative values.
pub fn validate_positive(field: &'static str, value: Decimal) -> Result<Decimal, TrackerError> {
    if value <= Decimal::ZERO {
        return Err(TrackerError::Validation {
            field,
            reason: format!("must be greater than zero, got {value}"),
        });
    }
    Ok(value)
}

/// Trim an optional text field, substituting `fallback` when blank.
pub fn trimmed_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(validate_name("  Read  ").ok().as_deref(), Some("Read"));
    }

    #[test]
    fn blank_name_rejected() {
        for name in ["", "   ", "\t\n"] {
            assert!(matches!(
                validate_name(name),
                Err(TrackerError::Validation { field: "name", .. })
            ));
        }
    }

    #[test]
    fn non_positive_values_rejected() {
        assert!(validate_positive("base points", Decimal::ZERO).is_err());
        assert!(validate_positive("base points", Decimal::new(-5, 0)).is_err());
        assert_eq!(
            validate_positive("value", Decimal::new(1, 2)).ok(),
            Some(Decimal::new(1, 2))
        );
    }

    #[test]
    fn blank_text_falls_back() {
        assert_eq!(trimmed_or("  ", "Uncategorized"), "Uncategorized");
        assert_eq!(trimmed_or(" Focus ", "Uncategorized"), "Focus");
    }
}
