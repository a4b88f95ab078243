//! The multiplier product applied to an activation.

use rust_decimal::Decimal;

use tally_types::Multiplier;

use crate::LedgerError;

/// Product of `value` over every active multiplier.
///
/// The empty product is exactly [`Decimal::ONE`], so an activation with no
/// active multiplier earns its base points unchanged. Inactive multipliers
/// are ignored regardless of their value.
///
/// # Errors
///
/// Returns [`LedgerError::NegativeQuantity`] if an active multiplier has a
/// negative value, or [`LedgerError::Overflow`] if the product overflows.
pub fn multiplier_product<'a, I>(multipliers: I) -> Result<Decimal, LedgerError>
where
    I: IntoIterator<Item = &'a Multiplier>,
{
    multipliers
        .into_iter()
        .filter(|m| m.active)
        .try_fold(Decimal::ONE, |product, m| {
            if m.value.is_sign_negative() {
                return Err(LedgerError::NegativeQuantity {
                    field: "multiplier value",
                    quantity: m.value,
                });
            }
            product
                .checked_mul(m.value)
                .ok_or(LedgerError::Overflow("multiplier product"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_types::{default_multipliers, MultiplierId};

    fn boost(value: Decimal, active: bool) -> Multiplier {
        Multiplier {
            id: MultiplierId::new(),
            name: "boost".to_owned(),
            value,
            color: "#000000".to_owned(),
            active,
        }
    }

    #[test]
    fn no_active_multipliers_is_exactly_one() {
        let product = multiplier_product(&default_multipliers()).ok();
        assert_eq!(product, Some(Decimal::ONE));

        let empty: Vec<Multiplier> = Vec::new();
        assert_eq!(multiplier_product(&empty).ok(), Some(Decimal::ONE));
    }

    #[test]
    fn active_values_multiply() {
        let multipliers = vec![
            boost(Decimal::new(2, 0), true),
            boost(Decimal::new(15, 1), true),
            boost(Decimal::new(10, 0), false),
        ];
        assert_eq!(
            multiplier_product(&multipliers).ok(),
            Some(Decimal::new(3, 0))
        );
    }

    #[test]
    fn negative_active_value_rejected() {
        let multipliers = vec![boost(Decimal::new(-2, 0), true)];
        let result = multiplier_product(&multipliers);
        assert!(matches!(
            result,
            Err(LedgerError::NegativeQuantity { .. })
        ));
    }

    #[test]
    fn overflow_is_reported() {
        let multipliers = vec![boost(Decimal::MAX, true), boost(Decimal::new(2, 0), true)];
        let result = multiplier_product(&multipliers);
        assert!(matches!(result, Err(LedgerError::Overflow(_))));
    }
}
