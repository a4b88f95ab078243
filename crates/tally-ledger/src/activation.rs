//! Builder for validated [`Activation`] records.
//!
//! Every activation must pass through the builder, which checks that the
//! inputs are present and non-negative and computes the gain with checked
//! arithmetic. Nothing is mutated here; the caller applies the record.

use rust_decimal::Decimal;

use tally_types::{Action, ActionId, Activation, DateKey};

use crate::LedgerError;

/// Builds a validated [`Activation`] for one action on one day.
///
/// # Example
///
/// ```
/// use tally_ledger::ActivationBuilder;
/// use tally_types::{default_actions, DateKey};
/// use rust_decimal::Decimal;
///
/// let actions = default_actions();
/// let activation = ActivationBuilder::new(DateKey::from_ymd(2026, 1, 1).unwrap())
///     .action(&actions[1])
///     .multiplier_product(Decimal::new(15, 1))
///     .build()
///     .unwrap();
/// assert_eq!(activation.gained, Decimal::new(30, 0));
/// assert_eq!(activation.category, "Health");
/// ```
#[derive(Debug, Clone)]
pub struct ActivationBuilder {
    date: DateKey,
    action_id: Option<ActionId>,
    category: Option<String>,
    base_points: Option<Decimal>,
    multiplier_product: Option<Decimal>,
}

impl ActivationBuilder {
    /// Start a new activation credited to `date`.
    pub const fn new(date: DateKey) -> Self {
        Self {
            date,
            action_id: None,
            category: None,
            base_points: None,
            multiplier_product: None,
        }
    }

    /// Take the id, base points and effective category from `action`.
    #[must_use]
    pub fn action(mut self, action: &Action) -> Self {
        self.action_id = Some(action.id.clone());
        self.category = Some(action.effective_category().to_owned());
        self.base_points = Some(action.base_points);
        self
    }

    /// Set the product of the active multiplier values.
    #[must_use]
    pub const fn multiplier_product(mut self, product: Decimal) -> Self {
        self.multiplier_product = Some(product);
        self
    }

    /// Validate the inputs and compute the gain.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MissingField`] if the action or the multiplier
    /// product was not set, [`LedgerError::NegativeQuantity`] if either is
    /// negative, or [`LedgerError::Overflow`] if the gain overflows.
    pub fn build(self) -> Result<Activation, LedgerError> {
        let action_id = self.action_id.ok_or(LedgerError::MissingField("action"))?;
        let category = self.category.ok_or(LedgerError::MissingField("action"))?;
        let base_points = self
            .base_points
            .ok_or(LedgerError::MissingField("action"))?;
        let multiplier_product = self
            .multiplier_product
            .ok_or(LedgerError::MissingField("multiplier_product"))?;

        if base_points.is_sign_negative() {
            return Err(LedgerError::NegativeQuantity {
                field: "base points",
                quantity: base_points,
            });
        }
        if multiplier_product.is_sign_negative() {
            return Err(LedgerError::NegativeQuantity {
                field: "multiplier product",
                quantity: multiplier_product,
            });
        }

        let gained = base_points
            .checked_mul(multiplier_product)
            .ok_or(LedgerError::Overflow("gained points"))?;

        Ok(Activation {
            action_id,
            date: self.date,
            category,
            base_points,
            multiplier_product,
            gained,
        })
    }
}
