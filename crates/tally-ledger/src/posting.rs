//! Planning and applying the bucket change an activation produces.
//!
//! A [`Posting`] holds the new values for one bucket, computed with checked
//! arithmetic from the bucket as it stands. Planning can fail; applying
//! cannot. Callers plan every change first and only then touch the state,
//! so a failed activation never leaves a bucket half-updated.

use rust_decimal::Decimal;

use tally_types::{Activation, DailyBucket, DateKey};

use crate::LedgerError;

/// The new values of one bucket after an activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// The bucket's date.
    pub date: DateKey,
    /// The category credited.
    pub category: String,
    /// The gain being posted.
    pub gained: Decimal,
    /// The bucket total after the posting.
    pub total_points: Decimal,
    /// The category value after the posting.
    pub category_points: Decimal,
}

impl Posting {
    /// Compute the posting of `activation` onto `bucket`.
    ///
    /// `None` stands for a bucket that does not exist yet and is treated as
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if either sum overflows.
    pub fn plan(bucket: Option<&DailyBucket>, activation: &Activation) -> Result<Self, LedgerError> {
        let (current_total, current_category) = bucket.map_or((Decimal::ZERO, Decimal::ZERO), |b| {
            (b.total_points, b.category_points(&activation.category))
        });

        let total_points = current_total
            .checked_add(activation.gained)
            .ok_or(LedgerError::Overflow("bucket total"))?;
        let category_points = current_category
            .checked_add(activation.gained)
            .ok_or(LedgerError::Overflow("category total"))?;

        Ok(Self {
            date: activation.date,
            category: activation.category.clone(),
            gained: activation.gained,
            total_points,
            category_points,
        })
    }

    /// Write the planned values into `bucket`.
    pub fn apply(self, bucket: &mut DailyBucket) {
        tracing::debug!(
            date = %self.date,
            category = self.category,
            gained = %self.gained,
            total_points = %self.total_points,
            "posting activation"
        );
        bucket.total_points = self.total_points;
        bucket.categories.insert(self.category, self.category_points);
    }
}
