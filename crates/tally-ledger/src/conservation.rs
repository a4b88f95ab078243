//! Consistency verification for daily buckets.
//!
//! Postings keep every bucket balanced by construction: each one adds the
//! same gain to the total and to a single category. Buckets written by
//! other clients (the browser app accumulated binary floats) may drift, so
//! the comparison allows a small tolerance.
//!
//! For each date D the check is:
//!
//! ```text
//! |total(D) - sum(categories(D))| <= tolerance  and  every category >= 0
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use tally_types::{DailyBucket, DateKey};

use crate::BucketAnomaly;

/// Tolerance that absorbs float drift in documents from the browser app.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// The result of a consistency check for a single bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConservationResult {
    /// The bucket is balanced.
    Balanced,
    /// The bucket's total and categories disagree, or a value is negative.
    Anomaly(BucketAnomaly),
}

impl ConservationResult {
    /// Whether the bucket is balanced.
    pub const fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

/// Verify one bucket.
pub fn verify_bucket(date: DateKey, bucket: &DailyBucket, tolerance: Decimal) -> ConservationResult {
    let mut category_sum = Decimal::ZERO;
    for points in bucket.categories.values() {
        category_sum = match category_sum.checked_add(*points) {
            Some(sum) => sum,
            None => return overflow_anomaly(date, bucket),
        };
    }

    let negative_categories: Vec<String> = bucket
        .categories
        .iter()
        .filter(|(_, points)| points.is_sign_negative() && !points.is_zero())
        .map(|(name, _)| name.clone())
        .collect();

    let difference = bucket
        .total_points
        .checked_sub(category_sum)
        .map(|d| d.abs());
    let balanced = difference.is_some_and(|d| d <= tolerance);

    if balanced && negative_categories.is_empty() && !bucket.total_points.is_sign_negative() {
        return ConservationResult::Balanced;
    }

    let message = if negative_categories.is_empty() {
        format!(
            "bucket {date}: total {} does not match category sum {category_sum}",
            bucket.total_points
        )
    } else {
        format!(
            "bucket {date}: negative points in {}",
            negative_categories.join(", ")
        )
    };

    tracing::warn!(date = %date, total = %bucket.total_points, category_sum = %category_sum, "bucket anomaly");

    ConservationResult::Anomaly(BucketAnomaly {
        date,
        total_points: bucket.total_points,
        category_sum,
        negative_categories,
        message,
    })
}

/// Verify every bucket, returning the anomalies in date order.
pub fn verify_all(
    daily_totals: &BTreeMap<DateKey, DailyBucket>,
    tolerance: Decimal,
) -> Vec<BucketAnomaly> {
    daily_totals
        .iter()
        .filter_map(|(date, bucket)| match verify_bucket(*date, bucket, tolerance) {
            ConservationResult::Balanced => None,
            ConservationResult::Anomaly(anomaly) => Some(anomaly),
        })
        .collect()
}

/// Build an anomaly for a category sum that cannot be represented.
fn overflow_anomaly(date: DateKey, bucket: &DailyBucket) -> ConservationResult {
    ConservationResult::Anomaly(BucketAnomaly {
        date,
        total_points: bucket.total_points,
        category_sum: Decimal::MAX,
        negative_categories: Vec::new(),
        message: format!("bucket {date}: category sum overflows"),
    })
}
