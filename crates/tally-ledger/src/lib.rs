//! Point arithmetic and daily bucket bookkeeping for the Tally tracker.
//!
//! Every point in the tracker enters through an activation. This crate turns
//! an action plus the current multipliers into an [`Activation`], plans how
//! that activation changes a day's bucket, and checks that buckets stay
//! internally consistent.
//!
//! # Architecture
//!
//! - [`product`] -- The product of active multiplier values.
//! - [`activation`] -- The [`ActivationBuilder`] for validated activation records.
//! - [`posting`] -- [`Posting`]: the new bucket values an activation produces.
//! - [`conservation`] -- Bucket consistency verification.
//!
//! # Conservation Law
//!
//! For every date D:
//!
//! ```text
//! bucket(D).totalPoints == sum(bucket(D).categories[c] for every c)
//! ```
//!
//! Each posting adds the same gain to the total and to exactly one category,
//! so the law holds by construction for buckets written here. The check
//! exists for documents written elsewhere.
//!
//! # Usage
//!
//! ```
//! use tally_ledger::{multiplier_product, ActivationBuilder, Posting};
//! use tally_types::{default_state, DailyBucket, DateKey};
//! use rust_decimal::Decimal;
//!
//! let mut state = default_state();
//! state.multipliers[0].active = true; // Power hour, x2
//!
//! let date = DateKey::from_ymd(2026, 10, 16).unwrap();
//! let product = multiplier_product(&state.multipliers).unwrap();
//! let activation = ActivationBuilder::new(date)
//!     .action(&state.actions[0])
//!     .multiplier_product(product)
//!     .build()
//!     .unwrap();
//!
//! let mut bucket = DailyBucket::default();
//! Posting::plan(Some(&bucket), &activation).unwrap().apply(&mut bucket);
//! assert_eq!(bucket.total_points, Decimal::new(20, 0));
//! ```

pub mod activation;
pub mod conservation;
pub mod posting;
pub mod product;

// Re-export primary types at crate root.
pub use activation::ActivationBuilder;
pub use conservation::{verify_all, verify_bucket, ConservationResult, DEFAULT_TOLERANCE};
pub use posting::Posting;
pub use product::multiplier_product;

use rust_decimal::Decimal;

use tally_types::DateKey;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when computing or posting an activation.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A quantity that feeds a gain must not be negative.
    #[error("{field} must not be negative, got {quantity}")]
    NegativeQuantity {
        /// Which quantity was invalid.
        field: &'static str,
        /// The invalid quantity.
        quantity: Decimal,
    },

    /// A required field was not set on the builder.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Checked decimal or counter arithmetic overflowed.
    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// A bucket whose total does not match its categories.
///
/// Produced by the conservation check; never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketAnomaly {
    /// The date of the inconsistent bucket.
    pub date: DateKey,
    /// The recorded total.
    pub total_points: Decimal,
    /// The sum of the recorded category values.
    pub category_sum: Decimal,
    /// Categories holding a negative value.
    pub negative_categories: Vec<String>,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for BucketAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
