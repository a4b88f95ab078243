//! Read-only projections handed to the presentation layer.
//!
//! Views are derived from a [`TrackerState`](crate::TrackerState) on demand
//! and never written back.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::date::DateKey;
use crate::ids::MultiplierId;
use crate::structs::{CategoryTotal, DailyBucket};

/// Everything the dashboard needs for the current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TodayView {
    /// The current date key.
    pub date: DateKey,
    /// Today's bucket (empty if nothing was recorded yet).
    pub bucket: DailyBucket,
    /// Product of all active multiplier values (exactly 1 when none are active).
    #[ts(type = "number")]
    pub multiplier_product: Decimal,
    /// Ids of the multipliers that are active, in display order.
    pub active_multipliers: Vec<MultiplierId>,
    /// Today's categories, highest points first.
    pub categories_ranked: Vec<CategoryTotal>,
}

/// One entry of the daily log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DaySummary {
    /// The date of the bucket.
    pub date: DateKey,
    /// Whether the date is the current day.
    pub is_today: bool,
    /// Total points for the date.
    #[ts(type = "number")]
    pub total_points: Decimal,
    /// Categories for the date, highest points first.
    pub categories: Vec<CategoryTotal>,
}
