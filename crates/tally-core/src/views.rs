//! Read-only projections of the root state.
//!
//! Views never create buckets: a date with no bucket shows as empty.

use tally_ledger::{multiplier_product, LedgerError};
use tally_types::{DailyBucket, DateKey, DaySummary, TodayView, TrackerState};

/// The dashboard for `date`: its bucket, ranked categories and the current
/// multiplier product.
///
/// # Errors
///
/// Returns [`LedgerError`] if the active multipliers cannot be multiplied.
pub fn today_view(state: &TrackerState, date: DateKey) -> Result<TodayView, LedgerError> {
    let bucket = state.bucket(date).cloned().unwrap_or_default();
    let categories_ranked = bucket.ranked_categories();
    Ok(TodayView {
        date,
        multiplier_product: multiplier_product(&state.multipliers)?,
        active_multipliers: state.active_multipliers().map(|m| m.id.clone()).collect(),
        categories_ranked,
        bucket,
    })
}

/// One summary per stored day, newest first.
pub fn history(state: &TrackerState, today: DateKey) -> Vec<DaySummary> {
    state
        .daily_totals
        .iter()
        .rev()
        .map(|(date, bucket)| summarize(*date, bucket, today))
        .collect()
}

fn summarize(date: DateKey, bucket: &DailyBucket, today: DateKey) -> DaySummary {
    DaySummary {
        date,
        is_today: date == today,
        total_points: bucket.total_points,
        categories: bucket.ranked_categories(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use rust_decimal::Decimal;
    use tally_types::default_state;

    fn date(d: u32) -> DateKey {
        DateKey::from_ymd(2026, 10, d).expect("valid date")
    }

    fn bucket(total: i64, categories: &[(&str, i64)]) -> DailyBucket {
        DailyBucket {
            total_points: Decimal::new(total, 0),
            categories: categories
                .iter()
                .map(|(name, points)| ((*name).to_owned(), Decimal::new(*points, 0)))
                .collect(),
        }
    }

    #[test]
    fn absent_bucket_shows_empty_without_creating() {
        let state = default_state();
        let view = today_view(&state, date(16)).expect("view");
        assert_eq!(view.bucket, DailyBucket::default());
        assert!(view.categories_ranked.is_empty());
        assert_eq!(view.multiplier_product, Decimal::ONE);
        assert!(state.daily_totals.is_empty());
    }

    #[test]
    fn today_view_reflects_active_multipliers() {
        let mut state = default_state();
        for m in &mut state.multipliers {
            m.active = true;
        }
        let view = today_view(&state, date(16)).expect("view");
        assert_eq!(view.multiplier_product, Decimal::new(30, 1));
        assert_eq!(view.active_multipliers.len(), 2);
    }

    #[test]
    fn today_view_ranks_categories() {
        let mut state = default_state();
        state
            .daily_totals
            .insert(date(16), bucket(38, &[("Social", 8), ("Health", 20), ("Focus", 10)]));
        let view = today_view(&state, date(16)).expect("view");
        let names: Vec<&str> = view.categories_ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Health", "Focus", "Social"]);
    }

    #[test]
    fn history_is_newest_first() {
        let mut state = default_state();
        state.daily_totals.insert(date(14), bucket(5, &[("Focus", 5)]));
        state.daily_totals.insert(date(16), bucket(0, &[]));
        state.daily_totals.insert(date(15), bucket(20, &[("Health", 20)]));

        let days = history(&state, date(16));
        let dates: Vec<DateKey> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(16), date(15), date(14)]);
        assert!(days.first().is_some_and(|d| d.is_today));
        assert!(days.iter().skip(1).all(|d| !d.is_today));
    }
}
