//! Plain-text rendering of tracker views.
//!
//! Points are shown rounded to whole numbers and multipliers with two
//! decimals. Stored values are never rounded.

use rust_decimal::{Decimal, RoundingStrategy};

use tally_ledger::BucketAnomaly;
use tally_types::{Action, Activation, CategoryTotal, DaySummary, Multiplier, TodayView};

/// Whole points, rounding halves away from zero.
pub fn points(value: Decimal) -> String {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

/// A multiplier factor such as `×1.50`.
pub fn factor(value: Decimal) -> String {
    format!(
        "×{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Today's dashboard.
pub fn today(view: &TodayView, actions: &[Action], multipliers: &[Multiplier]) -> String {
    let mut lines = vec![
        view.date.label(),
        format!(
            "Total       {} pts across {} {}",
            points(view.bucket.total_points),
            view.categories_ranked.len(),
            if view.categories_ranked.len() == 1 {
                "category"
            } else {
                "categories"
            }
        ),
        format!("Multiplier  {}", factor(view.multiplier_product)),
    ];

    if !view.categories_ranked.is_empty() {
        lines.push(String::new());
        lines.push("Categories".to_owned());
        lines.extend(category_lines(&view.categories_ranked));
    }

    lines.push(String::new());
    lines.push("Boosts".to_owned());
    lines.extend(multiplier_lines(multipliers));

    lines.push(String::new());
    lines.push("Actions".to_owned());
    lines.extend(action_lines(actions));

    lines.join("\n")
}

/// The daily log, one block per day.
pub fn history(days: &[DaySummary]) -> String {
    if days.is_empty() {
        return "No days logged yet.".to_owned();
    }
    let mut lines = Vec::new();
    for day in days {
        let marker = if day.is_today { " (today)" } else { "" };
        lines.push(format!(
            "{}{marker}  {} pts",
            day.date.label(),
            points(day.total_points)
        ));
        lines.extend(category_lines(&day.categories));
    }
    lines.join("\n")
}

/// The action list with 1-based positions.
pub fn actions(actions: &[Action]) -> String {
    action_lines(actions).join("\n")
}

/// The boost list with 1-based positions.
pub fn multipliers(multipliers: &[Multiplier]) -> String {
    multiplier_lines(multipliers).join("\n")
}

/// One line confirming a recorded activation.
pub fn activation(activation: &Activation, action_name: &str, day_total: Decimal) -> String {
    format!(
        "+{} pts {} ({} {}), today {} pts",
        points(activation.gained),
        action_name,
        activation.category,
        factor(activation.multiplier_product),
        points(day_total)
    )
}

/// The result of the conservation check.
pub fn anomalies(anomalies: &[BucketAnomaly], days_checked: usize) -> String {
    if anomalies.is_empty() {
        return format!("All days balanced ({days_checked} checked).");
    }
    anomalies
        .iter()
        .map(|a| format!("{}: {}", a.date, a.message))
        .collect::<Vec<_>>()
        .join("\n")
}

fn category_lines(categories: &[CategoryTotal]) -> Vec<String> {
    categories
        .iter()
        .map(|c| format!("  {:<18} {:>6} pts", c.name, points(c.points)))
        .collect()
}

fn action_lines(actions: &[Action]) -> Vec<String> {
    if actions.is_empty() {
        return vec!["  No actions yet. Add one with `tally action add`.".to_owned()];
    }
    actions
        .iter()
        .zip(1..)
        .map(|(a, position): (&Action, usize)| {
            format!(
                "  {position:>2}. {:<24} +{} pts  {:<14} used {}× today  [{}]",
                a.name,
                a.base_points.normalize(),
                a.effective_category(),
                a.count_today,
                a.id
            )
        })
        .collect()
}

fn multiplier_lines(multipliers: &[Multiplier]) -> Vec<String> {
    if multipliers.is_empty() {
        return vec!["  No boosts yet. Add one with `tally boost add`.".to_owned()];
    }
    multipliers
        .iter()
        .zip(1..)
        .map(|(m, position): (&Multiplier, usize)| {
            let check = if m.active { "x" } else { " " };
            format!(
                "  {position:>2}. [{check}] {:<20} {}  [{}]",
                m.name,
                factor(m.value),
                m.id
            )
        })
        .collect()
}
