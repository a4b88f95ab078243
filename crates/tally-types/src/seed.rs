//! The fixed default record.
//!
//! A fresh install, a failed load and `clear_all` all start from this
//! record: three demo actions, two inactive multipliers and no history.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::ids::{ActionId, MultiplierId};
use crate::structs::{Action, Multiplier, TrackerState};

/// The seed actions, each with `count_today` at zero.
pub fn default_actions() -> Vec<Action> {
    vec![
        seed_action("a1", "Deep work (25 min)", 10, "Focus", "#38bdf8"),
        seed_action("a2", "Workout session", 20, "Health", "#22c55e"),
        seed_action("a3", "Social connection", 8, "Social", "#f97316"),
    ]
}

/// The seed multipliers, all inactive.
pub fn default_multipliers() -> Vec<Multiplier> {
    vec![
        Multiplier {
            id: MultiplierId::from("m1"),
            name: "Power hour".to_owned(),
            value: Decimal::new(20, 1),
            color: "#f97316".to_owned(),
            active: false,
        },
        Multiplier {
            id: MultiplierId::from("m2"),
            name: "Flow state".to_owned(),
            value: Decimal::new(15, 1),
            color: "#a855f7".to_owned(),
            active: false,
        },
    ]
}

/// The complete default record with empty daily totals.
pub fn default_state() -> TrackerState {
    TrackerState {
        actions: default_actions(),
        multipliers: default_multipliers(),
        daily_totals: BTreeMap::new(),
    }
}

fn seed_action(id: &str, name: &str, base_points: i64, category: &str, color: &str) -> Action {
    Action {
        id: ActionId::from(id),
        name: name.to_owned(),
        base_points: Decimal::new(base_points, 0),
        category: category.to_owned(),
        color: color.to_owned(),
        count_today: 0,
    }
}
