//! Core entity structs for the tracker.
//!
//! Covers [`Action`], [`Multiplier`], [`DailyBucket`] and the root
//! [`TrackerState`] record. Field names are camelCase on the wire so the
//! persisted document keeps the layout of the browser version
//! (`basePoints`, `countToday`, `dailyTotals`, `totalPoints`).
//!
//! All point quantities are [`Decimal`] and serialize as JSON numbers.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::date::DateKey;
use crate::ids::{ActionId, MultiplierId};

/// Category recorded for activations of an action without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Colour given to actions created without one.
pub const DEFAULT_ACTION_COLOR: &str = "#38bdf8";

/// Colour given to multipliers created without one.
pub const DEFAULT_MULTIPLIER_COLOR: &str = "#f97316";

fn default_category() -> String {
    UNCATEGORIZED.to_owned()
}

fn default_action_color() -> String {
    DEFAULT_ACTION_COLOR.to_owned()
}

fn default_multiplier_color() -> String {
    DEFAULT_MULTIPLIER_COLOR.to_owned()
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A user-defined, point-bearing activity that can be activated any number
/// of times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Action {
    /// Unique action identifier.
    pub id: ActionId,
    /// Display name.
    pub name: String,
    /// Points earned per activation before multipliers (strictly positive).
    #[ts(type = "number")]
    pub base_points: Decimal,
    /// Category the gains of this action are accumulated under.
    #[serde(default = "default_category")]
    pub category: String,
    /// Display colour (CSS colour string).
    #[serde(default = "default_action_color")]
    pub color: String,
    /// Number of activations since the action was created or reset.
    #[serde(default)]
    #[ts(type = "number")]
    pub count_today: u64,
}

impl Action {
    /// The category an activation of this action is credited to.
    ///
    /// An empty category falls back to [`UNCATEGORIZED`]; any other value
    /// is used exactly as stored, so documents from other clients keep
    /// crediting the same keys.
    pub fn effective_category(&self) -> &str {
        if self.category.is_empty() {
            UNCATEGORIZED
        } else {
            &self.category
        }
    }
}

// ---------------------------------------------------------------------------
// Multiplier
// ---------------------------------------------------------------------------

/// A toggleable factor that scales points earned while active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Multiplier {
    /// Unique multiplier identifier.
    pub id: MultiplierId,
    /// Display name.
    pub name: String,
    /// Factor applied to every activation while active (strictly positive).
    #[ts(type = "number")]
    pub value: Decimal,
    /// Display colour (CSS colour string).
    #[serde(default = "default_multiplier_color")]
    pub color: String,
    /// Whether the multiplier currently applies.
    #[serde(default)]
    pub active: bool,
}

// ---------------------------------------------------------------------------
// DailyBucket
// ---------------------------------------------------------------------------

/// Aggregated totals for one calendar date.
///
/// `total_points` is the sum of every gain recorded on the date and each
/// `categories` entry is the sum of the gains credited to that category.
/// Both only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DailyBucket {
    /// Sum of all activation gains recorded for the date.
    #[serde(default)]
    #[ts(type = "number")]
    pub total_points: Decimal,
    /// Accumulated points per category name.
    #[serde(default)]
    #[ts(type = "Record<string, number>")]
    pub categories: BTreeMap<String, Decimal>,
}

impl DailyBucket {
    /// Points accumulated under `category`, zero if it has none.
    pub fn category_points(&self, category: &str) -> Decimal {
        self.categories
            .get(category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Categories ordered by points, highest first. Ties sort by name.
    pub fn ranked_categories(&self) -> Vec<CategoryTotal> {
        let mut ranked: Vec<CategoryTotal> = self
            .categories
            .iter()
            .map(|(name, points)| CategoryTotal {
                name: name.clone(),
                points: *points,
            })
            .collect();
        ranked.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name)));
        ranked
    }
}

/// Points accumulated under one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CategoryTotal {
    /// Category name.
    pub name: String,
    /// Accumulated points.
    #[ts(type = "number")]
    pub points: Decimal,
}

// ---------------------------------------------------------------------------
// Activation
// ---------------------------------------------------------------------------

/// The record of one activation: what was earned, where it was credited.
///
/// The category is the action's category at the moment of activation. A
/// later rename of the action does not touch buckets already credited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Activation {
    /// The activated action.
    pub action_id: ActionId,
    /// The day the gain was credited to.
    pub date: DateKey,
    /// The category the gain was credited to.
    pub category: String,
    /// The action's base points at activation time.
    #[ts(type = "number")]
    pub base_points: Decimal,
    /// Product of the active multiplier values at activation time.
    #[ts(type = "number")]
    pub multiplier_product: Decimal,
    /// Points gained: `base_points * multiplier_product`, unrounded.
    #[ts(type = "number")]
    pub gained: Decimal,
}

// ---------------------------------------------------------------------------
// Root state
// ---------------------------------------------------------------------------

/// The complete persisted record: actions, multipliers and all daily buckets.
///
/// The order of `actions` and `multipliers` is the display order chosen by
/// the user; it has no effect on point arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TrackerState {
    /// Actions in display order.
    pub actions: Vec<Action>,
    /// Multipliers in display order.
    pub multipliers: Vec<Multiplier>,
    /// Daily buckets keyed by calendar date.
    pub daily_totals: BTreeMap<DateKey, DailyBucket>,
}

impl TrackerState {
    /// Look up an action by id.
    pub fn action(&self, id: &ActionId) -> Option<&Action> {
        self.actions.iter().find(|a| &a.id == id)
    }

    /// Look up an action by id for mutation.
    pub fn action_mut(&mut self, id: &ActionId) -> Option<&mut Action> {
        self.actions.iter_mut().find(|a| &a.id == id)
    }

    /// Position of an action in display order.
    pub fn action_position(&self, id: &ActionId) -> Option<usize> {
        self.actions.iter().position(|a| &a.id == id)
    }

    /// Look up a multiplier by id.
    pub fn multiplier(&self, id: &MultiplierId) -> Option<&Multiplier> {
        self.multipliers.iter().find(|m| &m.id == id)
    }

    /// Look up a multiplier by id for mutation.
    pub fn multiplier_mut(&mut self, id: &MultiplierId) -> Option<&mut Multiplier> {
        self.multipliers.iter_mut().find(|m| &m.id == id)
    }

    /// Position of a multiplier in display order.
    pub fn multiplier_position(&self, id: &MultiplierId) -> Option<usize> {
        self.multipliers.iter().position(|m| &m.id == id)
    }

    /// Multipliers that are currently active, in display order.
    pub fn active_multipliers(&self) -> impl Iterator<Item = &Multiplier> {
        self.multipliers.iter().filter(|m| m.active)
    }

    /// The bucket for `date`, if one has been created.
    pub fn bucket(&self, date: DateKey) -> Option<&DailyBucket> {
        self.daily_totals.get(&date)
    }
}
