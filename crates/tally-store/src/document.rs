//! Tolerant decoding of the persisted document.
//!
//! The stored document may have been written by an older client, edited by
//! hand, or truncated. Decoding never fails: an unparsable document yields
//! the default record, and each of `actions`, `multipliers` and
//! `dailyTotals` independently falls back to its default when it is
//! missing, null or does not match the schema.

use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use tally_types::{
    default_actions, default_multipliers, default_state, Action, DailyBucket, DateKey,
    Multiplier, TrackerState,
};

use crate::error::{StateField, StoreError};

/// Where a loaded state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing was stored; the state is the default record.
    Empty,
    /// A stored document was decoded (possibly with per-field recovery).
    Stored,
    /// The slot could not be read; the state is the default record.
    Unreadable,
}

/// What happened while loading the persisted state.
#[derive(Debug)]
pub struct LoadReport {
    /// Where the state came from.
    pub source: LoadSource,
    /// Fields that were absent or null and took their default.
    pub defaulted: Vec<StateField>,
    /// Corruption that was recovered from, as
    /// [`StoreError::PersistenceCorrupt`] (or the slot error for
    /// [`LoadSource::Unreadable`]).
    pub corrupt: Vec<StoreError>,
}

impl LoadReport {
    /// A report with nothing to say.
    pub const fn new(source: LoadSource) -> Self {
        Self {
            source,
            defaulted: Vec::new(),
            corrupt: Vec::new(),
        }
    }

    /// Whether no corruption was found.
    pub const fn is_clean(&self) -> bool {
        self.corrupt.is_empty()
    }
}

/// Decode a stored document, recording every recovery in `report`.
pub fn decode_document(raw: &str, report: &mut LoadReport) -> TrackerState {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            corrupt(report, StateField::Document, e.to_string());
            return default_state();
        }
    };

    let mut fields = match value {
        Value::Object(fields) => fields,
        Value::Null => {
            report.defaulted.push(StateField::Document);
            return default_state();
        }
        other => {
            corrupt(
                report,
                StateField::Document,
                format!("expected an object, found {}", json_kind(&other)),
            );
            return default_state();
        }
    };

    let mut actions: Vec<Action> =
        decode_sequence(&mut fields, StateField::Actions, default_actions, report);
    let mut multipliers: Vec<Multiplier> =
        decode_sequence(&mut fields, StateField::Multipliers, default_multipliers, report);
    let daily_totals = decode_daily_totals(&mut fields, report);

    let dropped = dedup_by_key(&mut actions, |a| a.id.clone());
    if dropped > 0 {
        corrupt(
            report,
            StateField::Actions,
            format!("dropped {dropped} action(s) with a duplicate id"),
        );
    }
    let dropped = dedup_by_key(&mut multipliers, |m| m.id.clone());
    if dropped > 0 {
        corrupt(
            report,
            StateField::Multipliers,
            format!("dropped {dropped} multiplier(s) with a duplicate id"),
        );
    }

    TrackerState {
        actions,
        multipliers,
        daily_totals,
    }
}

/// Serialize the full state as the persisted document.
///
/// # Errors
///
/// Returns [`StoreError::Serialization`] if serialization fails.
pub fn encode_document(state: &TrackerState) -> Result<String, StoreError> {
    Ok(serde_json::to_string(state)?)
}

/// Take a sequence field out of the document.
///
/// An absent or null field takes `default`; a field that is not an array is
/// corrupt and takes `default`. Inside an array, each element that does not
/// match the schema is dropped on its own and the rest are kept.
fn decode_sequence<T, F>(
    fields: &mut Map<String, Value>,
    field: StateField,
    default: F,
    report: &mut LoadReport,
) -> Vec<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match fields.remove(field.as_str()) {
        None | Some(Value::Null) => {
            tracing::debug!(field = field.as_str(), "field absent, using default");
            report.defaulted.push(field);
            default()
        }
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| {
                serde_json::from_value(item)
                    .map_err(|e| corrupt(report, field, format!("dropped entry {index}: {e}")))
                    .ok()
            })
            .collect(),
        Some(other) => {
            corrupt(
                report,
                field,
                format!("expected an array, found {}", json_kind(&other)),
            );
            default()
        }
    }
}

/// Take `dailyTotals` out of the document, keeping every day that decodes.
///
/// A day whose key is not a date or whose bucket does not match the schema
/// is dropped on its own.
fn decode_daily_totals(
    fields: &mut Map<String, Value>,
    report: &mut LoadReport,
) -> BTreeMap<DateKey, DailyBucket> {
    let field = StateField::DailyTotals;
    let days = match fields.remove(field.as_str()) {
        None | Some(Value::Null) => {
            tracing::debug!(field = field.as_str(), "field absent, using default");
            report.defaulted.push(field);
            return BTreeMap::new();
        }
        Some(Value::Object(days)) => days,
        Some(other) => {
            corrupt(
                report,
                field,
                format!("expected an object, found {}", json_kind(&other)),
            );
            return BTreeMap::new();
        }
    };

    let mut daily_totals = BTreeMap::new();
    for (key, value) in days {
        let date = match key.parse::<DateKey>() {
            Ok(date) => date,
            Err(e) => {
                corrupt(report, field, format!("dropped day: {e}"));
                continue;
            }
        };
        match serde_json::from_value::<DailyBucket>(value) {
            Ok(bucket) => {
                daily_totals.insert(date, bucket);
            }
            Err(e) => corrupt(report, field, format!("dropped day {key}: {e}")),
        }
    }
    daily_totals
}

/// Keep the first element for each key; return how many were dropped.
fn dedup_by_key<T, K, F>(items: &mut Vec<T>, key: F) -> usize
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let before = items.len();
    let mut seen = BTreeSet::new();
    items.retain(|item| seen.insert(key(item)));
    before.saturating_sub(items.len())
}

fn corrupt(report: &mut LoadReport, field: StateField, reason: String) {
    let error = StoreError::PersistenceCorrupt { field, reason };
    tracing::warn!(field = field.as_str(), error = %error, "recovered corrupt persisted state with defaults");
    report.corrupt.push(error);
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
