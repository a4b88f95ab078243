//! Shared data model for the Tally points tracker.
//!
//! This crate is the single source of truth for the persisted record and the
//! views derived from it. Types flow to `TypeScript` via `ts-rs` so a browser
//! frontend can read the same document the Rust core writes.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifiers for actions and multipliers
//! - [`date`] -- Calendar date keys for daily buckets
//! - [`structs`] -- Actions, multipliers, activations, daily buckets and the
//!   root record
//! - [`views`] -- Read-only projections for the presentation layer
//! - [`seed`] -- The fixed default record

pub mod date;
pub mod ids;
pub mod seed;
pub mod structs;
pub mod views;

// Re-export all public types at crate root for convenience.
pub use date::{DateKey, ParseDateKeyError};
pub use ids::{ActionId, MultiplierId};
pub use seed::{default_actions, default_multipliers, default_state};
pub use structs::{
    Action, Activation, CategoryTotal, DailyBucket, Multiplier, TrackerState, DEFAULT_ACTION_COLOR,
    DEFAULT_MULTIPLIER_COLOR, UNCATEGORIZED,
};
pub use views::{DaySummary, TodayView};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // The files are written to the `bindings/` directory relative to
        // the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::ActionId::export_all();
        let _ = crate::ids::MultiplierId::export_all();
        let _ = crate::date::DateKey::export_all();

        // Structs
        let _ = crate::structs::Action::export_all();
        let _ = crate::structs::Activation::export_all();
        let _ = crate::structs::Multiplier::export_all();
        let _ = crate::structs::DailyBucket::export_all();
        let _ = crate::structs::CategoryTotal::export_all();
        let _ = crate::structs::TrackerState::export_all();

        // Views
        let _ = crate::views::TodayView::export_all();
        let _ = crate::views::DaySummary::export_all();
    }
}
