//! The tracker: owned root state plus the operations that mutate it.
//!
//! Every mutating operation follows the same sequence: validate and
//! compute into locals, apply to the in-memory state, then persist the
//! whole record once. A failure before the apply step leaves the state
//! untouched.

use rust_decimal::Decimal;

use tally_ledger::{
    multiplier_product, verify_all, verify_bucket, ActivationBuilder, BucketAnomaly,
    ConservationResult, LedgerError, Posting, DEFAULT_TOLERANCE,
};
use tally_store::{get_or_create_bucket, LoadReport, StateSlot, StateStore};
use tally_types::{
    default_actions, default_multipliers, default_state, Action, ActionId, Activation,
    DaySummary, Multiplier, MultiplierId, TodayView, TrackerState, DEFAULT_ACTION_COLOR,
    DEFAULT_MULTIPLIER_COLOR, UNCATEGORIZED,
};

use crate::clock::Clock;
use crate::error::{EntityKind, TrackerError};
use crate::reorder::reorder;
use crate::validation::{trimmed_or, validate_name, validate_positive};
use crate::views;

/// Input for creating or editing an action.
///
/// With `id: None` a new action is appended; otherwise the action with that
/// id is edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDraft {
    /// The action to edit, or `None` to create one.
    pub id: Option<ActionId>,
    /// Display name; trimmed, must not be empty.
    pub name: String,
    /// Points per activation; must be positive.
    pub base_points: Decimal,
    /// Category; blank means "Uncategorized".
    pub category: String,
    /// Colour; blank means the default action colour.
    pub color: String,
}

/// Input for creating or editing a multiplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplierDraft {
    /// The multiplier to edit, or `None` to create one.
    pub id: Option<MultiplierId>,
    /// Display name; trimmed, must not be empty.
    pub name: String,
    /// Factor applied while active; must be positive.
    pub value: Decimal,
    /// Colour; blank means the default multiplier colour.
    pub color: String,
}

/// The points tracker.
///
/// Owns the root state exclusively. Read access goes through
/// [`Tracker::state`] and the view methods; every mutation takes
/// `&mut self` and is persisted before it returns.
#[derive(Debug)]
pub struct Tracker<S, C> {
    store: StateStore<S>,
    clock: C,
    state: TrackerState,
    load_report: LoadReport,
}

impl<S: StateSlot, C: Clock> Tracker<S, C> {
    /// Load the persisted state, make sure today's bucket exists and save
    /// once.
    ///
    /// Loading never fails; recovered corruption is available from
    /// [`Tracker::load_report`].
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] if the initial save fails.
    pub fn open(store: StateStore<S>, clock: C) -> Result<Self, TrackerError> {
        let (mut state, load_report) = store.load_with_report();
        let today = clock.today();
        get_or_create_bucket(&mut state, today);

        let mut tracker = Self {
            store,
            clock,
            state,
            load_report,
        };
        tracker.persist()?;
        tracing::info!(
            date = %today,
            actions = tracker.state.actions.len(),
            multipliers = tracker.state.multipliers.len(),
            "tracker opened"
        );
        Ok(tracker)
    }

    /// The full root state.
    pub const fn state(&self) -> &TrackerState {
        &self.state
    }

    /// What happened while loading the persisted state.
    pub const fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// The clock used for date keys.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the clock, to move simulated days.
    pub const fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// The store the state is persisted through.
    pub const fn store(&self) -> &StateStore<S> {
        &self.store
    }

    /// Today's dashboard. Does not create today's bucket.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Ledger`] if the multiplier product overflows.
    pub fn today(&self) -> Result<TodayView, TrackerError> {
        Ok(views::today_view(&self.state, self.clock.today())?)
    }

    /// Every stored day, newest first.
    pub fn history(&self) -> Vec<DaySummary> {
        views::history(&self.state, self.clock.today())
    }

    /// Run the conservation check over every stored bucket.
    pub fn verify(&self) -> Vec<BucketAnomaly> {
        verify_all(&self.state.daily_totals, DEFAULT_TOLERANCE)
    }

    /// Find an action by exact id, else by case-insensitive exact name.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] if nothing matches.
    pub fn resolve_action(&self, query: &str) -> Result<ActionId, TrackerError> {
        let query = query.trim();
        self.state
            .actions
            .iter()
            .find(|a| a.id.as_str() == query)
            .or_else(|| {
                self.state
                    .actions
                    .iter()
                    .find(|a| same_name(&a.name, query))
            })
            .map(|a| a.id.clone())
            .ok_or_else(|| TrackerError::not_found(EntityKind::Action, query))
    }

    /// Find a multiplier by exact id, else by case-insensitive exact name.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] if nothing matches.
    pub fn resolve_multiplier(&self, query: &str) -> Result<MultiplierId, TrackerError> {
        let query = query.trim();
        self.state
            .multipliers
            .iter()
            .find(|m| m.id.as_str() == query)
            .or_else(|| {
                self.state
                    .multipliers
                    .iter()
                    .find(|m| same_name(&m.name, query))
            })
            .map(|m| m.id.clone())
            .ok_or_else(|| TrackerError::not_found(EntityKind::Multiplier, query))
    }

    /// Credit one activation of `id` to today's bucket.
    ///
    /// The gain is the action's base points times the product of all active
    /// multipliers. It is added to the day's total and to the action's
    /// current category, and the action's `count_today` is incremented.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] for an unknown id and
    /// [`TrackerError::Ledger`] on arithmetic failure, both before any
    /// mutation; [`TrackerError::Store`] if the result cannot be saved.
    pub fn record_activation(&mut self, id: &ActionId) -> Result<Activation, TrackerError> {
        let date = self.clock.today();
        let position = self
            .state
            .action_position(id)
            .ok_or_else(|| TrackerError::not_found(EntityKind::Action, id.as_str()))?;
        let action = self
            .state
            .actions
            .get(position)
            .ok_or_else(|| TrackerError::not_found(EntityKind::Action, id.as_str()))?;

        let product = multiplier_product(&self.state.multipliers)?;
        let activation = ActivationBuilder::new(date)
            .action(action)
            .multiplier_product(product)
            .build()?;
        let count_today = action
            .count_today
            .checked_add(1)
            .ok_or(LedgerError::Overflow("count today"))?;
        let posting = Posting::plan(self.state.bucket(date), &activation)?;

        let bucket = get_or_create_bucket(&mut self.state, date);
        posting.apply(bucket);
        match verify_bucket(date, bucket, DEFAULT_TOLERANCE) {
            ConservationResult::Balanced => {
                tracing::debug!(date = %date, "bucket balanced after activation");
            }
            ConservationResult::Anomaly(anomaly) => {
                tracing::warn!(date = %date, anomaly = %anomaly, "bucket out of balance");
            }
        }
        if let Some(action) = self.state.actions.get_mut(position) {
            action.count_today = count_today;
        }

        tracing::info!(
            action_id = %activation.action_id,
            date = %date,
            category = %activation.category,
            gained = %activation.gained,
            multiplier_product = %activation.multiplier_product,
            "activation recorded"
        );
        self.persist()?;
        Ok(activation)
    }

    /// Flip a multiplier's `active` flag and return the new value.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] for an unknown id;
    /// [`TrackerError::Store`] if the result cannot be saved.
    pub fn toggle_multiplier(&mut self, id: &MultiplierId) -> Result<bool, TrackerError> {
        let multiplier = self
            .state
            .multiplier_mut(id)
            .ok_or_else(|| TrackerError::not_found(EntityKind::Multiplier, id.as_str()))?;
        multiplier.active = !multiplier.active;
        let active = multiplier.active;

        tracing::info!(multiplier_id = %id, active, "multiplier toggled");
        self.persist()?;
        Ok(active)
    }

    /// Move the action at `from` to `to`. Returns whether the order changed;
    /// only a change is saved.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] if the new order cannot be saved.
    pub fn reorder_actions(&mut self, from: usize, to: usize) -> Result<bool, TrackerError> {
        let moved = reorder(&mut self.state.actions, from, to);
        if moved {
            tracing::info!(from, to, "actions reordered");
            self.persist()?;
        }
        Ok(moved)
    }

    /// Move the multiplier at `from` to `to`. Returns whether the order
    /// changed; only a change is saved.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] if the new order cannot be saved.
    pub fn reorder_multipliers(&mut self, from: usize, to: usize) -> Result<bool, TrackerError> {
        let moved = reorder(&mut self.state.multipliers, from, to);
        if moved {
            tracing::info!(from, to, "multipliers reordered");
            self.persist()?;
        }
        Ok(moved)
    }

    /// Create or edit an action and return it as stored.
    ///
    /// A new action is appended with a fresh id and `count_today` zero. An
    /// edit keeps the id, position and `count_today`. Past buckets are never
    /// reclassified when the category changes.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Validation`] for a blank name or non-positive
    /// points and [`TrackerError::NotFound`] when editing an unknown id, both
    /// before any mutation; [`TrackerError::Store`] if the result cannot be
    /// saved.
    pub fn upsert_action(&mut self, draft: ActionDraft) -> Result<Action, TrackerError> {
        let name = validate_name(&draft.name)?;
        let base_points = validate_positive("base points", draft.base_points)?;
        let category = trimmed_or(&draft.category, UNCATEGORIZED);
        let color = trimmed_or(&draft.color, DEFAULT_ACTION_COLOR);

        let stored = match draft.id {
            Some(id) => {
                let action = self
                    .state
                    .action_mut(&id)
                    .ok_or_else(|| TrackerError::not_found(EntityKind::Action, id.as_str()))?;
                action.name = name;
                action.base_points = base_points;
                action.category = category;
                action.color = color;
                tracing::info!(action_id = %action.id, "action updated");
                action.clone()
            }
            None => {
                let action = Action {
                    id: ActionId::new(),
                    name,
                    base_points,
                    category,
                    color,
                    count_today: 0,
                };
                tracing::info!(action_id = %action.id, name = %action.name, "action created");
                self.state.actions.push(action.clone());
                action
            }
        };

        self.persist()?;
        Ok(stored)
    }

    /// Create or edit a multiplier and return it as stored.
    ///
    /// A new multiplier is appended inactive with a fresh id. An edit keeps
    /// the id, position and `active` flag.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Validation`] for a blank name or non-positive
    /// value and [`TrackerError::NotFound`] when editing an unknown id, both
    /// before any mutation; [`TrackerError::Store`] if the result cannot be
    /// saved.
    pub fn upsert_multiplier(&mut self, draft: MultiplierDraft) -> Result<Multiplier, TrackerError> {
        let name = validate_name(&draft.name)?;
        let value = validate_positive("value", draft.value)?;
        let color = trimmed_or(&draft.color, DEFAULT_MULTIPLIER_COLOR);

        let stored = match draft.id {
            Some(id) => {
                let multiplier = self
                    .state
                    .multiplier_mut(&id)
                    .ok_or_else(|| TrackerError::not_found(EntityKind::Multiplier, id.as_str()))?;
                multiplier.name = name;
                multiplier.value = value;
                multiplier.color = color;
                tracing::info!(multiplier_id = %multiplier.id, "multiplier updated");
                multiplier.clone()
            }
            None => {
                let multiplier = Multiplier {
                    id: MultiplierId::new(),
                    name,
                    value,
                    color,
                    active: false,
                };
                tracing::info!(multiplier_id = %multiplier.id, name = %multiplier.name, "multiplier created");
                self.state.multipliers.push(multiplier.clone());
                multiplier
            }
        };

        self.persist()?;
        Ok(stored)
    }

    /// Remove an action and return it. Daily buckets are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] for an unknown id;
    /// [`TrackerError::Store`] if the result cannot be saved.
    pub fn remove_action(&mut self, id: &ActionId) -> Result<Action, TrackerError> {
        let position = self
            .state
            .action_position(id)
            .ok_or_else(|| TrackerError::not_found(EntityKind::Action, id.as_str()))?;
        let removed = self.state.actions.remove(position);

        tracing::info!(action_id = %removed.id, "action removed");
        self.persist()?;
        Ok(removed)
    }

    /// Remove a multiplier and return it.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] for an unknown id;
    /// [`TrackerError::Store`] if the result cannot be saved.
    pub fn remove_multiplier(&mut self, id: &MultiplierId) -> Result<Multiplier, TrackerError> {
        let position = self
            .state
            .multiplier_position(id)
            .ok_or_else(|| TrackerError::not_found(EntityKind::Multiplier, id.as_str()))?;
        let removed = self.state.multipliers.remove(position);

        tracing::info!(multiplier_id = %removed.id, "multiplier removed");
        self.persist()?;
        Ok(removed)
    }

    /// Replace the actions with the seed actions. Daily totals are kept.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] if the result cannot be saved.
    pub fn reset_actions_to_default(&mut self) -> Result<(), TrackerError> {
        self.state.actions = default_actions();
        tracing::info!("actions reset to defaults");
        self.persist()
    }

    /// Replace the multipliers with the seed multipliers. Daily totals are
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] if the result cannot be saved.
    pub fn reset_multipliers_to_default(&mut self) -> Result<(), TrackerError> {
        self.state.multipliers = default_multipliers();
        tracing::info!("multipliers reset to defaults");
        self.persist()
    }

    /// Replace the whole state with the default record, discarding all
    /// history.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] if the result cannot be saved.
    pub fn clear_all(&mut self) -> Result<(), TrackerError> {
        let discarded_days = self.state.daily_totals.len();
        self.state = default_state();
        tracing::info!(discarded_days, "all data cleared");
        self.persist()
    }

    fn persist(&mut self) -> Result<(), TrackerError> {
        self.store.save(&self.state).map_err(|error| {
            tracing::error!(error = %error, "failed to save state, keeping in-memory changes");
            TrackerError::Store(error)
        })
    }
}

fn same_name(name: &str, query: &str) -> bool {
    name.trim().to_lowercase() == query.to_lowercase()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::clock::FixedClock;
    use tally_store::{MemorySlot, StoreError, DEFAULT_STORAGE_KEY};
    use tally_types::DateKey;

    /// Accepts writes until switched off.
    #[derive(Debug, Default)]
    struct FlakySlot {
        inner: MemorySlot,
        failing: bool,
    }

    impl StateSlot for FlakySlot {
        fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.read(key)
        }

        fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.failing {
                return Err(StoreError::InvalidKey(key.to_owned()));
            }
            self.inner.write(key, value)
        }
    }

    fn day() -> DateKey {
        DateKey::from_ymd(2026, 10, 16).expect("valid date")
    }

    fn open() -> Tracker<MemorySlot, FixedClock> {
        Tracker::open(StateStore::with_default_key(MemorySlot::new()), FixedClock::new(day()))
            .expect("open tracker")
    }

    fn a1() -> ActionId {
        ActionId::from("a1")
    }

    fn m1() -> MultiplierId {
        MultiplierId::from("m1")
    }

    fn stored(tracker: &Tracker<MemorySlot, FixedClock>) -> TrackerState {
        tracker.store().load()
    }

    #[test]
    fn open_creates_and_saves_today_bucket() {
        let tracker = open();
        assert!(tracker.state().bucket(day()).is_some());
        assert!(tracker.store().slot().get(DEFAULT_STORAGE_KEY).is_some());
        assert_eq!(&stored(&tracker), tracker.state());
    }

    #[test]
    fn activation_credits_total_category_and_count() {
        let mut tracker = open();
        let activation = tracker.record_activation(&a1()).expect("activation");

        assert_eq!(activation.gained, Decimal::new(10, 0));
        assert_eq!(activation.category, "Focus");
        let bucket = tracker.state().bucket(day()).expect("bucket");
        assert_eq!(bucket.total_points, Decimal::new(10, 0));
        assert_eq!(bucket.category_points("Focus"), Decimal::new(10, 0));
        assert_eq!(tracker.state().action(&a1()).map(|a| a.count_today), Some(1));
        assert_eq!(&stored(&tracker), tracker.state());
    }

    #[test]
    fn unknown_action_leaves_state_untouched() {
        let mut tracker = open();
        let before = tracker.state().clone();
        let result = tracker.record_activation(&ActionId::from("nope"));
        assert!(matches!(
            result,
            Err(TrackerError::NotFound {
                kind: EntityKind::Action,
                ..
            })
        ));
        assert_eq!(tracker.state(), &before);
    }

    #[test]
    fn toggle_returns_new_flag_and_persists() {
        let mut tracker = open();
        assert!(tracker.toggle_multiplier(&m1()).expect("toggle on"));
        assert_eq!(stored(&tracker).multiplier(&m1()).map(|m| m.active), Some(true));
        assert!(!tracker.toggle_multiplier(&m1()).expect("toggle off"));
        assert!(tracker.toggle_multiplier(&MultiplierId::from("m9")).is_err());
    }

    #[test]
    fn upsert_action_creates_with_defaults() {
        let mut tracker = open();
        let created = tracker
            .upsert_action(ActionDraft {
                id: None,
                name: "  Read a chapter ".to_owned(),
                base_points: Decimal::new(5, 0),
                category: "   ".to_owned(),
                color: String::new(),
            })
            .expect("create action");

        assert_eq!(created.name, "Read a chapter");
        assert_eq!(created.category, UNCATEGORIZED);
        assert_eq!(created.color, DEFAULT_ACTION_COLOR);
        assert_eq!(created.count_today, 0);
        assert_eq!(tracker.state().actions.last(), Some(&created));
        assert_eq!(tracker.state().actions.len(), 4);
    }

    #[test]
    fn upsert_action_edit_keeps_id_position_and_count() {
        let mut tracker = open();
        tracker.record_activation(&a1()).expect("activation");
        let edited = tracker
            .upsert_action(ActionDraft {
                id: Some(a1()),
                name: "Deep work (50 min)".to_owned(),
                base_points: Decimal::new(20, 0),
                category: "Study".to_owned(),
                color: "#000000".to_owned(),
            })
            .expect("edit action");

        assert_eq!(edited.id, a1());
        assert_eq!(edited.count_today, 1);
        assert_eq!(tracker.state().action_position(&a1()), Some(0));
        let bucket = tracker.state().bucket(day()).expect("bucket");
        assert_eq!(bucket.category_points("Focus"), Decimal::new(10, 0));
        assert_eq!(bucket.category_points("Study"), Decimal::ZERO);
    }

    #[test]
    fn invalid_drafts_are_rejected_without_mutation() {
        let mut tracker = open();
        let before = tracker.state().clone();

        let blank = tracker.upsert_action(ActionDraft {
            id: None,
            name: "  ".to_owned(),
            base_points: Decimal::ONE,
            category: String::new(),
            color: String::new(),
        });
        assert!(matches!(blank, Err(TrackerError::Validation { field: "name", .. })));

        let zero = tracker.upsert_multiplier(MultiplierDraft {
            id: None,
            name: "Weekend".to_owned(),
            value: Decimal::ZERO,
            color: String::new(),
        });
        assert!(matches!(zero, Err(TrackerError::Validation { field: "value", .. })));

        let missing = tracker.upsert_multiplier(MultiplierDraft {
            id: Some(MultiplierId::from("m9")),
            name: "Weekend".to_owned(),
            value: Decimal::TWO,
            color: String::new(),
        });
        assert!(matches!(missing, Err(TrackerError::NotFound { .. })));

        assert_eq!(tracker.state(), &before);
    }

    #[test]
    fn upsert_multiplier_edit_keeps_active() {
        let mut tracker = open();
        tracker.toggle_multiplier(&m1()).expect("toggle");
        let edited = tracker
            .upsert_multiplier(MultiplierDraft {
                id: Some(m1()),
                name: "Power hour+".to_owned(),
                value: Decimal::new(25, 1),
                color: String::new(),
            })
            .expect("edit multiplier");
        assert!(edited.active);
        assert_eq!(edited.color, DEFAULT_MULTIPLIER_COLOR);
        assert_eq!(edited.value, Decimal::new(25, 1));
    }

    #[test]
    fn reorder_persists_only_changes() {
        let mut tracker = open();
        assert!(tracker.reorder_actions(0, 2).expect("reorder"));
        let ids: Vec<&str> = tracker.state().actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "a3", "a1"]);
        assert_eq!(&stored(&tracker), tracker.state());

        assert!(!tracker.reorder_multipliers(1, 1).expect("noop"));
        assert!(!tracker.reorder_multipliers(0, 5).expect("noop"));
    }

    #[test]
    fn remove_returns_element_and_keeps_buckets() {
        let mut tracker = open();
        tracker.record_activation(&a1()).expect("activation");
        let totals = tracker.state().daily_totals.clone();

        let removed = tracker.remove_action(&a1()).expect("remove");
        assert_eq!(removed.id, a1());
        assert_eq!(tracker.state().daily_totals, totals);
        assert!(tracker.remove_action(&a1()).is_err());

        let removed = tracker.remove_multiplier(&m1()).expect("remove");
        assert_eq!(removed.name, "Power hour");
    }

    #[test]
    fn resets_keep_daily_totals() {
        let mut tracker = open();
        tracker.record_activation(&a1()).expect("activation");
        tracker.remove_action(&ActionId::from("a2")).expect("remove");
        tracker.toggle_multiplier(&m1()).expect("toggle");
        let totals = tracker.state().daily_totals.clone();

        tracker.reset_actions_to_default().expect("reset actions");
        tracker.reset_multipliers_to_default().expect("reset multipliers");

        assert_eq!(tracker.state().actions, default_actions());
        assert_eq!(tracker.state().multipliers, default_multipliers());
        assert_eq!(tracker.state().daily_totals, totals);
    }

    #[test]
    fn clear_all_restores_default_record() {
        let mut tracker = open();
        tracker.record_activation(&a1()).expect("activation");
        tracker.clear_all().expect("clear");
        assert_eq!(tracker.state(), &default_state());
        assert_eq!(stored(&tracker), default_state());
    }

    #[test]
    fn resolve_by_id_or_name() {
        let tracker = open();
        assert_eq!(tracker.resolve_action("a2").ok(), Some(ActionId::from("a2")));
        assert_eq!(
            tracker.resolve_action("  workout SESSION ").ok(),
            Some(ActionId::from("a2"))
        );
        assert_eq!(tracker.resolve_multiplier("flow state").ok(), Some(MultiplierId::from("m2")));
        assert!(tracker.resolve_action("Workout").is_err());
    }

    #[test]
    fn failed_save_keeps_mutation_in_memory() {
        let store = StateStore::with_default_key(FlakySlot::default());
        let mut tracker = Tracker::open(store, FixedClock::new(day())).expect("open");
        tracker.store.slot_mut().failing = true;

        let result = tracker.record_activation(&a1());
        assert!(matches!(result, Err(TrackerError::Store(_))));
        let bucket = tracker.state().bucket(day()).expect("bucket");
        assert_eq!(bucket.total_points, Decimal::new(10, 0));

        let persisted = tracker.store().load();
        assert_eq!(
            persisted.bucket(day()).map(|b| b.total_points),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn verify_reports_drifted_bucket() {
        let mut tracker = open();
        tracker.record_activation(&a1()).expect("activation");
        assert!(tracker.verify().is_empty());

        if let Some(bucket) = tracker.state.daily_totals.get_mut(&day()) {
            bucket.total_points = Decimal::new(99, 0);
        }
        let anomalies = tracker.verify();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies.first().map(|a| a.date), Some(day()));
    }
}
