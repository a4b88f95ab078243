//! Property tests for point accumulation and reordering.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::BTreeMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_core::reorder::reorder;
use tally_core::{ActionDraft, FixedClock, MultiplierDraft, Tracker};
use tally_store::{MemorySlot, StateStore};
use tally_types::{ActionId, DateKey, MultiplierId};

/// One user event on a single simulated day.
#[derive(Debug, Clone)]
enum Event {
    Activate(usize),
    Toggle(usize),
    Recategorize(usize, usize),
}

const CATEGORIES: [&str; 3] = ["Focus", "Health", "Social"];

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        3 => (0..4usize).prop_map(Event::Activate),
        1 => (0..3usize).prop_map(Event::Toggle),
        1 => (0..4usize, 0..CATEGORIES.len()).prop_map(|(a, c)| Event::Recategorize(a, c)),
    ]
}

/// Base points as hundredths, so values like 2.5 and 0.75 occur.
fn points() -> impl Strategy<Value = Decimal> {
    (1i64..5_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn factor() -> impl Strategy<Value = Decimal> {
    (1i64..400).prop_map(|cents| Decimal::new(cents, 2))
}

fn day() -> DateKey {
    DateKey::from_ymd(2026, 10, 16).unwrap()
}

proptest! {
    #[test]
    fn totals_equal_exact_sum_of_gains(
        base in prop::collection::vec(points(), 4),
        factors in prop::collection::vec(factor(), 3),
        events in prop::collection::vec(event(), 0..60),
    ) {
        let store = StateStore::with_default_key(MemorySlot::new());
        let mut tracker = Tracker::open(store, FixedClock::new(day())).unwrap();
        for id in ["a1", "a2", "a3"] {
            tracker.remove_action(&ActionId::from(id)).unwrap();
        }
        for id in ["m1", "m2"] {
            tracker.remove_multiplier(&MultiplierId::from(id)).unwrap();
        }

        let mut actions = Vec::new();
        for (i, points) in base.iter().enumerate() {
            let action = tracker.upsert_action(ActionDraft {
                id: None,
                name: format!("action {i}"),
                base_points: *points,
                category: CATEGORIES[i % CATEGORIES.len()].to_owned(),
                color: String::new(),
            }).unwrap();
            actions.push(action);
        }
        let mut multipliers = Vec::new();
        for (i, value) in factors.iter().enumerate() {
            let multiplier = tracker.upsert_multiplier(MultiplierDraft {
                id: None,
                name: format!("boost {i}"),
                value: *value,
                color: String::new(),
            }).unwrap();
            multipliers.push(multiplier);
        }

        let mut expected_total = Decimal::ZERO;
        let mut expected_categories: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut current_category: Vec<String> = actions.iter().map(|a| a.category.clone()).collect();
        let mut active = vec![false; multipliers.len()];

        for event in events {
            match event {
                Event::Activate(i) => {
                    let product = factors
                        .iter()
                        .zip(&active)
                        .filter(|(_, on)| **on)
                        .fold(Decimal::ONE, |acc, (f, _)| acc * *f);
                    let gained = base[i] * product;
                    let activation = tracker.record_activation(&actions[i].id).unwrap();
                    prop_assert_eq!(activation.gained, gained);
                    expected_total += gained;
                    *expected_categories.entry(current_category[i].clone()).or_default() += gained;
                }
                Event::Toggle(m) => {
                    active[m] = tracker.toggle_multiplier(&multipliers[m].id).unwrap();
                }
                Event::Recategorize(i, c) => {
                    tracker.upsert_action(ActionDraft {
                        id: Some(actions[i].id.clone()),
                        name: actions[i].name.clone(),
                        base_points: base[i],
                        category: CATEGORIES[c].to_owned(),
                        color: String::new(),
                    }).unwrap();
                    current_category[i] = CATEGORIES[c].to_owned();
                }
            }
        }

        let bucket = tracker.today().unwrap().bucket;
        prop_assert_eq!(bucket.total_points, expected_total);
        prop_assert_eq!(bucket.categories, expected_categories);
        prop_assert!(tracker.verify().is_empty());
    }

    #[test]
    fn reorder_is_a_permutation(
        items in prop::collection::vec(any::<u16>(), 0..20),
        from in 0..24usize,
        to in 0..24usize,
    ) {
        let mut moved = items.clone();
        let changed = reorder(&mut moved, from, to);

        let mut sorted_before = items.clone();
        let mut sorted_after = moved.clone();
        sorted_before.sort_unstable();
        sorted_after.sort_unstable();
        prop_assert_eq!(sorted_before, sorted_after);

        if !changed {
            prop_assert_eq!(&moved, &items);
        } else {
            prop_assert_eq!(moved.get(to), items.get(from));
        }
    }

    #[test]
    fn adjacent_reorder_round_trips(
        items in prop::collection::vec(any::<u16>(), 2..20),
        index in 0..19usize,
    ) {
        let i = index % (items.len() - 1);
        let mut moved = items.clone();
        reorder(&mut moved, i, i + 1);
        reorder(&mut moved, i + 1, i);
        prop_assert_eq!(moved, items);
    }
}
