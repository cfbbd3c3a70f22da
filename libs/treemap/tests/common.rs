// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

#![allow(unused, reason = "not used by all tests")]

use std::collections::BTreeMap;

use treemap::{Count, Key, TreeMap};

/// Reference model the tree is checked against.
pub type Model = BTreeMap<Key, Count>;

pub fn setup_tracing() -> impl Drop {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .set_default()
}

/// Asserts that `tree` holds exactly the entries of `model`.
#[track_caller]
pub fn assert_matches(tree: &TreeMap, model: &Model) {
    tree.assert_valid();
    assert_eq!(tree.len(), model.len());
    assert!(
        tree.iter().eq(model.iter().map(|(&key, &count)| (key, count))),
        "tree {tree:?} does not match model {model:?}"
    );
}

pub fn model_next(model: &Model, key: Key) -> Option<(Key, Count)> {
    let low = key.checked_add(1)?;
    model.range(low..).next().map(|(&key, &count)| (key, count))
}

pub fn model_previous(model: &Model, key: Key) -> Option<(Key, Count)> {
    model
        .range(..key)
        .next_back()
        .map(|(&key, &count)| (key, count))
}

pub fn model_range_sum(model: &Model, low: Key, high: Key) -> Count {
    model.range(low..=high).map(|(_, &count)| count).sum()
}
