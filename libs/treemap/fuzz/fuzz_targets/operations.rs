// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use treemap::TreeMap;

#[derive(Debug, Arbitrary)]
enum Op {
    Increase(i16, u8),
    Reduce(i16, u8),
    RangeSum(i16, i16),
    Next(i16),
    Previous(i16),
}

fuzz_target!(|input: (Vec<i16>, Vec<Op>)| {
    let (initial, ops) = input;

    let mut model = BTreeMap::new();
    for key in initial {
        model.insert(i64::from(key), 1);
    }
    let pairs = model.iter().map(|(&key, &count)| (key, count)).collect::<Vec<_>>();
    let (mut tree, _) = TreeMap::from_sorted(&pairs).unwrap();
    tree.assert_valid();

    for op in ops {
        match op {
            Op::Increase(key, amount) => {
                let (key, amount) = (i64::from(key), i64::from(amount) + 1);
                *model.entry(key).or_insert(0) += amount;
                assert_eq!(tree.increase(key, amount), Ok(model[&key]));
            }
            Op::Reduce(key, amount) => {
                let (key, amount) = (i64::from(key), i64::from(amount) + 1);
                let remaining = model.get(&key).map_or(0, |count| (count - amount).max(0));
                if remaining == 0 {
                    model.remove(&key);
                } else {
                    model.insert(key, remaining);
                }
                assert_eq!(tree.reduce(key, amount), Ok(remaining));
            }
            Op::RangeSum(a, b) => {
                let (low, high) = (i64::from(a.min(b)), i64::from(a.max(b)));
                let expected = model.range(low..=high).map(|(_, count)| count).sum::<i64>();
                assert_eq!(tree.range_sum(low, high), Ok(expected));
            }
            Op::Next(key) => {
                let key = i64::from(key);
                let expected = model.range(key + 1..).next().map(|(&k, &c)| (k, c));
                assert_eq!(tree.next(key), expected);
            }
            Op::Previous(key) => {
                let key = i64::from(key);
                let expected = model.range(..key).next_back().map(|(&k, &c)| (k, c));
                assert_eq!(tree.previous(key), expected);
            }
        }
        tree.assert_valid();
    }
});
