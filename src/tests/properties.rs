use crate::flow::Flow;
use crate::sequence::{PairSequence, Sequence};
use crate::source::from_iter;
use crate::text::{Matcher, Rendered};
use ahash::AHashSet as HashSet;
use proptest::prelude::*;
use std::collections::HashMap;

/// Reference model for duplicate detection: values in the order their
/// second occurrence appears.
fn second_sightings(input: &[u8]) -> Vec<u8> {
    let mut counts: HashMap<u8, usize> = HashMap::new();
    let mut out = Vec::new();
    for &v in input {
        let count = counts.entry(v).or_insert(0);
        *count += 1;
        if *count == 2 {
            out.push(v);
        }
    }
    out
}

/// Reference model for deduplication: first-seen order.
fn first_sightings(input: &[u8]) -> Vec<u8> {
    let mut seen = HashSet::new();
    input.iter().copied().filter(|v| seen.insert(*v)).collect()
}

proptest! {
    /// Property 1: Filter keeps order and only shrinks
    #[test]
    fn prop_filter_preserves_order(input: Vec<u8>, threshold: u8) {
        let got: Vec<u8> = from_iter(input.clone()).filter(|v| *v >= threshold).collect();
        let expected: Vec<u8> = input.iter().copied().filter(|v| *v >= threshold).collect();
        prop_assert!(got.len() <= input.len());
        prop_assert_eq!(got, expected);
    }

    /// Property 2: Element-wise transforms keep order and cardinality
    #[test]
    fn prop_transforms_preserve_cardinality(input: Vec<u8>) {
        let replaced: Vec<u8> = from_iter(input.clone()).replace_with(|v| v.wrapping_mul(3)).collect();
        prop_assert_eq!(replaced, input.iter().map(|v| v.wrapping_mul(3)).collect::<Vec<_>>());

        let converted: Vec<u32> = from_iter(input.clone()).convert(u32::from).collect();
        prop_assert_eq!(converted, input.iter().map(|v| u32::from(*v)).collect::<Vec<_>>());

        let table = [(0u8, 255u8), (1, 254)];
        let looked_up: Vec<u8> = from_iter(input.clone()).replace(table).collect();
        let expected: Vec<u8> = input
            .iter()
            .map(|v| match v {
                0 => 255,
                1 => 254,
                other => *other,
            })
            .collect();
        prop_assert_eq!(looked_up, expected);

        prop_assert_eq!(from_iter(input.clone()).erase().count(), input.len());
    }

    /// Property 3: Pattern matching agrees with a direct regex filter
    #[test]
    fn prop_pattern_matches_model(input: Vec<u8>) {
        let matcher = Matcher::pattern("^1").unwrap();
        let got: Vec<u8> = from_iter(input.clone()).matching(matcher, Rendered).collect();
        let expected: Vec<u8> = input.iter().copied().filter(|v| v.to_string().starts_with('1')).collect();
        prop_assert_eq!(got, expected);
    }

    /// Property 4: Deduplication is idempotent and matches first-seen order
    #[test]
    fn prop_dedup_idempotent(input: Vec<u8>) {
        let once: Vec<u8> = from_iter(input.clone()).dedup().collect();
        let twice: Vec<u8> = from_iter(input.clone()).dedup().dedup().collect();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once, first_sightings(&input));
    }

    /// Property 5: Duplicate detection yields each repeated value once
    #[test]
    fn prop_duplicates_match_model(input: Vec<u8>) {
        let got: Vec<u8> = from_iter(input.clone()).duplicates().collect();
        prop_assert_eq!(got, second_sightings(&input));
    }

    /// Property 6: Removing a set leaves exactly the non-members, in order
    #[test]
    fn prop_remove_matches_model(input: Vec<u8>, exclude in prop::collection::vec(any::<u8>(), 0..8)) {
        let got: Vec<u8> = from_iter(input.clone()).remove(from_iter(exclude.clone())).collect();
        let expected: Vec<u8> = input.iter().copied().filter(|v| !exclude.contains(v)).collect();
        prop_assert_eq!(got, expected);
    }

    /// Property 7: Grouping partitions the input and keeps order within groups
    #[test]
    fn prop_group_by_partitions(input: Vec<u8>) {
        let groups: Vec<Vec<u8>> = from_iter(input.clone()).group_by(|v| v % 4).collect();

        let total: usize = groups.iter().map(Vec::len).sum();
        prop_assert_eq!(total, input.len());

        for group in &groups {
            prop_assert!(!group.is_empty());
            let key = group[0] % 4;
            let expected: Vec<u8> = input.iter().copied().filter(|v| v % 4 == key).collect();
            prop_assert_eq!(group, &expected);
        }
    }

    /// Property 8: Sum does not depend on arrival order
    #[test]
    fn prop_sum_order_independent(input in prop::collection::vec(-1000i64..1000, 0..64)) {
        let forward = from_iter(input.clone()).sum();
        let backward = from_iter(input.iter().rev().copied()).sum();
        prop_assert_eq!(forward, backward);
        prop_assert_eq!(forward, input.iter().sum::<i64>());
    }

    /// Property 9: Fallible aggregation fails at the first error, with no partial total
    #[test]
    fn prop_try_sum_fail_fast(input in prop::collection::vec(0u32..100, 1..32), bad in any::<prop::sample::Index>()) {
        let bad = bad.index(input.len());
        let mut calls = 0;
        let result = from_iter(input.iter().enumerate()).try_sum(|(i, v)| {
            calls += 1;
            if i == bad { Err(i) } else { Ok(u64::from(*v)) }
        });
        prop_assert_eq!(result, Err(bad));
        prop_assert_eq!(calls, bad + 1);
    }

    /// Property 10: Equal values hash equally, the pairs keep their elements
    #[test]
    fn prop_hashed_consistent(input: Vec<u16>) {
        let mut by_value: HashMap<u16, u64> = HashMap::new();
        let mut values = Vec::new();
        from_iter(input.clone()).hashed().drive_pairs(|digest, value| {
            let previous = *by_value.entry(value).or_insert(digest);
            assert_eq!(previous, digest);
            values.push(value);
            Flow::Continue
        });
        prop_assert_eq!(values, input);
    }

    /// Property 11: Count and emptiness agree with the input
    #[test]
    fn prop_count_and_is_empty(input: Vec<u8>) {
        prop_assert_eq!(from_iter(input.clone()).count(), input.len());
        prop_assert_eq!(from_iter(input.clone()).is_empty(), input.is_empty());
    }

    /// Property 12: Stopping after k elements calls the visitor exactly k times
    #[test]
    fn prop_stop_after_k(input: Vec<u8>, k in 1usize..16) {
        let mut calls = 0;
        let flow = from_iter(input.clone()).dedup().drive(|_| {
            calls += 1;
            Flow::from(calls < k)
        });
        let distinct = first_sightings(&input).len();
        prop_assert_eq!(calls, distinct.min(k));
        prop_assert_eq!(flow.is_stop(), distinct >= k);
    }
}

/// Bolero fuzz test: No panics on arbitrary input through a full chain
#[cfg(test)]
#[test]
fn fuzz_no_panic() {
    bolero::check!().with_type::<Vec<u8>>().for_each(|input| {
        let distinct = from_iter(input.iter().copied())
            .remove(from_iter([0u8, 255]))
            .dedup()
            .count();
        let duplicated = from_iter(input.iter().copied()).duplicates().count();
        let groups = from_iter(input.iter().copied()).group_by(|v| v % 3).count();

        assert!(distinct <= input.len());
        assert!(duplicated <= distinct + 2);
        assert!(groups <= 3);
    });
}

/// Bolero fuzz test: Dedup output never repeats a value
#[cfg(test)]
#[test]
fn fuzz_dedup_unique() {
    bolero::check!().with_type::<Vec<u8>>().for_each(|input| {
        let out: Vec<u8> = from_iter(input.iter().copied()).dedup().collect();
        let unique: HashSet<u8> = out.iter().copied().collect();
        assert_eq!(unique.len(), out.len());
    });
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_duplicates_example() {
        let got: Vec<u8> = from_iter([1, 2, 3, 1, 4, 2, 5, 1]).duplicates().collect();
        assert_eq!(got, second_sightings(&[1, 2, 3, 1, 4, 2, 5, 1]));
        assert_eq!(got, vec![1, 2]);
    }

    #[test]
    fn test_pipeline() {
        let words = ["alpha", "beta", "alpha", "gamma", "beta", "delta"];
        let repeated: Vec<String> = from_iter(words)
            .duplicates()
            .convert(str::to_uppercase)
            .collect();
        assert_eq!(repeated, vec!["ALPHA", "BETA"]);
    }
}
