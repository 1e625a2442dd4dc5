use crate::filter::{Filter, Remove, Take};
use crate::flow::Flow;
use crate::group::GroupBy;
use crate::hash::{HashState, Hashed};
use crate::pair::{Keys, Values};
use crate::set::{Dedup, Duplicates};
use crate::terminal::{self, TraversalStats};
use crate::text::{Matcher, Matching, Project};
use crate::transform::{Convert, Erase, Replace, ReplaceWith};
use ahash::RandomState;
use regex::Regex;
use std::any::Any;
use std::hash::Hash;
use std::ops::Add;

/// A lazy, push-driven producer of ordered elements.
///
/// Driving a sequence hands every element, in source order, to a visitor until
/// the source runs dry or the visitor answers [`Flow::Stop`]. The sequence is
/// consumed by the traversal, so any state a combinator carries (seen sets,
/// counters, hash accumulators) belongs to exactly one traversal.
///
/// Combinators are built with the provided methods and do no work until
/// driven.
///
/// # Example
///
/// ```
/// use sequencer_rs::{from_iter, Sequence};
///
/// let evens: Vec<i32> = from_iter(1..=10)
///     .filter(|v| v % 2 == 0)
///     .convert(|v| v * 10)
///     .collect();
///
/// assert_eq!(evens, vec![20, 40, 60, 80, 100]);
/// ```
pub trait Sequence: Sized {
    /// Type of the elements produced.
    type Item;

    /// Hands each element to `visitor` in order.
    ///
    /// Returns [`Flow::Stop`] if the visitor cut the traversal short and
    /// [`Flow::Continue`] if the source was exhausted. Once the visitor
    /// returns `Stop` it is never invoked again.
    fn drive<V>(self, visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow;

    /// Yields only the elements for which `predicate` returns true.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    /// Yields the elements that are not equal to any element of `exclude`.
    ///
    /// `exclude` is replayed from its start once per element of `self`, so
    /// this costs O(n·m) comparisons.
    ///
    /// ```
    /// use sequencer_rs::{from_iter, Sequence};
    ///
    /// let kept: Vec<i32> = from_iter([1, 2, 3, 4, 5])
    ///     .remove(from_iter([2, 4]))
    ///     .collect();
    /// assert_eq!(kept, vec![1, 3, 5]);
    /// ```
    ///
    /// A push-style producer cannot be replayed and is rejected:
    ///
    /// ```compile_fail
    /// use sequencer_rs::{from_fn, from_iter, Flow, Sequence};
    ///
    /// let exclude = from_fn(|visit: &mut dyn FnMut(i32) -> Flow| visit(2));
    /// let kept: Vec<i32> = from_iter([1, 2, 3]).remove(exclude).collect();
    /// ```
    fn remove<X>(self, exclude: X) -> Remove<Self, X>
    where
        X: Restartable<Item = Self::Item>,
        Self::Item: PartialEq,
    {
        Remove::new(self, exclude)
    }

    /// Yields the elements whose textual projection `matcher` accepts.
    fn matching<P>(self, matcher: Matcher, projection: P) -> Matching<Self, P>
    where
        P: Project<Self::Item>,
    {
        Matching::new(self, matcher, projection)
    }

    /// Yields the elements whose textual projection matches `pattern`.
    fn matching_pattern<P>(self, pattern: Regex, projection: P) -> Matching<Self, P>
    where
        P: Project<Self::Item>,
    {
        Matching::new(self, Matcher::Pattern(pattern), projection)
    }

    /// Yields the elements whose textual projection equals `literal` exactly.
    fn matching_text<P>(self, literal: impl Into<String>, projection: P) -> Matching<Self, P>
    where
        P: Project<Self::Item>,
    {
        Matching::new(self, Matcher::literal(literal), projection)
    }

    /// Yields each value once, at its second sighting.
    fn duplicates(self) -> Duplicates<Self>
    where
        Self::Item: Hash + Eq + Clone,
    {
        Duplicates::new(self)
    }

    /// Yields each distinct value once, at its first sighting.
    fn dedup(self) -> Dedup<Self>
    where
        Self::Item: Hash + Eq + Clone,
    {
        Dedup::new(self)
    }

    /// Pairs each element with a 64-bit fingerprint of its value.
    ///
    /// The fingerprint is stable for equal values within one process only.
    fn hashed(self) -> Hashed<Self>
    where
        Self::Item: Hash,
    {
        Hashed::new(self, HashState::new())
    }

    /// Like [`hashed`](Sequence::hashed), seeded from `state`.
    fn hashed_with(self, state: &RandomState) -> Hashed<Self>
    where
        Self::Item: Hash,
    {
        Hashed::new(self, HashState::with_random_state(state))
    }

    /// Groups elements by `key`, yielding one `Vec` per distinct key.
    ///
    /// The whole source is drained before the first group is yielded, so it
    /// must be finite: given an unbounded source, driving the result never
    /// returns. Bound such a source with [`take`](Sequence::take) first. The
    /// order of the groups is unspecified.
    ///
    /// ```
    /// use sequencer_rs::{from_iter, Sequence};
    ///
    /// let groups: Vec<Vec<u32>> = from_iter(0..).take(6).group_by(|v| v % 2).collect();
    /// assert_eq!(groups.len(), 2);
    /// assert!(groups.iter().all(|group| group.len() == 3));
    /// ```
    fn group_by<K, F>(self, key: F) -> GroupBy<Self, K, F>
    where
        F: FnMut(&Self::Item) -> K,
        K: Hash + Eq,
    {
        GroupBy::new(self, key)
    }

    /// Yields `f(element)` for every element.
    fn replace_with<F>(self, f: F) -> ReplaceWith<Self, F>
    where
        F: FnMut(Self::Item) -> Self::Item,
    {
        ReplaceWith::new(self, f)
    }

    /// Swaps elements found as keys in `table` for the mapped value.
    fn replace<I>(self, table: I) -> Replace<Self>
    where
        I: IntoIterator<Item = (Self::Item, Self::Item)>,
        Self::Item: Hash + Eq + Clone,
    {
        Replace::new(self, table)
    }

    /// Maps every element to a new type.
    fn convert<U, F>(self, f: F) -> Convert<Self, F>
    where
        F: FnMut(Self::Item) -> U,
    {
        Convert::new(self, f)
    }

    /// Boxes every element as `dyn Any`.
    fn erase(self) -> Erase<Self>
    where
        Self::Item: Any,
    {
        Erase::new(self)
    }

    /// Yields at most `limit` elements, then stops the upstream source.
    fn take(self, limit: usize) -> Take<Self> {
        Take::new(self, limit)
    }

    /// Drains the sequence and returns the number of elements.
    fn count(self) -> usize {
        terminal::count(self)
    }

    /// Returns true if the sequence produces no element.
    ///
    /// Consumes at most one element.
    fn is_empty(self) -> bool {
        terminal::is_empty(self)
    }

    /// Returns the first element, consuming nothing after it.
    fn first(self) -> Option<Self::Item> {
        terminal::first(self)
    }

    /// Adds every element in ascending order, starting from `T::default()`.
    ///
    /// All elements are collected and sorted first, so the result does not
    /// depend on arrival order.
    ///
    /// Only types closed under `+` qualify. `String` does not (it adds a
    /// `&str`), so concatenating text goes through [`collect`](Sequence::collect)
    /// into a `String` instead.
    fn sum(self) -> Self::Item
    where
        Self::Item: Ord + Default + Add<Output = Self::Item>,
    {
        terminal::sum(self)
    }

    /// Adds `f(element)` over the sequence, stopping at the first error.
    ///
    /// No partial total is returned alongside an error.
    fn try_sum<U, E, F>(self, f: F) -> Result<U, E>
    where
        U: Default + Add<Output = U>,
        F: FnMut(Self::Item) -> Result<U, E>,
    {
        terminal::try_sum(self, f)
    }

    /// Drives the sequence to completion into a collection.
    fn collect<C>(self) -> C
    where
        C: Default + Extend<Self::Item>,
    {
        terminal::collect(self)
    }

    /// Calls `f` on every element.
    fn for_each<F>(self, f: F)
    where
        F: FnMut(Self::Item),
    {
        terminal::for_each(self, f)
    }

    /// Drives the sequence like [`drive`](Sequence::drive) and reports how
    /// the traversal went.
    fn drive_with_stats<V>(self, visitor: V) -> TraversalStats
    where
        V: FnMut(Self::Item) -> Flow,
    {
        terminal::drive_with_stats(self, visitor)
    }
}

/// A sequence that can be driven from its start any number of times,
/// producing the same elements each time.
///
/// Implemented by sources backed by cloneable iterators (slices, ranges,
/// collections) and by combinators over restartable sources. Combinators
/// that count or remember values start each replay from empty state.
/// Push-style producers ([`from_fn`](crate::from_fn)) never implement it.
///
/// For iterator sources, `Clone` is taken as evidence that the iterator can
/// be walked again. That holds for collections and ranges but not for an
/// iterator that pulls from shared state: one closing over a channel
/// `&Receiver` is `Clone`, yet its first replay drains the channel and every
/// later replay sees nothing. Such input has to be collected before it is
/// used as a restartable sequence.
pub trait Restartable: Sequence {
    /// Drives a fresh traversal without consuming `self`.
    fn replay<V>(&mut self, visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow;
}

/// A lazy producer of key/value pairs, driven the same way as [`Sequence`].
pub trait PairSequence: Sized {
    /// Type of the first element of each pair.
    type Key;

    /// Type of the second element of each pair.
    type Value;

    /// Hands each pair to `visitor` in order.
    fn drive_pairs<V>(self, visitor: V) -> Flow
    where
        V: FnMut(Self::Key, Self::Value) -> Flow;

    /// Keeps only the first element of each pair.
    fn keys(self) -> Keys<Self> {
        Keys::new(self)
    }

    /// Keeps only the second element of each pair.
    fn values(self) -> Values<Self> {
        Values::new(self)
    }

    /// Drives the pairs to completion into a collection such as a map.
    fn collect_pairs<C>(self) -> C
    where
        C: Default + Extend<(Self::Key, Self::Value)>,
    {
        let mut out = C::default();
        self.drive_pairs(|key, value| {
            out.extend(std::iter::once((key, value)));
            Flow::Continue
        });
        out
    }
}
