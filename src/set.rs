use crate::flow::Flow;
use crate::sequence::{Restartable, Sequence};
use ahash::{AHashMap as HashMap, AHashSet as HashSet};
use std::fmt;
use std::hash::Hash;

/// Occurrence counts for the values one traversal has seen.
#[derive(Debug)]
pub(crate) struct CountTable<T> {
    counts: HashMap<T, usize>,
}

impl<T: Hash + Eq + Clone> CountTable<T> {
    pub(crate) fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Records one more sighting of `value` and returns its new count.
    pub(crate) fn record(&mut self, value: &T) -> usize {
        if let Some(count) = self.counts.get_mut(value) {
            *count = count.saturating_add(1);
            *count
        } else {
            self.counts.insert(value.clone(), 1);
            1
        }
    }
}

/// The distinct values one traversal has seen.
#[derive(Debug)]
pub(crate) struct SeenSet<T> {
    seen: HashSet<T>,
}

impl<T: Hash + Eq + Clone> SeenSet<T> {
    pub(crate) fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Returns true the first time `value` is offered, false afterwards.
    pub(crate) fn first_sighting(&mut self, value: &T) -> bool {
        if self.seen.contains(value) {
            false
        } else {
            self.seen.insert(value.clone());
            true
        }
    }
}

/// Yields a value exactly once, when it is seen for the second time.
///
/// Values seen only once never come out; values seen three or more times
/// come out once, at the second sighting.
///
/// Created by [`Sequence::duplicates`].
pub struct Duplicates<S: Sequence> {
    source: S,
    counts: CountTable<S::Item>,
}

impl<S> Duplicates<S>
where
    S: Sequence,
    S::Item: Hash + Eq + Clone,
{
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            counts: CountTable::new(),
        }
    }
}

impl<S> Sequence for Duplicates<S>
where
    S: Sequence,
    S::Item: Hash + Eq + Clone,
{
    type Item = S::Item;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let Duplicates { source, mut counts } = self;

        source.drive(|item| {
            if counts.record(&item) == 2 {
                visitor(item)
            } else {
                Flow::Continue
            }
        })
    }
}

impl<S> Restartable for Duplicates<S>
where
    S: Restartable,
    S::Item: Hash + Eq + Clone,
{
    /// Each replay counts from zero.
    fn replay<V>(&mut self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let mut counts = CountTable::new();
        self.source.replay(|item| {
            if counts.record(&item) == 2 {
                visitor(item)
            } else {
                Flow::Continue
            }
        })
    }
}

impl<S> fmt::Debug for Duplicates<S>
where
    S: Sequence + fmt::Debug,
    S::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Duplicates")
            .field("source", &self.source)
            .field("counts", &self.counts)
            .finish()
    }
}

/// Yields each distinct value once, at its first sighting.
///
/// Created by [`Sequence::dedup`].
pub struct Dedup<S: Sequence> {
    source: S,
    seen: SeenSet<S::Item>,
}

impl<S> Dedup<S>
where
    S: Sequence,
    S::Item: Hash + Eq + Clone,
{
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            seen: SeenSet::new(),
        }
    }
}

impl<S> Sequence for Dedup<S>
where
    S: Sequence,
    S::Item: Hash + Eq + Clone,
{
    type Item = S::Item;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let Dedup { source, mut seen } = self;

        source.drive(|item| {
            if seen.first_sighting(&item) {
                visitor(item)
            } else {
                Flow::Continue
            }
        })
    }
}

impl<S> Restartable for Dedup<S>
where
    S: Restartable,
    S::Item: Hash + Eq + Clone,
{
    /// Each replay starts from an empty seen set.
    fn replay<V>(&mut self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let mut seen = SeenSet::new();
        self.source.replay(|item| {
            if seen.first_sighting(&item) {
                visitor(item)
            } else {
                Flow::Continue
            }
        })
    }
}

impl<S> fmt::Debug for Dedup<S>
where
    S: Sequence + fmt::Debug,
    S::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dedup")
            .field("source", &self.source)
            .field("seen", &self.seen)
            .finish()
    }
}
