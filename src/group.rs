use crate::flow::Flow;
use crate::sequence::Sequence;
use ahash::AHashMap as HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

/// Elements collected per group key, in arrival order within each group.
///
/// Enumeration order across groups is the map's and carries no meaning.
#[derive(Debug, Clone)]
pub struct GroupAccumulator<K, T> {
    groups: HashMap<K, Vec<T>>,
}

impl<K: Hash + Eq, T> GroupAccumulator<K, T> {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }

    /// Appends `item` to the group for `key`.
    pub fn push(&mut self, key: K, item: T) {
        self.groups.entry(key).or_default().push(item);
    }

    /// Returns the elements grouped under `key`.
    pub fn get(&self, key: &K) -> Option<&[T]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if nothing has been grouped.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Consumes the accumulator, returning the underlying map.
    pub fn into_map(self) -> HashMap<K, Vec<T>> {
        self.groups
    }
}

impl<K: Hash + Eq, T> Default for GroupAccumulator<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> IntoIterator for GroupAccumulator<K, T> {
    type Item = (K, Vec<T>);
    type IntoIter = std::collections::hash_map::IntoIter<K, Vec<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Groups elements by a computed key.
///
/// This is the one combinator that is not incremental: keys are not assumed
/// to arrive sorted, so every element has to be placed before any group is
/// complete. The source is drained in full the first time the combinator is
/// driven, then groups are handed out one by one. Never give it an unbounded
/// source.
///
/// Created by [`Sequence::group_by`].
#[derive(Debug)]
pub struct GroupBy<S, K, F> {
    source: S,
    key: F,
    _key: PhantomData<fn() -> K>,
}

impl<S, K, F> GroupBy<S, K, F> {
    pub(crate) fn new(source: S, key: F) -> Self {
        Self {
            source,
            key,
            _key: PhantomData,
        }
    }
}

impl<S, K, F> GroupBy<S, K, F>
where
    S: Sequence,
    F: FnMut(&S::Item) -> K,
    K: Hash + Eq,
{
    /// Drains the source into a [`GroupAccumulator`] without yielding.
    pub fn into_groups(self) -> GroupAccumulator<K, S::Item> {
        let GroupBy {
            source, mut key, ..
        } = self;

        let mut groups = GroupAccumulator::new();
        source.drive(|item| {
            groups.push(key(&item), item);
            Flow::Continue
        });
        groups
    }
}

impl<S, K, F> Sequence for GroupBy<S, K, F>
where
    S: Sequence,
    F: FnMut(&S::Item) -> K,
    K: Hash + Eq,
{
    type Item = Vec<S::Item>;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        for (_, group) in self.into_groups() {
            if visitor(group).is_stop() {
                return Flow::Stop;
            }
        }
        Flow::Continue
    }
}
