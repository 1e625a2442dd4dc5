use crate::flow::Flow;
use crate::sequence::{Restartable, Sequence};
use ahash::AHashMap as HashMap;
use std::any::Any;
use std::fmt;
use std::hash::Hash;

/// Type-erased element produced by [`Sequence::erase`].
pub type Erased = Box<dyn Any>;

/// Created by [`Sequence::replace_with`].
#[derive(Debug, Clone)]
pub struct ReplaceWith<S, F> {
    source: S,
    f: F,
}

impl<S, F> ReplaceWith<S, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        Self { source, f }
    }
}

impl<S, F> Sequence for ReplaceWith<S, F>
where
    S: Sequence,
    F: FnMut(S::Item) -> S::Item,
{
    type Item = S::Item;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let ReplaceWith { source, mut f } = self;
        source.drive(|item| visitor(f(item)))
    }
}

impl<S, F> Restartable for ReplaceWith<S, F>
where
    S: Restartable,
    F: FnMut(S::Item) -> S::Item,
{
    fn replay<V>(&mut self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let ReplaceWith { source, f } = self;
        source.replay(|item| visitor(f(item)))
    }
}

/// Swaps elements for their entry in a replacement table.
///
/// Elements missing from the table pass through unchanged.
///
/// Created by [`Sequence::replace`].
pub struct Replace<S: Sequence> {
    source: S,
    table: HashMap<S::Item, S::Item>,
}

impl<S> fmt::Debug for Replace<S>
where
    S: Sequence + fmt::Debug,
    S::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replace")
            .field("source", &self.source)
            .field("table", &self.table)
            .finish()
    }
}

impl<S> Replace<S>
where
    S: Sequence,
    S::Item: Hash + Eq,
{
    pub(crate) fn new<I>(source: S, table: I) -> Self
    where
        I: IntoIterator<Item = (S::Item, S::Item)>,
    {
        Self {
            source,
            table: table.into_iter().collect(),
        }
    }
}

fn lookup<T: Hash + Eq + Clone>(table: &HashMap<T, T>, item: T) -> T {
    match table.get(&item) {
        Some(replacement) => replacement.clone(),
        None => item,
    }
}

impl<S> Sequence for Replace<S>
where
    S: Sequence,
    S::Item: Hash + Eq + Clone,
{
    type Item = S::Item;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let Replace { source, table } = self;
        source.drive(|item| visitor(lookup(&table, item)))
    }
}

impl<S> Restartable for Replace<S>
where
    S: Restartable,
    S::Item: Hash + Eq + Clone,
{
    fn replay<V>(&mut self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let Replace { source, table } = self;
        source.replay(|item| visitor(lookup(table, item)))
    }
}

/// Maps elements to another type.
///
/// Created by [`Sequence::convert`].
#[derive(Debug, Clone)]
pub struct Convert<S, F> {
    source: S,
    f: F,
}

impl<S, F> Convert<S, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        Self { source, f }
    }
}

impl<S, U, F> Sequence for Convert<S, F>
where
    S: Sequence,
    F: FnMut(S::Item) -> U,
{
    type Item = U;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let Convert { source, mut f } = self;
        source.drive(|item| visitor(f(item)))
    }
}

impl<S, U, F> Restartable for Convert<S, F>
where
    S: Restartable,
    F: FnMut(S::Item) -> U,
{
    fn replay<V>(&mut self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let Convert { source, f } = self;
        source.replay(|item| visitor(f(item)))
    }
}

/// Created by [`Sequence::erase`].
#[derive(Debug, Clone)]
pub struct Erase<S> {
    source: S,
}

impl<S> Erase<S> {
    pub(crate) fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S> Sequence for Erase<S>
where
    S: Sequence,
    S::Item: Any,
{
    type Item = Erased;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        self.source.drive(|item| visitor(Box::new(item)))
    }
}
