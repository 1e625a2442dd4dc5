use crate::flow::Flow;
use crate::sequence::Sequence;
use std::ops::Add;

/// How a traversal went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraversalStats {
    /// Number of elements handed to the visitor
    pub visited: usize,
    /// Whether the visitor cut the traversal short
    pub stopped_early: bool,
}

pub(crate) fn count<S: Sequence>(source: S) -> usize {
    let mut total = 0;
    source.drive(|_| {
        total += 1;
        Flow::Continue
    });
    total
}

pub(crate) fn is_empty<S: Sequence>(source: S) -> bool {
    let mut empty = true;
    source.drive(|_| {
        empty = false;
        Flow::Stop
    });
    empty
}

pub(crate) fn first<S: Sequence>(source: S) -> Option<S::Item> {
    let mut found = None;
    source.drive(|item| {
        found = Some(item);
        Flow::Stop
    });
    found
}

/// Sorted accumulation: the result does not depend on arrival order.
pub(crate) fn sum<S>(source: S) -> S::Item
where
    S: Sequence,
    S::Item: Ord + Default + Add<Output = S::Item>,
{
    let mut items: Vec<S::Item> = collect(source);
    items.sort();
    items
        .into_iter()
        .fold(<S::Item as Default>::default(), |total, item| total + item)
}

pub(crate) fn try_sum<S, U, E, F>(source: S, mut f: F) -> Result<U, E>
where
    S: Sequence,
    U: Default + Add<Output = U>,
    F: FnMut(S::Item) -> Result<U, E>,
{
    let mut total = U::default();
    let mut failure = None;

    source.drive(|item| match f(item) {
        Ok(value) => {
            total = std::mem::take(&mut total) + value;
            Flow::Continue
        }
        Err(e) => {
            failure = Some(e);
            Flow::Stop
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(total),
    }
}

pub(crate) fn collect<S, C>(source: S) -> C
where
    S: Sequence,
    C: Default + Extend<S::Item>,
{
    let mut out = C::default();
    source.drive(|item| {
        out.extend(std::iter::once(item));
        Flow::Continue
    });
    out
}

pub(crate) fn for_each<S, F>(source: S, mut f: F)
where
    S: Sequence,
    F: FnMut(S::Item),
{
    source.drive(|item| {
        f(item);
        Flow::Continue
    });
}

pub(crate) fn drive_with_stats<S, V>(source: S, mut visitor: V) -> TraversalStats
where
    S: Sequence,
    V: FnMut(S::Item) -> Flow,
{
    let mut visited = 0;
    let flow = source.drive(|item| {
        visited += 1;
        visitor(item)
    });

    TraversalStats {
        visited,
        stopped_early: flow.is_stop(),
    }
}
