use crate::flow::Flow;
use crate::sequence::{Restartable, Sequence};

/// Yields the elements accepted by a predicate.
///
/// Created by [`Sequence::filter`].
#[derive(Debug, Clone)]
pub struct Filter<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> Filter<S, P> {
    pub(crate) fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let Filter {
            source,
            mut predicate,
        } = self;

        source.drive(|item| {
            if predicate(&item) {
                visitor(item)
            } else {
                Flow::Continue
            }
        })
    }
}

impl<S, P> Restartable for Filter<S, P>
where
    S: Restartable,
    P: FnMut(&S::Item) -> bool,
{
    fn replay<V>(&mut self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let Filter { source, predicate } = self;

        source.replay(|item| {
            if predicate(&item) {
                visitor(item)
            } else {
                Flow::Continue
            }
        })
    }
}

/// Yields the elements that appear nowhere in an exclude sequence.
///
/// For every source element the exclude sequence is replayed from its start
/// until a match is found, hence the [`Restartable`] bound.
///
/// Created by [`Sequence::remove`].
#[derive(Debug, Clone)]
pub struct Remove<S, X> {
    source: S,
    exclude: X,
}

impl<S, X> Remove<S, X> {
    pub(crate) fn new(source: S, exclude: X) -> Self {
        Self { source, exclude }
    }
}

/// Returns true if `exclude` produces an element equal to `item`.
fn excluded<X>(exclude: &mut X, item: &X::Item) -> bool
where
    X: Restartable,
    X::Item: PartialEq,
{
    // Stopping the replay is how a match is reported
    exclude
        .replay(|other| Flow::from(other != *item))
        .is_stop()
}

impl<S, X> Sequence for Remove<S, X>
where
    S: Sequence,
    X: Restartable<Item = S::Item>,
    S::Item: PartialEq,
{
    type Item = S::Item;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let Remove {
            source,
            mut exclude,
        } = self;

        source.drive(|item| {
            if excluded(&mut exclude, &item) {
                Flow::Continue
            } else {
                visitor(item)
            }
        })
    }
}

impl<S, X> Restartable for Remove<S, X>
where
    S: Restartable,
    X: Restartable<Item = S::Item>,
    S::Item: PartialEq,
{
    fn replay<V>(&mut self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let Remove { source, exclude } = self;

        source.replay(|item| {
            if excluded(&mut *exclude, &item) {
                Flow::Continue
            } else {
                visitor(item)
            }
        })
    }
}

/// Yields at most a fixed number of elements.
///
/// When the limit is reached the upstream source receives a stop, but the
/// traversal as a whole counts as complete: [`drive`](Sequence::drive)
/// reports [`Flow::Stop`] only when the downstream visitor asked for it.
///
/// Created by [`Sequence::take`].
#[derive(Debug, Clone)]
pub struct Take<S> {
    source: S,
    limit: usize,
}

impl<S> Take<S> {
    pub(crate) fn new(source: S, limit: usize) -> Self {
        Self { source, limit }
    }
}

impl<S: Sequence> Sequence for Take<S> {
    type Item = S::Item;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let Take { source, limit } = self;
        if limit == 0 {
            return Flow::Continue;
        }

        let mut remaining = limit;
        let mut stopped = false;
        source.drive(|item| {
            // A source that ignores a stop must not reach the visitor again
            if stopped || remaining == 0 {
                return Flow::Stop;
            }
            remaining -= 1;
            if visitor(item).is_stop() {
                stopped = true;
                return Flow::Stop;
            }
            Flow::from(remaining > 0)
        });

        Flow::from(!stopped)
    }
}
