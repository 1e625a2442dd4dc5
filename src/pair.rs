use crate::flow::Flow;
use crate::sequence::{PairSequence, Sequence};

/// First element of every pair.
///
/// Created by [`PairSequence::keys`].
#[derive(Debug, Clone)]
pub struct Keys<P> {
    pairs: P,
}

impl<P> Keys<P> {
    pub(crate) fn new(pairs: P) -> Self {
        Self { pairs }
    }
}

impl<P: PairSequence> Sequence for Keys<P> {
    type Item = P::Key;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        self.pairs.drive_pairs(|key, _| visitor(key))
    }
}

/// Second element of every pair.
///
/// Created by [`PairSequence::values`].
#[derive(Debug, Clone)]
pub struct Values<P> {
    pairs: P,
}

impl<P> Values<P> {
    pub(crate) fn new(pairs: P) -> Self {
        Self { pairs }
    }
}

impl<P: PairSequence> Sequence for Values<P> {
    type Item = P::Value;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        self.pairs.drive_pairs(|_, value| visitor(value))
    }
}
