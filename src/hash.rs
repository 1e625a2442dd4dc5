use crate::flow::Flow;
use crate::sequence::{PairSequence, Sequence};
use ahash::{AHasher, RandomState};
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::OnceLock;

/// Hasher seeds shared by every [`HashState::new`] in this process.
fn process_state() -> &'static RandomState {
    static STATE: OnceLock<RandomState> = OnceLock::new();
    STATE.get_or_init(RandomState::new)
}

/// Resettable per-element hash accumulator.
///
/// Produces a 64-bit structural fingerprint. Equal values get equal digests
/// within one process run. Digests are not cryptographic, are not stable
/// across runs or versions, and collisions go undetected.
#[derive(Clone)]
pub struct HashState {
    seed: AHasher,
    current: AHasher,
}

impl HashState {
    /// Creates a state seeded from the process-wide hasher seeds.
    pub fn new() -> Self {
        Self::with_random_state(process_state())
    }

    /// Creates a state seeded from `state`.
    pub fn with_random_state(state: &RandomState) -> Self {
        let seed = state.build_hasher();
        Self {
            current: seed.clone(),
            seed,
        }
    }

    /// Discards everything written since the last reset.
    #[inline]
    pub fn reset(&mut self) {
        self.current = self.seed.clone();
    }

    /// Folds `value` into the accumulator.
    #[inline]
    pub fn write<T: Hash + ?Sized>(&mut self, value: &T) {
        value.hash(&mut self.current);
    }

    /// Returns the digest of everything written since the last reset.
    #[inline]
    pub fn finish(&self) -> u64 {
        self.current.finish()
    }

    /// Resets, folds in `value` and returns its digest.
    pub fn digest<T: Hash + ?Sized>(&mut self, value: &T) -> u64 {
        self.reset();
        self.write(value);
        self.finish()
    }
}

impl fmt::Debug for HashState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashState")
            .field("current", &self.finish())
            .finish()
    }
}

impl Default for HashState {
    fn default() -> Self {
        Self::new()
    }
}

/// Pairs each element with its digest.
///
/// Created by [`Sequence::hashed`] and [`Sequence::hashed_with`].
#[derive(Debug, Clone)]
pub struct Hashed<S> {
    source: S,
    state: HashState,
}

impl<S> Hashed<S> {
    pub(crate) fn new(source: S, state: HashState) -> Self {
        Self { source, state }
    }
}

impl<S> PairSequence for Hashed<S>
where
    S: Sequence,
    S::Item: Hash,
{
    type Key = u64;
    type Value = S::Item;

    fn drive_pairs<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Key, Self::Value) -> Flow,
    {
        let Hashed { source, mut state } = self;

        source.drive(|item| {
            let digest = state.digest(&item);
            visitor(digest, item)
        })
    }
}
