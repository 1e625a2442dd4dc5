use crate::flow::Flow;
use crate::sequence::{Restartable, Sequence};
use std::marker::PhantomData;

/// Sequence backed by an [`Iterator`].
///
/// Restartable whenever the iterator is `Clone`: each replay clones the
/// untouched iterator and walks it from the start. An iterator whose clones
/// share a cursor (one reading from a channel, say) gets nothing back on the
/// second replay; collect it into a `Vec` first.
#[derive(Debug, Clone)]
pub struct FromIter<I> {
    iter: I,
}

/// Creates a sequence over anything iterable.
///
/// ```
/// use sequencer_rs::{from_iter, Sequence};
///
/// let data = [3, 1, 2];
/// assert_eq!(from_iter(data.iter().copied()).count(), 3);
/// ```
pub fn from_iter<I: IntoIterator>(iter: I) -> FromIter<I::IntoIter> {
    FromIter {
        iter: iter.into_iter(),
    }
}

fn drive_iter<I, V>(iter: I, mut visitor: V) -> Flow
where
    I: Iterator,
    V: FnMut(I::Item) -> Flow,
{
    for item in iter {
        if visitor(item).is_stop() {
            return Flow::Stop;
        }
    }
    Flow::Continue
}

impl<I: Iterator> Sequence for FromIter<I> {
    type Item = I::Item;

    fn drive<V>(self, visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        drive_iter(self.iter, visitor)
    }
}

impl<I: Iterator + Clone> Restartable for FromIter<I> {
    fn replay<V>(&mut self, visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        drive_iter(self.iter.clone(), visitor)
    }
}

/// Sequence backed by a push-style producer closure.
///
/// The producer receives the visitor and is expected to call it once per
/// element, returning early when it answers [`Flow::Stop`]. A producer that
/// keeps pushing after a stop is cut off: further elements are dropped
/// without reaching the visitor.
pub struct FromFn<F, T> {
    producer: F,
    _item: PhantomData<fn() -> T>,
}

/// Creates a sequence from a push-style producer.
///
/// ```
/// use sequencer_rs::{from_fn, Flow, Sequence};
///
/// let countdown = from_fn(|visit: &mut dyn FnMut(u32) -> Flow| {
///     for n in (1..=3).rev() {
///         if visit(n).is_stop() {
///             return Flow::Stop;
///         }
///     }
///     Flow::Continue
/// });
///
/// assert_eq!(countdown.collect::<Vec<_>>(), vec![3, 2, 1]);
/// ```
pub fn from_fn<F, T>(producer: F) -> FromFn<F, T>
where
    F: FnOnce(&mut dyn FnMut(T) -> Flow) -> Flow,
{
    FromFn {
        producer,
        _item: PhantomData,
    }
}

impl<F, T> Sequence for FromFn<F, T>
where
    F: FnOnce(&mut dyn FnMut(T) -> Flow) -> Flow,
{
    type Item = T;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let mut stopped = false;
        let flow = (self.producer)(&mut |item: T| {
            if stopped {
                return Flow::Stop;
            }
            let flow = visitor(item);
            stopped = flow.is_stop();
            flow
        });

        if stopped {
            Flow::Stop
        } else {
            flow
        }
    }
}

/// Sequence that produces nothing.
#[derive(Debug)]
pub struct Empty<T> {
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        empty()
    }
}

/// Creates a sequence with no elements.
pub fn empty<T>() -> Empty<T> {
    Empty { _item: PhantomData }
}

impl<T> Sequence for Empty<T> {
    type Item = T;

    fn drive<V>(self, _visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        Flow::Continue
    }
}

impl<T> Restartable for Empty<T> {
    fn replay<V>(&mut self, _visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_iter_in_order() {
        let got: Vec<i32> = from_iter(vec![1, 2, 3]).collect();
        assert_eq!(got, vec![1, 2, 3]);
    }

    #[test]
    fn test_from_iter_stop_reported() {
        let mut seen = Vec::new();
        let flow = from_iter(1..=5).drive(|v| {
            seen.push(v);
            Flow::from(v < 2)
        });
        assert_eq!(flow, Flow::Stop);
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_from_iter_exhausted_reported() {
        let flow = from_iter(1..=3).drive(|_| Flow::Continue);
        assert_eq!(flow, Flow::Continue);
    }

    #[test]
    fn test_replay_restarts() {
        let data = [1, 2, 3];
        let mut seq = from_iter(data.iter());

        let mut first = Vec::new();
        seq.replay(|v| {
            first.push(*v);
            Flow::Continue
        });
        let mut second = Vec::new();
        seq.replay(|v| {
            second.push(*v);
            Flow::Continue
        });

        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_fn_cuts_off_misbehaving_producer() {
        // Producer ignores the stop signal
        let seq = from_fn(|visit: &mut dyn FnMut(i32) -> Flow| {
            for v in 0..10 {
                visit(v);
            }
            Flow::Continue
        });

        let mut calls = 0;
        let flow = seq.drive(|_| {
            calls += 1;
            Flow::Stop
        });

        assert_eq!(calls, 1);
        assert_eq!(flow, Flow::Stop);
    }

    #[test]
    fn test_from_fn_channel_backed() {
        let (tx, rx) = std::sync::mpsc::channel();
        for v in ["a", "b", "c"] {
            tx.send(v).unwrap();
        }
        drop(tx);

        let seq = from_fn(move |visit: &mut dyn FnMut(&'static str) -> Flow| {
            for v in rx.iter() {
                if visit(v).is_stop() {
                    return Flow::Stop;
                }
            }
            Flow::Continue
        });

        assert_eq!(seq.collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_channel_iterator_replays_once() {
        // A cloned iterator over `&Receiver` shares the channel, so the
        // second replay finds it drained
        let (tx, rx) = std::sync::mpsc::channel();
        for v in [2, 4] {
            tx.send(v).unwrap();
        }
        let receiver = &rx;
        let mut exclude = from_iter(std::iter::from_fn(move || receiver.try_recv().ok()));

        assert_eq!(exclude.replay(|_| Flow::Continue), Flow::Continue);
        let mut calls = 0;
        exclude.replay(|_| {
            calls += 1;
            Flow::Continue
        });
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_channel_exclude_must_be_collected() {
        let (tx, rx) = std::sync::mpsc::channel();
        for v in [2, 4] {
            tx.send(v).unwrap();
        }

        // Used directly, only the first element is checked against 2 and 4
        let receiver = &rx;
        let drained = from_iter(std::iter::from_fn(move || receiver.try_recv().ok()));
        let got: Vec<i32> = from_iter([2, 3, 4, 5]).remove(drained).collect();
        assert_eq!(got, vec![3, 4, 5]);

        for v in [2, 4] {
            tx.send(v).unwrap();
        }
        let collected: Vec<i32> = rx.try_iter().collect();
        let got: Vec<i32> = from_iter([2, 3, 4, 5]).remove(from_iter(collected)).collect();
        assert_eq!(got, vec![3, 5]);
    }

    #[test]
    fn test_empty() {
        let mut calls = 0;
        let flow = empty::<u8>().drive(|_| {
            calls += 1;
            Flow::Continue
        });
        assert_eq!(calls, 0);
        assert_eq!(flow, Flow::Continue);
        assert!(empty::<u8>().is_empty());
    }
}
