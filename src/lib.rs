//! # Sequencer - Lazy Sequence Combinators
//!
//! A single-pass engine for producing, filtering, grouping, deduplicating and
//! aggregating ordered element streams without materializing intermediate
//! collections.
//!
//! A [`Sequence`] is driven by a visitor that sees one element at a time and
//! answers [`Flow::Continue`] or [`Flow::Stop`]. Every combinator forwards a
//! stop to its own upstream at once, so early termination costs nothing
//! beyond the elements already produced.
//!
//! ## Example
//!
//! ```
//! use sequencer_rs::{from_iter, Sequence};
//!
//! let data = [1, 2, 3, 1, 4, 2, 5, 1];
//!
//! let repeated: Vec<i32> = from_iter(data).duplicates().collect();
//! assert_eq!(repeated, vec![1, 2]);
//!
//! let distinct: Vec<i32> = from_iter(data).dedup().collect();
//! assert_eq!(distinct, vec![1, 2, 3, 4, 5]);
//!
//! let total = from_iter(data).filter(|v| *v > 1).sum();
//! assert_eq!(total, 16);
//! ```
//!
//! ## Materializing combinators
//!
//! Two operations read their whole input before producing anything:
//! - [`Sequence::group_by`] has to place every element before any group is
//!   complete
//! - [`Sequence::sum`] sorts its input so the total does not depend on
//!   arrival order
//!
//! Everything else is incremental and safe to use on unbounded sources
//! together with [`Sequence::take`] or a visitor that stops.

mod error;
mod filter;
mod flow;
mod group;
mod hash;
mod pair;
mod sequence;
mod set;
mod source;
mod terminal;
mod text;
mod transform;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use filter::{Filter, Remove, Take};
pub use flow::Flow;
pub use group::{GroupAccumulator, GroupBy};
pub use hash::{HashState, Hashed};
pub use pair::{Keys, Values};
pub use sequence::{PairSequence, Restartable, Sequence};
pub use set::{Dedup, Duplicates};
pub use source::{empty, from_fn, from_iter, Empty, FromFn, FromIter};
pub use terminal::TraversalStats;
pub use text::{AsText, Formatted, Matcher, Matching, PatternOptions, Project, Rendered};
pub use transform::{Convert, Erase, Erased, Replace, ReplaceWith};
