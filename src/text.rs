use crate::error::Result;
use crate::flow::Flow;
use crate::sequence::{Restartable, Sequence};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::fmt::{Debug, Display};

/// Turns an element into the text that matchers look at.
///
/// The projection is picked once, when the combinator is built, from a small
/// closed set: [`AsText`] for elements that already are text, [`Rendered`]
/// for elements that render themselves through `Display`, [`Formatted`] for
/// the generic `Debug` representation, or any `Fn(&T) -> String`.
pub trait Project<T> {
    fn project<'a>(&self, item: &'a T) -> Cow<'a, str>;
}

/// Projection for elements that are text already. Borrows, never allocates.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsText;

/// Projection through the element's `Display` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rendered;

/// Projection through the element's `Debug` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatted;

impl<T: AsRef<str>> Project<T> for AsText {
    #[inline]
    fn project<'a>(&self, item: &'a T) -> Cow<'a, str> {
        Cow::Borrowed(item.as_ref())
    }
}

impl<T: Display> Project<T> for Rendered {
    fn project<'a>(&self, item: &'a T) -> Cow<'a, str> {
        Cow::Owned(item.to_string())
    }
}

impl<T: Debug> Project<T> for Formatted {
    fn project<'a>(&self, item: &'a T) -> Cow<'a, str> {
        Cow::Owned(format!("{item:?}"))
    }
}

impl<T, F> Project<T> for F
where
    F: Fn(&T) -> String,
{
    fn project<'a>(&self, item: &'a T) -> Cow<'a, str> {
        Cow::Owned(self(item))
    }
}

/// Options applied when compiling a pattern with [`Matcher::pattern_with`].
#[derive(Debug, Clone, Default)]
pub struct PatternOptions {
    /// Match letters regardless of case.
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// `.` also matches `\n`.
    pub dot_matches_new_line: bool,
    /// Upper bound on the compiled program size, in bytes.
    pub size_limit: Option<usize>,
}

/// Decides whether a textual projection is accepted.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Accepts text containing a match of the regular expression.
    Pattern(Regex),
    /// Accepts text exactly equal to the literal.
    Literal(String),
}

impl Matcher {
    /// Compiles `pattern` with default options.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Matcher::Pattern(Regex::new(pattern)?))
    }

    /// Compiles `pattern` with the given options.
    pub fn pattern_with(pattern: &str, options: &PatternOptions) -> Result<Self> {
        let mut builder = RegexBuilder::new(pattern);
        builder
            .case_insensitive(options.case_insensitive)
            .multi_line(options.multi_line)
            .dot_matches_new_line(options.dot_matches_new_line);
        if let Some(limit) = options.size_limit {
            builder.size_limit(limit);
        }
        Ok(Matcher::Pattern(builder.build()?))
    }

    /// Matches text equal to `text`, with no regex interpretation.
    pub fn literal(text: impl Into<String>) -> Self {
        Matcher::Literal(text.into())
    }

    /// Returns true if `text` is accepted.
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            Matcher::Pattern(regex) => regex.is_match(text),
            Matcher::Literal(literal) => literal == text,
        }
    }
}

impl From<Regex> for Matcher {
    fn from(regex: Regex) -> Self {
        Matcher::Pattern(regex)
    }
}

/// Yields the elements whose projection a [`Matcher`] accepts.
///
/// Created by [`Sequence::matching`], [`Sequence::matching_pattern`] and
/// [`Sequence::matching_text`].
#[derive(Debug, Clone)]
pub struct Matching<S, P> {
    source: S,
    matcher: Matcher,
    projection: P,
}

impl<S, P> Matching<S, P> {
    pub(crate) fn new(source: S, matcher: Matcher, projection: P) -> Self {
        Self {
            source,
            matcher,
            projection,
        }
    }
}

impl<S, P> Sequence for Matching<S, P>
where
    S: Sequence,
    P: Project<S::Item>,
{
    type Item = S::Item;

    fn drive<V>(self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let Matching {
            source,
            matcher,
            projection,
        } = self;

        source.drive(|item| {
            if matcher.accepts(&projection.project(&item)) {
                visitor(item)
            } else {
                Flow::Continue
            }
        })
    }
}

impl<S, P> Restartable for Matching<S, P>
where
    S: Restartable,
    P: Project<S::Item>,
{
    fn replay<V>(&mut self, mut visitor: V) -> Flow
    where
        V: FnMut(Self::Item) -> Flow,
    {
        let Matching {
            source,
            matcher,
            projection,
        } = self;

        source.replay(|item| {
            if matcher.accepts(&projection.project(&item)) {
                visitor(item)
            } else {
                Flow::Continue
            }
        })
    }
}
