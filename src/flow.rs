/// Signal returned by a visitor after seeing one element.
///
/// Every combinator threads this value back up through its own upstream:
/// once a visitor answers [`Flow::Stop`], nothing upstream produces another
/// element for that traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Keep producing elements.
    Continue,

    /// Stop the traversal. This is a normal outcome, not a failure.
    Stop,
}

impl Flow {
    /// Returns true if the traversal should keep going.
    #[inline]
    pub fn is_continue(self) -> bool {
        matches!(self, Flow::Continue)
    }

    /// Returns true if the traversal was cut short.
    #[inline]
    pub fn is_stop(self) -> bool {
        matches!(self, Flow::Stop)
    }
}

impl From<bool> for Flow {
    /// `true` continues, `false` stops.
    #[inline]
    fn from(keep_going: bool) -> Self {
        if keep_going {
            Flow::Continue
        } else {
            Flow::Stop
        }
    }
}
