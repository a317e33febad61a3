use crate::SourcePosition;

/// A span of snippet source text, from `start_inclusive` to `end_exclusive`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SourceSpan {
    pub start_inclusive: SourcePosition,
    pub end_exclusive: SourcePosition,
}

impl SourceSpan {
    pub fn new(start_inclusive: SourcePosition, end_exclusive: SourcePosition) -> Self {
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    /// A zero-width span at a single position. Used for end-of-input errors.
    pub fn empty(pos: SourcePosition) -> Self {
        Self::new(pos, pos)
    }
}
