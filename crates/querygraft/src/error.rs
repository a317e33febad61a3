use crate::SnippetParseError;
use thiserror::Error;

/// Errors raised by the builder layer.
///
/// All are raised synchronously at the triggering call and never retried
/// internally; recovery (for example skipping one bad augmentation snippet
/// without abandoning the whole query) is the caller's responsibility.
/// Merge-time argument conflicts are deliberately not errors — they resolve
/// by override and are recorded as [`MergeConflict`](crate::MergeConflict)s.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum QueryBuildError {
    /// Navigation walked through a segment with no matching field sibling.
    #[error("path `{path}` not found: no field matches segment `{segment}`")]
    PathNotFound { path: String, segment: String },

    /// A strict field lookup found no sibling with the given response key
    /// or name.
    #[error("no field `{key}` at path `{path}`")]
    FieldNotFound { path: String, key: String },

    /// A snippet failed to parse.
    #[error(transparent)]
    Parse(#[from] SnippetParseError),
}
