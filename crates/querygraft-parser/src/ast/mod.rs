//! The selection-tree data model produced by the snippet parser.
//!
//! These types double as the mutable tree grown by the builder layer: the
//! parser produces sibling lists of [`Selection`]s, and the merge engine
//! combines them into a tree owned by one operation builder.

mod arg_value;
mod directive;
mod selection;

pub use arg_value::ArgValue;
pub use directive::Directive;
pub use selection::FieldNode;
pub use selection::FragmentSpread;
pub use selection::InlineFragment;
pub use selection::Selection;
