//! A GraphQL query construction engine.
//!
//! `querygraft` builds, mutates, and serializes GraphQL operation documents
//! through a path-addressable API. Callers hand it textual selection
//! snippets (parsed by [`querygraft-parser`](querygraft_parser)); an
//! idempotent merge engine folds each snippet into one mutable selection
//! tree, so many independently-loaded modules can contribute fields to a
//! shared query without duplication; a deterministic renderer turns the
//! finished tree back into valid GraphQL document text.
//!
//! ```rust
//! use querygraft::OperationBuilder;
//!
//! let mut builder = OperationBuilder::query();
//! builder.set_name("GetUser").set_variable("id", "ID");
//! builder.root().add("user(id: $id) { name }")?;
//! builder.at("user")?.add("email")?;
//!
//! assert_eq!(
//!     builder.to_string(),
//!     "query GetUser($id: ID) { user(id: $id) { name email } }",
//! );
//! # Ok::<(), querygraft::QueryBuildError>(())
//! ```

mod error;
mod merge;
pub mod operation;
mod path;
pub mod render;

pub use error::QueryBuildError;
pub use merge::MergeConflict;
pub use merge::merge_selections;
pub use operation::FieldHandle;
pub use operation::FieldInit;
pub use operation::FragmentDef;
pub use operation::Operation;
pub use operation::OperationBuilder;
pub use operation::OperationKind;
pub use operation::SelectionHandle;
pub use path::format_path;
pub use path::parse_path;
pub use querygraft_parser::SnippetParseError;
pub use querygraft_parser::SnippetParseErrorKind;
pub use querygraft_parser::ast;
pub use querygraft_parser::parse_snippet;

#[cfg(test)]
mod tests;
