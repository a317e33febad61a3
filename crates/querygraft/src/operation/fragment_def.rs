use crate::ast::Selection;
use serde::Deserialize;
use serde::Serialize;

/// A named fragment definition, rendered as a top-level
/// `fragment Name on Type { ... }` block.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FragmentDef {
    pub name: String,
    /// The type condition, if one was given.
    pub on: Option<String>,
    pub selection_set: Vec<Selection>,
}

impl FragmentDef {
    pub fn new(
        name: impl Into<String>,
        on: Option<String>,
        selection_set: Vec<Selection>,
    ) -> Self {
        Self {
            name: name.into(),
            on,
            selection_set,
        }
    }
}
