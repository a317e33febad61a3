use crate::ast::Selection;
use crate::operation::FragmentDef;
use crate::operation::OperationKind;
use crate::render;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// A serializable snapshot of a GraphQL operation: the value produced by
/// [`OperationBuilder::to_object()`](crate::OperationBuilder::to_object) and
/// consumed by the renderer.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub name: Option<String>,
    /// Variable declarations, name → type text. Insertion order is
    /// rendering order; redeclaring a name keeps the last type.
    pub variables: IndexMap<String, String>,
    /// The root sibling list.
    pub selection_set: Vec<Selection>,
    /// Fragment definitions keyed by name.
    pub fragments: IndexMap<String, FragmentDef>,
}

impl Operation {
    /// An empty operation of the given kind.
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            name: None,
            variables: IndexMap::new(),
            selection_set: Vec::new(),
            fragments: IndexMap::new(),
        }
    }

    /// Renders this snapshot to GraphQL document text.
    ///
    /// Deterministic and side-effect-free: identical snapshots render to
    /// byte-identical text.
    pub fn render(&self) -> String {
        render::render_operation(self)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
