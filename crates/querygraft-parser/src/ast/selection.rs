use crate::ast::ArgValue;
use crate::ast::Directive;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// A single entry in a selection set.
///
/// The three roles are mutually exclusive by construction: a selection is a
/// regular field, a named fragment spread, or an inline fragment, never a
/// mix.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Selection {
    Field(FieldNode),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    /// The response key if this selection is a regular field.
    pub fn response_key(&self) -> Option<&str> {
        match self {
            Selection::Field(field) => Some(field.response_key()),
            Selection::FragmentSpread(_) | Selection::InlineFragment(_) => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldNode> {
        match self {
            Selection::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_field_mut(&mut self) -> Option<&mut FieldNode> {
        match self {
            Selection::Field(field) => Some(field),
            _ => None,
        }
    }
}

/// A regular field selection: `alias: name(args) @directives { children }`.
///
/// Child order is rendering order and is preserved by every operation that
/// touches the tree; fields are only ever appended, never reordered.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FieldNode {
    pub name: String,
    pub alias: Option<String>,
    pub arguments: IndexMap<String, ArgValue>,
    pub directives: Vec<Directive>,
    pub selection_set: Vec<Selection>,
}

impl FieldNode {
    /// A bare leaf field with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            arguments: IndexMap::new(),
            directives: Vec::new(),
            selection_set: Vec::new(),
        }
    }

    /// The field's effective output key: its alias if present, else its
    /// name.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// A `...Name` reference to a separately defined fragment.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FragmentSpread {
    pub name: String,
    pub directives: Vec<Directive>,
}

impl FragmentSpread {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directives: Vec::new(),
        }
    }
}

/// A `... on Type { children }` type-conditional selection block.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct InlineFragment {
    pub on_type: String,
    pub directives: Vec<Directive>,
    pub selection_set: Vec<Selection>,
}

impl InlineFragment {
    pub fn new(on_type: impl Into<String>) -> Self {
        Self {
            on_type: on_type.into(),
            directives: Vec::new(),
            selection_set: Vec::new(),
        }
    }
}
