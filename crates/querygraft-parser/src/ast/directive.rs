use crate::ast::ArgValue;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// A `@name(args)` directive annotation on a selection.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Directive {
    pub name: String,
    pub arguments: IndexMap<String, ArgValue>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: IndexMap::new(),
        }
    }

    pub fn with_arguments(
        name: impl Into<String>,
        arguments: IndexMap<String, ArgValue>,
    ) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}
