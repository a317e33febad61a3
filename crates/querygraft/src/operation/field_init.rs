use crate::ast::ArgValue;
use indexmap::IndexMap;

/// Optional initial shape for [`SelectionHandle::field_with()`]: an alias
/// and/or arguments to apply to the upserted field.
///
/// [`SelectionHandle::field_with()`]: crate::SelectionHandle::field_with
#[derive(Clone, Debug, Default)]
pub struct FieldInit {
    pub alias: Option<String>,
    pub arguments: IndexMap<String, ArgValue>,
}

impl FieldInit {
    pub fn aliased(alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            arguments: IndexMap::new(),
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }
}
