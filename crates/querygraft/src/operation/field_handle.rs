use crate::QueryBuildError;
use crate::ast::ArgValue;
use crate::ast::FieldNode;
use crate::operation::OperationBuilder;
use crate::operation::SelectionHandle;

type Result<T> = std::result::Result<T, QueryBuildError>;

/// A handle bound to one field node, addressed by its parent path plus its
/// response key.
///
/// Like [`SelectionHandle`], the address is re-resolved on every call;
/// mutating methods consume and return the handle for chaining. Mutations
/// that change the response key (aliasing) return a handle carrying the new
/// key.
#[derive(Debug)]
pub struct FieldHandle<'b> {
    builder: &'b mut OperationBuilder,
    parent: Vec<String>,
    key: String,
}

impl<'b> FieldHandle<'b> {
    pub(crate) fn new(
        builder: &'b mut OperationBuilder,
        parent: Vec<String>,
        key: String,
    ) -> Self {
        Self {
            builder,
            parent,
            key,
        }
    }

    /// The response key this handle addresses.
    pub fn response_key(&self) -> &str {
        &self.key
    }

    /// The field's declared name (not its alias).
    pub fn name(&self) -> Result<String> {
        Ok(self.builder.field_ref(&self.parent, &self.key)?.name.clone())
    }

    pub fn alias(&self) -> Result<Option<String>> {
        Ok(self.builder.field_ref(&self.parent, &self.key)?.alias.clone())
    }

    /// A snapshot copy of the underlying node.
    pub fn node(&self) -> Result<FieldNode> {
        Ok(self.builder.field_ref(&self.parent, &self.key)?.clone())
    }

    /// Sets the field's alias. The returned handle addresses the field by
    /// its new response key.
    pub fn set_alias(self, alias: impl Into<String>) -> Result<Self> {
        self.replace_alias(Some(alias.into()))
    }

    /// Clears the alias; the response key falls back to the field name.
    pub fn clear_alias(self) -> Result<Self> {
        self.replace_alias(None)
    }

    fn replace_alias(self, alias: Option<String>) -> Result<Self> {
        let FieldHandle {
            builder,
            parent,
            key,
        } = self;
        let key = builder.set_field_alias(&parent, &key, alias)?;
        Ok(FieldHandle {
            builder,
            parent,
            key,
        })
    }

    /// Sets one argument on the field. This is a plain write, not a merge:
    /// no conflict is recorded when it overwrites.
    pub fn arg(self, name: &str, value: impl Into<ArgValue>) -> Result<Self> {
        self.builder
            .set_field_arg(&self.parent, &self.key, name, value.into())?;
        Ok(self)
    }

    /// Parses a snippet and merges it into this field's children.
    pub fn add(self, snippet: &str) -> Result<Self> {
        let selections = querygraft_parser::parse_snippet(snippet)?;
        self.builder
            .merge_into_field(&self.parent, &self.key, selections)?;
        Ok(self)
    }

    /// Alias for [`add()`](FieldHandle::add).
    pub fn merge(self, snippet: &str) -> Result<Self> {
        self.add(snippet)
    }

    /// A [`SelectionHandle`] over this field's children.
    pub fn children(self) -> SelectionHandle<'b> {
        let FieldHandle {
            builder,
            mut parent,
            key,
        } = self;
        parent.push(key);
        SelectionHandle::new(builder, parent)
    }

    /// Navigates below this field; equivalent to `children().at(path)`.
    pub fn at(self, path: &str) -> Result<SelectionHandle<'b>> {
        self.children().at(path)
    }
}
