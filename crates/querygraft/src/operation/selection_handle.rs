use crate::QueryBuildError;
use crate::ast::Selection;
use crate::format_path;
use crate::operation::FieldHandle;
use crate::operation::FieldInit;
use crate::operation::OperationBuilder;
use crate::parse_path;
use querygraft_parser::parse_snippet;

type Result<T> = std::result::Result<T, QueryBuildError>;

/// A handle scoped to one sibling list inside a builder's selection tree.
///
/// The handle stores a segment path, not a node reference; each operation
/// re-resolves the path against the live tree, so a handle stays valid
/// across unrelated mutations and turns into a
/// [`PathNotFound`](QueryBuildError::PathNotFound) error only if its own
/// ancestry was removed.
///
/// Mutating methods consume and return the handle, so calls chain:
///
/// ```
/// use querygraft::OperationBuilder;
///
/// let mut builder = OperationBuilder::query();
/// builder
///     .root()
///     .add("user { id }")
///     .and_then(|root| root.at("user"))
///     .and_then(|user| user.add("name email"))
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct SelectionHandle<'b> {
    builder: &'b mut OperationBuilder,
    path: Vec<String>,
}

impl<'b> SelectionHandle<'b> {
    pub(crate) fn new(builder: &'b mut OperationBuilder, path: Vec<String>) -> Self {
        Self { builder, path }
    }

    /// This handle's address as a dot-separated path (empty for the root).
    pub fn path(&self) -> String {
        format_path(&self.path)
    }

    /// Parses a snippet and merges it into this sibling list.
    pub fn add(self, snippet: &str) -> Result<Self> {
        let selections = parse_snippet(snippet)?;
        self.add_selections(selections)
    }

    /// Alias for [`add()`](SelectionHandle::add); both names are kept so
    /// call sites can say what they mean.
    pub fn merge(self, snippet: &str) -> Result<Self> {
        self.add(snippet)
    }

    /// Merges an already-built selection list into this sibling list.
    pub fn add_selections(self, selections: Vec<Selection>) -> Result<Self> {
        self.builder.merge_at(&self.path, selections)?;
        Ok(self)
    }

    /// Adds bare fields. Every entry is split on whitespace and each token
    /// parsed as an independent bare-field snippet, so
    /// `fields(["id sku", "name"])` adds three sibling fields.
    pub fn fields<I, S>(self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut incoming = Vec::new();
        for entry in names {
            for token in entry.as_ref().split_whitespace() {
                incoming.extend(parse_snippet(token)?);
            }
        }
        self.add_selections(incoming)
    }

    /// Removes siblings matching `key`. A leading `...` removes a fragment
    /// spread by name; otherwise any field whose response key or plain name
    /// matches is removed. A missing key is a no-op.
    pub fn remove(self, key: &str) -> Result<Self> {
        self.builder.remove_at(&self.path, key)?;
        Ok(self)
    }

    /// Get-or-create: finds an existing field sibling by response key or
    /// appends an empty one, then returns a handle on it.
    pub fn field(self, name: &str) -> Result<FieldHandle<'b>> {
        self.field_with(name, FieldInit::default())
    }

    /// [`field()`](SelectionHandle::field) with an initial alias and/or
    /// arguments. When the field already exists, the given arguments merge
    /// into it under the usual override-with-warning policy.
    pub fn field_with(self, name: &str, init: FieldInit) -> Result<FieldHandle<'b>> {
        let SelectionHandle { builder, path } = self;
        let key = builder.ensure_field_at(&path, name, init)?;
        Ok(FieldHandle::new(builder, path, key))
    }

    /// Strict lookup by response key or plain name. Unlike
    /// [`field()`](SelectionHandle::field), an absent key is a
    /// [`FieldNotFound`](QueryBuildError::FieldNotFound) error, never an
    /// upsert.
    pub fn get_field(self, key: &str) -> Result<FieldHandle<'b>> {
        let SelectionHandle { builder, path } = self;
        let canonical_key = builder.find_field_key(&path, key)?;
        Ok(FieldHandle::new(builder, path, canonical_key))
    }

    /// Navigates to a descendant sibling list, relative to this handle.
    /// Same strict, never-creating semantics as
    /// [`OperationBuilder::at()`](OperationBuilder::at).
    pub fn at(self, path: &str) -> Result<SelectionHandle<'b>> {
        let SelectionHandle { builder, path: mut segments } = self;
        segments.extend(parse_path(path));
        builder.walk(&segments)?;
        Ok(SelectionHandle::new(builder, segments))
    }
}
