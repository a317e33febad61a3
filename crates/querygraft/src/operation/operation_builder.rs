use crate::QueryBuildError;
use crate::ast::ArgValue;
use crate::ast::FieldNode;
use crate::ast::FragmentSpread;
use crate::ast::InlineFragment;
use crate::ast::Selection;
use crate::format_path;
use crate::merge;
use crate::merge::MergeConflict;
use crate::operation::FieldInit;
use crate::operation::FragmentDef;
use crate::operation::Operation;
use crate::operation::OperationKind;
use crate::operation::SelectionHandle;
use crate::parse_path;
use querygraft_parser::parse_snippet;

type Result<T> = std::result::Result<T, QueryBuildError>;

/// The builder's backing state: either a structured operation under
/// construction, or a raw pre-written query carried verbatim.
#[derive(Debug)]
enum BuilderState {
    Structured(Operation),
    Raw(String),
}

/// Owns one mutable selection tree for its entire life and grows it
/// incrementally: fields are only ever appended, never reordered, and
/// nodes are deleted only by explicit removal.
///
/// Many independently-loaded modules typically take turns augmenting one
/// builder before the query is rendered once. Handles returned by
/// [`root()`](OperationBuilder::root) and [`at()`](OperationBuilder::at)
/// are path-addressed references into the tree; every handle operation
/// re-resolves its address against the live tree, so there is no shared
/// mutable aliasing.
///
/// A builder constructed with [`from_raw()`](OperationBuilder::from_raw)
/// wraps an already-correct hand-written query behind the same interface:
/// `to_string()` returns the raw text verbatim and everything else behaves
/// as an inert, empty operation.
#[derive(Debug)]
pub struct OperationBuilder {
    state: BuilderState,
    /// Argument conflicts recorded by merges into this builder's tree.
    conflicts: Vec<MergeConflict>,
}

impl OperationBuilder {
    pub fn new(kind: OperationKind) -> Self {
        Self {
            state: BuilderState::Structured(Operation::new(kind)),
            conflicts: Vec::new(),
        }
    }

    pub fn query() -> Self {
        Self::new(OperationKind::Query)
    }

    pub fn mutation() -> Self {
        Self::new(OperationKind::Mutation)
    }

    /// Wraps a pre-written query string. See the type-level docs for the
    /// passthrough semantics.
    pub fn from_raw(source: impl Into<String>) -> Self {
        Self {
            state: BuilderState::Raw(source.into()),
            conflicts: Vec::new(),
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self.state, BuilderState::Raw(_))
    }

    /// The operation kind, or `None` for a raw builder.
    pub fn kind(&self) -> Option<OperationKind> {
        match &self.state {
            BuilderState::Structured(operation) => Some(operation.kind),
            BuilderState::Raw(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match &self.state {
            BuilderState::Structured(operation) => operation.name.as_deref(),
            BuilderState::Raw(_) => None,
        }
    }

    // =========================================================================
    // Operation-level setters
    // =========================================================================

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        if let BuilderState::Structured(operation) = &mut self.state {
            operation.name = Some(name.into());
        }
        self
    }

    /// Declares a variable. Redeclaring a name keeps its position and
    /// replaces its type (last write wins).
    pub fn set_variable(
        &mut self,
        name: impl Into<String>,
        var_type: impl Into<String>,
    ) -> &mut Self {
        if let BuilderState::Structured(operation) = &mut self.state {
            operation.variables.insert(name.into(), var_type.into());
        }
        self
    }

    /// Defines (or redefines) a named fragment from snippet text.
    ///
    /// The snippet is parsed and validated even on a raw builder, where the
    /// definition is then discarded.
    pub fn add_fragment(
        &mut self,
        name: &str,
        snippet: &str,
        on_type: Option<&str>,
    ) -> Result<&mut Self> {
        let selections = parse_snippet(snippet)?;
        Ok(self.add_fragment_selections(name, selections, on_type))
    }

    /// Defines (or redefines) a named fragment from an already-built
    /// selection list.
    pub fn add_fragment_selections(
        &mut self,
        name: &str,
        selections: Vec<Selection>,
        on_type: Option<&str>,
    ) -> &mut Self {
        if let BuilderState::Structured(operation) = &mut self.state {
            operation.fragments.insert(
                name.to_string(),
                FragmentDef::new(name, on_type.map(str::to_string), selections),
            );
        }
        self
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// A handle on the root sibling list. Always succeeds.
    pub fn root(&mut self) -> SelectionHandle<'_> {
        SelectionHandle::new(self, Vec::new())
    }

    /// Navigates to the sibling list at a dot-separated path.
    ///
    /// Strict: every segment must match an existing field sibling by name
    /// or response key (fragment spreads and inline fragments are skipped),
    /// and nothing is
    /// created along the way — the deliberate opposite of
    /// [`ensure_path()`](OperationBuilder::ensure_path). An empty path is
    /// the root and always succeeds.
    pub fn at(&mut self, path: &str) -> Result<SelectionHandle<'_>> {
        let segments = parse_path(path);
        self.walk(&segments)?;
        Ok(SelectionHandle::new(self, segments))
    }

    // =========================================================================
    // Snapshots and output
    // =========================================================================

    /// Returns an immutable snapshot copy of the operation.
    ///
    /// A raw builder snapshots to an empty query operation; its text lives
    /// only in `to_string()`.
    pub fn to_object(&self) -> Operation {
        match &self.state {
            BuilderState::Structured(operation) => operation.clone(),
            BuilderState::Raw(_) => Operation::new(OperationKind::Query),
        }
    }

    /// The argument conflicts recorded by merges so far.
    pub fn conflicts(&self) -> &[MergeConflict] {
        &self.conflicts
    }

    /// Drains the recorded conflicts.
    pub fn take_conflicts(&mut self) -> Vec<MergeConflict> {
        std::mem::take(&mut self.conflicts)
    }

    // =========================================================================
    // Legacy structural API (explicit segment slices)
    // =========================================================================

    /// Creates any missing intermediate fields along `segments`.
    ///
    /// This is the one navigator that creates: `at()` never does.
    pub fn ensure_path(&mut self, segments: &[&str]) -> &mut Self {
        if let BuilderState::Structured(operation) = &mut self.state {
            let mut current = &mut operation.selection_set;
            for segment in segments {
                let index = match current.iter().position(
                    |selection| matches!(selection, Selection::Field(f) if f.name == *segment),
                ) {
                    Some(index) => index,
                    None => {
                        log::debug!("ensure_path: creating field `{segment}`");
                        current.push(Selection::Field(FieldNode::new(*segment)));
                        current.len() - 1
                    }
                };
                current = match &mut current[index] {
                    Selection::Field(field) => &mut field.selection_set,
                    _ => unreachable!("position() only matches fields"),
                };
            }
        }
        self
    }

    /// Appends a field under an existing path (idempotent by response key).
    pub fn add_field(&mut self, segments: &[&str], name: &str) -> Result<&mut Self> {
        self.merge_segments(segments, vec![Selection::Field(FieldNode::new(name))])?;
        Ok(self)
    }

    /// Removes a field under an existing path; a missing key is a no-op.
    pub fn remove_field(&mut self, segments: &[&str], key: &str) -> Result<&mut Self> {
        let path = owned_segments(segments);
        self.remove_at(&path, key)?;
        Ok(self)
    }

    /// Adds a `...name` fragment spread under an existing path (no-op if
    /// already spread there).
    pub fn spread_fragment(
        &mut self,
        segments: &[&str],
        fragment_name: &str,
    ) -> Result<&mut Self> {
        self.merge_segments(
            segments,
            vec![Selection::FragmentSpread(FragmentSpread::new(fragment_name))],
        )?;
        Ok(self)
    }

    /// Merges a `... on Type { snippet }` inline fragment under an existing
    /// path.
    pub fn inline_fragment(
        &mut self,
        segments: &[&str],
        on_type: &str,
        snippet: &str,
    ) -> Result<&mut Self> {
        let selection_set = parse_snippet(snippet)?;
        let inline = InlineFragment {
            on_type: on_type.to_string(),
            directives: Vec::new(),
            selection_set,
        };
        self.merge_segments(segments, vec![Selection::InlineFragment(inline)])?;
        Ok(self)
    }

    fn merge_segments(&mut self, segments: &[&str], incoming: Vec<Selection>) -> Result<()> {
        let path = owned_segments(segments);
        self.merge_at(&path, incoming)
    }

    // =========================================================================
    // Tree operations shared with the handles
    // =========================================================================

    /// Validates that `path` resolves to a sibling list.
    pub(crate) fn walk(&self, path: &[String]) -> Result<()> {
        match &self.state {
            BuilderState::Structured(operation) => {
                resolve_siblings(&operation.selection_set, path)?;
                Ok(())
            }
            BuilderState::Raw(_) => {
                if path.is_empty() {
                    Ok(())
                } else {
                    Err(path_not_found(path, &path[0]))
                }
            }
        }
    }

    /// Merges `incoming` into the sibling list at `path`.
    pub(crate) fn merge_at(&mut self, path: &[String], incoming: Vec<Selection>) -> Result<()> {
        let OperationBuilder { state, conflicts } = self;
        let BuilderState::Structured(operation) = state else {
            return Ok(());
        };
        let target = resolve_siblings_mut(&mut operation.selection_set, path)?;
        merge::merge_selections(target, incoming, path, conflicts);
        Ok(())
    }

    /// Removes siblings matching `key` at `path`. A leading `...` removes a
    /// fragment spread by name; otherwise fields matching by response key
    /// or plain name are removed. A missing key is a no-op.
    pub(crate) fn remove_at(&mut self, path: &[String], key: &str) -> Result<()> {
        let BuilderState::Structured(operation) = &mut self.state else {
            return Ok(());
        };
        let siblings = resolve_siblings_mut(&mut operation.selection_set, path)?;
        if let Some(fragment_name) = key.strip_prefix("...") {
            siblings.retain(
                |selection| !matches!(selection, Selection::FragmentSpread(s) if s.name == fragment_name),
            );
        } else {
            siblings.retain(|selection| match selection {
                Selection::Field(field) => field.response_key() != key && field.name != key,
                _ => true,
            });
        }
        Ok(())
    }

    /// Get-or-create for `field()`: finds an existing field by response key
    /// and merges `init.arguments` into it under the override+warn policy,
    /// or appends a new field. Returns the response key.
    pub(crate) fn ensure_field_at(
        &mut self,
        path: &[String],
        name: &str,
        init: FieldInit,
    ) -> Result<String> {
        let key = init.alias.clone().unwrap_or_else(|| name.to_string());
        let OperationBuilder { state, conflicts } = self;
        let BuilderState::Structured(operation) = state else {
            return Ok(key);
        };
        let siblings = resolve_siblings_mut(&mut operation.selection_set, path)?;
        match field_by_response_key_mut(siblings, &key) {
            Some(existing) => {
                merge::merge_arguments(existing, init.arguments, path, &key, conflicts);
            }
            None => {
                siblings.push(Selection::Field(FieldNode {
                    name: name.to_string(),
                    alias: init.alias,
                    arguments: init.arguments,
                    directives: Vec::new(),
                    selection_set: Vec::new(),
                }));
            }
        }
        Ok(key)
    }

    /// Strict lookup for `get_field()`: matches by response key, then by
    /// plain name. Returns the canonical response key.
    pub(crate) fn find_field_key(&self, path: &[String], key: &str) -> Result<String> {
        let field = self.field_ref(path, key)?;
        Ok(field.response_key().to_string())
    }

    /// Read access to a field node by (path, response key or name).
    pub(crate) fn field_ref(&self, path: &[String], key: &str) -> Result<&FieldNode> {
        let BuilderState::Structured(operation) = &self.state else {
            return Err(field_not_found(path, key));
        };
        let siblings = resolve_siblings(&operation.selection_set, path)?;
        field_by_key_or_name(siblings, key).ok_or_else(|| field_not_found(path, key))
    }

    /// Merges `incoming` into the children of the field addressed by
    /// (path, response key).
    pub(crate) fn merge_into_field(
        &mut self,
        path: &[String],
        key: &str,
        incoming: Vec<Selection>,
    ) -> Result<()> {
        let OperationBuilder { state, conflicts } = self;
        let BuilderState::Structured(operation) = state else {
            return Ok(());
        };
        let siblings = resolve_siblings_mut(&mut operation.selection_set, path)?;
        let field = field_by_response_key_mut(siblings, key)
            .ok_or_else(|| field_not_found(path, key))?;
        let mut child_path = path.to_vec();
        child_path.push(key.to_string());
        merge::merge_selections(&mut field.selection_set, incoming, &child_path, conflicts);
        Ok(())
    }

    /// Plain argument set on a field (no merge policy, no conflict record).
    pub(crate) fn set_field_arg(
        &mut self,
        path: &[String],
        key: &str,
        name: &str,
        value: ArgValue,
    ) -> Result<()> {
        let BuilderState::Structured(operation) = &mut self.state else {
            return Ok(());
        };
        let siblings = resolve_siblings_mut(&mut operation.selection_set, path)?;
        let field = field_by_response_key_mut(siblings, key)
            .ok_or_else(|| field_not_found(path, key))?;
        field.arguments.insert(name.to_string(), value);
        Ok(())
    }

    /// Sets or clears a field's alias. Returns the field's new response
    /// key, since the alias is part of it.
    pub(crate) fn set_field_alias(
        &mut self,
        path: &[String],
        key: &str,
        alias: Option<String>,
    ) -> Result<String> {
        let BuilderState::Structured(operation) = &mut self.state else {
            return Ok(alias.unwrap_or_else(|| key.to_string()));
        };
        let siblings = resolve_siblings_mut(&mut operation.selection_set, path)?;
        let field = field_by_response_key_mut(siblings, key)
            .ok_or_else(|| field_not_found(path, key))?;
        field.alias = alias;
        Ok(field.response_key().to_string())
    }
}

impl std::fmt::Display for OperationBuilder {
    /// Renders the operation — or, for a raw builder, returns the wrapped
    /// query text verbatim.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            BuilderState::Raw(source) => f.write_str(source),
            BuilderState::Structured(operation) => f.write_str(&operation.render()),
        }
    }
}

// =============================================================================
// Tree navigation helpers
// =============================================================================

fn owned_segments(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|segment| segment.to_string()).collect()
}

fn path_not_found(full: &[String], segment: &str) -> QueryBuildError {
    QueryBuildError::PathNotFound {
        path: format_path(full),
        segment: segment.to_string(),
    }
}

fn field_not_found(path: &[String], key: &str) -> QueryBuildError {
    QueryBuildError::FieldNotFound {
        path: format_path(path),
        key: key.to_string(),
    }
}

fn segment_matches(field: &FieldNode, segment: &str) -> bool {
    field.name == segment || field.response_key() == segment
}

/// Walks `path` from `root`, matching each segment against a field sibling
/// by name or response key and skipping fragment/inline siblings.
fn resolve_siblings<'a>(
    root: &'a [Selection],
    path: &[String],
) -> Result<&'a [Selection]> {
    let mut current = root;
    for segment in path {
        let next = current.iter().find_map(|selection| match selection {
            Selection::Field(field) if segment_matches(field, segment) => {
                Some(field.selection_set.as_slice())
            }
            _ => None,
        });
        current = next.ok_or_else(|| path_not_found(path, segment))?;
    }
    Ok(current)
}

/// Mutable counterpart of [`resolve_siblings`].
fn resolve_siblings_mut<'a>(
    root: &'a mut Vec<Selection>,
    path: &[String],
) -> Result<&'a mut Vec<Selection>> {
    let mut current = root;
    for segment in path {
        let next = current.iter_mut().find_map(|selection| match selection {
            Selection::Field(field) if segment_matches(field, segment) => {
                Some(&mut field.selection_set)
            }
            _ => None,
        });
        current = next.ok_or_else(|| path_not_found(path, segment))?;
    }
    Ok(current)
}

fn field_by_response_key_mut<'a>(
    siblings: &'a mut [Selection],
    key: &str,
) -> Option<&'a mut FieldNode> {
    siblings.iter_mut().find_map(|selection| match selection {
        Selection::Field(field) if field.response_key() == key => Some(field),
        _ => None,
    })
}

/// Matches by response key first, then by plain name.
fn field_by_key_or_name<'a>(siblings: &'a [Selection], key: &str) -> Option<&'a FieldNode> {
    siblings
        .iter()
        .find_map(|selection| {
            selection
                .as_field()
                .filter(|field| field.response_key() == key)
        })
        .or_else(|| {
            siblings
                .iter()
                .find_map(|selection| selection.as_field().filter(|field| field.name == key))
        })
}
