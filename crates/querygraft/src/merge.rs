//! The selection merge engine.
//!
//! Merges an incoming sibling list into an existing one, in place. The
//! merge is what lets many independently-loaded modules each contribute
//! fields to a shared query: re-merging identical input is a no-op, and
//! overlapping fields deep-merge instead of duplicating.

use crate::ast::ArgValue;
use crate::ast::FieldNode;
use crate::ast::Selection;
use crate::format_path;
use crate::render::render_arg_value;
use indexmap::IndexMap;

/// A recorded argument-value conflict: the same argument on the same field
/// was merged twice with different values.
///
/// Conflicts are observable but non-fatal; the last write wins.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeConflict {
    /// Dot-path of the sibling list the field lives in.
    pub path: String,
    /// The conflicting field's response key.
    pub response_key: String,
    /// The argument name.
    pub argument: String,
    /// The value that was overwritten.
    pub previous: ArgValue,
    /// The value that overwrote it.
    pub incoming: ArgValue,
}

impl std::fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let at = if self.path.is_empty() {
            self.response_key.clone()
        } else {
            format!("{}.{}", self.path, self.response_key)
        };
        write!(
            f,
            "argument conflict on `{at}`: `{}` changed from {} to {}",
            self.argument,
            render_arg_value(&self.previous),
            render_arg_value(&self.incoming),
        )
    }
}

/// Merges `incoming` into `target`, in place.
///
/// Matching rules:
/// - fragment spreads match by fragment name; absent → append, present →
///   no-op;
/// - inline fragments match by type name; absent → append as given,
///   present → recursively merge children;
/// - regular fields match by response key against non-fragment siblings;
///   absent → append, present → merge arguments (override, recording a
///   [`MergeConflict`] when an existing value changes), concatenate
///   directives without deduplication, and recurse into children.
///
/// Existing nodes keep their identity: the merge mutates them rather than
/// replacing them, and sibling order is never disturbed. The merge itself
/// never fails.
///
/// `path` names the sibling list for conflict records; each recorded
/// conflict is also emitted through `log::warn!`.
pub fn merge_selections(
    target: &mut Vec<Selection>,
    incoming: Vec<Selection>,
    path: &[String],
    conflicts: &mut Vec<MergeConflict>,
) {
    for selection in incoming {
        match selection {
            Selection::FragmentSpread(spread) => {
                let exists = target.iter().any(|existing| {
                    matches!(
                        existing,
                        Selection::FragmentSpread(t) if t.name == spread.name,
                    )
                });
                if !exists {
                    target.push(Selection::FragmentSpread(spread));
                }
            }

            Selection::InlineFragment(inline) => {
                let existing = target.iter_mut().find_map(|existing| match existing {
                    Selection::InlineFragment(t) if t.on_type == inline.on_type => Some(t),
                    _ => None,
                });
                match existing {
                    Some(existing) => {
                        merge_selections(
                            &mut existing.selection_set,
                            inline.selection_set,
                            path,
                            conflicts,
                        );
                    }
                    None => target.push(Selection::InlineFragment(inline)),
                }
            }

            Selection::Field(field) => {
                let existing = target.iter_mut().find_map(|existing| match existing {
                    Selection::Field(t) if t.response_key() == field.response_key() => {
                        Some(t)
                    }
                    _ => None,
                });
                match existing {
                    Some(existing) => merge_field(existing, field, path, conflicts),
                    None => target.push(Selection::Field(field)),
                }
            }
        }
    }
}

/// Deep-merges one incoming field into its existing counterpart.
fn merge_field(
    existing: &mut FieldNode,
    incoming: FieldNode,
    path: &[String],
    conflicts: &mut Vec<MergeConflict>,
) {
    let key = existing.response_key().to_string();

    merge_arguments(existing, incoming.arguments, path, &key, conflicts);

    // Documented simplification: directives concatenate without
    // deduplication.
    existing.directives.extend(incoming.directives);

    let mut child_path = path.to_vec();
    child_path.push(key);
    merge_selections(
        &mut existing.selection_set,
        incoming.selection_set,
        &child_path,
        conflicts,
    );
}

/// Applies the argument override policy: missing keys are set, changed
/// values overwrite with a recorded (and logged) conflict, identical values
/// are left alone.
pub(crate) fn merge_arguments(
    existing: &mut FieldNode,
    incoming: IndexMap<String, ArgValue>,
    path: &[String],
    response_key: &str,
    conflicts: &mut Vec<MergeConflict>,
) {
    for (name, value) in incoming {
        match existing.arguments.get(&name) {
            Some(previous) if *previous != value => {
                let conflict = MergeConflict {
                    path: format_path(path),
                    response_key: response_key.to_string(),
                    argument: name.clone(),
                    previous: previous.clone(),
                    incoming: value.clone(),
                };
                log::warn!("{conflict}");
                conflicts.push(conflict);
                existing.arguments.insert(name, value);
            }
            Some(_) => {}
            None => {
                existing.arguments.insert(name, value);
            }
        }
    }
}
