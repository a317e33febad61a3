use crate::OperationBuilder;
use crate::OperationKind;
use crate::QueryBuildError;
use crate::ast::ArgValue;
use crate::operation::FieldInit;

// =============================================================================
// Navigation: at() vs ensure_path()
// =============================================================================

#[test]
fn at_with_empty_path_always_succeeds() {
    let mut builder = OperationBuilder::query();
    assert!(builder.at("").is_ok());
    assert!(builder.at("  ").is_ok());
}

#[test]
fn at_never_creates_missing_segments() {
    let mut builder = OperationBuilder::query();
    builder.root().add("a").unwrap();

    let err = builder.at("a.b").unwrap_err();
    assert_eq!(
        err,
        QueryBuildError::PathNotFound {
            path: "a.b".to_string(),
            segment: "b".to_string(),
        },
    );
    // Failed navigation must not have created anything.
    assert_eq!(builder.to_string(), "query { a }");
}

#[test]
fn at_succeeds_once_the_path_exists() {
    let mut builder = OperationBuilder::query();
    builder.root().add("a").unwrap();
    assert!(builder.at("a.b").is_err());

    builder.root().add("a { b }").unwrap();
    assert!(builder.at("a.b").is_ok());
}

#[test]
fn ensure_path_creates_missing_intermediates() {
    let mut builder = OperationBuilder::query();
    builder.ensure_path(&["a", "b", "c"]);
    assert_eq!(builder.to_string(), "query { a { b { c } } }");

    // Re-ensuring an existing path creates nothing new.
    builder.ensure_path(&["a", "b"]);
    assert_eq!(builder.to_string(), "query { a { b { c } } }");
}

#[test]
fn at_navigates_through_an_aliased_field_by_response_key() {
    let mut builder = OperationBuilder::query();
    builder.root().add("primary: user { id }").unwrap();

    builder.at("primary").unwrap().add("name").unwrap();
    assert_eq!(
        builder.to_string(),
        "query { primary: user { id name } }",
    );
}

#[test]
fn handle_at_navigates_relative_to_its_subtree() {
    let mut builder = OperationBuilder::query();
    builder.root().add("user { posts { title } }").unwrap();

    builder
        .at("user")
        .unwrap()
        .at("posts")
        .unwrap()
        .add("body")
        .unwrap();
    assert_eq!(
        builder.to_string(),
        "query { user { posts { title body } } }",
    );
}

// =============================================================================
// Selection handle writes
// =============================================================================

#[test]
fn add_and_merge_are_the_same_operation() {
    let mut a = OperationBuilder::query();
    a.root().add("user { id }").unwrap();
    let mut b = OperationBuilder::query();
    b.root().merge("user { id }").unwrap();

    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn fields_splits_each_entry_on_whitespace() {
    let mut builder = OperationBuilder::query();
    builder.root().fields(["id sku", "name"]).unwrap();
    assert_eq!(builder.to_string(), "query { id sku name }");
}

#[test]
fn remove_matches_response_key_or_name() {
    let mut builder = OperationBuilder::query();
    builder.root().add("other: a b").unwrap();

    // By response key.
    builder.root().remove("other").unwrap();
    assert_eq!(builder.to_string(), "query { b }");

    builder.root().add("other: a").unwrap();
    // By plain name.
    builder.root().remove("a").unwrap();
    assert_eq!(builder.to_string(), "query { b }");
}

#[test]
fn remove_with_ellipsis_prefix_removes_a_spread() {
    let mut builder = OperationBuilder::query();
    builder.root().add("...UserParts id").unwrap();

    builder.root().remove("...UserParts").unwrap();
    assert_eq!(builder.to_string(), "query { id }");
}

#[test]
fn removing_a_missing_key_is_a_no_op() {
    let mut builder = OperationBuilder::query();
    builder.root().add("a").unwrap();
    builder.root().remove("nope").unwrap();
    builder.root().remove("...Nope").unwrap();
    assert_eq!(builder.to_string(), "query { a }");
}

#[test]
fn snippet_parse_errors_surface_through_the_handle() {
    let mut builder = OperationBuilder::query();
    let err = builder.root().add("query { a }").unwrap_err();
    assert!(matches!(err, QueryBuildError::Parse(_)));
    // The failed add must not have touched the tree.
    assert_eq!(builder.to_string(), "query { }");
}

// =============================================================================
// field() / get_field()
// =============================================================================

#[test]
fn field_upserts_and_returns_the_same_node_both_times() {
    let mut builder = OperationBuilder::query();
    builder.root().field("user").unwrap().add("id").unwrap();
    builder.root().field("user").unwrap().add("name").unwrap();

    assert_eq!(builder.to_string(), "query { user { id name } }");
}

#[test]
fn field_with_applies_alias_and_arguments() {
    let mut builder = OperationBuilder::query();
    let init = FieldInit::aliased("hero").with_arg("id", ArgValue::Int(7));
    let handle = builder.root().field_with("user", init).unwrap();
    assert_eq!(handle.response_key(), "hero");

    assert_eq!(builder.to_string(), "query { hero: user(id: 7) }");
}

#[test]
fn field_with_merges_arguments_under_the_override_policy() {
    let mut builder = OperationBuilder::query();
    builder
        .root()
        .field_with("user", FieldInit::default().with_arg("id", ArgValue::Int(1)))
        .unwrap();
    builder
        .root()
        .field_with("user", FieldInit::default().with_arg("id", ArgValue::Int(2)))
        .unwrap();

    assert_eq!(builder.to_string(), "query { user(id: 2) }");
    assert_eq!(builder.conflicts().len(), 1);
}

#[test]
fn get_field_on_an_absent_key_is_an_error() {
    let mut builder = OperationBuilder::query();
    builder.root().add("a").unwrap();

    let err = builder.root().get_field("x").unwrap_err();
    assert_eq!(
        err,
        QueryBuildError::FieldNotFound {
            path: String::new(),
            key: "x".to_string(),
        },
    );
}

#[test]
fn get_field_finds_an_aliased_field_by_either_key_or_name() {
    let mut builder = OperationBuilder::query();
    builder.root().add("hero: user { id }").unwrap();

    let by_key = builder.root().get_field("hero").unwrap();
    assert_eq!(by_key.name().unwrap(), "user");

    let by_name = builder.root().get_field("user").unwrap();
    assert_eq!(by_name.response_key(), "hero");
}

// =============================================================================
// Field handle
// =============================================================================

#[test]
fn arg_is_a_plain_write_with_no_conflict_recorded() {
    let mut builder = OperationBuilder::query();
    builder
        .root()
        .field("user")
        .unwrap()
        .arg("id", 1i64)
        .unwrap()
        .arg("id", 2i64)
        .unwrap();

    assert_eq!(builder.to_string(), "query { user(id: 2) }");
    assert!(builder.conflicts().is_empty());
}

#[test]
fn set_alias_changes_the_response_key() {
    let mut builder = OperationBuilder::query();
    let handle = builder
        .root()
        .field("user")
        .unwrap()
        .set_alias("hero")
        .unwrap();
    assert_eq!(handle.response_key(), "hero");
    handle.add("id").unwrap();

    assert_eq!(builder.to_string(), "query { hero: user { id } }");
}

#[test]
fn clear_alias_falls_back_to_the_field_name() {
    let mut builder = OperationBuilder::query();
    builder.root().add("hero: user").unwrap();

    let handle = builder
        .root()
        .get_field("hero")
        .unwrap()
        .clear_alias()
        .unwrap();
    assert_eq!(handle.response_key(), "user");
    assert_eq!(builder.to_string(), "query { user }");
}

#[test]
fn node_returns_a_snapshot_copy() {
    let mut builder = OperationBuilder::query();
    builder.root().add("user(id: 1) { name }").unwrap();

    let node = builder.root().get_field("user").unwrap().node().unwrap();
    assert_eq!(node.name, "user");
    assert_eq!(node.arguments.get("id"), Some(&ArgValue::Int(1)));
    assert_eq!(node.selection_set.len(), 1);
}

#[test]
fn children_scopes_a_selection_handle_to_the_field() {
    let mut builder = OperationBuilder::query();
    builder
        .root()
        .field("user")
        .unwrap()
        .children()
        .add("id name")
        .unwrap();

    assert_eq!(builder.to_string(), "query { user { id name } }");
}

// =============================================================================
// Operation-level state
// =============================================================================

#[test]
fn set_variable_keeps_position_and_last_type_wins() {
    let mut builder = OperationBuilder::query();
    builder
        .set_variable("id", "ID")
        .set_variable("count", "Int")
        .set_variable("id", "ID!");

    assert_eq!(builder.to_string(), "query ($id: ID!, $count: Int) { }");
}

#[test]
fn add_fragment_renders_as_a_top_level_block() {
    let mut builder = OperationBuilder::query();
    builder.root().add("...UserParts").unwrap();
    builder
        .add_fragment("UserParts", "id name", Some("User"))
        .unwrap();

    assert_eq!(
        builder.to_string(),
        "query { ...UserParts }\n\nfragment UserParts on User { id name }",
    );
}

#[test]
fn redefining_a_fragment_overwrites_it() {
    let mut builder = OperationBuilder::query();
    builder.add_fragment("F", "a", None).unwrap();
    builder.add_fragment("F", "b", None).unwrap();

    let operation = builder.to_object();
    assert_eq!(operation.fragments.len(), 1);
    assert_eq!(builder.to_string(), "query { }\n\nfragment F { b }");
}

#[test]
fn to_object_is_a_detached_snapshot() {
    let mut builder = OperationBuilder::query();
    builder.root().add("a").unwrap();
    let snapshot = builder.to_object();

    builder.root().add("b").unwrap();
    assert_eq!(snapshot.selection_set.len(), 1);
    assert_eq!(snapshot.render(), "query { a }");
}

#[test]
fn take_conflicts_drains_the_record() {
    let mut builder = OperationBuilder::query();
    builder.root().add("a(x: 1)").unwrap();
    builder.root().add("a(x: 2)").unwrap();

    assert_eq!(builder.take_conflicts().len(), 1);
    assert!(builder.conflicts().is_empty());
}

// =============================================================================
// Raw passthrough
// =============================================================================

#[test]
fn raw_builder_renders_its_source_verbatim() {
    let source = "query Handwritten {\n  user { id }\n}";
    let builder = OperationBuilder::from_raw(source);
    assert!(builder.is_raw());
    assert_eq!(builder.to_string(), source);
}

#[test]
fn raw_builder_is_otherwise_inert() {
    let mut builder = OperationBuilder::from_raw("query { a }");

    // Root navigation works; writes through it silently do nothing.
    builder.root().add("b { c }").unwrap();
    builder.set_name("Ignored").set_variable("x", "Int");
    assert_eq!(builder.to_string(), "query { a }");

    // Non-empty paths do not exist on a raw builder.
    assert!(matches!(
        builder.at("a"),
        Err(QueryBuildError::PathNotFound { .. }),
    ));
}

#[test]
fn raw_builder_snapshots_to_an_empty_query() {
    let builder = OperationBuilder::from_raw("query { a }");
    let operation = builder.to_object();
    assert_eq!(operation.kind, OperationKind::Query);
    assert!(operation.selection_set.is_empty());
    assert_eq!(builder.kind(), None);
}

// =============================================================================
// Legacy structural API
// =============================================================================

#[test]
fn add_field_is_idempotent_by_response_key() {
    let mut builder = OperationBuilder::query();
    builder.ensure_path(&["user"]);
    builder.add_field(&["user"], "id").unwrap();
    builder.add_field(&["user"], "id").unwrap();

    assert_eq!(builder.to_string(), "query { user { id } }");
}

#[test]
fn add_field_requires_an_existing_path() {
    let mut builder = OperationBuilder::query();
    assert!(matches!(
        builder.add_field(&["missing"], "id"),
        Err(QueryBuildError::PathNotFound { .. }),
    ));
}

#[test]
fn remove_field_targets_an_existing_path() {
    let mut builder = OperationBuilder::query();
    builder.ensure_path(&["user", "id"]);
    builder.add_field(&["user"], "name").unwrap();

    builder.remove_field(&["user"], "id").unwrap();
    assert_eq!(builder.to_string(), "query { user { name } }");
}

#[test]
fn spread_fragment_deduplicates_by_name() {
    let mut builder = OperationBuilder::mutation();
    builder.spread_fragment(&[], "Parts").unwrap();
    builder.spread_fragment(&[], "Parts").unwrap();

    assert_eq!(builder.to_string(), "mutation { ...Parts }");
}

#[test]
fn inline_fragment_merges_by_type_condition() {
    let mut builder = OperationBuilder::query();
    builder.inline_fragment(&[], "User", "name").unwrap();
    builder.inline_fragment(&[], "User", "email").unwrap();

    assert_eq!(
        builder.to_string(),
        "query { ... on User { name email } }",
    );
}
