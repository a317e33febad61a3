use crate::ast::ArgValue;
use crate::ast::Selection;
use crate::merge::MergeConflict;
use crate::merge_selections;
use crate::parse_snippet;
use crate::render::render_selection_set;

fn merge_str(
    target: &mut Vec<Selection>,
    snippet: &str,
    conflicts: &mut Vec<MergeConflict>,
) {
    let incoming = parse_snippet(snippet).expect("snippet should parse");
    merge_selections(target, incoming, &[], conflicts);
}

fn rendered(target: &[Selection]) -> String {
    render_selection_set(target)
}

#[test]
fn merging_same_snippet_twice_is_idempotent() {
    let mut target = Vec::new();
    let mut conflicts = Vec::new();
    merge_str(&mut target, "id sku name", &mut conflicts);
    merge_str(&mut target, "id sku name", &mut conflicts);

    assert_eq!(target.len(), 3);
    assert_eq!(rendered(&target), "{ id sku name }");
    assert!(conflicts.is_empty());
}

#[test]
fn overlapping_fields_deep_merge_instead_of_duplicating() {
    let mut target = Vec::new();
    let mut conflicts = Vec::new();
    merge_str(&mut target, "a { b }", &mut conflicts);
    merge_str(&mut target, "a { c }", &mut conflicts);

    assert_eq!(rendered(&target), "{ a { b c } }");
}

#[test]
fn changed_argument_overrides_and_records_a_conflict() {
    let mut target = Vec::new();
    let mut conflicts = Vec::new();
    merge_str(&mut target, "a(x: 1)", &mut conflicts);
    merge_str(&mut target, "a(x: 2)", &mut conflicts);

    assert_eq!(rendered(&target), "{ a(x: 2) }");
    assert_eq!(
        conflicts,
        vec![MergeConflict {
            path: String::new(),
            response_key: "a".to_string(),
            argument: "x".to_string(),
            previous: ArgValue::Int(1),
            incoming: ArgValue::Int(2),
        }],
    );
}

#[test]
fn identical_argument_remerge_records_no_conflict() {
    let mut target = Vec::new();
    let mut conflicts = Vec::new();
    merge_str(&mut target, "a(x: 1)", &mut conflicts);
    merge_str(&mut target, "a(x: 1)", &mut conflicts);

    assert_eq!(rendered(&target), "{ a(x: 1) }");
    assert!(conflicts.is_empty());
}

#[test]
fn new_arguments_are_added_without_conflict() {
    let mut target = Vec::new();
    let mut conflicts = Vec::new();
    merge_str(&mut target, "a(x: 1)", &mut conflicts);
    merge_str(&mut target, "a(y: 2)", &mut conflicts);

    assert_eq!(rendered(&target), "{ a(x: 1, y: 2) }");
    assert!(conflicts.is_empty());
}

#[test]
fn nested_conflict_paths_name_the_enclosing_field() {
    let mut target = Vec::new();
    let mut conflicts = Vec::new();
    merge_str(&mut target, "user { posts(first: 5) }", &mut conflicts);
    merge_str(&mut target, "user { posts(first: 10) }", &mut conflicts);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].path, "user");
    assert_eq!(conflicts[0].response_key, "posts");
}

#[test]
fn aliased_fields_with_distinct_keys_stay_separate() {
    let mut target = Vec::new();
    let mut conflicts = Vec::new();
    merge_str(&mut target, "a", &mut conflicts);
    merge_str(&mut target, "other: a", &mut conflicts);

    assert_eq!(rendered(&target), "{ a other: a }");
}

#[test]
fn fields_match_by_response_key_not_name() {
    let mut target = Vec::new();
    let mut conflicts = Vec::new();
    merge_str(&mut target, "other: a { b }", &mut conflicts);
    merge_str(&mut target, "other: a { c }", &mut conflicts);

    assert_eq!(rendered(&target), "{ other: a { b c } }");
}

#[test]
fn fragment_spreads_deduplicate_by_name() {
    let mut target = Vec::new();
    let mut conflicts = Vec::new();
    merge_str(&mut target, "...UserParts id", &mut conflicts);
    merge_str(&mut target, "...UserParts ...OtherParts", &mut conflicts);

    assert_eq!(rendered(&target), "{ ...UserParts id ...OtherParts }");
}

#[test]
fn inline_fragments_merge_children_by_type() {
    let mut target = Vec::new();
    let mut conflicts = Vec::new();
    merge_str(&mut target, "... on User { name }", &mut conflicts);
    merge_str(&mut target, "... on User { email }", &mut conflicts);
    merge_str(&mut target, "... on Bot { owner }", &mut conflicts);

    assert_eq!(
        rendered(&target),
        "{ ... on User { name email } ... on Bot { owner } }",
    );
}

#[test]
fn directives_concatenate_without_deduplication() {
    let mut target = Vec::new();
    let mut conflicts = Vec::new();
    merge_str(&mut target, "a @include(if: $x)", &mut conflicts);
    merge_str(&mut target, "a @include(if: $x)", &mut conflicts);

    assert_eq!(
        rendered(&target),
        "{ a @include(if: $x) @include(if: $x) }",
    );
}

#[test]
fn existing_sibling_order_is_never_disturbed() {
    let mut target = Vec::new();
    let mut conflicts = Vec::new();
    merge_str(&mut target, "a b c", &mut conflicts);
    merge_str(&mut target, "b d a", &mut conflicts);

    assert_eq!(rendered(&target), "{ a b c d }");
}

#[test]
fn conflict_display_names_the_full_path() {
    let conflict = MergeConflict {
        path: "user".to_string(),
        response_key: "posts".to_string(),
        argument: "first".to_string(),
        previous: ArgValue::Int(5),
        incoming: ArgValue::Int(10),
    };
    assert_eq!(
        conflict.to_string(),
        "argument conflict on `user.posts`: `first` changed from 5 to 10",
    );
}
