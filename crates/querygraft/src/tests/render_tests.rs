use crate::ast::ArgValue;
use crate::parse_snippet;
use crate::render::render_arg_value;
use crate::render::render_selection_set;
use indexmap::IndexMap;

fn rendered(snippet: &str) -> String {
    render_selection_set(&parse_snippet(snippet).expect("snippet should parse"))
}

// =============================================================================
// Selection sets
// =============================================================================

#[test]
fn empty_selection_set_renders_as_open_braces() {
    assert_eq!(render_selection_set(&[]), "{ }");
}

#[test]
fn sibling_fields_are_space_separated() {
    assert_eq!(rendered("id sku name"), "{ id sku name }");
}

#[test]
fn childless_fields_omit_braces() {
    assert_eq!(rendered("a { b } c"), "{ a { b } c }");
}

#[test]
fn alias_renders_before_the_name() {
    assert_eq!(rendered("hero: user { id }"), "{ hero: user { id } }");
}

#[test]
fn arguments_render_in_stored_order() {
    assert_eq!(
        rendered("user(first: 10, after: $cursor)"),
        "{ user(first: 10, after: $cursor) }",
    );
}

#[test]
fn directives_render_after_arguments() {
    assert_eq!(
        rendered("field(x: 1) @include(if: $flag) @deprecated"),
        "{ field(x: 1) @include(if: $flag) @deprecated }",
    );
}

#[test]
fn fragment_spread_renders_with_ellipsis() {
    assert_eq!(rendered("...UserParts"), "{ ...UserParts }");
}

#[test]
fn inline_fragment_renders_its_type_condition() {
    assert_eq!(
        rendered("... on User { name }"),
        "{ ... on User { name } }",
    );
}

// =============================================================================
// Argument values
// =============================================================================

#[test]
fn variables_render_with_the_dollar_sigil() {
    assert_eq!(render_arg_value(&ArgValue::Variable("id".to_string())), "$id");
}

#[test]
fn strings_render_quoted_with_escapes() {
    let value = ArgValue::String("say \"hi\"\nback\\slash\ttab".to_string());
    assert_eq!(
        render_arg_value(&value),
        r#""say \"hi\"\nback\\slash\ttab""#,
    );
}

#[test]
fn enums_render_bare() {
    assert_eq!(render_arg_value(&ArgValue::Enum("ACTIVE".to_string())), "ACTIVE");
}

#[test]
fn integral_floats_keep_a_decimal_point() {
    assert_eq!(render_arg_value(&ArgValue::Float(1.0)), "1.0");
    assert_eq!(render_arg_value(&ArgValue::Float(2.5)), "2.5");
    assert_eq!(render_arg_value(&ArgValue::Float(-3.0)), "-3.0");
}

#[test]
fn null_and_booleans_render_as_keywords() {
    assert_eq!(render_arg_value(&ArgValue::Null), "null");
    assert_eq!(render_arg_value(&ArgValue::Boolean(true)), "true");
    assert_eq!(render_arg_value(&ArgValue::Boolean(false)), "false");
}

#[test]
fn lists_and_objects_render_structurally() {
    let list = ArgValue::List(vec![
        ArgValue::Int(1),
        ArgValue::String("two".to_string()),
        ArgValue::Null,
    ]);
    assert_eq!(render_arg_value(&list), r#"[1, "two", null]"#);

    let mut fields = IndexMap::new();
    fields.insert("min".to_string(), ArgValue::Int(0));
    fields.insert("max".to_string(), ArgValue::Variable("limit".to_string()));
    assert_eq!(
        render_arg_value(&ArgValue::Object(fields)),
        "{min: 0, max: $limit}",
    );
}

// =============================================================================
// Re-parseability and determinism
// =============================================================================

#[test]
fn rendered_selection_sets_re_parse_to_the_same_tree() {
    let cases = [
        "id sku name",
        "hero: user(id: 1) { name }",
        r#"search(term: "a \"b\"", limit: 1.5, tags: [A, B]) { hits }"#,
        "... on User { name } ...Parts",
        "field @include(if: $x)",
        "obj(where: {min: 0, max: 10})",
    ];
    for case in cases {
        let first = parse_snippet(case).expect("case should parse");
        let text = render_selection_set(&first);
        let reparsed = parse_snippet(&text).expect("rendered text should parse");
        assert_eq!(reparsed, first, "round-trip mismatch for {case:?}");
    }
}

#[test]
fn rendering_is_deterministic() {
    let selections =
        parse_snippet("user(id: $id) { name friends(first: 10) { name } }").unwrap();
    assert_eq!(
        render_selection_set(&selections),
        render_selection_set(&selections),
    );
}
