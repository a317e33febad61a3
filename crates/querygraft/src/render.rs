//! Deterministic rendering of operation snapshots to GraphQL document text.
//!
//! Rendering is a pure function of the snapshot: identical input produces
//! byte-identical output. Field and argument order follows storage order
//! with no implicit sorting, and the compact single-space formatting keeps
//! the emitted selection sets re-parseable as snippets.

use crate::ast::ArgValue;
use crate::ast::Directive;
use crate::ast::Selection;
use crate::operation::Operation;

/// Renders a full operation document:
/// `query Name($var: Type) { ... }`, followed by any fragment definitions
/// as top-level blocks separated by blank lines.
pub fn render_operation(operation: &Operation) -> String {
    let mut out = String::new();

    out.push_str(operation.kind.as_str());
    if let Some(name) = &operation.name {
        out.push(' ');
        out.push_str(name);
    }
    if !operation.variables.is_empty() {
        if operation.name.is_none() {
            out.push(' ');
        }
        out.push('(');
        for (i, (name, var_type)) in operation.variables.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push('$');
            out.push_str(name);
            out.push_str(": ");
            out.push_str(var_type);
        }
        out.push(')');
    }
    out.push(' ');
    out.push_str(&render_selection_set(&operation.selection_set));

    for fragment in operation.fragments.values() {
        out.push_str("\n\nfragment ");
        out.push_str(&fragment.name);
        if let Some(on_type) = &fragment.on {
            out.push_str(" on ");
            out.push_str(on_type);
        }
        out.push(' ');
        out.push_str(&render_selection_set(&fragment.selection_set));
    }

    out
}

/// Renders a sibling list as a braced selection set.
pub fn render_selection_set(selections: &[Selection]) -> String {
    if selections.is_empty() {
        return "{ }".to_string();
    }
    let mut out = String::from("{ ");
    for (i, selection) in selections.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_selection(selection, &mut out);
    }
    out.push_str(" }");
    out
}

/// Renders a single argument value as GraphQL value syntax.
pub fn render_arg_value(value: &ArgValue) -> String {
    let mut out = String::new();
    write_arg_value(value, &mut out);
    out
}

fn write_selection(selection: &Selection, out: &mut String) {
    match selection {
        Selection::Field(field) => {
            if let Some(alias) = &field.alias {
                out.push_str(alias);
                out.push_str(": ");
            }
            out.push_str(&field.name);
            write_arguments(&field.arguments, out);
            write_directives(&field.directives, out);
            if !field.selection_set.is_empty() {
                out.push(' ');
                out.push_str(&render_selection_set(&field.selection_set));
            }
        }

        Selection::FragmentSpread(spread) => {
            out.push_str("...");
            out.push_str(&spread.name);
            write_directives(&spread.directives, out);
        }

        Selection::InlineFragment(inline) => {
            out.push_str("... on ");
            out.push_str(&inline.on_type);
            write_directives(&inline.directives, out);
            out.push(' ');
            out.push_str(&render_selection_set(&inline.selection_set));
        }
    }
}

fn write_arguments(
    arguments: &indexmap::IndexMap<String, ArgValue>,
    out: &mut String,
) {
    if arguments.is_empty() {
        return;
    }
    out.push('(');
    for (i, (name, value)) in arguments.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(name);
        out.push_str(": ");
        write_arg_value(value, out);
    }
    out.push(')');
}

fn write_directives(directives: &[Directive], out: &mut String) {
    for directive in directives {
        out.push_str(" @");
        out.push_str(&directive.name);
        write_arguments(&directive.arguments, out);
    }
}

fn write_arg_value(value: &ArgValue, out: &mut String) {
    match value {
        ArgValue::Variable(name) => {
            out.push('$');
            out.push_str(name);
        }
        ArgValue::Int(value) => out.push_str(&value.to_string()),
        ArgValue::Float(value) => out.push_str(&format_float(*value)),
        ArgValue::String(content) => write_quoted_string(content, out),
        ArgValue::Boolean(true) => out.push_str("true"),
        ArgValue::Boolean(false) => out.push_str("false"),
        ArgValue::Null => out.push_str("null"),
        ArgValue::Enum(name) => out.push_str(name),
        ArgValue::List(values) => {
            out.push('[');
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_arg_value(value, out);
            }
            out.push(']');
        }
        ArgValue::Object(fields) => {
            out.push('{');
            for (i, (name, value)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(name);
                out.push_str(": ");
                write_arg_value(value, out);
            }
            out.push('}');
        }
    }
}

/// Formats a float so it stays a float literal on re-parse (`1.0`, not
/// `1`).
fn format_float(value: f64) -> String {
    let formatted = value.to_string();
    if formatted.contains(['.', 'e', 'E', 'n', 'i']) {
        // The n/i cases (NaN, inf) are not valid GraphQL, but rendering is
        // infallible; they pass through as-is.
        formatted
    } else {
        format!("{formatted}.0")
    }
}

/// Writes a string literal with quotes and escapes applied.
fn write_quoted_string(content: &str, out: &mut String) {
    out.push('"');
    for c in content.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
}
