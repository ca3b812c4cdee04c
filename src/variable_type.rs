//! Variable type expressions mirroring a [`SchemaNode`].

use crate::model::SchemaNode;
use crate::schema::NestingMode;

/// Type expression for `node`.
///
/// Singletons are typed as `object({...})`, other nodes as a `list`, `set` or
/// `map` of objects. Every node below the root call is wrapped in
/// `optional(...)` when it may be absent or when nothing under it can be set.
pub fn synthesize_type(node: &SchemaNode, root_call: bool) -> String {
    let mut body = String::from("object({\n");
    for attr in node.attributes() {
        let attr_type = attr.value_type.type_expr();
        if attr.optional {
            body.push_str(&format!("  {} = optional({})\n", attr.name, attr_type));
        } else {
            body.push_str(&format!("  {} = {}\n", attr.name, attr_type));
        }
    }
    for child in node.children() {
        let child_type = synthesize_type(child, false);
        body.push_str(&format!("  {} = {}\n", child.name(), indent_tail(&child_type)));
    }
    body.push_str("})");

    let t = if node.is_singleton() {
        body
    } else {
        let collection = match node.nesting_mode() {
            NestingMode::Map => "map",
            NestingMode::Set => "set",
            _ => "list",
        };
        format!("{}({})", collection, body)
    };

    if !root_call && (node.min_items() == 0 || node.is_read_only()) {
        format!("optional({})", t)
    } else {
        t
    }
}

/// Indents every line but the first, for embedding after `name = `.
fn indent_tail(expr: &str) -> String {
    textwrap::indent(expr, "  ").trim().to_owned()
}
