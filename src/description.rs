//! Variable descriptions woven from per-argument documentation.

use crate::error::Result;
use crate::model::{Attribute, SchemaNode};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArgumentDescription {
    pub name: String,
    pub description: String,
}

/// Argument descriptions keyed by `name` or `block.name`.
pub type Descriptions = BTreeMap<String, ArgumentDescription>;

/// Source of argument descriptions for a resource type.
pub trait DescriptionProvider {
    fn descriptions(&self, resource_type: &str) -> Result<Descriptions>;
}

impl DescriptionProvider for Descriptions {
    fn descriptions(&self, _resource_type: &str) -> Result<Descriptions> {
        Ok(self.clone())
    }
}

/// Bullet list describing the attributes of `node`, followed by one section
/// per child block.
pub fn synthesize_description(node: &SchemaNode, descriptions: &Descriptions) -> String {
    let mut text = String::new();
    for attr in node.attributes() {
        text.push_str(&describe_attribute(node, attr, descriptions));
    }
    for child in node.children() {
        text.push_str("\n---\n");
        text.push_str(&format!("`{}` block supports the following:\n", child.name()));
        text.push_str(&synthesize_description(child, descriptions));
    }
    text
}

/// `- `name` - description` line for one attribute of `node`.
pub fn describe_attribute(node: &SchemaNode, attr: &Attribute, descriptions: &Descriptions) -> String {
    let qualified = if node.is_root() {
        None
    } else {
        descriptions.get(&format!("{}.{}", node.name(), attr.name))
    };
    let description = qualified
        .or_else(|| descriptions.get(&attr.name))
        .map(|d| d.description.as_str())
        .or(attr.description.as_deref())
        .unwrap_or_default();
    format!("- `{}` - {}\n", attr.name, single_line(description))
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
