//! Builds the [`SchemaNode`] tree from a raw provider schema block.
//!
//! Providers sometimes encode nested, repeatable structure as a single
//! object-typed (or collection-of-object-typed) attribute instead of a block
//! type. Such attributes are turned into nested nodes here, so that both
//! encodings produce the same generated shape.

use crate::error::{Error, Result};
use crate::model::{child_address, Attribute, SchemaNode};
use crate::schema::{self, NestedAttributeType, NestingMode};
use crate::types::{CollectionKind, ObjectType};
use tracing::debug;

/// Normalizes the schema block of `resource_type` into a root node.
pub fn normalize_resource(resource_type: &str, block: &schema::Block) -> Result<SchemaNode> {
    let (attributes, children) =
        normalize_block_contents(resource_type, true, block.attributes(), block.block_types())?;
    Ok(SchemaNode::root(resource_type, attributes, children))
}

fn normalize_block_contents<'a>(
    address: &str,
    at_root: bool,
    attributes: impl Iterator<Item = (&'a String, &'a schema::Attribute)>,
    block_types: impl Iterator<Item = (&'a String, &'a schema::NestedBlock)>,
) -> Result<(Vec<Attribute>, Vec<SchemaNode>)> {
    let mut attrs = Vec::new();
    let mut children = Vec::new();

    for (name, spec) in attributes {
        if spec.computed_only() || (at_root && name == "id") {
            continue;
        }
        if let Some(nested_type) = &spec.nested_type {
            children.push(nested_attribute_block(address, name, spec, nested_type)?);
            continue;
        }
        let attr = new_attribute(address, name, spec)?;
        if let Some((kind, object)) = attr.value_type.as_structural() {
            debug!(
                "reclassifying attribute {} as nested block",
                child_address(address, name)
            );
            children.push(implicit_block(address, name, kind, object, attr.required));
            continue;
        }
        attrs.push(attr);
    }

    for (name, nested_block) in block_types {
        children.push(declared_block(address, name, nested_block)?);
    }

    children.sort_by(|a, b| a.name().cmp(b.name()));
    Ok((attrs, children))
}

fn new_attribute(address: &str, name: &str, spec: &schema::Attribute) -> Result<Attribute> {
    let field = child_address(address, name);
    let value_type = spec
        .r#type
        .as_ref()
        .ok_or_else(|| Error::unsupported_type(&field, "<missing type>"))?
        .resolve(&field)?;
    Ok(Attribute {
        name: name.to_owned(),
        value_type,
        required: spec.is_required(),
        optional: spec.is_optional(),
        computed: spec.is_computed(),
        sensitive: spec.is_sensitive(),
        description: spec.description.clone(),
    })
}

fn declared_block(
    parent_address: &str,
    name: &str,
    nested_block: &schema::NestedBlock,
) -> Result<SchemaNode> {
    let address = child_address(parent_address, name);
    let (attributes, children) = normalize_block_contents(
        &address,
        false,
        nested_block.block.attributes(),
        nested_block.block.block_types(),
    )?;
    Ok(SchemaNode::nested(
        parent_address,
        name,
        nested_block.nesting_mode,
        nested_block.min_items.unwrap_or(0),
        nested_block.max_items.unwrap_or(0),
        attributes,
        children,
    ))
}

fn nested_attribute_block(
    parent_address: &str,
    name: &str,
    spec: &schema::Attribute,
    nested_type: &NestedAttributeType,
) -> Result<SchemaNode> {
    let address = child_address(parent_address, name);
    let (attributes, children) = normalize_block_contents(
        &address,
        false,
        nested_type.attributes.iter(),
        std::iter::empty(),
    )?;
    let max_items = match nested_type.nesting_mode {
        NestingMode::Single | NestingMode::Group => 1,
        _ => nested_type.max_items.unwrap_or(0),
    };
    Ok(SchemaNode::nested(
        parent_address,
        name,
        nested_type.nesting_mode,
        if spec.is_required() { 1 } else { 0 },
        max_items,
        attributes,
        children,
    ))
}

/// Rebuilds a nested node from an object type.
///
/// Fields not listed as optional by the object type are treated as required:
/// attributes stored in the legacy "attribute as config mode" encoding lose
/// their per-field optionality upstream and are all reported this way.
fn implicit_block(
    parent_address: &str,
    name: &str,
    kind: Option<CollectionKind>,
    object: &ObjectType,
    required: bool,
) -> SchemaNode {
    let address = child_address(parent_address, name);
    let nesting_mode = match kind {
        None => NestingMode::Single,
        Some(CollectionKind::List) => NestingMode::List,
        Some(CollectionKind::Set) => NestingMode::Set,
        Some(CollectionKind::Map) => NestingMode::Map,
    };
    let max_items = if kind.is_none() { 1 } else { 0 };

    let mut attributes = Vec::new();
    let mut children = Vec::new();
    for (field, value_type) in &object.fields {
        let optional = object.is_optional(field);
        match value_type.as_structural() {
            Some((kind, object)) => {
                children.push(implicit_block(&address, field, kind, object, !optional))
            }
            None => attributes.push(Attribute {
                name: field.clone(),
                value_type: value_type.clone(),
                required: !optional,
                optional,
                computed: false,
                sensitive: false,
                description: None,
            }),
        }
    }

    SchemaNode::nested(
        parent_address,
        name,
        nesting_mode,
        if required { 1 } else { 0 },
        max_items,
        attributes,
        children,
    )
}
