//! Normalized schema tree walked by the synthesizers.
//!
//! A tree is built once per request by [`crate::normalize`] and is read-only
//! afterwards. Children are owned by their parent; a child only knows its
//! parent through the dotted address it was created with.

use crate::schema::NestingMode;
use crate::types::ValueType;

/// A settable leaf of a block.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value_type: ValueType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub description: Option<String>,
}

impl Attribute {
    pub fn computed_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }

    /// `id` is only the resource's own identity at the root; deeper `id`s are data.
    pub fn skip(&self, at_root: bool) -> bool {
        (at_root && self.name == "id") || self.computed_only()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum BlockKind {
    /// The resource itself, always exactly one instance.
    Root,
    Nested {
        nesting_mode: NestingMode,
        min_items: u64,
        /// Zero means unbounded.
        max_items: u64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchemaNode {
    name: String,
    address: String,
    kind: BlockKind,
    attributes: Vec<Attribute>,
    children: Vec<SchemaNode>,
}

impl SchemaNode {
    /// The resource node; `resource_type` is both its name and its address.
    pub fn root(resource_type: &str, attributes: Vec<Attribute>, children: Vec<SchemaNode>) -> Self {
        Self {
            name: resource_type.to_owned(),
            address: resource_type.to_owned(),
            kind: BlockKind::Root,
            attributes,
            children,
        }
    }

    pub fn nested(
        parent_address: &str,
        name: &str,
        nesting_mode: NestingMode,
        min_items: u64,
        max_items: u64,
        attributes: Vec<Attribute>,
        children: Vec<SchemaNode>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            address: child_address(parent_address, name),
            kind: BlockKind::Nested {
                nesting_mode,
                min_items,
                max_items,
            },
            attributes,
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn children(&self) -> &[SchemaNode] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, BlockKind::Root)
    }

    pub fn nesting_mode(&self) -> NestingMode {
        match self.kind {
            BlockKind::Root => NestingMode::Single,
            BlockKind::Nested { nesting_mode, .. } => nesting_mode,
        }
    }

    pub fn min_items(&self) -> u64 {
        match self.kind {
            BlockKind::Root => 1,
            BlockKind::Nested { min_items, .. } => min_items,
        }
    }

    pub fn max_items(&self) -> u64 {
        match self.kind {
            BlockKind::Root => 1,
            BlockKind::Nested { max_items, .. } => max_items,
        }
    }

    /// At most one instance: typed as a bare object rather than a collection.
    pub fn is_singleton(&self) -> bool {
        self.max_items() == 1
            || matches!(self.nesting_mode(), NestingMode::Single | NestingMode::Group)
    }

    /// No required or optional leaf anywhere below this node.
    pub fn is_read_only(&self) -> bool {
        self.attributes.iter().all(|a| !a.required && !a.optional)
            && self.children.iter().all(SchemaNode::is_read_only)
    }
}

pub(crate) fn child_address(parent_address: &str, name: &str) -> String {
    format!("{}.{}", parent_address, name)
}
