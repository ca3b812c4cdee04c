//! Serde bindings for `terraform providers schema -json` output.

use crate::error::{Error, Result};
use crate::types::ValueType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TerraformSchemaExport {
    #[serde(default)]
    pub provider_schemas: BTreeMap<String, Schema>,
    #[serde(default)]
    pub format_version: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Schema {
    pub provider: Option<SchemaItem>,
    pub resource_schemas: Option<BTreeMap<String, SchemaItem>>,
    pub data_source_schemas: Option<BTreeMap<String, SchemaItem>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SchemaItem {
    pub version: i64,
    pub block: Block,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Block {
    pub attributes: Option<BTreeMap<String, Attribute>>,
    pub block_types: Option<BTreeMap<String, NestedBlock>>,
    pub description: Option<String>,
}

impl Block {
    /// Attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&String, &Attribute)> {
        self.attributes.iter().flatten()
    }

    /// Nested block types in name order.
    pub fn block_types(&self) -> impl Iterator<Item = (&String, &NestedBlock)> {
        self.block_types.iter().flatten()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "lowercase")]
pub enum StringKind {
    Plain,
    Markdown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Attribute {
    pub r#type: Option<AttributeType>,
    pub nested_type: Option<NestedAttributeType>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub optional: Option<bool>,
    pub computed: Option<bool>,
    pub sensitive: Option<bool>,
    pub description_kind: Option<StringKind>,
    pub deprecated: Option<bool>,
}

impl Attribute {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    pub fn is_optional(&self) -> bool {
        self.optional.unwrap_or(false)
    }

    pub fn is_computed(&self) -> bool {
        self.computed.unwrap_or(false)
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitive.unwrap_or(false)
    }

    /// Filled in by the provider, never settable by the caller.
    pub fn computed_only(&self) -> bool {
        self.is_computed() && !self.is_optional() && !self.is_required()
    }
}

/// Nesting mode of a block type, or of a protocol 6 nested attribute.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NestingMode {
    Single,
    List,
    Set,
    Map,
    Group,
}

impl Default for NestingMode {
    fn default() -> Self {
        NestingMode::Single
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct NestedAttributeType {
    pub attributes: BTreeMap<String, Attribute>,
    pub nesting_mode: NestingMode,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct NestedBlock {
    pub block: Block,
    pub nesting_mode: NestingMode,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
}

/// cty type in its JSON encoding, e.g. `"string"` or `["set", "string"]`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AttributeType(pub Value);

impl AttributeType {
    /// Resolves the JSON encoding into a [`ValueType`]; `field` names the attribute in errors.
    pub fn resolve(&self, field: &str) -> Result<ValueType> {
        ValueType::parse(field, &self.0)
    }
}

/// Source of resource schemas, looked up by full resource type.
pub trait SchemaProvider {
    fn resource_schema(&self, resource_type: &str) -> Result<&Block>;
}

impl SchemaProvider for TerraformSchemaExport {
    fn resource_schema(&self, resource_type: &str) -> Result<&Block> {
        self.provider_schemas
            .values()
            .filter_map(|s| s.resource_schemas.as_ref())
            .find_map(|resources| resources.get(resource_type))
            .map(|item| &item.block)
            .ok_or_else(|| Error::UnknownResourceType(resource_type.to_owned()))
    }
}

impl SchemaProvider for BTreeMap<String, SchemaItem> {
    fn resource_schema(&self, resource_type: &str) -> Result<&Block> {
        self.get(resource_type)
            .map(|item| &item.block)
            .ok_or_else(|| Error::UnknownResourceType(resource_type.to_owned()))
    }
}

pub fn read_tf_schema_from_file<P: AsRef<Path>>(path: P) -> Result<TerraformSchemaExport> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let schema: TerraformSchemaExport = serde_json::from_reader(reader)?;
    Ok(schema)
}
