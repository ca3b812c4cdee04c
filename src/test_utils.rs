use crate::model::SchemaNode;
use crate::normalize::normalize_resource;
use crate::schema::{self, SchemaProvider, TerraformSchemaExport};
use serde_json::Value;

pub const TEST_PROVIDER_SCHEMA: &str = include_str!("../tests/fixtures/test-provider-schema.json");

pub fn test_schema() -> TerraformSchemaExport {
    serde_json::from_str(TEST_PROVIDER_SCHEMA).unwrap()
}

/// Normalized tree of a resource from the test provider schema.
pub fn normalized(resource_type: &str) -> SchemaNode {
    let schema = test_schema();
    let block = schema.resource_schema(resource_type).unwrap();
    normalize_resource(resource_type, block).unwrap()
}

pub fn block_from_json(value: Value) -> schema::Block {
    serde_json::from_value(value).unwrap()
}

/// Drops all whitespace, for comparing type expressions regardless of layout.
pub fn squash(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Trims every line and drops blank ones, for comparing code regardless of indentation.
pub fn trim_lines(code: &str) -> String {
    code.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
