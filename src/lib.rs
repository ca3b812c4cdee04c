//! This crate generates Terraform `variable` and `resource` declarations from provider schemas.
//!
//! ## Quick Start
//!
//! A Terraform schema is required. It is exported from any plan using the provider:
//!
//! ```bash
//! terraform providers schema -json > schema.json
//! ```
//!
//! The following is a minimal schema declaring a single resource type:
//!
//! ```json
//!{
//!    "format_version": "1.0",
//!    "provider_schemas": {
//!        "registry.terraform.io/hashicorp/azurerm": {
//!            "resource_schemas": {
//!                "azurerm_resource_group": {
//!                    "version": 0,
//!                    "block": {
//!                        "attributes": {
//!                            "id": { "type": "string", "computed": true },
//!                            "location": { "type": "string", "optional": true },
//!                            "name": { "type": "string", "required": true }
//!                        }
//!                    }
//!                }
//!            }
//!        }
//!    }
//!}
//! ```
//!
//! In addition to a Rust library, this crate provides a binary tool `tfresgen` to process
//! schemas saved on disk. Assuming we're inside the repository:
//!
//! ```bash
//! cargo run --bin tfresgen -- -s schema.json -r azurerm_resource_group --uni-variable
//! ```
//!
//! prints one variable holding the whole resource, followed by the resource wired to it:
//!
//! ```code
//! variable "resource_group" {
//!   type = object({
//!     location = optional(string)
//!     name = string
//!   })
//!   nullable = false
//!   description = <<-EOT
//!   - `location` -
//!   - `name` -
//!   EOT
//! }
//!
//! resource "azurerm_resource_group" "this" {
//!   location = var.resource_group.location
//!   name = var.resource_group.name
//! }
//! ```
//!
//! Without `--uni-variable`, one variable is declared per argument and per nested block
//! (`resource_group_location`, `resource_group_name`).
//!
//! Nested blocks are generated as `dynamic` blocks. Blocks that may be absent iterate over
//! an empty collection when their variable is `null`:
//!
//! ```code
//! dynamic "identity" {
//!   for_each = var.kubernetes_cluster.identity == null ? [] : [var.kubernetes_cluster.identity]
//!   content {
//!     identity_ids = identity.value.identity_ids
//!     type = identity.value.type
//!   }
//! }
//! ```
//!
//! Attributes typed as objects, or as collections of objects, are generated the same way as
//! nested blocks.
//!
//! ## Library usage
//!
//! ```no_run
//! use tfschema_resgen::config::{GenerateMode, GenerationConfig};
//! use tfschema_resgen::document::MarkdownDocument;
//! use tfschema_resgen::generator::ResourceGenerator;
//! use tfschema_resgen::schema::read_tf_schema_from_file;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = read_tf_schema_from_file("schema.json")?;
//!     let doc = MarkdownDocument::new("resource_group.html.markdown");
//!     let config = GenerationConfig::new().with_mode(GenerateMode::UniVariable);
//!     let generated = ResourceGenerator::new(config, &schema)
//!         .with_descriptions(&doc)
//!         .generate("azurerm_resource_group")?;
//!     generated.append_to_dir(".")?;
//!     Ok(())
//! }
//! ```
//!
//! Argument descriptions come from the provider's markdown documentation when given, and
//! from the schema otherwise.
//!

// schema bindings and type resolution
pub mod schema;
pub mod types;

// normalized tree
pub mod model;
pub mod normalize;

// code synthesis
pub mod body;
pub mod description;
pub mod emit;
pub mod variable_type;

// argument documentation
pub mod document;

// resource assembly
pub mod generator;

// configuraiton support for code generation
pub mod config;

pub mod error;

pub use error::{Error, Result};

#[cfg(test)]
mod test_utils;
