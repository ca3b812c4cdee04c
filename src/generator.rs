//! Assembles variable and resource declarations for one resource type.

use crate::body::synthesize_block;
use crate::config::{GenerateMode, GenerationConfig};
use crate::description::{describe_attribute, synthesize_description, DescriptionProvider, Descriptions};
use crate::emit::{check_syntax, escape_template, render};
use crate::error::{Error, Result};
use crate::model::{child_address, SchemaNode};
use crate::normalize::normalize_resource;
use crate::schema::SchemaProvider;
use crate::variable_type::synthesize_type;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// A resource type split at its first `_`, e.g. `azurerm` and `resource_group`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceName<'a> {
    pub full: &'a str,
    pub vendor: &'a str,
    pub without_vendor: &'a str,
}

impl<'a> ResourceName<'a> {
    pub fn parse(resource_type: &'a str) -> Result<Self> {
        match resource_type.split_once('_') {
            Some((vendor, rest)) if !vendor.is_empty() && !rest.is_empty() => Ok(Self {
                full: resource_type,
                vendor,
                without_vendor: rest,
            }),
            _ => Err(Error::InvalidResourceName(resource_type.to_owned())),
        }
    }
}

/// Generated code, split into variable declarations and the resource declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratedResource {
    pub variables: Vec<String>,
    pub resource: String,
}

impl fmt::Display for GeneratedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for variable in &self.variables {
            writeln!(f, "{}", variable)?;
        }
        write!(f, "{}", self.resource)
    }
}

impl GeneratedResource {
    /// Appends the variables to `variables.tf` and the resource to `main.tf` in `dir`.
    pub fn append_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        append_to_file(&dir.join("variables.tf"), &self.variables.join("\n"))?;
        append_to_file(&dir.join("main.tf"), &self.resource)
    }
}

fn append_to_file(path: &Path, code: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if file.metadata()?.len() > 0 {
        file.write_all(b"\n")?;
    }
    file.write_all(code.as_bytes())?;
    Ok(())
}

struct Variable {
    name: String,
    address: String,
    type_expr: String,
    nullable: bool,
    sensitive: bool,
    description: String,
}

/// Generates resources from schemas supplied by a [`SchemaProvider`].
pub struct ResourceGenerator<'a> {
    config: GenerationConfig,
    schemas: &'a dyn SchemaProvider,
    documents: Option<&'a dyn DescriptionProvider>,
}

impl<'a> ResourceGenerator<'a> {
    pub fn new(config: GenerationConfig, schemas: &'a dyn SchemaProvider) -> Self {
        Self {
            config,
            schemas,
            documents: None,
        }
    }

    /// Argument descriptions used for variable descriptions.
    pub fn with_descriptions(mut self, documents: &'a dyn DescriptionProvider) -> Self {
        self.documents = Some(documents);
        self
    }

    pub fn generate(&self, resource_type: &str) -> Result<GeneratedResource> {
        self.config.validate()?;
        let name = ResourceName::parse(resource_type)?;
        let block = self.schemas.resource_schema(resource_type)?;
        let root = normalize_resource(resource_type, block)?;
        let descriptions = self.descriptions(resource_type);
        let prefix = self.config.variable_prefix(name.without_vendor);
        info!(
            "generating {} in {} mode with variable prefix {:?}",
            resource_type,
            self.config.mode(),
            prefix
        );

        let layout = match self.config.mode() {
            GenerateMode::UniVariable => {
                if prefix.is_empty() {
                    return Err(Error::InvalidVariablePrefix {
                        prefix: prefix.to_owned(),
                        mode: self.config.mode().to_string(),
                    });
                }
                uni_variable_layout(&root, prefix, &descriptions)
            }
            GenerateMode::MultipleVariables => multiple_variables_layout(&root, prefix, &descriptions),
        };

        let variables = layout
            .variables
            .iter()
            .map(|variable| self.render_variable(variable))
            .collect::<Result<Vec<_>>>()?;
        let resource = render_resource(&root, &layout.attribute_exprs, &layout.block_sources)?;
        Ok(GeneratedResource {
            variables,
            resource,
        })
    }

    fn descriptions(&self, resource_type: &str) -> Descriptions {
        match self.documents.map(|d| d.descriptions(resource_type)) {
            Some(Ok(descriptions)) => descriptions,
            Some(Err(e)) => {
                warn!("continuing without argument descriptions: {}", e);
                Descriptions::new()
            }
            None => Descriptions::new(),
        }
    }

    fn render_variable(&self, variable: &Variable) -> Result<String> {
        let delimiter = self.config.delimiter();
        let code = render(&variable.address, |out| {
            out.open_block("variable", &[variable.name.as_str()])?;
            out.attribute("type", &variable.type_expr)?;
            if variable.nullable {
                out.attribute("default", "null")?;
            } else {
                out.attribute("nullable", "false")?;
            }
            if variable.sensitive {
                out.attribute("sensitive", "true")?;
            }
            if variable.description.is_empty() {
                out.attribute("description", "\"\"")?;
            } else {
                out.heredoc("description", delimiter, &escape_template(&variable.description))?;
            }
            out.close_block()
        })?;
        check_syntax(&variable.address, &code)?;
        Ok(code)
    }
}

/// Variables to declare, and the expressions the resource body reads them through.
struct Layout {
    variables: Vec<Variable>,
    attribute_exprs: Vec<String>,
    block_sources: Vec<String>,
}

fn uni_variable_layout(root: &SchemaNode, prefix: &str, descriptions: &Descriptions) -> Layout {
    let variable = Variable {
        name: prefix.to_owned(),
        address: root.address().to_owned(),
        type_expr: synthesize_type(root, true),
        nullable: false,
        sensitive: false,
        description: synthesize_description(root, descriptions),
    };
    let scoped = |field: &str| format!("var.{}.{}", prefix, field);
    Layout {
        variables: vec![variable],
        attribute_exprs: root.attributes().iter().map(|a| scoped(&a.name)).collect(),
        block_sources: root.children().iter().map(|c| scoped(c.name())).collect(),
    }
}

fn multiple_variables_layout(root: &SchemaNode, prefix: &str, descriptions: &Descriptions) -> Layout {
    let mut layout = Layout {
        variables: Vec::new(),
        attribute_exprs: Vec::new(),
        block_sources: Vec::new(),
    };
    for attr in root.attributes() {
        let name = variable_name(prefix, &attr.name);
        layout.attribute_exprs.push(format!("var.{}", name));
        layout.variables.push(Variable {
            name,
            address: child_address(root.address(), &attr.name),
            type_expr: attr.value_type.type_expr(),
            nullable: attr.optional,
            sensitive: attr.sensitive,
            description: describe_attribute(root, attr, descriptions),
        });
    }
    for child in root.children() {
        let name = variable_name(prefix, child.name());
        layout.block_sources.push(format!("var.{}", name));
        layout.variables.push(Variable {
            name,
            address: child.address().to_owned(),
            type_expr: synthesize_type(child, true),
            nullable: child.min_items() == 0,
            sensitive: false,
            description: synthesize_description(child, descriptions),
        });
    }
    layout
}

fn variable_name(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_owned()
    } else {
        format!("{}_{}", prefix, field)
    }
}

fn render_resource(root: &SchemaNode, attribute_exprs: &[String], block_sources: &[String]) -> Result<String> {
    let blocks = root
        .children()
        .iter()
        .zip(block_sources)
        .map(|(child, source)| synthesize_block(child, source))
        .collect::<Result<Vec<_>>>()?;

    let code = render(root.address(), |out| {
        out.open_block("resource", &[root.name(), "this"])?;
        for (attr, expr) in root.attributes().iter().zip(attribute_exprs) {
            out.attribute(&attr.name, expr)?;
        }
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 || !attribute_exprs.is_empty() {
                out.newline()?;
            }
            out.raw(block)?;
        }
        out.close_block()
    })?;
    check_syntax(root.address(), &code)?;
    Ok(code)
}

/// Generates `resource_type` from `schemas` without argument documentation.
pub fn generate_resource(
    schemas: &dyn SchemaProvider,
    resource_type: &str,
    config: &GenerationConfig,
) -> Result<GeneratedResource> {
    ResourceGenerator::new(config.clone(), schemas).generate(resource_type)
}
