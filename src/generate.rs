//! # Terraform Provider Schema to variable and resource generator
//!
//! '''bash
//! cargo run --bin tfresgen -- --help
//! '''

use std::path::PathBuf;
use structopt::StructOpt;
use tfschema_resgen::config::{GenerateMode, GenerationConfig};
use tfschema_resgen::document::MarkdownDocument;
use tfschema_resgen::generator::ResourceGenerator;
use tfschema_resgen::schema::read_tf_schema_from_file;
use tracing_subscriber::EnvFilter;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "Terraform schema to resource generator",
    about = "Generate variable and resource declarations from Terraform provider schema"
)]
struct Options {
    /// Path to the JSON-encoded terraform schema.
    #[structopt(short = "s", long = "schema", parse(from_os_str))]
    schema: PathBuf,

    /// Resource type to generate, e.g. `azurerm_resource_group`.
    #[structopt(short = "r", long = "resource-type")]
    resource_type: String,

    /// Declare one variable for the whole resource instead of one per argument.
    #[structopt(short = "u", long = "uni-variable")]
    uni_variable: bool,

    /// Heredoc delimiter for variable descriptions.
    #[structopt(long = "delimiter", default_value = "EOT")]
    delimiter: String,

    /// Variable name prefix, defaults to the resource type without its vendor.
    #[structopt(long = "variable-prefix")]
    variable_prefix: Option<String>,

    /// Markdown documentation of the resource, used for variable descriptions.
    #[structopt(long = "doc", parse(from_os_str))]
    doc: Option<PathBuf>,

    /// Append to `variables.tf` and `main.tf` in this directory instead of printing.
    #[structopt(short = "d", long = "dir", parse(from_os_str))]
    dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = Options::from_args();
    let schema = read_tf_schema_from_file(&options.schema)?;

    let mode = if options.uni_variable {
        GenerateMode::UniVariable
    } else {
        GenerateMode::MultipleVariables
    };
    let mut config = GenerationConfig::new()
        .with_mode(mode)
        .with_delimiter(options.delimiter);
    if let Some(prefix) = options.variable_prefix {
        config = config.with_variable_prefix(prefix);
    }

    let document = options.doc.as_ref().map(MarkdownDocument::new);
    let mut generator = ResourceGenerator::new(config, &schema);
    if let Some(document) = &document {
        generator = generator.with_descriptions(document);
    }
    let generated = generator.generate(&options.resource_type)?;

    match &options.dir {
        Some(dir) => generated.append_to_dir(dir)?,
        None => print!("{}", generated),
    }
    Ok(())
}
