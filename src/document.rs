//! Argument descriptions parsed from provider markdown documentation.
//!
//! Only the "Arguments Reference" and "Timeouts" sections are read. Each
//! paragraph is either an argument bullet (``* `name` - text``) or a heading
//! announcing a nested block, whose arguments are then keyed `block.name`.

use crate::description::{ArgumentDescription, DescriptionProvider, Descriptions};
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

static BACK_QUOTE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"`.+`").unwrap());
static ARGUMENTS_HEADLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"## [Aa]rguments? [Rr]eference").unwrap());
static TIMEOUTS_HEADLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"## [Tt]imeouts?").unwrap());
static ATTRIBUTES_HEADLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"## [Aa]ttributes? [Rr]eference").unwrap());
static IMPORT_HEADLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"## [Ii]mports?").unwrap());

const AWS_NESTED_BLOCK_KEYWORDS: [&str; 3] = ["following", "argument", "configuration block:"];

const TIMEOUTS_URLS: [&str; 4] = [
    "https://developer.hashicorp.com/terraform/language/resources/syntax#operation-timeouts",
    "https://www.terraform.io/docs/configuration/resources.html#timeouts",
    "https://developer.hashicorp.com/terraform/plugin/sdkv2/resources/retries-and-customizable-timeouts",
    "resources/syntax#operation-timeouts",
];

/// Markdown documentation of one resource, read from disk.
#[derive(Clone, Debug)]
pub struct MarkdownDocument {
    path: PathBuf,
}

impl MarkdownDocument {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DescriptionProvider for MarkdownDocument {
    fn descriptions(&self, resource_type: &str) -> Result<Descriptions> {
        let markdown = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::DescriptionFetch(format!(
                "{} ({}): {}",
                resource_type,
                self.path.display(),
                e
            ))
        })?;
        Ok(parse_markdown(&markdown))
    }
}

/// Parses the argument descriptions out of a markdown document.
pub fn parse_markdown(markdown: &str) -> Descriptions {
    let markdown = markdown.replace("\r\n", "\n").replace("\n*", "\n\n*");
    let mut descriptions = Descriptions::new();
    let mut parsing = false;
    let mut paragraph = String::new();
    let mut block_name: Option<String> = None;

    for line in markdown.lines().map(str::trim) {
        if begin_parse(line) {
            parsing = true;
            continue;
        }
        if end_parse(line) {
            parsing = false;
            continue;
        }
        if !parsing {
            continue;
        }
        if !line.is_empty() {
            if !paragraph.is_empty() {
                paragraph.push(' ');
            }
            paragraph.push_str(line);
            continue;
        }
        let text = std::mem::take(&mut paragraph);
        take_paragraph(&text, &mut block_name, &mut descriptions);
    }
    if parsing && !paragraph.is_empty() {
        take_paragraph(&paragraph, &mut block_name, &mut descriptions);
    }

    debug!("parsed {} argument descriptions", descriptions.len());
    descriptions
}

fn take_paragraph(text: &str, block_name: &mut Option<String>, descriptions: &mut Descriptions) {
    if let Some(name) = nested_block_head(text) {
        *block_name = Some(name);
        return;
    }
    if let Some(arg) = parse_argument(text) {
        let key = match block_name {
            Some(block) => format!("{}.{}", block, arg.name),
            None => arg.name.clone(),
        };
        descriptions.entry(key).or_insert(arg);
    }
}

fn begin_parse(line: &str) -> bool {
    ARGUMENTS_HEADLINE.is_match(line) || TIMEOUTS_HEADLINE.is_match(line)
}

fn end_parse(line: &str) -> bool {
    ATTRIBUTES_HEADLINE.is_match(line) || IMPORT_HEADLINE.is_match(line)
}

fn parse_argument(line: &str) -> Option<ArgumentDescription> {
    let line = clean(line);
    if !line.starts_with('*') && !line.contains('-') {
        return None;
    }
    let (name, description) = line.split_once(" - ")?;
    let name = name.trim_start_matches("* `").trim_end_matches('`');
    Some(ArgumentDescription {
        name: name.to_owned(),
        description: description.to_owned(),
    })
}

fn clean(line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }
    let line = line.replace(" \u{2013} ", " - ");
    if line.chars().all(|c| c == ' ' || c == '-') {
        return line;
    }
    match line.strip_prefix("- ") {
        Some(rest) => format!("* {}", rest),
        None => line,
    }
}

fn nested_block_head(line: &str) -> Option<String> {
    let quoted = BACK_QUOTE_NAME.find(line).map(|m| m.as_str());
    let is_head = line.ends_with("block supports the following:")
        || (quoted.is_some() && AWS_NESTED_BLOCK_KEYWORDS.iter().all(|k| line.contains(k)))
        || (quoted.is_some() && line.ends_with("block supports:"))
        || is_timeouts_description(line);
    if !is_head {
        return None;
    }
    match quoted {
        Some(name) => Some(name[1..name.len() - 1].to_owned()),
        None if is_timeouts_description(line) => Some("timeouts".to_owned()),
        None => None,
    }
}

fn is_timeouts_description(line: &str) -> bool {
    TIMEOUTS_URLS.iter().any(|url| line.contains(url))
}

#[cfg(test)]
mod test {
    use super::*;

    const RESOURCE_GROUP_DOC: &str = include_str!("../tests/fixtures/resource_group.html.markdown");

    fn description<'a>(descriptions: &'a Descriptions, key: &str) -> &'a str {
        descriptions
            .get(key)
            .map(|d| d.description.as_str())
            .unwrap_or_else(|| panic!("missing {}", key))
    }

    #[test]
    fn test_parse_arguments_reference() {
        let docs = parse_markdown(RESOURCE_GROUP_DOC);
        assert_eq!(
            description(&docs, "name"),
            "(Required) The Name which should be used for this Resource Group. Changing this forces a new Resource Group to be created."
        );
        assert_eq!(
            description(&docs, "location"),
            "(Required) The Azure Region where the Resource Group should exist."
        );
        assert_eq!(docs["name"].name, "name");
    }

    #[test]
    fn test_nested_block_arguments_are_qualified() {
        let docs = parse_markdown(RESOURCE_GROUP_DOC);
        assert_eq!(
            description(&docs, "identity.type"),
            "(Required) Specifies the type of Managed Service Identity - either `SystemAssigned` or `UserAssigned`."
        );
        assert!(docs.contains_key("identity.identity_ids"));
        assert!(!docs.contains_key("type"));
    }

    #[test]
    fn test_attributes_reference_is_ignored() {
        let docs = parse_markdown(RESOURCE_GROUP_DOC);
        assert!(!docs.contains_key("id"));
        assert!(!docs.contains_key("identity.id"));
    }

    #[test]
    fn test_timeouts_section() {
        let docs = parse_markdown(RESOURCE_GROUP_DOC);
        assert_eq!(
            description(&docs, "timeouts.create"),
            "(Defaults to 90 minutes) Used when creating the Resource Group."
        );
        assert!(docs.contains_key("timeouts.delete"));
    }

    #[test]
    fn test_dash_bullets_and_en_dash() {
        let markdown = "## Argument Reference\n\n- `bucket` \u{2013} (Optional) Name of the bucket.\n\nThe `lifecycle_rule` configuration block supports the following argument configuration block:\n\n* `enabled` - (Required) Whether enabled.\n";
        let docs = parse_markdown(markdown);
        assert_eq!(description(&docs, "bucket"), "(Optional) Name of the bucket.");
        assert_eq!(description(&docs, "lifecycle_rule.enabled"), "(Required) Whether enabled.");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let markdown = "## Arguments Reference\n\n* `name` - first\n\n* `name` - second\n";
        let docs = parse_markdown(markdown);
        assert_eq!(description(&docs, "name"), "first");
    }

    #[test]
    fn test_missing_file_is_a_description_error() {
        let doc = MarkdownDocument::new("./tests/fixtures/does-not-exist.md");
        let err = doc.descriptions("azurerm_resource_group").unwrap_err();
        assert!(matches!(err, Error::DescriptionFetch(_)));
    }

    #[test]
    fn test_markdown_document_provider() {
        let doc = MarkdownDocument::new("./tests/fixtures/resource_group.html.markdown");
        let docs = doc.descriptions("azurerm_resource_group").unwrap();
        assert!(docs.contains_key("location"));
    }
}
