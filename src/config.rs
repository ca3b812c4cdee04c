// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::{Error, Result};
use std::fmt;

/// Heredoc delimiter used when none is configured.
pub const DEFAULT_DELIMITER: &str = "EOT";

/// How variables are laid out for a generated resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerateMode {
    /// One variable holds the whole resource.
    UniVariable,
    /// One variable per top-level argument or nested block.
    MultipleVariables,
}

impl Default for GenerateMode {
    fn default() -> Self {
        GenerateMode::MultipleVariables
    }
}

impl fmt::Display for GenerateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateMode::UniVariable => write!(f, "UniVariable"),
            GenerateMode::MultipleVariables => write!(f, "MultipleVariables"),
        }
    }
}

/// Code generation options for a single resource.
#[derive(Clone, Debug, Default)]
pub struct GenerationConfig {
    pub(crate) delimiter: String,
    pub(crate) mode: GenerateMode,
    pub(crate) variable_prefix: Option<String>,
}

impl GenerationConfig {
    /// Default config: `EOT` delimiter, one variable per argument.
    pub fn new() -> Self {
        Self::default()
    }

    /// Heredoc delimiter framing variable descriptions.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Variable layout.
    pub fn with_mode(mut self, mode: GenerateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the variable name prefix. An empty prefix is kept as is.
    pub fn with_variable_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.variable_prefix = Some(prefix.into());
        self
    }

    pub fn delimiter(&self) -> &str {
        if self.delimiter.is_empty() {
            DEFAULT_DELIMITER
        } else {
            &self.delimiter
        }
    }

    /// Rejects settings that cannot be rendered, before any code is generated.
    pub fn validate(&self) -> Result<()> {
        if is_identifier(self.delimiter()) {
            Ok(())
        } else {
            Err(Error::InvalidDelimiter(self.delimiter.clone()))
        }
    }

    pub fn mode(&self) -> GenerateMode {
        self.mode
    }

    /// The configured prefix, or `default_prefix` when none was set.
    pub fn variable_prefix<'a>(&'a self, default_prefix: &'a str) -> &'a str {
        self.variable_prefix.as_deref().unwrap_or(default_prefix)
    }
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    }
}
