// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

//!
//! Indentation-aware writer for HCL blocks and attributes, plus the syntax
//! check applied to every generated fragment.
//!
use crate::error::{Error, Result};
use serde_generate::indent::{IndentConfig, IndentedWriter};
use std::io::Write;

/// Writes HCL structures, indenting block bodies by two spaces.
pub struct HclWriter<T> {
    out: IndentedWriter<T>,
}

impl<T> HclWriter<T>
where
    T: std::io::Write,
{
    pub fn new(out: T) -> Self {
        Self {
            out: IndentedWriter::new(out, IndentConfig::Space(2)),
        }
    }

    /// Opens `identifier "label" ... {` and indents what follows.
    pub fn open_block(&mut self, identifier: &str, labels: &[&str]) -> std::io::Result<()> {
        write!(self.out, "{}", identifier)?;
        for label in labels {
            write!(self.out, " \"{}\"", label)?;
        }
        writeln!(self.out, " {{")?;
        self.out.indent();
        Ok(())
    }

    pub fn close_block(&mut self) -> std::io::Result<()> {
        self.out.unindent();
        writeln!(self.out, "}}")
    }

    /// `name = expr`; continuation lines of a multi-line `expr` follow the current indentation.
    pub fn attribute(&mut self, name: &str, expr: &str) -> std::io::Result<()> {
        writeln!(self.out, "{} = {}", name, expr)
    }

    /// `name = <<-DELIMITER` heredoc. `content` is written as is, one line per line.
    pub fn heredoc(&mut self, name: &str, delimiter: &str, content: &str) -> std::io::Result<()> {
        writeln!(self.out, "{} = <<-{}", name, delimiter)?;
        for line in content.lines() {
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out, "{}", delimiter)
    }

    /// Writes pre-rendered HCL, re-indented to the current level.
    pub fn raw(&mut self, code: &str) -> std::io::Result<()> {
        write!(self.out, "{}", code)
    }

    pub fn newline(&mut self) -> std::io::Result<()> {
        writeln!(self.out)
    }
}

/// Runs `f` against a fresh writer and returns what it wrote.
pub fn render<F>(address: &str, f: F) -> Result<String>
where
    F: FnOnce(&mut HclWriter<&mut Vec<u8>>) -> std::io::Result<()>,
{
    let mut buffer = Vec::new();
    {
        let mut writer = HclWriter::new(&mut buffer);
        f(&mut writer)?;
    }
    String::from_utf8(buffer).map_err(|e| Error::synthesis(address, e))
}

/// Parses `code` as HCL; failures are reported against the node at `address`.
pub fn check_syntax(address: &str, code: &str) -> Result<()> {
    hcl::parse(code)
        .map(|_| ())
        .map_err(|e| Error::synthesis(address, format!("{}\n{}", e, code)))
}

/// Escapes template sequences so text is taken literally inside a heredoc.
pub fn escape_template(text: &str) -> String {
    text.replace("${", "$${").replace("%{", "%%{")
}
