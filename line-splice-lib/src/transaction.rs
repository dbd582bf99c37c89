use crate::splicer::{Wrapping, DEFAULT_INDENT};
use serde::Deserialize;
use std::path::PathBuf;

fn default_true() -> bool {
    true
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

#[derive(Debug, Deserialize, PartialEq)]
/// A single atomic mutation that can be applied to a [`TextDocument`](crate::TextDocument).
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Replace an inclusive line range with new content.
    Replace(ReplaceOperation),
    /// Remove an inclusive line range.
    Delete(DeleteOperation),
}

impl Operation {
    /// Short name used in log and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Replace(_) => "replace",
            Operation::Delete(_) => "delete",
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
/// Describes a replacement of an inclusive, 1-indexed line range.
pub struct ReplaceOperation {
    /// First line to replace.
    pub start: usize,
    /// Last line to replace (inclusive).
    pub end: usize,
    #[serde(default)]
    /// Optional human-readable note recorded alongside the operation.
    pub comment: Option<String>,
    #[serde(default)]
    /// Inline replacement text.
    pub content: Option<String>,
    #[serde(default)]
    /// Path to a file providing the replacement text. `-` reads stdin.
    pub content_file: Option<PathBuf>,
    #[serde(default = "default_indent")]
    /// Spaces written before the replacement.
    pub indent: usize,
    #[serde(default = "default_true")]
    /// Emit a newline before the replacement.
    pub leading_newline: bool,
    #[serde(default = "default_true")]
    /// Emit a newline after the replacement.
    pub trailing_newline: bool,
}

impl ReplaceOperation {
    pub fn wrapping(&self) -> Wrapping {
        Wrapping {
            leading_newline: self.leading_newline,
            indent: self.indent,
            trailing_newline: self.trailing_newline,
        }
    }
}

impl Default for ReplaceOperation {
    fn default() -> Self {
        Self {
            start: 1,
            end: 1,
            comment: None,
            content: None,
            content_file: None,
            indent: default_indent(),
            leading_newline: true,
            trailing_newline: true,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
/// Describes deletion of an inclusive, 1-indexed line range.
pub struct DeleteOperation {
    /// First line to delete.
    pub start: usize,
    /// Last line to delete (inclusive).
    pub end: usize,
    #[serde(default)]
    /// Optional human-readable note recorded alongside the operation.
    pub comment: Option<String>,
}
