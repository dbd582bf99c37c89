//! Defines the command-line interface for the application.

use clap::{Args, Parser, Subcommand};
use line_splice_lib::splicer::DEFAULT_INDENT;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "line-splice",
    version,
    about = "Replace an inclusive line range of a text file with new content."
)]
pub struct Cli {
    /// The file to modify. [default: reads from stdin]
    #[arg(short, long, global = true, value_name = "FILE_PATH")]
    pub file: Option<PathBuf>,

    /// Write the output to a new file instead of modifying the original.
    #[arg(short, long, global = true, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replace a line range with new content.
    Replace(ReplaceArgs),
    /// Delete a line range.
    #[command(alias = "remove")]
    Delete(DeleteArgs),
    /// Print a line range without modifying the file.
    Get(RangeArgs),
    /// Apply a sequence of transactional operations to the file.
    Apply(ApplyArgs),
}

/// The inclusive, 1-indexed line span an operation targets.
#[derive(Args, Debug, Clone, Copy)]
pub struct RangeArgs {
    /// First line of the range (1-indexed).
    #[arg(long, value_name = "LINE")]
    pub start: usize,

    /// Last line of the range (inclusive).
    #[arg(long, value_name = "LINE")]
    pub end: usize,
}

/// How the edited document is emitted.
#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Preview the result on stdout without writing any files.
    #[arg(long, conflicts_with = "diff")]
    pub dry_run: bool,

    /// Show a diff of the pending changes instead of writing files.
    #[arg(long)]
    pub diff: bool,
}

/// Arguments for the `replace` command.
#[derive(Parser, Debug)]
pub struct ReplaceArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    // --- Content to be added ---
    /// The replacement text.
    #[arg(
        short,
        long,
        value_name = "TEXT",
        conflicts_with = "content_file",
        allow_hyphen_values = true
    )]
    pub content: Option<String>,

    /// A file containing the replacement text. Use '-' to read from stdin.
    #[arg(long, value_name = "CONTENT_PATH", conflicts_with = "content")]
    pub content_file: Option<PathBuf>,

    // --- Wrapping ---
    /// Number of spaces written before the replacement.
    #[arg(long, value_name = "SPACES", default_value_t = DEFAULT_INDENT)]
    pub indent: usize,

    /// Do not emit a newline before the replacement.
    #[arg(long)]
    pub no_leading_newline: bool,

    /// Do not emit a newline after the replacement.
    #[arg(long)]
    pub no_trailing_newline: bool,

    #[command(flatten)]
    pub mode: OutputArgs,

    /// Print the line counts as JSON instead of the summary banner.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command.
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    #[command(flatten)]
    pub mode: OutputArgs,

    /// Print the line counts as JSON instead of the summary banner.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `apply` command.
#[derive(Parser, Debug)]
pub struct ApplyArgs {
    /// Path to a JSON or YAML file containing the operations. Use '-' for stdin.
    #[arg(short = 'O', long, value_name = "PATH", conflicts_with = "operations")]
    pub operations_file: Option<PathBuf>,

    /// JSON string describing the operations inline.
    #[arg(long, value_name = "JSON_STRING", conflicts_with = "operations_file")]
    pub operations: Option<String>,

    #[command(flatten)]
    pub mode: OutputArgs,

    /// Print the line counts as JSON instead of the summary banner.
    #[arg(long)]
    pub json: bool,
}
