//! Contains the logic for cutting a line range out of a document and splicing new text in.

use crate::error::SpliceError;
use crate::range::LineRange;

/// Indentation placed in front of the replacement block unless overridden.
pub const DEFAULT_INDENT: usize = 8;

/// The literals placed around replacement content when it is spliced in.
///
/// The default layout is a newline, eight spaces, the content, then a newline:
/// `"\n        " + content + "\n"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapping {
    /// Emit a newline between the prefix and the replacement.
    pub leading_newline: bool,
    /// Number of spaces written before the first line of the replacement.
    pub indent: usize,
    /// Emit a newline between the replacement and the suffix.
    pub trailing_newline: bool,
}

impl Default for Wrapping {
    fn default() -> Self {
        Self {
            leading_newline: true,
            indent: DEFAULT_INDENT,
            trailing_newline: true,
        }
    }
}

impl Wrapping {
    /// Appends `content` to `output` surrounded by the configured literals.
    fn write_wrapped(&self, output: &mut String, content: &str) {
        if self.leading_newline {
            output.push('\n');
        }
        output.push_str(&" ".repeat(self.indent));
        output.push_str(content);
        if self.trailing_newline {
            output.push('\n');
        }
    }
}

/// Splits text into lines, keeping each line's terminator (`\n` or `\r\n`).
///
/// A final line without a terminator is kept as-is; empty input yields no lines.
pub fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_owned).collect()
}

/// Counts the newline-delimited segments of `content`, i.e. line breaks plus one.
pub fn count_inserted_lines(content: &str) -> usize {
    content.split('\n').count()
}

/// Builds the spliced text: the lines before `range`, the wrapped replacement,
/// then the lines after `range`, each kept byte-for-byte.
///
/// # Arguments
///
/// * `lines`: The document's lines, terminators included.
/// * `range`: The inclusive span to drop.
/// * `replacement`: The content to put in its place.
/// * `wrapping`: The literals placed around `replacement`.
pub fn splice_lines(
    lines: &[String],
    range: LineRange,
    replacement: &str,
    wrapping: &Wrapping,
) -> Result<String, SpliceError> {
    range.check_bounds(lines.len())?;
    let span = range.indices();

    let mut output = String::new();
    lines[..span.start].iter().for_each(|line| output.push_str(line));
    wrapping.write_wrapped(&mut output, replacement);
    lines[span.end..].iter().for_each(|line| output.push_str(line));
    Ok(output)
}

/// Builds the text with `range` removed and nothing put in its place.
pub fn delete_lines(lines: &[String], range: LineRange) -> Result<String, SpliceError> {
    range.check_bounds(lines.len())?;
    let span = range.indices();

    Ok(lines[..span.start]
        .iter()
        .chain(lines[span.end..].iter())
        .map(String::as_str)
        .collect())
}
