//! `line-splice-lib` exposes the line-range editing primitives that power
//! the `line-splice` CLI.
//!
//! A document is held as its lines, each with its original terminator, so
//! everything outside the edited range is written back byte-for-byte. The
//! replaced span is addressed by 1-indexed, inclusive line numbers and is
//! validated against the document before anything is rewritten.
//!
//! # Example
//!
//! ```rust
//! use std::str::FromStr;
//!
//! use line_splice_lib::range::LineRange;
//! use line_splice_lib::splicer::Wrapping;
//! use line_splice_lib::TextDocument;
//!
//! # fn demo() -> Result<(), line_splice_lib::error::SpliceError> {
//! let mut document = TextDocument::from_str("A\nB\nC\nD\nE\n")?;
//!
//! let report = document.splice(LineRange::new(2, 4)?, "X\nY", &Wrapping::default())?;
//!
//! assert_eq!(document.render(), "A\n\n        X\nY\nE\n");
//! assert_eq!((report.removed, report.inserted), (3, 2));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

pub mod error;
pub mod range;
pub mod splicer;
pub mod transaction;

use crate::error::SpliceError;
use crate::range::LineRange;
use crate::splicer::{count_inserted_lines, delete_lines, splice_lines, split_lines, Wrapping};
use crate::transaction::{DeleteOperation, Operation, ReplaceOperation};
use anyhow::Context;
use serde::Serialize;
use std::convert::Infallible;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Represents an in-memory text document addressed by line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    lines: Vec<String>,
}

/// Line counts describing a single splice, as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpliceReport {
    /// First line of the replaced range.
    pub start: usize,
    /// Last line of the replaced range (inclusive).
    pub end: usize,
    /// Number of lines removed, `end - start + 1`.
    pub removed: usize,
    /// Number of newline-delimited segments in the inserted content.
    pub inserted: usize,
}

impl SpliceReport {
    fn new(range: LineRange, inserted: usize) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
            removed: range.line_count(),
            inserted,
        }
    }
}

/// Result metadata describing the side-effects of applying a batch of operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// One report per operation, in execution order.
    pub reports: Vec<SpliceReport>,
}

impl TextDocument {
    /// Number of lines in the document. A final line without a terminator counts.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the exact text of `range`.
    pub fn get(&self, range: LineRange) -> Result<String, SpliceError> {
        range.check_bounds(self.lines.len())?;
        Ok(self.lines[range.indices()].concat())
    }

    /// Replaces `range` with `replacement`, surrounded by `wrapping`.
    ///
    /// The document is left untouched if the range does not fit it.
    pub fn splice(
        &mut self,
        range: LineRange,
        replacement: &str,
        wrapping: &Wrapping,
    ) -> Result<SpliceReport, SpliceError> {
        if replacement.is_empty() {
            log::warn!("Replacement content for lines {range} is empty.");
        }
        if range.start() == 1 && range.end() == self.lines.len() {
            log::warn!("Line range {range} covers the whole document.");
        }

        let output = splice_lines(&self.lines, range, replacement, wrapping)?;
        log::debug!(
            "Spliced {} byte(s) over lines {range}; document is now {} byte(s).",
            replacement.len(),
            output.len()
        );
        self.lines = split_lines(&output);

        Ok(SpliceReport::new(range, count_inserted_lines(replacement)))
    }

    /// Removes `range` without inserting anything.
    pub fn delete(&mut self, range: LineRange) -> Result<SpliceReport, SpliceError> {
        let output = delete_lines(&self.lines, range)?;
        self.lines = split_lines(&output);
        Ok(SpliceReport::new(range, 0))
    }

    /// Applies a list of transactional operations to the document.
    ///
    /// Operations are executed sequentially against a temporary copy of the
    /// document, so each line range refers to the text left by the previous
    /// operation. If every step succeeds, the working copy replaces the
    /// original. If any step fails (e.g., because a range runs past the end
    /// of the document), the document is left untouched and a [`SpliceError`]
    /// is returned.
    ///
    /// A `content_file` of `-` reads stdin, at most once per batch.
    pub fn apply(&mut self, operations: Vec<Operation>) -> Result<ApplyOutcome, SpliceError> {
        self.apply_with_stdin(operations, true)
    }

    /// Applies operations, refusing any `content_file: "-"` when `stdin_available`
    /// is false because the caller already consumed stdin (e.g. for the document).
    pub fn apply_with_stdin(
        &mut self,
        operations: Vec<Operation>,
        stdin_available: bool,
    ) -> Result<ApplyOutcome, SpliceError> {
        let mut working = self.clone();
        let mut reports = Vec::with_capacity(operations.len());
        let mut content_source = ContentSource { stdin_available };

        for (position, operation) in operations.into_iter().enumerate() {
            let name = operation.name();
            let report = match operation {
                Operation::Replace(replace_op) => {
                    apply_replace_operation(&mut working, replace_op, &mut content_source)
                }
                Operation::Delete(delete_op) => apply_delete_operation(&mut working, delete_op),
            }
            .map_err(|err| {
                SpliceError::OperationFailed(format!("#{} ({name}): {err:#}", position + 1))
            })?;
            reports.push(report);
        }

        *self = working;
        Ok(ApplyOutcome { reports })
    }

    /// Renders the document back to a single string.
    pub fn render(&self) -> String {
        self.lines.concat()
    }
}

impl FromStr for TextDocument {
    type Err = Infallible;

    /// Splits `content` into lines, keeping every terminator.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            lines: split_lines(content),
        })
    }
}

/// Replaces lines `range` of the file at `target` with the contents of the
/// file at `replacement`, then overwrites `target` with the result.
///
/// Both files are read, and the range checked, before anything is written;
/// a failure at any of those steps leaves `target` untouched. The write
/// itself truncates and rewrites the file in place.
pub fn splice_file(
    target: &Path,
    replacement: &Path,
    range: LineRange,
    wrapping: &Wrapping,
) -> Result<SpliceReport, SpliceError> {
    let original = read_file(target, "target")?;
    let content = read_file(replacement, "replacement")?;

    let mut document = TextDocument::from_str(&original)?;
    log::debug!(
        "Loaded {} line(s) from {}",
        document.line_count(),
        target.display()
    );
    let report = document.splice(range, &content, wrapping)?;

    fs::write(target, document.render()).map_err(|err| {
        SpliceError::Io(format!("Failed to write {}: {err}", target.display()))
    })?;

    Ok(report)
}

/// Parses an operations manifest. JSON is accepted as a subset of YAML.
pub fn parse_operations(data: &str) -> Result<Vec<Operation>, SpliceError> {
    serde_yaml::from_str(data).map_err(|err| SpliceError::OperationParse(err.to_string()))
}

fn read_file(path: &Path, role: &str) -> Result<String, SpliceError> {
    fs::read_to_string(path).map_err(|err| {
        SpliceError::Io(format!(
            "Failed to read {role} file {}: {err}",
            path.display()
        ))
    })
}

fn apply_replace_operation(
    document: &mut TextDocument,
    operation: ReplaceOperation,
    content_source: &mut ContentSource,
) -> anyhow::Result<SpliceReport> {
    let wrapping = operation.wrapping();
    let ReplaceOperation {
        start,
        end,
        comment,
        content,
        content_file,
        ..
    } = operation;

    if let Some(comment) = comment {
        log::info!("replace {start}:{end}: {comment}");
    }

    let range = LineRange::new(start, end)?;
    let content = content_source.resolve(content, content_file)?;
    Ok(document.splice(range, &content, &wrapping)?)
}

fn apply_delete_operation(
    document: &mut TextDocument,
    operation: DeleteOperation,
) -> anyhow::Result<SpliceReport> {
    let DeleteOperation {
        start,
        end,
        comment,
    } = operation;

    if let Some(comment) = comment {
        log::info!("delete {start}:{end}: {comment}");
    }

    let range = LineRange::new(start, end)?;
    Ok(document.delete(range)?)
}

/// Where a replace operation's text comes from; stdin can be drained only once.
struct ContentSource {
    stdin_available: bool,
}

impl ContentSource {
    fn resolve(
        &mut self,
        content: Option<String>,
        content_file: Option<PathBuf>,
    ) -> anyhow::Result<String> {
        match (content, content_file) {
            (Some(inline), None) => Ok(inline),
            (None, Some(path)) if path.to_string_lossy() == "-" => {
                if !self.stdin_available {
                    return Err(SpliceError::AmbiguousStdinSource.into());
                }
                self.stdin_available = false;

                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .with_context(|| "Failed to read replacement content from stdin")?;
                Ok(buf)
            }
            (None, Some(path)) => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read content file: {}", path.display())),
            (Some(_), Some(_)) => Err(SpliceError::AmbiguousContentSource.into()),
            (None, None) => Err(SpliceError::NoContent.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(content: &str) -> TextDocument {
        TextDocument::from_str(content).unwrap()
    }

    fn replace(start: usize, end: usize, content: &str) -> Operation {
        Operation::Replace(ReplaceOperation {
            start,
            end,
            content: Some(content.to_string()),
            ..ReplaceOperation::default()
        })
    }

    #[test]
    fn get_returns_exact_span() {
        let doc = document("one\ntwo\r\nthree");
        assert_eq!(doc.get(LineRange::new(2, 3).unwrap()).unwrap(), "two\r\nthree");
    }

    #[test]
    fn splice_reports_counts() {
        let mut doc = document("A\nB\nC\nD\nE\n");

        let report = doc
            .splice(LineRange::new(2, 4).unwrap(), "X\nY", &Wrapping::default())
            .unwrap();

        assert_eq!(
            report,
            SpliceReport {
                start: 2,
                end: 4,
                removed: 3,
                inserted: 2
            }
        );
        assert_eq!(doc.render(), "A\n\n        X\nY\nE\n");
        assert_eq!(doc.line_count(), 5);
    }

    #[test]
    fn splice_out_of_bounds_leaves_document_untouched() {
        let mut doc = document("A\nB\n");

        let err = doc
            .splice(LineRange::new(1, 3).unwrap(), "X", &Wrapping::default())
            .unwrap_err();

        assert!(matches!(err, SpliceError::RangeOutOfBounds { end: 3, line_count: 2 }));
        assert_eq!(doc.render(), "A\nB\n");
    }

    #[test]
    fn delete_reports_zero_inserted() {
        let mut doc = document("A\nB\nC\n");

        let report = doc.delete(LineRange::new(1, 2).unwrap()).unwrap();

        assert_eq!(report.removed, 2);
        assert_eq!(report.inserted, 0);
        assert_eq!(doc.render(), "C\n");
    }

    #[test]
    fn process_apply_runs_operations_in_sequence() {
        let mut doc = document("A\nB\nC\nD\nE\n");

        let operations = vec![
            Operation::Delete(DeleteOperation {
                start: 1,
                end: 1,
                comment: None,
            }),
            // Line 1 is now "B".
            replace(1, 2, "bc"),
        ];

        let outcome = doc.apply(operations).unwrap();

        assert_eq!(doc.render(), "\n        bc\nD\nE\n");
        assert_eq!(outcome.reports.len(), 2);
        assert_eq!(outcome.reports[1].removed, 2);
        assert_eq!(outcome.reports[1].inserted, 1);
    }

    #[test]
    fn process_apply_is_atomic_when_operation_fails() {
        let mut doc = document("A\nB\nC\n");

        let operations = vec![replace(1, 1, "first"), replace(2, 9, "second")];

        let err = doc.apply(operations).unwrap_err();

        match err {
            SpliceError::OperationFailed(message) => {
                assert!(message.starts_with("#2 (replace)"), "{message}");
                assert!(message.contains("only has"), "{message}");
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
        assert_eq!(doc.render(), "A\nB\nC\n");
    }

    #[test]
    fn process_apply_rejects_missing_content() {
        let mut doc = document("A\n");

        let operations = vec![Operation::Replace(ReplaceOperation::default())];

        let err = doc.apply(operations).unwrap_err();
        assert!(err.to_string().contains("#1 (replace)"));
        assert!(err.to_string().contains("Neither content nor a content file"));
    }

    #[test]
    fn process_apply_refuses_stdin_content_once_stdin_is_consumed() {
        let mut doc = document("a\nb\n");

        let operations = vec![Operation::Replace(ReplaceOperation {
            content_file: Some(PathBuf::from("-")),
            ..ReplaceOperation::default()
        })];

        let err = doc.apply_with_stdin(operations, false).unwrap_err();

        match err {
            SpliceError::OperationFailed(message) => {
                assert!(message.contains("from stdin"), "{message}");
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
        assert_eq!(doc.render(), "a\nb\n");
    }

    #[test]
    fn process_apply_rejects_malformed_range() {
        let mut doc = document("A\nB\n");

        let err = doc.apply(vec![replace(2, 1, "x")]).unwrap_err();
        assert!(err.to_string().contains("Invalid line range 2:1"));
    }

    #[test]
    fn parse_operations_reports_parse_errors() {
        let err = parse_operations("- op: replace\n  start: one\n").unwrap_err();
        assert!(matches!(err, SpliceError::OperationParse(_)));
    }
}
