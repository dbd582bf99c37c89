use crate::cli::{ApplyArgs, Cli, Command, DeleteArgs, OutputArgs, RangeArgs, ReplaceArgs};
use anyhow::{anyhow, Context};
use clap::Parser;
use line_splice_lib::error::SpliceError;
use line_splice_lib::range::LineRange;
use line_splice_lib::splicer::Wrapping;
use line_splice_lib::{parse_operations, SpliceReport, TextDocument};
use serde::Serialize;
use similar::TextDiff;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::Builder as TempFileBuilder;

pub fn run() -> anyhow::Result<()> {
    env_logger::init();

    let Cli {
        file,
        output,
        command,
    } = Cli::parse();

    validate_stdin_usage(&file, &command)?;

    let input_content = read_input(file.as_ref())?;

    match command {
        Command::Get(range) => process_get(&input_content, range),
        Command::Replace(args) => {
            let json = args.json;
            let mode = OutputMode::from(args.mode);
            let mut doc = TextDocument::from_str(&input_content)?;
            let (range, replacement, wrapping) = prepare_replace(args)?;
            let report = doc.splice(range, &replacement, &wrapping)?;
            let stream = finalize_output(mode, &output, &file, &input_content, doc.render())?;
            print_report(stream, json, &replace_summary(&report), &report)
        }
        Command::Delete(args) => {
            let DeleteArgs { range, mode, json } = args;
            let mut doc = TextDocument::from_str(&input_content)?;
            let report = doc.delete(line_range(range)?)?;
            let stream = finalize_output(
                OutputMode::from(mode),
                &output,
                &file,
                &input_content,
                doc.render(),
            )?;
            print_report(stream, json, &delete_summary(&report), &report)
        }
        Command::Apply(args) => {
            let json = args.json;
            let mode = OutputMode::from(args.mode);
            let stdin_available = file.is_some()
                && !args.operations_file.as_deref().is_some_and(is_stdin_marker);
            let operations = parse_operations(&read_operations(args)?)?;
            let mut doc = TextDocument::from_str(&input_content)?;
            let outcome = doc.apply_with_stdin(operations, stdin_available)?;
            let stream = finalize_output(mode, &output, &file, &input_content, doc.render())?;
            print_report(
                stream,
                json,
                &apply_summary(&outcome.reports),
                &outcome.reports,
            )
        }
    }
}

fn validate_stdin_usage(file: &Option<PathBuf>, command: &Command) -> anyhow::Result<()> {
    if file.is_some() {
        return Ok(());
    }

    let second_stdin_reader = match command {
        Command::Replace(args) => args.content_file.as_deref(),
        Command::Apply(args) => args.operations_file.as_deref(),
        Command::Delete(_) | Command::Get(_) => None,
    };

    if second_stdin_reader.is_some_and(is_stdin_marker) {
        return Err(SpliceError::AmbiguousStdinSource.into());
    }

    Ok(())
}

fn is_stdin_marker(path: &Path) -> bool {
    path.to_string_lossy() == "-"
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    if let Some(file_path) = path {
        fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read input file: {}", file_path.display()))
    } else {
        read_stdin()
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .with_context(|| "Failed to read from stdin")?;
    Ok(buf)
}

fn line_range(args: RangeArgs) -> anyhow::Result<LineRange> {
    Ok(LineRange::new(args.start, args.end)?)
}

fn prepare_replace(args: ReplaceArgs) -> anyhow::Result<(LineRange, String, Wrapping)> {
    let ReplaceArgs {
        range,
        content,
        content_file,
        indent,
        no_leading_newline,
        no_trailing_newline,
        mode: _,
        json: _,
    } = args;

    let range = line_range(range)?;

    let replacement = match (content, content_file) {
        (Some(inline), None) => inline,
        (None, Some(path)) if is_stdin_marker(&path) => read_stdin()?,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read content file: {}", path.display()))?,
        (Some(_), Some(_)) => return Err(SpliceError::AmbiguousContentSource.into()),
        (None, None) => return Err(SpliceError::NoContent.into()),
    };

    let wrapping = Wrapping {
        leading_newline: !no_leading_newline,
        indent,
        trailing_newline: !no_trailing_newline,
    };

    Ok((range, replacement, wrapping))
}

fn read_operations(args: ApplyArgs) -> anyhow::Result<String> {
    let ApplyArgs {
        operations_file,
        operations,
        ..
    } = args;

    match (operations_file, operations) {
        (Some(path), None) => {
            if is_stdin_marker(&path) {
                read_stdin()
            } else {
                fs::read_to_string(&path).with_context(|| {
                    format!("Failed to read operations file: {}", path.display())
                })
            }
        }
        (None, Some(inline)) => Ok(inline),
        (Some(_), Some(_)) => unreachable!("clap enforces mutual exclusivity"),
        (None, None) => Err(anyhow!(
            "Either --operations-file or --operations must be provided."
        )),
    }
}

fn process_get(content: &str, args: RangeArgs) -> anyhow::Result<()> {
    let doc = TextDocument::from_str(content)?;
    let span = doc.get(line_range(args)?)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(span.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Writes the edited document and returns the stream left free for the report.
fn finalize_output(
    mode: OutputMode,
    output_path: &Option<PathBuf>,
    input_path: &Option<PathBuf>,
    original_content: &str,
    rendered_content: String,
) -> anyhow::Result<ReportStream> {
    match mode {
        OutputMode::DryRun => {
            io::stdout().write_all(rendered_content.as_bytes())?;
            return Ok(ReportStream::Stderr);
        }
        OutputMode::Diff => {
            let diff_output = TextDiff::from_lines(original_content, &rendered_content)
                .unified_diff()
                .header("original", "modified")
                .to_string();

            io::stdout().write_all(diff_output.as_bytes())?;
            return Ok(ReportStream::Stderr);
        }
        OutputMode::Write => {}
    }

    if let Some(path) = output_path {
        fs::write(path, &rendered_content)
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        return Ok(ReportStream::Stdout);
    }

    let Some(input_path) = input_path else {
        io::stdout().write_all(rendered_content.as_bytes())?;
        return Ok(ReportStream::Stderr);
    };

    ensure_writable(input_path)?;

    let parent_dir = match input_path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => {
            return Err(anyhow!(
                "Could not determine parent directory of {}",
                input_path.display()
            ))
        }
    };

    let mut temp_file = TempFileBuilder::new()
        .prefix(".line-splice-")
        .suffix(".tmp")
        .tempfile_in(parent_dir)
        .with_context(|| {
            format!(
                "Failed to create temporary file in {}",
                parent_dir.display()
            )
        })?;

    temp_file
        .write_all(rendered_content.as_bytes())
        .with_context(|| "Failed to write to temporary file")?;

    let permissions = fs::metadata(input_path)?.permissions();
    temp_file
        .as_file()
        .set_permissions(permissions)
        .with_context(|| "Failed to copy permissions to temporary file")?;

    temp_file
        .persist(input_path)
        .with_context(|| format!("Failed to replace original file {}", input_path.display()))?;

    log::debug!(
        "Wrote {} byte(s) to {}",
        rendered_content.len(),
        input_path.display()
    );

    Ok(ReportStream::Stdout)
}

/// The temp-file rename only needs a writable directory, so the target's own
/// write permission is checked up front.
fn ensure_writable(path: &Path) -> anyhow::Result<()> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata of {}", path.display()))?;

    if metadata.permissions().readonly() {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("{} is read-only", path.display()),
        ))
        .with_context(|| format!("Refusing to modify {}", path.display()));
    }

    fs::OpenOptions::new()
        .write(true)
        .open(path)
        .with_context(|| format!("Cannot open {} for writing", path.display()))?;

    Ok(())
}

fn replace_summary(report: &SpliceReport) -> String {
    format!(
        "✅ Line range replaced successfully!\n   - Original span: {} lines\n   - New content: {} lines\n",
        report.removed, report.inserted
    )
}

fn delete_summary(report: &SpliceReport) -> String {
    format!(
        "✅ Line range deleted successfully!\n   - Removed span: {} lines\n",
        report.removed
    )
}

fn apply_summary(reports: &[SpliceReport]) -> String {
    let mut summary = format!(
        "✅ Applied {} operation(s) successfully!\n",
        reports.len()
    );
    for report in reports {
        summary.push_str(&format!(
            "   - Lines {}:{}: {} removed, {} inserted\n",
            report.start, report.end, report.removed, report.inserted
        ));
    }
    summary
}

fn print_report<T: Serialize + ?Sized>(
    stream: ReportStream,
    json: bool,
    summary: &str,
    payload: &T,
) -> anyhow::Result<()> {
    let rendered = if json {
        format!("{}\n", serde_json::to_string_pretty(payload)?)
    } else {
        summary.to_string()
    };

    match stream {
        ReportStream::Stdout => io::stdout().write_all(rendered.as_bytes())?,
        ReportStream::Stderr => io::stderr().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum OutputMode {
    Write,
    DryRun,
    Diff,
}

impl From<OutputArgs> for OutputMode {
    fn from(args: OutputArgs) -> Self {
        if args.diff {
            OutputMode::Diff
        } else if args.dry_run {
            OutputMode::DryRun
        } else {
            OutputMode::Write
        }
    }
}

/// Where the summary goes: whichever standard stream the document itself does not use.
#[derive(Clone, Copy)]
enum ReportStream {
    Stdout,
    Stderr,
}
