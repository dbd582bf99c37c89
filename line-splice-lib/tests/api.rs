use assert_fs::prelude::*;
use line_splice_lib::error::SpliceError;
use line_splice_lib::range::LineRange;
use line_splice_lib::splicer::Wrapping;
use line_splice_lib::transaction::{Operation, ReplaceOperation};
use line_splice_lib::{parse_operations, splice_file, TextDocument};
use std::str::FromStr;

#[test]
fn load_document_from_string_and_render() {
    let content = "fn main() {\r\n    println!(\"hi\");\r\n}";
    let doc = TextDocument::from_str(content).expect("document loads");
    assert_eq!(doc.line_count(), 3);
    assert_eq!(doc.render(), content);
}

#[test]
fn splice_file_replaces_range_and_reports_counts() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("SalesComparisonTab.jsx");
    target.write_str("A\nB\nC\nD\nE\n").unwrap();
    let replacement = temp.child("temp-detailed-tab.txt");
    replacement.write_str("X\nY").unwrap();

    let report = splice_file(
        target.path(),
        replacement.path(),
        LineRange::new(2, 4).unwrap(),
        &Wrapping::default(),
    )
    .expect("splice succeeds");

    target.assert("A\n\n        X\nY\nE\n");
    assert_eq!(report.removed, 3);
    assert_eq!(report.inserted, 2);
}

#[test]
fn splice_file_over_whole_document_keeps_only_wrapped_replacement() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("target.txt");
    target.write_str("one\ntwo\nthree\n").unwrap();
    let replacement = temp.child("new.txt");
    replacement.write_str("fresh").unwrap();

    splice_file(
        target.path(),
        replacement.path(),
        LineRange::new(1, 3).unwrap(),
        &Wrapping::default(),
    )
    .unwrap();

    target.assert("\n        fresh\n");
}

#[test]
fn missing_replacement_aborts_before_writing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("target.txt");
    let original = "keep\nme\nintact\n";
    target.write_str(original).unwrap();

    let err = splice_file(
        target.path(),
        temp.child("missing.txt").path(),
        LineRange::new(1, 2).unwrap(),
        &Wrapping::default(),
    )
    .unwrap_err();

    match err {
        SpliceError::Io(message) => assert!(message.contains("replacement file"), "{message}"),
        other => panic!("unexpected error variant: {other:?}"),
    }
    target.assert(original);
}

#[test]
fn missing_target_is_an_io_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let replacement = temp.child("new.txt");
    replacement.write_str("x").unwrap();

    let err = splice_file(
        temp.child("absent.txt").path(),
        replacement.path(),
        LineRange::new(1, 1).unwrap(),
        &Wrapping::default(),
    )
    .unwrap_err();

    assert!(matches!(err, SpliceError::Io(ref message) if message.contains("target file")));
    temp.child("absent.txt").assert(predicates::path::missing());
}

#[test]
fn out_of_range_end_is_reported_and_target_unchanged() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("target.txt");
    target.write_str("A\nB\nC\n").unwrap();
    let replacement = temp.child("new.txt");
    replacement.write_str("X").unwrap();

    let err = splice_file(
        target.path(),
        replacement.path(),
        LineRange::new(2, 3374).unwrap(),
        &Wrapping::default(),
    )
    .unwrap_err();

    insta::assert_snapshot!(
        err.to_string(),
        @"Line range ends at line 3374, but the document only has 3 line(s)."
    );
    target.assert("A\nB\nC\n");
}

#[test]
fn apply_manifest_with_content_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let block = temp.child("block.txt");
    block.write_str("<Tab />").unwrap();

    let manifest = serde_json::json!([
        {
            "op": "replace",
            "start": 2,
            "end": 3,
            "content_file": block.path(),
            "indent": 4
        }
    ])
    .to_string();

    let mut doc = TextDocument::from_str("<div>\n  old\n  old\n</div>\n").unwrap();
    let operations = parse_operations(&manifest).expect("manifest parses");
    assert!(matches!(
        &operations[0],
        Operation::Replace(ReplaceOperation { indent: 4, .. })
    ));

    let outcome = doc.apply(operations).expect("apply succeeds");

    assert_eq!(doc.render(), "<div>\n\n    <Tab />\n</div>\n");
    assert_eq!(outcome.reports[0].removed, 2);
    assert_eq!(outcome.reports[0].inserted, 1);
}
