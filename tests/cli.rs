//! Command-line behaviour: exit codes, messages, output files

mod common;

use assert_cmd::Command;
use common::{overlay_contents, page_ids, page_markers, write_labelled_pdf};
use lopdf::Document;
use predicates::prelude::*;
use tempfile::TempDir;

fn pdfextract() -> Command {
    Command::cargo_bin("pdfextract").expect("binary exists")
}

#[test]
fn help_displays_usage() {
    pdfextract()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("watermark"));
}

#[test]
fn operation_is_required() {
    pdfextract().assert().failure();
}

#[test]
fn extract_writes_destination() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_labelled_pdf(temp_dir.path(), "doc", 4);
    let output = temp_dir.path().join("out.pdf");

    pdfextract()
        .arg("extract")
        .arg(format!("{}[4,1]", source.display()))
        .arg("--destination")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 2 page(s)"));

    assert_eq!(page_markers(&output), vec!["doc-4", "doc-1"]);
}

#[test]
fn invalid_selector_fails() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_labelled_pdf(temp_dir.path(), "doc", 4);
    let output = temp_dir.path().join("out.pdf");

    pdfextract()
        .arg("-d")
        .arg(&output)
        .arg("extract")
        .arg(format!("{}[0]", source.display()))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid page selector '0'"));

    assert!(!output.exists());
}

#[test]
fn page_out_of_range_fails() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_labelled_pdf(temp_dir.path(), "doc", 2);
    let output = temp_dir.path().join("out.pdf");

    pdfextract()
        .arg("extract")
        .arg(format!("{}[1-3]", source.display()))
        .arg("-d")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("requested page 3"));

    assert!(!output.exists());
}

#[test]
fn merge_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_labelled_pdf(temp_dir.path(), "A", 2);
    let b = write_labelled_pdf(temp_dir.path(), "B", 2);
    let output = temp_dir.path().join("merged.pdf");

    pdfextract()
        .arg("merge")
        .arg(format!("{}[2]", b.display()))
        .arg(&a)
        .arg("-d")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(page_markers(&output), vec!["B-2", "A-1", "A-2"]);
}

#[test]
fn merge_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_labelled_pdf(temp_dir.path(), "A", 1);
    let output = temp_dir.path().join("merged.pdf");

    pdfextract()
        .arg("merge")
        .arg(&a)
        .arg(temp_dir.path().join("missing.pdf"))
        .arg("-d")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));

    assert!(!output.exists());
}

#[test]
fn watermark_text_in_either_position() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_labelled_pdf(temp_dir.path(), "doc", 2);

    for (first, second) in [
        (source.display().to_string(), "SECRET".to_string()),
        ("SECRET".to_string(), source.display().to_string()),
    ] {
        let output = temp_dir.path().join("stamped.pdf");
        pdfextract()
            .args(["watermark", first.as_str(), second.as_str()])
            .arg("-d")
            .arg(&output)
            .assert()
            .success();

        let doc = Document::load(&output).unwrap();
        let ids = page_ids(&doc);
        assert_eq!(ids.len(), 2);
        assert!(overlay_contents(&doc, ids[0])[0].contains("(SECRET) Tj"));
    }
}

#[test]
fn watermark_two_existing_files_is_ambiguous() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_labelled_pdf(temp_dir.path(), "A", 1);
    let b = write_labelled_pdf(temp_dir.path(), "B", 1);
    let output = temp_dir.path().join("out.pdf");

    pdfextract()
        .arg("watermark")
        .arg(&a)
        .arg(&b)
        .arg("-d")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("both"));

    assert!(!output.exists());
}

#[test]
fn watermark_with_source_document() {
    let temp_dir = TempDir::new().unwrap();
    let target = write_labelled_pdf(temp_dir.path(), "doc", 3);
    let stamp = write_labelled_pdf(temp_dir.path(), "letterhead", 2);
    let output = temp_dir.path().join("out.pdf");

    pdfextract()
        .arg("watermark")
        .arg(&target)
        .arg("--source")
        .arg(&stamp)
        .arg("-d")
        .arg(&output)
        .assert()
        .success();

    let doc = Document::load(&output).unwrap();
    for id in page_ids(&doc) {
        assert!(overlay_contents(&doc, id)[0].contains("(letterhead-1)"));
    }
}

#[test]
fn log_levels_are_mutually_exclusive() {
    pdfextract()
        .args(["--info-log", "--debug-log", "extract", "x.pdf"])
        .assert()
        .failure();
}

#[test]
fn info_log_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_labelled_pdf(temp_dir.path(), "doc", 2);
    let output = temp_dir.path().join("out.pdf");
    let log = temp_dir.path().join("run.log");

    pdfextract()
        .arg(format!("--info-log={}", log.display()))
        .arg("extract")
        .arg(&source)
        .arg("-d")
        .arg(&output)
        .assert()
        .success();

    let logged = std::fs::read_to_string(&log).unwrap();
    assert!(logged.contains("Extract pages procedure starts"), "{}", logged);
    assert!(logged.contains("Extracting the whole file"), "{}", logged);
    assert!(logged.contains("Writing output to"), "{}", logged);
}

#[test]
fn repeated_short_log_flag_sets_level() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_labelled_pdf(temp_dir.path(), "doc", 2);
    let output = temp_dir.path().join("out.pdf");

    pdfextract()
        .arg("-lll")
        .arg("extract")
        .arg(&source)
        .arg("-d")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Extract pages procedure starts"));

    pdfextract()
        .arg("-l")
        .arg("extract")
        .arg(&source)
        .arg("-d")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Extracting the whole file").not());
}

#[test]
fn short_log_flag_conflicts_with_long_ones() {
    pdfextract()
        .args(["-ll", "--debug-log", "extract", "x.pdf"])
        .assert()
        .failure();
}
