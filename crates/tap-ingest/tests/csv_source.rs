use std::fs;
use std::path::{Path, PathBuf};

use tap_ingest::{CsvContactSource, IngestError, read_starred, read_starred_from};
use tap_model::{Contact, ContactSource, SourceError};
use tempfile::TempDir;

fn write_export(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("contacts.csv");
    fs::write(&path, contents).expect("write export");
    path
}

const EXPORT: &str = "\
name,number,photo_uri,type,label,starred
Ada,+1 (234) 567-8901,content://photos/1,2,,1
Grace,345 678 9012,,0,WhatsApp,true
Alan,+44 20 1234 5678,,work,,0
,020 1234 5678,,99,,yes
";

#[test]
fn reads_only_starred_rows() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_export(&dir, EXPORT);

    let contacts = read_starred(&path).expect("read export");
    assert_eq!(contacts.len(), 3);

    assert_eq!(contacts[0].name.as_deref(), Some("Ada"));
    assert_eq!(contacts[0].photo_uri.as_deref(), Some("content://photos/1"));
    assert_eq!(contacts[0].custom_label, None);

    assert_eq!(contacts[1].type_code, 0);
    assert_eq!(contacts[1].custom_label.as_deref(), Some("WhatsApp"));

    assert_eq!(contacts[2].name, None);
    assert_eq!(contacts[2].type_code, 99);
}

#[test]
fn rows_classify_into_contacts() {
    let contacts = read_starred_from(EXPORT.as_bytes(), Path::new("inline.csv")).expect("read");
    let built: Vec<Contact> = contacts.iter().map(Contact::from_raw).collect();

    let labels: Vec<&str> = built.iter().map(|c| c.phone_label.as_str()).collect();
    assert_eq!(labels, ["Mobile", "WhatsApp", "Phone"]);
    assert!(built[1].is_messaging_contact());
    assert_eq!(built[2].name, "Unknown");
    assert_eq!(built[0].normalized_key(), "2345678901");
}

#[test]
fn export_without_starred_column_keeps_every_row() {
    let csv = "name,number,type\nAda,2345678901,mobile\nGrace,3456789012,home\n";
    let contacts = read_starred_from(csv.as_bytes(), Path::new("plain.csv")).expect("read");
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[1].type_code, 1);
}

#[test]
fn invalid_type_reports_line() {
    let csv = "name,number,type,starred\nAda,2345678901,2,1\nGrace,3456789012,fax machine,1\n";
    let err = read_starred_from(csv.as_bytes(), Path::new("bad.csv")).expect_err("bad type");
    match err {
        IngestError::InvalidType { value, line, .. } => {
            assert_eq!(value, "fax machine");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_type_is_invalid() {
    let csv = "name,number,type\nAda,2345678901,\n";
    let err = read_starred_from(csv.as_bytes(), Path::new("empty.csv")).expect_err("empty type");
    assert!(matches!(err, IngestError::InvalidType { .. }));
}

#[test]
fn unstarred_rows_are_not_validated() {
    let csv = "name,number,type,starred\nAda,2345678901,bogus,0\n";
    let contacts = read_starred_from(csv.as_bytes(), Path::new("skip.csv")).expect("read");
    assert!(contacts.is_empty());
}

#[test]
fn missing_type_column_is_an_error() {
    let csv = "name,number\nAda,2345678901\n";
    let err = read_starred_from(csv.as_bytes(), Path::new("notype.csv")).expect_err("no type");
    assert!(matches!(
        err,
        IngestError::MissingColumn { column: "type", .. }
    ));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_starred(&dir.path().join("absent.csv")).expect_err("missing file");
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn source_wraps_ingest_errors() {
    let dir = TempDir::new().expect("temp dir");
    let source = CsvContactSource::new(dir.path().join("absent.csv"));
    let err = source.fetch_starred().expect_err("missing file");
    assert!(matches!(err, SourceError::Query { .. }));
    assert!(err.to_string().contains("contact export not found"));
}

#[test]
fn source_reads_export() {
    let dir = TempDir::new().expect("temp dir");
    let source = CsvContactSource::new(write_export(&dir, EXPORT));
    assert_eq!(source.fetch_starred().expect("fetch").len(), 3);
}
