//! Starred contacts from a CSV export.
//!
//! Expected headers: `name,number,photo_uri,type,label,starred`. Only `type`
//! is required; it accepts a numeric provider code or a type name such as
//! `mobile` or `work fax`. Empty cells are treated as absent. When the export
//! has a `starred` column, only rows marked `1`, `true` or `yes` are kept;
//! without one every row counts as a favorite.

use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tap_model::{ContactSource, RawContact, SourceError};
use tap_phone::PhoneType;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

const TYPE_COLUMN: &str = "type";
const STARRED_COLUMN: &str = "starred";

/// CSV row structure for a contact export.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContactRow {
    name: Option<String>,
    number: Option<String>,
    photo_uri: Option<String>,
    #[serde(rename = "type")]
    phone_type: Option<String>,
    label: Option<String>,
    starred: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn is_starred(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
    })
}

/// Resolve a type cell to a provider code. Unknown numeric codes pass through
/// and classify as the generic label later.
fn parse_type_code(value: &str) -> Option<i32> {
    if let Ok(code) = value.parse::<i32>() {
        return Some(code);
    }
    value.parse::<PhoneType>().ok().map(|t| t.code())
}

/// Read starred contacts from an export file.
pub fn read_starred(path: &Path) -> Result<Vec<RawContact>> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| IngestError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    read_records(reader, path)
}

/// Read starred contacts from any reader. `origin` is only used in errors.
pub fn read_starred_from<R: io::Read>(input: R, origin: &Path) -> Result<Vec<RawContact>> {
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);
    read_records(reader, origin)
}

fn read_records<R: io::Read>(mut reader: csv::Reader<R>, origin: &Path) -> Result<Vec<RawContact>> {
    let csv_err = |source: csv::Error| IngestError::CsvRead {
        path: origin.to_path_buf(),
        source,
    };

    let headers = reader.headers().map_err(csv_err)?.clone();
    if !headers.iter().any(|h| h == TYPE_COLUMN) {
        return Err(IngestError::MissingColumn {
            column: TYPE_COLUMN,
            path: origin.to_path_buf(),
        });
    }
    let filter_starred = headers.iter().any(|h| h == STARRED_COLUMN);

    let mut contacts = Vec::new();
    let mut total = 0usize;
    let mut record = StringRecord::new();

    while reader.read_record(&mut record).map_err(csv_err)? {
        total += 1;
        let row: ContactRow = record.deserialize(Some(&headers)).map_err(csv_err)?;

        if filter_starred && !is_starred(row.starred.as_deref()) {
            continue;
        }

        let type_cell = row.phone_type.unwrap_or_default();
        let Some(type_code) = parse_type_code(&type_cell) else {
            return Err(IngestError::InvalidType {
                value: type_cell,
                line: record.position().map_or(0, csv::Position::line),
                path: origin.to_path_buf(),
            });
        };

        contacts.push(RawContact {
            name: non_empty(row.name),
            phone_number: non_empty(row.number),
            photo_uri: non_empty(row.photo_uri),
            type_code,
            custom_label: non_empty(row.label),
        });
    }

    debug!(rows = total, starred = contacts.len(), "read contact export");
    Ok(contacts)
}

/// [`ContactSource`] backed by a CSV export on disk.
#[derive(Debug, Clone)]
pub struct CsvContactSource {
    path: PathBuf,
}

impl CsvContactSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContactSource for CsvContactSource {
    fn fetch_starred(&self) -> std::result::Result<Vec<RawContact>, SourceError> {
        let contacts = read_starred(&self.path).map_err(|e| {
            let message = e.to_string();
            SourceError::query(message, e)
        })?;
        info!(count = contacts.len(), "loaded starred contacts from export");
        Ok(contacts)
    }
}
