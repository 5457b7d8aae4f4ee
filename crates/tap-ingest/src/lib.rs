//! Contact export ingestion.

pub mod csv_source;
pub mod error;

pub use csv_source::{CsvContactSource, read_starred, read_starred_from};
pub use error::{IngestError, Result};
