use std::io::Read;
use std::path::{Path, PathBuf};

use crate::services::ingest::{ingest_rows, IngestError, IngestReport, RawHospitalRow};

/// Loads the hospital dataset from a CSV file with a header row
#[derive(Debug, Clone)]
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the whole file
    pub fn load(&self) -> Result<IngestReport, IngestError> {
        tracing::debug!("Loading hospitals from {}", self.path.display());
        let file = std::fs::File::open(&self.path)?;
        parse_csv(file)
    }
}

/// Decode hospital rows from any CSV reader
///
/// A malformed CSV structure fails the whole load; rows with unusable values
/// are skipped and counted in the report.
pub fn parse_csv<R: Read>(reader: R) -> Result<IngestReport, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let rows = rdr
        .deserialize::<RawHospitalRow>()
        .collect::<Result<Vec<_>, csv::Error>>()?;

    Ok(ingest_rows(rows))
}
