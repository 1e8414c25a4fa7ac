// Service exports
pub mod cache;
pub mod csv_loader;
pub mod ingest;
pub mod source;
pub mod upstream;

pub use cache::{CacheError, CacheKey, Dataset, DatasetCache, LoadRecord};
pub use csv_loader::{parse_csv, CsvLoader};
pub use ingest::{ingest_rows, IngestError, IngestReport, RawHospitalRow};
pub use source::{HospitalSource, SourceError};
pub use upstream::{UpstreamClient, UpstreamError};
