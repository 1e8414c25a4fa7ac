use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::models::{Coordinate, HospitalRecord};

/// Errors that can occur while decoding hospital rows
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing field {field} for hospital {name:?}")]
    MissingField { name: String, field: &'static str },

    #[error("Invalid value {value:?} in field {field} for hospital {name:?}")]
    InvalidValue { name: String, field: &'static str, value: String },

    #[error("Invalid coordinate ({latitude}, {longitude}) for hospital {name:?}")]
    InvalidCoordinate { name: String, latitude: f64, longitude: f64 },
}

/// One row of the hospital dataset, as found in the CSV file or the upstream API
///
/// Every column is kept as the raw cell text so a bad cell only rejects its
/// own row. The source data carries both `LATITUDE`/`LONGITUDE` and the GIS
/// `Y`/`X` pair; the named columns win when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHospitalRow {
    #[serde(rename = "NAME", default, deserialize_with = "trimmed_text")]
    pub name: Option<String>,
    #[serde(rename = "LATITUDE", default, deserialize_with = "trimmed_text")]
    pub latitude: Option<String>,
    #[serde(rename = "LONGITUDE", default, deserialize_with = "trimmed_text")]
    pub longitude: Option<String>,
    #[serde(rename = "Y", default, deserialize_with = "trimmed_text")]
    pub y: Option<String>,
    #[serde(rename = "X", default, deserialize_with = "trimmed_text")]
    pub x: Option<String>,
    #[serde(rename = "WEBSITE", default, deserialize_with = "trimmed_text")]
    pub website: Option<String>,
    #[serde(rename = "Suggestive_Factor", default, deserialize_with = "trimmed_text")]
    pub suggestive_factor: Option<String>,
    #[serde(rename = "BEDS", default, deserialize_with = "trimmed_text")]
    pub beds: Option<String>,
    #[serde(rename = "Patie", default, deserialize_with = "trimmed_text")]
    pub patients: Option<String>,
    #[serde(rename = "STAFF", default, deserialize_with = "trimmed_text")]
    pub staff: Option<String>,
    #[serde(rename = "TRAUMA", default, deserialize_with = "trimmed_text")]
    pub trauma: Option<String>,
    #[serde(rename = "HELIPAD", default, deserialize_with = "trimmed_text")]
    pub helipad: Option<String>,
}

impl RawHospitalRow {
    /// Decode one upstream JSON document
    ///
    /// The upstream sends cells as strings or numbers; scalars are turned into
    /// their text form first so both decode the same way as a CSV cell.
    pub fn from_json(document: &serde_json::Value) -> Result<Self, serde_json::Error> {
        let cells = match document {
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(column, value)| (column.clone(), cell_text(value)))
                .collect::<serde_json::Map<_, _>>(),
            other => return serde_json::from_value(other.clone()),
        };

        serde_json::from_value(serde_json::Value::Object(cells))
    }

    /// Decode the row into a record, rejecting it when the coordinate or
    /// suggestive factor is unusable
    pub fn into_record(self) -> Result<HospitalRecord, IngestError> {
        let name = self
            .name
            .ok_or(IngestError::MissingField { name: String::new(), field: "NAME" })?;

        let (lat_field, lat_text) = match self.latitude {
            Some(text) => ("LATITUDE", Some(text)),
            None => ("Y", self.y),
        };
        let (lng_field, lng_text) = match self.longitude {
            Some(text) => ("LONGITUDE", Some(text)),
            None => ("X", self.x),
        };

        let latitude = required_float(&name, lat_field, lat_text.as_deref())?;
        let longitude = required_float(&name, lng_field, lng_text.as_deref())?;
        if !Coordinate::new(latitude, longitude).is_valid() {
            return Err(IngestError::InvalidCoordinate { name, latitude, longitude });
        }

        let suggestive_factor = required_float(&name, "Suggestive_Factor", self.suggestive_factor.as_deref())?;

        Ok(HospitalRecord {
            website: self.website.unwrap_or_default(),
            beds: parse_count(self.beds.as_deref()),
            patients: parse_count(self.patients.as_deref()),
            staff: parse_count(self.staff.as_deref()),
            trauma: self.trauma.as_deref().and_then(|t| t.parse::<f64>().ok()).filter(|t| t.is_finite()),
            helipad: parse_count(self.helipad.as_deref()),
            ..HospitalRecord::new(name, latitude, longitude, suggestive_factor)
        })
    }
}

/// Outcome of decoding a batch of rows
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub hospitals: Vec<HospitalRecord>,
    pub skipped: usize,
}

/// Decode rows, dropping (and logging) the ones that cannot be used
pub fn ingest_rows<I>(rows: I) -> IngestReport
where
    I: IntoIterator<Item = RawHospitalRow>,
{
    let mut report = IngestReport::default();

    for row in rows {
        match row.into_record() {
            Ok(hospital) => report.hospitals.push(hospital),
            Err(e) => {
                tracing::warn!("Skipping hospital row: {}", e);
                report.skipped += 1;
            }
        }
    }

    tracing::debug!("Ingested {} hospitals, skipped {}", report.hospitals.len(), report.skipped);
    report
}

fn required_float(name: &str, field: &'static str, value: Option<&str>) -> Result<f64, IngestError> {
    let text = value.ok_or_else(|| IngestError::MissingField { name: name.to_string(), field })?;

    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| IngestError::InvalidValue {
            name: name.to_string(),
            field,
            value: text.to_string(),
        })
}

/// Parse a non-negative count; fractional text is truncated
fn parse_count(value: Option<&str>) -> Option<u32> {
    let text = value?;
    text.parse::<u32>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| v.trunc() as u32)
    })
}

fn cell_text(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Number(n) => serde_json::Value::String(n.to_string()),
        serde_json::Value::Bool(b) => serde_json::Value::String(b.to_string()),
        other => other.clone(),
    }
}

/// Cell text with surrounding whitespace removed; empty cells become `None`
fn trimmed_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;

    Ok(text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty()))
}
