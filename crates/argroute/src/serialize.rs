//! Structured serialization of the command listing.
//!
//! Handles JSON, YAML, XML, and CSV output. These bypass the text layout
//! entirely.

use crate::listing::{CommandListing, ListingRow};
use crate::ListFormat;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during serialization.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("CSV serialization failed: {0}")]
    Csv(String),

    #[error("Not a structured list format")]
    NotStructured,
}

/// Serializes the listing to the specified structured format.
///
/// Returns an error if the format is [`ListFormat::Text`].
pub fn serialize_listing(
    listing: &CommandListing,
    format: ListFormat,
) -> Result<String, SerializeError> {
    match format {
        ListFormat::Json => to_json(listing),
        ListFormat::Yaml => to_yaml(listing),
        ListFormat::Xml => to_xml(listing),
        ListFormat::Csv => to_csv(&listing.rows()),
        ListFormat::Text => Err(SerializeError::NotStructured),
    }
}

/// Serializes data to JSON format.
pub fn to_json<T: Serialize>(data: &T) -> Result<String, SerializeError> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Serializes data to YAML format.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String, SerializeError> {
    Ok(serde_yaml::to_string(data)?)
}

/// Serializes data to XML format.
pub fn to_xml<T: Serialize>(data: &T) -> Result<String, SerializeError> {
    Ok(quick_xml::se::to_string(data)?)
}

/// Serializes listing rows to CSV, one record per row with a header line.
pub fn to_csv(rows: &[ListingRow]) -> Result<String, SerializeError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    wtr.write_record(ListingRow::HEADERS)
        .map_err(|e| SerializeError::Csv(e.to_string()))?;
    for row in rows {
        wtr.write_record(row.fields())
            .map_err(|e| SerializeError::Csv(e.to_string()))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| SerializeError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SerializeError::Csv(e.to_string()))
}
