//! Transcript documents and quarter lookup.

use crate::error::{LocatorError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

/// A single call transcript.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Transcript {
    /// Label identifying the transcript, e.g. "Q3 2025"
    pub quarter: String,

    /// Full text body
    pub transcript: String,
}

/// The input document: an ordered list of transcripts.
///
/// Quarter labels are expected to be unique. When they are not, lookups
/// return the first transcript carrying the label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranscriptCollection {
    pub transcripts: Vec<Transcript>,
}

impl TranscriptCollection {
    /// Parse a collection from a JSON string.
    ///
    /// The document and every transcript entry must be JSON objects.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Err(LocatorError::InvalidInput(
                "input document is empty".to_string(),
            ));
        }
        let document: Value = serde_json::from_str(json)?;
        check_shape(&document)?;
        Ok(serde_json::from_value(document)?)
    }

    /// Read a JSON collection to completion from `reader`.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json(&json)
    }

    /// Find the first transcript whose quarter equals `quarter` exactly.
    pub fn find(&self, quarter: &str) -> Result<&Transcript> {
        let found = self.transcripts.iter().find(|t| t.quarter == quarter);
        tracing::debug!(quarter, found = found.is_some(), "transcript lookup");
        found.ok_or_else(|| LocatorError::NotFound {
            quarter: quarter.to_string(),
            available: self.quarters().map(str::to_string).collect(),
        })
    }

    /// Quarter labels in document order.
    pub fn quarters(&self) -> impl Iterator<Item = &str> {
        self.transcripts.iter().map(|t| t.quarter.as_str())
    }
}

fn check_shape(document: &Value) -> Result<()> {
    let Some(fields) = document.as_object() else {
        return Err(LocatorError::InvalidInput(
            "input document must be an object with a `transcripts` field".to_string(),
        ));
    };
    let Some(transcripts) = fields.get("transcripts") else {
        return Err(LocatorError::InvalidInput(
            "input document has no `transcripts` field".to_string(),
        ));
    };
    let Some(entries) = transcripts.as_array() else {
        return Err(LocatorError::InvalidInput(
            "`transcripts` must be an array".to_string(),
        ));
    };
    if let Some(index) = entries.iter().position(|entry| !entry.is_object()) {
        return Err(LocatorError::InvalidInput(format!(
            "transcript entry {index} is not an object"
        )));
    }
    Ok(())
}
