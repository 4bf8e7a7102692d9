//! The analysis record: the one entity this system persists.
//!
//! Field names are snake_case inside the workspace. The spaced keys the
//! model is asked to produce (`"Company Name"`, ...) exist only at the two
//! wire boundaries: parsing the model's answer and rendering `/results`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// `strftime` pattern for the `Timestamp` key in listings.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The four model-supplied fields of an analysis, before it is stored.
///
/// Deserializes from the model's JSON answer. Every key is required and must
/// be a string; values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnalysis {
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Verdict")]
    pub verdict: String,
    #[serde(rename = "Date")]
    pub date: String,
}

/// A stored analysis. Append-only: never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRecord {
    #[serde(skip)]
    pub id: i64,
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Verdict")]
    pub verdict: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Timestamp", serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// `created_at` rendered as `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

fn serialize_timestamp<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
}
