use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::constants::URL_FIELD;

/// Raw resolution data as yielded by the upstream crawler.
///
/// Every field is an ordered list of the strings extracted for it. Fields may
/// be absent, and how many values a field holds is part of what gets validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    #[serde(deserialize_with = "deserialize_fields")]
    fields: HashMap<String, Vec<String>>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly useful for tests and the CLI.
    pub fn with_field<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(name, values);
        self
    }

    pub fn set<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .insert(name.to_string(), values.into_iter().map(Into::into).collect());
    }

    /// Values for `name`; a missing field reads as empty.
    pub fn values(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Best-effort url of the crawled page.
    pub fn url(&self) -> Option<&str> {
        self.values(URL_FIELD).first().map(String::as_str)
    }
}

// Crawlers emit the url as a plain string and everything else as lists.
fn deserialize_fields<'de, D>(deserializer: D) -> Result<HashMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    let raw: HashMap<String, OneOrMany> = HashMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| {
            let values = match value {
                OneOrMany::One(s) => vec![s],
                OneOrMany::Many(v) => v,
            };
            (name, values)
        })
        .collect())
}

/// A resolution whose every field passed sanitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub url: String,
    /// Unix timestamp of the resolution date at midnight UTC.
    pub date: i64,
    pub resolution_number: String,
    pub gov_number: String,
    pub pm_name: String,
    pub title: String,
    pub subject: String,
    /// Lines exactly as crawled; markup and tables are handled downstream.
    pub body: Vec<String>,
}

/// A resolution deferred for manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
}

/// One line of the export stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportRecord {
    Clean(CleanRecord),
    Error(ErrorRecord),
}

impl ExportRecord {
    pub fn is_error(&self) -> bool {
        matches!(self, ExportRecord::Error(_))
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ExportRecord::Clean(record) => Some(record.url.as_str()),
            ExportRecord::Error(record) => record.url.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_record_accepts_scalar_url_and_lists() {
        let raw: RawRecord = serde_json::from_value(json!({
            "url": "https://www.gov.il/dec14R.aspx",
            "title": ["first", "second"],
        }))
        .unwrap();

        assert_eq!(raw.url(), Some("https://www.gov.il/dec14R.aspx"));
        assert_eq!(raw.values("title"), ["first", "second"]);
        assert!(raw.values("body").is_empty());
    }

    #[test]
    fn test_raw_record_rejects_non_string_values() {
        let result: std::result::Result<RawRecord, _> =
            serde_json::from_value(json!({ "date": [20141230] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_error_record_omits_missing_url() {
        let record = ExportRecord::Error(ErrorRecord {
            error: "date field has 0 values, expected exactly 1".to_string(),
            url: None,
        });
        let line = serde_json::to_string(&record).unwrap();
        assert_eq!(line, r#"{"error":"date field has 0 values, expected exactly 1"}"#);
    }

    #[test]
    fn test_export_record_deserializes_either_shape() {
        let clean: ExportRecord = serde_json::from_value(json!({
            "url": "u",
            "date": 0,
            "resolution_number": "1",
            "gov_number": "34",
            "pm_name": "pm",
            "title": "t",
            "subject": "s",
            "body": ["b"],
        }))
        .unwrap();
        assert!(!clean.is_error());

        let error: ExportRecord =
            serde_json::from_value(json!({ "error": "boom", "url": "u" })).unwrap();
        assert!(error.is_error());
        assert_eq!(error.url(), Some("u"));
    }
}
