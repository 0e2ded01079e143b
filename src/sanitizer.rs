use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::constants::{
    BODY_FIELD, DATE_FIELD, GOV_FIELD, RESOLUTION_NUMBER_FIELD, SUBJECT_FIELD, TITLE_FIELD,
};
use crate::error::{Multiplicity, ResolutionError};
use crate::patterns::Patterns;
use crate::types::{CleanRecord, ErrorRecord, ExportRecord, RawRecord};

type FieldResult<T> = std::result::Result<T, ResolutionError>;

/// Turns one crawled resolution into either a clean record or an error record.
///
/// Holds nothing but the shared compiled patterns, so a single sanitizer can be
/// reused (or cloned) for a whole batch.
#[derive(Debug, Clone)]
pub struct RecordSanitizer {
    patterns: Arc<Patterns>,
}

impl RecordSanitizer {
    pub fn new(patterns: Arc<Patterns>) -> Self {
        Self { patterns }
    }

    /// Sanitize a record. Never fails: a field that cannot be resolved yields
    /// an [`ErrorRecord`] carrying the first failure and the page url.
    #[instrument(skip(self, raw), fields(url = raw.url().unwrap_or("<missing>")))]
    pub fn transform(&self, raw: &RawRecord) -> ExportRecord {
        match self.sanitize(raw) {
            Ok(clean) => {
                debug!("Resolution {} sanitized", clean.resolution_number);
                ExportRecord::Clean(clean)
            }
            Err(e) => {
                warn!(field = e.field(), "Deferring resolution for manual review: {}", e);
                ExportRecord::Error(ErrorRecord {
                    error: e.to_string(),
                    url: raw.url().map(str::to_string),
                })
            }
        }
    }

    /// Run every field extractor in order, stopping at the first failure.
    pub fn sanitize(&self, raw: &RawRecord) -> FieldResult<CleanRecord> {
        let date = self.date(raw)?;
        let resolution_number = self.resolution_number(raw)?;
        let gov_number = self.gov_number(raw)?;
        let pm_name = self.pm_name(raw)?;
        let title = self.title(raw)?;
        let subject = self.subject(raw)?;
        let body = self.body(raw)?;

        Ok(CleanRecord {
            url: raw.url().unwrap_or_default().to_string(),
            date,
            resolution_number,
            gov_number,
            pm_name,
            title,
            subject,
            body,
        })
    }

    pub fn date(&self, raw: &RawRecord) -> FieldResult<i64> {
        let value = exactly_one(raw, DATE_FIELD)?;
        let day = self
            .patterns
            .date
            .parse(value)
            .map_err(|_| mismatch(raw, DATE_FIELD, value))?;
        Ok(day.and_time(chrono::NaiveTime::MIN).and_utc().timestamp())
    }

    pub fn resolution_number(&self, raw: &RawRecord) -> FieldResult<String> {
        let value = exactly_one(raw, RESOLUTION_NUMBER_FIELD)?;
        self.patterns
            .resolution_number
            .parse(value)
            .map(str::to_string)
            .map_err(|_| mismatch(raw, RESOLUTION_NUMBER_FIELD, value))
    }

    // gov_number and pm_name each parse the gov line on their own so every
    // extractor fails the same way.
    pub fn gov_number(&self, raw: &RawRecord) -> FieldResult<String> {
        let value = exactly_one(raw, GOV_FIELD)?;
        self.patterns
            .government
            .parse(value)
            .map(|gov| gov.gov_number.to_string())
            .map_err(|_| mismatch(raw, GOV_FIELD, value))
    }

    pub fn pm_name(&self, raw: &RawRecord) -> FieldResult<String> {
        let value = exactly_one(raw, GOV_FIELD)?;
        self.patterns
            .government
            .parse(value)
            .map(|gov| gov.pm_name.to_string())
            .map_err(|_| mismatch(raw, GOV_FIELD, value))
    }

    pub fn title(&self, raw: &RawRecord) -> FieldResult<String> {
        joined_text(raw, TITLE_FIELD)
    }

    pub fn subject(&self, raw: &RawRecord) -> FieldResult<String> {
        joined_text(raw, SUBJECT_FIELD)
    }

    /// Body lines are passed through untouched.
    pub fn body(&self, raw: &RawRecord) -> FieldResult<Vec<String>> {
        Ok(at_least_one(raw, BODY_FIELD)?.to_vec())
    }
}

impl Default for RecordSanitizer {
    fn default() -> Self {
        Self::new(Patterns::shared())
    }
}

fn exactly_one<'a>(raw: &'a RawRecord, field: &'static str) -> FieldResult<&'a str> {
    match raw.values(field) {
        [value] => Ok(value.as_str()),
        values => Err(ResolutionError::Multiplicity {
            field,
            expected: Multiplicity::ExactlyOne,
            found: values.len(),
            url: raw.url().map(str::to_string),
        }),
    }
}

fn at_least_one<'a>(raw: &'a RawRecord, field: &'static str) -> FieldResult<&'a [String]> {
    let values = raw.values(field);
    if values.is_empty() {
        return Err(ResolutionError::Multiplicity {
            field,
            expected: Multiplicity::AtLeastOne,
            found: 0,
            url: raw.url().map(str::to_string),
        });
    }
    Ok(values)
}

fn joined_text(raw: &RawRecord, field: &'static str) -> FieldResult<String> {
    Ok(at_least_one(raw, field)?.join("\n").trim().to_string())
}

fn mismatch(raw: &RawRecord, field: &'static str, value: &str) -> ResolutionError {
    ResolutionError::PatternMismatch {
        field,
        value: value.to_string(),
        url: raw.url().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.gov.il/he/Departments/policies/dec14R.aspx";

    fn create_test_record() -> RawRecord {
        RawRecord::new()
            .with_field("url", [URL])
            .with_field("date", ["20141230"])
            .with_field("resolution_number", ["dec14R.aspx"])
            .with_field("gov", ["ממשלה/הממשלה ה - 34 בנימין נתניהו;"])
            .with_field("title", ["  הקמת ועדה  ", "לבחינת הנושא"])
            .with_field("subject", ["\tמינויים\n"])
            .with_field("body", ["<p>מחליטים:</p>", "  1. לאשר  "])
    }

    fn expect_error(record: ExportRecord) -> ErrorRecord {
        match record {
            ExportRecord::Error(error) => error,
            ExportRecord::Clean(clean) => panic!("expected error record, got {clean:?}"),
        }
    }

    #[test]
    fn test_well_formed_record_is_clean() {
        let sanitizer = RecordSanitizer::default();
        let record = sanitizer.transform(&create_test_record());

        let ExportRecord::Clean(clean) = record else {
            panic!("expected clean record");
        };
        assert_eq!(clean.url, URL);
        assert_eq!(clean.date, 1_419_897_600);
        assert_eq!(clean.resolution_number, "14R");
        assert_eq!(clean.gov_number, "34");
        assert_eq!(clean.pm_name, "בנימין נתניהו");
        assert_eq!(clean.title, "הקמת ועדה  \nלבחינת הנושא");
        assert_eq!(clean.subject, "מינויים");
        assert_eq!(clean.body, vec!["<p>מחליטים:</p>", "  1. לאשר  "]);
    }

    #[test]
    fn test_title_strips_outer_whitespace_only() {
        let sanitizer = RecordSanitizer::default();
        let raw = create_test_record().with_field("title", ["  a  ", "b"]);
        assert_eq!(sanitizer.title(&raw).unwrap(), "a  \nb");
    }

    #[test]
    fn test_empty_title_is_deferred_with_url() {
        let sanitizer = RecordSanitizer::default();
        let raw = create_test_record().with_field("title", Vec::<String>::new());

        let error = expect_error(sanitizer.transform(&raw));
        assert!(error.error.contains("title"));
        assert!(error.error.contains(URL));
        assert_eq!(error.url.as_deref(), Some(URL));
    }

    #[test]
    fn test_two_dates_are_rejected() {
        let sanitizer = RecordSanitizer::default();
        let raw = create_test_record().with_field("date", ["20141230", "20150101"]);

        let error = expect_error(sanitizer.transform(&raw));
        assert!(error.error.starts_with("date field has 2 values"));
    }

    #[test]
    fn test_first_failure_wins() {
        let sanitizer = RecordSanitizer::default();
        let raw = create_test_record()
            .with_field("resolution_number", ["14R"])
            .with_field("body", Vec::<String>::new());

        let err = sanitizer.sanitize(&raw).unwrap_err();
        assert_eq!(err.field(), "resolution_number");
        assert!(matches!(err, ResolutionError::PatternMismatch { .. }));
    }

    #[test]
    fn test_missing_gov_fails_before_title() {
        let sanitizer = RecordSanitizer::default();
        let mut raw = create_test_record();
        raw.set("gov", Vec::<String>::new());
        raw.set("title", Vec::<String>::new());

        let err = sanitizer.sanitize(&raw).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::Multiplicity {
                field: "gov",
                expected: Multiplicity::ExactlyOne,
                found: 0,
                url: Some(URL.to_string()),
            }
        );
    }

    #[test]
    fn test_missing_url_still_produces_error_record() {
        let sanitizer = RecordSanitizer::default();
        let raw = RawRecord::new().with_field("date", ["not a date"]);

        let error = expect_error(sanitizer.transform(&raw));
        assert_eq!(error.url, None);
        assert_eq!(
            error.error,
            "date field value 'not a date' does not match the expected pattern"
        );
    }

    #[test]
    fn test_transform_is_idempotent() {
        let sanitizer = RecordSanitizer::default();
        let good = create_test_record();
        let bad = create_test_record().with_field("subject", Vec::<String>::new());

        assert_eq!(sanitizer.transform(&good), sanitizer.transform(&good));
        assert_eq!(sanitizer.transform(&bad), sanitizer.transform(&bad));
    }

    #[test]
    fn test_sanitizers_share_patterns() {
        let patterns = Patterns::shared();
        let first = RecordSanitizer::new(Arc::clone(&patterns));
        let second = first.clone();
        assert_eq!(Arc::strong_count(&patterns), 3);
        assert_eq!(
            first.transform(&create_test_record()),
            second.transform(&create_test_record())
        );
    }
}
