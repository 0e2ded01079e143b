use crate::app::ports::RecordExporterPort;
use crate::error::Result;
use crate::sanitizer::RecordSanitizer;
use crate::types::{ExportRecord, RawRecord};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Summary of a complete export run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub total_records: usize,
    pub clean_records: usize,
    pub error_records: usize,
    pub output: String,
}

/// Sanitizes crawled resolutions and appends every outcome to the exporter.
///
/// The surrounding crawl calls [`open`](Self::open) once, then
/// [`process_record`](Self::process_record) per page, then
/// [`close`](Self::close).
pub struct ResolutionPipeline<E: RecordExporterPort> {
    sanitizer: RecordSanitizer,
    exporter: E,
    clean_records: usize,
    error_records: usize,
}

impl<E: RecordExporterPort> ResolutionPipeline<E> {
    pub fn new(sanitizer: RecordSanitizer, exporter: E) -> Self {
        Self {
            sanitizer,
            exporter,
            clean_records: 0,
            error_records: 0,
        }
    }

    pub fn open(&mut self) -> Result<()> {
        info!("🚀 Opening export to {}", self.exporter.destination());
        self.exporter.start_exporting()
    }

    /// Export one record and hand the raw record back to the caller.
    ///
    /// Only export I/O can fail here; a malformed resolution is exported as
    /// an error record.
    #[instrument(skip(self, raw), fields(url = raw.url().unwrap_or("<missing>")))]
    pub fn process_record(&mut self, raw: RawRecord) -> Result<RawRecord> {
        let record = self.sanitizer.transform(&raw);
        self.exporter.export_record(&record)?;

        match record {
            ExportRecord::Clean(_) => {
                self.clean_records += 1;
                crate::metrics::record_clean();
            }
            ExportRecord::Error(_) => {
                self.error_records += 1;
                crate::metrics::record_error();
            }
        }

        let total = self.clean_records + self.error_records;
        if total % 100 == 0 {
            debug!("Exported {} records", total);
        }
        Ok(raw)
    }

    pub fn close(mut self) -> Result<PipelineSummary> {
        self.exporter.finish_exporting()?;
        let summary = self.summary();
        info!(
            "✅ Exported {} records ({} clean, {} deferred for review) to {}",
            summary.total_records, summary.clean_records, summary.error_records, summary.output
        );
        Ok(summary)
    }

    pub fn summary(&self) -> PipelineSummary {
        PipelineSummary {
            total_records: self.clean_records + self.error_records,
            clean_records: self.clean_records,
            error_records: self.error_records,
            output: self.exporter.destination(),
        }
    }

    /// Run a whole batch: open, process every record, close.
    ///
    /// Stops at the first error coming out of `records` or the exporter.
    pub fn run<I>(mut self, records: I) -> Result<PipelineSummary>
    where
        I: IntoIterator<Item = Result<RawRecord>>,
    {
        self.open()?;
        for raw in records {
            self.process_record(raw?)?;
        }
        self.close()
    }
}

/// Outcome of sanitizing a batch without exporting it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub records: Vec<ExportRecord>,
}

impl CheckReport {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Records that would be exported as error records.
    pub fn deferred(&self) -> impl Iterator<Item = &ExportRecord> {
        self.records.iter().filter(|r| r.is_error())
    }
}

/// Dry run: sanitize every record and collect the verdicts, writing nothing.
///
/// Stops at the first error coming out of `records`.
pub fn check_records<I>(sanitizer: &RecordSanitizer, records: I) -> Result<CheckReport>
where
    I: IntoIterator<Item = Result<RawRecord>>,
{
    let mut report = CheckReport::default();
    for raw in records {
        report.records.push(sanitizer.transform(&raw?));
    }
    Ok(report)
}
