use crate::error::Result;
use crate::types::ExportRecord;

/// Destination for sanitized records.
///
/// Opened once before the first record and finished once after the last;
/// records must come out in the order they were exported.
pub trait RecordExporterPort {
    fn start_exporting(&mut self) -> Result<()>;

    fn export_record(&mut self, record: &ExportRecord) -> Result<()>;

    fn finish_exporting(&mut self) -> Result<()>;

    /// Where the records end up, for reporting.
    fn destination(&self) -> String;
}
