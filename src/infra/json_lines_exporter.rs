use crate::app::ports::RecordExporterPort;
use crate::error::{Result, ScraperError};
use crate::types::ExportRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportState {
    Idle,
    Exporting,
    Finished,
}

/// Writes one JSON object per line.
///
/// serde_json leaves non-ASCII characters unescaped, so Hebrew text lands in
/// the file as-is.
pub struct JsonLinesExporter<W: Write> {
    writer: W,
    destination: String,
    state: ExportState,
    records_written: usize,
}

impl JsonLinesExporter<BufWriter<File>> {
    /// Create (or truncate) the export file, creating parent directories.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        info!("Creating export file: {}", path.display());

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self::with_destination(
            BufWriter::new(file),
            path.display().to_string(),
        ))
    }
}

impl<W: Write> JsonLinesExporter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_destination(writer, "<writer>".to_string())
    }

    fn with_destination(writer: W, destination: String) -> Self {
        Self {
            writer,
            destination,
            state: ExportState::Idle,
            records_written: 0,
        }
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordExporterPort for JsonLinesExporter<W> {
    fn start_exporting(&mut self) -> Result<()> {
        match self.state {
            ExportState::Idle => {
                self.state = ExportState::Exporting;
                debug!("Started exporting to {}", self.destination);
                Ok(())
            }
            _ => Err(ScraperError::Export(format!(
                "export to {} already started",
                self.destination
            ))),
        }
    }

    fn export_record(&mut self, record: &ExportRecord) -> Result<()> {
        if self.state != ExportState::Exporting {
            return Err(ScraperError::Export(format!(
                "export to {} is not open",
                self.destination
            )));
        }
        let json_line = serde_json::to_string(record)?;
        writeln!(self.writer, "{}", json_line)?;
        self.records_written += 1;
        Ok(())
    }

    fn finish_exporting(&mut self) -> Result<()> {
        if self.state != ExportState::Exporting {
            return Err(ScraperError::Export(format!(
                "export to {} is not open",
                self.destination
            )));
        }
        self.writer.flush()?;
        self.state = ExportState::Finished;
        info!(
            "Finished exporting {} records to {}",
            self.records_written, self.destination
        );
        Ok(())
    }

    fn destination(&self) -> String {
        self.destination.clone()
    }
}
