pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod patterns;
pub mod pipeline;
pub mod raw_record_reader;
pub mod sanitizer;
pub mod types;

// Export boundary: port in app, file-backed adapter in infra
pub mod app;
pub mod infra;

pub use error::{ResolutionError, Result, ScraperError};
pub use patterns::Patterns;
pub use pipeline::{PipelineSummary, ResolutionPipeline};
pub use sanitizer::RecordSanitizer;
pub use types::{CleanRecord, ErrorRecord, ExportRecord, RawRecord};
