pub mod json_lines_exporter;

pub use json_lines_exporter::JsonLinesExporter;
