use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use resolutions::config::Config;
use resolutions::constants::DEFAULT_CONFIG_PATH;
use resolutions::infra::JsonLinesExporter;
use resolutions::logging;
use resolutions::pipeline::check_records;
use resolutions::raw_record_reader::RawRecordReader;
use resolutions::{ExportRecord, Patterns, RecordSanitizer, ResolutionPipeline};

#[derive(Parser)]
#[command(name = "resolutions")]
#[command(about = "Government resolution sanitizer")]
#[command(version)]
struct Cli {
    /// Config file (optional; defaults apply when it does not exist)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sanitize crawled records and export them as JSON lines
    Sanitize {
        /// Crawled records, one JSON object per line
        #[arg(long)]
        input: PathBuf,
        /// Export file (overrides config and RESOLUTIONS_OUTPUT)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Report which records would be deferred, without writing an export
    Check {
        /// Crawled records, one JSON object per line
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let _guard = logging::init_logging(&config.logging);

    // Compiled once, shared by everything that sanitizes
    let sanitizer = RecordSanitizer::new(Patterns::shared());

    match cli.command {
        Commands::Sanitize { input, output } => {
            let output = output.unwrap_or_else(|| config.export.path.clone());
            info!("Sanitizing {} into {}", input.display(), output.display());

            let records = RawRecordReader::open(&input)
                .with_context(|| format!("opening {}", input.display()))?;
            let exporter = JsonLinesExporter::create(&output)
                .with_context(|| format!("creating {}", output.display()))?;

            let summary = ResolutionPipeline::new(sanitizer, exporter)
                .run(records)
                .map_err(|e| {
                    error!("Export run failed: {}", e);
                    e
                })?;

            println!("📊 Export results:");
            println!("   Total records: {}", summary.total_records);
            println!("   Clean: {}", summary.clean_records);
            println!("   Deferred for review: {}", summary.error_records);
            println!("   Output file: {}", summary.output);
        }
        Commands::Check { input } => {
            let records = RawRecordReader::open(&input)
                .with_context(|| format!("opening {}", input.display()))?;

            let report = check_records(&sanitizer, records)?;
            for record in &report.records {
                match record {
                    ExportRecord::Clean(clean) => {
                        println!("✅ {} ({})", clean.url, clean.resolution_number);
                    }
                    ExportRecord::Error(err) => {
                        println!(
                            "⚠️  {}: {}",
                            err.url.as_deref().unwrap_or("<no url>"),
                            err.error
                        );
                    }
                }
            }
            println!(
                "{} of {} records would be deferred for review",
                report.deferred().count(),
                report.total()
            );
        }
    }
    Ok(())
}
