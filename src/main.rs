use std::fs::File;
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use fqdemux::{
    classify::DEFAULT_MARKER, config::DemuxConfigBuilder, demux::run_demux,
    partition::DEFAULT_FLUSH_THRESHOLD, Error,
};

/// Split FASTQ reads into per-sample files by their leading barcode
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Tab-separated mapping of sample name to barcode (no header)
    #[arg(short = 'b', long)]
    barcodes: PathBuf,

    /// Input FASTQ file ("-" for stdin)
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output directory, one <sample>.<barcode>.fastq per barcode
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Sequence required immediately after the barcode
    #[arg(short = 'm', long, default_value = DEFAULT_MARKER)]
    marker: String,

    /// Number of buffered reads that triggers writing to disk
    #[arg(long, default_value_t = DEFAULT_FLUSH_THRESHOLD)]
    flush_threshold: usize,

    /// Replace the output directory if it already holds files
    #[arg(short = 'f', long, default_value_t = false)]
    force: bool,

    /// Also write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    // FQDEMUX_LOG takes precedence over RUST_LOG
    let filter = std::env::var("FQDEMUX_LOG")
        .ok()
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            let handle = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(handle))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_file.as_ref())?;

    let config = DemuxConfigBuilder::default()
        .output_dir(&cli.output)
        .marker(&cli.marker)
        .flush_threshold(cli.flush_threshold)
        .force(cli.force)
        .build()?;

    run_demux(&cli.barcodes, &cli.input, &config).with_context(|| {
        format!(
            "Demultiplexing {} into {} failed",
            cli.input.display(),
            cli.output.display()
        )
    })?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");

        // Configuration problems and I/O failures get distinct exit codes
        let exit_code = match e.downcast_ref::<Error>() {
            Some(err) if err.is_config() => 2,
            Some(_) => 3,
            None => 1,
        };
        process::exit(exit_code);
    }
}
