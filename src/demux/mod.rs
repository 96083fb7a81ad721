//! # demux
//!
//! The sequential demultiplexing loop.
//!
//! Records are pulled one at a time from a [`RecordSource`], classified, and matched
//! records are routed into the [`PartitionBuffer`]. Statistics are updated for every
//! record. Any read or write error ends the run; partitions flushed before the error
//! remain on disk.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::{
    barcode::{read_mapping, BarcodeIndex},
    classify::{Classification, Classifier},
    config::DemuxConfig,
    error::Result,
    partition::{DirectorySink, PartitionBuffer, PartitionSink},
    reader::{FastqSource, RecordSource},
    setup::prepare_output_dir,
    stats::{log_length_shares, RunStatistics},
    Record,
};

/// Classifies records and buffers the matched ones for output
pub struct Demultiplexer<'a, S: PartitionSink> {
    classifier: Classifier<'a>,
    buffer: PartitionBuffer<S>,
    stats: RunStatistics,
    progress_interval: usize,
}
impl<'a, S: PartitionSink> Demultiplexer<'a, S> {
    pub fn new(index: &'a BarcodeIndex, config: &DemuxConfig, sink: S) -> Self {
        Self {
            classifier: Classifier::new(index, &config.marker),
            buffer: PartitionBuffer::new(sink, config.flush_threshold),
            stats: RunStatistics::new(),
            progress_interval: config.progress_interval.max(1),
        }
    }

    /// Processes a single record
    pub fn process(&mut self, record: Record) -> Result<()> {
        record.validate()?;
        let outcome = self.classifier.classify(record);
        self.stats.record(&outcome);

        if let Classification::Matched { entry, record } = outcome {
            self.buffer.accept(entry.partition_id(), record);
            self.buffer.maybe_flush()?;
        }

        if self.stats.records_seen().is_multiple_of(self.progress_interval) {
            debug!(
                seen = self.stats.records_seen(),
                classified = self.stats.records_classified(),
                "Progress"
            );
        }
        Ok(())
    }

    /// Processes every record of `source`
    ///
    /// Does not flush the final batch; call [`finish`](Self::finish) afterwards.
    pub fn run<I: RecordSource>(&mut self, source: I) -> Result<()> {
        for record in source {
            self.process(record?)?;
        }
        Ok(())
    }

    pub fn stats(&self) -> &RunStatistics {
        &self.stats
    }

    /// Flushes the remaining buffered records and returns the statistics and sink
    pub fn finish(self) -> Result<(RunStatistics, S)> {
        let sink = self.buffer.finish()?;
        Ok((self.stats, sink))
    }
}

/// Runs a complete demultiplexing job
///
/// Reads the mapping at `barcodes`, builds the index, prepares the output directory
/// and writes every matched record of `input` (`-` for standard input) to
/// `<output_dir>/<sample>.<barcode>.fastq`.
///
/// Configuration errors and an unreadable input are raised before the output directory
/// is touched.
pub fn run_demux(barcodes: &Path, input: &Path, config: &DemuxConfig) -> Result<RunStatistics> {
    let start = Instant::now();

    let mapping = read_mapping(barcodes)?;
    let index = BarcodeIndex::build(mapping.iter().map(|m| (&m.sample, &m.barcode)))?;
    info!(
        "Loaded {} barcodes from {}",
        index.len(),
        barcodes.display()
    );
    log_length_shares(&index);

    let source = FastqSource::open(input)?;
    prepare_output_dir(&config.output_dir, config.force)?;
    let sink = DirectorySink::new(&config.output_dir);

    let mut demux = Demultiplexer::new(&index, config, sink);
    demux.run(source)?;
    let (stats, _sink) = demux.finish()?;

    stats.log_summary(start.elapsed());
    Ok(stats)
}
