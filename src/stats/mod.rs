//! Run counters and the end-of-run report.
//!
//! Counts are updated once per record and logged through `tracing` when the run ends.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::info;

use crate::{barcode::BarcodeIndex, classify::Classification};

/// Running counters for a demultiplexing run
///
/// Counters only ever increase. `records_classified` never exceeds `records_seen`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    records_seen: usize,
    records_classified: usize,

    /// Barcode hit but marker missing
    marker_rejected: usize,

    /// Classified records per partition id
    per_partition: BTreeMap<String, usize>,
}
impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for one classified (or unclassified) record
    pub fn record(&mut self, outcome: &Classification<'_>) {
        self.records_seen += 1;
        match outcome {
            Classification::Matched { entry, .. } => {
                self.records_classified += 1;
                match self.per_partition.get_mut(entry.partition_id()) {
                    Some(count) => *count += 1,
                    None => {
                        self.per_partition
                            .insert(entry.partition_id().to_string(), 1);
                    }
                }
            }
            Classification::MarkerMismatch { .. } => self.marker_rejected += 1,
            Classification::NoBarcode => {}
        }
    }

    pub fn records_seen(&self) -> usize {
        self.records_seen
    }

    pub fn records_classified(&self) -> usize {
        self.records_classified
    }

    pub fn marker_rejected(&self) -> usize {
        self.marker_rejected
    }

    /// Records without any barcode hit
    pub fn no_barcode(&self) -> usize {
        self.records_seen - self.records_classified - self.marker_rejected
    }

    /// Classified records of a single partition
    pub fn partition_count(&self, partition_id: &str) -> usize {
        self.per_partition.get(partition_id).copied().unwrap_or(0)
    }

    /// Classified records per partition, sorted by partition id
    pub fn partitions(&self) -> impl Iterator<Item = (&str, usize)> {
        self.per_partition.iter().map(|(id, &n)| (id.as_str(), n))
    }

    /// Percentage of seen records that were classified (0 when nothing was seen)
    pub fn percent_classified(&self) -> f64 {
        if self.records_seen == 0 {
            return 0.0;
        }
        self.records_classified as f64 / self.records_seen as f64 * 100.0
    }

    /// Logs the end-of-run summary
    pub fn log_summary(&self, elapsed: Duration) {
        info!("Total reads: {}", self.records_seen);
        info!(
            "Classified reads: {} ({:.2}%)",
            self.records_classified,
            self.percent_classified()
        );
        info!(
            "Unclassified reads: {} without barcode, {} with barcode but no marker",
            self.no_barcode(),
            self.marker_rejected
        );
        for (partition_id, count) in self.partitions() {
            info!("  {partition_id}: {count}");
        }
        info!("Elapsed time: {:.2}s", elapsed.as_secs_f64());
    }
}

/// Logs how the configured barcodes are distributed over their lengths
pub fn log_length_shares(index: &BarcodeIndex) {
    info!("Barcodes: {}", index.len());
    for share in index.length_shares() {
        info!(
            "  {} bp: {} ({:.2}%)",
            share.length, share.count, share.percent
        );
    }
}
