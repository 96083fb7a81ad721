use std::collections::HashMap;

use tracing::debug;

use super::entry::BarcodeEntry;
use crate::error::{ConfigError, Result};

/// Share of the configured barcodes that have a given length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthShare {
    pub length: usize,
    pub count: usize,
    /// Percentage of all configured barcodes
    pub percent: f64,
}

/// Length-partitioned barcode table
///
/// Maps barcode length to a table of upper-case barcode bytes to [`BarcodeEntry`].
/// Within a length every barcode is unique, but any number of lengths may coexist.
///
/// The distinct lengths are kept sorted longest first: a read is always tested against
/// the most specific barcodes before any shorter barcode that could be a prefix of them.
#[derive(Debug, Clone)]
pub struct BarcodeIndex {
    by_length: HashMap<usize, HashMap<Vec<u8>, BarcodeEntry>>,
    lengths: Vec<usize>,
    num_entries: usize,
}
impl BarcodeIndex {
    /// Builds the index from `(sample, barcode)` pairs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * Any barcode is invalid (see [`BarcodeEntry::new`])
    /// * Two entries share the same barcode at the same length
    /// * No entries are provided
    pub fn build<I, S, B>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, B)>,
        S: AsRef<str>,
        B: AsRef<str>,
    {
        let mut by_length: HashMap<usize, HashMap<Vec<u8>, BarcodeEntry>> = HashMap::new();
        let mut num_entries = 0;

        for (sample, barcode) in entries {
            let entry = BarcodeEntry::new(sample.as_ref(), barcode.as_ref())?;
            let table = by_length.entry(entry.len()).or_default();
            if let Some(existing) = table.get(entry.barcode().as_bytes()) {
                return Err(ConfigError::DuplicateBarcode {
                    barcode: entry.barcode().to_string(),
                    length: entry.len(),
                    existing: existing.sample().to_string(),
                    duplicate: entry.sample().to_string(),
                }
                .into());
            }
            debug!(
                sample = entry.sample(),
                barcode = entry.barcode(),
                "Registered barcode"
            );
            table.insert(entry.barcode().as_bytes().to_vec(), entry);
            num_entries += 1;
        }

        if num_entries == 0 {
            return Err(ConfigError::EmptyIndex.into());
        }

        let mut lengths: Vec<usize> = by_length.keys().copied().collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));

        Ok(Self {
            by_length,
            lengths,
            num_entries,
        })
    }

    /// Distinct barcode lengths, longest first
    pub fn candidate_lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Exact lookup of a prefix candidate among the barcodes of `length`
    ///
    /// The candidate must already be upper-cased. Returns `None` if it is not exactly
    /// `length` bases long or is not a configured barcode.
    pub fn lookup(&self, candidate: &[u8], length: usize) -> Option<&BarcodeEntry> {
        if candidate.len() != length {
            return None;
        }
        let table = self.by_length.get(&length)?;
        table.get(candidate)
    }

    /// Number of configured barcodes
    pub fn len(&self) -> usize {
        self.num_entries
    }

    pub fn is_empty(&self) -> bool {
        self.num_entries == 0
    }

    /// Iterates over every entry, longest barcodes first (order within a length is arbitrary)
    pub fn entries(&self) -> impl Iterator<Item = &BarcodeEntry> {
        self.lengths
            .iter()
            .filter_map(|len| self.by_length.get(len))
            .flat_map(HashMap::values)
    }

    /// Count and percentage share of each barcode length, longest first
    pub fn length_shares(&self) -> Vec<LengthShare> {
        self.lengths
            .iter()
            .map(|&length| {
                let count = self.by_length.get(&length).map_or(0, HashMap::len);
                LengthShare {
                    length,
                    count,
                    percent: count as f64 / self.num_entries as f64 * 100.0,
                }
            })
            .collect()
    }
}
