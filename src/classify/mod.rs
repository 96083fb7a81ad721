//! Assigning reads to barcodes.
//!
//! A read is accepted when its leading bases exactly match a configured barcode and the
//! restriction-site marker follows immediately after. Barcode lengths are scanned longest
//! first and the first length that produces a hit is final, even if the marker check then
//! fails: a shorter barcode is never reconsidered for the same read.

use crate::{
    barcode::{BarcodeEntry, BarcodeIndex},
    FastqRecord, Record, TrimmedRecord,
};

/// Restriction-site marker expected right after the barcode
pub const DEFAULT_MARKER: &str = "CATG";

/// Outcome of classifying a single record
///
/// Both `MarkerMismatch` and `NoBarcode` are unmatched reads and are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<'a> {
    /// Barcode and marker matched; the record has its barcode removed
    Matched {
        entry: &'a BarcodeEntry,
        record: TrimmedRecord,
    },
    /// A barcode matched but the marker did not follow it
    MarkerMismatch { entry: &'a BarcodeEntry },
    /// No configured barcode prefixes the record
    NoBarcode,
}
impl Classification<'_> {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// Partition of the barcode that was hit, matched or not
    pub fn partition_id(&self) -> Option<&str> {
        match self {
            Self::Matched { entry, .. } | Self::MarkerMismatch { entry } => {
                Some(entry.partition_id())
            }
            Self::NoBarcode => None,
        }
    }
}

/// Classifies records against a [`BarcodeIndex`]
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    index: &'a BarcodeIndex,
    marker: Vec<u8>,
}
impl<'a> Classifier<'a> {
    /// Creates a classifier that requires `marker` after the barcode
    ///
    /// The marker is compared case-sensitively against the upper-cased read, so it is
    /// upper-cased here.
    pub fn new(index: &'a BarcodeIndex, marker: &str) -> Self {
        Self {
            index,
            marker: marker.to_ascii_uppercase().into_bytes(),
        }
    }

    /// Creates a classifier using [`DEFAULT_MARKER`]
    pub fn with_default_marker(index: &'a BarcodeIndex) -> Self {
        Self::new(index, DEFAULT_MARKER)
    }

    pub fn marker(&self) -> &[u8] {
        &self.marker
    }

    /// Classifies a record, consuming it
    ///
    /// The sequence is upper-cased before matching and stays upper-cased in the output.
    pub fn classify(&self, mut record: Record) -> Classification<'a> {
        record.normalize();

        let Some(entry) = self
            .index
            .candidate_lengths()
            .iter()
            .filter(|&&len| len <= record.len())
            .find_map(|&len| self.index.lookup(&record.seq()[..len], len))
        else {
            return Classification::NoBarcode;
        };

        let trimmed = record.strip_prefix(entry.len());
        if trimmed.seq().starts_with(&self.marker) {
            Classification::Matched {
                entry,
                record: trimmed,
            }
        } else {
            Classification::MarkerMismatch { entry }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    fn record(seq: &str) -> Record {
        let qual = "#".repeat(seq.len());
        Record::new(b"read".to_vec(), seq.as_bytes().to_vec(), qual.into_bytes())
    }

    fn sample_index() -> Result<BarcodeIndex> {
        BarcodeIndex::build([("SampleA", "ACGT"), ("SampleB", "GGTT")])
    }

    #[test]
    fn test_matched_record() -> Result<()> {
        let index = sample_index()?;
        let classifier = Classifier::with_default_marker(&index);

        match classifier.classify(record("ACGTCATGAAAA")) {
            Classification::Matched { entry, record } => {
                assert_eq!(entry.partition_id(), "SampleA.ACGT");
                assert_eq!(record.seq(), b"CATGAAAA");
                assert_eq!(record.qual(), b"########");
            }
            other => panic!("Expected a match, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_forty_base_barcode() -> Result<()> {
        let barcode = "ACGTTGCA".repeat(5);
        let index = BarcodeIndex::build([("Wide", barcode.as_str()), ("Narrow", "ACGT")])?;
        let classifier = Classifier::with_default_marker(&index);

        let read = format!("{}CATGAA", barcode.to_lowercase());
        match classifier.classify(record(&read)) {
            Classification::Matched { entry, record } => {
                assert_eq!(entry.partition_id(), format!("Wide.{barcode}"));
                assert_eq!(record.seq(), b"CATGAA");
                assert_eq!(record.stripped(), 40);
            }
            other => panic!("Expected a match, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_marker_mismatch() -> Result<()> {
        let index = sample_index()?;
        let classifier = Classifier::with_default_marker(&index);
        let outcome = classifier.classify(record("ACGTTTTTAAAA"));
        assert!(matches!(outcome, Classification::MarkerMismatch { .. }));
        assert_eq!(outcome.partition_id(), Some("SampleA.ACGT"));
        Ok(())
    }

    #[test]
    fn test_no_barcode() -> Result<()> {
        let index = sample_index()?;
        let classifier = Classifier::with_default_marker(&index);
        assert_eq!(
            classifier.classify(record("TTTTCATGAAAA")),
            Classification::NoBarcode
        );
        Ok(())
    }

    #[test]
    fn test_lowercase_read() -> Result<()> {
        let index = sample_index()?;
        let classifier = Classifier::with_default_marker(&index);
        let outcome = classifier.classify(record("ggttcatgac"));
        match outcome {
            Classification::Matched { entry, record } => {
                assert_eq!(entry.partition_id(), "SampleB.GGTT");
                assert_eq!(record.seq(), b"CATGAC");
            }
            other => panic!("Expected a match, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_longest_barcode_wins() -> Result<()> {
        let index = BarcodeIndex::build([("Short", "ACG"), ("Long", "ACGT")])?;
        let classifier = Classifier::with_default_marker(&index);

        let outcome = classifier.classify(record("ACGTCATGAA"));
        assert!(outcome.is_matched());
        assert_eq!(outcome.partition_id(), Some("Long.ACGT"));

        // Falls through to the shorter barcode when the longer one has no hit
        let outcome = classifier.classify(record("ACGCATGAA"));
        assert!(outcome.is_matched());
        assert_eq!(outcome.partition_id(), Some("Short.ACG"));
        Ok(())
    }

    #[test]
    fn test_longer_hit_is_final() -> Result<()> {
        // "ACG" + "TCATG" would be a valid short match, but the 4bp hit "ACGT" is
        // taken first and then fails the marker check.
        let index = BarcodeIndex::build([("Short", "ACG"), ("Long", "ACGT")])?;
        let classifier = Classifier::new(&index, "TCAT");
        let outcome = classifier.classify(record("ACGTCATGG"));
        assert!(matches!(outcome, Classification::MarkerMismatch { .. }));
        assert_eq!(outcome.partition_id(), Some("Long.ACGT"));
        Ok(())
    }

    #[test]
    fn test_record_shorter_than_barcode() -> Result<()> {
        let index = BarcodeIndex::build([("Long", "ACGTACGT"), ("Short", "AC")])?;
        let classifier = Classifier::with_default_marker(&index);

        let outcome = classifier.classify(record("ACG"));
        assert!(matches!(outcome, Classification::MarkerMismatch { .. }));
        assert_eq!(outcome.partition_id(), Some("Short.AC"));
        assert_eq!(classifier.classify(record("")), Classification::NoBarcode);
        Ok(())
    }

    #[test]
    fn test_marker_truncated_by_read_end() -> Result<()> {
        let index = sample_index()?;
        let classifier = Classifier::with_default_marker(&index);
        assert!(!classifier.classify(record("ACGTCAT")).is_matched());
        assert!(classifier.classify(record("ACGTCATG")).is_matched());
        Ok(())
    }

    #[test]
    fn test_custom_marker_is_uppercased() -> Result<()> {
        let index = sample_index()?;
        let classifier = Classifier::new(&index, "aatt");
        assert_eq!(classifier.marker(), b"AATT");
        assert!(classifier.classify(record("GGTTAATTCC")).is_matched());
        Ok(())
    }

    fn random_sequence(rng: &mut SmallRng, len: usize) -> String {
        (0..len)
            .map(|_| match rng.random_range(0..4) {
                0 => 'A',
                1 => 'C',
                2 => 'G',
                _ => 'T',
            })
            .collect()
    }

    #[test]
    fn test_never_matches_foreign_prefix() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(42);
        let barcodes: Vec<String> = (0..24).map(|_| random_sequence(&mut rng, 6)).collect();
        let mut mapping: Vec<(String, String)> = Vec::new();
        for (i, bc) in barcodes.iter().enumerate() {
            if !mapping.iter().any(|(_, b)| b == bc) {
                mapping.push((format!("S{i}"), bc.clone()));
            }
        }
        let index = BarcodeIndex::build(mapping.iter().map(|(s, b)| (s.as_str(), b.as_str())))?;
        let classifier = Classifier::with_default_marker(&index);

        for _ in 0..2000 {
            let prefix = random_sequence(&mut rng, 6);
            let seq = format!("{prefix}CATG{}", random_sequence(&mut rng, 20));
            let known = mapping.iter().any(|(_, b)| *b == prefix);
            let outcome = classifier.classify(record(&seq));
            assert_eq!(outcome.is_matched(), known, "prefix {prefix}");
        }
        Ok(())
    }

    #[test]
    fn test_trimmed_record_reconstructs_input() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(7);
        let index = BarcodeIndex::build([("A", "ACGTAC"), ("B", "GGTT"), ("C", "TTACGGAT")])?;
        let classifier = Classifier::with_default_marker(&index);

        for barcode in ["ACGTAC", "GGTT", "TTACGGAT"] {
            let seq = format!("{barcode}CATG{}", random_sequence(&mut rng, 30));
            let qual: String = (0..seq.len())
                .map(|_| char::from(rng.random_range(b'!'..=b'J')))
                .collect();
            let input = Record::new(
                b"r".to_vec(),
                seq.clone().into_bytes(),
                qual.clone().into_bytes(),
            );

            let Classification::Matched { record, .. } = classifier.classify(input) else {
                panic!("{barcode} should match");
            };
            let rebuilt_seq = [barcode.as_bytes(), record.seq()].concat();
            let rebuilt_qual = [&qual.as_bytes()[..record.stripped()], record.qual()].concat();
            assert_eq!(rebuilt_seq, seq.as_bytes());
            assert_eq!(rebuilt_qual, qual.as_bytes());
        }
        Ok(())
    }
}
