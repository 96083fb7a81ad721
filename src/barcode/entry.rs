use crate::error::{ConfigError, Result};

/// A single sample-to-barcode assignment
///
/// The barcode is stored upper-cased. The partition id names the output file the
/// sample's reads are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeEntry {
    sample: String,
    barcode: String,
    partition_id: String,
}
impl BarcodeEntry {
    /// Creates a new entry from a raw sample name and barcode
    ///
    /// Surrounding whitespace is removed from both fields and the barcode is upper-cased.
    /// The sample name keeps its case. Barcodes of any non-zero length are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The barcode is empty
    /// * The barcode contains a character other than A, C, G or T
    pub fn new(sample: &str, raw_barcode: &str) -> Result<Self> {
        let sample = sample.trim().to_string();
        let barcode = raw_barcode.trim().to_ascii_uppercase();

        if barcode.is_empty() {
            return Err(ConfigError::EmptyBarcode(sample).into());
        }
        if !is_nucleotide(barcode.as_bytes()) {
            return Err(ConfigError::InvalidBarcode { sample, barcode }.into());
        }

        let partition_id = format!("{sample}.{barcode}");
        Ok(Self {
            sample,
            barcode,
            partition_id,
        })
    }

    pub fn sample(&self) -> &str {
        &self.sample
    }

    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    /// `<sample>.<barcode>`
    pub fn partition_id(&self) -> &str {
        &self.partition_id
    }

    pub fn len(&self) -> usize {
        self.barcode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.barcode.is_empty()
    }
}

/// Checks that an upper-case sequence only holds A, C, G and T
///
/// bitnuc encodes into as many 2-bit words as the sequence needs, so there is no
/// length limit. Its own alphabet is wider than ACGT, hence the explicit check.
pub(crate) fn is_nucleotide(sequence: &[u8]) -> bool {
    if sequence
        .iter()
        .any(|b| !matches!(b, b'A' | b'C' | b'G' | b'T'))
    {
        return false;
    }
    let mut words = Vec::with_capacity(sequence.len().div_ceil(32));
    bitnuc::twobit::encode(sequence, &mut words).is_ok()
}
