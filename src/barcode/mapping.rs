use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ConfigError, ReadError, Result};

/// One `sample<TAB>barcode` line of the mapping input, with both fields trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub sample: String,
    pub barcode: String,
}

/// Parses a tab-separated sample-to-barcode mapping
///
/// There is no header row. Blank lines are skipped and trailing whitespace (including a
/// trailing tab) is ignored; every other line must hold exactly two non-empty fields after
/// trimming.
pub fn parse_mapping<R: BufRead>(reader: R) -> Result<Vec<MappingEntry>> {
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim_end();
        if trimmed.trim_start().is_empty() {
            continue;
        }

        let mut fields = trimmed.split('\t');
        let (Some(sample), Some(barcode), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed(idx, &line));
        };
        let (sample, barcode) = (sample.trim(), barcode.trim());
        if sample.is_empty() || barcode.is_empty() {
            return Err(malformed(idx, &line));
        }

        entries.push(MappingEntry {
            sample: sample.to_string(),
            barcode: barcode.to_string(),
        });
    }
    Ok(entries)
}

/// Reads the mapping file at `path`
pub fn read_mapping<P: AsRef<Path>>(path: P) -> Result<Vec<MappingEntry>> {
    let path = path.as_ref();
    let handle = File::open(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_mapping(BufReader::new(handle))
}

fn malformed(idx: usize, line: &str) -> crate::Error {
    ConfigError::MalformedMapping {
        line: idx + 1,
        content: line.to_string(),
    }
    .into()
}
