use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{Result, WriteError};

/// Makes sure `dir` exists and is empty before partitions are appended to it
///
/// An existing empty directory is reused. A non-empty directory (or a file at `dir`)
/// is only replaced when `force` is set. Partition files are opened in append mode, so
/// output of an earlier run must never be present when the run starts.
pub fn prepare_output_dir(dir: &Path, force: bool) -> Result<()> {
    if dir.is_dir() {
        if fs::read_dir(dir)?.next().is_none() {
            return Ok(());
        }
        if !force {
            return Err(WriteError::OutputDirExists(dir.to_path_buf()).into());
        }
        warn!("Removing existing output directory {}", dir.display());
        fs::remove_dir_all(dir)?;
    } else if dir.exists() {
        if !force {
            return Err(WriteError::OutputDirExists(dir.to_path_buf()).into());
        }
        warn!("Removing existing file at {}", dir.display());
        fs::remove_file(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}
