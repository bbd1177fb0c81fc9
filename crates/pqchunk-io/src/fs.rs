//! File sizes.

use std::path::Path;

use pqchunk_core::format_size;

use crate::error::{Error, Result};

/// Size of the file at `path` in bytes.
pub fn file_bytes(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let meta = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
    Ok(meta.len())
}

/// Human-readable size of the file at `path`, e.g. `12.3MB`.
pub fn file_size(path: impl AsRef<Path>) -> Result<String> {
    file_bytes(path).map(format_size)
}
