//! Read a dataset spread across many Parquet files.

use std::path::Path;

use pqchunk_core::{Dataset, ProgressEvent, ProgressSink, ReadOptions};

use crate::discover::{matching_files, prefix_pattern};
use crate::error::{Error, Result};
use crate::fs::file_bytes;
use crate::readers::parquet::load_parquet;

/// Load every file matching `path*` and concatenate them into one dataset.
///
/// Files are read one at a time in `options.order`. With exactly one match the
/// file is returned as loaded and `options.limit` does not apply. Otherwise
/// reading stops once `limit` files are loaded, and the parts are stacked in
/// read order; `limit = Some(0)` yields an empty dataset. No match at all is
/// an error.
pub fn read_parquets(
    path: &str,
    options: &ReadOptions,
    progress: &mut dyn ProgressSink,
) -> Result<Dataset> {
    let files = matching_files(path, options.order)?;
    let total = files.len();
    progress.report(ProgressEvent::FilesDetected { count: total });

    let data = match files.as_slice() {
        [] => return Err(Error::NoFiles(prefix_pattern(path))),
        [only] => load_one(only, 1, total, progress)?,
        _ => {
            let mut parts = Vec::with_capacity(options.limit.unwrap_or(total).min(total));
            for (i, file) in files.iter().enumerate() {
                if options.limit == Some(i) {
                    tracing::debug!(limit = i, total, "file limit reached");
                    progress.report(ProgressEvent::LimitReached { limit: i });
                    break;
                }
                parts.push(load_one(file, i + 1, total, progress)?);
            }

            progress.report(ProgressEvent::Merging { files: parts.len() });
            Dataset::concat(parts, options.reset_index)?
        }
    };

    let (rows, columns) = data.shape();
    progress.report(ProgressEvent::Imported { rows, columns });
    tracing::info!(path, files = total, rows, columns, "read chunked dataset");
    Ok(data)
}

fn load_one(
    file: &Path,
    position: usize,
    total: usize,
    progress: &mut dyn ProgressSink,
) -> Result<Dataset> {
    let data = load_parquet(file)?;
    let bytes = file_bytes(file)?;
    progress.report(ProgressEvent::FileRead {
        position,
        total,
        bytes,
        rows: data.num_rows(),
    });
    Ok(data)
}
