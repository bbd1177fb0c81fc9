//! Split a dataset across numbered Parquet files.

use std::path::PathBuf;

use pqchunk_core::{chunk_ranges, Dataset, ProgressEvent, ProgressSink, WriteOptions};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fs::file_bytes;
use crate::writers::parquet::{no_columns, save_parquet};

/// One file produced by `write_parquets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenChunk {
    pub path: PathBuf,
    pub rows: usize,
    pub bytes: u64,
}

/// Summary of a chunked write, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteReport {
    pub chunks: Vec<WrittenChunk>,
}

impl WriteReport {
    pub fn total_rows(&self) -> usize {
        self.chunks.iter().map(|c| c.rows).sum()
    }

    pub fn total_bytes(&self) -> u64 {
        self.chunks.iter().map(|c| c.bytes).sum()
    }
}

/// Path of chunk `index` (0-based): `{path}{prefix}_{index + 1}.parquet`.
pub fn chunk_path(path: &str, prefix: &str, index: usize) -> PathBuf {
    PathBuf::from(format!("{path}{prefix}_{}.parquet", index + 1))
}

/// Write `data` as `options.chunks` files named `{path}{prefix}_{n}.parquet`.
///
/// Rows are split at `floor(i * rows / chunks)`; the last chunk runs to the end
/// of the table. When there are more chunks than rows the surplus files hold
/// the schema and no rows. A dataset with no columns is rejected before any
/// file is created. Files already written are left in place if a later
/// chunk fails.
pub fn write_parquets(
    data: &Dataset,
    path: &str,
    options: &WriteOptions,
    progress: &mut dyn ProgressSink,
) -> Result<WriteReport> {
    let (rows, columns) = data.shape();
    if columns == 0 {
        return Err(no_columns().into());
    }
    let ranges = chunk_ranges(rows, options.chunks)?;
    progress.report(ProgressEvent::Exporting { rows, columns });

    let total = ranges.len();
    let mut report = WriteReport {
        chunks: Vec::with_capacity(total),
    };
    for (i, range) in ranges.into_iter().enumerate() {
        let chunk = if i + 1 == total {
            data.slice(range.start, rows - range.start)?
        } else {
            data.slice(range.start, range.len())?
        };

        let file = chunk_path(path, &options.prefix, i);
        save_parquet(&chunk, &file)?;
        let bytes = file_bytes(&file)?;

        progress.report(ProgressEvent::ChunkWritten {
            position: i + 1,
            total,
            bytes,
            rows: chunk.num_rows(),
            path: file.clone(),
        });
        report.chunks.push(WrittenChunk {
            path: file,
            rows: chunk.num_rows(),
            bytes,
        });
    }

    tracing::info!(
        path,
        chunks = total,
        rows,
        bytes = report.total_bytes(),
        "wrote chunked dataset"
    );
    Ok(report)
}
