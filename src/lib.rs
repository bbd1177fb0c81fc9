#![forbid(unsafe_code)]
//! pqchunk: batch reading and writing of chunked Parquet datasets.
//!
//! Re-exports the pieces most callers need from `pqchunk-core` and
//! `pqchunk-io`.
//!
//! ```rust,no_run
//! use pqchunk::{read_parquets, write_parquets, ReadOptions, StdoutProgress, WriteOptions};
//!
//! let data = read_parquets("raw/", &ReadOptions::default(), &mut StdoutProgress)?;
//! write_parquets(&data, "out/", &WriteOptions::default().with_chunks(8), &mut StdoutProgress)?;
//! # Ok::<(), pqchunk::Error>(())
//! ```

pub use pqchunk_core;
pub use pqchunk_io;

pub use pqchunk_core::{
    cut_points, format_size, ChunkConfig, Dataset, FileOrder, NullProgress, ProgressEvent,
    ProgressSink, ReadOptions, RowIndex, WriteOptions,
};
pub use pqchunk_io::{
    Error, file_size, load_parquet, read_parquets, save_parquet, write_parquets, StdoutProgress,
    WriteReport,
};
