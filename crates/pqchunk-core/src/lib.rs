#![forbid(unsafe_code)]
//! pqchunk-core: shared kernel for pqchunk.
//!
//! Pure types and helpers only. There is **no filesystem access** here; the
//! readers and writers in `pqchunk-io` do all I/O on top of these types.
//!
//! - `dataset`: the in-memory table (`Dataset`) and its positional `RowIndex`.
//! - `chunking`: row cut points for splitting a dataset into chunks.
//! - `size`: human-readable byte counts.
//! - `config`: per-call options and the layered `ChunkConfig`.
//! - `progress`: the `ProgressSink` trait readers and writers report through.

pub mod chunking;
pub mod config;
pub mod dataset;
pub mod error;
pub mod progress;
pub mod size;

pub use chunking::{chunk_ranges, cut_points};
pub use config::{ChunkConfig, FileOrder, ReadOptions, WriteOptions};
pub use dataset::{Dataset, RowIndex};
pub use error::{Error, Result};
pub use progress::{NullProgress, ProgressEvent, ProgressSink};
pub use size::format_size;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
