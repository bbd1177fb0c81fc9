#![forbid(unsafe_code)]
//! pqchunk-io: chunked Parquet dataset readers and writers.
//!
//! - `discover`: prefix-glob enumeration of dataset files, ordered.
//! - `readers`: single-file Parquet loading and `read_parquets` over many files.
//! - `writers`: single-file Parquet saving and `write_parquets` into chunks.
//! - `fs`: file sizes, raw and formatted.
//! - `progress`: console progress output.

pub mod discover;
pub mod error;
pub mod fs;
pub mod progress;
pub mod readers;
pub mod writers;

pub use error::{Error, Result};
pub use fs::file_size;
pub use progress::StdoutProgress;
pub use readers::chunked::read_parquets;
pub use readers::parquet::load_parquet;
pub use writers::chunked::{chunk_path, write_parquets, WriteReport, WrittenChunk};
pub use writers::parquet::save_parquet;
