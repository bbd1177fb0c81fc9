//! Dataset readers.

pub mod chunked;
pub mod parquet;
