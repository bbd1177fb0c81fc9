//! Dataset writers.

pub mod chunked;
pub mod parquet;
