//! Single-file Parquet writer.
//!
//! Files are Snappy-compressed with the codec's default row group size.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow_array::RecordBatch;
use arrow_schema::SchemaRef;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use pqchunk_core::Dataset;

use crate::error::{Error, Result};

/// Writes record batches sharing one schema to a Parquet file.
pub struct ParquetWriter {
    writer: ArrowWriter<File>,
    schema: SchemaRef,
    path: PathBuf,
}

impl ParquetWriter {
    /// Create (or truncate) the file at `path`.
    pub fn to_path(path: impl AsRef<Path>, schema: SchemaRef) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::io(path, e))?;

        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();

        let writer = ArrowWriter::try_new(file, SchemaRef::clone(&schema), Some(props))
            .map_err(|e| Error::parquet(path, e))?;

        Ok(Self {
            writer,
            schema,
            path: path.to_path_buf(),
        })
    }

    pub fn write_batch(&mut self, batch: &RecordBatch) -> Result<()> {
        self.writer
            .write(batch)
            .map_err(|e| Error::parquet(&self.path, e))
    }

    /// Write the footer and close the file.
    pub fn close(self) -> Result<()> {
        self.writer
            .close()
            .map_err(|e| Error::parquet(&self.path, e))?;
        Ok(())
    }

    pub fn schema(&self) -> SchemaRef {
        SchemaRef::clone(&self.schema)
    }
}

/// Write a dataset to one Parquet file. Row labels are not stored.
pub fn save_parquet(data: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if data.num_columns() == 0 {
        return Err(no_columns().into());
    }
    let mut writer = ParquetWriter::to_path(path, data.schema())?;
    for batch in data.batches() {
        writer.write_batch(batch)?;
    }
    writer.close()?;
    tracing::trace!(path = %path.display(), rows = data.num_rows(), "saved parquet file");
    Ok(())
}

/// Parquet cannot encode a schema without leaf columns.
pub(crate) fn no_columns() -> pqchunk_core::Error {
    pqchunk_core::Error::InvalidArgument("cannot write a dataset with no columns".into())
}
