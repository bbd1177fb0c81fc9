//! Single-file Parquet reader.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow_array::RecordBatch;
use arrow_schema::SchemaRef;
use parquet::arrow::arrow_reader::{ParquetRecordBatchReader, ParquetRecordBatchReaderBuilder};
use pqchunk_core::Dataset;

use crate::error::{Error, Result};

/// Streams the record batches of one Parquet file.
pub struct ParquetReader {
    reader: ParquetRecordBatchReader,
    schema: SchemaRef,
    path: PathBuf,
}

impl ParquetReader {
    /// Open a Parquet file and read its footer.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file)
            .map_err(|e| Error::parquet(path, e))?;
        let schema = builder.schema().clone();
        let reader = builder.build().map_err(|e| Error::parquet(path, e))?;

        Ok(Self {
            reader,
            schema,
            path: path.to_path_buf(),
        })
    }

    /// Read the next batch of rows. Returns `None` when all rows have been read.
    pub fn next_record_batch(&mut self) -> Result<Option<RecordBatch>> {
        self.reader
            .next()
            .transpose()
            .map_err(|e| Error::arrow(&self.path, e))
    }

    /// Arrow schema of the file.
    pub fn schema(&self) -> SchemaRef {
        SchemaRef::clone(&self.schema)
    }

    /// Read every remaining batch into a dataset labelled `0..rows`.
    pub fn into_dataset(mut self) -> Result<Dataset> {
        let mut batches = Vec::new();
        while let Some(batch) = self.next_record_batch()? {
            batches.push(batch);
        }
        Ok(Dataset::try_new(self.schema, batches)?)
    }
}

/// Load a whole Parquet file into memory.
pub fn load_parquet(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let data = ParquetReader::from_path(path)?.into_dataset()?;
    tracing::trace!(path = %path.display(), rows = data.num_rows(), "loaded parquet file");
    Ok(data)
}
