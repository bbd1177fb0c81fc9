//! In-memory tables.
//!
//! A `Dataset` is an Arrow schema plus the record batches that hold its rows,
//! in order, and a positional `RowIndex` labelling each row. Batches are kept
//! as loaded; concatenation and slicing share the underlying Arrow buffers
//! instead of copying them.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

use arrow_array::{new_null_array, ArrayRef, RecordBatch};
use arrow_schema::{Field, Schema, SchemaRef};

use crate::error::{Error, Result};

/// Row labels of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIndex {
    /// Contiguous labels `start..end`.
    Range(Range<usize>),
    /// Arbitrary labels, one per row.
    Labels(Vec<usize>),
}

impl RowIndex {
    /// Fresh `0..len` labels.
    pub fn contiguous(len: usize) -> Self {
        RowIndex::Range(0..len)
    }

    pub fn len(&self) -> usize {
        match self {
            RowIndex::Range(r) => r.len(),
            RowIndex::Labels(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when labels are exactly `0..len`.
    pub fn is_default(&self) -> bool {
        match self {
            RowIndex::Range(r) => r.start == 0,
            RowIndex::Labels(labels) => labels.iter().enumerate().all(|(i, &l)| i == l),
        }
    }

    pub fn to_vec(&self) -> Vec<usize> {
        match self {
            RowIndex::Range(r) => r.clone().collect(),
            RowIndex::Labels(labels) => labels.clone(),
        }
    }

    fn slice(&self, offset: usize, len: usize) -> Self {
        match self {
            RowIndex::Range(r) => RowIndex::Range(r.start + offset..r.start + offset + len),
            RowIndex::Labels(labels) => RowIndex::Labels(labels[offset..offset + len].to_vec()),
        }
    }
}

/// A table of rows by named columns.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
    index: RowIndex,
}

impl Dataset {
    /// A dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            schema: Arc::new(Schema::empty()),
            batches: Vec::new(),
            index: RowIndex::contiguous(0),
        }
    }

    /// Build a dataset from batches that all carry `schema`'s fields.
    pub fn try_new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Result<Self> {
        for (i, batch) in batches.iter().enumerate() {
            if batch.schema().fields() != schema.fields() {
                return Err(Error::Schema(format!(
                    "batch {i} has columns [{}], expected [{}]",
                    column_list(&batch.schema()),
                    column_list(&schema)
                )));
            }
        }
        let rows = batches.iter().map(RecordBatch::num_rows).sum();
        Ok(Self {
            schema,
            batches,
            index: RowIndex::contiguous(rows),
        })
    }

    pub fn from_batch(batch: RecordBatch) -> Self {
        let rows = batch.num_rows();
        Self {
            schema: batch.schema(),
            batches: vec![batch],
            index: RowIndex::contiguous(rows),
        }
    }

    pub fn schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    pub fn num_rows(&self) -> usize {
        self.index.len()
    }

    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows(), self.num_columns())
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.schema.fields().iter().map(|f| f.name().as_str()).collect()
    }

    /// Replace the row labels with `0..rows`.
    pub fn reset_index(&mut self) {
        self.index = RowIndex::contiguous(self.num_rows());
    }

    /// Rows `offset..offset + len` by position, keeping their labels.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Dataset> {
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= self.num_rows())
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "row slice {offset}..{} out of bounds for {} rows",
                    offset.saturating_add(len),
                    self.num_rows()
                ))
            })?;

        let mut batches = Vec::new();
        let mut batch_start = 0usize;
        for batch in &self.batches {
            let batch_end = batch_start + batch.num_rows();
            let lo = offset.max(batch_start);
            let hi = end.min(batch_end);
            if lo < hi {
                batches.push(batch.slice(lo - batch_start, hi - lo));
            }
            if batch_end >= end {
                break;
            }
            batch_start = batch_end;
        }

        Ok(Dataset {
            schema: Arc::clone(&self.schema),
            batches,
            index: self.index.slice(offset, len),
        })
    }

    /// Stack datasets vertically, in order.
    ///
    /// Columns are aligned by name in first-seen order. A column absent from
    /// one part is null for that part's rows; the same name with two different
    /// types is a schema error. With `reset_index` the result is labelled
    /// `0..rows`, otherwise each part keeps its own labels.
    pub fn concat(parts: Vec<Dataset>, reset_index: bool) -> Result<Dataset> {
        if parts.is_empty() {
            return Ok(Dataset::empty());
        }

        let schema = unify_schemas(&parts)?;
        let rows: usize = parts.iter().map(Dataset::num_rows).sum();

        let index = if reset_index {
            RowIndex::contiguous(rows)
        } else if parts.len() == 1 {
            parts[0].index.clone()
        } else {
            RowIndex::Labels(parts.iter().flat_map(|p| p.index.to_vec()).collect())
        };

        let mut batches = Vec::with_capacity(parts.iter().map(|p| p.batches.len()).sum());
        for part in parts {
            if part.schema.fields() == schema.fields() {
                batches.extend(part.batches);
                continue;
            }
            for batch in &part.batches {
                batches.push(align_batch(batch, &schema)?);
            }
        }

        tracing::trace!(rows, batches = batches.len(), "concatenated datasets");
        Ok(Dataset {
            schema,
            batches,
            index,
        })
    }

    /// Materialize all rows into a single batch.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        Ok(arrow_select::concat::concat_batches(
            &self.schema,
            &self.batches,
        )?)
    }
}

fn column_list(schema: &Schema) -> String {
    schema
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Union of the parts' columns by name, in first-seen order.
fn unify_schemas(parts: &[Dataset]) -> Result<SchemaRef> {
    let first = &parts[0].schema;
    if parts.iter().all(|p| p.schema.fields() == first.fields()) {
        return Ok(Arc::clone(first));
    }

    let mut fields: Vec<Field> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for part in parts {
        for field in part.schema.fields() {
            match positions.get(field.name()) {
                Some(&pos) => {
                    let existing = &mut fields[pos];
                    if existing.data_type() != field.data_type() {
                        return Err(Error::Schema(format!(
                            "column '{}' is {} in one part and {} in another",
                            field.name(),
                            existing.data_type(),
                            field.data_type()
                        )));
                    }
                    if field.is_nullable() && !existing.is_nullable() {
                        *existing = existing.clone().with_nullable(true);
                    }
                }
                None => {
                    positions.insert(field.name().clone(), fields.len());
                    fields.push(Field::clone(field));
                }
            }
        }
    }

    // Columns some part lacks get filled with nulls.
    for field in fields.iter_mut() {
        let everywhere = parts
            .iter()
            .all(|p| p.schema.field_with_name(field.name()).is_ok());
        if !everywhere {
            *field = field.clone().with_nullable(true);
        }
    }

    Ok(Arc::new(Schema::new(fields)))
}

fn align_batch(batch: &RecordBatch, schema: &SchemaRef) -> Result<RecordBatch> {
    let source = batch.schema();
    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .map(|field| match source.index_of(field.name()) {
            Ok(i) => Arc::clone(batch.column(i)),
            Err(_) => new_null_array(field.data_type(), batch.num_rows()),
        })
        .collect();
    Ok(RecordBatch::try_new(Arc::clone(schema), columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::{Array, Int64Array, StringArray};
    use arrow_schema::DataType;

    fn batch(ids: &[i64], names: &[&str]) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(ids.to_vec())),
                Arc::new(StringArray::from(names.to_vec())),
            ],
        )
        .unwrap()
    }

    fn ids(data: &Dataset) -> Vec<i64> {
        let batch = data.to_record_batch().unwrap();
        let col = batch
            .column_by_name("id")
            .unwrap()
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        col.values().to_vec()
    }

    #[test]
    fn shape_and_index() {
        let data = Dataset::from_batch(batch(&[1, 2, 3], &["a", "b", "c"]));
        assert_eq!(data.shape(), (3, 2));
        assert_eq!(data.column_names(), vec!["id", "name"]);
        assert_eq!(data.index(), &RowIndex::Range(0..3));
        assert!(data.index().is_default());
    }

    #[test]
    fn slice_spans_batches() {
        let data = Dataset::concat(
            vec![
                Dataset::from_batch(batch(&[0, 1, 2], &["a", "b", "c"])),
                Dataset::from_batch(batch(&[3, 4], &["d", "e"])),
                Dataset::from_batch(batch(&[5, 6, 7], &["f", "g", "h"])),
            ],
            true,
        )
        .unwrap();

        let middle = data.slice(2, 4).unwrap();
        assert_eq!(middle.num_rows(), 4);
        assert_eq!(ids(&middle), vec![2, 3, 4, 5]);
        assert_eq!(middle.index(), &RowIndex::Range(2..6));

        let tail = data.slice(8, 0).unwrap();
        assert_eq!(tail.num_rows(), 0);
        assert!(tail.batches().is_empty());
    }

    #[test]
    fn slice_out_of_bounds() {
        let data = Dataset::from_batch(batch(&[1, 2], &["a", "b"]));
        assert!(matches!(data.slice(1, 2), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn concat_keeps_labels_without_reset() {
        let parts = vec![
            Dataset::from_batch(batch(&[10, 11], &["a", "b"])),
            Dataset::from_batch(batch(&[12, 13, 14], &["c", "d", "e"])),
        ];
        let kept = Dataset::concat(parts.clone(), false).unwrap();
        assert_eq!(kept.index().to_vec(), vec![0, 1, 0, 1, 2]);
        assert!(!kept.index().is_default());

        let reset = Dataset::concat(parts, true).unwrap();
        assert_eq!(reset.index(), &RowIndex::Range(0..5));
        assert_eq!(ids(&reset), vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn concat_aligns_columns_by_name() {
        let score_schema = Arc::new(Schema::new(vec![
            Field::new("name", DataType::Utf8, true),
            Field::new("score", DataType::Int64, false),
            Field::new("id", DataType::Int64, false),
        ]));
        let other = RecordBatch::try_new(
            score_schema,
            vec![
                Arc::new(StringArray::from(vec!["z"])),
                Arc::new(Int64Array::from(vec![99])),
                Arc::new(Int64Array::from(vec![7])),
            ],
        )
        .unwrap();

        let data = Dataset::concat(
            vec![
                Dataset::from_batch(batch(&[1, 2], &["a", "b"])),
                Dataset::from_batch(other),
            ],
            true,
        )
        .unwrap();

        assert_eq!(data.column_names(), vec!["id", "name", "score"]);
        assert_eq!(ids(&data), vec![1, 2, 7]);
        let all = data.to_record_batch().unwrap();
        let score = all.column_by_name("score").unwrap();
        assert_eq!(score.null_count(), 2);
        assert!(data.schema().field_with_name("score").unwrap().is_nullable());
    }

    #[test]
    fn concat_rejects_conflicting_types() {
        let strings = Arc::new(Schema::new(vec![Field::new("id", DataType::Utf8, false)]));
        let other = RecordBatch::try_new(strings, vec![Arc::new(StringArray::from(vec!["x"]))])
            .unwrap();
        let err = Dataset::concat(
            vec![
                Dataset::from_batch(batch(&[1], &["a"])),
                Dataset::from_batch(other),
            ],
            true,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Schema(ref msg) if msg.contains("'id'")));
    }

    #[test]
    fn concat_widens_nullability() {
        let strict = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, false)]));
        let loose = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, true)]));
        let first =
            RecordBatch::try_new(strict, vec![Arc::new(Int64Array::from(vec![1, 2]))]).unwrap();
        let second = RecordBatch::try_new(
            loose,
            vec![Arc::new(Int64Array::from(vec![Some(3), None]))],
        )
        .unwrap();

        let data = Dataset::concat(
            vec![Dataset::from_batch(first), Dataset::from_batch(second)],
            true,
        )
        .unwrap();
        assert_eq!(data.shape(), (4, 1));
        assert!(data.schema().field_with_name("id").unwrap().is_nullable());

        let all = data.to_record_batch().unwrap();
        let id = all.column_by_name("id").unwrap();
        assert_eq!(id.null_count(), 1);
        assert!(id.is_null(3));
    }

    #[test]
    fn concat_nothing_is_empty() {
        let data = Dataset::concat(Vec::new(), true).unwrap();
        assert_eq!(data.shape(), (0, 0));
    }

    #[test]
    fn try_new_checks_batch_schemas() {
        let good = batch(&[1], &["a"]);
        let other = Arc::new(Schema::new(vec![Field::new("x", DataType::Int64, false)]));
        let bad = RecordBatch::try_new(other, vec![Arc::new(Int64Array::from(vec![1]))]).unwrap();
        let err = Dataset::try_new(good.schema(), vec![good, bad]).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }
}
