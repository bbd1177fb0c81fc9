//! Row cut points for splitting a table into chunks.
//!
//! `chunks` intervals need `chunks + 1` cut points: the first is always 0 and
//! the last is always the row count. Interior points are `floor(i * rows / chunks)`,
//! so chunk sizes differ by at most one row and larger chunks come last.

use std::ops::Range;

use crate::error::{Error, Result};

/// Evenly spaced cut points over `0..=rows` delimiting `chunks` intervals.
///
/// ```
/// use pqchunk_core::cut_points;
/// assert_eq!(cut_points(10, 3).unwrap(), vec![0, 3, 6, 10]);
/// ```
pub fn cut_points(rows: usize, chunks: usize) -> Result<Vec<usize>> {
    if chunks == 0 {
        return Err(Error::InvalidArgument(
            "chunks must be at least 1".into(),
        ));
    }

    let points: Vec<usize> = (0..=chunks)
        .map(|i| ((i as u128 * rows as u128) / chunks as u128) as usize)
        .collect();

    tracing::debug!(rows, chunks, ?points, "computed chunk cut points");
    Ok(points)
}

/// Row ranges for each chunk, in order. The last range always ends at `rows`.
pub fn chunk_ranges(rows: usize, chunks: usize) -> Result<Vec<Range<usize>>> {
    let points = cut_points(rows, chunks)?;
    Ok(points.windows(2).map(|w| w[0]..w[1]).collect())
}
