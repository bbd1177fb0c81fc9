//! Progress reporting for chunked reads and writes.
//!
//! Readers and writers never print. They push `ProgressEvent`s into whatever
//! `ProgressSink` the caller passes in: a console printer, nothing, or a
//! `Vec<ProgressEvent>` that records them.

use std::path::PathBuf;

use crate::size::format_size;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Files matched by the read pattern.
    FilesDetected { count: usize },
    /// One file loaded. `position` is 1-based.
    FileRead {
        position: usize,
        total: usize,
        bytes: u64,
        rows: usize,
    },
    /// The read limit stopped the scan before all files were loaded.
    LimitReached { limit: usize },
    /// Loaded files are about to be concatenated.
    Merging { files: usize },
    /// Final shape of a read.
    Imported { rows: usize, columns: usize },
    /// Shape of the dataset about to be written.
    Exporting { rows: usize, columns: usize },
    /// One chunk file written. `position` is 1-based; `bytes` is re-read from disk.
    ChunkWritten {
        position: usize,
        total: usize,
        bytes: u64,
        rows: usize,
        path: PathBuf,
    },
}

impl ProgressEvent {
    /// Human-readable file size for events that carry one.
    pub fn size(&self) -> Option<String> {
        match self {
            ProgressEvent::FileRead { bytes, .. } | ProgressEvent::ChunkWritten { bytes, .. } => {
                Some(format_size(*bytes))
            }
            _ => None,
        }
    }
}

pub trait ProgressSink {
    fn report(&mut self, event: ProgressEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _event: ProgressEvent) {}
}

impl ProgressSink for Vec<ProgressEvent> {
    fn report(&mut self, event: ProgressEvent) {
        self.push(event);
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for &mut S {
    fn report(&mut self, event: ProgressEvent) {
        (**self).report(event);
    }
}
