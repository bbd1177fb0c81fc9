//! Console progress output.

use std::io::Write;

use pqchunk_core::{ProgressEvent, ProgressSink};

/// Prints progress lines to stdout, one per file read or chunk written.
///
/// ```text
/// (1/3)      4.2KB       100 rows
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutProgress;

impl StdoutProgress {
    /// Render an event as the lines `StdoutProgress` prints for it.
    pub fn render(event: &ProgressEvent) -> String {
        match event {
            ProgressEvent::FilesDetected { count } => {
                format!("\n{count} files detected\n\nReading...")
            }
            ProgressEvent::FileRead {
                position,
                total,
                bytes,
                rows,
            }
            | ProgressEvent::ChunkWritten {
                position,
                total,
                bytes,
                rows,
                ..
            } => progress_line(*position, *total, *bytes, *rows),
            ProgressEvent::LimitReached { limit } => {
                format!("\nFile constraint ({limit}) reached")
            }
            ProgressEvent::Merging { .. } => "Merging datasets...".to_string(),
            ProgressEvent::Imported { rows, columns } => {
                format!("\nImported data shape: ({rows}, {columns})")
            }
            ProgressEvent::Exporting { rows, columns } => {
                format!("Exported data shape: ({rows}, {columns})\n\nWriting...")
            }
        }
    }
}

fn progress_line(position: usize, total: usize, bytes: u64, rows: usize) -> String {
    let counter = format!("({position}/{total})");
    let size = pqchunk_core::format_size(bytes);
    format!("{counter:<8}{size:>8}{rows:>10} rows")
}

impl ProgressSink for StdoutProgress {
    fn report(&mut self, event: ProgressEvent) {
        let mut out = std::io::stdout().lock();
        // Write errors on a closed stdout are ignored.
        let _ = writeln!(out, "{}", Self::render(&event));
    }
}
