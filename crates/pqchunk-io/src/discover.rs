//! Dataset file discovery.
//!
//! A dataset is addressed by a path prefix: every entry matching `prefix*`
//! belongs to it. The prefix is matched literally, so a directory must be
//! given with its trailing separator (`out/`) and a name stem without one
//! (`out/data_`). Entries starting with `.` only match when the prefix
//! spells out the dot.

use std::cmp::Ordering;
use std::path::PathBuf;

use glob::{MatchOptions, Pattern};
use pqchunk_core::FileOrder;

use crate::error::{Error, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// The glob pattern a prefix expands to.
pub fn prefix_pattern(prefix: &str) -> String {
    format!("{}*", Pattern::escape(prefix))
}

/// Paths matching `prefix*`, in the requested order.
pub fn matching_files(prefix: &str, order: FileOrder) -> Result<Vec<PathBuf>> {
    let pattern = prefix_pattern(prefix);
    let mut files = Vec::new();
    for entry in glob::glob_with(&pattern, MATCH_OPTIONS)? {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            Error::io(&path, e.into_error())
        })?;
        files.push(path);
    }

    match order {
        FileOrder::Natural => files.sort_by(|a, b| {
            natural_cmp(&a.to_string_lossy(), &b.to_string_lossy())
        }),
        FileOrder::Lexical => files.sort(),
        FileOrder::Unsorted => {}
    }

    tracing::debug!(%pattern, %order, count = files.len(), "enumerated dataset files");
    Ok(files)
}

/// Compare strings treating each run of ASCII digits as one number.
///
/// `data_2` < `data_10`; on equal numeric value the run with fewer leading
/// zeros sorts first so the order stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0usize, 0usize);

    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let a_end = digit_run_end(a, i);
            let b_end = digit_run_end(b, j);
            let ord = cmp_digit_runs(&a[i..a_end], &b[j..b_end]);
            if ord != Ordering::Equal {
                return ord;
            }
            i = a_end;
            j = b_end;
        } else {
            match a[i].cmp(&b[j]) {
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
                ord => return ord,
            }
        }
    }

    (a.len() - i).cmp(&(b.len() - j))
}

fn digit_run_end(s: &[u8], start: usize) -> usize {
    s[start..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(s.len(), |n| start + n)
}

fn cmp_digit_runs(a: &[u8], b: &[u8]) -> Ordering {
    let trim = |run: &[u8]| -> usize { run.iter().take_while(|&&c| c == b'0').count() };
    let (a_sig, b_sig) = (&a[trim(a)..], &b[trim(b)..]);
    a_sig
        .len()
        .cmp(&b_sig.len())
        .then_with(|| a_sig.cmp(b_sig))
        .then_with(|| a.len().cmp(&b.len()))
}
