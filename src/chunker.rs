// Row-aligned work unit enumeration
//
// Walks row boundaries greedily, accumulating rows into a unit until its
// byte span reaches the threshold. Runs serially before any task starts;
// uses the non-mutating row scanner so field terminators stay intact for
// the chunk parsers.

use crate::core::next_row;

/// One byte range of the data buffer together with its row count; the
/// input to one chunk parser task.
///
/// `begin` and `end` sit immediately after a row delimiter or at the
/// buffer's ends, so the range holds exactly `rows` complete rows. Units
/// of one file are contiguous, non-overlapping and cover the data range
/// entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkUnit {
    pub begin: usize,
    pub end: usize,
    pub rows: usize,
}

/// Split `buf[..end]` into row-aligned work units of at least
/// `buffer_size` bytes each (the last unit may be short; a single row
/// longer than the threshold yields an oversized unit).
pub fn split_rows(buf: &[u8], end: usize, buffer_size: usize) -> Vec<WorkUnit> {
    // A zero threshold would never make progress.
    let threshold = buffer_size.max(1);
    let mut units = Vec::new();
    let mut position = 0;

    while position < end {
        let start = position;
        let mut rows = 0;
        // Accumulate rows until the span crosses the threshold or the data
        // ends.
        while position < end && position - start < threshold {
            position = next_row(buf, position, end);
            rows += 1;
        }
        units.push(WorkUnit {
            begin: start,
            end: position,
            rows,
        });
    }

    units
}
