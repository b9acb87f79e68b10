// Parallel file-to-table orchestration using Rayon
//
// Strategy:
// 1. Load the sidecar descriptor into a table skeleton.
// 2. Read the whole file into one buffer with a trailing NUL sentinel.
// 3. Single-threaded: walk row boundaries into row-aligned work units.
// 4. Parallel: one task per unit parses its rows into typed column
//    builders and seals them into the unit's chunk slot.
// 5. Append chunks to the table in unit order, independent of completion
//    order, so output is deterministic for a given input and threshold.
//
// Tasks share the buffer without synchronization because each receives a
// disjoint `&mut` sub-slice: the field scanner's NUL overwrites cannot
// land outside the owning task's range.

use std::path::Path;
use std::sync::OnceLock;

use log::debug;
use rayon::prelude::*;

use crate::chunker::split_rows;
use crate::column::ColumnBuilder;
use crate::core::next_field;
use crate::error::{ParseError, Result};
use crate::format::ROW_DELIMITER;
use crate::meta::load_meta;
use crate::table::{Chunk, Table};

static CSV_POOL: OnceLock<Option<rayon::ThreadPool>> = OnceLock::new();

fn get_pool() -> Option<&'static rayon::ThreadPool> {
    CSV_POOL
        .get_or_init(|| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(recommended_threads())
                .thread_name(|i| format!("csvtable-{i}"))
                .build()
                .ok()
        })
        .as_ref()
}

/// Run a closure on the dedicated CSV thread pool, falling back to the
/// global pool.
fn run_parallel<T: Send, F: FnOnce() -> T + Send>(f: F) -> T {
    match get_pool() {
        Some(pool) => pool.install(f),
        None => f(),
    }
}

/// Pool size based on the system.
fn recommended_threads() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get().min(8))
        .unwrap_or(4)
}

/// Parallel RFC 4180 CSV loader producing a chunked columnar table.
///
/// The schema comes from the sidecar descriptor next to the data file;
/// the data file is split into row-aligned work units of roughly
/// `buffer_size` bytes, parsed concurrently.
#[derive(Debug, Clone)]
pub struct CsvParser {
    buffer_size: usize,
}

impl CsvParser {
    /// `buffer_size` is the byte span one work unit must reach before the
    /// chunker closes it.
    pub fn new(buffer_size: usize) -> Self {
        CsvParser { buffer_size }
    }

    /// Load `path` and its sidecar descriptor into a table.
    ///
    /// Returns the complete table or the first error observed; a failed
    /// parse never exposes partial results.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<Table> {
        self.parse_file(path.as_ref())
    }

    fn parse_file(&self, path: &Path) -> Result<Table> {
        let mut table = load_meta(path)?;

        let mut buf = std::fs::read(path)?;
        let data_end = buf.len();
        if data_end == 0 {
            return Ok(table);
        }
        // Trailing sentinel: keeps the final field's NUL overwrite inside
        // the buffer when the last row lacks a delimiter.
        buf.push(0);

        let units = split_rows(&buf, data_end, self.buffer_size);
        debug!(
            "parsing {} ({} bytes) as {} work units",
            path.display(),
            data_end,
            units.len()
        );

        // One chunk slot per unit; slots are filled by the tasks through
        // disjoint borrows and appended in unit order below.
        let mut chunks: Vec<Chunk> = vec![Chunk::new(); units.len()];

        // Disjoint mutable sub-slices of the buffer, one per unit. The
        // last slice carries the sentinel byte.
        let mut slices: Vec<&mut [u8]> = Vec::with_capacity(units.len());
        let mut rest = buf.as_mut_slice();
        let mut offset = 0;
        for (i, unit) in units.iter().enumerate() {
            let last = i + 1 == units.len();
            let slice_end = if last { unit.end + 1 } else { unit.end };
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(slice_end - offset);
            slices.push(head);
            rest = tail;
            offset = unit.end;
        }

        run_parallel(|| {
            units
                .par_iter()
                .zip(slices.into_par_iter())
                .zip(chunks.par_iter_mut())
                .try_for_each(|((unit, slice), chunk)| {
                    parse_chunk(slice, unit.end - unit.begin, &table, unit.rows, chunk)
                })
        })?;

        for chunk in chunks {
            table.add_chunk(chunk);
        }
        debug!("parsed {} rows from {}", table.row_count(), path.display());

        Ok(table)
    }
}

/// Parse one work unit's rows into its chunk slot.
///
/// `buf` is the unit's sub-slice of the file buffer and `end` the length
/// of its data range; the slice may extend one sentinel byte further.
fn parse_chunk(
    buf: &mut [u8],
    end: usize,
    table: &Table,
    rows: usize,
    chunk: &mut Chunk,
) -> Result<()> {
    if end == 0 {
        return Ok(());
    }

    let mut builders: Vec<ColumnBuilder> = table
        .column_defs()
        .iter()
        .map(|def| ColumnBuilder::with_capacity(def.data_type, rows))
        .collect();

    let mut current_column = 0;
    let mut current_row = 0;
    let mut pos = 0;

    while pos < end {
        let (term, last) = next_field(buf, pos, end)?;
        if current_column == builders.len() {
            return Err(ParseError::TooManyValues);
        }
        builders[current_column].insert(&buf[pos..term], current_row)?;
        current_column += 1;
        pos = (term + 1).min(end);

        // A row delimiter (or the end of the range) closes the row; the
        // field count must match the schema exactly.
        if pos == end || last == ROW_DELIMITER {
            if current_column != builders.len() {
                return Err(ParseError::NotEnoughValues);
            }
            current_row += 1;
            current_column = 0;
        }
    }

    for builder in builders {
        chunk.add_column(builder.finish());
    }
    Ok(())
}
