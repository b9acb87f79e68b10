// Field and row boundary scanners using memchr (SIMD-accelerated)
//
// Two scanners with different contracts:
// - `next_field` terminates fields in place: it overwrites the separator or
//   row delimiter that ends the field with a NUL byte, so the field's bytes
//   form a zero-terminated region inside the buffer. Used by the chunk
//   parser and the meta loader.
// - `next_row` only reports boundaries and never writes. Used by the
//   chunker, which must not clobber the separators the chunk parser will
//   still need to see.

use memchr::{memchr, memchr2};

use crate::error::{ParseError, Result};
use crate::format::{QUOTE, ROW_DELIMITER, SEPARATOR};

/// Advance past one field in `buf[start..end]`.
///
/// Returns the terminator position and the terminator byte that stood there
/// (0 when the field ran to `end`). The field's bytes are
/// `&buf[start..term]`; for quoted fields this includes the surrounding
/// quotes, which the column builder unescapes later. The next field begins
/// at `term + 1`, clamped to `end`.
///
/// The byte at the terminator position is overwritten with NUL. When the
/// terminator is `end` itself, the write only happens if the caller's slice
/// extends past `end` (the trailing sentinel byte of the file buffer).
pub fn next_field(buf: &mut [u8], start: usize, end: usize) -> Result<(usize, u8)> {
    if start == end {
        return Ok((end, 0));
    }

    let term = if buf[start] == QUOTE {
        // Quoted: find the closing quote, skipping doubled quotes.
        let mut pos = start + 1;
        let after_close = loop {
            let quote = memchr(QUOTE, &buf[pos..end])
                .ok_or(ParseError::UnterminatedField)?
                + pos;
            let after = quote + 1;
            if after < end && buf[after] == QUOTE {
                // Doubled quote: a literal quote inside the field.
                pos = after + 1;
            } else {
                break after;
            }
        };
        // Only a separator, a row delimiter or `end` may follow the
        // closing quote.
        if after_close < end
            && buf[after_close] != SEPARATOR
            && buf[after_close] != ROW_DELIMITER
        {
            return Err(ParseError::CorruptField);
        }
        after_close
    } else {
        // Unquoted: jump to the first separator or row delimiter.
        memchr2(SEPARATOR, ROW_DELIMITER, &buf[start..end]).map_or(end, |i| start + i)
    };

    let last = if term < end { buf[term] } else { 0 };
    if term < buf.len() {
        buf[term] = 0;
    }
    Ok((term, last))
}

/// Advance past one complete logical row in `buf[start..end]`.
///
/// Returns the position just past the terminating row delimiter, or `end`.
/// Row delimiters inside quoted fields do not end the row. Does not mutate.
pub fn next_row(buf: &[u8], start: usize, end: usize) -> usize {
    let mut pos = start;
    let mut in_quotes = false;

    while pos < end {
        if in_quotes {
            // Inside quotes: jump to the next quote only.
            match memchr(QUOTE, &buf[pos..end]) {
                Some(offset) => {
                    in_quotes = false;
                    pos += offset + 1;
                }
                None => return end, // unclosed quote, row runs to the end
            }
        } else {
            match memchr2(QUOTE, ROW_DELIMITER, &buf[pos..end]) {
                Some(offset) => {
                    let found = pos + offset;
                    if buf[found] == QUOTE {
                        in_quotes = true;
                        pos = found + 1;
                    } else {
                        return found + 1; // past the delimiter
                    }
                }
                None => return end,
            }
        }
    }

    end
}
