// Fixed CSV grammar bytes shared by the scanners, the meta loader and the
// unescape routine. These are format constants, not runtime configuration:
// the writer side of the format uses the same values.

/// Byte between fields within a row.
pub const SEPARATOR: u8 = b',';

/// Byte between rows.
pub const ROW_DELIMITER: u8 = b'\n';

/// Byte that wraps fields containing separators, delimiters or quotes.
/// Doubled inside a quoted field to mean a literal quote.
pub const QUOTE: u8 = b'"';

/// Suffix appended to a data file path to locate its schema descriptor.
pub const META_FILE_EXTENSION: &str = ".meta";
