// Parse failures are fatal: the loader either returns a complete table or
// an error, never a partially filled one.

use thiserror::Error;

/// Errors surfaced while loading a CSV file into a table.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A quoted field reached the end of its range with no closing quote.
    #[error("CSV field does not end properly")]
    UnterminatedField,

    /// Trailing bytes between a closing quote and the next separator or
    /// row delimiter.
    #[error("CSV file is corrupt")]
    CorruptField,

    #[error("CSV row does not contain enough values")]
    NotEnoughValues,

    #[error("CSV row contains too many values")]
    TooManyValues,

    /// The meta file declared a column type this loader does not know.
    #[error("unknown column type {0:?}")]
    UnknownColumnType(String),

    /// The meta file's chunk size field is not a nonnegative integer.
    #[error("invalid chunk size {0:?}")]
    InvalidChunkSize(String),

    /// A field's bytes could not be converted to the column's type.
    #[error("cannot convert {value:?} to {expected}")]
    InvalidValue { value: String, expected: &'static str },
}

pub type Result<T> = std::result::Result<T, ParseError>;
