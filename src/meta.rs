// Sidecar schema descriptor loader
//
// The meta file shares the data file's CSV grammar. Expected layout:
//   - a header row (skipped entirely),
//   - one row whose third field is the chunk size,
//   - one row per column: ignored field, column name, declared type.

use std::path::Path;

use memchr::memchr;

use crate::column::DataType;
use crate::core::{next_field, unescape_field};
use crate::error::{ParseError, Result};
use crate::format::{META_FILE_EXTENSION, ROW_DELIMITER};
use crate::table::Table;

/// Read the descriptor next to `data_path` and build the table skeleton.
///
/// The descriptor lives at the data path suffixed with
/// [`META_FILE_EXTENSION`]. I/O errors propagate; malformed structure
/// surfaces the field scanner's errors.
pub fn load_meta(data_path: &Path) -> Result<Table> {
    let mut meta_path = data_path.as_os_str().to_owned();
    meta_path.push(META_FILE_EXTENSION);
    parse_meta(std::fs::read(&meta_path)?)
}

fn parse_meta(mut content: Vec<u8>) -> Result<Table> {
    let end = content.len();
    // Sentinel: lets the final field terminate in place.
    content.push(0);
    let buf = content.as_mut_slice();

    // Skip the header row.
    let mut pos = memchr(ROW_DELIMITER, &buf[..end]).map_or(end, |i| i + 1);

    // Chunk size row: two ignored fields, then the size itself.
    for _ in 0..2 {
        let (term, _) = next_field(buf, pos, end)?;
        pos = (term + 1).min(end);
    }
    let (term, _) = next_field(buf, pos, end)?;
    let chunk_size = parse_chunk_size(&buf[pos..term])?;
    pos = (term + 1).min(end);

    let mut table = Table::new(chunk_size);

    // Column rows: ignored field, name, declared type.
    while pos < end {
        let (term, _) = next_field(buf, pos, end)?;
        pos = (term + 1).min(end);

        let (term, _) = next_field(buf, pos, end)?;
        let name = String::from_utf8_lossy(&unescape_field(&buf[pos..term])).into_owned();
        pos = (term + 1).min(end);

        let (term, _) = next_field(buf, pos, end)?;
        let type_name = unescape_field(&buf[pos..term]);
        let data_type = DataType::parse(&String::from_utf8_lossy(&type_name))?;
        pos = (term + 1).min(end);

        table.add_column(name, data_type);
    }

    Ok(table)
}

fn parse_chunk_size(field: &[u8]) -> Result<usize> {
    std::str::from_utf8(field)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ParseError::InvalidChunkSize(String::from_utf8_lossy(field).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_meta() {
        let table = parse_meta(
            b"PropertyType,Key,Value\n\
              ChunkSize,,100\n\
              ColumnType,a,int\n\
              ColumnType,b,float\n"
                .to_vec(),
        )
        .unwrap();
        assert_eq!(table.chunk_size(), 100);
        assert_eq!(table.col_count(), 2);
        assert_eq!(table.column_name(0), "a");
        assert_eq!(table.column_type(0), DataType::Int);
        assert_eq!(table.column_name(1), "b");
        assert_eq!(table.column_type(1), DataType::Float);
        assert_eq!(table.chunk_count(), 0);
    }

    #[test]
    fn quoted_names_and_types_are_unescaped() {
        let table = parse_meta(
            b"PropertyType,Key,Value\n\
              ChunkSize,,0\n\
              ColumnType,\"a,\"\"b\"\"\",\"string\"\n"
                .to_vec(),
        )
        .unwrap();
        assert_eq!(table.column_name(0), "a,\"b\"");
        assert_eq!(table.column_type(0), DataType::String);
    }

    #[test]
    fn missing_trailing_delimiter() {
        let table = parse_meta(
            b"PropertyType,Key,Value\nChunkSize,,7\nColumnType,x,long".to_vec(),
        )
        .unwrap();
        assert_eq!(table.chunk_size(), 7);
        assert_eq!(table.column_type(0), DataType::Long);
    }

    #[test]
    fn bad_chunk_size() {
        let err =
            parse_meta(b"PropertyType,Key,Value\nChunkSize,,many\n".to_vec()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidChunkSize(v) if v == "many"));
    }

    #[test]
    fn unknown_column_type() {
        let err = parse_meta(
            b"PropertyType,Key,Value\nChunkSize,,1\nColumnType,a,uuid\n".to_vec(),
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::UnknownColumnType(t) if t == "uuid"));
    }

    #[test]
    fn empty_meta_is_rejected() {
        assert!(parse_meta(Vec::new()).is_err());
    }

    #[test]
    fn unterminated_quote_surfaces_scanner_error() {
        let err = parse_meta(
            b"PropertyType,Key,Value\nChunkSize,,1\nColumnType,\"a,int\n".to_vec(),
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedField));
    }
}
