// Typed columns and their append-only builders
//
// One canonical enum per concern instead of trait objects: the declared
// type set is closed, and matching on an enum keeps the per-field insert
// path free of virtual dispatch.

use std::str::FromStr;

use crate::core::unescape_field;
use crate::error::{ParseError, Result};

/// Column types the meta file may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    Long,
    Float,
    Double,
    String,
}

impl DataType {
    /// Resolve a declared-type string from the meta file.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "int" => Ok(DataType::Int),
            "long" => Ok(DataType::Long),
            "float" => Ok(DataType::Float),
            "double" => Ok(DataType::Double),
            "string" => Ok(DataType::String),
            _ => Err(ParseError::UnknownColumnType(name.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Long => "long",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::String => "string",
        }
    }
}

/// An immutable typed value vector, the finished form of a builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    String(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Long(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Double(v) => v.len(),
            Column::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Column::Int(_) => DataType::Int,
            Column::Long(_) => DataType::Long,
            Column::Float(_) => DataType::Float,
            Column::Double(_) => DataType::Double,
            Column::String(_) => DataType::String,
        }
    }
}

/// Append-only builder for one column of one chunk.
///
/// Owns capacity for the chunk's row count up front; `insert` converts one
/// field's bytes, `finish` seals the values into a [`Column`].
#[derive(Debug)]
pub enum ColumnBuilder {
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    String(Vec<String>),
}

impl ColumnBuilder {
    /// Builder factory: variant selected by the declared type, capacity by
    /// the work unit's row count.
    pub fn with_capacity(data_type: DataType, rows: usize) -> Self {
        match data_type {
            DataType::Int => ColumnBuilder::Int(Vec::with_capacity(rows)),
            DataType::Long => ColumnBuilder::Long(Vec::with_capacity(rows)),
            DataType::Float => ColumnBuilder::Float(Vec::with_capacity(rows)),
            DataType::Double => ColumnBuilder::Double(Vec::with_capacity(rows)),
            DataType::String => ColumnBuilder::String(Vec::with_capacity(rows)),
        }
    }

    /// Convert one field and store it at `row`.
    ///
    /// Rows arrive in order within a chunk, so `row` always equals the
    /// current length. Numeric variants convert the raw bytes and reject
    /// quoted input; the string variant unescapes first.
    pub fn insert(&mut self, field: &[u8], row: usize) -> Result<()> {
        debug_assert_eq!(row, self.len());
        match self {
            ColumnBuilder::Int(v) => v.push(convert(field, "int")?),
            ColumnBuilder::Long(v) => v.push(convert(field, "long")?),
            ColumnBuilder::Float(v) => v.push(convert(field, "float")?),
            ColumnBuilder::Double(v) => v.push(convert(field, "double")?),
            ColumnBuilder::String(v) => {
                let value = unescape_field(field);
                let value = String::from_utf8(value.into_owned()).map_err(|e| {
                    ParseError::InvalidValue {
                        value: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                        expected: "string",
                    }
                })?;
                v.push(value);
            }
        }
        Ok(())
    }

    /// Seal the builder into an immutable column.
    pub fn finish(self) -> Column {
        match self {
            ColumnBuilder::Int(v) => Column::Int(v),
            ColumnBuilder::Long(v) => Column::Long(v),
            ColumnBuilder::Float(v) => Column::Float(v),
            ColumnBuilder::Double(v) => Column::Double(v),
            ColumnBuilder::String(v) => Column::String(v),
        }
    }

    fn len(&self) -> usize {
        match self {
            ColumnBuilder::Int(v) => v.len(),
            ColumnBuilder::Long(v) => v.len(),
            ColumnBuilder::Float(v) => v.len(),
            ColumnBuilder::Double(v) => v.len(),
            ColumnBuilder::String(v) => v.len(),
        }
    }
}

fn convert<T: FromStr>(field: &[u8], expected: &'static str) -> Result<T> {
    std::str::from_utf8(field)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ParseError::InvalidValue {
            value: String::from_utf8_lossy(field).into_owned(),
            expected,
        })
}
