// Columnar table: an ordered schema plus row-contiguous chunks

use crate::column::{Column, DataType};

/// One schema entry: column name and declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
}

/// A row-contiguous group of finished columns. All columns of a chunk have
/// the same length.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Chunk {
    columns: Vec<Column>,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, column: Column) {
        debug_assert!(
            self.columns.is_empty() || self.columns[0].len() == column.len(),
            "columns of one chunk must agree on row count"
        );
        self.columns.push(column);
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }
}

/// The loaded table: schema, the meta-declared chunk size hint and the
/// ordered chunk list.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    chunk_size: usize,
    columns: Vec<ColumnDef>,
    chunks: Vec<Chunk>,
}

impl Table {
    pub fn new(chunk_size: usize) -> Self {
        Table {
            chunk_size,
            columns: Vec::new(),
            chunks: Vec::new(),
        }
    }

    /// Chunk size hint declared by the meta file. Recorded at construction;
    /// the parser's own chunking is driven by its byte threshold instead.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn add_column(&mut self, name: impl Into<String>, data_type: DataType) {
        self.columns.push(ColumnDef {
            name: name.into(),
            data_type,
        });
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_defs(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column_name(&self, column_id: usize) -> &str {
        &self.columns[column_id].name
    }

    pub fn column_type(&self, column_id: usize) -> DataType {
        self.columns[column_id].data_type
    }

    pub fn add_chunk(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total rows across all chunks.
    pub fn row_count(&self) -> usize {
        self.chunks.iter().map(Chunk::row_count).sum()
    }
}
