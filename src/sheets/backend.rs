//! # Sheet Backend
//!
//! The narrow interface the record store needs from a spreadsheet:
//! read every data row, append one row, overwrite one row in place.

use super::errors::SheetResult;

/// One spreadsheet row, cells as displayed text
pub type Row = Vec<String>;

/// Spreadsheet transport
///
/// Rows are addressed by zero-based data index: index 0 is the first row
/// below the header. Implementations translate to their own addressing.
/// Reads may return rows shorter than the table width when trailing cells
/// are empty.
pub trait SheetBackend: Send + Sync {
    /// Every data row, top to bottom
    fn read_rows(&self) -> SheetResult<Vec<Row>>;

    /// Append one row after the last data row
    fn append_row(&self, row: Row) -> SheetResult<()>;

    /// Overwrite the data row at `index`
    fn update_row(&self, index: usize, row: Row) -> SheetResult<()>;
}

impl<B: SheetBackend + ?Sized> SheetBackend for std::sync::Arc<B> {
    fn read_rows(&self) -> SheetResult<Vec<Row>> {
        (**self).read_rows()
    }

    fn append_row(&self, row: Row) -> SheetResult<()> {
        (**self).append_row(row)
    }

    fn update_row(&self, index: usize, row: Row) -> SheetResult<()> {
        (**self).update_row(index, row)
    }
}
