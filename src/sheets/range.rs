//! A1-notation ranges for the record table
//!
//! The table occupies columns `A..=H` of one sheet. Rows above
//! `first_data_row` hold headers and are never read or written.

/// Number of columns in the record table
pub const COLUMN_COUNT: usize = 8;

/// Last column letter of the record table
const LAST_COLUMN: char = 'H';

/// Range builder for one sheet of the spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRanges {
    sheet: String,
    first_data_row: u32,
}

impl SheetRanges {
    pub fn new(sheet_name: &str, first_data_row: u32) -> Self {
        Self {
            sheet: quote_sheet_name(sheet_name),
            first_data_row: first_data_row.max(1),
        }
    }

    /// Every data row, open-ended downwards, e.g. `Sheet1!A2:H`
    pub fn data(&self) -> String {
        format!("{}!A{}:{}", self.sheet, self.first_data_row, LAST_COLUMN)
    }

    /// Whole-column range the service appends after, e.g. `Sheet1!A:H`
    pub fn append(&self) -> String {
        format!("{}!A:{}", self.sheet, LAST_COLUMN)
    }

    /// 1-based sheet row number of the zero-based data row `index`
    pub fn row_number(&self, index: usize) -> u64 {
        u64::from(self.first_data_row) + index as u64
    }

    /// Single full-width row for the zero-based data row `index`, e.g. `Sheet1!A5:H5`
    pub fn row(&self, index: usize) -> String {
        let n = self.row_number(index);
        format!("{}!A{}:{}{}", self.sheet, n, LAST_COLUMN, n)
    }
}

/// Quote a sheet name for A1 notation when it contains anything but
/// ASCII alphanumerics and underscores. Embedded quotes are doubled.
fn quote_sheet_name(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_ranges() {
        let ranges = SheetRanges::new("Sheet1", 2);
        assert_eq!(ranges.data(), "Sheet1!A2:H");
        assert_eq!(ranges.append(), "Sheet1!A:H");
    }

    #[test]
    fn test_row_range_offsets_by_header() {
        let ranges = SheetRanges::new("Sheet1", 2);
        assert_eq!(ranges.row_number(0), 2);
        assert_eq!(ranges.row(0), "Sheet1!A2:H2");
        assert_eq!(ranges.row(3), "Sheet1!A5:H5");
    }

    #[test]
    fn test_no_header_rows() {
        let ranges = SheetRanges::new("Data", 1);
        assert_eq!(ranges.data(), "Data!A1:H");
        assert_eq!(ranges.row(0), "Data!A1:H1");
    }

    #[test]
    fn test_zero_first_row_is_clamped() {
        let ranges = SheetRanges::new("Data", 0);
        assert_eq!(ranges.row_number(0), 1);
    }

    #[test]
    fn test_sheet_names_are_quoted_when_needed() {
        assert_eq!(SheetRanges::new("Follow ups", 2).data(), "'Follow ups'!A2:H");
        assert_eq!(SheetRanges::new("Bob's", 2).append(), "'Bob''s'!A:H");
    }
}
