//! Column layouts
//!
//! Two column orders exist for the record table. `Current` is the order the
//! adapter writes today; `Legacy` is the order of older sheets, where
//! category and status precede the assignee. The live sheet's order must be
//! chosen in configuration: mixing them silently shuffles fields.

use serde::{Deserialize, Serialize};

use crate::sheets::{Row, COLUMN_COUNT};

use super::record::Record;

/// One column of the record table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Name,
    Phone,
    AssignedTo,
    Category,
    Status,
    LastUpdated,
    Notes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnLayout {
    /// id, Name, Phone, AssignedTo, Category, Status, LastUpdated, Notes
    #[default]
    Current,
    /// id, Name, Phone, Category, Status, AssignedTo, LastUpdated, Notes
    Legacy,
}

impl ColumnLayout {
    pub fn columns(&self) -> [Column; COLUMN_COUNT] {
        use Column::*;
        match self {
            ColumnLayout::Current => [
                Id, Name, Phone, AssignedTo, Category, Status, LastUpdated, Notes,
            ],
            ColumnLayout::Legacy => [
                Id, Name, Phone, Category, Status, AssignedTo, LastUpdated, Notes,
            ],
        }
    }

    /// Map a sheet row to a record; missing trailing cells read as empty and
    /// cells past the table width are ignored
    pub fn to_record(&self, row: &[String]) -> Record {
        let mut record = Record::default();
        for (position, column) in self.columns().into_iter().enumerate() {
            let cell = row.get(position).cloned().unwrap_or_default();
            *field_mut(&mut record, column) = cell;
        }
        record
    }

    /// Full-width sheet row for a record
    pub fn to_row(&self, record: &Record) -> Row {
        self.columns()
            .into_iter()
            .map(|column| field(record, column).to_string())
            .collect()
    }
}

fn field(record: &Record, column: Column) -> &str {
    match column {
        Column::Id => &record.id,
        Column::Name => &record.name,
        Column::Phone => &record.phone,
        Column::AssignedTo => &record.assigned_to,
        Column::Category => &record.category,
        Column::Status => &record.status,
        Column::LastUpdated => &record.last_updated,
        Column::Notes => &record.notes,
    }
}

fn field_mut(record: &mut Record, column: Column) -> &mut String {
    match column {
        Column::Id => &mut record.id,
        Column::Name => &mut record.name,
        Column::Phone => &mut record.phone,
        Column::AssignedTo => &mut record.assigned_to,
        Column::Category => &mut record.category,
        Column::Status => &mut record.status,
        Column::LastUpdated => &mut record.last_updated,
        Column::Notes => &mut record.notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_current_layout_mapping() {
        let record = ColumnLayout::Current.to_record(&row(&[
            "3", "Ann", "555", "Blen", "OUTREACH", "Available", "ts", "call back",
        ]));
        assert_eq!(record.id, "3");
        assert_eq!(record.assigned_to, "Blen");
        assert_eq!(record.category, "OUTREACH");
        assert_eq!(record.status, "Available");
        assert_eq!(record.notes, "call back");
    }

    #[test]
    fn test_legacy_layout_mapping() {
        let record = ColumnLayout::Legacy.to_record(&row(&[
            "3", "Ann", "555", "OUTREACH", "Available", "Blen", "ts", "",
        ]));
        assert_eq!(record.category, "OUTREACH");
        assert_eq!(record.status, "Available");
        assert_eq!(record.assigned_to, "Blen");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let record = ColumnLayout::Current.to_record(&row(&["7", "Ann"]));
        assert_eq!(record.id, "7");
        assert_eq!(record.name, "Ann");
        assert_eq!(record.phone, "");
        assert_eq!(record.notes, "");

        let empty = ColumnLayout::Current.to_record(&[]);
        assert_eq!(empty, Record::default());
    }

    #[test]
    fn test_extra_cells_are_ignored() {
        let mut cells = row(&["1", "a", "b", "c", "d", "e", "f", "g"]);
        cells.push("overflow".to_string());
        let record = ColumnLayout::Current.to_record(&cells);
        assert_eq!(record.notes, "g");
    }

    #[test]
    fn test_row_and_record_agree_for_both_layouts() {
        let record = Record {
            id: "9".into(),
            name: "Ann".into(),
            phone: "555".into(),
            assigned_to: "Blen".into(),
            category: "FIRST_TIMER".into(),
            status: "Indecisive".into(),
            last_updated: "ts".into(),
            notes: "n".into(),
        };
        for layout in [ColumnLayout::Current, ColumnLayout::Legacy] {
            let row = layout.to_row(&record);
            assert_eq!(row.len(), COLUMN_COUNT);
            assert_eq!(layout.to_record(&row), record);
        }
        assert_eq!(ColumnLayout::Current.to_row(&record)[3], "Blen");
        assert_eq!(ColumnLayout::Legacy.to_row(&record)[3], "FIRST_TIMER");
    }
}
