//! # Record Store
//!
//! Maps follow-up records onto a spreadsheet through [`SheetBackend`].
//!
//! Create and update are read-modify-write: every record is read to pick the
//! next id or locate the target row, then one row is written. Within this
//! process the two steps run under a write lock, so concurrent creates never
//! share an id and concurrent updates never interleave. Writers in other
//! processes are not coordinated with; between them the last write wins.

use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};

use crate::observability::Logger;
use crate::sheets::SheetBackend;

use super::errors::{RecordError, RecordResult};
use super::layout::ColumnLayout;
use super::record::{NewRecord, Record};
use super::status::Status;

/// Result of an update that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The row was rewritten; carries the record as written
    Updated(Record),
    /// No record has the requested id; nothing was written
    NotFound,
}

pub struct RecordStore<B: SheetBackend> {
    backend: B,
    layout: ColumnLayout,
    write_lock: Mutex<()>,
}

impl<B: SheetBackend> RecordStore<B> {
    pub fn new(backend: B, layout: ColumnLayout) -> Self {
        Self {
            backend,
            layout,
            write_lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Every record in sheet order
    pub fn list(&self) -> RecordResult<Vec<Record>> {
        let rows = self.backend.read_rows()?;
        Ok(rows.iter().map(|row| self.layout.to_record(row)).collect())
    }

    /// Append a record and return its assigned id
    pub fn create(&self, new: NewRecord) -> RecordResult<String> {
        let status: Status = new.status.parse()?;

        let _guard = self.lock_writes()?;
        let records = self.list()?;
        let id = next_id(&records);

        let record = Record {
            id: id.clone(),
            name: new.name,
            phone: new.phone,
            assigned_to: new.assigned_to,
            category: new.category,
            status: status.as_str().to_string(),
            last_updated: timestamp_now(),
            notes: new.notes.unwrap_or_default(),
        };
        self.backend.append_row(self.layout.to_row(&record))?;

        Logger::info(
            "RECORD_CREATED",
            &[("id", id.as_str()), ("status", status.as_str())],
        );
        Ok(id)
    }

    /// Set a record's status and notes, refreshing its timestamp
    ///
    /// Name, phone, assignee and category are carried over from the row as
    /// read. Absent notes clear the notes cell.
    pub fn update(
        &self,
        id: &str,
        status: &str,
        notes: Option<&str>,
    ) -> RecordResult<UpdateOutcome> {
        let status: Status = status.parse()?;

        let _guard = self.lock_writes()?;
        let records = self.list()?;
        let Some(index) = records.iter().position(|r| r.id == id) else {
            Logger::warn("RECORD_UPDATE_NOT_FOUND", &[("id", id)]);
            return Ok(UpdateOutcome::NotFound);
        };

        let updated = Record {
            status: status.as_str().to_string(),
            notes: notes.unwrap_or_default().to_string(),
            last_updated: timestamp_now(),
            ..records[index].clone()
        };
        self.backend
            .update_row(index, self.layout.to_row(&updated))?;

        Logger::info(
            "RECORD_UPDATED",
            &[("id", id), ("status", status.as_str())],
        );
        Ok(UpdateOutcome::Updated(updated))
    }

    fn lock_writes(&self) -> RecordResult<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| RecordError::Internal("record write lock poisoned".to_string()))
    }
}

/// One more than the largest numeric id, or "1" when there is none
pub fn next_id(records: &[Record]) -> String {
    records
        .iter()
        .filter_map(Record::numeric_id)
        .max_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
        .map(increment_decimal)
        .unwrap_or_else(|| "1".to_string())
}

/// Add one to a string of ASCII digits, carrying as far as needed
fn increment_decimal(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    let mut carried = String::with_capacity(bytes.len() + 1);
    carried.push('1');
    carried.push_str(&String::from_utf8_lossy(&bytes));
    carried
}

/// Current UTC time, ISO-8601 with microseconds and a `+00:00` offset
fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}
