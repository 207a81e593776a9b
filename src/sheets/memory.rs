//! In-memory sheet
//!
//! Stands in for the remote spreadsheet in tests and in `serve --memory`.
//! Mirrors the remote service closely enough for the record store: rows keep
//! whatever width they were written with, and reads return them as stored.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::backend::{Row, SheetBackend};
use super::errors::{SheetError, SheetResult};

#[derive(Debug, Default)]
pub struct MemorySheet {
    rows: Mutex<Vec<Row>>,
    writes: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the sheet with data rows
    pub fn with_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<Row> = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect())
            .collect();
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    /// Snapshot of the stored rows
    pub fn rows(&self) -> Vec<Row> {
        self.lock().map(|rows| rows.clone()).unwrap_or_default()
    }

    /// Number of successful appends and updates so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail, as if the service were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> SheetResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SheetError::Unavailable("memory sheet offline".to_string()));
        }
        Ok(())
    }

    fn lock(&self) -> SheetResult<MutexGuard<'_, Vec<Row>>> {
        self.rows
            .lock()
            .map_err(|_| SheetError::Unavailable("memory sheet lock poisoned".to_string()))
    }
}

impl SheetBackend for MemorySheet {
    fn read_rows(&self) -> SheetResult<Vec<Row>> {
        self.check_available()?;
        Ok(self.lock()?.clone())
    }

    fn append_row(&self, row: Row) -> SheetResult<()> {
        self.check_available()?;
        self.lock()?.push(row);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn update_row(&self, index: usize, row: Row) -> SheetResult<()> {
        self.check_available()?;
        let mut rows = self.lock()?;
        let slot = rows.get_mut(index).ok_or(SheetError::RowOutOfRange(index))?;
        *slot = row;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
