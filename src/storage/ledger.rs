//! Ledger store
//!
//! Owns the ordered list of records for a session. The file is read once when
//! the store is opened and rewritten in full by `save`; nothing is persisted
//! in between. Order is append order and is the only order written to disk.

use std::path::{Path, PathBuf};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Record, TransactionId};
use crate::services::filter::{self, DateRange};

use super::codec::{self, ParseFailure};
use super::file_io::{read_lines, write_lines_atomic};

/// A record held by the ledger, with its session id and visibility flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: TransactionId,
    pub record: Record,
    visible: bool,
}

impl LedgerEntry {
    fn new(record: Record) -> Self {
        Self {
            id: TransactionId::new(),
            record,
            visible: true,
        }
    }

    /// Whether the record passes the active filter
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// A stored line that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the ledger file
    pub line_number: usize,
    pub line: String,
    pub reason: ParseFailure,
}

/// Outcome of reading the ledger file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Read all well-formed records from a ledger file
///
/// A missing file yields an empty ledger. Malformed lines are left out of the
/// records and listed in the report.
pub fn load_records<P: AsRef<Path>>(path: P) -> TrackerResult<(Vec<Record>, LoadReport)> {
    let path = path.as_ref();
    let Some(lines) = read_lines(path)? else {
        tracing::debug!(path = %path.display(), "ledger file not found, starting empty");
        return Ok((Vec::new(), LoadReport::default()));
    };

    let mut records = Vec::with_capacity(lines.len());
    let mut report = LoadReport::default();

    for (index, line) in lines.into_iter().enumerate() {
        match codec::parse(&line) {
            Ok(record) => records.push(record),
            Err(reason) => {
                tracing::debug!(
                    path = %path.display(),
                    line = index + 1,
                    %reason,
                    "skipping malformed ledger line"
                );
                report.skipped.push(SkippedLine {
                    line_number: index + 1,
                    line,
                    reason,
                });
            }
        }
    }

    report.loaded = records.len();
    Ok((records, report))
}

/// Overwrite a ledger file with the given records
pub fn save_records<'a, P, I>(path: P, records: I) -> TrackerResult<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Record>,
{
    write_lines_atomic(path, records.into_iter().map(codec::serialize))
}

/// In-memory ledger bound to a file
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    date_format: String,
    entries: Vec<LedgerEntry>,
    filter: Option<DateRange>,
    dirty: bool,
}

impl LedgerStore {
    /// Create an empty store for a file without reading it
    pub fn new(path: PathBuf, date_format: impl Into<String>) -> Self {
        Self {
            path,
            date_format: date_format.into(),
            entries: Vec::new(),
            filter: None,
            dirty: false,
        }
    }

    /// Create a store and load its file
    pub fn open(path: PathBuf, date_format: impl Into<String>) -> TrackerResult<(Self, LoadReport)> {
        let mut store = Self::new(path, date_format);
        let report = store.load()?;
        Ok((store, report))
    }

    /// Replace the in-memory ledger with the file's contents
    ///
    /// Clears any active filter.
    pub fn load(&mut self) -> TrackerResult<LoadReport> {
        let (records, report) = load_records(&self.path)?;
        self.entries = records.into_iter().map(LedgerEntry::new).collect();
        self.filter = None;
        self.dirty = false;
        tracing::debug!(
            path = %self.path.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "ledger loaded"
        );
        Ok(report)
    }

    /// Write every record to the file, replacing its previous contents
    pub fn save(&mut self) -> TrackerResult<()> {
        save_records(&self.path, self.entries.iter().map(|e| &e.record))?;
        self.dirty = false;
        tracing::debug!(path = %self.path.display(), records = self.entries.len(), "ledger saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether there are changes not yet saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// All entries in ledger order
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Entries passing the active filter, in ledger order
    pub fn visible(&self) -> impl DoubleEndedIterator<Item = &LedgerEntry> {
        self.entries.iter().filter(|e| e.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    pub fn get(&self, id: TransactionId) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Current position of a record. Positions change after `remove`.
    pub fn position(&self, id: TransactionId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Id of the record at a position
    pub fn id_at(&self, index: usize) -> TrackerResult<TransactionId> {
        self.entries
            .get(index)
            .map(|e| e.id)
            .ok_or(self.out_of_range(index))
    }

    /// Append a record and return its id
    ///
    /// While a filter is active the new record's visibility is computed
    /// against it.
    pub fn add(&mut self, record: Record) -> TrackerResult<TransactionId> {
        let mut entry = LedgerEntry::new(record);
        entry.visible = self.visibility_of(&entry.record)?;
        let id = entry.id;
        self.entries.push(entry);
        self.dirty = true;
        Ok(id)
    }

    /// Overwrite every field of the record at `index`, returning the old one
    pub fn update(&mut self, index: usize, record: Record) -> TrackerResult<Record> {
        if index >= self.entries.len() {
            return Err(self.out_of_range(index));
        }
        let visible = self.visibility_of(&record)?;
        let entry = &mut self.entries[index];
        entry.visible = visible;
        self.dirty = true;
        Ok(std::mem::replace(&mut entry.record, record))
    }

    /// Overwrite the record with the given id, returning the old one
    pub fn update_by_id(&mut self, id: TransactionId, record: Record) -> TrackerResult<Record> {
        let index = self.require_position(id)?;
        self.update(index, record)
    }

    /// Delete the record at `index`; later records move down one position
    pub fn remove(&mut self, index: usize) -> TrackerResult<LedgerEntry> {
        if index >= self.entries.len() {
            return Err(self.out_of_range(index));
        }
        self.dirty = true;
        Ok(self.entries.remove(index))
    }

    /// Delete the record with the given id
    pub fn remove_by_id(&mut self, id: TransactionId) -> TrackerResult<LedgerEntry> {
        let index = self.require_position(id)?;
        self.remove(index)
    }

    /// Recompute every visibility flag against a range
    ///
    /// If any record's date cannot be read, no flag is changed and the error
    /// is returned. Returns the number of visible records.
    pub fn apply_filter(&mut self, range: DateRange) -> TrackerResult<usize> {
        let flags = self
            .entries
            .iter()
            .map(|e| filter::is_visible(&e.record, Some(&range), &self.date_format))
            .collect::<TrackerResult<Vec<bool>>>()?;

        for (entry, visible) in self.entries.iter_mut().zip(flags) {
            entry.visible = visible;
        }
        self.filter = Some(range);
        Ok(self.visible_count())
    }

    /// Make every record visible
    pub fn clear_filter(&mut self) {
        for entry in &mut self.entries {
            entry.visible = true;
        }
        self.filter = None;
    }

    pub fn active_filter(&self) -> Option<&DateRange> {
        self.filter.as_ref()
    }

    fn visibility_of(&self, record: &Record) -> TrackerResult<bool> {
        filter::is_visible(record, self.filter.as_ref(), &self.date_format)
    }

    fn require_position(&self, id: TransactionId) -> TrackerResult<usize> {
        self.position(id)
            .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))
    }

    fn out_of_range(&self, index: usize) -> TrackerError {
        TrackerError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        }
    }
}
