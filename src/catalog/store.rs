//! The in-memory catalog and its flat-file persistence.
//!
//! Live titles and restored titles are kept in two bounded, insertion-ordered
//! collections. A title is in exactly one of them at any time.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, info, warn};

use super::error::{CatalogError, Collection, RecordError};
use super::record::{parse_line, Record};
use super::title::{RestoredTitle, Title};

/// Default number of live titles a catalog holds
pub const DEFAULT_TITLE_CAPACITY: usize = 50;

/// Default number of restored titles a catalog holds
pub const DEFAULT_RESTORED_CAPACITY: usize = 25;

/// Size limits for the two catalog collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub titles: usize,
    pub restored: usize,
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            titles: DEFAULT_TITLE_CAPACITY,
            restored: DEFAULT_RESTORED_CAPACITY,
        }
    }
}

/// A file line that was not loaded
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub reason: SkipReason,
}

#[derive(Debug)]
pub enum SkipReason {
    Malformed(RecordError),
    Full(CatalogError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Malformed(e) => write!(f, "{}", e),
            SkipReason::Full(e) => write!(f, "{}", e),
        }
    }
}

/// Outcome of reading a catalog file
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records added to the live collection
    pub loaded: usize,

    /// Records added to the restored collection
    pub restored: usize,

    pub skipped: Vec<SkippedLine>,
}

/// A title that could not be archived during a restoration batch
#[derive(Debug)]
pub struct RestoreFailure {
    pub call_number: String,
    pub error: CatalogError,
}

/// Outcome of a restoration batch
#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Entries archived by this batch, in catalog order
    pub restored: Vec<RestoredTitle>,

    pub failures: Vec<RestoreFailure>,
}

impl RestoreReport {
    pub fn count(&self) -> usize {
        self.restored.len()
    }
}

/// Catalog of live and restored titles
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    titles: Vec<Title>,
    restored: Vec<RestoredTitle>,
    capacity: Capacity,
}

impl Catalog {
    /// Create an empty catalog with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(Capacity::default())
    }

    pub fn with_capacity(capacity: Capacity) -> Self {
        Self {
            titles: Vec::with_capacity(capacity.titles),
            restored: Vec::with_capacity(capacity.restored),
            capacity,
        }
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Number of live titles
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Number of restored titles
    pub fn restored_len(&self) -> usize {
        self.restored.len()
    }

    /// Live titles in catalog order
    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    /// Restored titles in the order they were archived
    pub fn restored(&self) -> &[RestoredTitle] {
        &self.restored
    }

    /// Append a live title
    pub fn add(&mut self, title: Title) -> Result<(), CatalogError> {
        if self.titles.len() >= self.capacity.titles {
            return Err(CatalogError::CapacityExceeded {
                collection: Collection::Titles,
                capacity: self.capacity.titles,
            });
        }
        self.titles.push(title);
        Ok(())
    }

    /// Append a restored title
    pub fn add_restored(&mut self, restored: RestoredTitle) -> Result<(), CatalogError> {
        if self.restored.len() >= self.capacity.restored {
            return Err(CatalogError::CapacityExceeded {
                collection: Collection::Restored,
                capacity: self.capacity.restored,
            });
        }
        self.restored.push(restored);
        Ok(())
    }

    /// Remove the first live title with this call number, keeping order
    pub fn remove(&mut self, call_number: &str) -> Option<Title> {
        let pos = self
            .titles
            .iter()
            .position(|t| t.call_number == call_number)?;
        Some(self.titles.remove(pos))
    }

    /// First live title with this call number
    pub fn find_by_call_number(&self, call_number: &str) -> Option<&Title> {
        self.titles.iter().find(|t| t.call_number == call_number)
    }

    /// All live titles with exactly this title
    pub fn find_by_title(&self, name: &str) -> Vec<&Title> {
        self.titles.iter().filter(|t| t.title == name).collect()
    }

    /// All live titles published in `year`
    pub fn find_by_year(&self, year: i32) -> Vec<&Title> {
        self.titles.iter().filter(|t| t.year == year).collect()
    }

    /// Stable sort of live titles by publication year, oldest first
    pub fn sort(&mut self) {
        self.titles.sort_by(Title::cmp_by_year);
    }

    /// Whether a restored entry already holds this call number
    pub fn is_restored(&self, call_number: &str) -> bool {
        self.restored.iter().any(|r| r.call_number() == call_number)
    }

    /// Live titles due for restoration this year
    pub fn restorable(&self) -> Vec<&Title> {
        self.restorable_in(Local::now().year())
    }

    /// Live titles due for restoration in `current_year` and not yet restored
    pub fn restorable_in(&self, current_year: i32) -> Vec<&Title> {
        self.titles
            .iter()
            .filter(|t| t.is_restorable_in(current_year) && !self.is_restored(&t.call_number))
            .collect()
    }

    /// Restore every due title with today's date
    pub fn restore(&mut self) -> RestoreReport {
        self.restore_on(Local::now().date_naive())
    }

    /// Move every title due in `date`'s year into the restored collection.
    ///
    /// Titles that do not fit stay live and are reported in
    /// [`RestoreReport::failures`]; the rest of the batch still runs.
    pub fn restore_on(&mut self, date: NaiveDate) -> RestoreReport {
        let mut report = RestoreReport::default();
        let mut kept = Vec::with_capacity(self.titles.len());

        for title in std::mem::take(&mut self.titles) {
            if !title.is_restorable_in(date.year()) || self.is_restored(&title.call_number) {
                kept.push(title);
                continue;
            }

            if self.restored.len() >= self.capacity.restored {
                warn!(call_number = %title.call_number, "Cannot restore title: restored collection is full");
                report.failures.push(RestoreFailure {
                    call_number: title.call_number.clone(),
                    error: CatalogError::CapacityExceeded {
                        collection: Collection::Restored,
                        capacity: self.capacity.restored,
                    },
                });
                kept.push(title);
                continue;
            }

            let restored = RestoredTitle::new(title, date);
            debug!(call_number = %restored.call_number(), %date, "Restored title");
            report.restored.push(restored.clone());
            self.restored.push(restored);
        }

        self.titles = kept;
        info!(
            restored = report.count(),
            failed = report.failures.len(),
            "Restoration batch finished"
        );
        report
    }

    /// Read records from a catalog file, appending to this catalog.
    ///
    /// Malformed records (including lines that are not UTF-8) and records
    /// that do not fit are skipped and listed in the report. A missing file leaves the catalog untouched.
    pub fn read_titles(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => CatalogError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => CatalogError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let mut report = LoadReport::default();
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| CatalogError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
            if read == 0 {
                break;
            }
            line_no += 1;

            let Ok(line) = std::str::from_utf8(&buf) else {
                warn!(path = %path.display(), line = line_no, "Skipping record that is not valid UTF-8");
                report.skipped.push(SkippedLine {
                    line: line_no,
                    reason: SkipReason::Malformed(RecordError::InvalidEncoding),
                });
                continue;
            };
            let line = line.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                continue;
            }

            let added = match parse_line(line) {
                Ok(Record::Live(title)) => self.add(title).map(|_| report.loaded += 1),
                Ok(Record::Restored(restored)) => {
                    self.add_restored(restored).map(|_| report.restored += 1)
                }
                Err(e) => {
                    warn!(path = %path.display(), line = line_no, error = %e, "Skipping malformed record");
                    report.skipped.push(SkippedLine {
                        line: line_no,
                        reason: SkipReason::Malformed(e),
                    });
                    continue;
                }
            };

            if let Err(e) = added {
                warn!(path = %path.display(), line = line_no, error = %e, "Skipping record");
                report.skipped.push(SkippedLine {
                    line: line_no,
                    reason: SkipReason::Full(e),
                });
            }
        }

        info!(
            path = %path.display(),
            loaded = report.loaded,
            restored = report.restored,
            skipped = report.skipped.len(),
            "Read catalog"
        );
        Ok(report)
    }

    /// Write the catalog to `path`, live titles first then restored titles.
    ///
    /// Returns the number of records written.
    pub fn save_titles(&self, path: impl AsRef<Path>) -> Result<usize, CatalogError> {
        let path = path.as_ref();
        let write_err = |source: std::io::Error| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        let mut written = 0;

        for title in self
            .titles
            .iter()
            .filter(|t| !self.is_restored(&t.call_number))
        {
            writeln!(writer, "{}", title.to_record()).map_err(write_err)?;
            written += 1;
        }

        for restored in &self.restored {
            writeln!(writer, "{}", restored.to_record()).map_err(write_err)?;
            written += 1;
        }

        writer.flush().map_err(write_err)?;

        info!(path = %path.display(), records = written, "Saved catalog");
        Ok(written)
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12}\t{:<35}\t{:<25}\t{:<5}\t{:<7}\t{:<15}\t{:<10}",
            "Call Number", "Title", "Publisher", "Year", "#Copies", "Author/Month", "ISBN/Issue"
        )?;
        for title in &self.titles {
            write!(f, "\n{}", title)?;
        }
        Ok(())
    }
}
