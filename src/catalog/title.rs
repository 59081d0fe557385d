//! Title records held by the catalog.
//!
//! A [`Title`] carries the fields every catalog entry shares; the
//! variant-specific fields live in [`TitleKind`].

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, Local, NaiveDate};

/// Minimum age in years before a title is due for restoration
pub const RESTORATION_AGE_YEARS: i32 = 50;

/// Variant-specific fields of a title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleKind {
    /// A book, identified by author and ISBN
    Book { author: String, isbn: String },

    /// A periodical issue
    Periodical { month: i32, issue: u32 },
}

impl TitleKind {
    /// Call number prefix letter for this variant
    pub fn prefix(&self) -> char {
        match self {
            TitleKind::Book { .. } => 'B',
            TitleKind::Periodical { .. } => 'P',
        }
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    /// Catalog identifier, `B|P-ddd-ddd-ddd`
    pub call_number: String,

    /// Title as printed on the item
    pub title: String,

    pub publisher: String,

    /// Publication year
    pub year: i32,

    /// Number of copies held
    pub copies: u32,

    pub kind: TitleKind,
}

impl Title {
    /// Create a book entry
    pub fn book(
        call_number: impl Into<String>,
        title: impl Into<String>,
        publisher: impl Into<String>,
        year: i32,
        copies: u32,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            call_number: call_number.into(),
            title: title.into(),
            publisher: publisher.into(),
            year,
            copies,
            kind: TitleKind::Book {
                author: author.into(),
                isbn: isbn.into(),
            },
        }
    }

    /// Create a periodical entry
    pub fn periodical(
        call_number: impl Into<String>,
        title: impl Into<String>,
        publisher: impl Into<String>,
        year: i32,
        copies: u32,
        month: i32,
        issue: u32,
    ) -> Self {
        Self {
            call_number: call_number.into(),
            title: title.into(),
            publisher: publisher.into(),
            year,
            copies,
            kind: TitleKind::Periodical { month, issue },
        }
    }

    pub fn is_book(&self) -> bool {
        matches!(self.kind, TitleKind::Book { .. })
    }

    pub fn is_periodical(&self) -> bool {
        matches!(self.kind, TitleKind::Periodical { .. })
    }

    /// Whether the title is due for restoration this year (local clock)
    pub fn is_restorable(&self) -> bool {
        self.is_restorable_in(Local::now().year())
    }

    /// Whether the title is due for restoration in `current_year`
    pub fn is_restorable_in(&self, current_year: i32) -> bool {
        i64::from(current_year) - i64::from(self.year) >= i64::from(RESTORATION_AGE_YEARS)
    }

    /// Check that the call number prefix matches the variant
    pub fn kind_matches_call_number(&self) -> bool {
        self.call_number.starts_with(self.kind.prefix())
    }

    /// Compare two titles by publication year only
    pub fn cmp_by_year(&self, other: &Title) -> Ordering {
        self.year.cmp(&other.year)
    }

    /// Render the pipe-delimited file record (no escaping of embedded pipes)
    pub fn to_record(&self) -> String {
        let header = format!(
            "{}|{}|{}|{}|{}",
            self.call_number, self.title, self.publisher, self.year, self.copies
        );
        match &self.kind {
            TitleKind::Book { author, isbn } => format!("{}|{}|{}", header, author, isbn),
            TitleKind::Periodical { month, issue } => format!("{}|{}|{}", header, month, issue),
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12}\t{:<35}\t{:<25}\t{:<5}\t{:<7}",
            self.call_number, self.title, self.publisher, self.year, self.copies
        )?;
        match &self.kind {
            TitleKind::Book { author, isbn } => write!(f, "\t{:<15}\t{:<10}", author, isbn),
            TitleKind::Periodical { month, issue } => write!(f, "\t{:<15}\t{:<10}", month, issue),
        }
    }
}

/// A title that has been archived, with the date it was restored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredTitle {
    pub title: Title,
    pub restored_on: NaiveDate,
}

impl RestoredTitle {
    pub fn new(title: Title, restored_on: NaiveDate) -> Self {
        Self { title, restored_on }
    }

    /// Call number of the archived title
    pub fn call_number(&self) -> &str {
        &self.title.call_number
    }

    /// Title record followed by the ISO restoration date
    pub fn to_record(&self) -> String {
        format!("{}|{}", self.title.to_record(), self.restored_on.format("%Y-%m-%d"))
    }
}

impl fmt::Display for RestoredTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.title, self.restored_on.format("%Y-%m-%d"))
    }
}
