//! Title catalog: records, validation, storage and persistence.
//!
//! # File Layout
//!
//! ```text
//! titles.txt
//! ├── live titles          # one pipe-delimited record per line
//! └── restored titles      # same record plus |YYYY-MM-DD
//! ```

pub mod call_number;
pub mod error;
pub mod record;
pub mod store;
pub mod title;

pub use call_number::InvalidCallNumber;
pub use error::{CatalogError, Collection, RecordError};
pub use record::{month_from_name, parse_line, Record};
pub use store::{
    Capacity, Catalog, LoadReport, RestoreFailure, RestoreReport, SkipReason, SkippedLine,
};
pub use title::{RestoredTitle, Title, TitleKind, RESTORATION_AGE_YEARS};
