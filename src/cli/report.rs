//! User-facing messages for catalog operations.
//!
//! Every function writes to a caller-supplied sink so the same wording is
//! used by the interactive commands and the scripted demo.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::warn;

use crate::catalog::{call_number, Capacity, Catalog, CatalogError, Title};

/// Load a catalog, reporting a missing file or skipped lines instead of failing
pub fn open_catalog<W: Write>(out: &mut W, path: &Path, capacity: Capacity) -> Result<Catalog> {
    let mut catalog = Catalog::with_capacity(capacity);

    match catalog.read_titles(path) {
        Ok(report) => {
            for skipped in &report.skipped {
                writeln!(out, "Skipped line {}: {}", skipped.line, skipped.reason)?;
            }
        }
        Err(e @ CatalogError::FileNotFound { .. }) => {
            warn!(error = %e, "Starting with an empty catalog");
            writeln!(out, "{}", e)?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(catalog)
}

/// Save a catalog, reporting a write failure instead of failing.
///
/// Returns the number of records written, or `None` when nothing was saved.
pub fn save_catalog<W: Write>(out: &mut W, catalog: &Catalog, path: &Path) -> Result<Option<usize>> {
    match catalog.save_titles(path) {
        Ok(written) => Ok(Some(written)),
        Err(e) => {
            warn!(error = %e, "Catalog not saved");
            writeln!(out, "{}", e)?;
            Ok(None)
        }
    }
}

/// Check a call number, printing the rejection when it is malformed
pub fn accept_call_number<W: Write>(out: &mut W, value: &str) -> Result<bool> {
    match call_number::check(value) {
        Ok(()) => Ok(true),
        Err(e) => {
            writeln!(out, "{}", e)?;
            Ok(false)
        }
    }
}

pub fn find_by_call_number<W: Write>(out: &mut W, catalog: &Catalog, value: &str) -> Result<()> {
    if !accept_call_number(out, value)? {
        return Ok(());
    }

    match catalog.find_by_call_number(value) {
        Some(title) => {
            writeln!(out, "Title found with call number {}:", value)?;
            writeln!(out, "{}", title)?;
        }
        None => writeln!(out, "No title found with call number {}", value)?,
    }
    Ok(())
}

fn list_matches<W: Write>(
    out: &mut W,
    matches: &[&Title],
    none: String,
    one: String,
    many: String,
) -> Result<()> {
    match matches {
        [] => writeln!(out, "{}", none)?,
        [title] => {
            writeln!(out, "{}", one)?;
            writeln!(out, "{}", title)?;
        }
        titles => {
            writeln!(out, "{}", many)?;
            for title in titles {
                writeln!(out, "{}", title)?;
            }
        }
    }
    writeln!(out)?;
    Ok(())
}

pub fn find_by_title<W: Write>(out: &mut W, catalog: &Catalog, name: &str) -> Result<()> {
    let matches = catalog.find_by_title(name);
    list_matches(
        out,
        &matches,
        format!("No titles found with the title: {}", name),
        format!("One title found with the title: {}", name),
        format!("{} titles found with the title: {}", matches.len(), name),
    )
}

pub fn find_by_year<W: Write>(out: &mut W, catalog: &Catalog, year: i32) -> Result<()> {
    let matches = catalog.find_by_year(year);
    list_matches(
        out,
        &matches,
        format!("No titles found for the year {}", year),
        format!("One title found for the year {}:", year),
        format!("{} titles found for the year {}:", matches.len(), year),
    )
}

/// Remove a title by call number; returns whether the catalog changed
pub fn remove<W: Write>(out: &mut W, catalog: &mut Catalog, value: &str) -> Result<bool> {
    if !accept_call_number(out, value)? {
        return Ok(false);
    }

    if catalog.remove(value).is_some() {
        writeln!(
            out,
            "Title with call number {} found and removed successfully.",
            value
        )?;
        writeln!(out, "{}", catalog)?;
        Ok(true)
    } else {
        writeln!(out, "Title with call number {} not found.", value)?;
        Ok(false)
    }
}

pub fn view_restorable<W: Write>(out: &mut W, catalog: &Catalog, current_year: i32) -> Result<()> {
    let due = catalog.restorable_in(current_year);
    for title in &due {
        writeln!(out, "{}", title)?;
    }

    if due.is_empty() {
        writeln!(out, "No restorable titles found")?;
    } else {
        writeln!(out, "{} title(s) due for restoration", due.len())?;
    }
    Ok(())
}

pub fn view_restored<W: Write>(out: &mut W, catalog: &Catalog) -> Result<()> {
    if catalog.restored().is_empty() {
        writeln!(out, "There are no restored titles")?;
        return Ok(());
    }

    for restored in catalog.restored() {
        writeln!(out, "{}", restored)?;
    }
    writeln!(out, "{} title(s) restored", catalog.restored_len())?;
    Ok(())
}

/// Restore every due title; returns how many were archived
pub fn restore<W: Write>(out: &mut W, catalog: &mut Catalog, today: NaiveDate) -> Result<usize> {
    let report = catalog.restore_on(today);

    for restored in &report.restored {
        writeln!(out, "{}", restored.title)?;
    }
    for failure in &report.failures {
        writeln!(
            out,
            "Error restoring title {}: {}",
            failure.call_number, failure.error
        )?;
    }

    if report.count() == 0 {
        writeln!(out, "There are no titles due for restoration")?;
    } else {
        writeln!(out, "{} title(s) restored", report.count())?;
    }
    Ok(report.count())
}
