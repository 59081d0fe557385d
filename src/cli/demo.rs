//! Scripted walkthrough of every catalog operation.
//!
//! Runs a fixed sequence of lookups, edits, saves and restorations against a
//! catalog file and prints each step. The file is rewritten along the way.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use tracing::info;

use super::report;
use crate::catalog::{Capacity, Catalog};

fn heading<W: Write>(out: &mut W, step: u32, text: &str) -> Result<()> {
    writeln!(out, "\nTest case {}: {}", step, text)?;
    Ok(())
}

fn save<W: Write>(out: &mut W, catalog: &Catalog, path: &Path) -> Result<()> {
    report::save_catalog(out, catalog, path)?;
    Ok(())
}

/// Run the demonstration against `path`, treating `today` as the current date
pub fn run<W: Write>(out: &mut W, path: &Path, capacity: Capacity, today: NaiveDate) -> Result<()> {
    let year = today.year();
    let file_name = path.display();
    info!(path = %path.display(), %today, "Running catalog demo");

    let mut catalog = Catalog::with_capacity(capacity);
    heading(out, 1, "create a new catalog")?;
    writeln!(out, "A new catalog was created with {} titles", catalog.len())?;

    heading(out, 2, "read titles from the file")?;
    catalog = report::open_catalog(out, path, capacity)?;
    writeln!(out, "{} titles read into the catalog", catalog.len())?;

    heading(out, 3, "view all titles")?;
    writeln!(out, "{}", catalog)?;

    heading(out, 4, "find title by call number (successful)")?;
    report::find_by_call_number(out, &catalog, "B-111-111-111")?;

    heading(out, 5, "find title by call number (fail)")?;
    report::find_by_call_number(out, &catalog, "P-333-333-333")?;

    heading(out, 6, "find title by call number (invalid call number)")?;
    report::find_by_call_number(out, &catalog, "B-333-333")?;

    heading(out, 7, "find titles by title (one title found)")?;
    report::find_by_title(out, &catalog, "Computer Systems")?;

    heading(out, 8, "find titles by title (more than one title found)")?;
    report::find_by_title(out, &catalog, "Introduction to C language")?;

    heading(out, 9, "find titles by title (no title found)")?;
    report::find_by_title(out, &catalog, "Introduction to Python")?;

    heading(out, 10, "find titles by year (one title found)")?;
    report::find_by_year(out, &catalog, 2021)?;

    heading(out, 11, "find titles by year (more than one title found)")?;
    report::find_by_year(out, &catalog, 2020)?;

    heading(out, 12, "find titles by year (no title found)")?;
    report::find_by_year(out, &catalog, 2017)?;

    heading(out, 13, "sort the titles by year")?;
    catalog.sort();
    writeln!(out, "{}", catalog)?;

    heading(out, 14, "remove a title (successful)")?;
    report::remove(out, &mut catalog, "B-333-333-333")?;

    heading(out, 15, "remove a title (failed)")?;
    report::remove(out, &mut catalog, "B-666-666-666")?;

    heading(out, 16, "remove a title (invalid call number)")?;
    report::remove(out, &mut catalog, "P-123")?;

    heading(out, 17, "save titles to the text file")?;
    save(out, &catalog, path)?;
    writeln!(out, "{} titles saved to \"{}\"", catalog.len(), file_name)?;
    catalog = report::open_catalog(out, path, capacity)?;
    writeln!(out, "{} titles read from \"{}\"", catalog.len(), file_name)?;

    heading(out, 18, "view the restorable titles")?;
    report::view_restorable(out, &catalog, year)?;

    heading(out, 19, "view the restored titles")?;
    report::view_restored(out, &catalog)?;

    heading(out, 20, "restore the restorable titles")?;
    report::restore(out, &mut catalog, today)?;

    heading(
        out,
        21,
        "save the titles and their restoration date, if any, to the text file",
    )?;
    save(out, &catalog, path)?;
    writeln!(out, "{} titles written to the file", catalog.len())?;

    heading(
        out,
        22,
        "read the titles and their restoration date, if any, from the text file",
    )?;
    catalog = report::open_catalog(out, path, capacity)?;
    writeln!(out, "{} titles read from the file", catalog.len())?;

    heading(out, 23, "view the restorable titles (none expected)")?;
    report::view_restorable(out, &catalog, year)?;

    heading(out, 24, "view the restored titles")?;
    report::view_restored(out, &catalog)?;

    heading(out, 25, "restore the restorable titles (none expected)")?;
    report::restore(out, &mut catalog, today)?;

    Ok(())
}
