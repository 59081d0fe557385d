//! Command-line interface for shelfmark.
//!
//! Provides commands for listing and searching the catalog, adding and
//! removing titles, sorting by year, and running the restoration workflow.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};

use crate::catalog::{call_number, Catalog, Title, TitleKind};
use crate::config::{self, ResolvedConfig};

pub mod demo;
pub mod report;

/// shelfmark - Flat-file catalog of library titles
#[derive(Parser, Debug)]
#[command(name = "shelfmark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file (overrides .shelfmark/config.yaml)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show all live titles
    List {
        /// Sort by year before printing (does not save)
        #[arg(short, long)]
        sorted: bool,
    },

    /// Find titles by call number, title or year
    Find {
        #[command(subcommand)]
        by: FindBy,
    },

    /// Remove a title by call number
    Remove {
        /// Call number (B|P-ddd-ddd-ddd)
        call_number: String,
    },

    /// Add a book or periodical
    Add {
        #[command(subcommand)]
        kind: AddKind,
    },

    /// Sort the catalog by publication year and save it
    Sort,

    /// Show titles due for restoration
    Restorable,

    /// Show restored titles
    Restored,

    /// Restore all titles due for restoration and save the catalog
    Restore,

    /// Show resolved configuration (debug)
    Config,

    /// Run the scripted demonstration against the catalog file
    Demo,
}

#[derive(Subcommand, Debug)]
pub enum FindBy {
    /// Exact call number
    CallNumber { call_number: String },

    /// Exact title
    Title { title: String },

    /// Publication year
    Year { year: i32 },
}

#[derive(Subcommand, Debug)]
pub enum AddKind {
    /// Add a book
    Book {
        /// Call number (B-ddd-ddd-ddd)
        call_number: String,
        title: String,
        publisher: String,
        year: i32,
        copies: u32,
        author: String,
        isbn: String,
    },

    /// Add a periodical
    Periodical {
        /// Call number (P-ddd-ddd-ddd)
        call_number: String,
        title: String,
        publisher: String,
        year: i32,
        copies: u32,
        /// Month of issue (1-12)
        #[arg(value_parser = clap::value_parser!(i32).range(1..=12))]
        month: i32,
        issue: u32,
    },
}

impl AddKind {
    fn into_title(self) -> Title {
        match self {
            AddKind::Book {
                call_number,
                title,
                publisher,
                year,
                copies,
                author,
                isbn,
            } => Title::book(call_number, title, publisher, year, copies, author, isbn),
            AddKind::Periodical {
                call_number,
                title,
                publisher,
                year,
                copies,
                month,
                issue,
            } => Title::periodical(call_number, title, publisher, year, copies, month, issue),
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let cfg = config::config()?;
        let path = cfg.catalog_file_or(self.file.as_deref());
        let stdout = io::stdout();
        let mut out = stdout.lock();

        match self.command {
            Commands::Config => show_config(&mut out, cfg, &path),
            Commands::Demo => {
                demo::run(&mut out, &path, cfg.capacity, Local::now().date_naive())
            }
            command => run_catalog_command(&mut out, command, &path, cfg),
        }
    }
}

/// Load the catalog, apply one command, and save when it changed
fn run_catalog_command<W: Write>(
    out: &mut W,
    command: Commands,
    path: &Path,
    cfg: &ResolvedConfig,
) -> Result<()> {
    let mut catalog = report::open_catalog(out, path, cfg.capacity)?;

    let changed = match command {
        Commands::List { sorted } => {
            if sorted {
                catalog.sort();
            }
            writeln!(out, "{}", catalog)?;
            writeln!(out, "\n{} title(s), {} restored", catalog.len(), catalog.restored_len())?;
            false
        }
        Commands::Find { by } => {
            match by {
                FindBy::CallNumber { call_number } => {
                    report::find_by_call_number(out, &catalog, &call_number)?
                }
                FindBy::Title { title } => report::find_by_title(out, &catalog, &title)?,
                FindBy::Year { year } => report::find_by_year(out, &catalog, year)?,
            }
            false
        }
        Commands::Remove { call_number } => report::remove(out, &mut catalog, &call_number)?,
        Commands::Add { kind } => add_title(out, &mut catalog, kind.into_title())?,
        Commands::Sort => {
            catalog.sort();
            writeln!(out, "{}", catalog)?;
            true
        }
        Commands::Restorable => {
            report::view_restorable(out, &catalog, Local::now().year())?;
            false
        }
        Commands::Restored => {
            report::view_restored(out, &catalog)?;
            false
        }
        Commands::Restore => report::restore(out, &mut catalog, Local::now().date_naive())? > 0,
        Commands::Config | Commands::Demo => false,
    };

    if changed {
        if let Some(written) = report::save_catalog(out, &catalog, path)? {
            writeln!(out, "{} record(s) saved to \"{}\"", written, path.display())?;
        }
    }

    Ok(())
}

/// Validate and append a new title; returns whether it was added
fn add_title<W: Write>(out: &mut W, catalog: &mut Catalog, title: Title) -> Result<bool> {
    if let Err(e) = call_number::check(&title.call_number) {
        writeln!(out, "{}", e)?;
        return Ok(false);
    }
    if !title.kind_matches_call_number() {
        writeln!(
            out,
            "Call number {} does not match a {}",
            title.call_number,
            if title.is_book() { "book (B-...)" } else { "periodical (P-...)" }
        )?;
        return Ok(false);
    }
    if let Some(field) = unstorable_field(&title) {
        writeln!(out, "Field {:?} cannot contain '|' or line breaks", field)?;
        return Ok(false);
    }
    if catalog.find_by_call_number(&title.call_number).is_some()
        || catalog.is_restored(&title.call_number)
    {
        writeln!(out, "Call number {} is already in the catalog", title.call_number)?;
        return Ok(false);
    }

    let call_number = title.call_number.clone();
    match catalog.add(title) {
        Ok(()) => {
            writeln!(out, "Title {} added", call_number)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "{}", e)?;
            Ok(false)
        }
    }
}

/// First text field that would break the pipe-delimited record
fn unstorable_field(title: &Title) -> Option<&str> {
    let mut fields = vec![title.title.as_str(), title.publisher.as_str()];
    if let TitleKind::Book { author, isbn } = &title.kind {
        fields.push(author);
        fields.push(isbn);
    }
    fields
        .into_iter()
        .find(|f| f.contains(['|', '\n', '\r']))
}

/// Show the resolved configuration (for debugging)
fn show_config<W: Write>(out: &mut W, cfg: &ResolvedConfig, path: &Path) -> Result<()> {
    writeln!(
        out,
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    )?;
    writeln!(out)?;
    writeln!(out, "Catalog file:      {}", path.display())?;
    writeln!(out, "Title capacity:    {}", cfg.capacity.titles)?;
    writeln!(out, "Restored capacity: {}", cfg.capacity.restored)?;
    Ok(())
}
