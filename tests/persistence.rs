//! Catalog File Integration Tests
//!
//! Tests for reading and writing the pipe-delimited catalog file.

use chrono::NaiveDate;
use shelfmark::catalog::{
    Capacity, Catalog, CatalogError, RecordError, RestoredTitle, SkipReason, Title, TitleKind,
};
use tempfile::TempDir;

const SAMPLE: &str = "\
B-111-111-111|Computer Systems|Pearson|2016|3|Randal Bryant|9780134092669
B-222-222-222|Introduction to C language|Prentice Hall|2020|2|Brian Kernighan|9780131103627
P-333-333-333|Byte|McGraw-Hill|1975|1|September|1
B-444-444-444|The Art of Computer Programming|Addison-Wesley|1968|1|Donald Knuth|9780201038019|2024-06-01
";

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_read_splits_live_and_restored() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "titles.txt", SAMPLE);

    let mut catalog = Catalog::new();
    let report = catalog.read_titles(&path).unwrap();

    assert_eq!(report.loaded, 3);
    assert_eq!(report.restored, 1);
    assert!(report.skipped.is_empty());

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.restored_len(), 1);
    assert!(catalog.find_by_call_number("B-444-444-444").is_none());
    assert_eq!(catalog.restored()[0].call_number(), "B-444-444-444");
    assert_eq!(catalog.restored()[0].restored_on, date(2024, 6, 1));

    // Month names load as their 1-based number and save back as numbers
    let byte = catalog.find_by_call_number("P-333-333-333").unwrap();
    assert_eq!(byte.kind, TitleKind::Periodical { month: 9, issue: 1 });
}

#[test]
fn test_round_trip_preserves_records() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "titles.txt", SAMPLE);

    let mut original = Catalog::new();
    original.read_titles(&path).unwrap();

    let out_path = temp.path().join("saved.txt");
    let written = original.save_titles(&out_path).unwrap();
    assert_eq!(written, 4);

    let mut reloaded = Catalog::new();
    reloaded.read_titles(&out_path).unwrap();

    assert_eq!(reloaded.titles(), original.titles());
    assert_eq!(reloaded.restored(), original.restored());
}

#[test]
fn test_save_writes_live_block_then_restored_block() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("titles.txt");

    let mut catalog = Catalog::new();
    catalog
        .add_restored(RestoredTitle::new(
            Title::book("B-000-000-001", "Old", "Press", 1950, 1, "A", "1"),
            date(2020, 1, 2),
        ))
        .unwrap();
    catalog
        .add(Title::periodical("P-000-000-002", "New", "Press", 2020, 4, 5, 6))
        .unwrap();

    catalog.save_titles(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "P-000-000-002|New|Press|2020|4|5|6\nB-000-000-001|Old|Press|1950|1|A|1|2020-01-02\n"
    );
}

#[test]
fn test_save_does_not_duplicate_restored_call_numbers() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("titles.txt");
    let old = Title::book("B-000-000-001", "Old", "Press", 1950, 1, "A", "1");

    let mut catalog = Catalog::new();
    catalog.add(old.clone()).unwrap();
    catalog
        .add_restored(RestoredTitle::new(old, date(2020, 1, 2)))
        .unwrap();

    assert_eq!(catalog.save_titles(&path).unwrap(), 1);
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "B-000-000-001|Old|Press|1950|1|A|1|2020-01-02\n");
}

#[test]
fn test_missing_file_leaves_catalog_empty() {
    let temp = TempDir::new().unwrap();
    let mut catalog = Catalog::new();

    let result = catalog.read_titles(temp.path().join("missing.txt"));

    match result {
        Err(CatalogError::FileNotFound { path }) => {
            assert!(path.ends_with("missing.txt"));
        }
        other => panic!("Expected FileNotFound, got {:?}", other),
    }
    assert!(catalog.is_empty());
    assert_eq!(catalog.restored_len(), 0);
}

#[test]
fn test_unwritable_path_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("no-such-dir").join("titles.txt");

    let result = Catalog::new().save_titles(&path);
    assert!(matches!(result, Err(CatalogError::Write { .. })));
}

#[test]
fn test_malformed_lines_are_skipped_and_reported() {
    let temp = TempDir::new().unwrap();
    let path = write_file(
        &temp,
        "titles.txt",
        "\
B-111-111-111|Good|Press|2000|1|A|I

B-222-222-222|Bad Year|Press|MMXX|1|A|I
B-333-333-333|Too Short|Press
P-444-444-444|Unknown Month|Press|1999|1|Brumaire|7
B-555-555-555|Bad Date|Press|2000|1|A|I|yesterday
",
    );

    let mut catalog = Catalog::new();
    let report = catalog.read_titles(&path).unwrap();

    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped.len(), 3);

    let lines: Vec<usize> = report.skipped.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![3, 4, 6]);
    assert!(matches!(
        report.skipped[0].reason,
        SkipReason::Malformed(RecordError::InvalidNumber { field: "year", .. })
    ));
    assert!(matches!(
        report.skipped[1].reason,
        SkipReason::Malformed(RecordError::MissingFields { found: 3 })
    ));
    assert!(matches!(
        report.skipped[2].reason,
        SkipReason::Malformed(RecordError::InvalidDate { .. })
    ));

    let unknown = catalog.find_by_call_number("P-444-444-444").unwrap();
    assert_eq!(unknown.kind, TitleKind::Periodical { month: 0, issue: 7 });
}

#[test]
fn test_round_trip_keeps_empty_book_fields() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("titles.txt");

    let mut original = Catalog::new();
    original
        .add(Title::book("B-111-111-111", "T", "P", 2000, 1, "A", ""))
        .unwrap();
    original
        .add(Title::book("B-222-222-222", "U", "P", 2001, 1, "", ""))
        .unwrap();
    original
        .add_restored(RestoredTitle::new(
            Title::book("B-333-333-333", "V", "P", 1950, 1, "", ""),
            date(2024, 6, 1),
        ))
        .unwrap();
    original.save_titles(&path).unwrap();

    let mut reloaded = Catalog::new();
    let report = reloaded.read_titles(&path).unwrap();

    assert!(report.skipped.is_empty());
    assert_eq!(reloaded.titles(), original.titles());
    assert_eq!(reloaded.restored(), original.restored());
}

#[test]
fn test_non_utf8_line_is_skipped() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("titles.txt");
    let mut content = b"B-111-111-111|Good|Press|2000|1|A|I\n".to_vec();
    content.extend_from_slice(b"B-222-222-222|Caf\xe9|Press|2001|1|A|I\n");
    content.extend_from_slice(b"B-333-333-333|Also Good|Press|2002|1|A|I\r\n");
    std::fs::write(&path, content).unwrap();

    let mut catalog = Catalog::new();
    let report = catalog.read_titles(&path).unwrap();

    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 2);
    assert!(matches!(
        report.skipped[0].reason,
        SkipReason::Malformed(RecordError::InvalidEncoding)
    ));
    assert_eq!(catalog.titles()[1].call_number, "B-333-333-333");
    assert_eq!(catalog.titles()[1].title, "Also Good");
}

#[test]
fn test_records_beyond_capacity_are_skipped() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "titles.txt", SAMPLE);

    let mut catalog = Catalog::with_capacity(Capacity {
        titles: 2,
        restored: 0,
    });
    let report = catalog.read_titles(&path).unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.restored_len(), 0);
    assert_eq!(report.skipped.len(), 2);
    assert!(report
        .skipped
        .iter()
        .all(|s| matches!(s.reason, SkipReason::Full(CatalogError::CapacityExceeded { .. }))));
}
