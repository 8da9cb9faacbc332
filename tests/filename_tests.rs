use flightlog::{JournalFileName, OrderingError, scan_latest, try_cmp_parsed};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_parse_basic_name() {
    let name = JournalFileName::parse("Journal.240301123456.01.log").unwrap();
    assert_eq!(name.year, 2024);
    assert_eq!(name.month, 3);
    assert_eq!(name.day, 1);
    assert_eq!(name.hour, 12);
    assert_eq!(name.minute, 34);
    assert_eq!(name.second, 56);
    assert_eq!(name.part, 1);
    assert_eq!(name.tag, "");
    assert_eq!(name.suffix, "");
}

#[test]
fn test_parse_four_digit_year() {
    let name = JournalFileName::parse("Journal.20240301123456.01.log").unwrap();
    assert_eq!(name.year, 2024);
}

#[test]
fn test_parse_tag_and_suffix() {
    let name = JournalFileName::parse("JournalBeta.240301123456.02.log.backup").unwrap();
    assert_eq!(name.tag, "Beta");
    assert_eq!(name.part, 2);
    assert_eq!(name.suffix, ".backup");
}

#[test]
fn test_parse_is_case_insensitive() {
    assert!(JournalFileName::parse("journal.240301123456.01.LOG").is_some());
}

#[test]
fn test_parse_keeps_directory() {
    let name = JournalFileName::parse("/some/dir/Journal.240301123456.01.log").unwrap();
    assert_eq!(name.dir(), Path::new("/some/dir"));
    assert_eq!(
        name.path(),
        Path::new("/some/dir/Journal.240301123456.01.log")
    );
}

#[test]
fn test_parse_rejects_invalid_fields() {
    // month 13, part 00, minute 60, missing part
    assert!(JournalFileName::parse("Journal.241301123456.01.log").is_none());
    assert!(JournalFileName::parse("Journal.240301123456.00.log").is_none());
    assert!(JournalFileName::parse("Journal.240301126056.01.log").is_none());
    assert!(JournalFileName::parse("Journal.240301123456.log").is_none());
    assert!(JournalFileName::parse("NetLog.240301123456.01.log").is_none());
}

#[test]
fn test_format_round_trips() {
    for raw in [
        "Journal.240301123456.01.log",
        "JournalBeta.240301123456.02.log",
        "Journal.240301123456.11.log.bak",
        "Journal.21050301123456.01.log",
    ] {
        let name = JournalFileName::parse(raw).unwrap();
        assert_eq!(name.file_name(), raw);
        let again = JournalFileName::parse(name.path()).unwrap();
        assert_eq!(again, name);
    }
}

#[test]
fn test_with_part_formats_two_digits() {
    let name = JournalFileName::parse("Journal.240301123456.01.log").unwrap();
    assert_eq!(name.with_part(7).file_name(), "Journal.240301123456.07.log");
    assert_eq!(
        name.with_part(123).file_name(),
        "Journal.240301123456.123.log"
    );
}

#[test]
fn test_ordering_by_timestamp_then_part() {
    let a = JournalFileName::parse("Journal.240301123456.01.log").unwrap();
    let b = JournalFileName::parse("Journal.240301123456.02.log").unwrap();
    let c = JournalFileName::parse("Journal.240302000000.01.log").unwrap();

    assert_eq!(a.try_cmp(&b), Ok(Ordering::Less));
    assert_eq!(b.try_cmp(&c), Ok(Ordering::Less));
    assert_eq!(c.try_cmp(&a), Ok(Ordering::Greater));
    assert_eq!(a.try_cmp(&a), Ok(Ordering::Equal));
}

#[test]
fn test_ordering_errors() {
    let a = JournalFileName::parse("/one/Journal.240301123456.01.log").unwrap();
    let b = JournalFileName::parse("/two/Journal.240301123456.01.log").unwrap();
    assert_eq!(a.try_cmp(&b), Err(OrderingError::DifferentDirectories));

    let tagged = JournalFileName::parse("/one/JournalBeta.240301123456.01.log").unwrap();
    assert_eq!(a.try_cmp(&tagged), Err(OrderingError::DifferentTags));

    assert_eq!(try_cmp_parsed(Some(&a), None), Err(OrderingError::Unnamed));
    assert_eq!(try_cmp_parsed(None, Some(&b)), Err(OrderingError::Unnamed));
}

#[test]
fn test_scan_latest_picks_greatest_untagged() {
    let dir = tempdir().unwrap();
    for file in [
        "Journal.240301100000.01.log",
        "Journal.240301100000.02.log",
        "JournalBeta.240302100000.01.log",
        "notes.txt",
    ] {
        fs::write(dir.path().join(file), "").unwrap();
    }

    let latest = scan_latest(dir.path()).unwrap().unwrap();
    assert_eq!(latest.file_name(), "Journal.240301100000.02.log");
}

#[test]
fn test_scan_latest_empty_dir() {
    let dir = tempdir().unwrap();
    assert!(scan_latest(dir.path()).unwrap().is_none());
}
