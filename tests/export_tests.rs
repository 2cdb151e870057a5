mod common;

use common::{data_dir, date, open_manager};
use regex::Regex;

#[test]
fn export_writes_header_and_rows_newest_first() {
    let dir = data_dir();
    let mut manager = open_manager(&dir, date(2024, 3, 15));
    manager.add_expense(date(2024, 3, 1), "Food", "42.50", "lunch").unwrap();
    manager
        .add_expense(date(2024, 3, 2), "Food", "3", "coffee, bagel")
        .unwrap();

    let path = manager.export_csv(&dir).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    let pattern = Regex::new(r"^expenses_\d{8}_\d{6}(_\d+)?\.csv$").unwrap();
    assert!(pattern.is_match(&name), "unexpected file name {name}");
    assert_eq!(name, "expenses_20240315_100000.csv");

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "date,category,amount,description",
            "2024-03-02,Food,3,\"coffee, bagel\"",
            "2024-03-01,Food,42.5,lunch",
        ]
    );
}

#[test]
fn repeated_export_never_overwrites() {
    let dir = data_dir();
    let mut manager = open_manager(&dir, date(2024, 3, 15));
    manager.add_expense(date(2024, 3, 1), "Food", "1", "").unwrap();
    let first = manager.export_csv(&dir).unwrap();
    let first_contents = std::fs::read_to_string(&first).unwrap();

    manager.add_expense(date(2024, 3, 2), "Food", "2", "").unwrap();
    let second = manager.export_csv(&dir).unwrap();

    assert_ne!(first, second);
    assert!(second.to_string_lossy().ends_with("expenses_20240315_100000_1.csv"));
    assert_eq!(std::fs::read_to_string(&first).unwrap(), first_contents);
    assert_eq!(std::fs::read_to_string(&second).unwrap().lines().count(), 3);
}

#[test]
fn export_creates_missing_directory() {
    let dir = data_dir();
    let manager = open_manager(&dir, date(2024, 3, 15));
    let target = dir.join("exports").join("2024");
    let path = manager.export_csv(&target).unwrap();
    assert!(path.starts_with(&target));
    let contents = std::fs::read_to_string(path).unwrap();
    assert_eq!(contents.trim_end(), "date,category,amount,description");
}
