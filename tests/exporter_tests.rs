// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::tempdir;

use spendwise::cli;
use spendwise::commands::exporter::{selection_from_args, write_csv, Selection};
use spendwise::models::{Category, Expense};

fn expense(amount: i64, category: Category, date: &str, note: Option<&str>) -> Expense {
    Expense {
        id: format!("e-{}", date),
        amount: Decimal::new(amount, 0),
        category,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        note: note.map(|s| s.to_string()),
        created_at: 0,
    }
}

#[test]
fn csv_has_header_and_one_row_per_expense() {
    let expenses = vec![
        expense(100, Category::Food, "2024-03-01", Some("groceries")),
        expense(50, Category::Travel, "2024-03-02", None),
    ];
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let written = write_csv(&expenses, &path).unwrap();
    assert_eq!(written, 2);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "Date,Category,Amount,Note");
    assert_eq!(lines[1], "2024-03-01,Food,100,groceries");
    assert_eq!(lines[2], "2024-03-02,Travel,50,");
}

#[test]
fn month_selection_filename_and_bounds() {
    let sel = Selection::Month {
        year: 2024,
        month: 3,
    };
    assert_eq!(sel.filename(), "expenses_2024_03.csv");
    let (start, end) = sel.bounds().unwrap();
    assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
}

#[test]
fn february_bounds_respect_leap_years() {
    let (_, end) = Selection::Month {
        year: 2024,
        month: 2,
    }
    .bounds()
    .unwrap();
    assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    let (_, end) = Selection::Month {
        year: 2023,
        month: 2,
    }
    .bounds()
    .unwrap();
    assert_eq!(end, NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
}

#[test]
fn range_selection_filename_encodes_both_dates() {
    let sel = Selection::Range {
        from: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        to: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
    };
    assert_eq!(sel.filename(), "expenses_2024-01-15_2024-02-10.csv");
}

#[test]
fn export_args_parse_month_and_range() {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["spendwise", "export", "--month", "2024-03"]);
    if let Some(("export", sub)) = matches.subcommand() {
        let sel = selection_from_args(sub).unwrap();
        assert_eq!(sel.filename(), "expenses_2024_03.csv");
    } else {
        panic!("no export subcommand");
    }

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "spendwise",
        "export",
        "--from",
        "2024-01-01",
        "--to",
        "2024-01-31",
    ]);
    if let Some(("export", sub)) = matches.subcommand() {
        let sel = selection_from_args(sub).unwrap();
        assert_eq!(sel.filename(), "expenses_2024-01-01_2024-01-31.csv");
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_args_require_a_complete_selection() {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["spendwise", "export", "--from", "2024-01-01"]);
    if let Some(("export", sub)) = matches.subcommand() {
        assert!(selection_from_args(sub).is_err());
    } else {
        panic!("no export subcommand");
    }
}
