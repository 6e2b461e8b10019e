// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use spendwise::engine::{
    category_breakdown, category_total, filter_expenses, today_total_on, total,
    trailing_week_ending,
};
use spendwise::models::{Category, Expense, ExpenseFilters};

fn expense(amount: i64, category: Category, date: &str) -> Expense {
    Expense {
        id: format!("e-{}-{}", category, date),
        amount: Decimal::new(amount, 0),
        category,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        note: None,
        created_at: 0,
    }
}

fn ids(expenses: &[Expense]) -> Vec<String> {
    let mut v: Vec<String> = expenses.iter().map(|e| e.id.clone()).collect();
    v.sort();
    v
}

#[test]
fn empty_filter_matches_everything() {
    let expenses = vec![
        expense(100, Category::Food, "2024-03-01"),
        expense(50, Category::Travel, "2024-03-02"),
        expense(7, Category::Others, "2023-12-31"),
    ];
    let matched = filter_expenses(&expenses, &ExpenseFilters::default());
    assert_eq!(ids(&matched), ids(&expenses));
}

#[test]
fn totals_partition_by_category() {
    let expenses = vec![
        expense(100, Category::Food, "2024-03-01"),
        expense(40, Category::Food, "2024-03-03"),
        expense(50, Category::Travel, "2024-03-02"),
        expense(9, Category::Health, "2024-03-04"),
    ];
    let sum_of_parts: Decimal = Category::ALL
        .into_iter()
        .map(|c| category_total(&expenses, c))
        .sum();
    assert_eq!(total(&expenses), sum_of_parts);
    assert_eq!(total(&expenses), Decimal::new(199, 0));
}

#[test]
fn empty_sequences_total_zero() {
    assert_eq!(total(&[]), Decimal::ZERO);
    for c in Category::ALL {
        assert_eq!(category_total(&[], c), Decimal::ZERO);
    }
}

#[test]
fn point_range_matches_exact_date_only() {
    let expenses = vec![
        expense(10, Category::Food, "2024-01-01"),
        expense(20, Category::Food, "2024-01-02"),
        expense(30, Category::Food, "2024-01-03"),
    ];
    let d = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let matched = filter_expenses(
        &expenses,
        &ExpenseFilters {
            category: None,
            start_date: Some(d),
            end_date: Some(d),
        },
    );
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].date, d);
}

#[test]
fn filtering_is_idempotent() {
    let expenses = vec![
        expense(10, Category::Food, "2024-01-01"),
        expense(20, Category::Travel, "2024-01-02"),
        expense(30, Category::Food, "2024-01-03"),
    ];
    let filters = ExpenseFilters {
        category: Some(Category::Food),
        start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
        end_date: None,
    };
    let once = filter_expenses(&expenses, &filters);
    let twice = filter_expenses(&once, &filters);
    assert_eq!(ids(&once), ids(&twice));
}

#[test]
fn category_filter_scenario() {
    let expenses = vec![
        expense(100, Category::Food, "2024-03-01"),
        expense(50, Category::Travel, "2024-03-02"),
    ];
    let matched = filter_expenses(
        &expenses,
        &ExpenseFilters {
            category: Some(Category::Food),
            start_date: None,
            end_date: None,
        },
    );
    assert_eq!(matched.len(), 1);
    assert_eq!(total(&matched), Decimal::new(100, 0));
}

#[test]
fn date_range_scenario() {
    let expenses: Vec<Expense> = [10, 20, 30, 40, 50]
        .iter()
        .enumerate()
        .map(|(i, amt)| expense(*amt, Category::Others, &format!("2024-01-0{}", i + 1)))
        .collect();
    let matched = filter_expenses(
        &expenses,
        &ExpenseFilters {
            category: None,
            start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
            end_date: Some(NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()),
        },
    );
    assert_eq!(matched.len(), 3);
    assert_eq!(total(&matched), Decimal::new(90, 0));
}

#[test]
fn filters_do_not_mutate_input() {
    let expenses = vec![
        expense(10, Category::Food, "2024-01-01"),
        expense(20, Category::Travel, "2024-01-02"),
    ];
    let before = ids(&expenses);
    let _ = filter_expenses(
        &expenses,
        &ExpenseFilters {
            category: Some(Category::Food),
            start_date: None,
            end_date: None,
        },
    );
    assert_eq!(ids(&expenses), before);
}

#[test]
fn today_total_compares_calendar_dates() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let expenses = vec![
        expense(10, Category::Food, "2024-06-15"),
        expense(20, Category::Food, "2024-06-14"),
        expense(40, Category::Travel, "2024-06-15"),
    ];
    assert_eq!(today_total_on(&expenses, today), Decimal::new(50, 0));
    // Rolls over with the calendar date.
    let tomorrow = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
    assert_eq!(today_total_on(&expenses, tomorrow), Decimal::ZERO);
}

#[test]
fn trailing_week_always_has_seven_entries() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let expenses = vec![
        expense(10, Category::Food, "2024-06-15"),
        expense(20, Category::Food, "2024-06-12"),
        // Outside the window entirely:
        expense(99, Category::Food, "2024-06-01"),
    ];
    let series = trailing_week_ending(&expenses, today);
    assert_eq!(series.len(), 7);
    assert_eq!(
        series[0].date,
        NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()
    );
    assert_eq!(series[6].date, today);
    // Zero days are reported as zero, not omitted.
    assert_eq!(series[1].total, Decimal::ZERO);
    assert_eq!(series[3].total, Decimal::new(20, 0));
    assert_eq!(series[6].total, Decimal::new(10, 0));
}

#[test]
fn breakdown_covers_all_categories_in_order() {
    let expenses = vec![
        expense(10, Category::Food, "2024-01-01"),
        expense(5, Category::Education, "2024-01-02"),
    ];
    let breakdown = category_breakdown(&expenses);
    assert_eq!(breakdown.len(), 8);
    assert_eq!(breakdown[0].0, Category::Food);
    assert_eq!(breakdown[0].1, Decimal::new(10, 0));
    assert_eq!(breakdown[6].0, Category::Education);
    assert_eq!(breakdown[6].1, Decimal::new(5, 0));
    assert_eq!(breakdown[7].1, Decimal::ZERO);
}
