// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use spendwise::advisor::{build_prompt, spending_summary, AdvisorError, SUMMARY_LIMIT};
use spendwise::models::{Category, Expense};

fn expense(amount: i64, date: &str, note: Option<&str>, created_at: i64) -> Expense {
    Expense {
        id: format!("e-{}", created_at),
        amount: Decimal::new(amount, 0),
        category: Category::Food,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        note: note.map(|s| s.to_string()),
        created_at,
    }
}

#[test]
fn summary_lines_use_date_amount_category_note() {
    let expenses = vec![expense(120, "2024-03-01", Some("groceries"), 1)];
    assert_eq!(spending_summary(&expenses), "2024-03-01: 120 (Food) - groceries");
}

#[test]
fn summary_handles_missing_notes() {
    let expenses = vec![expense(99, "2024-03-02", None, 1)];
    assert_eq!(spending_summary(&expenses), "2024-03-02: 99 (Food) - ");
}

#[test]
fn summary_truncates_to_most_recent_records() {
    let expenses: Vec<Expense> = (0..30)
        .map(|i| expense(i + 1, "2024-03-01", None, i))
        .collect();
    let summary = spending_summary(&expenses);
    assert_eq!(summary.lines().count(), SUMMARY_LIMIT);
    // Most recent by creation time comes first.
    assert!(summary.starts_with("2024-03-01: 30 (Food)"));
    // The oldest ten never make it into the prompt.
    assert!(!summary.contains("2024-03-01: 5 (Food)"));
}

#[test]
fn prompt_embeds_summary_and_question() {
    let expenses = vec![expense(10, "2024-03-01", Some("coffee"), 1)];
    let prompt = build_prompt("How much did I spend on coffee?", &expenses);
    assert!(prompt.contains("2024-03-01: 10 (Food) - coffee"));
    assert!(prompt.contains("User question: How much did I spend on coffee?"));
}

#[test]
fn error_messages_are_distinct() {
    // The rate-limit condition must read differently from a generic failure.
    let rate_limited = AdvisorError::RateLimited.to_string();
    let generic = AdvisorError::Api("something broke".into()).to_string();
    assert!(rate_limited.contains("limit"));
    assert!(!generic.contains("limit"));
    assert!(AdvisorError::MissingKey.to_string().contains("api-key"));
}
