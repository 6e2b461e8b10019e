// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over the in-memory expense list. Everything here is a
//! function of its arguments; derived views are recomputed from the cache on
//! every call rather than maintained incrementally.

use chrono::{Duration, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, Expense, ExpenseFilters};

/// Subset of `expenses` matching `filters`. Unset filter fields match
/// everything; `start_date`/`end_date` are inclusive bounds on the
/// user-chosen calendar date. The input is never mutated.
pub fn filter_expenses(expenses: &[Expense], filters: &ExpenseFilters) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| {
            if let Some(cat) = filters.category {
                if e.category != cat {
                    return false;
                }
            }
            if let Some(start) = filters.start_date {
                if e.date < start {
                    return false;
                }
            }
            if let Some(end) = filters.end_date {
                if e.date > end {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

pub fn total(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn category_total(expenses: &[Expense], category: Category) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.category == category)
        .map(|e| e.amount)
        .sum()
}

/// Per-category totals over all eight categories, in declaration order.
pub fn category_breakdown(expenses: &[Expense]) -> Vec<(Category, Decimal)> {
    Category::ALL
        .into_iter()
        .map(|c| (c, category_total(expenses, c)))
        .collect()
}

/// Sum of amounts dated today, per the local wall clock at call time.
/// Rolls over with the calendar date, not with any stored state.
pub fn today_total(expenses: &[Expense]) -> Decimal {
    today_total_on(expenses, Local::now().date_naive())
}

pub fn today_total_on(expenses: &[Expense], today: NaiveDate) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.date == today)
        .map(|e| e.amount)
        .sum()
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Decimal,
}

/// Daily totals for the 7 calendar days ending today inclusive, oldest
/// first. Always exactly 7 entries; days without expenses report zero.
pub fn trailing_week(expenses: &[Expense]) -> Vec<DailyTotal> {
    trailing_week_ending(expenses, Local::now().date_naive())
}

pub fn trailing_week_ending(expenses: &[Expense], today: NaiveDate) -> Vec<DailyTotal> {
    (0..7i64)
        .map(|i| {
            let date = today - Duration::days(6 - i);
            DailyTotal {
                date,
                total: today_total_on(expenses, date),
            }
        })
        .collect()
}
