// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::Path;

use crate::engine;
use crate::models::{Expense, ExpenseFilters};
use crate::utils::{month_end, parse_date, parse_month};

/// What slice of history to export. The generated filename encodes it.
#[derive(Debug, Clone, Copy)]
pub enum Selection {
    Month { year: i32, month: u32 },
    Range { from: NaiveDate, to: NaiveDate },
}

impl Selection {
    pub fn bounds(&self) -> Result<(NaiveDate, NaiveDate)> {
        match *self {
            Selection::Month { year, month } => {
                let start = NaiveDate::from_ymd_opt(year, month, 1)
                    .ok_or_else(|| anyhow::anyhow!("Invalid month {}-{}", year, month))?;
                Ok((start, month_end(year, month)?))
            }
            Selection::Range { from, to } => Ok((from, to)),
        }
    }

    pub fn filename(&self) -> String {
        match *self {
            Selection::Month { year, month } => format!("expenses_{}_{:02}.csv", year, month),
            Selection::Range { from, to } => format!("expenses_{}_{}.csv", from, to),
        }
    }
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let selection = selection_from_args(sub)?;
    let (start, end) = selection.bounds()?;

    let mut client = super::sync_client(conn)?;
    client.load()?;
    let matching = engine::filter_expenses(
        client.expenses(),
        &ExpenseFilters {
            category: None,
            start_date: Some(start),
            end_date: Some(end),
        },
    );
    if matching.is_empty() {
        println!("No expenses in the selected period; nothing exported.");
        return Ok(());
    }

    let out = sub
        .get_one::<String>("out")
        .cloned()
        .unwrap_or_else(|| selection.filename());
    let written = write_csv(&matching, Path::new(&out))?;
    println!("Exported {} expenses to {}", written, out);
    Ok(())
}

pub fn selection_from_args(sub: &clap::ArgMatches) -> Result<Selection> {
    if let Some(month) = sub.get_one::<String>("month") {
        let (year, month) = parse_month(month)?;
        return Ok(Selection::Month { year, month });
    }
    match (sub.get_one::<String>("from"), sub.get_one::<String>("to")) {
        (Some(from), Some(to)) => Ok(Selection::Range {
            from: parse_date(from)?,
            to: parse_date(to)?,
        }),
        _ => anyhow::bail!("Provide either --month or both --from and --to"),
    }
}

/// Tabular export: Date, Category, Amount, Note. Returns the record count.
pub fn write_csv(expenses: &[Expense], out: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(["Date", "Category", "Amount", "Note"])?;
    for e in expenses {
        wtr.write_record([
            e.date.to_string(),
            e.category.to_string(),
            e.amount.to_string(),
            e.note.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(expenses.len())
}
