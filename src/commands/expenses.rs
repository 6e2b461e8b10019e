// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;

use crate::engine;
use crate::models::{Expense, ExpenseDraft, ExpenseFilters};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_category, parse_date,
    pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = parse_category(sub.get_one::<String>("category").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let note = sub.get_one::<String>("note").map(|s| s.to_string());

    let mut client = super::sync_client(conn)?;
    let saved = client.add(ExpenseDraft {
        amount,
        category,
        date,
        note,
    })?;
    println!(
        "Recorded {} on {} ({}) [id {}]",
        fmt_money(&saved.amount),
        saved.date,
        saved.category,
        saved.id
    );
    Ok(())
}

/// Build the filter set from `--category`/`--from`/`--to`; unset flags
/// degrade to match-all.
pub fn filters_from_args(sub: &clap::ArgMatches) -> Result<ExpenseFilters> {
    Ok(ExpenseFilters {
        category: sub
            .get_one::<String>("category")
            .map(|s| parse_category(s))
            .transpose()?,
        start_date: sub
            .get_one::<String>("from")
            .map(|s| parse_date(s))
            .transpose()?,
        end_date: sub
            .get_one::<String>("to")
            .map(|s| parse_date(s))
            .transpose()?,
    })
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filters = filters_from_args(sub)?;

    let mut client = super::sync_client(conn)?;
    client.load()?;
    let mut matching = engine::filter_expenses(client.expenses(), &filters);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        matching.truncate(*limit);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &matching)? {
        let rows: Vec<Vec<String>> = matching
            .iter()
            .map(|e: &Expense| {
                vec![
                    e.id.clone(),
                    e.date.to_string(),
                    e.category.to_string(),
                    fmt_money(&e.amount),
                    e.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Category", "Amount", "Note"], rows)
        );
        println!("Total: {}", fmt_money(&engine::total(&matching)));
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut client = super::sync_client(conn)?;
    client.load()?;
    client.delete(id)?;
    println!("Deleted expense {}", id);
    Ok(())
}
