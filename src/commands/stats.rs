// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::{self, DailyTotal};
use crate::models::Category;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

#[derive(Serialize)]
struct CategoryTotal {
    category: Category,
    total: Decimal,
}

#[derive(Serialize)]
struct StatsReport {
    total: Decimal,
    today_total: Decimal,
    count: usize,
    by_category: Vec<CategoryTotal>,
    trend: Vec<DailyTotal>,
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filters = super::expenses::filters_from_args(sub)?;

    let mut client = super::sync_client(conn)?;
    client.load()?;
    let matching = engine::filter_expenses(client.expenses(), &filters);

    let report = StatsReport {
        total: engine::total(&matching),
        today_total: engine::today_total(&matching),
        count: matching.len(),
        by_category: engine::category_breakdown(&matching)
            .into_iter()
            .map(|(category, total)| CategoryTotal { category, total })
            .collect(),
        trend: engine::trailing_week(&matching),
    };

    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Total", "Today", "Count"],
            vec![vec![
                fmt_money(&report.total),
                fmt_money(&report.today_total),
                report.count.to_string(),
            ]],
        )
    );

    let by_cat: Vec<Vec<String>> = report
        .by_category
        .iter()
        .filter(|c| !c.total.is_zero())
        .map(|c| vec![c.category.to_string(), fmt_money(&c.total)])
        .collect();
    if !by_cat.is_empty() {
        println!("{}", pretty_table(&["Category", "Spent"], by_cat));
    }

    let trend: Vec<Vec<String>> = report
        .trend
        .iter()
        .map(|d| vec![d.date.to_string(), fmt_money(&d.total)])
        .collect();
    println!("{}", pretty_table(&["Day", "Spent"], trend));
    Ok(())
}
