// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::Category;

const UA: &str = concat!(
    "spendwise/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/spendwise)"
);

pub fn http_client() -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let parsed = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok((parsed.year(), parsed.month()))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Expense amounts must be positive; this is the input boundary that
/// enforces it.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d <= Decimal::ZERO {
        anyhow::bail!("Amount must be positive, got '{}'", s);
    }
    Ok(d)
}

pub fn parse_category(s: &str) -> Result<Category> {
    Category::parse(s).with_context(|| {
        format!(
            "Unknown category '{}' (expected one of: {})",
            s,
            Category::ALL.map(|c| c.as_str()).join(", ")
        )
    })
}

pub fn month_end(year: i32, month: u32) -> Result<NaiveDate> {
    let last_day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => anyhow::bail!("Invalid month number {}", month),
    };
    NaiveDate::from_ymd_opt(year, month, last_day)
        .ok_or_else(|| anyhow::anyhow!("Invalid month {}-{}", year, month))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Local key-value preferences

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn clear_setting(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
    Ok(())
}

pub fn get_theme(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "theme")?.unwrap_or_else(|| "light".to_string()))
}

pub fn set_theme(conn: &Connection, theme: &str) -> Result<()> {
    if theme != "light" && theme != "dark" {
        anyhow::bail!("Theme must be 'light' or 'dark', got '{}'", theme);
    }
    set_setting(conn, "theme", theme)
}

/// The AI key stays local; it is only ever transmitted to the AI endpoint.
pub fn get_api_key(conn: &Connection) -> Result<Option<String>> {
    get_setting(conn, "ai_api_key")
}
