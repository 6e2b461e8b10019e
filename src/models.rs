// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Closed set of spending classifications. Remote rows carrying a value
/// outside this set deserialize to `Others`; user input is rejected instead
/// (see `utils::parse_category`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Food,
    Travel,
    Shopping,
    Rent,
    Entertainment,
    Health,
    Education,
    Others,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Travel,
        Category::Shopping,
        Category::Rent,
        Category::Entertainment,
        Category::Health,
        Category::Education,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Shopping => "Shopping",
            Category::Rent => "Rent",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Others => "Others",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }

    /// Display color (hex) for charts and badges.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Food => "#10b981",
            Category::Travel => "#3b82f6",
            Category::Shopping => "#ec4899",
            Category::Rent => "#f59e0b",
            Category::Entertainment => "#8b5cf6",
            Category::Health => "#ef4444",
            Category::Education => "#06b6d4",
            Category::Others => "#6b7280",
        }
    }

    /// Icon name used by presentation layers.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "utensils",
            Category::Travel => "plane",
            Category::Shopping => "shopping-bag",
            Category::Rent => "home",
            Category::Entertainment => "film",
            Category::Health => "heart",
            Category::Education => "graduation-cap",
            Category::Others => "more-horizontal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let s = String::deserialize(de)?;
        Ok(Category::parse(&s).unwrap_or(Category::Others))
    }
}

/// A single user-entered spending event. Never edited in place; created by
/// an add and destroyed by a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub note: Option<String>,
    /// Epoch milliseconds; ordering only, distinct from the user-chosen date.
    pub created_at: i64,
}

/// Input-boundary shape of a new expense. The identifier and creation
/// timestamp are assigned later (locally for the optimistic record, by the
/// remote store's column defaults for the authoritative one).
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseDraft {
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExpenseFilters {
    pub category: Option<Category>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Wire shape of a remote expense row. Deserialization is lenient where the
/// store's column types differ from ours: `amount` may arrive as a JSON
/// number or string, `date` and `created_at` as bare dates or full
/// timestamps, and unknown categories collapse to `Others`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseRow {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "de_amount")]
    pub amount: Decimal,
    pub category: Category,
    #[serde(deserialize_with = "de_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "de_epoch_ms")]
    pub created_at: i64,
}

impl ExpenseRow {
    pub fn into_expense(self) -> Expense {
        Expense {
            id: self.id,
            amount: self.amount,
            category: self.category,
            date: self.date,
            note: self.note,
            created_at: self.created_at,
        }
    }
}

fn de_id<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    let v = serde_json::Value::deserialize(de)?;
    match v {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "unsupported id value: {other}"
        ))),
    }
}

fn de_amount<'de, D: Deserializer<'de>>(de: D) -> Result<Decimal, D::Error> {
    let v = serde_json::Value::deserialize(de)?;
    let s = match &v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        other => {
            return Err(serde::de::Error::custom(format!(
                "unsupported amount value: {other}"
            )));
        }
    };
    s.parse::<Decimal>()
        .map_err(|e| serde::de::Error::custom(format!("invalid amount '{s}': {e}")))
}

fn de_date<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDate, D::Error> {
    let s = String::deserialize(de)?;
    // Timestamp columns come back as e.g. 2024-03-01T00:00:00+00:00;
    // the date part is always the leading 10 characters.
    let date_part = s.get(..10).unwrap_or(&s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| serde::de::Error::custom(format!("invalid date '{s}': {e}")))
}

fn de_epoch_ms<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
    let v = serde_json::Value::deserialize(de)?;
    match v {
        serde_json::Value::Number(n) => Ok(n.as_i64().unwrap_or_default()),
        serde_json::Value::String(s) => Ok(chrono::DateTime::parse_from_rfc3339(&s)
            .map(|t| t.timestamp_millis())
            .unwrap_or_default()),
        serde_json::Value::Null => Ok(0),
        other => Err(serde::de::Error::custom(format!(
            "unsupported timestamp value: {other}"
        ))),
    }
}
