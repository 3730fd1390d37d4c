// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::parse_amount;
use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate, NaiveTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn today_display() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Accepts `dd/mm/yyyy` (display form) or ISO `yyyy-mm-dd`; returns the
/// display form.
pub fn parse_date(s: &str) -> Result<String> {
    let s = s.trim();
    let d = NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .with_context(|| format!("Invalid date '{}', expected DD/MM/YYYY", s))?;
    Ok(d.format(DATE_FORMAT).to_string())
}

pub fn parse_time(s: &str) -> Result<String> {
    let t = NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .with_context(|| format!("Invalid time '{}', expected HH:MM", s))?;
    Ok(t.format("%H:%M").to_string())
}

/// Strict money argument: "320,00", "320.00", "R$ 1.320,50".
pub fn parse_money(s: &str) -> Result<Decimal> {
    let trimmed = s.trim();
    // "320.00" is a decimal point here, not a thousands separator
    if let Ok(d) = trimmed.parse::<Decimal>() {
        return Ok(d);
    }
    parse_amount(trimmed).ok_or_else(|| anyhow!("Invalid amount '{}'", s))
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
