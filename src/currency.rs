// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Conversion between BRL display strings ("- R$ 1.320,50") and `Decimal`.

use crate::models::TxType;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

static SYMBOLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[R$\s.]").unwrap());
static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\d.-]").unwrap());
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d*(\.\d*)?").unwrap());

pub const CURRENCY_PREFIX: &str = "R$ ";

/// `R$ 320,00`. Always two fractional digits, comma separator, no grouping.
pub fn format_currency(amount: Decimal) -> String {
    format!("{}{}", CURRENCY_PREFIX, format_plain(amount))
}

/// `50,00`: the bare form used for installment and split amounts.
pub fn format_plain(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2)).replace('.', ",")
}

/// `+ R$ 10,00` / `- R$ 10,00`, sign taken from the transaction type.
pub fn format_signed(amount: Decimal, kind: TxType) -> String {
    let sign = match kind {
        TxType::Income => '+',
        TxType::Expense => '-',
    };
    format!("{} {}", sign, format_currency(amount.abs()))
}

/// Lenient parse of a display amount. `None` means the record should be
/// skipped by callers, never reported as an error.
pub fn parse_amount(display: &str) -> Option<Decimal> {
    let stripped = SYMBOLS.replace_all(display, "");
    let dotted = stripped.replacen(',', ".", 1);
    let cleaned = NON_NUMERIC.replace_all(&dotted, "");

    // Longest numeric prefix, the way a float parser would read "12.5-3".
    let prefix = LEADING_NUMBER.find(&cleaned)?.as_str();
    if !prefix.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    let (negative, digits) = match prefix.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, prefix),
    };
    let mut normalized = String::with_capacity(digits.len() + 2);
    if negative {
        normalized.push('-');
    }
    if digits.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(digits.trim_end_matches('.'));
    Decimal::from_str(&normalized).ok()
}

/// Per-installment value for `total` paid in `count` parts.
pub fn split_evenly(total: Decimal, count: u32) -> Option<Decimal> {
    if count == 0 {
        return None;
    }
    Some((total / Decimal::from(count)).round_dp(2))
}

/// Percentage of `part` in `whole`, rounded half away from zero; 0 when
/// `whole` is zero or the ratio is out of range.
pub fn percent_of(part: Decimal, whole: Decimal) -> u32 {
    if whole.is_zero() {
        return 0;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|pct| pct.to_u32())
        .unwrap_or(0)
}
