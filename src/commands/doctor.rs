// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{overflowing_records, unparseable_records};
use crate::currency::parse_amount;
use crate::models::TxType;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

/// One row per problem found in the stored data.
pub fn diagnose(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let txs = store::load_transactions(conn)?;
    let mut rows = Vec::new();

    // 1) Amounts the reports skip
    for t in unparseable_records(&txs) {
        let issue = if parse_amount(&t.value).is_none() {
            format!("unreadable_value '{}'", t.value)
        } else {
            format!(
                "unreadable_installment_value '{}'",
                t.installment_value.as_deref().unwrap_or_default()
            )
        };
        rows.push(vec![t.id.clone(), issue]);
    }

    // 2) Amounts too large to add into the totals
    for t in overflowing_records(&txs) {
        rows.push(vec![t.id.clone(), "amount_overflow".into()]);
    }

    // 3) Expenses without a category never show up in the breakdown
    for t in txs
        .iter()
        .filter(|t| t.kind == TxType::Expense)
        .filter(|t| t.category.as_deref().is_none_or(str::is_empty))
    {
        rows.push(vec![t.id.clone(), "expense_without_category".into()]);
    }

    // 4) Duplicate ids make edit/rm ambiguous
    let mut seen = std::collections::HashSet::new();
    for t in &txs {
        if !seen.insert(t.id.as_str()) {
            rows.push(vec![t.id.clone(), "duplicate_id".into()]);
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = diagnose(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Transaction", "Issue"], rows));
    }
    Ok(())
}
