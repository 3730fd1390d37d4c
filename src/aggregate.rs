// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Category breakdowns and the dashboard/report figures.
//!
//! Everything here is a pure pass over a snapshot of transactions. Records
//! whose value cannot be parsed are skipped rather than reported as errors;
//! the summary functions count them in `skipped` so callers can warn.

use crate::categories::resolve_category;
use crate::currency::{format_currency, parse_amount, percent_of};
use crate::models::{CategoryTotal, Transaction, TxType};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

pub const NO_CATEGORY_LABEL: &str = "Nenhuma";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub available_balance: Decimal,
    pub pending_debt: Decimal,
    pub total_expenses: Decimal,
    pub total_income: Decimal,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportStats {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub transaction_count: usize,
    pub average_expense: Decimal,
    pub biggest_expense: Decimal,
    pub most_used_category: String,
    pub savings_rate: Option<Decimal>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDetail<'a> {
    pub name: String,
    pub transactions: Vec<&'a Transaction>,
    pub total: Decimal,
    pub count: usize,
    pub average: Decimal,
}

fn value_of(tx: &Transaction) -> Option<Decimal> {
    let parsed = parse_amount(&tx.value);
    if parsed.is_none() {
        debug!(id = %tx.id, value = %tx.value, "skipping transaction with unparseable value");
    }
    parsed
}

/// Why (part of) a record was left out of a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    Unreadable,
    Overflow,
}

/// Outstanding part of an installment purchase: every installment after the
/// first is counted as unpaid.
fn remaining_installments(tx: &Transaction) -> Result<Decimal, Skip> {
    let count = match tx.installments {
        Some(n) if n > 1 => n,
        _ => return Ok(Decimal::ZERO),
    };
    let per = match tx.installment_value.as_deref() {
        None => return Ok(Decimal::ZERO),
        Some(s) => parse_amount(s).ok_or(Skip::Unreadable)?,
    };
    per.checked_mul(Decimal::from(count - 1)).ok_or(Skip::Overflow)
}

fn non_empty_category(tx: &Transaction) -> Option<&str> {
    tx.category.as_deref().filter(|c| !c.is_empty())
}

/// Income and expense running totals. A value that would take either total,
/// or their difference, out of `Decimal` range is rejected and the totals
/// stay as they were.
#[derive(Debug, Default)]
struct Ledger {
    income: Decimal,
    expenses: Decimal,
}

impl Ledger {
    fn post(&mut self, kind: TxType, value: Decimal) -> Result<(), Skip> {
        let (income, expenses) = match kind {
            TxType::Income => (self.income.checked_add(value), Some(self.expenses)),
            TxType::Expense => (Some(self.income), self.expenses.checked_add(value.abs())),
        };
        match (income, expenses) {
            (Some(i), Some(e)) if i.checked_sub(e).is_some() => {
                self.income = i;
                self.expenses = e;
                Ok(())
            }
            _ => Err(Skip::Overflow),
        }
    }
}

fn effective_income(salary: Decimal, recorded: Decimal) -> Decimal {
    if salary > Decimal::ZERO { salary } else { recorded }
}

pub fn aggregate_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut sums: Vec<(&str, Decimal)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut grand_total = Decimal::ZERO;

    for tx in transactions {
        if tx.kind != TxType::Expense {
            continue;
        }
        let Some(category) = non_empty_category(tx) else {
            continue;
        };
        let Some(amount) = value_of(tx).map(|v| v.abs()) else {
            continue;
        };
        // every category sum is bounded by the grand total
        let Some(next_total) = grand_total.checked_add(amount) else {
            debug!(id = %tx.id, "skipping transaction that overflows the category totals");
            continue;
        };
        grand_total = next_total;
        match index.get(category) {
            Some(&i) => sums[i].1 += amount,
            None => {
                index.insert(category, sums.len());
                sums.push((category, amount));
            }
        }
    }

    let mut totals: Vec<CategoryTotal> = sums
        .into_iter()
        .enumerate()
        .map(|(pos, (name, total))| {
            let meta = resolve_category(name);
            CategoryTotal {
                id: pos.to_string(),
                name: name.to_string(),
                total,
                formatted_total: format_currency(total),
                percentage: percent_of(total, grand_total),
                color: meta.color.to_string(),
                icon: meta.icon,
            }
        })
        .collect();
    // sort_by is stable: equal totals keep encounter order
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// One pass over the records; returns the summary and the records left out
/// because a total would have overflowed.
fn summarize(transactions: &[Transaction], salary: Decimal) -> (FinancialSummary, Vec<&Transaction>) {
    let mut ledger = Ledger::default();
    let mut pending_debt = Decimal::ZERO;
    let mut skipped = 0usize;
    let mut overflowed = Vec::new();

    for tx in transactions {
        let mut skips = Vec::new();
        match value_of(tx) {
            Some(v) => {
                if let Err(skip) = ledger.post(tx.kind, v) {
                    skips.push(skip);
                }
            }
            None => skips.push(Skip::Unreadable),
        }
        if tx.is_expense() {
            match remaining_installments(tx)
                .and_then(|rest| pending_debt.checked_add(rest).ok_or(Skip::Overflow))
            {
                Ok(next) => pending_debt = next,
                Err(skip) => skips.push(skip),
            }
        }
        if !skips.is_empty() {
            debug!(id = %tx.id, ?skips, "transaction left out of the summary");
            skipped += 1;
        }
        if skips.contains(&Skip::Overflow) {
            overflowed.push(tx);
        }
    }

    let income = effective_income(salary, ledger.income);
    // in range: a positive salary and the expense total are non-negative,
    // and the ledger keeps recorded income minus expenses in range
    let available_balance = income.checked_sub(ledger.expenses).unwrap_or_default();
    let summary = FinancialSummary {
        available_balance,
        pending_debt,
        total_expenses: ledger.expenses,
        total_income: income,
        skipped,
    };
    (summary, overflowed)
}

pub fn compute_financial_summary(transactions: &[Transaction], salary: Decimal) -> FinancialSummary {
    summarize(transactions, salary).0
}

pub fn compute_report(transactions: &[Transaction], salary: Decimal) -> ReportStats {
    let mut ledger = Ledger::default();
    let mut biggest = Decimal::ZERO;
    let mut expense_records = 0usize;
    let mut skipped = 0usize;
    let mut usage: Vec<(&str, usize)> = Vec::new();

    for tx in transactions {
        if tx.is_expense() {
            if let Some(category) = non_empty_category(tx) {
                match usage.iter_mut().find(|(c, _)| *c == category) {
                    Some((_, n)) => *n += 1,
                    None => usage.push((category, 1)),
                }
            }
        }
        let Some(v) = value_of(tx) else {
            skipped += 1;
            continue;
        };
        if ledger.post(tx.kind, v).is_err() {
            debug!(id = %tx.id, "skipping transaction that overflows the report totals");
            skipped += 1;
            continue;
        }
        if tx.is_expense() {
            expense_records += 1;
            biggest = biggest.max(v.abs());
        }
    }

    // strictly greater: the first category to reach the top count wins
    let mut most_used = (NO_CATEGORY_LABEL, 0usize);
    for (category, n) in usage {
        if n > most_used.1 {
            most_used = (category, n);
        }
    }

    let total_income = effective_income(salary, ledger.income);
    let balance = total_income.checked_sub(ledger.expenses).unwrap_or_default();
    let average_expense = if expense_records > 0 {
        (ledger.expenses / Decimal::from(expense_records)).round_dp(2)
    } else {
        Decimal::ZERO
    };
    let savings_rate = balance
        .checked_div(total_income)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp(1));

    ReportStats {
        total_income,
        total_expenses: ledger.expenses,
        balance,
        transaction_count: transactions.len(),
        average_expense,
        biggest_expense: biggest,
        most_used_category: most_used.0.to_string(),
        savings_rate,
        skipped,
    }
}

/// Expense transactions filed under `category`, in stored order.
pub fn category_detail<'a>(transactions: &'a [Transaction], category: &str) -> CategoryDetail<'a> {
    let items: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| tx.is_expense() && tx.category.as_deref() == Some(category))
        .collect();
    let total = items
        .iter()
        .filter_map(|tx| parse_amount(&tx.value))
        .fold(Decimal::ZERO, |acc, v| acc.checked_add(v.abs()).unwrap_or(acc));
    let count = items.len();
    let average = if count > 0 {
        (total / Decimal::from(count)).round_dp(2)
    } else {
        Decimal::ZERO
    };
    CategoryDetail {
        name: category.to_string(),
        transactions: items,
        total,
        count,
        average,
    }
}

/// Whether this record holds an amount the reports cannot read.
pub fn is_unparseable(tx: &Transaction) -> bool {
    parse_amount(&tx.value).is_none()
        || (tx.is_expense() && remaining_installments(tx) == Err(Skip::Unreadable))
}

pub fn unparseable_records(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions.iter().filter(|tx| is_unparseable(tx)).collect()
}

pub fn count_unparseable(transactions: &[Transaction]) -> usize {
    transactions.iter().filter(|tx| is_unparseable(tx)).count()
}

/// Records the summary leaves out because their amount would push a total
/// out of range.
pub fn overflowing_records(transactions: &[Transaction]) -> Vec<&Transaction> {
    summarize(transactions, Decimal::ZERO).1
}
