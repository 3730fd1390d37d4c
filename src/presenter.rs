// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{FinancialSummary, ReportStats};
use crate::categories::capitalize;
use crate::currency::format_currency;
use crate::models::CategoryTotal;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Positive => "positive",
            Tone::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub label: String,
    pub amount: String,
    pub percentage: String,
    /// Progress-bar fill, capped at 100.
    pub bar: u32,
    pub color: String,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub title: &'static str,
    pub amount: String,
    pub tone: Tone,
}

pub fn present_categories(totals: &[CategoryTotal]) -> Vec<CategoryRow> {
    totals
        .iter()
        .map(|t| CategoryRow {
            label: capitalize(&t.name),
            amount: t.formatted_total.clone(),
            percentage: format!("{}%", t.percentage),
            bar: t.percentage.min(100),
            color: t.color.clone(),
            icon: t.icon.name(),
        })
        .collect()
}

fn tone_of(amount: Decimal) -> Tone {
    if amount >= Decimal::ZERO {
        Tone::Positive
    } else {
        Tone::Negative
    }
}

pub fn present_summary(summary: &FinancialSummary) -> Vec<SummaryRow> {
    vec![
        SummaryRow {
            title: "Available Salary",
            amount: format_currency(summary.available_balance),
            tone: tone_of(summary.available_balance),
        },
        SummaryRow {
            title: "Pending Debt",
            amount: format_currency(summary.pending_debt),
            tone: Tone::Negative,
        },
        SummaryRow {
            title: "Expense Summary",
            amount: format_currency(summary.total_expenses),
            tone: Tone::Negative,
        },
    ]
}

pub fn present_report(stats: &ReportStats) -> Vec<SummaryRow> {
    vec![
        SummaryRow {
            title: "Income",
            amount: format_currency(stats.total_income),
            tone: Tone::Positive,
        },
        SummaryRow {
            title: "Expenses",
            amount: format_currency(stats.total_expenses),
            tone: Tone::Negative,
        },
        SummaryRow {
            title: "Balance",
            amount: format_currency(stats.balance),
            tone: tone_of(stats.balance),
        },
        SummaryRow {
            title: "Transactions",
            amount: stats.transaction_count.to_string(),
            tone: Tone::Positive,
        },
        SummaryRow {
            title: "Average Expense",
            amount: format_currency(stats.average_expense),
            tone: Tone::Negative,
        },
        SummaryRow {
            title: "Biggest Expense",
            amount: format_currency(stats.biggest_expense),
            tone: Tone::Negative,
        },
        SummaryRow {
            title: "Most Used Category",
            amount: capitalize(&stats.most_used_category),
            tone: Tone::Positive,
        },
        SummaryRow {
            title: "Savings Rate",
            amount: match stats.savings_rate {
                Some(r) => format!("{:.1}%", r),
                None => "0%".to_string(),
            },
            tone: tone_of(stats.savings_rate.unwrap_or_default()),
        },
    ]
}

pub fn insights(stats: &ReportStats) -> Vec<String> {
    let threshold = stats.total_income * Decimal::new(8, 1);
    let spending = if stats.total_expenses > threshold {
        "Spending is high. Consider reviewing your expenses.".to_string()
    } else {
        "Spending is under control. Keep it up!".to_string()
    };
    let saving = if stats.balance > Decimal::ZERO {
        format!(
            "You saved {} this period.",
            format_currency(stats.balance)
        )
    } else {
        "Try setting a monthly savings goal to improve your finances.".to_string()
    };
    vec![spending, saving]
}

/// Text progress bar, `width` cells wide.
pub fn render_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
