// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use saldo::aggregate::{
    NO_CATEGORY_LABEL, aggregate_by_category, category_detail, compute_financial_summary,
    compute_report, count_unparseable, overflowing_records,
};
use saldo::categories::Icon;
use saldo::currency::{format_currency, parse_amount};
use saldo::models::{Transaction, TxType};

fn expense(category: &str, value: &str) -> Transaction {
    Transaction::new("gasto", value, "10/01/2025", TxType::Expense).with_category(category)
}

fn income(value: &str) -> Transaction {
    Transaction::new("salario", value, "05/01/2025", TxType::Income)
}

fn brl(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

#[test]
fn empty_input_gives_empty_breakdown() {
    assert!(aggregate_by_category(&[]).is_empty());
}

#[test]
fn single_category_takes_everything() {
    let txs = vec![
        expense("alimentacao", "- R$ 100,00"),
        expense("alimentacao", "- R$ 50,00"),
    ];
    let totals = aggregate_by_category(&txs);
    assert_eq!(totals.len(), 1);
    let food = &totals[0];
    assert_eq!(food.name, "alimentacao");
    assert_eq!(food.total, brl(15000));
    assert_eq!(food.formatted_total, "R$ 150,00");
    assert_eq!(food.percentage, 100);
    assert_eq!(food.color, "#4caf50");
    assert_eq!(food.icon, Icon::Utensils);
}

#[test]
fn breakdown_is_sorted_by_total_descending() {
    let txs = vec![
        expense("lazer", "- R$ 10,00"),
        expense("moradia", "- R$ 50,00"),
        expense("saude", "- R$ 30,00"),
    ];
    let totals = aggregate_by_category(&txs);
    let amounts: Vec<Decimal> = totals.iter().map(|t| t.total).collect();
    assert_eq!(amounts, vec![brl(5000), brl(3000), brl(1000)]);
    assert_eq!(totals[0].name, "moradia");
    assert_eq!(totals[2].name, "lazer");
}

#[test]
fn equal_totals_keep_first_seen_order() {
    let txs = vec![
        expense("vestuario", "- R$ 20,00"),
        expense("educacao", "- R$ 20,00"),
        expense("lazer", "- R$ 5,00"),
    ];
    let names: Vec<String> = aggregate_by_category(&txs)
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["vestuario", "educacao", "lazer"]);
}

#[test]
fn totals_add_up_and_percentages_stay_close_to_100() {
    let txs = vec![
        expense("lazer", "- R$ 10,00"),
        expense("moradia", "- R$ 10,00"),
        expense("saude", "- R$ 10,00"),
        expense("lazer", "- R$ 3,33"),
        income("+ R$ 999,00"),
    ];
    let totals = aggregate_by_category(&txs);
    let sum: Decimal = totals.iter().map(|t| t.total).sum();
    assert_eq!(sum, brl(3333));

    let pct: u32 = totals.iter().map(|t| t.percentage).sum();
    let n = totals.len() as u32;
    assert!(pct + n >= 100 && pct <= 100 + n, "percentages summed to {pct}");
}

#[test]
fn income_and_uncategorized_expenses_are_left_out() {
    let mut bare = expense("", "- R$ 40,00");
    bare.category = None;
    let txs = vec![
        income("+ R$ 1.000,00"),
        bare,
        expense("", "- R$ 15,00"),
        expense("lazer", "- R$ 25,00"),
    ];
    let totals = aggregate_by_category(&txs);
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].name, "lazer");
    assert_eq!(totals[0].percentage, 100);
}

#[test]
fn unknown_category_keeps_its_name_with_fallback_look() {
    let totals = aggregate_by_category(&[expense("cripto", "- R$ 12,00")]);
    assert_eq!(totals[0].name, "cripto");
    assert_eq!(totals[0].color, "#9e9e9e");
    assert_eq!(totals[0].icon, Icon::HelpCircle);
}

#[test]
fn garbled_values_are_skipped() {
    let txs = vec![
        expense("lazer", "garbled"),
        expense("lazer", "- R$ 20,00"),
        income("???"),
    ];
    let totals = aggregate_by_category(&txs);
    assert_eq!(totals[0].total, brl(2000));

    let summary = compute_financial_summary(&txs, Decimal::ZERO);
    assert_eq!(summary.total_expenses, brl(2000));
    assert_eq!(summary.total_income, Decimal::ZERO);
    assert_eq!(summary.skipped, 2);
    assert_eq!(count_unparseable(&txs), 2);
}

#[test]
fn currency_round_trip() {
    for cents in [0i64, 1, 99, 32000, 132050, 987654321] {
        let amount = brl(cents);
        assert_eq!(parse_amount(&format_currency(amount)), Some(amount));
    }
    assert_eq!(parse_amount("- R$ 1.320,50"), Some(brl(-132050)));
}

#[test]
fn installments_add_pending_debt() {
    let txs = vec![expense("veiculo", "- R$ 150,00").with_installments(3, "50,00")];
    let summary = compute_financial_summary(&txs, Decimal::ZERO);
    assert_eq!(summary.pending_debt, brl(10000));
    assert_eq!(summary.total_expenses, brl(15000));
    assert_eq!(summary.available_balance, brl(-15000));
}

#[test]
fn unreadable_installment_value_counts_once() {
    let txs = vec![expense("veiculo", "oops").with_installments(4, "nope")];
    let summary = compute_financial_summary(&txs, Decimal::ZERO);
    assert_eq!(summary.pending_debt, Decimal::ZERO);
    assert_eq!(summary.skipped, 1);
}

#[test]
fn salary_replaces_recorded_income() {
    let txs = vec![income("+ R$ 800,00"), expense("moradia", "- R$ 1.200,00")];

    let without = compute_financial_summary(&txs, Decimal::ZERO);
    assert_eq!(without.total_income, brl(80000));
    assert_eq!(without.available_balance, brl(-40000));

    let with = compute_financial_summary(&txs, brl(500000));
    assert_eq!(with.total_income, brl(500000));
    assert_eq!(with.available_balance, brl(380000));
}

#[test]
fn report_figures() {
    let txs = vec![
        income("+ R$ 2.000,00"),
        expense("lazer", "- R$ 100,00"),
        expense("moradia", "- R$ 700,00"),
        expense("lazer", "- R$ 50,00"),
        expense("lazer", "broken"),
    ];
    let stats = compute_report(&txs, Decimal::ZERO);
    assert_eq!(stats.total_income, brl(200000));
    assert_eq!(stats.total_expenses, brl(85000));
    assert_eq!(stats.balance, brl(115000));
    assert_eq!(stats.transaction_count, 5);
    assert_eq!(stats.average_expense, brl(28333));
    assert_eq!(stats.biggest_expense, brl(70000));
    assert_eq!(stats.most_used_category, "lazer");
    assert_eq!(stats.savings_rate, Some(Decimal::new(575, 1)));
    assert_eq!(stats.skipped, 1);
}

#[test]
fn report_on_nothing() {
    let stats = compute_report(&[], Decimal::ZERO);
    assert_eq!(stats.most_used_category, NO_CATEGORY_LABEL);
    assert_eq!(stats.savings_rate, None);
    assert_eq!(stats.average_expense, Decimal::ZERO);
}

#[test]
fn most_used_category_tie_goes_to_first_seen() {
    let txs = vec![
        expense("saude", "- R$ 1,00"),
        expense("lazer", "- R$ 1,00"),
        expense("lazer", "- R$ 1,00"),
        expense("saude", "- R$ 1,00"),
    ];
    assert_eq!(compute_report(&txs, Decimal::ZERO).most_used_category, "saude");
}

#[test]
fn category_detail_lists_matching_expenses() {
    let txs = vec![
        expense("lazer", "- R$ 30,00"),
        expense("moradia", "- R$ 500,00"),
        expense("lazer", "- R$ 10,00"),
        Transaction::new("reembolso", "+ R$ 5,00", "01/02/2025", TxType::Income)
            .with_category("lazer"),
    ];
    let detail = category_detail(&txs, "lazer");
    assert_eq!(detail.count, 2);
    assert_eq!(detail.total, brl(4000));
    assert_eq!(detail.average, brl(2000));
    assert_eq!(detail.transactions[0].value, "- R$ 30,00");

    let none = category_detail(&txs, "farmacia");
    assert_eq!(none.count, 0);
    assert_eq!(none.average, Decimal::ZERO);
}

const HUGE: &str = "- R$ 50000000000000000000000000000,00";

#[test]
fn category_totals_skip_amounts_that_would_overflow() {
    let txs = vec![
        expense("moradia", HUGE),
        expense("moradia", HUGE),
        expense("lazer", "- R$ 10,00"),
    ];
    let totals = aggregate_by_category(&txs);
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].name, "moradia");
    assert_eq!(Some(totals[0].total), parse_amount(HUGE).map(|v| v.abs()));
    assert_eq!(totals[0].percentage, 100);
    assert_eq!(totals[1].total, brl(1000));
}

#[test]
fn summary_skips_overflowing_records() {
    let txs = vec![expense("moradia", HUGE), expense("moradia", HUGE)];
    let summary = compute_financial_summary(&txs, Decimal::ZERO);
    assert_eq!(Some(summary.total_expenses), parse_amount(HUGE).map(|v| v.abs()));
    assert_eq!(summary.skipped, 1);

    let overflowed = overflowing_records(&txs);
    assert_eq!(overflowed.len(), 1);
    assert!(std::ptr::eq(overflowed[0], &txs[1]));
    assert_eq!(count_unparseable(&txs), 0);
}

#[test]
fn pending_debt_skips_installments_that_would_overflow() {
    let txs = vec![
        expense("veiculo", "- R$ 10,00").with_installments(u32::MAX, "100000000000000000000,00"),
        expense("veiculo", "- R$ 150,00").with_installments(3, "50,00"),
    ];
    let summary = compute_financial_summary(&txs, Decimal::ZERO);
    assert_eq!(summary.pending_debt, brl(10000));
    assert_eq!(summary.total_expenses, brl(16000));
    assert_eq!(summary.skipped, 1);
    assert_eq!(overflowing_records(&txs).len(), 1);
}

#[test]
fn report_survives_a_tiny_salary_against_a_huge_expense() {
    let txs = vec![expense("moradia", "- R$ 1000000000000000000000000000,00")];
    let stats = compute_report(&txs, brl(1));
    assert_eq!(stats.total_income, brl(1));
    assert!(stats.balance < Decimal::ZERO);
    assert_eq!(stats.savings_rate, None);
    assert_eq!(stats.skipped, 0);

    let txs = vec![expense("moradia", HUGE), expense("lazer", HUGE)];
    let stats = compute_report(&txs, Decimal::ZERO);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.most_used_category, "moradia");
}
