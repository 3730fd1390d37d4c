// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).num_args(1).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

/// Attributes shared by `tx add` and `tx edit`.
fn tx_fields(cmd: Command, for_edit: bool) -> Command {
    let description = opt("description", "What the money was for").short('d');
    let amount = opt("amount", "Total amount, e.g. 320,00").short('a');
    let (description, amount) = if for_edit {
        (description, amount)
    } else {
        (description.required(true), amount.required(true))
    };
    cmd.arg(description)
        .arg(amount)
        .arg(
            opt("type", "income or expense")
                .short('t')
                .value_parser(["income", "expense"]),
        )
        .arg(opt("category", "Category key (see `saldo category list`)").short('c'))
        .arg(opt("date", "DD/MM/YYYY (defaults to today)"))
        .arg(opt("time", "HH:MM"))
        .arg(opt("payment", "Payment method label"))
        .arg(opt("notes", "Free-text notes"))
        .arg(
            opt("installments", "Number of installments")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(opt(
            "installment-value",
            "Value of each installment (defaults to amount / installments)",
        ))
        .arg(
            Arg::new("split")
                .long("split")
                .num_args(1)
                .action(ArgAction::Append)
                .help("Collective split participant as NAME=AMOUNT (repeatable)"),
        )
}

pub fn build_cli() -> Command {
    Command::new("saldo")
        .about("Personal finance ledger: transactions, categories, salary dashboard")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the local store"))
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(tx_fields(Command::new("add").about("Record a transaction"), false))
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(opt("type", "income or expense").value_parser(["income", "expense"]))
                        .arg(opt("category", "Only this category"))
                        .arg(opt("limit", "Show at most N rows").value_parser(value_parser!(usize))),
                ))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show one transaction")
                        .arg(req("id", "Transaction id")),
                ))
                .subcommand(tx_fields(
                    Command::new("edit")
                        .about("Replace fields of a transaction")
                        .arg(req("id", "Transaction id")),
                    true,
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(req("id", "Transaction id")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Expense categories")
                .subcommand(json_flags(Command::new("list").about("Known category keys")))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Expenses filed under one category")
                        .arg(req("name", "Category key")),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboards and reports")
                .subcommand(json_flags(
                    Command::new("dashboard").about("Summary cards plus top categories"),
                ))
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Spending per category")
                        .arg(opt("top", "Only the N biggest").value_parser(value_parser!(usize))),
                ))
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Available salary, pending debt, expenses"),
                ))
                .subcommand(json_flags(
                    Command::new("stats").about("Detailed statistics and insights"),
                )),
        )
        .subcommand(
            Command::new("settings")
                .about("Application settings")
                .subcommand(json_flags(Command::new("show").about("Current settings")))
                .subcommand(
                    Command::new("salary")
                        .about("Set the monthly salary (0 to unset)")
                        .arg(req("amount", "Salary, e.g. 5000,00")),
                )
                .subcommand(
                    Command::new("set")
                        .about("Change several settings at once")
                        .arg(opt("salary", "Monthly salary"))
                        .arg(opt("currency", "Currency code"))
                        .arg(opt("theme", "light or dark").value_parser(["light", "dark"])),
                )
                .subcommand(Command::new("clear").about("Reset settings to defaults")),
        )
        .subcommand(
            Command::new("auth")
                .about("Local account")
                .subcommand(
                    Command::new("register")
                        .about("Create an account and sign in")
                        .arg(req("name", "Display name"))
                        .arg(req("email", "Email"))
                        .arg(req("password", "Password (min 6 chars)")),
                )
                .subcommand(
                    Command::new("login")
                        .about("Sign in")
                        .arg(req("email", "Email"))
                        .arg(req("password", "Password")),
                )
                .subcommand(Command::new("logout").about("Sign out"))
                .subcommand(json_flags(Command::new("whoami").about("Signed-in profile")))
                .subcommand(
                    Command::new("update")
                        .about("Edit the signed-in profile")
                        .arg(opt("name", "New name"))
                        .arg(opt("email", "New email"))
                        .arg(opt("image", "Profile image URI (empty to clear)")),
                )
                .subcommand(
                    Command::new("passwd")
                        .about("Change password")
                        .arg(req("current", "Current password"))
                        .arg(req("new", "New password")),
                ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Write all transactions to a file")
                    .arg(
                        opt("format", "csv or json")
                            .value_parser(["csv", "json"])
                            .default_value("csv"),
                    )
                    .arg(req("out", "Output path")),
            ),
        )
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("transactions")
                    .about("Append transactions from a JSON array")
                    .arg(req("file", "Path to JSON file"))
                    .arg(
                        Arg::new("replace")
                            .long("replace")
                            .action(ArgAction::SetTrue)
                            .help("Drop stored transactions first"),
                    ),
            ),
        )
        .subcommand(Command::new("doctor").about("Find records the reports cannot read"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_consistent() {
        build_cli().debug_assert();
    }
}
