// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("billfold")
        .version(crate_version!())
        .about("Personal income/expense ledger with savings goals and payment reminders")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Create an account with an initial balance")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .default_value("0")
                                .help("Initial balance, recorded as an opening income entry"),
                        )
                        .arg(Arg::new("kind").long("kind").help("cash, card or savings"))
                        .arg(Arg::new("color").long("color").help("Display color tag"))
                        .arg(Arg::new("goal").long("goal").help("Monthly savings goal")),
                )
                .subcommand(json_flags(Command::new("list").about("List accounts with balances")))
                .subcommand(
                    Command::new("edit")
                        .about("Update an existing account")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("new-name").long("new-name"))
                        .arg(Arg::new("kind").long("kind"))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("goal").long("goal"))
                        .arg(
                            Arg::new("enable-goal")
                                .long("enable-goal")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("disable-goal"),
                        )
                        .arg(
                            Arg::new("disable-goal")
                                .long("disable-goal")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an account and all of its transactions")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage expense categories")
                .subcommand(
                    Command::new("add").arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a movement")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("desc").long("desc").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Required for expenses; forbidden for income"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, defaults to now"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Update fields of a transaction")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("desc").long("desc"))
                        .arg(Arg::new("kind").long("kind"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Lifetime balance plus one month's income and expenses")
                .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current"))
                .arg(Arg::new("account").long("account").help("Scope to one account"))
                .arg(Arg::new("category").long("category").help("Narrow the month's listing")),
        ))
        .subcommand(
            Command::new("reminder")
                .about("Recurring monthly payment reminders")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("kind").long("kind").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .required(true)
                                .value_parser(clap::value_parser!(u32)),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List reminders by due day")))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("new-name").long("new-name"))
                        .arg(Arg::new("kind").long("kind"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("day").long("day").value_parser(clap::value_parser!(u32))),
                )
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true)))
                .subcommand(json_flags(
                    Command::new("pending")
                        .about("Reminders still open for a month, with due status")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current")),
                ))
                .subcommand(
                    Command::new("done")
                        .about("Mark a reminder complete for a month")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current")),
                )
                .subcommand(
                    Command::new("undo")
                        .about("Reopen a reminder for a month")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current")),
                ),
        )
}
