// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

use crate::aggregate::MAX_MONTHS_BACK;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .help("income | expense")
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD (inclusive)"))
        .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD (inclusive)"))
}

fn limit_arg(default: &'static str) -> Arg {
    Arg::new("limit")
        .long("limit")
        .value_parser(value_parser!(usize))
        .default_value(default)
}

pub fn build_cli() -> Command {
    Command::new("finsight")
        .version(crate_version!())
        .about("Track income and expenses, view trends, export reports")
        .arg(
            Arg::new("owner")
                .long("owner")
                .global(true)
                .env("FINSIGHT_OWNER")
                .default_value("default")
                .help("Whose transactions to work with"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("FINSIGHT_DB")
                .help("SQLite database path (defaults to the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .arg(type_arg().required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(range_args(
                    Command::new("list")
                        .arg(Arg::new("search").long("search").help("Match description or category"))
                        .arg(type_arg())
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )))
                .subcommand(
                    Command::new("edit")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(type_arg())
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries of income and spending")
                .subcommand(json_flags(Command::new("totals")))
                .subcommand(json_flags(Command::new("categories").arg(type_arg())))
                .subcommand(json_flags(
                    Command::new("trend")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(
                                    value_parser!(u32).range(1..=i64::from(MAX_MONTHS_BACK)),
                                ),
                        )
                        .arg(Arg::new("as-of").long("as-of").help("Reference date YYYY-MM-DD")),
                ))
                .subcommand(json_flags(Command::new("recent").arg(limit_arg("5"))))
                .subcommand(json_flags(Command::new("top").arg(limit_arg("5"))))
                .subcommand(json_flags(Command::new("dashboard"))),
        )
        .subcommand(
            Command::new("category")
                .about("Suggested categories")
                .subcommand(Command::new("list").arg(type_arg())),
        )
        .subcommand(
            Command::new("export")
                .about("Write a transaction report")
                .subcommand(range_args(
                    Command::new("report")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv | json"),
                        )
                        .arg(Arg::new("out").long("out"))
                        .arg(type_arg()),
                )),
        )
        .subcommand(
            Command::new("import")
                .about("Load transactions from a report CSV")
                .subcommand(
                    Command::new("transactions").arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Find stored records that cannot be aggregated"))
        .subcommand(
            Command::new("config")
                .about("Read or change settings")
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
}
