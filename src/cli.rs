// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("category")
            .long("category")
            .help("Only this category"),
    )
    .arg(
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .help("Earliest date, inclusive"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .help("Latest date, inclusive"),
    )
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .about("Personal expense tracking with cloud sync and an AI advisor")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the local settings database"))
        .subcommand(
            Command::new("login")
                .about("Sign in to the sync backend")
                .arg(Arg::new("email").long("email"))
                .arg(Arg::new("password").long("password"))
                .arg(
                    Arg::new("oauth")
                        .long("oauth")
                        .value_name("PROVIDER")
                        .help("Print the OAuth sign-in URL for a provider (e.g. google, github)"),
                ),
        )
        .subcommand(
            Command::new("signup")
                .about("Create an account on the sync backend")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(Command::new("logout").about("Sign out and drop the local session"))
        .subcommand(Command::new("whoami").about("Show the signed-in identity"))
        .subcommand(
            Command::new("expense")
                .about("Record, list, and delete expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record a new expense")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Defaults to today"),
                        )
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(filter_args(
                    Command::new("list")
                        .about("List expenses, newest first")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an expense")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(json_flags(filter_args(Command::new("stats").about(
            "Totals, per-category breakdown, and the 7-day trend",
        ))))
        .subcommand(
            Command::new("export")
                .about("Export expenses to CSV")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .value_name("YYYY-MM")
                        .conflicts_with_all(["from", "to"]),
                )
                .arg(Arg::new("from").long("from").value_name("YYYY-MM-DD"))
                .arg(Arg::new("to").long("to").value_name("YYYY-MM-DD"))
                .arg(
                    Arg::new("out")
                        .long("out")
                        .help("Output path; defaults to a name derived from the selection"),
                ),
        )
        .subcommand(
            Command::new("advisor")
                .about("Ask the AI advisor about your spending")
                .arg(Arg::new("message").required(true)),
        )
        .subcommand(
            Command::new("settings")
                .about("Local preferences")
                .subcommand(
                    Command::new("theme")
                        .about("Show or set the theme (light|dark)")
                        .arg(Arg::new("value")),
                )
                .subcommand(
                    Command::new("api-key")
                        .about("Show, set, or clear the AI API key")
                        .arg(Arg::new("value"))
                        .arg(
                            Arg::new("clear")
                                .long("clear")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("value"),
                        ),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Check whether the sync backend is reachable")
                .arg(
                    Arg::new("watch")
                        .long("watch")
                        .action(ArgAction::SetTrue)
                        .help("Keep probing every 30 seconds until interrupted"),
                ),
        )
}
