// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use spendwise::{cli, commands, db};

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Settings database initialized at {}", db::db_path()?.display());
        }
        Some(("login", sub)) => commands::auth::login(&conn, sub)?,
        Some(("signup", sub)) => commands::auth::signup(&conn, sub)?,
        Some(("logout", _)) => commands::auth::logout(&conn)?,
        Some(("whoami", _)) => commands::auth::whoami(&conn)?,
        Some(("expense", sub)) => commands::expenses::handle(&conn, sub)?,
        Some(("stats", sub)) => commands::stats::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("advisor", sub)) => commands::advisor::handle(&conn, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("status", sub)) => commands::status::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
