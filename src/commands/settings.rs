// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::utils::{clear_setting, get_api_key, get_theme, set_setting, set_theme};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("theme", sub)) => match sub.get_one::<String>("value") {
            Some(value) => {
                set_theme(conn, value)?;
                println!("Theme set to {}", value);
            }
            None => println!("{}", get_theme(conn)?),
        },
        Some(("api-key", sub)) => {
            if sub.get_flag("clear") {
                clear_setting(conn, "ai_api_key")?;
                println!("AI API key cleared");
            } else if let Some(value) = sub.get_one::<String>("value") {
                set_setting(conn, "ai_api_key", value)?;
                println!("AI API key saved (stored locally, sent only to the AI endpoint)");
            } else {
                match get_api_key(conn)? {
                    Some(key) if key.len() > 4 => {
                        println!("…{}", &key[key.len() - 4..])
                    }
                    Some(_) => println!("(set)"),
                    None => println!("(not set)"),
                }
            }
        }
        _ => {}
    }
    Ok(())
}
