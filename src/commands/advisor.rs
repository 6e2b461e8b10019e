// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::advisor::{self, AdvisorError};
use crate::utils::get_api_key;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let message = sub.get_one::<String>("message").unwrap();
    let key = get_api_key(conn)?.ok_or(AdvisorError::MissingKey)?;

    let mut client = super::sync_client(conn)?;
    client.load()?;

    let reply = advisor::chat(&key, message, client.expenses())?;
    println!("{}", reply);
    Ok(())
}
