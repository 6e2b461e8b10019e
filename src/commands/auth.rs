// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::session::SessionGate;
use crate::store::RemoteConfig;

fn gate(conn: &Connection) -> Result<SessionGate> {
    let config = RemoteConfig::load(conn)?;
    SessionGate::restore(config, conn)
}

pub fn login(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut gate = gate(conn)?;

    if let Some(provider) = sub.get_one::<String>("oauth") {
        println!("Open this URL in a browser to sign in:");
        println!("{}", gate.oauth_url(provider));
        return Ok(());
    }

    let email = sub
        .get_one::<String>("email")
        .ok_or_else(|| anyhow::anyhow!("Provide --email and --password, or --oauth <provider>"))?;
    let password = sub
        .get_one::<String>("password")
        .ok_or_else(|| anyhow::anyhow!("Provide --password"))?;
    let session = gate.sign_in_with_password(conn, email, password)?;
    println!("Signed in as {}", session.email);
    Ok(())
}

pub fn signup(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut gate = gate(conn)?;
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    if gate.sign_up(conn, email, password)? {
        println!("Account created; signed in as {}", email);
    } else {
        println!("Account created; check {} for a confirmation link, then log in.", email);
    }
    Ok(())
}

pub fn logout(conn: &Connection) -> Result<()> {
    let mut gate = gate(conn)?;
    gate.sign_out(conn);
    println!("Signed out.");
    Ok(())
}

pub fn whoami(conn: &Connection) -> Result<()> {
    let gate = gate(conn)?;
    match gate.current() {
        Some(session) => println!("{} (user id {})", session.email, session.user_id),
        None => println!("Not signed in."),
    }
    Ok(())
}
