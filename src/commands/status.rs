// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use std::time::Duration;

use crate::store::ExpenseStore;
use crate::sync::ConnectionMonitor;

fn label(online: bool) -> &'static str {
    if online { "online" } else { "offline" }
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let store = super::remote_store(conn)?;

    if !sub.get_flag("watch") {
        println!("{}", label(store.probe()));
        return Ok(());
    }

    let monitor = ConnectionMonitor::start(store);
    let mut last = monitor.is_online();
    println!("{}", label(last));
    loop {
        std::thread::sleep(Duration::from_secs(1));
        let now = monitor.is_online();
        if now != last {
            println!("{}", label(now));
            last = now;
        }
    }
}
