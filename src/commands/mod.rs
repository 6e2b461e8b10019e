// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod advisor;
pub mod auth;
pub mod expenses;
pub mod exporter;
pub mod settings;
pub mod stats;
pub mod status;

use anyhow::Result;
use rusqlite::Connection;

use crate::session::SessionGate;
use crate::store::{RemoteConfig, RemoteStore};
use crate::sync::SyncClient;

pub(crate) fn remote_store(conn: &Connection) -> Result<RemoteStore> {
    let config = RemoteConfig::load(conn)?;
    let gate = SessionGate::restore(config.clone(), conn)?;
    Ok(RemoteStore::new(config, gate.current())?)
}

pub(crate) fn sync_client(conn: &Connection) -> Result<SyncClient<RemoteStore>> {
    Ok(SyncClient::new(remote_store(conn)?))
}
