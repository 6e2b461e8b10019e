// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::Cell;
use std::rc::Rc;

use rusqlite::Connection;

use spendwise::session::SessionGate;
use spendwise::store::RemoteConfig;
use spendwise::utils::{get_setting, set_setting};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);")
        .unwrap();
    conn
}

fn config() -> RemoteConfig {
    RemoteConfig {
        base_url: "https://project.example.test".into(),
        anon_key: "anon-key".into(),
    }
}

#[test]
fn restore_reads_the_persisted_session() {
    let conn = setup();
    set_setting(
        &conn,
        "session",
        r#"{"user_id":"user-1","email":"a@b.test","access_token":"tok"}"#,
    )
    .unwrap();

    let gate = SessionGate::restore(config(), &conn).unwrap();
    let session = gate.current().unwrap();
    assert_eq!(session.user_id, "user-1");
    assert_eq!(session.email, "a@b.test");
}

#[test]
fn restore_discards_an_unreadable_session() {
    let conn = setup();
    set_setting(&conn, "session", "not-json").unwrap();
    let gate = SessionGate::restore(config(), &conn).unwrap();
    assert!(gate.current().is_none());
}

#[test]
fn oauth_url_points_at_the_authorize_endpoint() {
    let conn = setup();
    let gate = SessionGate::restore(config(), &conn).unwrap();
    assert_eq!(
        gate.oauth_url("GitHub"),
        "https://project.example.test/auth/v1/authorize?provider=github"
    );
}

#[test]
fn sign_out_clears_state_and_notifies_subscribers() {
    let conn = setup();
    // No signed-in session, so sign-out is purely local.
    let mut gate = SessionGate::restore(config(), &conn).unwrap();
    set_setting(&conn, "session", "stale").unwrap();

    let fired = Rc::new(Cell::new(false));
    let seen = Rc::clone(&fired);
    gate.subscribe(move |session| {
        assert!(session.is_none());
        seen.set(true);
    });

    gate.sign_out(&conn);
    assert!(fired.get());
    assert!(gate.current().is_none());
    assert!(get_setting(&conn, "session").unwrap().is_none());
}
