// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client for the hosted per-user expense store (a Supabase-style REST API).
//! Row-level authorization is enforced server-side; this client only scopes
//! requests with the session's bearer token.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::debug;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::{Category, ExpenseDraft, ExpenseRow};
use crate::session::AuthSession;
use crate::utils::{self, http_client};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not signed in; run `spendwise login` first")]
    Unauthenticated,
    #[error("remote store unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Connection coordinates for the hosted backend. Environment variables win
/// over values stored in the local settings database.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub anon_key: String,
}

impl RemoteConfig {
    pub fn load(conn: &Connection) -> Result<Self> {
        let base_url = std::env::var("SPENDWISE_URL")
            .ok()
            .or(utils::get_setting(conn, "remote_url")?)
            .context("Remote store URL not configured; set SPENDWISE_URL")?;
        let anon_key = std::env::var("SPENDWISE_ANON_KEY")
            .ok()
            .or(utils::get_setting(conn, "remote_anon_key")?)
            .context("Remote store anon key not configured; set SPENDWISE_ANON_KEY")?;
        Ok(RemoteConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }
}

/// Seam between the sync client and the transport. The sync layer only
/// depends on this trait, so tests drive it with an in-memory double.
pub trait ExpenseStore {
    /// All of the current user's rows, ordered by date descending.
    fn fetch_all(&self) -> Result<Vec<ExpenseRow>, StoreError>;
    /// Insert one row and return the server's authoritative version of it.
    /// The id and creation timestamp come from the store's column defaults.
    fn insert(&self, draft: &ExpenseDraft) -> Result<ExpenseRow, StoreError>;
    fn delete(&self, id: &str) -> Result<(), StoreError>;
    /// Cheap reachability check. Never errors; unreachable is just `false`.
    fn probe(&self) -> bool;
}

#[derive(Serialize)]
struct InsertPayload<'a> {
    user_id: &'a str,
    amount: Decimal,
    category: Category,
    date: NaiveDate,
    note: Option<&'a str>,
}

pub struct RemoteStore {
    config: RemoteConfig,
    auth: Option<(String, String)>, // (access token, user id)
    client: reqwest::blocking::Client,
}

impl RemoteStore {
    pub fn new(config: RemoteConfig, session: Option<&AuthSession>) -> Result<Self, StoreError> {
        Ok(RemoteStore {
            auth: session.map(|s| (s.access_token.clone(), s.user_id.clone())),
            client: http_client()?,
            config,
        })
    }

    fn rows_url(&self) -> String {
        format!("{}/rest/v1/expenses", self.config.base_url)
    }

    fn authed(&self) -> Result<&(String, String), StoreError> {
        self.auth.as_ref().ok_or(StoreError::Unauthenticated)
    }

    fn request(
        &self,
        req: reqwest::blocking::RequestBuilder,
        token: &str,
    ) -> Result<reqwest::blocking::Response, StoreError> {
        let resp = req
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        // PostgREST errors carry a JSON body with a "message" field.
        let message = resp
            .json::<serde_json::Value>()
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| status.to_string());
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

impl ExpenseStore for RemoteStore {
    fn fetch_all(&self) -> Result<Vec<ExpenseRow>, StoreError> {
        let (token, _) = self.authed()?;
        let url = format!("{}?select=*&order=date.desc", self.rows_url());
        let rows: Vec<ExpenseRow> = self.request(self.client.get(url), token)?.json()?;
        debug!("fetched {} expense rows", rows.len());
        Ok(rows)
    }

    fn insert(&self, draft: &ExpenseDraft) -> Result<ExpenseRow, StoreError> {
        let (token, user_id) = self.authed()?;
        let payload = [InsertPayload {
            user_id,
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
            note: draft.note.as_deref(),
        }];
        let req = self
            .client
            .post(self.rows_url())
            .header("Prefer", "return=representation")
            .json(&payload);
        let mut rows: Vec<ExpenseRow> = self.request(req, token)?.json()?;
        rows.pop().ok_or(StoreError::Rejected {
            status: 200,
            message: "insert returned no representation".into(),
        })
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let (token, _) = self.authed()?;
        let url = format!("{}?id=eq.{}", self.rows_url(), id);
        self.request(self.client.delete(url), token)?;
        Ok(())
    }

    fn probe(&self) -> bool {
        let url = format!("{}/auth/v1/health", self.config.base_url);
        self.client
            .get(url)
            .header("apikey", &self.config.anon_key)
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}
